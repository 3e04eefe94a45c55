//! # Resource Actor Framework
//!
//! A single task owns a keyed collection of entities and serves typed requests
//! arriving over a bounded channel. Callers hold a cheap, cloneable
//! [`ResourceClient`] and get replies over oneshot channels.
//!
//! Because the actor drains its mailbox one message at a time, every request is
//! atomic with respect to every other request. [`ResourceClient::transaction`]
//! builds on that: the caller ships a closure that runs against the [`Store`]
//! with nothing else interleaving, which is how multi-step read-validate-write
//! sequences stay consistent under concurrent callers.

use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument};

// =============================================================================
// 1. THE ABSTRACTION
// =============================================================================

/// Trait that any domain entity must implement to be managed by [`ResourceActor`].
pub trait Entity: Clone + Send + Sync + 'static {
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;
    type CreateParams: Send + Sync + Debug;
    type Update: Send + Sync + Debug;

    /// Get the ID of the entity
    fn id(&self) -> &Self::Id;

    /// Construct the full entity from a freshly assigned ID and its creation parameters.
    fn from_create_params(id: Self::Id, params: Self::CreateParams) -> Result<Self, FrameworkError>;

    /// Apply an update. Must leave `self` untouched when it returns an error.
    fn on_update(&mut self, update: Self::Update) -> Result<(), FrameworkError>;
}

/// Errors produced by the store or by the channel plumbing around it.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameworkError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped")]
    ActorDropped,
}

// =============================================================================
// 2. THE STORE
// =============================================================================

/// Keyed entity storage owned by a [`ResourceActor`].
///
/// Iteration follows creation order. IDs come from `next_id_fn` and are never
/// handed out twice, even after the entity holding one is deleted.
pub struct Store<T: Entity> {
    items: HashMap<T::Id, T>,
    order: Vec<T::Id>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
}

impl<T: Entity> Store<T> {
    pub fn new(next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static) -> Self {
        Self {
            items: HashMap::new(),
            order: Vec::new(),
            next_id_fn: Box::new(next_id_fn),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &T::Id) -> Option<&T> {
        self.items.get(id)
    }

    pub fn list(&self) -> Vec<T> {
        self.order
            .iter()
            .filter_map(|id| self.items.get(id))
            .cloned()
            .collect()
    }

    /// Returns one entry per requested ID that exists, in request order.
    /// Missing IDs are skipped, so callers compare lengths to detect them.
    pub fn get_many(&self, ids: &[T::Id]) -> Vec<T> {
        ids.iter()
            .filter_map(|id| self.items.get(id))
            .cloned()
            .collect()
    }

    pub fn create(&mut self, params: T::CreateParams) -> Result<T, FrameworkError> {
        let id = (self.next_id_fn)();
        let item = T::from_create_params(id, params)?;
        self.order.push(item.id().clone());
        self.items.insert(item.id().clone(), item.clone());
        Ok(item)
    }

    pub fn update(&mut self, id: &T::Id, update: T::Update) -> Result<T, FrameworkError> {
        let item = self
            .items
            .get_mut(id)
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
        item.on_update(update)?;
        Ok(item.clone())
    }

    pub fn delete(&mut self, id: &T::Id) -> Result<(), FrameworkError> {
        if self.items.remove(id).is_none() {
            return Err(FrameworkError::NotFound(id.to_string()));
        }
        self.order.retain(|existing| existing != id);
        Ok(())
    }
}

// =============================================================================
// 3. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Work executed by the actor with exclusive access to its store.
/// The closure carries its own reply channel.
pub type Transaction<T> = Box<dyn FnOnce(&mut Store<T>) + Send>;

pub enum ResourceRequest<T: Entity> {
    List {
        respond_to: Response<Vec<T>>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Create {
        params: T::CreateParams,
        respond_to: Response<T>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Transaction {
        work: Transaction<T>,
    },
}

impl<T: Entity> Debug for ResourceRequest<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceRequest::List { .. } => f.write_str("List"),
            ResourceRequest::Get { id, .. } => f.debug_struct("Get").field("id", id).finish(),
            ResourceRequest::Create { params, .. } => {
                f.debug_struct("Create").field("params", params).finish()
            }
            ResourceRequest::Update { id, update, .. } => f
                .debug_struct("Update")
                .field("id", id)
                .field("update", update)
                .finish(),
            ResourceRequest::Delete { id, .. } => {
                f.debug_struct("Delete").field("id", id).finish()
            }
            ResourceRequest::Transaction { .. } => f.write_str("Transaction"),
        }
    }
}

// =============================================================================
// 4. THE GENERIC ACTOR SERVER
// =============================================================================

pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: Store<T>,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: Store::new(next_id_fn),
        };
        (actor, ResourceClient::new(sender))
    }

    /// Serves requests until every client has been dropped.
    #[instrument(name = "resource_actor", skip(self))]
    pub async fn run(mut self) {
        info!("ResourceActor starting");

        while let Some(msg) = self.receiver.recv().await {
            debug!(request = ?msg, "Processing request");
            match msg {
                ResourceRequest::List { respond_to } => {
                    let _ = respond_to.send(Ok(self.store.list()));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let _ = respond_to.send(Ok(self.store.get(&id).cloned()));
                }
                ResourceRequest::Create { params, respond_to } => {
                    let _ = respond_to.send(self.store.create(params));
                }
                ResourceRequest::Update { id, update, respond_to } => {
                    let _ = respond_to.send(self.store.update(&id, update));
                }
                ResourceRequest::Delete { id, respond_to } => {
                    let _ = respond_to.send(self.store.delete(&id));
                }
                ResourceRequest::Transaction { work } => {
                    work(&mut self.store);
                }
            }
        }

        info!(item_count = self.store.len(), "ResourceActor stopped");
    }
}

// =============================================================================
// 5. THE GENERIC CLIENT
// =============================================================================

pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

// Manual impl: a derive would require `T: Clone` bounds on the request type.
impl<T: Entity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: Entity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn list(&self) -> Result<Vec<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::List { respond_to }).await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to }).await
    }

    pub async fn create(&self, params: T::CreateParams) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Create { params, respond_to })
            .await
    }

    pub async fn update(&self, id: T::Id, update: T::Update) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Update {
            id,
            update,
            respond_to,
        })
        .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to })
            .await
    }

    /// Runs `work` inside the actor with exclusive access to the store.
    ///
    /// No other request is processed until `work` returns, whether with `Ok`
    /// or `Err`. The closure must not await; it sees the store synchronously.
    ///
    /// A panic inside `work` is not contained: it takes the actor task down,
    /// the caller gets [`FrameworkError::ActorDropped`] and every later
    /// request fails with [`FrameworkError::ActorClosed`].
    pub async fn transaction<R, E, F>(&self, work: F) -> Result<R, E>
    where
        F: FnOnce(&mut Store<T>) -> Result<R, E> + Send + 'static,
        R: Send + 'static,
        E: From<FrameworkError> + Send + 'static,
    {
        let (respond_to, response) = oneshot::channel();
        let work: Transaction<T> = Box::new(move |store| {
            let _ = respond_to.send(work(store));
        });
        self.sender
            .send(ResourceRequest::Transaction { work })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }
}

// =============================================================================
// 6. TESTS
// =============================================================================
