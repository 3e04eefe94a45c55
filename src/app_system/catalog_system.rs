use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{error, info, instrument};

use crate::actor_framework::ResourceActor;
use crate::clients::ProductService;
use crate::domain::{Product, ProductId};

use super::CatalogConfig;

/// The catalog as a running system: the product store actor plus the service
/// wired to it.
///
/// Responsible for starting the actor, handing out the service, and waiting
/// for the actor to finish on shutdown.
pub struct CatalogSystem {
    pub product_service: ProductService,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl Default for CatalogSystem {
    fn default() -> Self {
        Self::new(CatalogConfig::default())
    }
}

impl CatalogSystem {
    /// Starts the store actor. Must be called from within a tokio runtime.
    #[instrument(name = "catalog_system", skip(config), fields(buffer_size = config.buffer_size))]
    pub fn new(config: CatalogConfig) -> Self {
        info!("Starting catalog system");

        let (product_actor, product_store) =
            ResourceActor::<Product>::new(config.buffer_size, id_generator(config.id_prefix));
        let handle = tokio::spawn(product_actor.run());

        info!("Catalog system started successfully");

        Self {
            product_service: ProductService::new(product_store),
            handles: vec![handle],
        }
    }

    /// Drops this system's service handle and waits for the store actor.
    ///
    /// The actor stops once every clone of the service is gone, so callers
    /// must drop the clones they handed out before awaiting this.
    #[instrument(skip(self))]
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down catalog system");
        drop(self.product_service);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = ?e, "Actor task failed");
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("Catalog system shutdown complete");
        Ok(())
    }
}

/// Ids are `<prefix>_<n>` with `n` counting up from 1 and never reused.
fn id_generator(prefix: String) -> impl Fn() -> ProductId + Send + Sync + 'static {
    let counter = AtomicU64::new(1);
    move || format!("{}_{}", prefix, counter.fetch_add(1, Ordering::SeqCst))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_prefixed_and_sequential() {
        let next = id_generator("sku".into());
        assert_eq!(next(), "sku_1");
        assert_eq!(next(), "sku_2");
    }

    #[tokio::test]
    async fn starts_with_configured_prefix_and_shuts_down() {
        let system = CatalogSystem::new(CatalogConfig {
            buffer_size: 4,
            id_prefix: "item".into(),
        });

        let product = system.product_service.create_product("Widget", 10.0).await.unwrap();
        assert_eq!(product.id, "item_1");

        system.shutdown().await.unwrap();
    }
}
