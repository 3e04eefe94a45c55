use tracing::{debug, error, info, instrument};

use crate::actor_framework::{FrameworkError, ResourceClient, Store};
use crate::domain::{Product, ProductCreate, ProductId, ProductUpdate, ResolvedBundle};
use crate::product_actor::{CompositionGraph, ProductError, ValidationError};

/// Handle on the store actor holding the catalog.
pub type ProductStore = ResourceClient<Product>;

/// Catalog operations on top of the product store.
///
/// Plain CRUD maps onto single store requests. Bundle creation is the one
/// multi-step workflow: it resolves the requested sources, checks the
/// composition graph for cycles and persists the bundle inside a single store
/// transaction, so no concurrent request can slip in between the check and
/// the write.
#[derive(Clone)]
pub struct ProductService {
    inner: ProductStore,
}

impl_basic_client!(ProductService, Product, ProductError, product);

impl ProductService {
    #[instrument(skip(self, name), fields(name = %name.as_ref()))]
    pub async fn create_product(
        &self,
        name: impl AsRef<str> + Into<String>,
        price: f64,
    ) -> Result<Product, ProductError> {
        debug!("Sending request");
        let product = self
            .inner
            .create(ProductCreate::plain(name, price))
            .await
            .map_err(ProductError::from)?;
        info!(product_id = %product.id, "Product created");
        Ok(product)
    }

    /// Overwrites name and price. The product's sources are left as they were.
    #[instrument(skip(self, name), fields(name = %name.as_ref()))]
    pub async fn update_product(
        &self,
        id: ProductId,
        name: impl AsRef<str> + Into<String>,
        price: f64,
    ) -> Result<Product, ProductError> {
        debug!("Sending request");
        let update = ProductUpdate {
            name: name.into(),
            price,
        };
        let product = self.inner.update(id, update).await.map_err(ProductError::from)?;
        info!("Product updated");
        Ok(product)
    }

    /// Removes a product. Deleting an id that does not exist succeeds without
    /// doing anything. Bundles referencing the deleted product keep the id in
    /// their sources; the composition graph skips it from then on.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: ProductId) -> Result<(), ProductError> {
        debug!("Sending request");
        match self.inner.delete(id).await {
            Ok(()) => {
                info!("Product deleted");
                Ok(())
            }
            Err(FrameworkError::NotFound(_)) => {
                debug!("Product already absent, nothing to delete");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Copies name and price into a new plain product. Sources are not
    /// copied: the duplicate of a bundle is never a bundle.
    #[instrument(skip(self))]
    pub async fn duplicate_product(&self, id: ProductId) -> Result<Product, ProductError> {
        info!("Processing duplicate_product request");

        let original = self.get_product(id).await?;
        let copy = self
            .inner
            .create(ProductCreate::plain(original.name, original.price))
            .await
            .map_err(ProductError::from)?;

        info!(copy_id = %copy.id, "Product duplicated");
        Ok(copy)
    }

    /// **Orchestration Handler** - Creates a bundle from existing products.
    ///
    /// Runs as one store transaction:
    /// 1. **Resolve sources** - every requested id must exist
    /// 2. **Check composition** - the new edges must not close a cycle
    /// 3. **Persist** - store the bundle with the source ids in request order
    ///
    /// Returns the bundle with its source products embedded. A failed step
    /// leaves the store untouched.
    #[instrument(
        fields(name = %name.as_ref(), price = %price, source_count = source_ids.len()),
        skip(self, name, price, source_ids)
    )]
    pub async fn create_bundle(
        &self,
        name: impl AsRef<str> + Into<String>,
        price: f64,
        source_ids: Vec<ProductId>,
    ) -> Result<ResolvedBundle, ProductError> {
        info!("Processing create_bundle request");

        if source_ids.is_empty() {
            error!("Bundle has no sources");
            return Err(ValidationError::EmptyBundle.into());
        }

        let name = name.into();
        let result = self
            .inner
            .transaction(move |store| assemble_bundle(store, name, price, source_ids))
            .await;

        match &result {
            Ok(bundle) => info!(
                bundle_id = %bundle.id,
                sources = ?bundle.source_ids(),
                "Bundle created successfully"
            ),
            Err(e) => error!(error = %e, "Bundle creation failed"),
        }
        result
    }
}

fn assemble_bundle(
    store: &mut Store<Product>,
    name: String,
    price: f64,
    source_ids: Vec<ProductId>,
) -> Result<ResolvedBundle, ProductError> {
    // Step 1: Resolve sources
    let sources = store.get_many(&source_ids);
    if sources.len() != source_ids.len() {
        let missing = source_ids
            .iter()
            .filter(|id| store.get(id).is_none())
            .cloned()
            .collect();
        return Err(ValidationError::SourcesNotFound { missing }.into());
    }

    // Step 2: Check composition
    let graph = CompositionGraph::new(&*store);
    if graph.has_cycle(&sources) {
        let path = graph.find_cycle(&sources).unwrap_or_default();
        return Err(ValidationError::CycleDetected { path }.into());
    }

    // Step 3: Persist
    let bundle = store.create(ProductCreate {
        name,
        price,
        sources: source_ids,
    })?;

    Ok(ResolvedBundle::new(bundle, sources))
}
