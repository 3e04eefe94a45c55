use serde::{Deserialize, Serialize};

/// Identifier assigned by the product store, e.g. `product_7`.
pub type ProductId = String;

/// A catalog entry. A product whose `sources` is non-empty is a bundle.
///
/// # Actor Framework
/// Implements [`Entity`](crate::actor_framework::Entity) so the catalog can be
/// held by a [`ResourceActor`](crate::actor_framework::ResourceActor). See
/// `product_actor::entity` for the creation and update rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    /// Composition edges, in the order they were requested. Fixed at creation.
    #[serde(default)]
    pub sources: Vec<ProductId>,
}

impl Product {
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            sources: Vec::new(),
        }
    }

    pub fn with_sources(mut self, sources: Vec<ProductId>) -> Self {
        self.sources = sources;
        self
    }

    pub fn is_bundle(&self) -> bool {
        !self.sources.is_empty()
    }
}

/// Payload for creating a product. Bundles carry their source ids here.
#[derive(Debug, Clone)]
pub struct ProductCreate {
    pub name: String,
    pub price: f64,
    pub sources: Vec<ProductId>,
}

impl ProductCreate {
    pub fn plain(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
            sources: Vec::new(),
        }
    }
}

/// Full overwrite of the mutable fields. There is deliberately no way to
/// change `sources` after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: String,
    pub price: f64,
}

/// A freshly created bundle with its source products resolved and embedded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedBundle {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub sources: Vec<Product>,
}

impl ResolvedBundle {
    pub fn new(bundle: Product, sources: Vec<Product>) -> Self {
        Self {
            id: bundle.id,
            name: bundle.name,
            price: bundle.price,
            sources,
        }
    }

    pub fn source_ids(&self) -> Vec<ProductId> {
        self.sources.iter().map(|source| source.id.clone()).collect()
    }
}
