use thiserror::Error;

use crate::actor_framework::FrameworkError;
use crate::domain::ProductId;

/// Errors that can occur during catalog operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(ProductId),
    #[error("Product validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

/// Request content the catalog refuses. Always raised before any mutation.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    #[error("invalid field: {0}")]
    InvalidField(String),
    #[error("bundle requires at least one source product")]
    EmptyBundle,
    #[error("one or more source products not found: {}", .missing.join(", "))]
    SourcesNotFound { missing: Vec<ProductId> },
    #[error("cycle detected in bundle composition: {}", .path.join(" -> "))]
    CycleDetected { path: Vec<ProductId> },
}

impl From<FrameworkError> for ProductError {
    fn from(err: FrameworkError) -> Self {
        match err {
            FrameworkError::NotFound(id) => ProductError::NotFound(id),
            FrameworkError::Validation(msg) => ValidationError::InvalidField(msg).into(),
            other => ProductError::ActorCommunicationError(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failure() {
        let missing = ProductError::from(ValidationError::SourcesNotFound {
            missing: vec!["product_9".into()],
        });
        assert_eq!(
            missing.to_string(),
            "Product validation error: one or more source products not found: product_9"
        );

        let cycle = ValidationError::CycleDetected {
            path: vec!["product_1".into(), "product_2".into(), "product_1".into()],
        };
        assert_eq!(
            cycle.to_string(),
            "cycle detected in bundle composition: product_1 -> product_2 -> product_1"
        );
    }

    #[test]
    fn framework_errors_map_to_catalog_errors() {
        assert_eq!(
            ProductError::from(FrameworkError::NotFound("product_4".into())),
            ProductError::NotFound("product_4".into())
        );
        assert!(matches!(
            ProductError::from(FrameworkError::Validation("bad price".into())),
            ProductError::Validation(ValidationError::InvalidField(_))
        ));
        assert_eq!(
            ProductError::from(FrameworkError::ActorClosed),
            ProductError::ActorCommunicationError("Actor closed".into())
        );
    }
}
