//! Product-specific domain logic: entity rules, errors, and the composition graph.

pub mod composition;
pub mod entity;
pub mod error;

pub use composition::*;
pub use error::*;
