//! Typed clients over the resource actors.

#[macro_use]
mod macros;
pub mod product_service;

pub use product_service::*;
