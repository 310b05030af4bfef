//! Product module: domain types, the store contract with its backends, and
//! the orchestrating service.

pub mod domain;
pub mod store;
pub mod repo;
pub mod service;

pub use domain::{Product, ProductDraft, ProductInput};
pub use service::{ProductService, ProductServiceConfig};
pub use store::{InMemoryProductStore, ProductStore};
