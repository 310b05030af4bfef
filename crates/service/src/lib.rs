//! Service layer for product records.
//! - `validation`: field rules, run before anything reaches storage.
//! - `product`: domain types, the `ProductStore` contract with in-memory,
//!   JSON-file and SeaORM backends, and the orchestrating `ProductService`.
//! - `storage`: reusable file-backed map used by the JSON backend.

pub mod errors;
pub mod validation;
pub mod product;
pub mod storage;
#[cfg(test)]
pub mod test_support;
