//! Durable `ProductStore` backends.

pub mod file;
pub mod seaorm;
