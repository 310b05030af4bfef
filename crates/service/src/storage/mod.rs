//! Storage helpers shared by file-backed stores.

pub mod json_map_store;
