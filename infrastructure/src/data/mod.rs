//! Data source adapters

mod json_store;
mod memory;

pub use json_store::JsonDocumentStore;
pub use memory::InMemoryDataSource;
