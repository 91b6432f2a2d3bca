//! In-memory adapters.

mod in_memory_catalog;

pub use in_memory_catalog::InMemoryToolCatalog;
