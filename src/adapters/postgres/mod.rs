//! PostgreSQL adapters - Database implementations for catalog ports.
//!
//! - `PostgresToolCatalog` - Read access to the `tools` table

mod tool_catalog;

pub use tool_catalog::{create_pool, PostgresToolCatalog};
