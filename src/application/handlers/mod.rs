//! Application handlers.
//!
//! Command handlers that orchestrate domain operations over ports.

pub mod selection;

pub use selection::{SelectToolCommand, SelectToolHandler, DEFAULT_TOP_K};
