//! Catalog module - registered tools.

mod tool;

pub use tool::{Tool, NO_DESCRIPTION};
