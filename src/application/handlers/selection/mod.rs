//! Selection handlers.

mod select_tool;

pub use select_tool::{SelectToolCommand, SelectToolHandler, DEFAULT_TOP_K};
