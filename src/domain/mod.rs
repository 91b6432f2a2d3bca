//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors)
//! - `catalog` - Registered tool entity
//! - `selection` - Similarity ranking, prompt rendering, and selection outcomes

pub mod catalog;
pub mod foundation;
pub mod selection;
