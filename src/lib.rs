//! Tool Selector - picks the best registered tool for a free-text request.
//!
//! A prompt is narrowed against the tool catalog by embedding similarity,
//! a language model chooses one candidate by name, the name is resolved
//! back to a catalog entry, and the model explains the choice.

pub mod adapters;
pub mod application;
pub mod bootstrap;
pub mod config;
pub mod domain;
pub mod ports;
