//! Selection Backend Adapters.
//!
//! Implementations of the SelectionBackend port.
//!
//! ## Available Adapters
//!
//! - `HostedSelectionBackend` - OpenAI chat completions
//! - `LocalSelectionBackend` - Self-hosted fine-tuned Llama-3 behind a generation server
//! - `MockSelectionBackend` - Queued answers for testing

mod chat_template;
mod local_backend;
mod mock_backend;
mod openai_backend;

pub use local_backend::{LocalBackendConfig, LocalSelectionBackend, ModelHandle};
pub use mock_backend::{MockCall, MockSelectionBackend};
pub use openai_backend::{HostedConfig, HostedSelectionBackend};
