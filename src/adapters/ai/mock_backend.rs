//! Mock selection backend for testing.
//!
//! Returns queued answers in order and records every call, so tests can
//! drive the orchestrator without a model server.
//!
//! # Example
//!
//! ```ignore
//! let backend = MockSelectionBackend::new()
//!     .with_selection("translator")
//!     .with_message("The translator handles French.");
//!
//! let name = backend.select_best_tool("to French", &tools).await?;
//! assert_eq!(name, "translator");
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::catalog::Tool;
use crate::ports::{ensure_candidates, BackendError, SelectionBackend};

/// A recorded backend call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    Select {
        user_prompt: String,
        candidates: Vec<String>,
    },
    Explain {
        user_prompt: String,
        tool: String,
    },
}

type Queue = Arc<Mutex<VecDeque<Result<String, BackendError>>>>;

/// Mock backend with queued answers.
///
/// When a queue is exhausted, selection falls back to the first candidate's
/// name and explanation to a canned sentence naming the tool.
#[derive(Debug, Clone, Default)]
pub struct MockSelectionBackend {
    selections: Queue,
    messages: Queue,
    calls: Arc<Mutex<Vec<MockCall>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockSelectionBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a raw tool name for the next `select_best_tool` call.
    pub fn with_selection(self, name: impl Into<String>) -> Self {
        lock(&self.selections).push_back(Ok(name.into()));
        self
    }

    /// Queues a failure for the next `select_best_tool` call.
    pub fn with_selection_error(self, error: BackendError) -> Self {
        lock(&self.selections).push_back(Err(error));
        self
    }

    /// Queues an explanation for the next `generate_selection_message` call.
    pub fn with_message(self, message: impl Into<String>) -> Self {
        lock(&self.messages).push_back(Ok(message.into()));
        self
    }

    /// Queues a failure for the next `generate_selection_message` call.
    pub fn with_message_error(self, error: BackendError) -> Self {
        lock(&self.messages).push_back(Err(error));
        self
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    pub fn calls(&self) -> Vec<MockCall> {
        lock(&self.calls).clone()
    }

    pub fn clear_calls(&self) {
        lock(&self.calls).clear();
    }
}

#[async_trait]
impl SelectionBackend for MockSelectionBackend {
    async fn select_best_tool(
        &self,
        user_prompt: &str,
        candidates: &[Tool],
    ) -> Result<String, BackendError> {
        lock(&self.calls).push(MockCall::Select {
            user_prompt: user_prompt.to_string(),
            candidates: candidates.iter().map(|t| t.name.clone()).collect(),
        });
        ensure_candidates(candidates)?;

        match lock(&self.selections).pop_front() {
            Some(answer) => answer,
            None => Ok(candidates[0].name.clone()),
        }
    }

    async fn generate_selection_message(
        &self,
        user_prompt: &str,
        tool: &Tool,
    ) -> Result<String, BackendError> {
        lock(&self.calls).push(MockCall::Explain {
            user_prompt: user_prompt.to_string(),
            tool: tool.name.clone(),
        });

        match lock(&self.messages).pop_front() {
            Some(answer) => answer,
            None => Ok(format!("The {} tool fits your request.", tool.name)),
        }
    }

    fn backend_name(&self) -> &str {
        "mock"
    }
}
