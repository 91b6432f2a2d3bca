//! SelectToolHandler - picks one catalog tool for a prompt and explains it.
//!
//! Steps run strictly in order; the first failure aborts the request:
//!
//! 1. Validate the prompt
//! 2. Fetch the catalog (`NoToolsAvailable` when empty)
//! 3. Shortlist by embedding similarity
//! 4. Ask the backend for a tool name
//! 5. Resolve the name exactly against the catalog
//! 6. Ask the backend for an explanation

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::selection::{
    SelectionError, SelectionRequest, SelectionResponse, SimilarityRanker,
};
use crate::ports::{SelectionBackend, ToolCatalog};

/// Shortlist size used when none is configured.
pub const DEFAULT_TOP_K: usize = 5;

/// Command to select a tool for a user prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectToolCommand {
    pub user_prompt: String,
}

impl SelectToolCommand {
    pub fn new(user_prompt: impl Into<String>) -> Self {
        Self {
            user_prompt: user_prompt.into(),
        }
    }
}

impl From<SelectionRequest> for SelectToolCommand {
    fn from(request: SelectionRequest) -> Self {
        Self {
            user_prompt: request.user_prompt,
        }
    }
}

/// Handler for tool selection. Shared by all in-flight requests.
#[derive(Clone)]
pub struct SelectToolHandler {
    catalog: Arc<dyn ToolCatalog>,
    ranker: SimilarityRanker,
    backend: Arc<dyn SelectionBackend>,
    top_k: usize,
}

impl SelectToolHandler {
    pub fn new(
        catalog: Arc<dyn ToolCatalog>,
        ranker: SimilarityRanker,
        backend: Arc<dyn SelectionBackend>,
    ) -> Self {
        Self {
            catalog,
            ranker,
            backend,
            top_k: DEFAULT_TOP_K,
        }
    }

    /// Sets the shortlist size; values below 1 are raised to 1.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k.max(1);
        self
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    pub fn backend_name(&self) -> &str {
        self.backend.backend_name()
    }

    pub async fn handle(
        &self,
        cmd: SelectToolCommand,
    ) -> Result<SelectionResponse, SelectionError> {
        let result = self.run(&cmd.user_prompt).await;
        if let Err(err) = &result {
            warn!(
                code = %err.code(),
                backend = self.backend.backend_name(),
                error = %err,
                "tool selection aborted"
            );
        }
        result
    }

    async fn run(&self, user_prompt: &str) -> Result<SelectionResponse, SelectionError> {
        SelectionRequest::new(user_prompt).validate()?;

        let tools = self.catalog.list_all().await?;
        if tools.is_empty() {
            return Err(SelectionError::NoToolsAvailable);
        }
        debug!(catalog_size = tools.len(), "fetched tool catalog");

        let shortlist = self.ranker.shortlist(user_prompt, tools, self.top_k).await?;
        debug!(
            shortlist_size = shortlist.len(),
            top_k = self.top_k,
            engine = self.ranker.engine_name(),
            "built candidate shortlist"
        );

        let raw_name = self.backend.select_best_tool(user_prompt, &shortlist).await?;
        debug!(raw_name = %raw_name, backend = self.backend.backend_name(), "backend chose tool");

        let tool = self
            .catalog
            .find_by_name(&raw_name)
            .await
            .map_err(SelectionError::from_resolution)?;

        let message = self
            .backend
            .generate_selection_message(user_prompt, &tool)
            .await?;

        info!(tool_id = %tool.id, tool = %tool.name, "tool selected");

        Ok(SelectionResponse {
            tool_id: tool.id,
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockCall, MockSelectionBackend};
    use crate::adapters::embedding::HashingEmbedding;
    use crate::adapters::memory::InMemoryToolCatalog;
    use crate::domain::catalog::Tool;
    use crate::domain::foundation::{ErrorCode, ToolId};
    use crate::ports::{BackendError, EmbeddingEngine, EmbeddingError};
    use async_trait::async_trait;

    fn sample_tools() -> Vec<Tool> {
        vec![
            Tool::new(1, "calculator", "1.0.0")
                .with_description("Evaluates arithmetic expressions"),
            Tool::new(2, "translator", "1.0.0")
                .with_description("Translates text between languages"),
            Tool::new(3, "summarizer", "1.0.0").with_description("Summarizes long documents"),
        ]
    }

    fn handler(catalog: InMemoryToolCatalog, backend: MockSelectionBackend) -> SelectToolHandler {
        SelectToolHandler::new(
            Arc::new(catalog),
            SimilarityRanker::new(Arc::new(HashingEmbedding::new(64))),
            Arc::new(backend),
        )
    }

    struct FailingEngine;

    #[async_trait]
    impl EmbeddingEngine for FailingEngine {
        fn name(&self) -> &str {
            "failing"
        }

        fn dimensions(&self) -> usize {
            4
        }

        async fn embed(&self, _text: &str) -> Result<Vec<f32>, EmbeddingError> {
            Err(EmbeddingError::Inference("model crashed".into()))
        }

        async fn embed_batch(&self, _texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
            Err(EmbeddingError::Inference("model crashed".into()))
        }
    }

    #[tokio::test]
    async fn returns_resolved_tool_and_explanation() {
        let backend = MockSelectionBackend::new()
            .with_selection("translator")
            .with_message("The translator converts text to French.");
        let handler = handler(InMemoryToolCatalog::with_tools(sample_tools()), backend.clone());

        let response = handler
            .handle(SelectToolCommand::new("convert this sentence to French"))
            .await
            .unwrap();

        assert_eq!(response.tool_id, ToolId::new(2));
        assert_eq!(response.message, "The translator converts text to French.");
        assert_eq!(backend.call_count(), 2);
    }

    #[tokio::test]
    async fn explains_the_resolved_catalog_tool() {
        let backend = MockSelectionBackend::new().with_selection("summarizer");
        let handler = handler(InMemoryToolCatalog::with_tools(sample_tools()), backend.clone());

        handler.handle(SelectToolCommand::new("tl;dr please")).await.unwrap();

        assert_eq!(
            backend.calls().last(),
            Some(&MockCall::Explain {
                user_prompt: "tl;dr please".to_string(),
                tool: "summarizer".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn blank_prompt_is_rejected_before_any_call() {
        let backend = MockSelectionBackend::new();
        let catalog = InMemoryToolCatalog::with_tools(sample_tools());
        catalog.set_unavailable("should not be reached");
        let handler = handler(catalog, backend.clone());

        let result = handler.handle(SelectToolCommand::new("   ")).await;

        assert!(matches!(result, Err(SelectionError::InvalidInput(_))));
        assert_eq!(backend.call_count(), 0);
    }

    #[tokio::test]
    async fn empty_catalog_fails_with_no_tools_available() {
        let backend = MockSelectionBackend::new();
        let handler = handler(InMemoryToolCatalog::new(), backend.clone());

        let result = handler.handle(SelectToolCommand::new("anything")).await;

        assert_eq!(result, Err(SelectionError::NoToolsAvailable));
        assert_eq!(backend.call_count(), 0);
    }

    #[tokio::test]
    async fn unavailable_store_fails_with_store_unavailable() {
        let catalog = InMemoryToolCatalog::with_tools(sample_tools());
        catalog.set_unavailable("connection refused");
        let handler = handler(catalog, MockSelectionBackend::new());

        let err = handler.handle(SelectToolCommand::new("anything")).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::StoreUnavailable);
    }

    #[tokio::test]
    async fn unknown_name_fails_resolution_without_explaining() {
        let backend = MockSelectionBackend::new().with_selection("Calculator");
        let handler = handler(
            InMemoryToolCatalog::with_tools(vec![Tool::new(1, "calculator", "1.0.0")]),
            backend.clone(),
        );

        let result = handler.handle(SelectToolCommand::new("2+2")).await;

        assert_eq!(result, Err(SelectionError::resolution_failed("Calculator")));
        assert_eq!(backend.call_count(), 1);
    }

    #[tokio::test]
    async fn selection_failure_is_backend_error() {
        let backend = MockSelectionBackend::new()
            .with_selection_error(BackendError::unavailable("model server down"));
        let handler = handler(InMemoryToolCatalog::with_tools(sample_tools()), backend);

        let err = handler.handle(SelectToolCommand::new("2+2")).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::BackendError);
    }

    #[tokio::test]
    async fn explanation_failure_is_backend_error() {
        let backend = MockSelectionBackend::new()
            .with_selection("calculator")
            .with_message_error(BackendError::Timeout { timeout_secs: 30 });
        let handler = handler(InMemoryToolCatalog::with_tools(sample_tools()), backend);

        let err = handler.handle(SelectToolCommand::new("2+2")).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::BackendError);
    }

    #[tokio::test]
    async fn embedding_failure_is_backend_error() {
        let catalog = InMemoryToolCatalog::with_tools(sample_tools());
        let handler = SelectToolHandler::new(
            Arc::new(catalog),
            SimilarityRanker::new(Arc::new(FailingEngine)),
            Arc::new(MockSelectionBackend::new()),
        )
        .with_top_k(1);

        let err = handler.handle(SelectToolCommand::new("2+2")).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::BackendError);
        assert!(err.to_string().contains("embedding"));
    }

    #[tokio::test]
    async fn backend_sees_at_most_top_k_candidates() {
        let backend = MockSelectionBackend::new();
        let handler = handler(InMemoryToolCatalog::with_tools(sample_tools()), backend.clone())
            .with_top_k(2);

        handler.handle(SelectToolCommand::new("translate to German")).await.unwrap();

        match &backend.calls()[0] {
            MockCall::Select { candidates, .. } => assert_eq!(candidates.len(), 2),
            other => panic!("expected select call, got {:?}", other),
        }
    }

    #[test]
    fn top_k_has_a_floor_of_one() {
        let handler =
            handler(InMemoryToolCatalog::new(), MockSelectionBackend::new()).with_top_k(0);
        assert_eq!(handler.top_k(), 1);
    }
}
