//! Similarity ranker - narrows a catalog to a short candidate list.
//!
//! When the catalog already fits in `top_k` it is returned untouched, in
//! its original order. Otherwise every description and the prompt are
//! embedded with the same engine and the `top_k` most similar tools are
//! returned, best first.

use std::sync::Arc;

use tracing::debug;

use crate::domain::catalog::Tool;
use crate::ports::{EmbeddingEngine, EmbeddingError};

use super::similarity::top_k_indices;

/// Embedding-based shortlist generator.
#[derive(Clone)]
pub struct SimilarityRanker {
    engine: Arc<dyn EmbeddingEngine>,
}

impl SimilarityRanker {
    pub fn new(engine: Arc<dyn EmbeddingEngine>) -> Self {
        Self { engine }
    }

    /// Name of the embedding engine in use.
    pub fn engine_name(&self) -> &str {
        self.engine.name()
    }

    /// Returns at most `top_k` tools ranked by similarity to `prompt`.
    pub async fn shortlist(
        &self,
        prompt: &str,
        tools: Vec<Tool>,
        top_k: usize,
    ) -> Result<Vec<Tool>, EmbeddingError> {
        if tools.len() <= top_k {
            return Ok(tools);
        }

        let descriptions: Vec<&str> = tools.iter().map(Tool::embedding_text).collect();
        let tool_vectors = self.engine.embed_batch(&descriptions).await?;
        if tool_vectors.len() != tools.len() {
            return Err(EmbeddingError::Inference(format!(
                "expected {} embeddings, got {}",
                tools.len(),
                tool_vectors.len()
            )));
        }

        let prompt_vector = self.engine.embed(prompt).await?;
        if let Some(bad) = tool_vectors.iter().find(|v| v.len() != prompt_vector.len()) {
            return Err(EmbeddingError::DimensionMismatch {
                expected: prompt_vector.len(),
                got: bad.len(),
            });
        }

        let ranked = top_k_indices(&prompt_vector, &tool_vectors, top_k);
        debug!(
            engine = self.engine.name(),
            catalog_size = tools.len(),
            top_k,
            "ranked tools by description similarity"
        );

        let mut slots: Vec<Option<Tool>> = tools.into_iter().map(Some).collect();
        Ok(ranked
            .into_iter()
            .filter_map(|i| slots.get_mut(i).and_then(Option::take))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Engine returning fixed vectors per text; unknown text maps to `fallback`.
    struct FixedEngine {
        vectors: HashMap<String, Vec<f32>>,
        fallback: Vec<f32>,
        calls: AtomicUsize,
    }

    impl FixedEngine {
        fn new(pairs: &[(&str, Vec<f32>)], fallback: Vec<f32>) -> Self {
            Self {
                vectors: pairs
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.clone()))
                    .collect(),
                fallback,
                calls: AtomicUsize::new(0),
            }
        }

        fn lookup(&self, text: &str) -> Vec<f32> {
            self.vectors
                .get(text)
                .cloned()
                .unwrap_or_else(|| self.fallback.clone())
        }
    }

    #[async_trait]
    impl EmbeddingEngine for FixedEngine {
        fn name(&self) -> &str {
            "fixed"
        }

        fn dimensions(&self) -> usize {
            self.fallback.len()
        }

        async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.lookup(text))
        }

        async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(texts.iter().map(|t| self.lookup(t)).collect())
        }
    }

    fn tools(n: usize) -> Vec<Tool> {
        (0..n)
            .map(|i| {
                Tool::new(i as i64 + 1, format!("tool-{}", i + 1), "1.0.0")
                    .with_description(format!("desc-{}", i + 1))
            })
            .collect()
    }

    #[tokio::test]
    async fn small_catalog_passes_through_without_embedding() {
        let engine = Arc::new(FixedEngine::new(&[], vec![1.0, 0.0]));
        let ranker = SimilarityRanker::new(engine.clone());

        let input = tools(3);
        let result = ranker.shortlist("anything", input.clone(), 5).await.unwrap();

        assert_eq!(result, input);
        assert_eq!(engine.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn catalog_equal_to_top_k_passes_through() {
        let engine = Arc::new(FixedEngine::new(&[], vec![1.0, 0.0]));
        let ranker = SimilarityRanker::new(engine);

        let input = tools(5);
        let result = ranker.shortlist("anything", input.clone(), 5).await.unwrap();
        assert_eq!(result, input);
    }

    #[tokio::test]
    async fn large_catalog_is_ranked_and_truncated() {
        let engine = Arc::new(FixedEngine::new(
            &[
                ("prompt", vec![1.0, 0.0]),
                ("desc-2", vec![0.9, 0.1]),
                ("desc-4", vec![1.0, 0.0]),
            ],
            vec![0.0, 1.0],
        ));
        let ranker = SimilarityRanker::new(engine);

        let result = ranker.shortlist("prompt", tools(6), 2).await.unwrap();
        let names: Vec<&str> = result.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["tool-4", "tool-2"]);
    }

    #[tokio::test]
    async fn dimension_mismatch_is_rejected() {
        let engine = Arc::new(FixedEngine::new(
            &[("prompt", vec![1.0, 0.0, 0.0])],
            vec![0.0, 1.0],
        ));
        let ranker = SimilarityRanker::new(engine);

        let result = ranker.shortlist("prompt", tools(4), 2).await;
        assert!(matches!(
            result,
            Err(EmbeddingError::DimensionMismatch { expected: 3, got: 2 })
        ));
    }

    #[tokio::test]
    async fn undescribed_tools_embed_empty_text() {
        let engine = Arc::new(FixedEngine::new(
            &[("prompt", vec![1.0, 0.0]), ("", vec![1.0, 0.0])],
            vec![0.0, 1.0],
        ));
        let ranker = SimilarityRanker::new(engine);

        let mut catalog = tools(3);
        catalog.push(Tool::new(99, "bare", "1.0.0"));

        let result = ranker.shortlist("prompt", catalog, 1).await.unwrap();
        assert_eq!(result[0].name, "bare");
    }
}
