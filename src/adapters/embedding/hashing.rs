//! Deterministic lexical embedding engine.
//!
//! Feature hashing over lower-cased alphanumeric tokens: each token is
//! hashed with FNV-1a into one signed bucket, and the result is
//! L2-normalized. Texts sharing words end up with positive cosine
//! similarity, so ranking is meaningful without a model server.

use async_trait::async_trait;

use crate::ports::{EmbeddingEngine, EmbeddingError};

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0100_0000_01b3;

/// Hash-based bag-of-words embedding.
#[derive(Debug, Clone)]
pub struct HashingEmbedding {
    dimensions: usize,
}

impl HashingEmbedding {
    /// Creates an engine producing vectors of `dimensions` length (at least 1).
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
        }
    }

    fn hash_token(token: &str) -> u64 {
        let mut hash = FNV_OFFSET;
        for byte in token.bytes() {
            hash ^= u64::from(byte);
            hash = hash.wrapping_mul(FNV_PRIME);
        }
        hash
    }

    fn generate_vector(&self, text: &str) -> Vec<f32> {
        let mut vec = vec![0.0_f32; self.dimensions];

        for token in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            let hash = Self::hash_token(&token.to_lowercase());
            #[allow(clippy::cast_possible_truncation)] // modulo keeps it below dimensions
            let bucket = (hash % self.dimensions as u64) as usize;
            let sign = if hash >> 63 == 0 { 1.0 } else { -1.0 };
            vec[bucket] += sign;
        }

        let magnitude: f32 = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
        if magnitude > 0.0 {
            for x in &mut vec {
                *x /= magnitude;
            }
        }
        vec
    }
}

#[async_trait]
impl EmbeddingEngine for HashingEmbedding {
    fn name(&self) -> &str {
        "hashing"
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        Ok(self.generate_vector(text))
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        Ok(texts.iter().map(|t| self.generate_vector(t)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::selection::cosine_similarity;

    #[tokio::test]
    async fn embed_returns_configured_dimensions() {
        let engine = HashingEmbedding::new(16);
        assert_eq!(engine.embed("hello world").await.unwrap().len(), 16);
    }

    #[tokio::test]
    async fn same_input_produces_same_output() {
        let engine = HashingEmbedding::new(32);
        assert_eq!(
            engine.embed("translate text").await.unwrap(),
            engine.embed("translate text").await.unwrap()
        );
    }

    #[tokio::test]
    async fn tokenization_ignores_case_and_punctuation() {
        let engine = HashingEmbedding::new(32);
        assert_eq!(
            engine.embed("Translate, TEXT!").await.unwrap(),
            engine.embed("translate text").await.unwrap()
        );
    }

    #[tokio::test]
    async fn empty_text_is_the_zero_vector() {
        let engine = HashingEmbedding::new(8);
        let vec = engine.embed("").await.unwrap();
        assert!(vec.iter().all(|x| *x == 0.0));
    }

    #[tokio::test]
    async fn non_empty_output_has_unit_length() {
        let engine = HashingEmbedding::new(64);
        let vec = engine.embed("summarize this long report").await.unwrap();
        let magnitude: f32 = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((magnitude - 1.0).abs() < 1e-5, "expected unit length, got {magnitude}");
    }

    #[tokio::test]
    async fn shared_words_score_higher_than_disjoint_words() {
        let engine = HashingEmbedding::new(256);
        let prompt = engine.embed("translate this sentence to french").await.unwrap();
        let related = engine.embed("translate text to french or german").await.unwrap();
        let unrelated = engine.embed("evaluate arithmetic expressions").await.unwrap();

        assert!(cosine_similarity(&prompt, &related) > cosine_similarity(&prompt, &unrelated));
    }

    #[tokio::test]
    async fn embed_batch_preserves_order() {
        let engine = HashingEmbedding::new(16);
        let batch = engine.embed_batch(&["alpha", "beta"]).await.unwrap();
        assert_eq!(batch[0], engine.embed("alpha").await.unwrap());
        assert_eq!(batch[1], engine.embed("beta").await.unwrap());
    }

    #[test]
    fn zero_dimensions_are_raised_to_one() {
        assert_eq!(HashingEmbedding::new(0).dimensions(), 1);
    }
}
