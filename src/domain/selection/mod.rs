//! Selection module - shortlisting, prompting, and outcomes.
//!
//! - `similarity` - Cosine similarity and stable top-K ranking
//! - `ranker` - Embedding-backed shortlist generation
//! - `prompt` - Task wording shared by all selection backends
//! - `values` - Request/response value objects
//! - `errors` - The failure kinds a caller can observe

mod errors;
mod prompt;
mod ranker;
mod similarity;
mod values;

pub use errors::SelectionError;
pub use prompt::{
    render_candidates, render_explanation_prompt, render_selection_prompt,
    EXPLANATION_SYSTEM_PROMPT, SELECTION_SYSTEM_PROMPT,
};
pub use ranker::SimilarityRanker;
pub use similarity::{cosine_similarity, top_k_indices};
pub use values::{SelectionRequest, SelectionResponse};
