//! Cosine similarity and stable top-K ranking.
//!
//! Pure functions over vectors; no I/O.

/// Cosine similarity of two equal-length vectors.
///
/// Returns 0 when either vector has zero norm or the result is not finite
/// (NaN or infinite components). Otherwise the result is clamped to `[-1, 1]`.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let mut dot = 0.0_f64;
    let mut norm_a = 0.0_f64;
    let mut norm_b = 0.0_f64;

    for (x, y) in a.iter().zip(b.iter()) {
        let (x, y) = (f64::from(*x), f64::from(*y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    let sim = dot / (norm_a.sqrt() * norm_b.sqrt());
    if !sim.is_finite() {
        return 0.0;
    }
    sim.clamp(-1.0, 1.0) as f32
}

/// Indices of the `k` candidates most similar to `query`, best first.
///
/// Ties keep the original candidate order.
pub fn top_k_indices(query: &[f32], candidates: &[Vec<f32>], k: usize) -> Vec<usize> {
    let mut scored: Vec<(usize, f32)> = candidates
        .iter()
        .enumerate()
        .map(|(i, c)| (i, cosine_similarity(query, c)))
        .collect();

    // sort_by is stable, so equal scores stay in catalog order
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));

    scored.into_iter().take(k).map(|(i, _)| i).collect()
}
