use crate::analysis::similarity::window_similarity;
use crate::domain::{ChangePoint, SimilarityMatch};

/// Score every historical window against the query window and keep the `top`
/// best, descending by similarity. The sort is stable, so equal scores keep
/// their original window order (earliest offset first).
///
/// An empty query window would score 100% against everything; that comparison
/// carries no signal, so it yields no matches instead.
pub fn rank_windows(
    query: &[ChangePoint],
    windows: &[&[ChangePoint]],
    top: usize,
) -> Vec<SimilarityMatch> {
    if query.is_empty() {
        return Vec::new();
    }

    let mut matches: Vec<SimilarityMatch> = windows
        .iter()
        .enumerate()
        .map(|(offset, window)| SimilarityMatch {
            offset,
            similarity_pct: window_similarity(query, window),
        })
        .collect();

    matches.sort_by(|a, b| {
        b.similarity_pct
            .partial_cmp(&a.similarity_pct)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    matches.truncate(top);
    matches
}
