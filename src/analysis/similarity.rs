use crate::domain::ChangePoint;

/// Euclidean distance between two percent-change sequences. Unequal lengths
/// are truncated to the shorter one before comparing; two empty inputs are
/// distance 0.
pub fn euclidean_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

/// Map a distance to a similarity percentage: 100 at distance 0, falling
/// toward 0 as distance grows. A ranking score, not a probability.
pub fn similarity_pct(distance: f64) -> f64 {
    100.0 / (1.0 + distance)
}

/// Similarity of two change windows by their percent values.
pub fn window_similarity(a: &[ChangePoint], b: &[ChangePoint]) -> f64 {
    let a_pcts: Vec<f64> = a.iter().map(|c| c.pct).collect();
    let b_pcts: Vec<f64> = b.iter().map(|c| c.pct).collect();
    similarity_pct(euclidean_distance(&a_pcts, &b_pcts))
}
