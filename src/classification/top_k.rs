//! Top-k class selection for multiclass scores

use ndarray::{Array1, ArrayView1};

/// Index of the highest score; the first maximum wins on ties
pub fn argmax(scores: ArrayView1<'_, f64>) -> usize {
    let mut best = 0;
    for (idx, &score) in scores.iter().enumerate().skip(1) {
        if score > scores[best] {
            best = idx;
        }
    }
    best
}

/// Indices of the `k` highest scores in descending score order.
///
/// Ties resolve to the lower class index. `k` larger than the number of
/// classes selects every class.
pub fn top_k_indices(scores: ArrayView1<'_, f64>, k: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]).then(a.cmp(&b)));
    order.truncate(k);
    order
}

/// Indicator of the `k` highest-scored classes
pub fn top_k_hits(scores: ArrayView1<'_, f64>, k: usize) -> Array1<bool> {
    let mut hits = Array1::from_elem(scores.len(), false);
    for idx in top_k_indices(scores, k) {
        hits[idx] = true;
    }
    hits
}

/// Whether `target` is among the `k` highest-scored classes
pub fn in_top_k(scores: ArrayView1<'_, f64>, target: usize, k: usize) -> bool {
    top_k_indices(scores, k).contains(&target)
}
