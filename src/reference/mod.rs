//! Reference computations
//!
//! Independent re-computation of the expected scores, following the
//! semantics of scikit-learn's `precision_score`, `recall_score` and
//! `fbeta_score`. The library path in [`crate::classification`] is checked
//! against these functions; they share only the reshaping helpers.
//!
//! Every entry point takes `(preds, target, scorer, ignore_index,
//! multidim_average, average)` plus whatever the task needs (threshold,
//! number of classes or labels) and returns the expected [`MetricOutput`].
//!
//! [`MetricOutput`]: crate::classification::MetricOutput

mod binary;
mod confusion;
mod filter;
mod multiclass;
mod multilabel;
mod scorer;

#[cfg(test)]
mod tests;

pub use binary::reference_binary;
pub use confusion::ConfusionMatrix;
pub use filter::remove_ignore_index;
pub use multiclass::reference_multiclass;
pub use multilabel::reference_multilabel;
pub use scorer::ReferenceScore;

use crate::classification::Preds;
use ndarray::ArrayD;

fn expit(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Hard 0/1 predictions: logits go through the logistic function first
pub(crate) fn threshold_preds(preds: &Preds, threshold: f64) -> ArrayD<i64> {
    match preds {
        Preds::Labels(labels) => labels.clone(),
        Preds::Scores(scores) => {
            let in_open_unit = scores.iter().all(|&p| p > 0.0 && p < 1.0);
            scores.mapv(|p| {
                let p = if in_open_unit { p } else { expit(p) };
                i64::from(p >= threshold)
            })
        }
    }
}
