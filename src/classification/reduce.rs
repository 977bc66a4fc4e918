//! Score reduction from stat scores
//!
//! Every division by zero is defined as zero, so no reduction can yield NaN.

use super::average::{Average, MultidimAverage};
use super::output::MetricOutput;
use super::stat_scores::StatScores;
use super::task::ScoreKind;
use ndarray::{Array1, Array2, ArrayView1};

/// How macro averaging treats classes that never occur in either tensor
///
/// The rule is the same for every `top_k`. With `top_k > 1` each
/// non-target class in the top k collects a false positive, so a class
/// that never appears in the target still counts in the macro mean and
/// scores 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZeroSupportPolicy {
    /// Drop classes with TP + FP + FN = 0 from the mean (multiclass)
    Exclude,
    /// Average over every class (multilabel)
    Include,
}

fn safe_divide(num: f64, denom: f64) -> f64 {
    if denom == 0.0 {
        0.0
    } else {
        num / denom
    }
}

/// F-beta from precision and recall, zero when both are zero
pub fn fbeta(precision: f64, recall: f64, beta: f64) -> f64 {
    let beta2 = beta * beta;
    safe_divide((1.0 + beta2) * precision * recall, beta2 * precision + recall)
}

/// Score of a single TP/FP/FN triple
pub fn score_from_counts(kind: ScoreKind, tp: u64, fp: u64, fn_: u64) -> f64 {
    let (tp, fp, fn_) = (tp as f64, fp as f64, fn_ as f64);
    let precision = safe_divide(tp, tp + fp);
    let recall = safe_divide(tp, tp + fn_);
    match kind {
        ScoreKind::Precision => precision,
        ScoreKind::Recall => recall,
        ScoreKind::FBeta { beta } => fbeta(precision, recall, beta),
    }
}

/// Weighted sum normalised by the weight total; an all-zero weight vector yields 0
pub fn weighted_mean(scores: ArrayView1<'_, f64>, weights: ArrayView1<'_, f64>) -> f64 {
    let total = weights.sum();
    let norm = if total == 0.0 { 1.0 } else { total };
    scores
        .iter()
        .zip(weights.iter())
        .map(|(s, w)| s * w / norm)
        .sum()
}

fn per_class(kind: ScoreKind, stats: &StatScores, row: usize) -> Array1<f64> {
    Array1::from_iter((0..stats.num_classes()).map(|c| {
        score_from_counts(
            kind,
            stats.tp[[row, c]],
            stats.fp[[row, c]],
            stats.fn_[[row, c]],
        )
    }))
}

/// Macro weights are 1 (0 for unseen classes under `Exclude`), weighted
/// averaging uses the support TP + FN.
fn class_weights(stats: &StatScores, row: usize, average: Average, policy: ZeroSupportPolicy) -> Array1<f64> {
    Array1::from_iter((0..stats.num_classes()).map(|c| {
        let (tp, fp, fn_) = (stats.tp[[row, c]], stats.fp[[row, c]], stats.fn_[[row, c]]);
        if average == Average::Weighted {
            (tp + fn_) as f64
        } else if policy == ZeroSupportPolicy::Exclude && tp + fp + fn_ == 0 {
            0.0
        } else {
            1.0
        }
    }))
}

fn averaged_row(
    kind: ScoreKind,
    stats: &StatScores,
    row: usize,
    average: Average,
    policy: ZeroSupportPolicy,
) -> f64 {
    if average == Average::Micro {
        return score_from_counts(
            kind,
            stats.tp.row(row).sum(),
            stats.fp.row(row).sum(),
            stats.fn_.row(row).sum(),
        );
    }
    let scores = per_class(kind, stats, row);
    let weights = class_weights(stats, row, average, policy);
    weighted_mean(scores.view(), weights.view())
}

/// Reduce binary counts (single class column)
pub fn reduce_binary(
    kind: ScoreKind,
    stats: &StatScores,
    multidim_average: MultidimAverage,
) -> MetricOutput {
    let row_score =
        |row: usize| score_from_counts(kind, stats.tp[[row, 0]], stats.fp[[row, 0]], stats.fn_[[row, 0]]);
    match multidim_average {
        MultidimAverage::Global => MetricOutput::Scalar(row_score(0)),
        MultidimAverage::Samplewise => {
            MetricOutput::Vector(Array1::from_iter((0..stats.num_rows()).map(row_score)))
        }
    }
}

/// Reduce multiclass or multilabel counts
pub fn reduce_multi(
    kind: ScoreKind,
    stats: &StatScores,
    average: Average,
    multidim_average: MultidimAverage,
    policy: ZeroSupportPolicy,
) -> MetricOutput {
    match (multidim_average, average) {
        (MultidimAverage::Global, Average::None) => MetricOutput::Vector(per_class(kind, stats, 0)),
        (MultidimAverage::Global, _) => {
            MetricOutput::Scalar(averaged_row(kind, stats, 0, average, policy))
        }
        (MultidimAverage::Samplewise, Average::None) => {
            let mut out = Array2::zeros((stats.num_rows(), stats.num_classes()));
            for row in 0..stats.num_rows() {
                out.row_mut(row).assign(&per_class(kind, stats, row));
            }
            MetricOutput::Matrix(out)
        }
        (MultidimAverage::Samplewise, _) => MetricOutput::Vector(Array1::from_iter(
            (0..stats.num_rows()).map(|row| averaged_row(kind, stats, row, average, policy)),
        )),
    }
}
