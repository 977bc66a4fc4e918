//! sklearn-semantics scorers
//!
//! Follows `precision_score`, `recall_score` and `fbeta_score` from
//! scikit-learn with `zero_division=0`:
//!
//! - binary: positive label 1
//! - multiclass: averaging over the labels present in either sequence,
//!   unless an explicit label list is passed
//! - indicator matrices: one binary problem per column

use super::confusion::ConfusionMatrix;
use crate::classification::{Average, MetricOutput};
use ndarray::{Array1, ArrayView2, Axis};

/// Score function used as ground truth
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ReferenceScore {
    Precision,
    Recall,
    FBeta(f64),
}

impl ReferenceScore {
    pub const F1: ReferenceScore = ReferenceScore::FBeta(1.0);

    fn from_counts(&self, tp: usize, fp: usize, fn_: usize) -> f64 {
        let precision = if tp + fp == 0 {
            0.0
        } else {
            tp as f64 / (tp + fp) as f64
        };
        let recall = if tp + fn_ == 0 {
            0.0
        } else {
            tp as f64 / (tp + fn_) as f64
        };
        match *self {
            Self::Precision => precision,
            Self::Recall => recall,
            Self::FBeta(beta) => {
                let beta2 = beta * beta;
                let denom = beta2 * precision + recall;
                if denom == 0.0 {
                    0.0
                } else {
                    (1.0 + beta2) * precision * recall / denom
                }
            }
        }
    }

    /// Binary score with positive label 1
    pub fn binary(&self, y_true: &[i64], y_pred: &[i64]) -> f64 {
        let (mut tp, mut fp, mut fn_) = (0, 0, 0);
        for (&t, &p) in y_true.iter().zip(y_pred) {
            match (t == 1, p == 1) {
                (true, true) => tp += 1,
                (false, true) => fp += 1,
                (true, false) => fn_ += 1,
                (false, false) => {}
            }
        }
        self.from_counts(tp, fp, fn_)
    }

    /// Multiclass score over `labels` (or every label present)
    pub fn multiclass(
        &self,
        y_true: &[i64],
        y_pred: &[i64],
        average: Average,
        labels: Option<&[i64]>,
    ) -> MetricOutput {
        let cm = ConfusionMatrix::from_labels(y_true, y_pred, labels);
        let n = cm.n_classes();
        let per_class: Vec<f64> = (0..n)
            .map(|c| {
                self.from_counts(
                    cm.true_positives(c),
                    cm.false_positives(c),
                    cm.false_negatives(c),
                )
            })
            .collect();
        let support: Vec<usize> = (0..n).map(|c| cm.support(c)).collect();

        match average {
            Average::Micro => MetricOutput::Scalar(self.from_counts(
                (0..n).map(|c| cm.true_positives(c)).sum(),
                (0..n).map(|c| cm.false_positives(c)).sum(),
                (0..n).map(|c| cm.false_negatives(c)).sum(),
            )),
            Average::Macro => MetricOutput::Scalar(mean(&per_class)),
            Average::Weighted => MetricOutput::Scalar(support_weighted(&per_class, &support)),
            Average::None => MetricOutput::Vector(Array1::from(per_class)),
        }
    }

    /// Score of a `[samples, labels]` indicator matrix
    pub fn indicator(
        &self,
        y_true: ArrayView2<'_, i64>,
        y_pred: ArrayView2<'_, i64>,
        average: Average,
    ) -> MetricOutput {
        let columns: Vec<(usize, usize, usize)> = y_true
            .axis_iter(Axis(1))
            .zip(y_pred.axis_iter(Axis(1)))
            .map(|(t, p)| {
                let (mut tp, mut fp, mut fn_) = (0, 0, 0);
                for (&t, &p) in t.iter().zip(p.iter()) {
                    match (t == 1, p == 1) {
                        (true, true) => tp += 1,
                        (false, true) => fp += 1,
                        (true, false) => fn_ += 1,
                        (false, false) => {}
                    }
                }
                (tp, fp, fn_)
            })
            .collect();
        let per_label: Vec<f64> = columns
            .iter()
            .map(|&(tp, fp, fn_)| self.from_counts(tp, fp, fn_))
            .collect();

        match average {
            Average::Micro => MetricOutput::Scalar(self.from_counts(
                columns.iter().map(|c| c.0).sum(),
                columns.iter().map(|c| c.1).sum(),
                columns.iter().map(|c| c.2).sum(),
            )),
            Average::Macro => MetricOutput::Scalar(mean(&per_label)),
            Average::Weighted => {
                let support: Vec<usize> = columns.iter().map(|&(tp, _, fn_)| tp + fn_).collect();
                MetricOutput::Scalar(support_weighted(&per_label, &support))
            }
            Average::None => MetricOutput::Vector(Array1::from(per_label)),
        }
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

fn support_weighted(values: &[f64], support: &[usize]) -> f64 {
    let total: usize = support.iter().sum();
    if total == 0 {
        return 0.0;
    }
    values
        .iter()
        .zip(support)
        .map(|(&v, &s)| v * s as f64)
        .sum::<f64>()
        / total as f64
}
