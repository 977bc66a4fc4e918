//! Stateless score functions
//!
//! One call validates a batch, counts it and reduces the counts. The
//! stateful metrics in [`super::metric`] run exactly the same steps, only
//! split across `update` and `compute`.
//!
//! # Example
//!
//! ```
//! use ndarray::array;
//! use puntaje::classification::{multiclass_f1_score, Average, MulticlassArgs, Preds};
//!
//! let preds = Preds::from(array![2_i64, 1, 0, 1]);
//! let target = array![2_i64, 1, 0, 0].into_dyn();
//! let args = MulticlassArgs::new(3).with_average(Average::Macro);
//!
//! let f1 = multiclass_f1_score(&preds, &target, &args)?;
//! assert!((f1.as_scalar().unwrap() - 0.7777778).abs() < 1e-6);
//! # Ok::<(), puntaje::Error>(())
//! ```

use super::args::{BinaryArgs, MulticlassArgs, MultilabelArgs, TaskArgs};
use super::input::Preds;
use super::output::MetricOutput;
use super::stat_scores::StatScores;
use super::task::ScoreKind;
use crate::error::Result;
use ndarray::ArrayD;

/// Count one batch for any task
pub fn stat_scores<A: TaskArgs>(preds: &Preds, target: &ArrayD<i64>, args: &A) -> Result<StatScores> {
    args.stat_scores(preds, target)
}

/// Score one batch for any task
pub fn score<A: TaskArgs>(
    preds: &Preds,
    target: &ArrayD<i64>,
    kind: ScoreKind,
    args: &A,
) -> Result<MetricOutput> {
    kind.validate()?;
    let stats = args.stat_scores(preds, target)?;
    Ok(args.reduce(kind, &stats))
}

// =============================================================================
// Binary
// =============================================================================

/// Binary score of the given kind
pub fn binary_score(
    preds: &Preds,
    target: &ArrayD<i64>,
    kind: ScoreKind,
    args: &BinaryArgs,
) -> Result<MetricOutput> {
    score(preds, target, kind, args)
}

/// Binary precision: TP / (TP + FP)
pub fn binary_precision(preds: &Preds, target: &ArrayD<i64>, args: &BinaryArgs) -> Result<MetricOutput> {
    binary_score(preds, target, ScoreKind::Precision, args)
}

/// Binary recall: TP / (TP + FN)
pub fn binary_recall(preds: &Preds, target: &ArrayD<i64>, args: &BinaryArgs) -> Result<MetricOutput> {
    binary_score(preds, target, ScoreKind::Recall, args)
}

/// Binary F-beta: (1 + β²)·P·R / (β²·P + R)
pub fn binary_fbeta_score(
    preds: &Preds,
    target: &ArrayD<i64>,
    beta: f64,
    args: &BinaryArgs,
) -> Result<MetricOutput> {
    binary_score(preds, target, ScoreKind::FBeta { beta }, args)
}

/// Binary F1, the harmonic mean of precision and recall
pub fn binary_f1_score(preds: &Preds, target: &ArrayD<i64>, args: &BinaryArgs) -> Result<MetricOutput> {
    binary_score(preds, target, ScoreKind::F1, args)
}

// =============================================================================
// Multiclass
// =============================================================================

/// Multiclass score of the given kind
pub fn multiclass_score(
    preds: &Preds,
    target: &ArrayD<i64>,
    kind: ScoreKind,
    args: &MulticlassArgs,
) -> Result<MetricOutput> {
    score(preds, target, kind, args)
}

/// Multiclass precision, averaged per `args.average`
pub fn multiclass_precision(
    preds: &Preds,
    target: &ArrayD<i64>,
    args: &MulticlassArgs,
) -> Result<MetricOutput> {
    multiclass_score(preds, target, ScoreKind::Precision, args)
}

/// Multiclass recall, averaged per `args.average`
pub fn multiclass_recall(
    preds: &Preds,
    target: &ArrayD<i64>,
    args: &MulticlassArgs,
) -> Result<MetricOutput> {
    multiclass_score(preds, target, ScoreKind::Recall, args)
}

/// Multiclass F-beta, averaged per `args.average`
pub fn multiclass_fbeta_score(
    preds: &Preds,
    target: &ArrayD<i64>,
    beta: f64,
    args: &MulticlassArgs,
) -> Result<MetricOutput> {
    multiclass_score(preds, target, ScoreKind::FBeta { beta }, args)
}

/// Multiclass F1, averaged per `args.average`
pub fn multiclass_f1_score(
    preds: &Preds,
    target: &ArrayD<i64>,
    args: &MulticlassArgs,
) -> Result<MetricOutput> {
    multiclass_score(preds, target, ScoreKind::F1, args)
}

// =============================================================================
// Multilabel
// =============================================================================

/// Multilabel score of the given kind
pub fn multilabel_score(
    preds: &Preds,
    target: &ArrayD<i64>,
    kind: ScoreKind,
    args: &MultilabelArgs,
) -> Result<MetricOutput> {
    score(preds, target, kind, args)
}

/// Multilabel precision, averaged per `args.average`
pub fn multilabel_precision(
    preds: &Preds,
    target: &ArrayD<i64>,
    args: &MultilabelArgs,
) -> Result<MetricOutput> {
    multilabel_score(preds, target, ScoreKind::Precision, args)
}

/// Multilabel recall, averaged per `args.average`
pub fn multilabel_recall(
    preds: &Preds,
    target: &ArrayD<i64>,
    args: &MultilabelArgs,
) -> Result<MetricOutput> {
    multilabel_score(preds, target, ScoreKind::Recall, args)
}

/// Multilabel F-beta, averaged per `args.average`
pub fn multilabel_fbeta_score(
    preds: &Preds,
    target: &ArrayD<i64>,
    beta: f64,
    args: &MultilabelArgs,
) -> Result<MetricOutput> {
    multilabel_score(preds, target, ScoreKind::FBeta { beta }, args)
}

/// Multilabel F1, averaged per `args.average`
pub fn multilabel_f1_score(
    preds: &Preds,
    target: &ArrayD<i64>,
    args: &MultilabelArgs,
) -> Result<MetricOutput> {
    multilabel_score(preds, target, ScoreKind::F1, args)
}
