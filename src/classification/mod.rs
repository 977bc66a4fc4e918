//! Classification scores for binary, multiclass and multilabel tensors
//!
//! Provides:
//! - Shape normalisation, sigmoid/threshold handling and ignore-index masking
//! - Per-class TP/FP/TN/FN stat scores, optionally per sample
//! - Precision, recall and F-beta with micro, macro, weighted or no averaging
//! - Top-k selection for multiclass scores
//! - Stateless functions and stateful, mergeable metric objects
//! - A dispatcher selecting the task-specialised metric from a task string

mod args;
mod average;
mod functional;
mod input;
mod metric;
mod output;
mod reduce;
mod stat_scores;
mod task;
mod top_k;
mod wrapper;


pub use args::{BinaryArgs, MulticlassArgs, MultilabelArgs, TaskArgs, DEFAULT_THRESHOLD};
pub use average::{Average, MultidimAverage};
pub use functional::{
    binary_f1_score, binary_fbeta_score, binary_precision, binary_recall, binary_score,
    multiclass_f1_score, multiclass_fbeta_score, multiclass_precision, multiclass_recall,
    multiclass_score, multilabel_f1_score, multilabel_fbeta_score, multilabel_precision,
    multilabel_recall, multilabel_score, score, stat_scores,
};
pub use input::{binarize, class_axis_last, flatten_samples, flatten_trailing, sigmoid, Preds};
pub use metric::{BinaryMetric, Metric, MulticlassMetric, MultilabelMetric, StatefulMetric};
pub use output::MetricOutput;
pub use reduce::{fbeta, reduce_binary, reduce_multi, score_from_counts, weighted_mean, ZeroSupportPolicy};
pub use stat_scores::StatScores;
pub use task::{ScoreKind, Task};
pub use top_k::{argmax, in_top_k, top_k_hits, top_k_indices};
pub use wrapper::ClassificationMetric;
