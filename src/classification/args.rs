//! Per-task metric arguments
//!
//! Each argument struct knows how to turn one batch into [`StatScores`] and
//! how to reduce accumulated counts, which is all the functional API and the
//! stateful metrics need.

use super::average::{Average, MultidimAverage};
use super::input::{format_binary, format_multiclass, format_multilabel, Preds};
use super::output::MetricOutput;
use super::reduce::{reduce_binary, reduce_multi, ZeroSupportPolicy};
use super::stat_scores::{binary_counts, multiclass_counts, multilabel_counts, StatScores};
use super::task::{ScoreKind, Task};
use crate::error::{Error, Result};
use ndarray::ArrayD;
use serde::{Deserialize, Serialize};

/// Default decision threshold for binary and multilabel probabilities
pub const DEFAULT_THRESHOLD: f64 = 0.5;

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

fn default_top_k() -> usize {
    1
}

fn validate_threshold(threshold: f64) -> Result<()> {
    if (0.0..=1.0).contains(&threshold) {
        Ok(())
    } else {
        Err(Error::invalid_argument(
            "threshold",
            format!("{threshold} (must be in [0.0, 1.0])"),
        ))
    }
}

/// Shared behaviour of the per-task argument structs
pub trait TaskArgs: Clone + PartialEq + std::fmt::Debug {
    /// Task these arguments configure
    fn task(&self) -> Task;

    /// Number of class columns in the stat scores
    fn num_columns(&self) -> usize;

    /// Multidim reduction mode
    fn multidim_average(&self) -> MultidimAverage;

    /// Check argument domains
    fn validate(&self) -> Result<()>;

    /// Validate, normalise and count one batch
    fn stat_scores(&self, preds: &Preds, target: &ArrayD<i64>) -> Result<StatScores>;

    /// Reduce counts to a score
    fn reduce(&self, kind: ScoreKind, stats: &StatScores) -> MetricOutput;

    /// Empty accumulator matching these arguments
    fn empty_stats(&self) -> StatScores {
        StatScores::empty(self.num_columns(), self.multidim_average())
    }
}

/// Arguments for binary scores
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BinaryArgs {
    /// Probability at or above which a prediction counts as positive
    pub threshold: f64,
    pub multidim_average: MultidimAverage,
    /// Target value excluded from scoring
    pub ignore_index: Option<i64>,
}

impl Default for BinaryArgs {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            multidim_average: MultidimAverage::Global,
            ignore_index: None,
        }
    }
}

impl BinaryArgs {
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_multidim_average(mut self, multidim_average: MultidimAverage) -> Self {
        self.multidim_average = multidim_average;
        self
    }

    pub fn with_ignore_index(mut self, ignore_index: Option<i64>) -> Self {
        self.ignore_index = ignore_index;
        self
    }
}

impl TaskArgs for BinaryArgs {
    fn task(&self) -> Task {
        Task::Binary
    }

    fn num_columns(&self) -> usize {
        1
    }

    fn multidim_average(&self) -> MultidimAverage {
        self.multidim_average
    }

    fn validate(&self) -> Result<()> {
        validate_threshold(self.threshold)
    }

    fn stat_scores(&self, preds: &Preds, target: &ArrayD<i64>) -> Result<StatScores> {
        self.validate()?;
        let (preds, target) = format_binary(
            preds,
            target,
            self.threshold,
            self.multidim_average,
            self.ignore_index,
        )?;
        Ok(binary_counts(
            &preds,
            &target,
            self.multidim_average,
            self.ignore_index,
        ))
    }

    fn reduce(&self, kind: ScoreKind, stats: &StatScores) -> MetricOutput {
        reduce_binary(kind, stats, self.multidim_average)
    }
}

/// Arguments for multiclass scores
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MulticlassArgs {
    pub num_classes: usize,
    #[serde(default)]
    pub average: Average,
    /// Number of highest-scored classes counted as predicted
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    #[serde(default)]
    pub multidim_average: MultidimAverage,
    #[serde(default)]
    pub ignore_index: Option<i64>,
}

impl MulticlassArgs {
    /// Macro-averaged, top-1, global arguments for `num_classes` classes
    pub fn new(num_classes: usize) -> Self {
        Self {
            num_classes,
            average: Average::Macro,
            top_k: 1,
            multidim_average: MultidimAverage::Global,
            ignore_index: None,
        }
    }

    pub fn with_average(mut self, average: Average) -> Self {
        self.average = average;
        self
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_multidim_average(mut self, multidim_average: MultidimAverage) -> Self {
        self.multidim_average = multidim_average;
        self
    }

    pub fn with_ignore_index(mut self, ignore_index: Option<i64>) -> Self {
        self.ignore_index = ignore_index;
        self
    }
}

impl TaskArgs for MulticlassArgs {
    fn task(&self) -> Task {
        Task::Multiclass
    }

    fn num_columns(&self) -> usize {
        self.num_classes
    }

    fn multidim_average(&self) -> MultidimAverage {
        self.multidim_average
    }

    fn validate(&self) -> Result<()> {
        if self.num_classes < 2 {
            return Err(Error::invalid_argument(
                "num_classes",
                format!("{} (must be an integer >= 2)", self.num_classes),
            ));
        }
        if self.top_k == 0 || self.top_k > self.num_classes {
            return Err(Error::invalid_argument(
                "top_k",
                format!(
                    "{} (must be in [1, num_classes={}])",
                    self.top_k, self.num_classes
                ),
            ));
        }
        Ok(())
    }

    fn stat_scores(&self, preds: &Preds, target: &ArrayD<i64>) -> Result<StatScores> {
        self.validate()?;
        let (hits, target) = format_multiclass(
            preds,
            target,
            self.num_classes,
            self.top_k,
            self.multidim_average,
            self.ignore_index,
        )?;
        Ok(multiclass_counts(
            &hits,
            &target,
            self.num_classes,
            self.multidim_average,
            self.ignore_index,
        ))
    }

    fn reduce(&self, kind: ScoreKind, stats: &StatScores) -> MetricOutput {
        reduce_multi(
            kind,
            stats,
            self.average,
            self.multidim_average,
            ZeroSupportPolicy::Exclude,
        )
    }
}

/// Arguments for multilabel scores
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MultilabelArgs {
    pub num_labels: usize,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    #[serde(default)]
    pub average: Average,
    #[serde(default)]
    pub multidim_average: MultidimAverage,
    #[serde(default)]
    pub ignore_index: Option<i64>,
}

impl MultilabelArgs {
    /// Macro-averaged, global arguments for `num_labels` labels
    pub fn new(num_labels: usize) -> Self {
        Self {
            num_labels,
            threshold: DEFAULT_THRESHOLD,
            average: Average::Macro,
            multidim_average: MultidimAverage::Global,
            ignore_index: None,
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_average(mut self, average: Average) -> Self {
        self.average = average;
        self
    }

    pub fn with_multidim_average(mut self, multidim_average: MultidimAverage) -> Self {
        self.multidim_average = multidim_average;
        self
    }

    pub fn with_ignore_index(mut self, ignore_index: Option<i64>) -> Self {
        self.ignore_index = ignore_index;
        self
    }
}

impl TaskArgs for MultilabelArgs {
    fn task(&self) -> Task {
        Task::Multilabel
    }

    fn num_columns(&self) -> usize {
        self.num_labels
    }

    fn multidim_average(&self) -> MultidimAverage {
        self.multidim_average
    }

    fn validate(&self) -> Result<()> {
        if self.num_labels < 2 {
            return Err(Error::invalid_argument(
                "num_labels",
                format!("{} (must be an integer >= 2)", self.num_labels),
            ));
        }
        validate_threshold(self.threshold)
    }

    fn stat_scores(&self, preds: &Preds, target: &ArrayD<i64>) -> Result<StatScores> {
        self.validate()?;
        let (preds, target) = format_multilabel(
            preds,
            target,
            self.num_labels,
            self.threshold,
            self.multidim_average,
            self.ignore_index,
        )?;
        Ok(multilabel_counts(
            &preds,
            &target,
            self.multidim_average,
            self.ignore_index,
        ))
    }

    fn reduce(&self, kind: ScoreKind, stats: &StatScores) -> MetricOutput {
        reduce_multi(
            kind,
            stats,
            self.average,
            self.multidim_average,
            ZeroSupportPolicy::Include,
        )
    }
}
