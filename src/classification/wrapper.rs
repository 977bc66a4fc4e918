//! Task dispatcher
//!
//! Builds the task-specialised metric from a [`MetricConfig`]:
//!
//! ```
//! use puntaje::classification::{ClassificationMetric, Task};
//! use puntaje::MetricConfig;
//!
//! let config = MetricConfig::new("multiclass").with_num_classes(3);
//! let metric = ClassificationMetric::precision(&config)?;
//! assert_eq!(metric.task(), Task::Multiclass);
//!
//! assert!(ClassificationMetric::precision(&MetricConfig::new("not_valid_task")).is_err());
//! # Ok::<(), puntaje::Error>(())
//! ```

use super::input::Preds;
use super::metric::{BinaryMetric, Metric, MulticlassMetric, MultilabelMetric};
use super::output::MetricOutput;
use super::task::{ScoreKind, Task};
use crate::config::MetricConfig;
use crate::error::{Error, Result};
use ndarray::ArrayD;

/// A stateful metric specialised for one task
#[derive(Clone, Debug)]
pub enum ClassificationMetric {
    Binary(BinaryMetric),
    Multiclass(MulticlassMetric),
    Multilabel(MultilabelMetric),
}

impl ClassificationMetric {
    /// Dispatch on `config.task`; unknown tasks fail with [`Error::InvalidTask`]
    pub fn new(kind: ScoreKind, config: &MetricConfig) -> Result<Self> {
        let task: Task = config.task.parse()?;
        match task {
            Task::Binary => Ok(Self::Binary(BinaryMetric::new(kind, config.binary_args())?)),
            Task::Multiclass => Ok(Self::Multiclass(MulticlassMetric::new(
                kind,
                config.multiclass_args()?,
            )?)),
            Task::Multilabel => Ok(Self::Multilabel(MultilabelMetric::new(
                kind,
                config.multilabel_args()?,
            )?)),
        }
    }

    pub fn precision(config: &MetricConfig) -> Result<Self> {
        Self::new(ScoreKind::Precision, config)
    }

    pub fn recall(config: &MetricConfig) -> Result<Self> {
        Self::new(ScoreKind::Recall, config)
    }

    pub fn f1_score(config: &MetricConfig) -> Result<Self> {
        Self::new(ScoreKind::F1, config)
    }

    pub fn fbeta_score(config: &MetricConfig, beta: f64) -> Result<Self> {
        Self::new(ScoreKind::FBeta { beta }, config)
    }

    pub fn task(&self) -> Task {
        match self {
            Self::Binary(_) => Task::Binary,
            Self::Multiclass(_) => Task::Multiclass,
            Self::Multilabel(_) => Task::Multilabel,
        }
    }

    pub fn kind(&self) -> ScoreKind {
        match self {
            Self::Binary(m) => m.kind(),
            Self::Multiclass(m) => m.kind(),
            Self::Multilabel(m) => m.kind(),
        }
    }
}

impl Metric for ClassificationMetric {
    fn update(&mut self, preds: &Preds, target: &ArrayD<i64>) -> Result<()> {
        match self {
            Self::Binary(m) => m.update(preds, target),
            Self::Multiclass(m) => m.update(preds, target),
            Self::Multilabel(m) => m.update(preds, target),
        }
    }

    fn compute(&self) -> MetricOutput {
        match self {
            Self::Binary(m) => m.compute(),
            Self::Multiclass(m) => m.compute(),
            Self::Multilabel(m) => m.compute(),
        }
    }

    fn forward(&mut self, preds: &Preds, target: &ArrayD<i64>) -> Result<MetricOutput> {
        match self {
            Self::Binary(m) => m.forward(preds, target),
            Self::Multiclass(m) => m.forward(preds, target),
            Self::Multilabel(m) => m.forward(preds, target),
        }
    }

    fn reset(&mut self) {
        match self {
            Self::Binary(m) => m.reset(),
            Self::Multiclass(m) => m.reset(),
            Self::Multilabel(m) => m.reset(),
        }
    }

    fn update_count(&self) -> usize {
        match self {
            Self::Binary(m) => m.update_count(),
            Self::Multiclass(m) => m.update_count(),
            Self::Multilabel(m) => m.update_count(),
        }
    }

    fn merge(&mut self, other: &Self) -> Result<()> {
        match (self, other) {
            (Self::Binary(a), Self::Binary(b)) => a.merge(b),
            (Self::Multiclass(a), Self::Multiclass(b)) => a.merge(b),
            (Self::Multilabel(a), Self::Multilabel(b)) => a.merge(b),
            (this, other) => Err(Error::invalid_argument(
                "other",
                format!("cannot merge a {} metric into a {} metric", other.task(), this.task()),
            )),
        }
    }
}
