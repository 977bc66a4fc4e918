//! Stateful, incrementally updatable metrics

use super::args::{BinaryArgs, MulticlassArgs, MultilabelArgs, TaskArgs};
use super::input::Preds;
use super::output::MetricOutput;
use super::stat_scores::StatScores;
use super::task::{ScoreKind, Task};
use crate::error::{Error, Result};
use ndarray::ArrayD;

/// Accumulating metric over a stream of batches
pub trait Metric {
    /// Fold one batch into the accumulated state
    fn update(&mut self, preds: &Preds, target: &ArrayD<i64>) -> Result<()>;

    /// Score of everything accumulated since construction or the last reset
    fn compute(&self) -> MetricOutput;

    /// Update with one batch and return the score of that batch alone
    fn forward(&mut self, preds: &Preds, target: &ArrayD<i64>) -> Result<MetricOutput>;

    /// Drop all accumulated state
    fn reset(&mut self);

    /// Number of batches seen since the last reset
    fn update_count(&self) -> usize;

    /// Fold another worker's accumulated state into this one
    fn merge(&mut self, other: &Self) -> Result<()>
    where
        Self: Sized;
}

/// Metric holding [`StatScores`] and delegating to the pure reducer
#[derive(Clone, Debug)]
pub struct StatefulMetric<A: TaskArgs> {
    kind: ScoreKind,
    args: A,
    state: StatScores,
    updates: usize,
}

pub type BinaryMetric = StatefulMetric<BinaryArgs>;
pub type MulticlassMetric = StatefulMetric<MulticlassArgs>;
pub type MultilabelMetric = StatefulMetric<MultilabelArgs>;

impl<A: TaskArgs> StatefulMetric<A> {
    /// Create a metric after validating the score kind and arguments
    pub fn new(kind: ScoreKind, args: A) -> Result<Self> {
        kind.validate()?;
        args.validate()?;
        log::debug!("building {} {kind} metric: {args:?}", args.task());
        let state = args.empty_stats();
        Ok(Self {
            kind,
            args,
            state,
            updates: 0,
        })
    }

    pub fn precision(args: A) -> Result<Self> {
        Self::new(ScoreKind::Precision, args)
    }

    pub fn recall(args: A) -> Result<Self> {
        Self::new(ScoreKind::Recall, args)
    }

    pub fn f1_score(args: A) -> Result<Self> {
        Self::new(ScoreKind::F1, args)
    }

    pub fn fbeta_score(beta: f64, args: A) -> Result<Self> {
        Self::new(ScoreKind::FBeta { beta }, args)
    }

    pub fn kind(&self) -> ScoreKind {
        self.kind
    }

    pub fn task(&self) -> Task {
        self.args.task()
    }

    pub fn args(&self) -> &A {
        &self.args
    }

    /// Accumulated counts
    pub fn state(&self) -> &StatScores {
        &self.state
    }
}

impl<A: TaskArgs> Metric for StatefulMetric<A> {
    fn update(&mut self, preds: &Preds, target: &ArrayD<i64>) -> Result<()> {
        let batch = self.args.stat_scores(preds, target)?;
        self.state.merge(&batch, self.args.multidim_average())?;
        self.updates += 1;
        log::trace!(
            "{} update #{}: batch shape {:?}",
            self.kind,
            self.updates,
            target.shape()
        );
        Ok(())
    }

    fn compute(&self) -> MetricOutput {
        if self.updates == 0 {
            log::warn!(
                "{} {}: compute called before any update, reducing empty state",
                self.args.task(),
                self.kind
            );
        }
        self.args.reduce(self.kind, &self.state)
    }

    fn forward(&mut self, preds: &Preds, target: &ArrayD<i64>) -> Result<MetricOutput> {
        let batch = self.args.stat_scores(preds, target)?;
        self.state.merge(&batch, self.args.multidim_average())?;
        self.updates += 1;
        Ok(self.args.reduce(self.kind, &batch))
    }

    fn reset(&mut self) {
        self.state = self.args.empty_stats();
        self.updates = 0;
    }

    fn update_count(&self) -> usize {
        self.updates
    }

    fn merge(&mut self, other: &Self) -> Result<()> {
        if self.kind != other.kind || self.args != other.args {
            return Err(Error::invalid_argument(
                "other",
                format!(
                    "cannot merge {} {:?} into {} {:?}",
                    other.kind, other.args, self.kind, self.args
                ),
            ));
        }
        self.state.merge(&other.state, self.args.multidim_average())?;
        self.updates += other.updates;
        Ok(())
    }
}
