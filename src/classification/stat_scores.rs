//! True/false positive/negative counts per sample row and class

use super::average::MultidimAverage;
use crate::error::{Error, Result};
use ndarray::{concatenate, Array2, Array3, Axis};

/// Confusion counts laid out as `[rows, classes]`
///
/// Global statistics have a single row, samplewise statistics one row per
/// batch element. Binary statistics have a single class column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatScores {
    pub tp: Array2<u64>,
    pub fp: Array2<u64>,
    pub tn: Array2<u64>,
    pub fn_: Array2<u64>,
}

impl StatScores {
    /// All-zero counts
    pub fn zeros(rows: usize, classes: usize) -> Self {
        Self {
            tp: Array2::zeros((rows, classes)),
            fp: Array2::zeros((rows, classes)),
            tn: Array2::zeros((rows, classes)),
            fn_: Array2::zeros((rows, classes)),
        }
    }

    /// Empty accumulator for the given reduction mode
    pub fn empty(classes: usize, multidim_average: MultidimAverage) -> Self {
        match multidim_average {
            MultidimAverage::Global => Self::zeros(1, classes),
            MultidimAverage::Samplewise => Self::zeros(0, classes),
        }
    }

    /// Number of sample rows
    pub fn num_rows(&self) -> usize {
        self.tp.nrows()
    }

    /// Number of class columns
    pub fn num_classes(&self) -> usize {
        self.tp.ncols()
    }

    /// Actual support per row and class (TP + FN)
    pub fn support(&self) -> Array2<u64> {
        &self.tp + &self.fn_
    }

    /// Total number of counted observations
    pub fn total(&self) -> u64 {
        self.tp.sum() + self.fp.sum() + self.tn.sum() + self.fn_.sum()
    }

    /// Fold another set of counts into this one.
    ///
    /// Global counts are summed; samplewise rows are appended in order.
    pub fn merge(&mut self, other: &StatScores, multidim_average: MultidimAverage) -> Result<()> {
        if self.num_classes() != other.num_classes() {
            return Err(Error::ShapeMismatch {
                expected: self.tp.shape().to_vec(),
                actual: other.tp.shape().to_vec(),
            });
        }
        match multidim_average {
            MultidimAverage::Global => {
                if self.num_rows() != other.num_rows() {
                    return Err(Error::ShapeMismatch {
                        expected: self.tp.shape().to_vec(),
                        actual: other.tp.shape().to_vec(),
                    });
                }
                self.tp += &other.tp;
                self.fp += &other.fp;
                self.tn += &other.tn;
                self.fn_ += &other.fn_;
            }
            MultidimAverage::Samplewise => {
                self.tp = append_rows(&self.tp, &other.tp)?;
                self.fp = append_rows(&self.fp, &other.fp)?;
                self.tn = append_rows(&self.tn, &other.tn)?;
                self.fn_ = append_rows(&self.fn_, &other.fn_)?;
            }
        }
        Ok(())
    }

    fn tally(&mut self, row: usize, class: usize, pred: bool, target: bool) {
        let cell = match (pred, target) {
            (true, true) => &mut self.tp,
            (true, false) => &mut self.fp,
            (false, true) => &mut self.fn_,
            (false, false) => &mut self.tn,
        };
        cell[[row, class]] += 1;
    }
}

fn append_rows(a: &Array2<u64>, b: &Array2<u64>) -> Result<Array2<u64>> {
    concatenate(Axis(0), &[a.view(), b.view()]).map_err(|_| Error::ShapeMismatch {
        expected: a.shape().to_vec(),
        actual: b.shape().to_vec(),
    })
}

fn rows_for(samples: usize, multidim_average: MultidimAverage) -> usize {
    match multidim_average {
        MultidimAverage::Global => 1,
        MultidimAverage::Samplewise => samples,
    }
}

fn row_of(sample: usize, multidim_average: MultidimAverage) -> usize {
    match multidim_average {
        MultidimAverage::Global => 0,
        MultidimAverage::Samplewise => sample,
    }
}

/// Count binary outcomes over `[N, M]` hard predictions
pub(crate) fn binary_counts(
    preds: &Array2<i64>,
    target: &Array2<i64>,
    multidim_average: MultidimAverage,
    ignore_index: Option<i64>,
) -> StatScores {
    let mut stats = StatScores::zeros(rows_for(target.nrows(), multidim_average), 1);
    for ((sample, j), &t) in target.indexed_iter() {
        if Some(t) == ignore_index {
            continue;
        }
        let row = row_of(sample, multidim_average);
        stats.tally(row, 0, preds[[sample, j]] == 1, t == 1);
    }
    stats
}

/// Count one-vs-rest outcomes over `[N, M, C]` predicted-class indicators
pub(crate) fn multiclass_counts(
    hits: &Array3<bool>,
    target: &Array2<i64>,
    num_classes: usize,
    multidim_average: MultidimAverage,
    ignore_index: Option<i64>,
) -> StatScores {
    let mut stats = StatScores::zeros(rows_for(target.nrows(), multidim_average), num_classes);
    for ((sample, j), &t) in target.indexed_iter() {
        if Some(t) == ignore_index {
            continue;
        }
        let row = row_of(sample, multidim_average);
        for class in 0..num_classes {
            stats.tally(row, class, hits[[sample, j, class]], t == class as i64);
        }
    }
    stats
}

/// Count per-label outcomes over `[N, L, M]` hard predictions
pub(crate) fn multilabel_counts(
    preds: &Array3<i64>,
    target: &Array3<i64>,
    multidim_average: MultidimAverage,
    ignore_index: Option<i64>,
) -> StatScores {
    let (samples, labels, _) = target.dim();
    let mut stats = StatScores::zeros(rows_for(samples, multidim_average), labels);
    for ((sample, label, j), &t) in target.indexed_iter() {
        if Some(t) == ignore_index {
            continue;
        }
        let row = row_of(sample, multidim_average);
        stats.tally(row, label, preds[[sample, label, j]] == 1, t == 1);
    }
    stats
}
