//! Reference multilabel scores

use super::confusion::ConfusionMatrix;
use super::filter::remove_ignore_index;
use super::scorer::ReferenceScore;
use super::threshold_preds;
use crate::classification::{flatten_trailing, Average, MetricOutput, MultidimAverage, Preds};
use crate::error::{Error, Result};
use ndarray::{Array1, Array2, Array3, ArrayD, ArrayView1, Axis};

/// Actual support of the positive label
fn positive_support(t: &[i64], p: &[i64]) -> f64 {
    let cm = ConfusionMatrix::from_labels(t, p, Some(&[0, 1][..]));
    cm.index_of(1).map_or(0.0, |idx| cm.support(idx) as f64)
}

fn combine(scores: &[f64], weights: &[f64], average: Average) -> f64 {
    match average {
        Average::Weighted => {
            let total: f64 = weights.iter().sum();
            let norm = if total == 0.0 { 1.0 } else { total };
            scores.iter().zip(weights).map(|(s, w)| w * s / norm).sum()
        }
        _ => {
            if scores.is_empty() {
                0.0
            } else {
                scores.iter().sum::<f64>() / scores.len() as f64
            }
        }
    }
}

fn to_vec(view: ArrayView1<'_, i64>) -> Vec<i64> {
    view.iter().copied().collect()
}

/// `[N, L, M]` into `[N * M, L]` observation rows
fn observations(a: &Array3<i64>) -> Result<Array2<i64>> {
    let (n, l, m) = a.dim();
    let moved = a.view().permuted_axes([0, 2, 1]);
    Array2::from_shape_vec((n * m, l), moved.iter().copied().collect()).map_err(|_| {
        Error::ShapeMismatch {
            expected: vec![n * m, l],
            actual: vec![n, l, m],
        }
    })
}

fn label_scores(
    preds: &Array3<i64>,
    target: &Array3<i64>,
    scorer: ReferenceScore,
    ignore_index: Option<i64>,
    sample: Option<usize>,
) -> (Vec<f64>, Vec<f64>) {
    let (_, labels, _) = preds.dim();
    (0..labels)
        .map(|label| {
            let (pred, true_) = match sample {
                Some(i) => (
                    to_vec(preds.slice(ndarray::s![i, label, ..])),
                    to_vec(target.slice(ndarray::s![i, label, ..])),
                ),
                None => (
                    preds.index_axis(Axis(1), label).iter().copied().collect(),
                    target.index_axis(Axis(1), label).iter().copied().collect(),
                ),
            };
            let (t, p) = remove_ignore_index(&true_, &pred, ignore_index);
            (scorer.binary(&t, &p), positive_support(&t, &p))
        })
        .unzip()
}

/// Expected multilabel score of `preds` against `target`.
///
/// Without an ignore index, global scores come from the `[samples, labels]`
/// indicator matrix. Otherwise every label (and every sample in samplewise
/// mode) is filtered and scored as its own binary problem.
#[allow(clippy::too_many_arguments)]
pub fn reference_multilabel(
    preds: &Preds,
    target: &ArrayD<i64>,
    scorer: ReferenceScore,
    ignore_index: Option<i64>,
    multidim_average: MultidimAverage,
    average: Average,
    num_labels: usize,
    threshold: f64,
) -> Result<MetricOutput> {
    let preds = flatten_trailing(&threshold_preds(preds, threshold))?;
    let target = flatten_trailing(target)?;
    if preds.dim() != target.dim() || preds.dim().1 != num_labels {
        return Err(Error::ShapeMismatch {
            expected: target.shape().to_vec(),
            actual: preds.shape().to_vec(),
        });
    }

    match (multidim_average, ignore_index) {
        (MultidimAverage::Global, None) => {
            let t = observations(&target)?;
            let p = observations(&preds)?;
            Ok(scorer.indicator(t.view(), p.view(), average))
        }
        (MultidimAverage::Global, _) => {
            if average == Average::Micro {
                let flat_preds: Vec<i64> = preds.iter().copied().collect();
                let flat_target: Vec<i64> = target.iter().copied().collect();
                let (t, p) = remove_ignore_index(&flat_target, &flat_preds, ignore_index);
                return Ok(MetricOutput::Scalar(scorer.binary(&t, &p)));
            }
            let (scores, weights) = label_scores(&preds, &target, scorer, ignore_index, None);
            match average {
                Average::None => Ok(MetricOutput::Vector(Array1::from(scores))),
                _ => Ok(MetricOutput::Scalar(combine(&scores, &weights, average))),
            }
        }
        (MultidimAverage::Samplewise, _) => {
            let samples = preds.dim().0;
            if average == Average::Micro {
                let scores: Vec<f64> = (0..samples)
                    .map(|i| {
                        let pred: Vec<i64> = preds.index_axis(Axis(0), i).iter().copied().collect();
                        let true_: Vec<i64> = target.index_axis(Axis(0), i).iter().copied().collect();
                        let (t, p) = remove_ignore_index(&true_, &pred, ignore_index);
                        scorer.binary(&t, &p)
                    })
                    .collect();
                return Ok(MetricOutput::Vector(Array1::from(scores)));
            }
            let mut per_label = Array2::zeros((samples, num_labels));
            let mut combined = Array1::zeros(samples);
            for i in 0..samples {
                let (scores, weights) = label_scores(&preds, &target, scorer, ignore_index, Some(i));
                combined[i] = combine(&scores, &weights, average);
                per_label.row_mut(i).assign(&Array1::from(scores));
            }
            match average {
                Average::None => Ok(MetricOutput::Matrix(per_label)),
                _ => Ok(MetricOutput::Vector(combined)),
            }
        }
    }
}
