//! Reference multiclass scores

use super::filter::remove_ignore_index;
use super::scorer::ReferenceScore;
use crate::classification::{Average, MetricOutput, MultidimAverage, Preds};
use crate::error::{Error, Result};
use ndarray::{Array1, Array2, ArrayD, ArrayView1, Axis};

fn first_argmax(lane: ArrayView1<'_, f64>) -> i64 {
    lane.iter()
        .enumerate()
        .fold((0, f64::NEG_INFINITY), |(best, best_score), (idx, &score)| {
            if score > best_score {
                (idx, score)
            } else {
                (best, best_score)
            }
        })
        .0 as i64
}

/// Hard labels: scores with a class axis are arg-maxed along axis 1
fn hard_labels(preds: &Preds, target: &ArrayD<i64>) -> Result<ArrayD<i64>> {
    match preds {
        Preds::Labels(labels) => Ok(labels.clone()),
        Preds::Scores(scores) if target.ndim() >= 1 && scores.ndim() == target.ndim() + 1 => {
            Ok(scores.map_axis(Axis(1), first_argmax))
        }
        Preds::Scores(scores) => Err(Error::invalid_argument(
            "preds",
            format!(
                "floating point predictions need a class axis at axis 1, got shape {:?} for target shape {:?}",
                scores.shape(),
                target.shape()
            ),
        )),
    }
}

/// A samplewise result containing NaN counts as zero
fn nan_to_zero(output: MetricOutput) -> MetricOutput {
    if output.to_vec().iter().any(|v| v.is_nan()) {
        match output {
            MetricOutput::Vector(v) => MetricOutput::Vector(Array1::zeros(v.len())),
            _ => MetricOutput::Scalar(0.0),
        }
    } else {
        output
    }
}

/// Expected multiclass score of `preds` against `target`.
///
/// `Average::None` scores every class in `0..num_classes`; the averaged
/// modes only consider classes present in the (filtered) sequences.
pub fn reference_multiclass(
    preds: &Preds,
    target: &ArrayD<i64>,
    scorer: ReferenceScore,
    ignore_index: Option<i64>,
    multidim_average: MultidimAverage,
    average: Average,
    num_classes: usize,
) -> Result<MetricOutput> {
    let preds = hard_labels(preds, target)?;
    if preds.shape() != target.shape() {
        return Err(Error::ShapeMismatch {
            expected: target.shape().to_vec(),
            actual: preds.shape().to_vec(),
        });
    }
    let all_labels: Vec<i64> = (0..num_classes as i64).collect();
    let labels = (average == Average::None).then_some(all_labels.as_slice());

    match multidim_average {
        MultidimAverage::Global => {
            let flat_preds: Vec<i64> = preds.iter().copied().collect();
            let flat_target: Vec<i64> = target.iter().copied().collect();
            let (t, p) = remove_ignore_index(&flat_target, &flat_preds, ignore_index);
            Ok(scorer.multiclass(&t, &p, average, labels))
        }
        MultidimAverage::Samplewise => {
            let per_sample: Vec<MetricOutput> = preds
                .outer_iter()
                .zip(target.outer_iter())
                .map(|(pred, true_)| {
                    let pred: Vec<i64> = pred.iter().copied().collect();
                    let true_: Vec<i64> = true_.iter().copied().collect();
                    let (t, p) = remove_ignore_index(&true_, &pred, ignore_index);
                    nan_to_zero(scorer.multiclass(&t, &p, average, labels))
                })
                .collect();
            stack(per_sample, average, num_classes)
        }
    }
}

fn stack(per_sample: Vec<MetricOutput>, average: Average, num_classes: usize) -> Result<MetricOutput> {
    if average != Average::None {
        let scores: Vec<f64> = per_sample.iter().flat_map(MetricOutput::to_vec).collect();
        return Ok(MetricOutput::Vector(Array1::from(scores)));
    }
    let rows = per_sample.len();
    let values: Vec<f64> = per_sample.iter().flat_map(MetricOutput::to_vec).collect();
    Array2::from_shape_vec((rows, num_classes), values)
        .map(MetricOutput::Matrix)
        .map_err(|_| Error::ShapeMismatch {
            expected: vec![rows, num_classes],
            actual: vec![rows],
        })
}
