//! Reference binary scores

use super::filter::remove_ignore_index;
use super::scorer::ReferenceScore;
use super::threshold_preds;
use crate::classification::{MetricOutput, MultidimAverage, Preds};
use crate::error::Result;
use ndarray::{Array1, ArrayD};

/// Expected binary score of `preds` against `target`.
///
/// Global mode flattens everything, filters and scores once; samplewise mode
/// repeats that per batch element.
pub fn reference_binary(
    preds: &Preds,
    target: &ArrayD<i64>,
    scorer: ReferenceScore,
    ignore_index: Option<i64>,
    multidim_average: MultidimAverage,
    threshold: f64,
) -> Result<MetricOutput> {
    let preds = threshold_preds(preds, threshold);

    match multidim_average {
        MultidimAverage::Global => {
            let flat_preds: Vec<i64> = preds.iter().copied().collect();
            let flat_target: Vec<i64> = target.iter().copied().collect();
            let (t, p) = remove_ignore_index(&flat_target, &flat_preds, ignore_index);
            Ok(MetricOutput::Scalar(scorer.binary(&t, &p)))
        }
        MultidimAverage::Samplewise => {
            let scores: Vec<f64> = preds
                .outer_iter()
                .zip(target.outer_iter())
                .map(|(pred, true_)| {
                    let pred: Vec<i64> = pred.iter().copied().collect();
                    let true_: Vec<i64> = true_.iter().copied().collect();
                    let (t, p) = remove_ignore_index(&true_, &pred, ignore_index);
                    scorer.binary(&t, &p)
                })
                .collect();
            Ok(MetricOutput::Vector(Array1::from(scores)))
        }
    }
}
