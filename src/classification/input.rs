//! Prediction tensors and the shape normalizer
//!
//! Every task reshapes its inputs into a fixed low-rank layout before any
//! counting happens:
//!
//! - binary: `[N, M]` hard 0/1 predictions against `[N, M]` targets
//! - multiclass: `[N, M, C]` predicted-class indicators against `[N, M]` targets
//! - multilabel: `[N, L, M]` hard 0/1 predictions against `[N, L, M]` targets
//!
//! where `M` is the product of all trailing (spatial) dimensions.

use super::average::MultidimAverage;
use super::top_k::{argmax, top_k_hits};
use crate::error::{Error, Result};
use ndarray::{s, Array, Array2, Array3, ArrayD, Dimension, IxDyn};

/// Prediction tensor: hard labels or soft scores
#[derive(Clone, Debug, PartialEq)]
pub enum Preds {
    /// Integer labels (0/1 for binary and multilabel, class index for multiclass)
    Labels(ArrayD<i64>),
    /// Probabilities or logits
    Scores(ArrayD<f64>),
}

impl Preds {
    /// Shape of the underlying tensor
    pub fn shape(&self) -> &[usize] {
        match self {
            Self::Labels(a) => a.shape(),
            Self::Scores(a) => a.shape(),
        }
    }

    /// Number of dimensions
    pub fn ndim(&self) -> usize {
        self.shape().len()
    }

    /// Whether the predictions are floating point scores
    pub fn is_scores(&self) -> bool {
        matches!(self, Self::Scores(_))
    }
}

impl<D: Dimension> From<Array<i64, D>> for Preds {
    fn from(value: Array<i64, D>) -> Self {
        Self::Labels(value.into_dyn())
    }
}

impl<D: Dimension> From<Array<f64, D>> for Preds {
    fn from(value: Array<f64, D>) -> Self {
        Self::Scores(value.into_dyn())
    }
}

impl<D: Dimension> From<Array<f32, D>> for Preds {
    fn from(value: Array<f32, D>) -> Self {
        Self::Scores(value.mapv(f64::from).into_dyn())
    }
}

/// Logistic function
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Convert predictions to hard 0/1 labels.
///
/// Scores that are not all strictly inside (0, 1) are treated as logits and
/// passed through [`sigmoid`] first. Labels are returned unchanged.
pub fn binarize(preds: &Preds, threshold: f64) -> ArrayD<i64> {
    match preds {
        Preds::Labels(labels) => labels.clone(),
        Preds::Scores(scores) => {
            let probabilities = scores.iter().all(|&p| p > 0.0 && p < 1.0);
            if !probabilities {
                log::debug!("scores outside (0, 1), applying sigmoid before thresholding");
            }
            scores.mapv(|p| {
                let p = if probabilities { p } else { sigmoid(p) };
                i64::from(p >= threshold)
            })
        }
    }
}

/// Collapse `[N, ...]` into `[N, M]`; a scalar becomes `[1, 1]`
pub fn flatten_samples<T: Clone>(a: &ArrayD<T>) -> Result<Array2<T>> {
    let (n, rest) = match a.shape() {
        [] => (1, 1),
        [n, tail @ ..] => (*n, tail.iter().product()),
    };
    Array2::from_shape_vec((n, rest), a.iter().cloned().collect()).map_err(|_| {
        Error::ShapeMismatch {
            expected: vec![n, rest],
            actual: a.shape().to_vec(),
        }
    })
}

/// Collapse `[N, C, ...]` into `[N, C, M]`
pub fn flatten_trailing<T: Clone>(a: &ArrayD<T>) -> Result<Array3<T>> {
    let shape = a.shape();
    if shape.len() < 2 {
        return Err(Error::invalid_argument(
            "preds",
            format!("expected at least 2 dimensions [N, C, ...], got {shape:?}"),
        ));
    }
    let (n, c) = (shape[0], shape[1]);
    let rest = shape[2..].iter().product();
    Array3::from_shape_vec((n, c, rest), a.iter().cloned().collect()).map_err(|_| {
        Error::ShapeMismatch {
            expected: vec![n, c, rest],
            actual: shape.to_vec(),
        }
    })
}

/// Move the class axis of `[N, C, ...]` scores to the end: `[N, M, C]`
pub fn class_axis_last(scores: &ArrayD<f64>) -> Result<Array3<f64>> {
    let shape = scores.shape();
    if shape.len() < 2 {
        return Err(Error::invalid_argument(
            "preds",
            format!("score tensor needs a class axis, got shape {shape:?}"),
        ));
    }
    let (n, c) = (shape[0], shape[1]);
    let rest = shape[2..].iter().product();
    let mut axes: Vec<usize> = (0..shape.len()).collect();
    let class_axis = axes.remove(1);
    axes.push(class_axis);
    let moved = scores.view().permuted_axes(IxDyn(&axes));
    Array3::from_shape_vec((n, rest, c), moved.iter().copied().collect()).map_err(|_| {
        Error::ShapeMismatch {
            expected: vec![n, rest, c],
            actual: shape.to_vec(),
        }
    })
}

pub(crate) fn check_same_shape(expected: &[usize], actual: &[usize]) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(Error::ShapeMismatch {
            expected: expected.to_vec(),
            actual: actual.to_vec(),
        })
    }
}

fn check_samplewise(multidim_average: MultidimAverage, ndim: usize, min_ndim: usize) -> Result<()> {
    if multidim_average == MultidimAverage::Samplewise && ndim < min_ndim {
        return Err(Error::invalid_argument(
            "multidim_average",
            format!("samplewise needs inputs with at least {min_ndim} dimensions, got {ndim}"),
        ));
    }
    Ok(())
}

fn check_labels<'a>(
    tensor: &'static str,
    values: impl IntoIterator<Item = &'a i64>,
    upper: i64,
    ignore_index: Option<i64>,
) -> Result<()> {
    for &value in values {
        if Some(value) == ignore_index {
            continue;
        }
        if !(0..upper).contains(&value) {
            let message = match ignore_index {
                Some(ignore) => format!("expected a value in [0, {upper}) or ignore_index {ignore}"),
                None => format!("expected a value in [0, {upper})"),
            };
            return Err(Error::InvalidLabel {
                tensor,
                value,
                message,
            });
        }
    }
    Ok(())
}

/// Binary inputs normalised to `[N, M]`
pub(crate) fn format_binary(
    preds: &Preds,
    target: &ArrayD<i64>,
    threshold: f64,
    multidim_average: MultidimAverage,
    ignore_index: Option<i64>,
) -> Result<(Array2<i64>, Array2<i64>)> {
    check_same_shape(target.shape(), preds.shape())?;
    check_samplewise(multidim_average, target.ndim(), 2)?;
    check_labels("target", target.iter(), 2, ignore_index)?;
    if let Preds::Labels(labels) = preds {
        check_labels("preds", labels.iter(), 2, None)?;
    }

    let hard = binarize(preds, threshold);
    Ok((flatten_samples(&hard)?, flatten_samples(target)?))
}

/// Multiclass inputs normalised to `[N, M, C]` indicators and `[N, M]` targets
pub(crate) fn format_multiclass(
    preds: &Preds,
    target: &ArrayD<i64>,
    num_classes: usize,
    top_k: usize,
    multidim_average: MultidimAverage,
    ignore_index: Option<i64>,
) -> Result<(Array3<bool>, Array2<i64>)> {
    check_samplewise(multidim_average, target.ndim(), 2)?;
    check_labels("target", target.iter(), num_classes as i64, ignore_index)?;
    let flat_target = flatten_samples(target)?;
    let (n, m) = flat_target.dim();

    let hits = match preds {
        Preds::Scores(scores) if target.ndim() >= 1 && scores.ndim() == target.ndim() + 1 => {
            let mut expected = target.shape().to_vec();
            expected.insert(1, num_classes);
            check_same_shape(&expected, scores.shape())?;
            let moved = class_axis_last(scores)?;
            let mut hits = Array3::from_elem((n, m, num_classes), false);
            for i in 0..n {
                for j in 0..m {
                    let lane = moved.slice(s![i, j, ..]);
                    if top_k == 1 {
                        hits[[i, j, argmax(lane)]] = true;
                    } else {
                        hits.slice_mut(s![i, j, ..]).assign(&top_k_hits(lane, top_k));
                    }
                }
            }
            hits
        }
        Preds::Scores(scores) => {
            return Err(Error::invalid_argument(
                "preds",
                format!(
                    "floating point predictions need a class axis: expected shape {:?} with {num_classes} classes at axis 1, got {:?}",
                    target.shape(),
                    scores.shape()
                ),
            ));
        }
        Preds::Labels(labels) => {
            if top_k > 1 {
                return Err(Error::invalid_argument(
                    "top_k",
                    format!("{top_k} needs score predictions with a class axis, got hard labels"),
                ));
            }
            check_same_shape(target.shape(), labels.shape())?;
            check_labels("preds", labels.iter(), num_classes as i64, None)?;
            let flat_preds = flatten_samples(labels)?;
            let mut hits = Array3::from_elem((n, m, num_classes), false);
            for ((i, j), &label) in flat_preds.indexed_iter() {
                // range checked above
                hits[[i, j, label as usize]] = true;
            }
            hits
        }
    };
    Ok((hits, flat_target))
}

/// Multilabel inputs normalised to `[N, L, M]`
pub(crate) fn format_multilabel(
    preds: &Preds,
    target: &ArrayD<i64>,
    num_labels: usize,
    threshold: f64,
    multidim_average: MultidimAverage,
    ignore_index: Option<i64>,
) -> Result<(Array3<i64>, Array3<i64>)> {
    check_same_shape(target.shape(), preds.shape())?;
    if target.ndim() < 2 || target.shape()[1] != num_labels {
        let mut expected = vec![target.shape().first().copied().unwrap_or(0), num_labels];
        expected.extend(target.shape().iter().skip(2));
        return Err(Error::ShapeMismatch {
            expected,
            actual: target.shape().to_vec(),
        });
    }
    check_samplewise(multidim_average, target.ndim(), 3)?;
    check_labels("target", target.iter(), 2, ignore_index)?;
    if let Preds::Labels(labels) = preds {
        check_labels("preds", labels.iter(), 2, None)?;
    }

    let hard = binarize(preds, threshold);
    Ok((flatten_trailing(&hard)?, flatten_trailing(target)?))
}
