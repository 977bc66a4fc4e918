//! Score values returned by functional and stateful metrics

use ndarray::{Array1, Array2};
use serde::Serialize;
use std::fmt;

/// Result of a score computation
///
/// The variant depends on the task, the averaging mode and the
/// multidim-average mode:
///
/// | task                 | global        | samplewise      |
/// |----------------------|---------------|-----------------|
/// | binary               | `Scalar`      | `Vector` `[N]`  |
/// | multi*, averaged     | `Scalar`      | `Vector` `[N]`  |
/// | multi*, `Average::None` | `Vector` `[C]` | `Matrix` `[N, C]` |
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetricOutput {
    Scalar(f64),
    Vector(Array1<f64>),
    Matrix(Array2<f64>),
}

impl MetricOutput {
    /// The value if this is a scalar
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Self::Scalar(v) => Some(*v),
            _ => None,
        }
    }

    /// The values if this is a vector
    pub fn as_vector(&self) -> Option<&Array1<f64>> {
        match self {
            Self::Vector(v) => Some(v),
            _ => None,
        }
    }

    /// The values if this is a matrix
    pub fn as_matrix(&self) -> Option<&Array2<f64>> {
        match self {
            Self::Matrix(m) => Some(m),
            _ => None,
        }
    }

    /// Shape of the output, empty for scalars
    pub fn shape(&self) -> Vec<usize> {
        match self {
            Self::Scalar(_) => Vec::new(),
            Self::Vector(v) => vec![v.len()],
            Self::Matrix(m) => m.shape().to_vec(),
        }
    }

    /// All values in row-major order
    pub fn to_vec(&self) -> Vec<f64> {
        match self {
            Self::Scalar(v) => vec![*v],
            Self::Vector(v) => v.to_vec(),
            Self::Matrix(m) => m.iter().copied().collect(),
        }
    }

    /// Element-wise comparison with absolute tolerance, shapes must agree
    pub fn all_close(&self, other: &MetricOutput, atol: f64) -> bool {
        self.shape() == other.shape()
            && self
                .to_vec()
                .iter()
                .zip(other.to_vec())
                .all(|(a, b)| (a - b).abs() <= atol)
    }
}

impl From<f64> for MetricOutput {
    fn from(value: f64) -> Self {
        Self::Scalar(value)
    }
}

impl From<Array1<f64>> for MetricOutput {
    fn from(value: Array1<f64>) -> Self {
        Self::Vector(value)
    }
}

impl From<Array2<f64>> for MetricOutput {
    fn from(value: Array2<f64>) -> Self {
        Self::Matrix(value)
    }
}

impl fmt::Display for MetricOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(v) => write!(f, "{v:.6}"),
            Self::Vector(v) => write!(f, "{v:.6}"),
            Self::Matrix(m) => write!(f, "{m:.6}"),
        }
    }
}
