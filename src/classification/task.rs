//! Task kinds and score kinds

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Classification task a metric is specialised for
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Task {
    /// One positive class, predictions are probabilities/logits or 0/1 labels
    Binary,
    /// Exactly one of `num_classes` labels per observation
    Multiclass,
    /// Any subset of `num_labels` labels per observation
    Multilabel,
}

impl FromStr for Task {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "binary" => Ok(Self::Binary),
            "multiclass" => Ok(Self::Multiclass),
            "multilabel" => Ok(Self::Multilabel),
            other => Err(Error::InvalidTask(other.to_string())),
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Binary => f.write_str("binary"),
            Self::Multiclass => f.write_str("multiclass"),
            Self::Multilabel => f.write_str("multilabel"),
        }
    }
}

/// Which statistic is derived from the TP/FP/FN counts
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreKind {
    /// TP / (TP + FP)
    Precision,
    /// TP / (TP + FN)
    Recall,
    /// (1 + β²)·P·R / (β²·P + R)
    FBeta { beta: f64 },
}

impl ScoreKind {
    /// F1 is F-beta with β = 1
    pub const F1: ScoreKind = ScoreKind::FBeta { beta: 1.0 };

    /// Get score name as string
    pub fn name(&self) -> &'static str {
        match self {
            Self::Precision => "Precision",
            Self::Recall => "Recall",
            Self::FBeta { beta } if *beta == 1.0 => "F1Score",
            Self::FBeta { .. } => "FBetaScore",
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        match self {
            Self::FBeta { beta } if !(beta.is_finite() && *beta > 0.0) => Err(
                Error::invalid_argument("beta", format!("{beta} (must be a finite float > 0)")),
            ),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for ScoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FBeta { beta } if *beta != 1.0 => write!(f, "FBetaScore(beta={beta})"),
            _ => f.write_str(self.name()),
        }
    }
}
