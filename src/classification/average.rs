//! Averaging strategies for multi-class and multi-label scores

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How per-class scores are combined into the final result
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Average {
    /// Calculate metrics globally by counting total TP, FP, FN
    Micro,
    /// Calculate metrics for each label, return unweighted mean
    #[default]
    Macro,
    /// Weighted mean by support (TP + FN per label)
    Weighted,
    /// Return metrics per class (no averaging)
    None,
}

impl FromStr for Average {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "micro" => Ok(Self::Micro),
            "macro" => Ok(Self::Macro),
            "weighted" => Ok(Self::Weighted),
            "none" | "None" => Ok(Self::None),
            other => Err(Error::invalid_argument(
                "average",
                format!("'{other}' (must be one of: micro, macro, weighted, none)"),
            )),
        }
    }
}

impl fmt::Display for Average {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Micro => "micro",
            Self::Macro => "macro",
            Self::Weighted => "weighted",
            Self::None => "none",
        };
        f.write_str(name)
    }
}

/// How extra (non-class) dimensions of a batch are reduced
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MultidimAverage {
    /// Flatten every non-class dimension into one pool of observations
    #[default]
    Global,
    /// Score every batch element independently
    Samplewise,
}

impl FromStr for MultidimAverage {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "global" => Ok(Self::Global),
            "samplewise" => Ok(Self::Samplewise),
            other => Err(Error::invalid_argument(
                "multidim_average",
                format!("'{other}' (must be one of: global, samplewise)"),
            )),
        }
    }
}

impl fmt::Display for MultidimAverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Global => f.write_str("global"),
            Self::Samplewise => f.write_str("samplewise"),
        }
    }
}
