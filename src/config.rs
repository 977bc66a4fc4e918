//! Declarative metric configuration
//!
//! A [`MetricConfig`] mirrors the keyword arguments of the task wrapper: the
//! task is kept as a plain string so that an unknown task is reported by the
//! dispatcher instead of the deserializer.
//!
//! ```yaml
//! task: multiclass
//! num_classes: 5
//! average: weighted
//! ignore_index: -1
//! ```

use crate::classification::{
    Average, BinaryArgs, MulticlassArgs, MultidimAverage, MultilabelArgs, DEFAULT_THRESHOLD,
};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Task-agnostic metric configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricConfig {
    /// `binary`, `multiclass` or `multilabel`
    pub task: String,
    /// Required for `multiclass`
    pub num_classes: Option<usize>,
    /// Required for `multilabel`
    pub num_labels: Option<usize>,
    pub threshold: f64,
    pub top_k: usize,
    pub average: Average,
    pub multidim_average: MultidimAverage,
    pub ignore_index: Option<i64>,
}

impl Default for MetricConfig {
    fn default() -> Self {
        Self {
            task: "binary".to_string(),
            num_classes: None,
            num_labels: None,
            threshold: DEFAULT_THRESHOLD,
            top_k: 1,
            average: Average::Micro,
            multidim_average: MultidimAverage::Global,
            ignore_index: None,
        }
    }
}

impl MetricConfig {
    /// Defaults for the given task string
    pub fn new(task: impl Into<String>) -> Self {
        Self {
            task: task.into(),
            ..Self::default()
        }
    }

    /// Parse a YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| Error::Config(format!("Failed to parse YAML metric config: {e}")))
    }

    pub fn with_num_classes(mut self, num_classes: usize) -> Self {
        self.num_classes = Some(num_classes);
        self
    }

    pub fn with_num_labels(mut self, num_labels: usize) -> Self {
        self.num_labels = Some(num_labels);
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_average(mut self, average: Average) -> Self {
        self.average = average;
        self
    }

    pub fn with_multidim_average(mut self, multidim_average: MultidimAverage) -> Self {
        self.multidim_average = multidim_average;
        self
    }

    pub fn with_ignore_index(mut self, ignore_index: Option<i64>) -> Self {
        self.ignore_index = ignore_index;
        self
    }

    pub fn binary_args(&self) -> BinaryArgs {
        BinaryArgs {
            threshold: self.threshold,
            multidim_average: self.multidim_average,
            ignore_index: self.ignore_index,
        }
    }

    pub fn multiclass_args(&self) -> Result<MulticlassArgs> {
        let num_classes = self.num_classes.ok_or_else(|| {
            Error::invalid_argument("num_classes", "required when task is 'multiclass'")
        })?;
        Ok(MulticlassArgs {
            num_classes,
            average: self.average,
            top_k: self.top_k,
            multidim_average: self.multidim_average,
            ignore_index: self.ignore_index,
        })
    }

    pub fn multilabel_args(&self) -> Result<MultilabelArgs> {
        let num_labels = self.num_labels.ok_or_else(|| {
            Error::invalid_argument("num_labels", "required when task is 'multilabel'")
        })?;
        Ok(MultilabelArgs {
            num_labels,
            threshold: self.threshold,
            average: self.average,
            multidim_average: self.multidim_average,
            ignore_index: self.ignore_index,
        })
    }
}
