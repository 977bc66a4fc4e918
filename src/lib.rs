//! puntaje: precision, recall and F-beta over label tensors
//!
//! Scores binary, multiclass and multilabel predictions held in `ndarray`
//! tensors, with optional ignore-index masking, samplewise reduction of
//! multi-dimensional batches and top-k selection.
//!
//! ## Architecture
//!
//! - `classification`: stat scores, reducer, functional API, stateful metrics
//!   and the task dispatcher
//! - `reference`: independent sklearn-semantics computations used as ground
//!   truth
//! - `config`: serde/YAML metric configuration
//!
//! ## Example
//!
//! ```
//! use ndarray::array;
//! use puntaje::classification::{ClassificationMetric, Metric, Preds};
//! use puntaje::MetricConfig;
//!
//! let config = MetricConfig::new("binary");
//! let mut recall = ClassificationMetric::recall(&config)?;
//!
//! recall.update(&Preds::from(array![0.9, 0.2, 0.7, 0.4]), &array![1_i64, 0, 0, 1].into_dyn())?;
//! recall.update(&Preds::from(array![0.8, 0.1]), &array![1_i64, 1].into_dyn())?;
//!
//! // 2 of 4 positives found
//! assert_eq!(recall.compute().as_scalar(), Some(0.5));
//! # Ok::<(), puntaje::Error>(())
//! ```

pub mod classification;
pub mod config;
pub mod error;
pub mod reference;

pub use config::MetricConfig;
pub use error::{Error, Result};
