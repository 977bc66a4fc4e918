//! Shared fixtures for the parity suites
//!
//! Seeded synthetic batches per task and input kind, ignore-index injection,
//! and runners that check the library against the reference computations.

#![allow(dead_code)]

use ndarray::{concatenate, Array, ArrayD, Axis, IxDyn};
use puntaje::classification::{Metric, MetricOutput, Preds, ScoreKind};
use puntaje::reference::ReferenceScore;
use puntaje::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const NUM_BATCHES: usize = 4;
pub const BATCH_SIZE: usize = 16;
pub const NUM_CLASSES: usize = 5;
pub const EXTRA_DIM: usize = 3;
pub const THRESHOLD: f64 = 0.5;
pub const ATOL: f64 = 1e-6;

/// Batches of predictions and targets
#[derive(Clone, Debug)]
pub struct Input {
    pub preds: Vec<Preds>,
    pub target: Vec<ArrayD<i64>>,
}

impl Input {
    pub fn all_preds(&self) -> Preds {
        concat_preds(&self.preds)
    }

    pub fn all_target(&self) -> ArrayD<i64> {
        concat_labels(&self.target)
    }
}

/// Score under test, paired with its reference scorer
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Score {
    Precision,
    Recall,
    F1,
    F2,
}

impl Score {
    pub fn kind(self) -> ScoreKind {
        match self {
            Self::Precision => ScoreKind::Precision,
            Self::Recall => ScoreKind::Recall,
            Self::F1 => ScoreKind::F1,
            Self::F2 => ScoreKind::FBeta { beta: 2.0 },
        }
    }

    pub fn reference(self) -> ReferenceScore {
        match self {
            Self::Precision => ReferenceScore::Precision,
            Self::Recall => ReferenceScore::Recall,
            Self::F1 => ReferenceScore::F1,
            Self::F2 => ReferenceScore::FBeta(2.0),
        }
    }
}

// =============================================================================
// Input generation
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BinaryCase {
    Labels,
    Probs,
    Logits,
    MultidimLabels,
    MultidimProbs,
    MultidimLogits,
}

impl BinaryCase {
    pub fn is_multidim(self) -> bool {
        matches!(
            self,
            Self::MultidimLabels | Self::MultidimProbs | Self::MultidimLogits
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MulticlassCase {
    Labels,
    Probs,
    Logits,
    MultidimLabels,
    MultidimProbs,
}

impl MulticlassCase {
    pub fn is_multidim(self) -> bool {
        matches!(self, Self::MultidimLabels | Self::MultidimProbs)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MultilabelCase {
    Labels,
    Probs,
    Logits,
    MultidimLabels,
    MultidimProbs,
    MultidimLogits,
}

impl MultilabelCase {
    pub fn is_multidim(self) -> bool {
        matches!(
            self,
            Self::MultidimLabels | Self::MultidimProbs | Self::MultidimLogits
        )
    }
}

fn random_labels(rng: &mut StdRng, shape: &[usize], upper: i64) -> ArrayD<i64> {
    Array::from_shape_simple_fn(IxDyn(shape), || rng.random_range(0..upper))
}

fn random_probs(rng: &mut StdRng, shape: &[usize]) -> ArrayD<f64> {
    Array::from_shape_simple_fn(IxDyn(shape), || rng.random_range(0.001..0.999))
}

fn random_logits(rng: &mut StdRng, shape: &[usize]) -> ArrayD<f64> {
    Array::from_shape_simple_fn(IxDyn(shape), || rng.random_range(-3.0..3.0))
}

/// Normalise along axis 1 so every class lane sums to one
fn softmax_classes(logits: ArrayD<f64>) -> ArrayD<f64> {
    let mut out = logits;
    for mut lane in out.lanes_mut(Axis(1)) {
        let max = lane.fold(f64::NEG_INFINITY, |m, &v| m.max(v));
        lane.mapv_inplace(|v| (v - max).exp());
        let total = lane.sum();
        lane.mapv_inplace(|v| v / total);
    }
    out
}

pub fn binary_input(case: BinaryCase, seed: u64) -> Input {
    let mut rng = StdRng::seed_from_u64(seed);
    let shape: Vec<usize> = if case.is_multidim() {
        vec![BATCH_SIZE, EXTRA_DIM]
    } else {
        vec![BATCH_SIZE]
    };
    let mut input = Input {
        preds: Vec::new(),
        target: Vec::new(),
    };
    for _ in 0..NUM_BATCHES {
        let preds = match case {
            BinaryCase::Labels | BinaryCase::MultidimLabels => {
                Preds::Labels(random_labels(&mut rng, &shape, 2))
            }
            BinaryCase::Probs | BinaryCase::MultidimProbs => {
                Preds::Scores(random_probs(&mut rng, &shape))
            }
            BinaryCase::Logits | BinaryCase::MultidimLogits => {
                Preds::Scores(random_logits(&mut rng, &shape))
            }
        };
        input.preds.push(preds);
        input.target.push(random_labels(&mut rng, &shape, 2));
    }
    input
}

pub fn multiclass_input(case: MulticlassCase, seed: u64) -> Input {
    let mut rng = StdRng::seed_from_u64(seed);
    let n = NUM_CLASSES as i64;
    let mut input = Input {
        preds: Vec::new(),
        target: Vec::new(),
    };
    for _ in 0..NUM_BATCHES {
        let (preds, target) = match case {
            MulticlassCase::Labels => (
                Preds::Labels(random_labels(&mut rng, &[BATCH_SIZE], n)),
                random_labels(&mut rng, &[BATCH_SIZE], n),
            ),
            MulticlassCase::Probs => (
                Preds::Scores(softmax_classes(random_logits(
                    &mut rng,
                    &[BATCH_SIZE, NUM_CLASSES],
                ))),
                random_labels(&mut rng, &[BATCH_SIZE], n),
            ),
            MulticlassCase::Logits => (
                Preds::Scores(random_logits(&mut rng, &[BATCH_SIZE, NUM_CLASSES])),
                random_labels(&mut rng, &[BATCH_SIZE], n),
            ),
            MulticlassCase::MultidimLabels => (
                Preds::Labels(random_labels(&mut rng, &[BATCH_SIZE, EXTRA_DIM], n)),
                random_labels(&mut rng, &[BATCH_SIZE, EXTRA_DIM], n),
            ),
            MulticlassCase::MultidimProbs => (
                Preds::Scores(softmax_classes(random_logits(
                    &mut rng,
                    &[BATCH_SIZE, NUM_CLASSES, EXTRA_DIM],
                ))),
                random_labels(&mut rng, &[BATCH_SIZE, EXTRA_DIM], n),
            ),
        };
        input.preds.push(preds);
        input.target.push(target);
    }
    input
}

pub fn multilabel_input(case: MultilabelCase, seed: u64) -> Input {
    let mut rng = StdRng::seed_from_u64(seed);
    let shape: Vec<usize> = if case.is_multidim() {
        vec![BATCH_SIZE, NUM_CLASSES, EXTRA_DIM]
    } else {
        vec![BATCH_SIZE, NUM_CLASSES]
    };
    let mut input = Input {
        preds: Vec::new(),
        target: Vec::new(),
    };
    for _ in 0..NUM_BATCHES {
        let preds = match case {
            MultilabelCase::Labels | MultilabelCase::MultidimLabels => {
                Preds::Labels(random_labels(&mut rng, &shape, 2))
            }
            MultilabelCase::Probs | MultilabelCase::MultidimProbs => {
                Preds::Scores(random_probs(&mut rng, &shape))
            }
            MultilabelCase::Logits | MultilabelCase::MultidimLogits => {
                Preds::Scores(random_logits(&mut rng, &shape))
            }
        };
        input.preds.push(preds);
        input.target.push(random_labels(&mut rng, &shape, 2));
    }
    input
}

/// Replace a random tenth of the target positions with `ignore_index`.
///
/// Targets that already contain the value are left alone, so an ignore
/// index that is also a valid class masks that class instead.
pub fn inject_ignore_index(input: &mut Input, ignore_index: Option<i64>, seed: u64) {
    let Some(ignore) = ignore_index else {
        return;
    };
    let mut rng = StdRng::seed_from_u64(seed);
    for target in &mut input.target {
        if target.iter().any(|&t| t == ignore) {
            continue;
        }
        for t in target.iter_mut() {
            if rng.random_bool(0.1) {
                *t = ignore;
            }
        }
    }
}

// =============================================================================
// Concatenation
// =============================================================================

pub fn concat_labels(batches: &[ArrayD<i64>]) -> ArrayD<i64> {
    let views: Vec<_> = batches.iter().map(|b| b.view()).collect();
    concatenate(Axis(0), &views).unwrap()
}

pub fn concat_preds(batches: &[Preds]) -> Preds {
    match batches.first() {
        Some(Preds::Labels(_)) => {
            let views: Vec<_> = batches
                .iter()
                .map(|b| match b {
                    Preds::Labels(l) => l.view(),
                    Preds::Scores(_) => panic!("mixed prediction kinds"),
                })
                .collect();
            Preds::Labels(concatenate(Axis(0), &views).unwrap())
        }
        Some(Preds::Scores(_)) => {
            let views: Vec<_> = batches
                .iter()
                .map(|b| match b {
                    Preds::Scores(s) => s.view(),
                    Preds::Labels(_) => panic!("mixed prediction kinds"),
                })
                .collect();
            Preds::Scores(concatenate(Axis(0), &views).unwrap())
        }
        None => panic!("no batches"),
    }
}

// =============================================================================
// Runners
// =============================================================================

pub fn assert_close(actual: &MetricOutput, expected: &MetricOutput, context: &str) {
    assert!(
        actual.all_close(expected, ATOL),
        "{context}: got {actual}, expected {expected}"
    );
}

/// Every batch scored by the functional API matches the reference
pub fn check_functional<F, R>(input: &Input, functional: F, reference: R)
where
    F: Fn(&Preds, &ArrayD<i64>) -> Result<MetricOutput>,
    R: Fn(&Preds, &ArrayD<i64>) -> Result<MetricOutput>,
{
    for (i, (preds, target)) in input.preds.iter().zip(&input.target).enumerate() {
        let actual = functional(preds, target).unwrap();
        let expected = reference(preds, target).unwrap();
        assert_close(&actual, &expected, &format!("batch {i}"));
    }
}

/// Stateful metric checked per batch via `forward` and on the full stream
/// via `compute`.
///
/// With `ddp`, batches are dealt round-robin to two metric instances that
/// are merged before `compute`.
pub fn check_class<M, B, R>(input: &Input, build: B, reference: R, ddp: bool)
where
    M: Metric,
    B: Fn() -> M,
    R: Fn(&Preds, &ArrayD<i64>) -> Result<MetricOutput>,
{
    let expected = reference(&input.all_preds(), &input.all_target()).unwrap();

    if ddp {
        let mut ranks = [build(), build()];
        for (i, (preds, target)) in input.preds.iter().zip(&input.target).enumerate() {
            ranks[i % 2].update(preds, target).unwrap();
        }
        let [mut rank0, rank1] = ranks;
        rank0.merge(&rank1).unwrap();
        assert_eq!(rank0.update_count(), NUM_BATCHES);
        assert_close(&rank0.compute(), &expected, "merged compute");
        return;
    }

    let mut metric = build();
    for (i, (preds, target)) in input.preds.iter().zip(&input.target).enumerate() {
        let batch = metric.forward(preds, target).unwrap();
        let batch_expected = reference(preds, target).unwrap();
        assert_close(&batch, &batch_expected, &format!("forward batch {i}"));
    }
    assert_close(&metric.compute(), &expected, "compute");

    metric.reset();
    assert_eq!(metric.update_count(), 0);
}
