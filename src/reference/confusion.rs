//! Label-indexed confusion matrix

use std::collections::BTreeSet;
use std::fmt;

/// Confusion matrix over an explicit label list
///
/// Element [i][j] counts samples whose true label is `labels[i]` and whose
/// predicted label is `labels[j]`. Pairs with a label outside the list are
/// not counted.
#[derive(Clone, Debug)]
pub struct ConfusionMatrix {
    /// The matrix data: matrix[true_idx][pred_idx] = count
    matrix: Vec<Vec<usize>>,
    /// Label value of every row/column
    labels: Vec<i64>,
}

impl ConfusionMatrix {
    /// Build from paired labels.
    ///
    /// Without an explicit list the labels are the sorted union of values
    /// seen in either sequence.
    pub fn from_labels(y_true: &[i64], y_pred: &[i64], labels: Option<&[i64]>) -> Self {
        let labels: Vec<i64> = match labels {
            Some(labels) => labels.to_vec(),
            None => y_true
                .iter()
                .chain(y_pred.iter())
                .copied()
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect(),
        };
        let n = labels.len();
        let mut matrix = vec![vec![0; n]; n];
        let index_of = |value: i64| labels.iter().position(|&l| l == value);

        for (&t, &p) in y_true.iter().zip(y_pred.iter()) {
            if let (Some(i), Some(j)) = (index_of(t), index_of(p)) {
                matrix[i][j] += 1;
            }
        }

        Self { matrix, labels }
    }

    /// Get the raw matrix
    pub fn matrix(&self) -> &Vec<Vec<usize>> {
        &self.matrix
    }

    pub fn labels(&self) -> &[i64] {
        &self.labels
    }

    pub fn n_classes(&self) -> usize {
        self.labels.len()
    }

    /// Row/column index of a label value
    pub fn index_of(&self, label: i64) -> Option<usize> {
        self.labels.iter().position(|&l| l == label)
    }

    /// Get element at [true_idx][pred_idx]
    pub fn get(&self, true_idx: usize, pred_idx: usize) -> usize {
        self.matrix[true_idx][pred_idx]
    }

    pub fn true_positives(&self, class: usize) -> usize {
        self.matrix[class][class]
    }

    /// Predicted as class but wasn't
    pub fn false_positives(&self, class: usize) -> usize {
        (0..self.n_classes())
            .filter(|&i| i != class)
            .map(|i| self.matrix[i][class])
            .sum()
    }

    /// Was class but predicted differently
    pub fn false_negatives(&self, class: usize) -> usize {
        (0..self.n_classes())
            .filter(|&j| j != class)
            .map(|j| self.matrix[class][j])
            .sum()
    }

    /// Support (total true instances) for a class
    pub fn support(&self, class: usize) -> usize {
        self.matrix[class].iter().sum()
    }

    pub fn total(&self) -> usize {
        self.matrix.iter().flatten().sum()
    }
}

impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Confusion Matrix:")?;

        write!(f, "        ")?;
        for label in &self.labels {
            write!(f, "Pred {label:<3}")?;
        }
        writeln!(f)?;

        for (i, label) in self.labels.iter().enumerate() {
            write!(f, "True {label:<3}")?;
            for j in 0..self.n_classes() {
                write!(f, "{:>7} ", self.matrix[i][j])?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
