#[cfg(test)]
mod tests {
    use crate::classification::{Average, MetricOutput, MultidimAverage, Preds};
    use crate::error::Error;
    use crate::reference::{
        reference_binary, reference_multiclass, reference_multilabel, remove_ignore_index,
        ConfusionMatrix, ReferenceScore,
    };
    use approx::assert_abs_diff_eq;
    use ndarray::{array, ArrayD, IxDyn};

    // =========================================================================
    // Ignore-index filter
    // =========================================================================

    #[test]
    fn test_filter_none_is_identity() {
        let (t, p) = remove_ignore_index(&[0, -1, 1], &[1, 1, 0], None);
        assert_eq!(t, vec![0, -1, 1]);
        assert_eq!(p, vec![1, 1, 0]);
    }

    #[test]
    fn test_filter_drops_positions_from_both() {
        let (t, p) = remove_ignore_index(&[0, -1, 1, -1, 2], &[5, 6, 7, 8, 9], Some(-1));
        assert_eq!(t, vec![0, 1, 2]);
        assert_eq!(p, vec![5, 7, 9]);
    }

    #[test]
    fn test_filter_idempotent() {
        let target = [3, 0, 3, 1, 3];
        let preds = [1, 1, 0, 0, 1];
        let once = remove_ignore_index(&target, &preds, Some(3));
        let twice = remove_ignore_index(&once.0, &once.1, Some(3));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_filter_everything_ignored() {
        let (t, p) = remove_ignore_index(&[0, 0], &[1, 0], Some(0));
        assert!(t.is_empty());
        assert!(p.is_empty());
    }

    // =========================================================================
    // Confusion matrix
    // =========================================================================

    #[test]
    fn test_confusion_matrix_counts() {
        let y_true = [0, 0, 1, 1, 2, 2, 0, 1, 2];
        let y_pred = [0, 1, 1, 2, 2, 0, 0, 1, 2];
        let cm = ConfusionMatrix::from_labels(&y_true, &y_pred, None);

        assert_eq!(cm.labels(), &[0, 1, 2]);
        assert_eq!(cm.total(), 9);
        assert_eq!(cm.true_positives(0), 2);
        assert_eq!(cm.false_positives(0), 1);
        assert_eq!(cm.false_negatives(0), 1);
        assert_eq!(cm.support(1), 3);
        assert_eq!(cm.get(1, 2), 1);
    }

    #[test]
    fn test_confusion_matrix_explicit_labels_skip_others() {
        // label 2 is not in the list, so its pair is dropped
        let cm = ConfusionMatrix::from_labels(&[0, 1, 2], &[1, 1, 1], Some(&[0, 1][..]));
        assert_eq!(cm.n_classes(), 2);
        assert_eq!(cm.total(), 2);
        assert_eq!(cm.index_of(1), Some(1));
        assert_eq!(cm.index_of(2), None);
    }

    #[test]
    fn test_confusion_matrix_sparse_labels() {
        let cm = ConfusionMatrix::from_labels(&[4, 9], &[9, 9], None);
        assert_eq!(cm.labels(), &[4, 9]);
        assert_eq!(cm.matrix(), &vec![vec![0, 1], vec![0, 1]]);
    }

    #[test]
    fn test_confusion_matrix_display() {
        let cm = ConfusionMatrix::from_labels(&[0, 1], &[0, 0], None);
        let output = format!("{cm}");
        assert!(output.contains("Confusion Matrix"));
        assert!(output.contains("Pred 0"));
        assert!(output.contains("True 1"));
    }

    // =========================================================================
    // Scorer
    // =========================================================================

    #[test]
    fn test_scorer_binary() {
        let y_true = [1, 0, 1, 1, 0];
        let y_pred = [1, 1, 0, 1, 0];
        assert_abs_diff_eq!(ReferenceScore::Precision.binary(&y_true, &y_pred), 2.0 / 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(ReferenceScore::Recall.binary(&y_true, &y_pred), 2.0 / 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(ReferenceScore::F1.binary(&y_true, &y_pred), 2.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_scorer_binary_zero_division() {
        assert_eq!(ReferenceScore::Precision.binary(&[1, 1], &[0, 0]), 0.0);
        assert_eq!(ReferenceScore::Recall.binary(&[0, 0], &[1, 0]), 0.0);
        assert_eq!(ReferenceScore::FBeta(2.0).binary(&[], &[]), 0.0);
    }

    #[test]
    fn test_scorer_multiclass_macro() {
        // sklearn: precision_score(..., average='macro') = 0.6666666666666666
        let y_true = [0, 0, 1, 1, 2, 2, 0, 1, 2];
        let y_pred = [0, 1, 1, 2, 2, 0, 0, 1, 2];
        let p = ReferenceScore::Precision.multiclass(&y_true, &y_pred, Average::Macro, None);
        assert_abs_diff_eq!(p.as_scalar().unwrap(), 2.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_scorer_multiclass_labels_present_only() {
        // class 2 is absent from both sequences, so it does not dilute the mean
        let p = ReferenceScore::Recall.multiclass(&[0, 1], &[0, 0], Average::Macro, None);
        assert_abs_diff_eq!(p.as_scalar().unwrap(), 0.5, epsilon = 1e-12);

        let per_class =
            ReferenceScore::Recall.multiclass(&[0, 1], &[0, 0], Average::None, Some(&[0, 1, 2][..]));
        assert_eq!(per_class.to_vec(), vec![1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_scorer_multiclass_weighted() {
        // support 2, 2, 1; recall 0.5, 0.5, 1
        let y_true = [0, 1, 0, 2, 1];
        let y_pred = [0, 1, 1, 2, 0];
        let r = ReferenceScore::Recall.multiclass(&y_true, &y_pred, Average::Weighted, None);
        assert_abs_diff_eq!(r.as_scalar().unwrap(), 0.6, epsilon = 1e-12);
    }

    #[test]
    fn test_scorer_indicator() {
        let y_true = array![[1_i64, 0], [1, 1], [0, 0]];
        let y_pred = array![[1_i64, 1], [0, 1], [0, 0]];
        let micro = ReferenceScore::Precision.indicator(y_true.view(), y_pred.view(), Average::Micro);
        assert_abs_diff_eq!(micro.as_scalar().unwrap(), 2.0 / 3.0, epsilon = 1e-12);
        let none = ReferenceScore::Recall.indicator(y_true.view(), y_pred.view(), Average::None);
        assert_eq!(none.to_vec(), vec![0.5, 1.0]);
    }

    // =========================================================================
    // Reference entry points
    // =========================================================================

    #[test]
    fn test_reference_binary_logits_and_ignore() {
        // sigmoid: [0.12, 0.88, 0.73, 0.27]
        let preds = Preds::from(array![-2.0, 2.0, 1.0, -1.0]);
        let target = array![0_i64, 1, -1, 1].into_dyn();
        let p = reference_binary(
            &preds,
            &target,
            ReferenceScore::Recall,
            Some(-1),
            MultidimAverage::Global,
            0.5,
        )
        .unwrap();
        assert_eq!(p, MetricOutput::Scalar(0.5));
    }

    #[test]
    fn test_reference_binary_samplewise() {
        let preds = Preds::from(array![[1_i64, 0], [1, 1]]);
        let target = array![[1_i64, 1], [0, 1]].into_dyn();
        let p = reference_binary(
            &preds,
            &target,
            ReferenceScore::Precision,
            None,
            MultidimAverage::Samplewise,
            0.5,
        )
        .unwrap();
        assert_eq!(p.to_vec(), vec![1.0, 0.5]);
    }

    #[test]
    fn test_reference_multiclass_scores_argmax() {
        let preds = Preds::from(array![[0.1, 0.8, 0.1], [0.6, 0.3, 0.1], [0.2, 0.2, 0.6]]);
        let target = array![1_i64, 1, 2].into_dyn();
        let r = reference_multiclass(
            &preds,
            &target,
            ReferenceScore::Recall,
            None,
            MultidimAverage::Global,
            Average::None,
            3,
        )
        .unwrap();
        assert_eq!(r.to_vec(), vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_reference_multiclass_samplewise_none_matrix() {
        let preds = Preds::from(array![[0_i64, 1], [2, 2]]);
        let target = array![[0_i64, 1], [2, 1]].into_dyn();
        let p = reference_multiclass(
            &preds,
            &target,
            ReferenceScore::Precision,
            None,
            MultidimAverage::Samplewise,
            Average::None,
            3,
        )
        .unwrap();
        assert_eq!(p.shape(), vec![2, 3]);
        assert_eq!(p.to_vec(), vec![1.0, 1.0, 0.0, 0.0, 0.0, 0.5]);
    }

    #[test]
    fn test_reference_multiclass_scalar_target_is_error() {
        let preds = Preds::from(array![0.2, 0.7, 0.1]);
        let target = ndarray::arr0(1_i64).into_dyn();
        let result = reference_multiclass(
            &preds,
            &target,
            ReferenceScore::Precision,
            None,
            MultidimAverage::Global,
            Average::Macro,
            3,
        );
        assert!(matches!(result, Err(Error::InvalidArgument { name: "preds", .. })));
    }

    #[test]
    fn test_reference_multiclass_scores_without_class_axis() {
        // same shape as target: no class axis to arg-max over
        let preds = Preds::from(array![0.9, 1.2, 2.0]);
        let target = array![0_i64, 1, 2].into_dyn();
        let result = reference_multiclass(
            &preds,
            &target,
            ReferenceScore::Recall,
            None,
            MultidimAverage::Global,
            Average::Micro,
            3,
        );
        assert!(matches!(result, Err(Error::InvalidArgument { name: "preds", .. })));
    }

    #[test]
    fn test_reference_multilabel_global_macro() {
        let preds = Preds::from(array![[1_i64, 0, 0], [1, 1, 0]]);
        let target = array![[1_i64, 0, 0], [0, 1, 0]].into_dyn();
        let p = reference_multilabel(
            &preds,
            &target,
            ReferenceScore::Precision,
            None,
            MultidimAverage::Global,
            Average::Macro,
            3,
            0.5,
        )
        .unwrap();
        assert_abs_diff_eq!(p.as_scalar().unwrap(), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_reference_multilabel_ignore_weighted() {
        // label 0: target [1, -1] -> one kept positive, predicted
        // label 1: target [-1, 0] -> no positives, weight 0
        let preds = Preds::from(array![[1_i64, 1], [0, 1]]);
        let target = array![[1_i64, -1], [-1, 0]].into_dyn();
        let f1 = reference_multilabel(
            &preds,
            &target,
            ReferenceScore::F1,
            Some(-1),
            MultidimAverage::Global,
            Average::Weighted,
            2,
            0.5,
        )
        .unwrap();
        assert_abs_diff_eq!(f1.as_scalar().unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_reference_multilabel_shape_mismatch() {
        let preds = Preds::from(ArrayD::<i64>::zeros(IxDyn(&[2, 3])));
        let target = ArrayD::<i64>::zeros(IxDyn(&[2, 3]));
        let err = reference_multilabel(
            &preds,
            &target,
            ReferenceScore::Recall,
            None,
            MultidimAverage::Global,
            Average::Macro,
            4,
            0.5,
        );
        assert!(err.is_err());
    }
}
