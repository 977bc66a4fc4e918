//! Ignore-index filtering

/// Drop every position whose target equals `ignore_index` from both sequences.
///
/// The same mask is applied to `target` and `preds`, order is preserved and
/// `None` returns the inputs unchanged. Sequences are paired position by
/// position; a longer sequence is truncated to the shorter one.
pub fn remove_ignore_index(
    target: &[i64],
    preds: &[i64],
    ignore_index: Option<i64>,
) -> (Vec<i64>, Vec<i64>) {
    match ignore_index {
        None => (target.to_vec(), preds.to_vec()),
        Some(ignore) => target
            .iter()
            .zip(preds)
            .filter(|&(&t, _)| t != ignore)
            .map(|(&t, &p)| (t, p))
            .unzip(),
    }
}
