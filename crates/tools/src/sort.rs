//! Missing-aware sorting.

/// Output of [`nan_sort`].
#[derive(Debug, Clone, PartialEq)]
pub struct NanSorted {
    /// Present values in ascending order.
    pub sorted: Vec<f64>,
    /// Number of missing entries that were dropped.
    pub n_removed: usize,
}

/// Drops missing entries and sorts the rest in ascending order.
///
/// The sort is stable, so equal values keep their input order.
pub fn nan_sort(values: &[Option<f64>]) -> NanSorted {
    let mut sorted: Vec<f64> = values.iter().flatten().copied().collect();
    let n_removed = values.len() - sorted.len();
    sorted.sort_by(f64::total_cmp);
    NanSorted { sorted, n_removed }
}
