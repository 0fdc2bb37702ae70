//! Tie-group counting for the Kendall variance correction.

use crate::sort::nan_sort;

/// Run lengths of equal consecutive values in a sorted, missing-free slice.
///
/// `[1, 1, 1, 2, 2, 5]` gives `[3, 2, 1]`. Runs of length 1 contribute
/// nothing to the variance correction but are kept so the counts sum to
/// the input length.
pub fn tie_counts(sorted: &[f64]) -> Vec<usize> {
    let mut counts = Vec::new();
    let mut iter = sorted.iter();
    let Some(&first) = iter.next() else {
        return counts;
    };

    let mut current = first;
    let mut run = 1;
    for &x in iter {
        if x == current {
            run += 1;
        } else {
            counts.push(run);
            current = x;
            run = 1;
        }
    }
    counts.push(run);
    counts
}

/// Tie groups of the present values in `data`.
///
/// With `resolution <= 0` two values tie only when exactly equal. With a
/// positive resolution the range `[min, max]` is cut into bins of width
/// `resolution` starting at `min` (the last bin is closed on the right) and
/// every occupied bin is one tie group, so values closer than the instrument
/// resolution count as equal. Empty bins are left out.
///
/// If every present value is identical the single group `[n_valid]` is
/// returned. No present values gives an empty vector.
pub fn nb_tie(data: &[Option<f64>], resolution: f64) -> Vec<usize> {
    let sorted = nan_sort(data).sorted;
    let (Some(&min), Some(&max)) = (sorted.first(), sorted.last()) else {
        return Vec::new();
    };
    if min == max {
        return vec![sorted.len()];
    }
    if resolution.is_nan() || resolution <= 0.0 {
        return tie_counts(&sorted);
    }

    let last_bin = (((max - min) / resolution).ceil() - 1.0).max(0.0);
    let bins: Vec<f64> = sorted
        .iter()
        .map(|&x| ((x - min) / resolution).floor().min(last_bin))
        .collect();
    bins.chunk_by(|a, b| a == b).map(<[f64]>::len).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn some(data: &[f64]) -> Vec<Option<f64>> {
        data.iter().map(|&x| Some(x)).collect()
    }

    #[test]
    fn tie_counts_runs() {
        assert_eq!(tie_counts(&[1.0, 1.0, 1.0, 2.0, 2.0, 5.0]), vec![3, 2, 1]);
    }

    #[test]
    fn tie_counts_empty_and_single() {
        assert!(tie_counts(&[]).is_empty());
        assert_eq!(tie_counts(&[4.0]), vec![1]);
    }

    #[test]
    fn nb_tie_exact() {
        let data = some(&[5.0, 1.0, 2.0, 1.0, 2.0, 1.0]);
        assert_eq!(nb_tie(&data, 0.0), vec![3, 2, 1]);
    }

    #[test]
    fn nb_tie_identical_values() {
        assert_eq!(nb_tie(&some(&[1.0; 5]), 2.0), vec![5]);
        let mut data = some(&[1.0; 5]);
        data.push(None);
        assert_eq!(nb_tie(&data, 2.4), vec![5]);
    }

    #[test]
    fn nb_tie_resolution_larger_than_range() {
        assert_eq!(nb_tie(&some(&[0.0, 0.0, 0.0, 1.0, 1.0]), 2.4), vec![5]);
    }

    #[test]
    fn nb_tie_binned() {
        let data = some(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(nb_tie(&data, 2.0), vec![2, 2, 3]);
    }

    #[test]
    fn nb_tie_binned_with_missing() {
        let data = vec![
            Some(1.0),
            Some(3.0),
            Some(5.0),
            Some(2.0),
            Some(8.0),
            Some(1.0),
            Some(5.0),
            Some(5.0),
            Some(6.0),
            Some(7.0),
            Some(1.0),
            None,
            None,
            Some(4.0),
        ];
        assert_eq!(nb_tie(&data, 2.0), vec![4, 2, 4, 2]);
    }

    #[test]
    fn nb_tie_skips_empty_bins() {
        let data = some(&[0.0, 0.0, 0.5, 9.5, 9.9]);
        assert_eq!(nb_tie(&data, 1.0), vec![3, 2]);
    }

    #[test]
    fn nb_tie_fine_resolution_over_wide_range() {
        let data = some(&[0.0, 0.0, 250.0, 500.0, 1000.0]);
        assert_eq!(nb_tie(&data, 1e-9), vec![2, 1, 1, 1]);
    }

    #[test]
    fn nb_tie_all_missing() {
        assert!(nb_tie(&[None, None], 1.0).is_empty());
    }
}
