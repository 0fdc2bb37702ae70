//! The Mann-Kendall S statistic.

use mk_tools::tie_counts;

use crate::error::{KendallError, check_lengths};

/// S statistic of one series with the counts needed for its variance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SStatistic {
    /// Sum of pairwise signs.
    pub s: i64,
    /// Number of present values.
    pub n_valid: usize,
    /// Sizes of groups of present values sharing a timestamp.
    pub time_ties: Vec<usize>,
}

/// Computes `S = sum_{i<j} sign(x_j - x_i)` over present values.
///
/// Each pair is oriented by its time offsets, so pairs sharing a timestamp
/// contribute 0 and input order does not matter. Differences with magnitude
/// below `resolution` count as ties. O(N^2).
///
/// # Errors
///
/// Returns [`KendallError::LengthMismatch`] if `values` and `offsets` differ
/// in length.
pub fn s_statistic(
    values: &[Option<f64>],
    offsets: &[f64],
    resolution: f64,
) -> Result<SStatistic, KendallError> {
    check_lengths(values.len(), offsets.len())?;

    let valid: Vec<(f64, f64)> = values
        .iter()
        .zip(offsets)
        .filter_map(|(v, &t)| v.map(|x| (t, x)))
        .collect();
    let tol = if resolution > 0.0 { resolution } else { 0.0 };

    let mut s = 0i64;
    for (i, &(ti, xi)) in valid.iter().enumerate() {
        for &(tj, xj) in &valid[i + 1..] {
            let dx = xj - xi;
            if tj == ti || dx == 0.0 || dx.abs() < tol {
                continue;
            }
            let same_direction = (dx > 0.0) == (tj > ti);
            s += if same_direction { 1 } else { -1 };
        }
    }

    let mut times: Vec<f64> = valid.iter().map(|&(t, _)| t).collect();
    times.sort_by(f64::total_cmp);

    Ok(SStatistic {
        s,
        n_valid: valid.len(),
        time_ties: tie_counts(&times),
    })
}
