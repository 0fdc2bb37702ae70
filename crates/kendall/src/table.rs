//! Exact null distribution of S for small samples.

use crate::error::KendallError;

/// Largest sample size covered by the exact table.
pub const EXACT_MAX_N: usize = 10;

struct ExactRow {
    n: usize,
    /// Smallest tabulated S; entries follow in steps of 2 up to n(n-1)/2.
    s_min: i64,
    probs: &'static [f64],
}

/// Upper-tail probabilities `P(S >= s)` under H0 without ties
/// (Gilbert 1987, table A18).
static PROB_MK_N: [ExactRow; 7] = [
    ExactRow {
        n: 4,
        s_min: 0,
        probs: &[0.625, 0.375, 0.166666667, 0.041666667],
    },
    ExactRow {
        n: 5,
        s_min: 0,
        probs: &[
            0.591666667,
            0.408333333,
            0.241666667,
            0.116666667,
            0.041666667,
            0.008333333,
        ],
    },
    ExactRow {
        n: 6,
        s_min: 1,
        probs: &[
            0.5,
            0.359722222,
            0.234722222,
            0.136111111,
            0.068055556,
            0.027777778,
            0.008333333,
            0.001388889,
        ],
    },
    ExactRow {
        n: 7,
        s_min: 1,
        probs: &[
            0.5,
            0.386309524,
            0.280952381,
            0.190674603,
            0.119444444,
            0.068055556,
            0.034523810,
            0.015079365,
            0.005357143,
            0.001388889,
            1.984127e-04,
        ],
    },
    ExactRow {
        n: 8,
        s_min: 0,
        probs: &[
            0.547569444,
            0.452430556,
            0.359771825,
            0.274206349,
            0.199379960,
            0.137549603,
            0.089434524,
            0.054340278,
            0.030505952,
            0.015575397,
            0.007068452,
            0.002752976,
            8.680556e-04,
            1.984127e-04,
            2.480159e-05,
        ],
    },
    ExactRow {
        n: 9,
        s_min: 0,
        probs: &[
            0.540272266,
            0.459727734,
            0.380707121,
            0.306101190,
            0.238354277,
            0.179243827,
            0.129759149,
            0.090090388,
            0.059719466,
            0.037588183,
            0.022307650,
            0.012370481,
            0.006332672,
            0.002943122,
            0.001212522,
            4.271384e-04,
            1.212522e-04,
            2.480159e-05,
            2.755732e-06,
        ],
    },
    ExactRow {
        n: 10,
        s_min: 1,
        probs: &[
            0.5,
            0.430900298,
            0.363744764,
            0.300326830,
            0.242156360,
            0.190359899,
            0.145624173,
            0.108186728,
            0.077870922,
            0.054156746,
            0.036275077,
            0.023311287,
            0.014304729,
            0.008333058,
            0.004574239,
            0.002343474,
            0.001106426,
            4.731592e-04,
            1.788470e-04,
            5.759480e-05,
            1.488095e-05,
            2.755732e-06,
            2.755732e-07,
        ],
    },
];

/// Exact probability of observing `|S|` or larger with `n` values.
///
/// Only S values of one parity are tabulated for each `n`. Ties can produce
/// the other parity; those are linearly interpolated between the two
/// neighbouring entries, and a `|S|` below the first entry takes that
/// entry.
///
/// # Errors
///
/// Returns [`KendallError::TableRange`] if `n` is outside `4..=10` or `|S|`
/// exceeds `n(n-1)/2`.
pub fn prob_mk_n(n: usize, s: i64) -> Result<f64, KendallError> {
    let row = PROB_MK_N
        .iter()
        .find(|row| row.n == n)
        .ok_or(KendallError::TableRange { n, s })?;

    let s_abs = s.abs();
    let s_max = row.s_min + 2 * (row.probs.len() as i64 - 1);
    if s_abs > s_max {
        return Err(KendallError::TableRange { n, s });
    }
    if s_abs <= row.s_min {
        return Ok(row.probs[0]);
    }

    let pos = (s_abs - row.s_min) as usize;
    if pos % 2 == 0 {
        Ok(row.probs[pos / 2])
    } else {
        let lo = pos / 2;
        Ok(0.5 * (row.probs[lo] + row.probs[lo + 1]))
    }
}
