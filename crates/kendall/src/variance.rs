//! Variance of S and the standardised statistic Z.

/// Variance of S with ties in the data (`t`) and ties in time (`u`).
///
/// GAW report 133, eq. 4.20:
///
/// ```text
/// Var(S) = [n(n-1)(2n+5) - Σt(t-1)(2t+5) - Σu(u-1)(2u+5)] / 18
///        + Σt(t-1)(t-2) · Σu(u-1)(u-2) / (9n(n-1)(n-2))
///        + Σt(t-1) · Σu(u-1) / (2n(n-1))
/// ```
///
/// Groups of size 1 contribute nothing, so plain run-length vectors can be
/// passed unfiltered. The result is clamped at 0 and is exactly 0 when all
/// `n` values are tied. Seasonal variances are obtained by summing the
/// per-segment values.
pub fn kendall_var(n: usize, t: &[usize], u: &[usize]) -> f64 {
    if n < 2 {
        return 0.0;
    }
    let nf = n as f64;

    let mut var = (nf * (nf - 1.0) * (2.0 * nf + 5.0)
        - sum(t, |x| x * (x - 1.0) * (2.0 * x + 5.0))
        - sum(u, |x| x * (x - 1.0) * (2.0 * x + 5.0)))
        / 18.0;
    if n > 2 {
        var += sum(t, |x| x * (x - 1.0) * (x - 2.0)) * sum(u, |x| x * (x - 1.0) * (x - 2.0))
            / (9.0 * nf * (nf - 1.0) * (nf - 2.0));
    }
    var += sum(t, |x| x * (x - 1.0)) * sum(u, |x| x * (x - 1.0)) / (2.0 * nf * (nf - 1.0));

    var.max(0.0)
}

fn sum(groups: &[usize], f: impl Fn(f64) -> f64) -> f64 {
    groups.iter().map(|&g| f(g as f64)).sum()
}

/// Standardised statistic `Z = (S - sign(S)) / sqrt(Var)`.
///
/// Returns 0 when `S == 0` or the variance is not positive.
pub fn std_normal_var(s: i64, var: f64) -> f64 {
    if s == 0 || var.is_nan() || var <= 0.0 {
        return 0.0;
    }
    (s - s.signum()) as f64 / var.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn no_ties() {
        // n(n-1)(2n+5)/18
        assert_relative_eq!(kendall_var(20, &[], &[]), 950.0, epsilon = 1e-9);
        assert_relative_eq!(kendall_var(10, &[1; 10], &[1; 10]), 125.0, epsilon = 1e-9);
    }

    #[test]
    fn data_and_time_ties() {
        assert_relative_eq!(
            kendall_var(12, &[4, 2, 4, 2], &[7, 5]),
            140.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn data_ties_only() {
        assert_relative_eq!(kendall_var(6, &[3, 2, 1], &[]), 426.0 / 18.0, epsilon = 1e-12);
    }

    #[test]
    fn all_tied_is_zero() {
        assert_eq!(kendall_var(7, &[7], &[]), 0.0);
        assert_eq!(kendall_var(7, &[7], &[1; 7]), 0.0);
    }

    #[test]
    fn degenerate_sizes() {
        assert_eq!(kendall_var(0, &[], &[]), 0.0);
        assert_eq!(kendall_var(1, &[1], &[1]), 0.0);
    }

    #[test]
    fn z_continuity_correction() {
        assert_relative_eq!(std_normal_var(190, 950.0), 189.0 / 950f64.sqrt());
        assert_relative_eq!(std_normal_var(-11, 25.0), -2.0);
        assert_eq!(std_normal_var(1, 25.0), 0.0);
    }

    #[test]
    fn z_degenerate() {
        assert_eq!(std_normal_var(0, 10.0), 0.0);
        assert_eq!(std_normal_var(5, 0.0), 0.0);
        assert_eq!(std_normal_var(5, f64::NAN), 0.0);
    }
}
