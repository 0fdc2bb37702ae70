//! Levinson-Durbin recursion for symmetric Toeplitz systems.

use crate::error::ToolsError;

/// Solution of the Yule-Walker equations up to a given order.
#[derive(Debug, Clone, PartialEq)]
pub struct Levinson {
    /// Prediction-error filter `a`, with `a[0] = 1`, of length `order + 1`.
    pub a: Vec<f64>,
    /// Final prediction-error variance.
    pub error: f64,
    /// Reflection coefficients for orders `1..=order`.
    pub reflection: Vec<f64>,
}

impl Levinson {
    /// AR coefficients `phi` of `x[t] = sum phi[i] x[t-1-i] + e[t]`.
    pub fn ar(&self) -> Vec<f64> {
        self.a[1..].iter().map(|&c| -c).collect()
    }

    /// Partial autocorrelations, i.e. the reflection coefficients with the
    /// sign flipped. The first one equals the lag-1 autocorrelation.
    pub fn pacf(&self) -> Vec<f64> {
        self.reflection.iter().map(|&k| -k).collect()
    }
}

/// Runs the Levinson-Durbin recursion on autocovariances `r[0..=order]`.
///
/// Each step computes the reflection coefficient from the forward
/// prediction error, updates the filter from its time-reversed copy (the
/// backward predictor) and shrinks the error by `1 - k^2`.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`ToolsError::AutocovarianceTooShort`] | `r.len() < order + 1` |
/// | [`ToolsError::SingularSystem`] | `r[0] <= 0`, or a reflection coefficient with magnitude `>= 1` |
pub fn levinson(r: &[f64], order: usize) -> Result<Levinson, ToolsError> {
    if r.len() < order + 1 {
        return Err(ToolsError::AutocovarianceTooShort {
            need: order + 1,
            got: r.len(),
        });
    }
    if !(r[0] > 0.0 && r[0].is_finite()) {
        return Err(ToolsError::SingularSystem {
            order: 0,
            reflection: f64::NAN,
        });
    }

    let mut a = vec![0.0; order + 1];
    a[0] = 1.0;
    let mut prev = a.clone();
    let mut error = r[0];
    let mut reflection = Vec::with_capacity(order);

    for k in 1..=order {
        let acc: f64 = (0..k).map(|j| a[j] * r[k - j]).sum();
        let kappa = -acc / error;
        if !kappa.is_finite() || kappa.abs() >= 1.0 {
            return Err(ToolsError::SingularSystem {
                order: k,
                reflection: kappa,
            });
        }

        prev[..k].copy_from_slice(&a[..k]);
        for j in 1..k {
            a[j] = prev[j] + kappa * prev[k - j];
        }
        a[k] = kappa;

        error *= 1.0 - kappa * kappa;
        reflection.push(kappa);
    }

    Ok(Levinson {
        a,
        error,
        reflection,
    })
}
