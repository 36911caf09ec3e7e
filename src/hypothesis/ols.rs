// Ordinary least squares and variance inflation factors
//
// The design matrix gets an intercept column named "const" prepended. The
// normal equations are solved through an explicit (X'X)^-1, which is also
// what the coefficient standard errors need; a condition check on X'X via
// its singular values catches perfectly collinear predictors first.

use super::{two_sided_t_pvalue, Result, Series, StatError};
use nalgebra::{DMatrix, DVector};
use statrs::distribution::{ContinuousCDF, FisherSnedecor};

/// Relative singular value below which X'X is treated as singular
const SINGULAR_TOLERANCE: f64 = 1e-10;

pub const INTERCEPT_NAME: &str = "const";

#[derive(Debug, Clone, PartialEq)]
pub struct Coefficient {
    pub name: String,
    pub estimate: f64,
    pub std_error: f64,
    pub t_statistic: f64,
    pub p_value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OlsFit {
    pub coefficients: Vec<Coefficient>,
    pub r_squared: f64,
    pub adj_r_squared: f64,
    pub f_statistic: f64,
    pub f_p_value: f64,
    pub n_obs: usize,
    pub df_resid: f64,
}

impl OlsFit {
    pub fn coefficient(&self, name: &str) -> Option<&Coefficient> {
        self.coefficients.iter().find(|c| c.name == name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VifEntry {
    pub name: String,
    pub vif: f64,
    /// VIF above the configured threshold
    pub severe: bool,
}

fn check_lengths(n: usize, predictors: &[Series]) -> Result<()> {
    for predictor in predictors {
        if predictor.len() != n {
            return Err(StatError::LengthMismatch {
                left: n,
                right: predictor.len(),
            });
        }
    }
    Ok(())
}

fn design_matrix(n: usize, predictors: &[Series], intercept: bool) -> DMatrix<f64> {
    let offset = usize::from(intercept);
    DMatrix::from_fn(n, predictors.len() + offset, |row, col| {
        if col < offset {
            1.0
        } else {
            predictors[col - offset].values[row]
        }
    })
}

/// Fit `outcome ~ const + predictors`
///
/// Rows must already be complete: every series has the same length as
/// `outcome` and contains no missing values.
pub fn ols(outcome: &[f64], predictors: &[Series]) -> Result<OlsFit> {
    let n = outcome.len();
    check_lengths(n, predictors)?;
    let p = predictors.len() + 1;
    if n <= p {
        return Err(StatError::InsufficientData {
            required: p + 1,
            actual: n,
        });
    }

    let x = design_matrix(n, predictors, true);
    let y = DVector::from_column_slice(outcome);

    let xtx = x.transpose() * &x;
    let singular = xtx.singular_values();
    let (largest, smallest) = (singular.max(), singular.min());
    if largest <= 0.0 || smallest / largest < SINGULAR_TOLERANCE {
        return Err(StatError::SingularMatrix);
    }
    let xtx_inv = xtx.try_inverse().ok_or(StatError::SingularMatrix)?;

    let beta = &xtx_inv * x.transpose() * &y;
    let residuals = &y - &x * &beta;
    let ss_resid = residuals.norm_squared();

    let y_mean = y.mean();
    let ss_total: f64 = outcome.iter().map(|v| (v - y_mean).powi(2)).sum();
    if ss_total <= 0.0 {
        return Err(StatError::ZeroVariance("outcome".to_string()));
    }

    let df_model = (p - 1) as f64;
    let df_resid = (n - p) as f64;
    let sigma2 = ss_resid / df_resid;

    let r_squared = 1.0 - ss_resid / ss_total;
    let adj_r_squared = 1.0 - (1.0 - r_squared) * (n - 1) as f64 / df_resid;
    let f_statistic = ((ss_total - ss_resid) / df_model) / sigma2;
    let f_p_value = FisherSnedecor::new(df_model, df_resid)?.sf(f_statistic);

    let names = std::iter::once(INTERCEPT_NAME).chain(predictors.iter().map(|s| s.name.as_str()));
    let mut coefficients = Vec::with_capacity(p);
    for (j, name) in names.enumerate() {
        let estimate = beta[j];
        let std_error = (sigma2 * xtx_inv[(j, j)]).sqrt();
        let t_statistic = estimate / std_error;
        coefficients.push(Coefficient {
            name: name.to_string(),
            estimate,
            std_error,
            t_statistic,
            p_value: two_sided_t_pvalue(t_statistic, df_resid)?,
        });
    }

    tracing::debug!(n, r_squared, adj_r_squared, f_statistic, "OLS fit");
    Ok(OlsFit {
        coefficients,
        r_squared,
        adj_r_squared,
        f_statistic,
        f_p_value,
        n_obs: n,
        df_resid,
    })
}

/// VIF of each predictor, intercept and outcome excluded
///
/// Each predictor is regressed on the others as given (no added constant)
/// and VIF = 1 / (1 - R²) with the uncentered R². A predictor that is an
/// exact combination of the others gets an infinite VIF. Least squares goes
/// through the pseudo-inverse so collinear neighbours do not fail the fit.
pub fn variance_inflation_factors(predictors: &[Series], threshold: f64) -> Result<Vec<VifEntry>> {
    let Some(first) = predictors.first() else {
        return Err(StatError::InsufficientData {
            required: 1,
            actual: 0,
        });
    };
    let n = first.len();
    check_lengths(n, predictors)?;
    if n < 2 {
        return Err(StatError::InsufficientData {
            required: 2,
            actual: n,
        });
    }

    let mut entries = Vec::with_capacity(predictors.len());
    for (j, target) in predictors.iter().enumerate() {
        let others: Vec<Series> = predictors
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != j)
            .map(|(_, s)| s.clone())
            .collect();

        let y = DVector::from_column_slice(&target.values);
        let ss_uncentered = y.norm_squared();
        let ss_resid = if others.is_empty() {
            ss_uncentered
        } else {
            let x = design_matrix(n, &others, false);
            let pinv = x
                .clone()
                .pseudo_inverse(SINGULAR_TOLERANCE)
                .map_err(|_| StatError::SingularMatrix)?;
            let beta = pinv * &y;
            (&y - x * beta).norm_squared()
        };

        let vif = if ss_uncentered <= 0.0 {
            f64::INFINITY
        } else {
            let r_squared = 1.0 - ss_resid / ss_uncentered;
            let tolerance = 1.0 - r_squared;
            if tolerance <= f64::EPSILON {
                f64::INFINITY
            } else {
                1.0 / tolerance
            }
        };

        entries.push(VifEntry {
            name: target.name.clone(),
            vif,
            severe: vif > threshold,
        });
    }

    tracing::debug!(predictors = entries.len(), "VIF computed");
    Ok(entries)
}
