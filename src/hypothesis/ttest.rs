// Student t-tests: paired and two-sample

use super::{two_sided_t_pvalue, Result, StatError};
use crate::descriptive::{mean, variance};

/// Which two-sample test to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TTestVariant {
    /// Pooled variance, df = n1 + n2 - 2
    Pooled,
    /// Welch-Satterthwaite, unequal variances
    Welch,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TTestResult {
    pub t_statistic: f64,
    pub p_value: f64,
    pub df: f64,
}

/// Paired t-test of `first - second` against a zero mean difference
pub fn paired_ttest(first: &[f64], second: &[f64]) -> Result<TTestResult> {
    if first.len() != second.len() {
        return Err(StatError::LengthMismatch {
            left: first.len(),
            right: second.len(),
        });
    }
    if first.len() < 2 {
        return Err(StatError::InsufficientData {
            required: 2,
            actual: first.len(),
        });
    }

    let diffs: Vec<f64> = first.iter().zip(second).map(|(a, b)| a - b).collect();
    let n = diffs.len() as f64;
    let mean_diff = mean(&diffs).unwrap_or_default();
    let var_diff = variance(&diffs).unwrap_or_default();
    if var_diff <= 0.0 {
        return Err(StatError::ZeroVariance("paired differences".to_string()));
    }

    let t_statistic = mean_diff / (var_diff / n).sqrt();
    let df = n - 1.0;
    let p_value = two_sided_t_pvalue(t_statistic, df)?;

    tracing::debug!(t_statistic, p_value, df, "Paired t-test");
    Ok(TTestResult {
        t_statistic,
        p_value,
        df,
    })
}

/// Two-sample t-test of `first` against `second`
pub fn independent_ttest(
    first: &[f64],
    second: &[f64],
    variant: TTestVariant,
) -> Result<TTestResult> {
    let smaller = first.len().min(second.len());
    if smaller < 2 {
        return Err(StatError::InsufficientData {
            required: 2,
            actual: smaller,
        });
    }

    let n1 = first.len() as f64;
    let n2 = second.len() as f64;
    let mean1 = mean(first).unwrap_or_default();
    let mean2 = mean(second).unwrap_or_default();
    let var1 = variance(first).unwrap_or_default();
    let var2 = variance(second).unwrap_or_default();
    if var1 <= 0.0 && var2 <= 0.0 {
        return Err(StatError::ZeroVariance("both samples".to_string()));
    }

    let (se, df) = match variant {
        TTestVariant::Pooled => {
            let df = n1 + n2 - 2.0;
            let pooled = ((n1 - 1.0) * var1 + (n2 - 1.0) * var2) / df;
            ((pooled * (1.0 / n1 + 1.0 / n2)).sqrt(), df)
        }
        TTestVariant::Welch => {
            let a = var1 / n1;
            let b = var2 / n2;
            let df = (a + b).powi(2) / (a.powi(2) / (n1 - 1.0) + b.powi(2) / (n2 - 1.0));
            ((a + b).sqrt(), df)
        }
    };

    let t_statistic = (mean1 - mean2) / se;
    let p_value = two_sided_t_pvalue(t_statistic, df)?;

    tracing::debug!(t_statistic, p_value, df, ?variant, "Independent t-test");
    Ok(TTestResult {
        t_statistic,
        p_value,
        df,
    })
}
