// Classical hypothesis tests for the survey battery
//
// Every test takes plain f64 samples (nulls already removed by the caller)
// and returns a typed error instead of panicking when its inputs are
// degenerate. The battery turns those errors into "test skipped" entries.
//
// Distributions come from statrs (t, F, chi-squared, normal); least squares
// uses nalgebra. The studentized range distribution needed by Tukey HSD is
// not in statrs and is integrated numerically in `studentized_range`.

mod anova;
mod correlation;
mod kruskal;
mod ols;
mod studentized_range;
mod ttest;
mod tukey;

pub use anova::{one_way_anova, AnovaResult, GroupMean};
pub use correlation::{pairwise_correlation, CorrelationMatrix};
pub use kruskal::{kruskal_wallis, KruskalResult};
pub use ols::{ols, variance_inflation_factors, Coefficient, OlsFit, VifEntry};
pub use studentized_range::{studentized_range_cdf, studentized_range_quantile};
pub use ttest::{independent_ttest, paired_ttest, TTestResult, TTestVariant};
pub use tukey::{tukey_hsd, TukeyComparison};

use thiserror::Error;

/// Reasons a test cannot be computed on the data it was given
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatError {
    #[error("need at least {required} non-empty groups, found {found}")]
    InsufficientGroups { required: usize, found: usize },

    #[error("group '{0}' has no observations")]
    EmptyGroup(String),

    #[error("need at least {required} observations, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("samples have different lengths ({left} vs {right})")]
    LengthMismatch { left: usize, right: usize },

    #[error("{0} has zero variance")]
    ZeroVariance(String),

    #[error("design matrix is singular or nearly singular")]
    SingularMatrix,

    #[error("invalid distribution parameters: {0}")]
    Distribution(String),
}

pub type Result<T> = std::result::Result<T, StatError>;

impl From<statrs::StatsError> for StatError {
    fn from(err: statrs::StatsError) -> Self {
        StatError::Distribution(err.to_string())
    }
}

/// A named vector of observations: one group of a grouped test, or one
/// predictor column of a regression
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub values: Vec<f64>,
}

impl Series {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Grouped tests need at least two groups and no empty group
fn validate_groups(groups: &[Series]) -> Result<()> {
    if groups.len() < 2 {
        return Err(StatError::InsufficientGroups {
            required: 2,
            found: groups.iter().filter(|g| !g.is_empty()).count(),
        });
    }
    if let Some(empty) = groups.iter().find(|g| g.is_empty()) {
        return Err(StatError::EmptyGroup(empty.name.clone()));
    }
    Ok(())
}

/// Two-sided p-value of a t statistic
fn two_sided_t_pvalue(t: f64, df: f64) -> Result<f64> {
    use statrs::distribution::{ContinuousCDF, StudentsT};

    let dist = StudentsT::new(0.0, 1.0, df)?;
    Ok((2.0 * dist.sf(t.abs())).min(1.0))
}
