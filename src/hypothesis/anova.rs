// One-way analysis of variance
//
// Parametric: normality and homogeneity of variance are assumed, not checked.

use super::{validate_groups, Result, Series, StatError};
use crate::descriptive::{mean, sum_of_squares};
use statrs::distribution::{ContinuousCDF, FisherSnedecor};

/// Per-group size and mean, kept for reporting
#[derive(Debug, Clone, PartialEq)]
pub struct GroupMean {
    pub group: String,
    pub n: usize,
    pub mean: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnovaResult {
    pub f_statistic: f64,
    pub p_value: f64,
    pub df_between: f64,
    pub df_within: f64,
    /// Mean squared error (within-group), reused by Tukey HSD
    pub ms_within: f64,
    pub groups: Vec<GroupMean>,
}

/// F test for equality of group means
pub fn one_way_anova(groups: &[Series]) -> Result<AnovaResult> {
    validate_groups(groups)?;

    let k = groups.len();
    let n_total: usize = groups.iter().map(Series::len).sum();
    if n_total <= k {
        return Err(StatError::InsufficientData {
            required: k + 1,
            actual: n_total,
        });
    }

    let all: Vec<f64> = groups.iter().flat_map(|g| g.values.iter().copied()).collect();
    let grand_mean = mean(&all).unwrap_or_default();

    let mut ss_between = 0.0;
    let mut ss_within = 0.0;
    let mut group_means = Vec::with_capacity(k);
    for group in groups {
        let group_mean = mean(&group.values).unwrap_or_default();
        ss_between += group.len() as f64 * (group_mean - grand_mean).powi(2);
        ss_within += sum_of_squares(&group.values);
        group_means.push(GroupMean {
            group: group.name.clone(),
            n: group.len(),
            mean: group_mean,
        });
    }

    if ss_within <= f64::EPSILON * ss_between.max(1.0) {
        return Err(StatError::ZeroVariance("within-group variation".to_string()));
    }

    let df_between = (k - 1) as f64;
    let df_within = (n_total - k) as f64;
    let ms_between = ss_between / df_between;
    let ms_within = ss_within / df_within;
    let f_statistic = ms_between / ms_within;

    let dist = FisherSnedecor::new(df_between, df_within)?;
    let p_value = dist.sf(f_statistic);

    tracing::debug!(f_statistic, p_value, df_between, df_within, "One-way ANOVA");

    Ok(AnovaResult {
        f_statistic,
        p_value,
        df_between,
        df_within,
        ms_within,
        groups: group_means,
    })
}
