// Tukey honestly-significant-difference post-hoc comparisons
//
// Every pair of groups is compared with the studentized range statistic
// q = |mean_j - mean_i| / sqrt(MSE / 2 * (1/n_i + 1/n_j)), using the pooled
// within-group MSE of the one-way ANOVA. Unequal group sizes use the
// Tukey-Kramer standard error.

use super::anova::one_way_anova;
use super::studentized_range::{studentized_range_cdf, studentized_range_quantile};
use super::{Result, Series, StatError};

/// The studentized range integral is unreliable below this many error df
const MIN_ERROR_DF: f64 = 2.0;

#[derive(Debug, Clone, PartialEq)]
pub struct TukeyComparison {
    pub group1: String,
    pub group2: String,
    /// mean(group2) - mean(group1)
    pub mean_diff: f64,
    pub p_adj: f64,
    pub lower: f64,
    pub upper: f64,
    pub reject: bool,
}

/// All pairwise comparisons, in group order (0-1, 0-2, ..., 1-2, ...)
pub fn tukey_hsd(groups: &[Series], alpha: f64) -> Result<Vec<TukeyComparison>> {
    let anova = one_way_anova(groups)?;
    let k = groups.len();
    let df = anova.df_within;
    if df < MIN_ERROR_DF {
        return Err(StatError::Distribution(format!(
            "studentized range needs at least {} error degrees of freedom, got {}",
            MIN_ERROR_DF, df
        )));
    }
    let q_crit = studentized_range_quantile(1.0 - alpha, k, df);

    let mut comparisons = Vec::with_capacity(k * (k - 1) / 2);
    for (i, first) in anova.groups.iter().enumerate() {
        for second in &anova.groups[i + 1..] {
            let mean_diff = second.mean - first.mean;
            let se = (anova.ms_within / 2.0 * (1.0 / first.n as f64 + 1.0 / second.n as f64))
                .sqrt();
            let q = mean_diff.abs() / se;
            let p_adj = (1.0 - studentized_range_cdf(q, k, df)).clamp(0.0, 1.0);
            let margin = q_crit * se;

            comparisons.push(TukeyComparison {
                group1: first.group.clone(),
                group2: second.group.clone(),
                mean_diff,
                p_adj,
                lower: mean_diff - margin,
                upper: mean_diff + margin,
                reject: p_adj < alpha,
            });
        }
    }

    tracing::debug!(pairs = comparisons.len(), q_crit, "Tukey HSD");
    Ok(comparisons)
}
