// Kruskal-Wallis H test (rank-based one-way comparison)

use super::{validate_groups, Result, Series, StatError};
use statrs::distribution::{ChiSquared, ContinuousCDF};

#[derive(Debug, Clone, PartialEq)]
pub struct KruskalResult {
    pub h_statistic: f64,
    pub p_value: f64,
    pub df: f64,
}

/// Average ranks (1-based) of `values`, ties sharing the mean of their ranks.
/// Also returns sum(t^3 - t) over tie blocks.
fn average_ranks(values: &[f64]) -> (Vec<f64>, f64) {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut ranks = vec![0.0; values.len()];
    let mut tie_term = 0.0;
    let mut start = 0;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len() && values[order[end]] == values[order[start]] {
            end += 1;
        }
        let rank = (start + end + 1) as f64 / 2.0;
        for &idx in &order[start..end] {
            ranks[idx] = rank;
        }
        let t = (end - start) as f64;
        tie_term += t.powi(3) - t;
        start = end;
    }
    (ranks, tie_term)
}

pub fn kruskal_wallis(groups: &[Series]) -> Result<KruskalResult> {
    validate_groups(groups)?;

    let all: Vec<f64> = groups.iter().flat_map(|g| g.values.iter().copied()).collect();
    let n = all.len() as f64;
    let (ranks, tie_term) = average_ranks(&all);

    let mut h = 0.0;
    let mut offset = 0;
    for group in groups {
        let rank_sum: f64 = ranks[offset..offset + group.len()].iter().sum();
        h += rank_sum.powi(2) / group.len() as f64;
        offset += group.len();
    }
    h = 12.0 / (n * (n + 1.0)) * h - 3.0 * (n + 1.0);

    let correction = 1.0 - tie_term / (n.powi(3) - n);
    if correction <= 0.0 {
        return Err(StatError::ZeroVariance("all pooled values".to_string()));
    }
    let h_statistic = h / correction;

    let df = (groups.len() - 1) as f64;
    let p_value = ChiSquared::new(df)?.sf(h_statistic);

    tracing::debug!(h_statistic, p_value, df, "Kruskal-Wallis");
    Ok(KruskalResult {
        h_statistic,
        p_value,
        df,
    })
}
