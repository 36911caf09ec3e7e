// Human-readable rendering of the battery results

use super::{direction_counts, BatteryReport, SkipNotice, TestOutcome};
use crate::descriptive::Summary;
use crate::hypothesis::TTestVariant;

fn opt(value: Option<f64>, places: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", places, v),
        None => "-".to_string(),
    }
}

fn verdict(p_value: f64, alpha: f64) -> &'static str {
    if p_value < alpha {
        "significant"
    } else {
        "not significant"
    }
}

fn write_summary(report: &mut String, title: &str, summary: &Summary) {
    report.push_str(&format!("{}:\n", title));
    report.push_str(&format!(
        "  count={} mean={} std={} min={} 25%={} 50%={} 75%={} max={}\n",
        summary.count,
        opt(summary.mean, 3),
        opt(summary.std, 3),
        opt(summary.min, 1),
        opt(summary.p25, 2),
        opt(summary.median, 2),
        opt(summary.p75, 2),
        opt(summary.max, 1),
    ));
}

fn write_skip<T>(report: &mut String, outcome: &TestOutcome<T>) -> Option<()> {
    let reason = outcome.skip_reason()?;
    report.push_str(&format!("  ⚠️  {}\n", SkipNotice(reason)));
    Some(())
}

impl BatteryReport {
    /// Generate human-readable report
    pub fn to_report_string(&self) -> String {
        let alpha = self.config.significance_level;
        let mut report = String::new();

        // Sample
        report.push_str("📋 SURVEY SAMPLE\n\n");
        report.push_str(&format!(
            "Admitted respondents: {} (excluded: {})\n",
            self.sample_size,
            self.excluded,
        ));
        report.push_str(&format!(
            "Significance level: {} ({}% confidence)\n\n",
            alpha,
            (1.0 - alpha) * 100.0,
        ));

        // Descriptives
        let d = &self.descriptives;
        write_summary(&mut report, "Past-year frequency", &d.past_year);
        write_summary(&mut report, "Five-years-ago frequency", &d.five_years_ago);
        report.push_str("Frequency groups:\n");
        for (group, count) in &d.frequency_groups {
            report.push_str(&format!("  {}: {}\n", group, count));
        }
        report.push_str("Motivations:\n");
        for share in &d.motivations {
            report.push_str(&format!(
                "  {}: {} ({:.1}%)\n",
                share.label,
                share.count,
                share.percent,
            ));
        }
        report.push_str("Price perception:\n");
        for share in &d.price_perception {
            report.push_str(&format!(
                "  {}: {} ({:.1}%)\n",
                share.label,
                share.count,
                share.percent,
            ));
        }

        // Barriers
        report.push_str("\n📊 BARRIERS BY FREQUENCY GROUP\n\n");
        for row in &self.barriers {
            report.push_str(&format!(
                "  {} (n={}): price={} condition={} brands={} style={} social={} overpriced={}%\n",
                row.thrift_frequency_group,
                row.n,
                opt(row.avg_price_barrier, 3),
                opt(row.avg_condition, 3),
                opt(row.avg_quality_brands, 3),
                opt(row.avg_style_fit, 3),
                opt(row.avg_social_accept, 3),
                opt(row.pct_overpriced, 1),
            ));
        }
        for anova in &self.anovas {
            report.push_str(&format!("\nANOVA - {}:\n", anova.label));
            if write_skip(&mut report, &anova.test).is_some() {
                continue;
            }
            if let Some(result) = anova.test.completed() {
                report.push_str(&format!(
                    "  F={:.4}, p={:.4} ({})\n",
                    result.f_statistic,
                    result.p_value,
                    verdict(result.p_value, alpha),
                ));
            }
            if let Some(tukey) = &anova.tukey {
                report.push_str("  Tukey HSD:\n");
                if write_skip(&mut report, tukey).is_none() {
                    for pair in tukey.completed().into_iter().flatten() {
                        report.push_str(&format!(
                            "    {} vs {}: diff={:.4} p-adj={:.4} [{:.4}, {:.4}] reject={}\n",
                            pair.group1,
                            pair.group2,
                            pair.mean_diff,
                            pair.p_adj,
                            pair.lower,
                            pair.upper,
                            pair.reject,
                        ));
                    }
                }
            }
        }

        // Regression
        report.push_str("\n📈 MULTIPLE REGRESSION (past-year frequency)\n\n");
        report.push_str(&format!("Complete rows: {}\n", self.regression.complete_rows));
        write_skip(&mut report, &self.regression.fit);
        if let Some(fit) = self.regression.fit.completed() {
            report.push_str(&format!(
                "  R²={:.4} adj. R²={:.4} F={:.4} (p={:.4})\n",
                fit.r_squared,
                fit.adj_r_squared,
                fit.f_statistic,
                fit.f_p_value,
            ));
            for c in &fit.coefficients {
                report.push_str(&format!(
                    "  {:<28} coef={:>9.4} se={:>8.4} t={:>8.3} p={:.4}\n",
                    c.name,
                    c.estimate,
                    c.std_error,
                    c.t_statistic,
                    c.p_value,
                ));
            }
        }
        report.push_str(&format!("VIF (> {} is severe):\n", self.config.vif_threshold));
        write_skip(&mut report, &self.regression.vif);
        for entry in self.regression.vif.completed().into_iter().flatten() {
            let flag = if entry.severe { "  ⚠️ severe" } else { "" };
            report.push_str(&format!("  {:<28} {:.3}{}\n", entry.name, entry.vif, flag));
        }

        // Correlation
        report.push_str("\nCorrelation matrix (pairwise complete):\n");
        for (name, row) in self.correlation.names.iter().zip(&self.correlation.values) {
            let cells: Vec<String> = row.iter().map(|r| format!("{:>7}", opt(*r, 3))).collect();
            report.push_str(&format!("  {:<22}{}\n", name, cells.join("")));
        }

        // Change over five years
        let paired = &self.paired;
        report.push_str("\n🔁 CHANGE OVER FIVE YEARS\n\n");
        report.push_str(&format!("Paired sample: {}\n", paired.n));
        write_skip(&mut report, &paired.test);
        if let Some(t) = paired.test.completed() {
            report.push_str(&format!(
                "  Paired t-test: t={:.4}, p={:.4} ({})\n",
                t.t_statistic,
                t.p_value,
                verdict(t.p_value, alpha),
            ));
        }
        report.push_str(&format!(
            "  Mean change={} median={} std={}\n",
            opt(paired.change.mean, 2),
            opt(paired.change.median, 2),
            opt(paired.change.std, 2),
        ));
        report.push_str(&format!(
            "  Increased: {} ({}%)  Decreased: {} ({}%)  Unchanged: {} ({}%)\n",
            paired.increased,
            opt(paired.pct_increased, 1),
            paired.decreased,
            opt(paired.pct_decreased, 1),
            paired.unchanged,
            opt(paired.pct_unchanged, 1),
        ));
        for (direction, count) in direction_counts(paired) {
            report.push_str(&format!("  {}: {}\n", direction, count));
        }
        for row in &self.change_by_group {
            report.push_str(&format!(
                "  {} (n={}): past={} then={} change={} up={}% down={}%\n",
                row.thrift_frequency_group,
                row.n,
                opt(row.avg_past_year, 2),
                opt(row.avg_five_years_ago, 2),
                opt(row.avg_change, 2),
                opt(row.pct_increased, 1),
                opt(row.pct_decreased, 1),
            ));
        }

        // Other findings
        report.push_str("\n🔎 OTHER FINDINGS\n\n");
        report.push_str("Income level:\n");
        for row in &self.income {
            report.push_str(&format!(
                "  {} (n={}): frequency={} affordability={}%\n",
                row.income_level,
                row.n,
                opt(row.avg_frequency, 2),
                opt(row.pct_motivated_by_affordability, 2),
            ));
        }
        report.push_str("International students:\n");
        for row in &self.international {
            report.push_str(&format!(
                "  {} (n={}): frequency={} social={} affordability={}%\n",
                row.international_student,
                row.n,
                opt(row.avg_frequency, 2),
                opt(row.avg_social_accept, 2),
                opt(row.pct_motivated_by_affordability, 2),
            ));
        }
        let independent = &self.independent;
        let variant = match independent.variant {
            TTestVariant::Pooled => "pooled variance",
            TTestVariant::Welch => "Welch",
        };
        report.push_str(&format!(
            "  t-test Yes (n={}) vs No (n={}), {}:\n",
            independent.international_n,
            independent.domestic_n,
            variant,
        ));
        write_skip(&mut report, &independent.test);
        if let Some(t) = independent.test.completed() {
            report.push_str(&format!(
                "    t={:.4}, p={:.4} ({})\n",
                t.t_statistic,
                t.p_value,
                verdict(t.p_value, alpha),
            ));
        }
        report.push_str("Political views:\n");
        for row in &self.political {
            report.push_str(&format!(
                "  {} (n={}): frequency={} sustainability={}%\n",
                row.political_views,
                row.n,
                opt(row.avg_frequency, 2),
                opt(row.pct_motivated_by_sustainability, 2),
            ));
        }
        report.push_str(&format!(
            "Kruskal-Wallis across price perception ({}):\n",
            self.kruskal.groups.join(", "),
        ));
        write_skip(&mut report, &self.kruskal.test);
        if let Some(k) = self.kruskal.test.completed() {
            report.push_str(&format!(
                "  H={:.4}, p={:.4} ({})\n",
                k.h_statistic,
                k.p_value,
                verdict(k.p_value, alpha),
            ));
        }

        // Skips
        let skipped = self.skipped_tests();
        if !skipped.is_empty() {
            report.push_str(&format!("\n⚠️  SKIPPED TESTS ({})\n", skipped.len()));
            for (name, reason) in &skipped {
                report.push_str(&format!("  - {}: {}\n", name, SkipNotice(reason)));
            }
        }

        report
    }
}
