// Fixed statistical battery over the cleaned survey table
//
// Runs every analysis unconditionally, each one independent of the others:
// - descriptive summaries of the frequencies, groups, motivations, prices
// - one-way ANOVA of three ratings across frequency groups, with Tukey HSD
//   when significant
// - OLS of past-year frequency on six predictors, plus VIF
// - pairwise-complete Pearson correlation matrix
// - paired t-test of past-year vs five-years-ago frequency
// - independent t-test of frequency, international vs domestic
// - Kruskal-Wallis of frequency across price-perception groups
// - five grouped descriptive tables
//
// A test whose inputs are degenerate is recorded as skipped with a reason
// and the rest of the battery still runs.

mod grouped;
mod outcome;
mod report;

pub use grouped::{
    barriers_by_group, change_by_group, income_analysis, international_analysis,
    political_analysis, BarrierRow, ChangeRow, IncomeRow, InternationalRow, PoliticalRow,
    TableRow,
};
pub use outcome::{SkipNotice, TestOutcome};

use crate::config::AnalysisConfig;
use crate::descriptive::{percent_true, value_counts, Summary};
use crate::hypothesis::{
    independent_ttest, kruskal_wallis, ols, one_way_anova, pairwise_correlation, paired_ttest,
    tukey_hsd, variance_inflation_factors, AnovaResult, CorrelationMatrix, KruskalResult, OlsFit,
    Series, TTestResult, TTestVariant, TukeyComparison, VifEntry,
};
use crate::recode::{ChangeDirection, CleanedTable, FrequencyGroup, PricePerception, Respondent};

fn as_f64(value: Option<i64>) -> Option<f64> {
    value.map(|v| v as f64)
}

/// Rating compared across frequency groups by ANOVA
#[derive(Clone, Copy)]
pub struct AnovaOutcome {
    pub field: &'static str,
    pub label: &'static str,
    pub value: fn(&Respondent) -> Option<f64>,
}

pub const ANOVA_OUTCOMES: [AnovaOutcome; 3] = [
    AnovaOutcome {
        field: "price_affects_num",
        label: "Price affects decision",
        value: |r| as_f64(r.price_affects_num),
    },
    AnovaOutcome {
        field: "condition_rating",
        label: "Clothes in good condition",
        value: |r| as_f64(r.condition_rating),
    },
    AnovaOutcome {
        field: "style_fit",
        label: "Finding style fit",
        value: |r| as_f64(r.style_fit),
    },
];

/// Regression predictors, in model order
pub const REGRESSION_PREDICTORS: [(&str, fn(&Respondent) -> Option<f64>); 6] = [
    ("condition_rating", |r| as_f64(r.condition_rating)),
    ("quality_brands", |r| as_f64(r.quality_brands)),
    ("price_perception_num", |r| as_f64(r.price_perception_num)),
    ("social_accept_num", |r| as_f64(r.social_accept_num)),
    ("motivated_by_affordability", |r| {
        Some(f64::from(u8::from(r.motivated_by_affordability)))
    }),
    ("motivated_by_sustainability", |r| {
        Some(f64::from(u8::from(r.motivated_by_sustainability)))
    }),
];

/// Fields of the correlation matrix
pub const CORRELATION_FIELDS: [(&str, fn(&Respondent) -> Option<f64>); 6] = [
    ("thrift_past_year_num", |r| r.thrift_past_year_num),
    ("condition_rating", |r| as_f64(r.condition_rating)),
    ("quality_brands", |r| as_f64(r.quality_brands)),
    ("price_perception_num", |r| as_f64(r.price_perception_num)),
    ("social_accept_num", |r| as_f64(r.social_accept_num)),
    ("price_affects_num", |r| as_f64(r.price_affects_num)),
];

/// A label with its count and share of the total
#[derive(Debug, Clone, PartialEq)]
pub struct LabelShare {
    pub label: String,
    pub count: usize,
    pub percent: f64,
}

fn shares(counts: Vec<(String, usize)>, total: usize) -> Vec<LabelShare> {
    counts
        .into_iter()
        .map(|(label, count)| LabelShare {
            percent: if total == 0 {
                0.0
            } else {
                count as f64 / total as f64 * 100.0
            },
            label,
            count,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Descriptives {
    pub past_year: Summary,
    pub five_years_ago: Summary,
    pub frequency_groups: Vec<(String, usize)>,
    /// Share of all admitted respondents naming each motivation
    pub motivations: Vec<LabelShare>,
    /// Raw price-perception answers, share of non-null answers
    pub price_perception: Vec<LabelShare>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnovaReport {
    pub field: &'static str,
    pub label: &'static str,
    pub test: TestOutcome<AnovaResult>,
    /// Present only when the ANOVA completed and was significant
    pub tukey: Option<TestOutcome<Vec<TukeyComparison>>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegressionReport {
    /// Rows with none of the seven model values missing
    pub complete_rows: usize,
    pub fit: TestOutcome<OlsFit>,
    pub vif: TestOutcome<Vec<VifEntry>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PairedReport {
    /// Rows with both frequencies known
    pub n: usize,
    pub test: TestOutcome<TTestResult>,
    pub change: Summary,
    pub increased: usize,
    pub decreased: usize,
    pub unchanged: usize,
    pub pct_increased: Option<f64>,
    pub pct_decreased: Option<f64>,
    pub pct_unchanged: Option<f64>,
    /// Band counts, most frequent first
    pub directions: Vec<(String, usize)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndependentReport {
    pub international_n: usize,
    pub domestic_n: usize,
    pub variant: TTestVariant,
    pub test: TestOutcome<TTestResult>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KruskalReport {
    /// Price-perception groups that occur in the data
    pub groups: Vec<String>,
    pub test: TestOutcome<KruskalResult>,
}

/// Everything the battery computed, ready for the sinks
#[derive(Debug, Clone)]
pub struct BatteryReport {
    pub sample_size: usize,
    pub excluded: usize,
    pub descriptives: Descriptives,
    pub anovas: Vec<AnovaReport>,
    pub regression: RegressionReport,
    pub correlation: CorrelationMatrix,
    pub paired: PairedReport,
    pub independent: IndependentReport,
    pub kruskal: KruskalReport,
    pub barriers: Vec<BarrierRow>,
    pub change_by_group: Vec<ChangeRow>,
    pub income: Vec<IncomeRow>,
    pub international: Vec<InternationalRow>,
    pub political: Vec<PoliticalRow>,
    pub config: AnalysisConfig,
}

impl BatteryReport {
    /// (test name, reason) for every skipped test
    pub fn skipped_tests(&self) -> Vec<(String, String)> {
        let mut skipped = Vec::new();
        let mut note = |name: String, reason: Option<&str>| {
            if let Some(reason) = reason {
                skipped.push((name, reason.to_string()));
            }
        };

        for anova in &self.anovas {
            note(format!("ANOVA {}", anova.field), anova.test.skip_reason());
            if let Some(tukey) = &anova.tukey {
                note(format!("Tukey HSD {}", anova.field), tukey.skip_reason());
            }
        }
        note("OLS regression".to_string(), self.regression.fit.skip_reason());
        note("VIF".to_string(), self.regression.vif.skip_reason());
        note("Paired t-test".to_string(), self.paired.test.skip_reason());
        note(
            "Independent t-test".to_string(),
            self.independent.test.skip_reason(),
        );
        note("Kruskal-Wallis".to_string(), self.kruskal.test.skip_reason());
        skipped
    }
}

/// Run the whole battery
pub fn run_battery(table: &CleanedTable, config: &AnalysisConfig) -> BatteryReport {
    tracing::info!(rows = table.len(), "Running statistical battery");

    let report = BatteryReport {
        sample_size: table.len(),
        excluded: table.excluded(),
        descriptives: describe(table),
        anovas: ANOVA_OUTCOMES
            .iter()
            .map(|outcome| run_anova(table, outcome, config.significance_level))
            .collect(),
        regression: run_regression(table, config.vif_threshold),
        correlation: correlation_matrix(table),
        paired: run_paired(table),
        independent: run_independent(table, config.ttest_variant()),
        kruskal: run_kruskal(table),
        barriers: barriers_by_group(table),
        change_by_group: change_by_group(&table.paired()),
        income: income_analysis(table),
        international: international_analysis(table),
        political: political_analysis(table),
        config: config.clone(),
    };

    tracing::info!(
        skipped = report.skipped_tests().len(),
        "Statistical battery complete"
    );
    report
}

pub fn describe(table: &CleanedTable) -> Descriptives {
    let rows = table.rows();
    let motivations = [
        ("Sustainability", rows.iter().filter(|r| r.motivated_by_sustainability).count()),
        ("Affordability", rows.iter().filter(|r| r.motivated_by_affordability).count()),
        ("Enjoyment", rows.iter().filter(|r| r.motivated_by_enjoyment).count()),
    ]
    .into_iter()
    .map(|(label, count)| (label.to_string(), count))
    .collect();

    let answers: Vec<&str> = rows
        .iter()
        .filter_map(|r| r.raw.price_perception.as_deref())
        .collect();
    let answered = answers.len();

    Descriptives {
        past_year: Summary::of(&table.values(|r| r.thrift_past_year_num)),
        five_years_ago: Summary::of(&table.values(|r| r.thrift_five_years_ago_num)),
        frequency_groups: value_counts(
            rows.iter()
                .filter_map(|r| r.thrift_frequency_group)
                .map(FrequencyGroup::label),
        ),
        motivations: shares(motivations, rows.len()),
        price_perception: shares(value_counts(answers), answered),
    }
}

/// Outcome values split by frequency group, for the groups that occur
fn frequency_group_series(table: &CleanedTable, value: fn(&Respondent) -> Option<f64>) -> Vec<Series> {
    FrequencyGroup::ALL
        .into_iter()
        .filter(|group| {
            table
                .rows()
                .iter()
                .any(|r| r.thrift_frequency_group == Some(*group))
        })
        .map(|group| {
            let values = table
                .rows()
                .iter()
                .filter(|r| r.thrift_frequency_group == Some(group))
                .filter_map(value)
                .collect();
            Series::new(group.label(), values)
        })
        .collect()
}

fn run_anova(table: &CleanedTable, outcome: &AnovaOutcome, alpha: f64) -> AnovaReport {
    let groups = frequency_group_series(table, outcome.value);
    let test = TestOutcome::from_result(
        &format!("ANOVA {}", outcome.field),
        one_way_anova(&groups),
    );

    let tukey = match test.completed() {
        Some(anova) if anova.p_value < alpha => {
            tracing::debug!(field = outcome.field, "ANOVA significant, running Tukey HSD");
            Some(TestOutcome::from_result(
                &format!("Tukey HSD {}", outcome.field),
                tukey_hsd(&groups, alpha),
            ))
        }
        _ => None,
    };

    AnovaReport {
        field: outcome.field,
        label: outcome.label,
        test,
        tukey,
    }
}

fn run_regression(table: &CleanedTable, vif_threshold: f64) -> RegressionReport {
    let mut outcome = Vec::new();
    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); REGRESSION_PREDICTORS.len()];

    for row in table.rows() {
        let Some(y) = row.thrift_past_year_num else {
            continue;
        };
        let values: Option<Vec<f64>> = REGRESSION_PREDICTORS
            .iter()
            .map(|(_, value)| value(row))
            .collect();
        if let Some(values) = values {
            outcome.push(y);
            for (column, v) in columns.iter_mut().zip(values) {
                column.push(v);
            }
        }
    }

    let predictors: Vec<Series> = REGRESSION_PREDICTORS
        .iter()
        .zip(columns)
        .map(|((name, _), values)| Series::new(*name, values))
        .collect();
    tracing::debug!(complete_rows = outcome.len(), "Regression rows");

    RegressionReport {
        complete_rows: outcome.len(),
        fit: TestOutcome::from_result("OLS regression", ols(&outcome, &predictors)),
        vif: TestOutcome::from_result(
            "VIF",
            variance_inflation_factors(&predictors, vif_threshold),
        ),
    }
}

pub fn correlation_matrix(table: &CleanedTable) -> CorrelationMatrix {
    let columns: Vec<(String, Vec<Option<f64>>)> = CORRELATION_FIELDS
        .iter()
        .map(|(name, value)| (name.to_string(), table.rows().iter().map(value).collect()))
        .collect();
    pairwise_correlation(&columns)
}

fn run_paired(table: &CleanedTable) -> PairedReport {
    let paired = table.paired();
    let past: Vec<f64> = paired.iter().map(|p| p.past_year).collect();
    let then: Vec<f64> = paired.iter().map(|p| p.five_years_ago).collect();
    let changes: Vec<f64> = paired.iter().map(|p| p.change).collect();

    let count = |pred: fn(f64) -> bool| changes.iter().filter(|c| pred(**c)).count();
    let pct = |pred: fn(f64) -> bool| percent_true(changes.iter().map(|c| pred(*c)));
    let increased: fn(f64) -> bool = |c| c > 0.0;
    let decreased: fn(f64) -> bool = |c| c < 0.0;
    let unchanged: fn(f64) -> bool = |c| c == 0.0;

    PairedReport {
        n: paired.len(),
        test: TestOutcome::from_result("Paired t-test", paired_ttest(&past, &then)),
        change: Summary::of(&changes),
        increased: count(increased),
        decreased: count(decreased),
        unchanged: count(unchanged),
        pct_increased: pct(increased),
        pct_decreased: pct(decreased),
        pct_unchanged: pct(unchanged),
        directions: value_counts(paired.iter().map(|p| p.direction.label())),
    }
}

fn run_independent(table: &CleanedTable, variant: TTestVariant) -> IndependentReport {
    let frequencies = |answer: &str| -> Vec<f64> {
        table
            .rows()
            .iter()
            .filter(|r| r.international_student() == Some(answer))
            .filter_map(|r| r.thrift_past_year_num)
            .collect()
    };
    let international = frequencies("Yes");
    let domestic = frequencies("No");

    IndependentReport {
        international_n: international.len(),
        domestic_n: domestic.len(),
        variant,
        test: TestOutcome::from_result(
            "Independent t-test",
            independent_ttest(&international, &domestic, variant),
        ),
    }
}

fn run_kruskal(table: &CleanedTable) -> KruskalReport {
    let groups: Vec<Series> = PricePerception::ALL
        .into_iter()
        .filter_map(|perception| {
            let members: Vec<&Respondent> = table
                .rows()
                .iter()
                .filter(|r| r.price_perception_num == Some(perception.code()))
                .collect();
            if members.is_empty() {
                return None;
            }
            let values = members.iter().filter_map(|r| r.thrift_past_year_num).collect();
            Some(Series::new(perception.label(), values))
        })
        .collect();

    KruskalReport {
        groups: groups.iter().map(|g| g.name.clone()).collect(),
        test: TestOutcome::from_result("Kruskal-Wallis", kruskal_wallis(&groups)),
    }
}

/// Change band counts in band order, zeros included
pub fn direction_counts(report: &PairedReport) -> Vec<(ChangeDirection, usize)> {
    ChangeDirection::ALL
        .into_iter()
        .map(|direction| {
            let count = report
                .directions
                .iter()
                .find(|(label, _)| label == direction.label())
                .map_or(0, |(_, count)| *count);
            (direction, count)
        })
        .collect()
}

#[cfg(test)]
mod tests;
