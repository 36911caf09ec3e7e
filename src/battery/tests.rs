// Battery tests
//
// A small deterministic survey exercises every test; degenerate variants of
// it check that a failing test is skipped while the others still run.

use super::*;
use crate::survey::RawRecord;

const FREQUENCIES: [&str; 6] = [
    "I did not thrift",
    "1 to 3 times",
    "4 to 8 times",
    "9 to 12 times",
    "13 to 20 times",
    "21 or more times",
];
const ACCEPTABILITY: [&str; 5] = [
    "1 - Very Unacceptable",
    "2 - Unacceptable",
    "3 - Neutral",
    "4 - Acceptable",
    "5 - Very Acceptable",
];
const PRICES: [&str; 3] = ["Underpriced", "Priced correctly", "Overpriced"];
const INCOMES: [&str; 4] = ["$0-20,000", "$20,001-40,000", "$40,001-60,000", "$60,001-80,000"];
const VIEWS: [&str; 4] = ["Left", "Centre", "Right", ""];
// style rating tracks the frequency bucket, so the style ANOVA is significant
const STYLE_BY_BUCKET: [i64; 6] = [1, 2, 3, 4, 5, 5];

fn likert(value: i64) -> Option<String> {
    Some(format!("{value} - Agree"))
}

fn survey_record(i: usize) -> RawRecord {
    let bucket = i % 6;
    let mut motivations = Vec::new();
    if i % 2 == 0 {
        motivations.push("Affordability");
    }
    if i % 3 == 0 {
        motivations.push("Sustainability");
    }

    RawRecord {
        respondent_id: format!("R{i}"),
        thrift_past_year: Some(FREQUENCIES[bucket].to_string()),
        thrift_five_years_ago: (i % 7 != 0).then(|| FREQUENCIES[(i * 5 + 1) % 6].to_string()),
        price_affects_decision: likert(1 + (i % 5) as i64),
        clothes_good_condition: likert(1 + ((2 * i) % 5) as i64),
        find_quality_brands: likert(1 + ((3 * i) % 5) as i64),
        find_style_fit: likert(STYLE_BY_BUCKET[bucket]),
        social_acceptability: Some(ACCEPTABILITY[i % 5].to_string()),
        price_perception: Some(PRICES[i % 3].to_string()),
        motivations: (!motivations.is_empty()).then(|| motivations.join(";")),
        income: Some(INCOMES[i % 4].to_string()),
        international_student: Some(if i % 3 == 0 { "Yes" } else { "No " }.to_string()),
        political_views: Some(VIEWS[i % 4].to_string()).filter(|v| !v.is_empty()),
        ..RawRecord::default()
    }
}

fn survey() -> CleanedTable {
    CleanedTable::from_raw((0..18).map(survey_record).collect())
}

fn run(table: &CleanedTable) -> BatteryReport {
    run_battery(table, &AnalysisConfig::default())
}

#[test]
fn test_full_battery_completes() {
    let report = run(&survey());

    assert_eq!(report.sample_size, 18);
    assert_eq!(report.excluded, 0);
    assert_eq!(report.anovas.len(), 3);
    assert!(report.anovas.iter().all(|a| !a.test.is_skipped()));
    assert!(report.regression.fit.completed().is_some());
    assert!(report.regression.vif.completed().is_some());
    assert!(report.paired.test.completed().is_some());
    assert!(report.independent.test.completed().is_some());
    assert!(report.kruskal.test.completed().is_some());
    assert!(report.skipped_tests().is_empty());
}

#[test]
fn test_significant_anova_runs_tukey() {
    let report = run(&survey());
    let style = report
        .anovas
        .iter()
        .find(|a| a.field == "style_fit")
        .unwrap();

    let anova = style.test.completed().unwrap();
    assert!(anova.p_value < 0.05);
    let groups: Vec<_> = anova.groups.iter().map(|g| g.group.as_str()).collect();
    assert_eq!(
        groups,
        vec!["Non-Thrifters", "Occasional Thrifters", "Frequent Thrifters"]
    );

    let tukey = style.tukey.as_ref().unwrap().completed().unwrap();
    assert_eq!(tukey.len(), 3);
    assert!(tukey.iter().all(|pair| pair.mean_diff > 0.0));
}

#[test]
fn test_non_significant_anova_has_no_tukey() {
    let config = AnalysisConfig {
        significance_level: 1e-300,
        ..AnalysisConfig::default()
    };
    let report = run_battery(&survey(), &config);
    assert!(report.anovas.iter().all(|a| a.tukey.is_none()));
}

#[test]
fn test_single_frequency_group_skips_anova() {
    let records = (0..12)
        .map(|i| {
            let mut record = survey_record(i);
            record.thrift_past_year = Some("21 or more times".to_string());
            record
        })
        .collect();
    let table = CleanedTable::from_raw(records);
    let report = run(&table);

    for anova in &report.anovas {
        let reason = anova.test.skip_reason().unwrap();
        assert!(reason.contains("at least 2"), "{reason}");
        assert!(anova.tukey.is_none());
    }
    // the rest of the battery still runs
    assert!(report.paired.test.completed().is_some());
    assert!(report.regression.vif.completed().is_some());
    let skipped: Vec<_> = report.skipped_tests().into_iter().map(|(name, _)| name).collect();
    assert!(skipped.contains(&"ANOVA style_fit".to_string()));
    assert!(!skipped.contains(&"Paired t-test".to_string()));
    assert!(report.to_report_string().contains("test skipped:"));
}

#[test]
fn test_group_with_all_null_outcome_skips_that_anova_only() {
    let records = (0..18)
        .map(|i| {
            let mut record = survey_record(i);
            if i % 6 == 0 {
                record.find_style_fit = Some("Not sure".to_string());
            }
            record
        })
        .collect();
    let report = run(&CleanedTable::from_raw(records));

    let style = report.anovas.iter().find(|a| a.field == "style_fit").unwrap();
    assert_eq!(
        style.test.skip_reason(),
        Some("group 'Non-Thrifters' has no observations")
    );
    let price = report
        .anovas
        .iter()
        .find(|a| a.field == "price_affects_num")
        .unwrap();
    assert!(price.test.completed().is_some());
}

#[test]
fn test_regression_uses_complete_rows_only() {
    let records = (0..18)
        .map(|i| {
            let mut record = survey_record(i);
            if i == 4 {
                record.find_quality_brands = None;
            }
            if i == 5 {
                record.social_acceptability = Some("Neutral".to_string());
            }
            record
        })
        .collect();
    let report = run(&CleanedTable::from_raw(records));

    assert_eq!(report.regression.complete_rows, 16);
    let fit = report.regression.fit.completed().unwrap();
    assert_eq!(fit.n_obs, 16);
    let names: Vec<_> = fit.coefficients.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "const",
            "condition_rating",
            "quality_brands",
            "price_perception_num",
            "social_accept_num",
            "motivated_by_affordability",
            "motivated_by_sustainability"
        ]
    );

    let vif = report.regression.vif.completed().unwrap();
    assert_eq!(vif.len(), 6);
    assert!(vif.iter().all(|e| e.name != "const"));
}

#[test]
fn test_regression_singular_design_is_skipped() {
    // every respondent gives the same condition rating as quality rating
    let records = (0..18)
        .map(|i| {
            let mut record = survey_record(i);
            record.find_quality_brands = record.clothes_good_condition.clone();
            record
        })
        .collect();
    let report = run(&CleanedTable::from_raw(records));

    assert_eq!(
        report.regression.fit.skip_reason(),
        Some("design matrix is singular or nearly singular")
    );
    let vif = report.regression.vif.completed().unwrap();
    assert!(vif[0].vif.is_infinite() && vif[0].severe);
    assert!(report.paired.test.completed().is_some());
}

#[test]
fn test_paired_subset_size_and_directions() {
    let table = survey();
    let report = run(&table);
    let expected = table
        .rows()
        .iter()
        .filter(|r| r.thrift_five_years_ago_num.is_some())
        .count();

    assert_eq!(report.paired.n, expected);
    assert_eq!(report.paired.n, 15);
    assert_eq!(
        report.paired.increased + report.paired.decreased + report.paired.unchanged,
        report.paired.n
    );
    let band_total: usize = direction_counts(&report.paired).iter().map(|(_, c)| c).sum();
    assert_eq!(band_total, report.paired.n);
    assert_eq!(report.paired.change.count, 15);
}

#[test]
fn test_independent_ttest_trims_answers() {
    let report = run(&survey());
    assert_eq!(report.independent.international_n, 6);
    assert_eq!(report.independent.domestic_n, 12);
    assert_eq!(report.independent.variant, TTestVariant::Pooled);

    let welch = run_battery(
        &survey(),
        &AnalysisConfig {
            equal_variance: false,
            ..AnalysisConfig::default()
        },
    );
    assert_eq!(welch.independent.variant, TTestVariant::Welch);
}

#[test]
fn test_kruskal_only_over_present_groups() {
    let records = (0..12)
        .map(|i| {
            let mut record = survey_record(i);
            record.price_perception = Some(PRICES[i % 2].to_string());
            record
        })
        .collect();
    let report = run(&CleanedTable::from_raw(records));
    assert_eq!(report.kruskal.groups, vec!["Underpriced", "Priced Correctly"]);
    assert_eq!(report.kruskal.test.completed().unwrap().df, 1.0);

    let records = (0..12)
        .map(|i| {
            let mut record = survey_record(i);
            record.price_perception = Some("Overpriced".to_string());
            record
        })
        .collect();
    let report = run(&CleanedTable::from_raw(records));
    assert!(report.kruskal.test.is_skipped());
}

#[test]
fn test_correlation_matrix_shape() {
    let report = run(&survey());
    let matrix = &report.correlation;
    assert_eq!(matrix.names.len(), 6);
    assert_eq!(matrix.names[0], "thrift_past_year_num");
    for i in 0..6 {
        assert_eq!(matrix.values[i][i], Some(1.0));
        for j in 0..6 {
            assert_eq!(matrix.values[i][j], matrix.values[j][i]);
        }
    }
}

#[test]
fn test_barriers_pct_overpriced_over_known_answers() {
    let records = vec![
        RawRecord {
            price_perception: Some("Overpriced".to_string()),
            ..survey_record(1)
        },
        RawRecord {
            price_perception: Some("Underpriced".to_string()),
            ..survey_record(7)
        },
        RawRecord {
            price_perception: None,
            ..survey_record(13)
        },
    ];
    let rows = barriers_by_group(&CleanedTable::from_raw(records));

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].thrift_frequency_group, "Occasional Thrifters");
    assert_eq!(rows[0].n, 3);
    assert_eq!(rows[0].pct_overpriced, Some(50.0));
}

#[test]
fn test_grouped_tables_order_and_filters() {
    let table = survey();

    let income: Vec<_> = income_analysis(&table)
        .into_iter()
        .map(|r| r.income_level)
        .collect();
    assert_eq!(income, vec!["Low", "Medium-Low", "Medium", "High"]);

    let international: Vec<_> = international_analysis(&table)
        .into_iter()
        .map(|r| (r.international_student, r.n))
        .collect();
    assert_eq!(
        international,
        vec![("No".to_string(), 12), ("Yes".to_string(), 6)]
    );

    let political: Vec<_> = political_analysis(&table)
        .into_iter()
        .map(|r| r.political_views)
        .collect();
    assert_eq!(political, vec!["Centre", "Left", "Right"]);

    let change = change_by_group(&table.paired());
    let total: usize = change.iter().map(|r| r.n).sum();
    assert_eq!(total, 15);
}

#[test]
fn test_descriptives() {
    let report = run(&survey());
    let d = &report.descriptives;
    assert_eq!(d.past_year.count, 18);
    assert_eq!(d.five_years_ago.count, 15);

    let affordability = d
        .motivations
        .iter()
        .find(|m| m.label == "Affordability")
        .unwrap();
    assert_eq!(affordability.count, 9);
    assert_eq!(affordability.percent, 50.0);

    let total: usize = d.price_perception.iter().map(|s| s.count).sum();
    assert_eq!(total, 18);
    assert_eq!(d.frequency_groups[0], ("Frequent Thrifters".to_string(), 9));
}

#[test]
fn test_report_string_sections() {
    let text = run(&survey()).to_report_string();
    assert!(text.contains("Admitted respondents: 18"));
    assert!(text.contains("Tukey HSD"));
    assert!(text.contains("Paired t-test"));
    assert!(text.contains("Kruskal-Wallis"));
    assert!(!text.contains("SKIPPED TESTS"));
}

#[test]
fn test_report_lines_follow_section_order() {
    let text = run(&survey()).to_report_string();
    assert!(text.ends_with('\n'));
    let headers = [
        "📋 SURVEY SAMPLE",
        "📊 BARRIERS BY FREQUENCY GROUP",
        "📈 MULTIPLE REGRESSION",
        "🔁 CHANGE OVER FIVE YEARS",
        "🔎 OTHER FINDINGS",
    ];
    let positions: Vec<usize> = headers
        .iter()
        .map(|h| text.find(h).unwrap_or_else(|| panic!("missing section {h}")))
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
    // every heading and figure sits on its own line
    assert!(text.lines().any(|l| l.starts_with("Paired sample: ")));
    assert!(text.lines().any(|l| l.starts_with("Admitted respondents: 18 ")));
}
