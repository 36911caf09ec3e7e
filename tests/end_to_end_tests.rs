//! End-to-end runs of the thriftscope binary over small synthetic surveys

use predicates::prelude::*;

mod utils;
use utils::{varied_rows, Row, SurveyFixture};

fn thriftscope() -> assert_cmd::Command {
    assert_cmd::cargo::cargo_bin_cmd!("thriftscope")
}

fn cleaned_column(fixture: &SurveyFixture, name: &str) -> Vec<String> {
    let text = fixture.read_output("data_cleaned.csv");
    let mut reader = csv::Reader::from_reader(text.as_bytes());
    let idx = reader
        .headers()
        .unwrap()
        .iter()
        .position(|h| h == name)
        .unwrap();
    reader
        .records()
        .map(|r| r.unwrap()[idx].to_string())
        .collect()
}

#[test]
fn test_ten_row_scenario_admits_nine() {
    let labels = [
        "I did not thrift",
        "1 to 3 times",
        "4 to 8 times",
        "9 to 12 times",
        "13 to 20 times",
        "21 or more times",
        "",
        "1 to 3 times",
        "4 to 8 times",
        "9 to 12 times",
    ];
    let rows: Vec<Row> = labels
        .into_iter()
        .map(|label| Row {
            past_year: label,
            ..Row::default()
        })
        .collect();
    let fixture = SurveyFixture::new(&rows);

    thriftscope()
        .arg(fixture.input())
        .arg("-o")
        .arg(fixture.output())
        .arg("--no-plots")
        .assert()
        .success()
        .stdout(predicate::str::contains("Admitted respondents: 9 (excluded: 1)"));

    assert_eq!(
        cleaned_column(&fixture, "thrift_past_year_num"),
        ["0.0", "2.0", "6.0", "10.5", "16.5", "24.0", "2.0", "6.0", "10.5"]
    );
    let occ = "Occasional Thrifters";
    let freq = "Frequent Thrifters";
    assert_eq!(
        cleaned_column(&fixture, "thrift_frequency_group"),
        ["Non-Thrifters", occ, occ, freq, freq, freq, occ, occ, freq]
    );
    assert_eq!(cleaned_column(&fixture, "respondentID")[6], "R8");
}

#[test]
fn test_upper_income_brackets_collapse_to_high() {
    let rows = [
        Row {
            past_year: "4 to 8 times",
            income: "$60,001-80,000",
            ..Row::default()
        },
        Row {
            past_year: "1 to 3 times",
            income: "$80,001 or more",
            ..Row::default()
        },
    ];
    let fixture = SurveyFixture::new(&rows);

    thriftscope()
        .arg(fixture.input())
        .arg("--output-dir")
        .arg(fixture.output())
        .arg("--no-plots")
        .assert()
        .success();

    assert_eq!(cleaned_column(&fixture, "income_level"), ["High", "High"]);
    let income = fixture.read_output("results_income_analysis.csv");
    assert!(income.lines().any(|line| line.starts_with("High,2,4.0")));
}

#[test]
fn test_fixture_keeps_commas_inside_cells() {
    let fixture = SurveyFixture::new(&[Row {
        past_year: "1 to 3 times",
        income: "$60,001-80,000",
        motivations: "Sustainability, Affordability",
        ..Row::default()
    }]);

    let records = thriftscope::survey::load_survey(fixture.input()).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].income.as_deref(), Some("$60,001-80,000"));
    assert_eq!(
        records[0].motivations.as_deref(),
        Some("Sustainability, Affordability")
    );
}

#[test]
fn test_single_frequency_group_skips_anova() {
    let rows: Vec<Row> = (0..8)
        .map(|i| Row {
            past_year: if i % 2 == 0 { "9 to 12 times" } else { "21 or more times" },
            five_years_ago: "4 to 8 times",
            style: ["2 - Rarely", "4 - Often"][i % 2],
            condition: "3 - Sometimes",
            price_affects: "5 - Always",
            ..Row::default()
        })
        .collect();
    let fixture = SurveyFixture::new(&rows);

    thriftscope()
        .arg(fixture.input())
        .arg("-o")
        .arg(fixture.output())
        .arg("--no-plots")
        .assert()
        .success()
        .stdout(predicate::str::contains("SKIPPED TESTS"))
        .stdout(predicate::str::contains("ANOVA style_fit: test skipped:"))
        .stdout(predicate::str::contains("Paired t-test: t="));
}

#[test]
fn test_json_flag_prints_summary() {
    let fixture = SurveyFixture::new(&varied_rows(30));

    let output = thriftscope()
        .arg(fixture.input())
        .arg("-o")
        .arg(fixture.output())
        .arg("--no-plots")
        .arg("--json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["sample_size"], 30);
    assert!(value["t_test_p_value"].is_number());
    assert!(value.get("model_adj_r_squared").is_some());
}

#[test]
fn test_welch_config_is_reported() {
    let fixture = SurveyFixture::new(&varied_rows(24));
    let config = fixture.dir.path().join("analysis.toml");
    std::fs::write(&config, "equal_variance = false\nsignificance_level = 0.01\n").unwrap();

    thriftscope()
        .arg(fixture.input())
        .arg("-o")
        .arg(fixture.output())
        .arg("--config")
        .arg(&config)
        .arg("--no-plots")
        .assert()
        .success()
        .stdout(predicate::str::contains("Significance level: 0.01"))
        .stdout(predicate::str::contains("Welch"));
}

#[test]
fn test_debug_traces_go_to_stderr() {
    let fixture = SurveyFixture::new(&varied_rows(12));

    thriftscope()
        .arg(fixture.input())
        .arg("-o")
        .arg(fixture.output())
        .arg("--no-plots")
        .arg("--debug")
        .assert()
        .success()
        .stdout(predicate::str::contains("📋 SURVEY SAMPLE"))
        .stderr(predicate::str::contains("Loaded survey"));
}
