//! JSON summary of an analysis run
//!
//! One flat record with the headline numbers. Values that could not be
//! computed (an empty paired subset, a skipped test) are written as `null`.

use crate::battery::BatteryReport;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRecord {
    pub sample_size: usize,
    pub avg_thrift_past_year: Option<f64>,
    pub avg_thrift_five_years: Option<f64>,
    /// Mean change over the paired subset
    pub avg_change: Option<f64>,
    /// Paired t-test of past-year vs five-years-ago frequency
    pub t_test_p_value: Option<f64>,
    pub pct_increased: Option<f64>,
    pub pct_decreased: Option<f64>,
    pub model_r_squared: Option<f64>,
    pub model_adj_r_squared: Option<f64>,
}

impl SummaryRecord {
    pub fn from_report(report: &BatteryReport) -> Self {
        let fit = report.regression.fit.completed();
        Self {
            sample_size: report.sample_size,
            avg_thrift_past_year: report.descriptives.past_year.mean,
            avg_thrift_five_years: report.descriptives.five_years_ago.mean,
            avg_change: report.paired.change.mean,
            t_test_p_value: report.paired.test.completed().map(|t| t.p_value),
            pct_increased: report.paired.pct_increased,
            pct_decreased: report.paired.pct_decreased,
            model_r_squared: fit.map(|f| f.r_squared),
            model_adj_r_squared: fit.map(|f| f.adj_r_squared),
        }
    }

    /// Pretty-printed JSON, two-space indented
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battery::run_battery;
    use crate::config::AnalysisConfig;
    use crate::recode::CleanedTable;
    use crate::survey::RawRecord;

    fn record(id: &str, past_year: &str, five_years_ago: Option<&str>) -> RawRecord {
        RawRecord {
            respondent_id: id.to_string(),
            thrift_past_year: Some(past_year.to_string()),
            thrift_five_years_ago: five_years_ago.map(str::to_string),
            ..RawRecord::default()
        }
    }

    #[test]
    fn test_summary_keys_and_nulls() {
        let table = CleanedTable::from_raw(vec![
            record("R1", "1 to 3 times", Some("4 to 8 times")),
            record("R2", "9 to 12 times", Some("1 to 3 times")),
            record("R3", "4 to 8 times", None),
        ]);
        let report = run_battery(&table, &AnalysisConfig::default());
        let summary = SummaryRecord::from_report(&report);

        assert_eq!(summary.sample_size, 3);
        assert_eq!(summary.avg_thrift_past_year, Some(18.5 / 3.0));
        assert_eq!(summary.avg_thrift_five_years, Some(4.0));
        // changes: -4 and +8.5
        assert_eq!(summary.avg_change, Some(2.25));
        assert_eq!(summary.pct_increased, Some(50.0));
        assert_eq!(summary.pct_decreased, Some(50.0));
        // no predictors answered: regression skipped
        assert_eq!(summary.model_r_squared, None);

        let json = summary.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys.len(), 9);
        assert!(value["model_r_squared"].is_null());
        assert_eq!(value["sample_size"], 3);
        assert!(json.contains("\n  \"sample_size\": 3"));
    }

    #[test]
    fn test_round_trip_preserves_values() {
        let summary = SummaryRecord {
            sample_size: 120,
            avg_thrift_past_year: Some(7.25),
            avg_thrift_five_years: Some(5.5),
            avg_change: Some(1.75),
            t_test_p_value: Some(0.0123),
            pct_increased: Some(40.0),
            pct_decreased: Some(20.0),
            model_r_squared: Some(0.31),
            model_adj_r_squared: Some(0.27),
        };
        let parsed: SummaryRecord = serde_json::from_str(&summary.to_json().unwrap()).unwrap();
        assert_eq!(parsed, summary);
    }
}
