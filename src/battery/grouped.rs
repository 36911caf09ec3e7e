// Grouped descriptive tables
//
// Each table partitions respondents by one key and reports the group size
// plus means and percentages of a few fields. Means and percentages are over
// the non-null values of a field within the group, so a group whose field is
// entirely missing reports None for it. Groups come out in key order: enum
// order for frequency group and income level, lexical order for free text.

use crate::descriptive::{mean, percent_true};
use crate::recode::{CleanedTable, FrequencyGroup, PairedObservation, PricePerception, Respondent};
use serde::Serialize;
use std::collections::BTreeMap;

/// A grouped-table row with a fixed column layout
///
/// `COLUMNS` lists the serialized field names in order, so a table with no
/// rows can still be written with its header.
pub trait TableRow: Serialize {
    const COLUMNS: &'static [&'static str];
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarrierRow {
    pub thrift_frequency_group: String,
    pub n: usize,
    pub avg_price_barrier: Option<f64>,
    pub avg_condition: Option<f64>,
    pub avg_quality_brands: Option<f64>,
    pub avg_style_fit: Option<f64>,
    pub avg_social_accept: Option<f64>,
    pub pct_overpriced: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeRow {
    pub thrift_frequency_group: String,
    pub n: usize,
    pub avg_past_year: Option<f64>,
    pub avg_five_years_ago: Option<f64>,
    pub avg_change: Option<f64>,
    pub pct_increased: Option<f64>,
    pub pct_decreased: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncomeRow {
    pub income_level: String,
    pub n: usize,
    pub avg_frequency: Option<f64>,
    pub pct_motivated_by_affordability: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InternationalRow {
    pub international_student: String,
    pub n: usize,
    pub avg_frequency: Option<f64>,
    pub avg_social_accept: Option<f64>,
    pub pct_motivated_by_affordability: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoliticalRow {
    pub political_views: String,
    pub n: usize,
    pub avg_frequency: Option<f64>,
    pub pct_motivated_by_sustainability: Option<f64>,
}

impl TableRow for BarrierRow {
    const COLUMNS: &'static [&'static str] = &[
        "thrift_frequency_group",
        "n",
        "avg_price_barrier",
        "avg_condition",
        "avg_quality_brands",
        "avg_style_fit",
        "avg_social_accept",
        "pct_overpriced",
    ];
}

impl TableRow for ChangeRow {
    const COLUMNS: &'static [&'static str] = &[
        "thrift_frequency_group",
        "n",
        "avg_past_year",
        "avg_five_years_ago",
        "avg_change",
        "pct_increased",
        "pct_decreased",
    ];
}

impl TableRow for IncomeRow {
    const COLUMNS: &'static [&'static str] = &[
        "income_level",
        "n",
        "avg_frequency",
        "pct_motivated_by_affordability",
    ];
}

impl TableRow for InternationalRow {
    const COLUMNS: &'static [&'static str] = &[
        "international_student",
        "n",
        "avg_frequency",
        "avg_social_accept",
        "pct_motivated_by_affordability",
    ];
}

impl TableRow for PoliticalRow {
    const COLUMNS: &'static [&'static str] = &[
        "political_views",
        "n",
        "avg_frequency",
        "pct_motivated_by_sustainability",
    ];
}

fn round_to(value: Option<f64>, places: i32) -> Option<f64> {
    let scale = 10f64.powi(places);
    value.map(|v| (v * scale).round() / scale)
}

fn integer_mean<'a, I, F>(rows: I, field: F) -> Option<f64>
where
    I: IntoIterator<Item = &'a Respondent>,
    F: Fn(&Respondent) -> Option<i64>,
{
    let values: Vec<f64> = rows.into_iter().filter_map(|r| field(r).map(|v| v as f64)).collect();
    mean(&values)
}

fn float_mean<'a, I, F>(rows: I, field: F) -> Option<f64>
where
    I: IntoIterator<Item = &'a Respondent>,
    F: Fn(&Respondent) -> Option<f64>,
{
    let values: Vec<f64> = rows.into_iter().filter_map(field).collect();
    mean(&values)
}

fn partition<'a, K, I, F>(rows: I, key: F) -> BTreeMap<K, Vec<&'a Respondent>>
where
    K: Ord,
    I: IntoIterator<Item = &'a Respondent>,
    F: Fn(&'a Respondent) -> Option<K>,
{
    let mut groups: BTreeMap<K, Vec<&Respondent>> = BTreeMap::new();
    for row in rows {
        if let Some(k) = key(row) {
            groups.entry(k).or_default().push(row);
        }
    }
    groups
}

/// Barrier ratings and price perception by frequency group
pub fn barriers_by_group(table: &CleanedTable) -> Vec<BarrierRow> {
    let overpriced = PricePerception::Overpriced.code();
    partition(table.rows(), |r| r.thrift_frequency_group)
        .into_iter()
        .map(|(group, rows)| BarrierRow {
            thrift_frequency_group: group.label().to_string(),
            n: rows.len(),
            avg_price_barrier: round_to(integer_mean(rows.iter().copied(), |r| r.price_affects_num), 3),
            avg_condition: round_to(integer_mean(rows.iter().copied(), |r| r.condition_rating), 3),
            avg_quality_brands: round_to(integer_mean(rows.iter().copied(), |r| r.quality_brands), 3),
            avg_style_fit: round_to(integer_mean(rows.iter().copied(), |r| r.style_fit), 3),
            avg_social_accept: round_to(integer_mean(rows.iter().copied(), |r| r.social_accept_num), 3),
            pct_overpriced: round_to(
                percent_true(
                    rows.iter()
                        .filter_map(|r| r.price_perception_num)
                        .map(|code| code == overpriced),
                ),
                1,
            ),
        })
        .collect()
}

/// Paired-subset frequencies and change by frequency group
pub fn change_by_group(paired: &[PairedObservation<'_>]) -> Vec<ChangeRow> {
    let mut groups: BTreeMap<FrequencyGroup, Vec<&PairedObservation<'_>>> = BTreeMap::new();
    for obs in paired {
        if let Some(group) = obs.respondent.thrift_frequency_group {
            groups.entry(group).or_default().push(obs);
        }
    }

    groups
        .into_iter()
        .map(|(group, rows)| {
            let column = |f: fn(&PairedObservation<'_>) -> f64| -> Vec<f64> {
                rows.iter().map(|obs| f(obs)).collect()
            };
            let changes = column(|obs| obs.change);
            ChangeRow {
                thrift_frequency_group: group.label().to_string(),
                n: rows.len(),
                avg_past_year: round_to(mean(&column(|obs| obs.past_year)), 2),
                avg_five_years_ago: round_to(mean(&column(|obs| obs.five_years_ago)), 2),
                avg_change: round_to(mean(&changes), 2),
                pct_increased: round_to(percent_true(changes.iter().map(|c| *c > 0.0)), 1),
                pct_decreased: round_to(percent_true(changes.iter().map(|c| *c < 0.0)), 1),
            }
        })
        .collect()
}

/// Frequency and affordability motivation by income level, Low to High
pub fn income_analysis(table: &CleanedTable) -> Vec<IncomeRow> {
    partition(table.rows(), |r| r.income_level)
        .into_iter()
        .map(|(level, rows)| IncomeRow {
            income_level: level.label().to_string(),
            n: rows.len(),
            avg_frequency: round_to(float_mean(rows.iter().copied(), |r| r.thrift_past_year_num), 2),
            pct_motivated_by_affordability: round_to(
                percent_true(rows.iter().map(|r| r.motivated_by_affordability)),
                2,
            ),
        })
        .collect()
}

/// International versus domestic students
pub fn international_analysis(table: &CleanedTable) -> Vec<InternationalRow> {
    partition(table.rows(), |r| r.international_student())
        .into_iter()
        .map(|(answer, rows)| InternationalRow {
            international_student: answer.to_string(),
            n: rows.len(),
            avg_frequency: round_to(float_mean(rows.iter().copied(), |r| r.thrift_past_year_num), 2),
            avg_social_accept: round_to(integer_mean(rows.iter().copied(), |r| r.social_accept_num), 2),
            pct_motivated_by_affordability: round_to(
                percent_true(rows.iter().map(|r| r.motivated_by_affordability)),
                2,
            ),
        })
        .collect()
}

/// Frequency and sustainability motivation by political view
pub fn political_analysis(table: &CleanedTable) -> Vec<PoliticalRow> {
    partition(table.rows(), |r| r.political_views())
        .into_iter()
        .map(|(view, rows)| PoliticalRow {
            political_views: view.to_string(),
            n: rows.len(),
            avg_frequency: round_to(float_mean(rows.iter().copied(), |r| r.thrift_past_year_num), 2),
            pct_motivated_by_sustainability: round_to(
                percent_true(rows.iter().map(|r| r.motivated_by_sustainability)),
                2,
            ),
        })
        .collect()
}
