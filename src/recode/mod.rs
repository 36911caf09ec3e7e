// Survey recoding pipeline
//
// Turns the free-text survey answers into numeric and categorical fields.
// Every derived value is a pure function of its own source field(s), so the
// transform is row-independent. Unrecognized text never raises: it resolves
// to None and is excluded per analysis.
//
// Admission: only respondents with a recognized past-year frequency enter the
// cleaned table. Every other missing value is tolerated.

mod respondent;
mod rules;

pub use respondent::{CleanedTable, PairedObservation, Respondent};
pub use rules::{
    Pattern, Rule, RuleTable, ACCEPTABILITY, FREQUENCY_BUCKETS, INCOME_BRACKETS,
    PRICE_PERCEPTION,
};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Past-year frequency partition
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FrequencyGroup {
    NonThrifters,
    OccasionalThrifters,
    FrequentThrifters,
}

impl FrequencyGroup {
    pub const ALL: [FrequencyGroup; 3] = [
        FrequencyGroup::NonThrifters,
        FrequencyGroup::OccasionalThrifters,
        FrequencyGroup::FrequentThrifters,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FrequencyGroup::NonThrifters => "Non-Thrifters",
            FrequencyGroup::OccasionalThrifters => "Occasional Thrifters",
            FrequencyGroup::FrequentThrifters => "Frequent Thrifters",
        }
    }
}

impl fmt::Display for FrequencyGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Ordered income category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum IncomeLevel {
    Low,
    MediumLow,
    Medium,
    High,
}

impl IncomeLevel {
    pub const ALL: [IncomeLevel; 4] = [
        IncomeLevel::Low,
        IncomeLevel::MediumLow,
        IncomeLevel::Medium,
        IncomeLevel::High,
    ];

    pub fn label(self) -> &'static str {
        match self {
            IncomeLevel::Low => "Low",
            IncomeLevel::MediumLow => "Medium-Low",
            IncomeLevel::Medium => "Medium",
            IncomeLevel::High => "High",
        }
    }
}

impl fmt::Display for IncomeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Price perception answer, coded 1..=3
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PricePerception {
    Underpriced,
    PricedCorrectly,
    Overpriced,
}

impl PricePerception {
    pub const ALL: [PricePerception; 3] = [
        PricePerception::Underpriced,
        PricePerception::PricedCorrectly,
        PricePerception::Overpriced,
    ];

    pub fn code(self) -> i64 {
        match self {
            PricePerception::Underpriced => 1,
            PricePerception::PricedCorrectly => 2,
            PricePerception::Overpriced => 3,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.code() == code)
    }

    pub fn label(self) -> &'static str {
        match self {
            PricePerception::Underpriced => "Underpriced",
            PricePerception::PricedCorrectly => "Priced Correctly",
            PricePerception::Overpriced => "Overpriced",
        }
    }
}

/// Five-band classification of the past-year minus five-years-ago change
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ChangeDirection {
    SignificantIncrease,
    SlightIncrease,
    NoChange,
    SlightDecrease,
    SignificantDecrease,
}

impl ChangeDirection {
    pub const ALL: [ChangeDirection; 5] = [
        ChangeDirection::SignificantIncrease,
        ChangeDirection::SlightIncrease,
        ChangeDirection::NoChange,
        ChangeDirection::SlightDecrease,
        ChangeDirection::SignificantDecrease,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ChangeDirection::SignificantIncrease => "Significant Increase",
            ChangeDirection::SlightIncrease => "Slight Increase",
            ChangeDirection::NoChange => "No Change",
            ChangeDirection::SlightDecrease => "Slight Decrease",
            ChangeDirection::SignificantDecrease => "Significant Decrease",
        }
    }
}

impl fmt::Display for ChangeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Frequency bucket label → trips per year
pub fn map_frequency_bucket(text: Option<&str>) -> Option<f64> {
    FREQUENCY_BUCKETS.resolve(text)
}

/// Integer before the first separator, e.g. "4 - Often" → 4
///
/// Answers without a separator, or whose first segment is not an integer,
/// yield None.
pub fn extract_leading_integer(text: Option<&str>) -> Option<i64> {
    let text = text?;
    let Some((head, _)) = text.split_once(rules::LIKERT_SEPARATOR) else {
        tracing::trace!(value = text, "Likert answer without separator");
        return None;
    };
    match head.trim().parse::<i64>() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::trace!(value = text, "Likert answer without leading integer");
            None
        }
    }
}

pub fn map_acceptability(text: Option<&str>) -> Option<i64> {
    ACCEPTABILITY.resolve(text)
}

pub fn map_price_perception(text: Option<&str>) -> Option<i64> {
    PRICE_PERCEPTION.resolve(text).map(PricePerception::code)
}

/// 0 → Non, (0, 9) → Occasional, [9, ∞) → Frequent
///
/// Negative and NaN inputs cannot come out of the bucket table; they map to
/// None rather than being forced into a group.
pub fn partition_frequency_group(value: Option<f64>) -> Option<FrequencyGroup> {
    let value = value?;
    if value >= 9.0 {
        Some(FrequencyGroup::FrequentThrifters)
    } else if value > 0.0 {
        Some(FrequencyGroup::OccasionalThrifters)
    } else if value == 0.0 {
        Some(FrequencyGroup::NonThrifters)
    } else {
        None
    }
}

pub fn categorize_income(text: Option<&str>) -> Option<IncomeLevel> {
    INCOME_BRACKETS.resolve(text)
}

/// Bands: >5, (0,5], 0, [-5,0), < -5. The ±5 boundaries are "Slight".
pub fn categorize_change(change: f64) -> ChangeDirection {
    if change > 5.0 {
        ChangeDirection::SignificantIncrease
    } else if change > 0.0 {
        ChangeDirection::SlightIncrease
    } else if change == 0.0 {
        ChangeDirection::NoChange
    } else if change >= -5.0 {
        ChangeDirection::SlightDecrease
    } else {
        ChangeDirection::SignificantDecrease
    }
}

/// Keyword presence in the multi-select motivations answer
pub fn has_motivation(motivations: Option<&str>, keyword: &str) -> bool {
    motivations.is_some_and(|text| text.contains(keyword))
}
