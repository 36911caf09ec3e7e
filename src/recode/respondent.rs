// Derived respondent record and the cleaned table

use super::rules::{AFFORDABILITY_KEYWORD, ENJOYMENT_KEYWORD, SUSTAINABILITY_KEYWORD};
use super::{
    categorize_change, categorize_income, extract_leading_integer, has_motivation,
    map_acceptability, map_frequency_bucket, map_price_perception, partition_frequency_group,
    ChangeDirection, FrequencyGroup, IncomeLevel,
};
use crate::survey::RawRecord;

/// A survey participant with every derived field computed
#[derive(Debug, Clone, PartialEq)]
pub struct Respondent {
    pub raw: RawRecord,
    pub thrift_past_year_num: Option<f64>,
    pub thrift_five_years_ago_num: Option<f64>,
    pub price_affects_num: Option<i64>,
    pub condition_rating: Option<i64>,
    pub quality_brands: Option<i64>,
    pub style_fit: Option<i64>,
    pub social_accept_num: Option<i64>,
    pub price_perception_num: Option<i64>,
    pub thrift_frequency_group: Option<FrequencyGroup>,
    pub thrift_change: Option<f64>,
    pub motivated_by_sustainability: bool,
    pub motivated_by_affordability: bool,
    pub motivated_by_enjoyment: bool,
    pub income_level: Option<IncomeLevel>,
}

impl Respondent {
    /// Apply every recoding rule to one raw record
    pub fn recode(raw: RawRecord) -> Self {
        let past_year = map_frequency_bucket(raw.thrift_past_year.as_deref());
        let five_years_ago = map_frequency_bucket(raw.thrift_five_years_ago.as_deref());
        let motivations = raw.motivations.as_deref();

        Self {
            thrift_past_year_num: past_year,
            thrift_five_years_ago_num: five_years_ago,
            price_affects_num: extract_leading_integer(raw.price_affects_decision.as_deref()),
            condition_rating: extract_leading_integer(raw.clothes_good_condition.as_deref()),
            quality_brands: extract_leading_integer(raw.find_quality_brands.as_deref()),
            style_fit: extract_leading_integer(raw.find_style_fit.as_deref()),
            social_accept_num: map_acceptability(raw.social_acceptability.as_deref()),
            price_perception_num: map_price_perception(raw.price_perception.as_deref()),
            thrift_frequency_group: partition_frequency_group(past_year),
            thrift_change: past_year.zip(five_years_ago).map(|(now, then)| now - then),
            motivated_by_sustainability: has_motivation(motivations, SUSTAINABILITY_KEYWORD),
            motivated_by_affordability: has_motivation(motivations, AFFORDABILITY_KEYWORD),
            motivated_by_enjoyment: has_motivation(motivations, ENJOYMENT_KEYWORD),
            income_level: categorize_income(raw.income.as_deref()),
            raw,
        }
    }

    /// International-student answer with surrounding whitespace removed
    ///
    /// The survey export carries answers such as "No " with a trailing space.
    pub fn international_student(&self) -> Option<&str> {
        self.raw
            .international_student
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    pub fn political_views(&self) -> Option<&str> {
        self.raw
            .political_views
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// A respondent in the paired subset (both frequencies known)
///
/// Borrowing the respondent keeps the cleaned table immutable while the
/// change direction is attached.
#[derive(Debug, Clone, Copy)]
pub struct PairedObservation<'a> {
    pub respondent: &'a Respondent,
    pub past_year: f64,
    pub five_years_ago: f64,
    pub change: f64,
    pub direction: ChangeDirection,
}

/// Admitted respondents: those with a recognized past-year frequency
#[derive(Debug, Clone, Default)]
pub struct CleanedTable {
    rows: Vec<Respondent>,
    excluded: usize,
}

impl CleanedTable {
    /// Recode every raw record and apply the admission filter
    pub fn from_raw(records: Vec<RawRecord>) -> Self {
        Self::admit(records.into_iter().map(Respondent::recode))
    }

    /// Keep respondents whose past-year frequency is known
    pub fn admit<I: IntoIterator<Item = Respondent>>(respondents: I) -> Self {
        let mut rows = Vec::new();
        let mut excluded = 0;
        for respondent in respondents {
            if respondent.thrift_past_year_num.is_some() {
                rows.push(respondent);
            } else {
                tracing::debug!(
                    respondent = %respondent.raw.respondent_id,
                    "Excluded: past-year frequency missing or unrecognized"
                );
                excluded += 1;
            }
        }
        tracing::info!(admitted = rows.len(), excluded, "Applied admission filter");
        Self { rows, excluded }
    }

    pub fn rows(&self) -> &[Respondent] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of raw records rejected by the admission filter
    pub fn excluded(&self) -> usize {
        self.excluded
    }

    /// Respondents with both frequencies known, with their change band
    pub fn paired(&self) -> Vec<PairedObservation<'_>> {
        self.rows
            .iter()
            .filter_map(|respondent| {
                let past_year = respondent.thrift_past_year_num?;
                let five_years_ago = respondent.thrift_five_years_ago_num?;
                let change = past_year - five_years_ago;
                Some(PairedObservation {
                    respondent,
                    past_year,
                    five_years_ago,
                    change,
                    direction: categorize_change(change),
                })
            })
            .collect()
    }

    /// Non-null values of a numeric field, in row order
    pub fn values<F>(&self, field: F) -> Vec<f64>
    where
        F: Fn(&Respondent) -> Option<f64>,
    {
        self.rows.iter().filter_map(field).collect()
    }
}
