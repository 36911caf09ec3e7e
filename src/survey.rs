//! Survey ingestion
//!
//! Reads the fixed 23-column survey export into [`RawRecord`]s. The header row
//! is discarded and replaced by [`RAW_COLUMNS`]; only the column count is
//! checked. Empty cells become `None`, so downstream recoding sees the same
//! missing-value shape the survey tool produced.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Number of columns in the survey export
pub const COLUMN_COUNT: usize = 23;

/// Canonical column names, in input order
pub const RAW_COLUMNS: [&str; COLUMN_COUNT] = [
    "respondentID",
    "duration_hours",
    "age_group",
    "program",
    "year_of_study",
    "international_student",
    "employed",
    "income",
    "housing",
    "living_arrangement",
    "hometown_size",
    "has_pets",
    "political_views",
    "motivations",
    "thrift_past_year",
    "thrift_five_years_ago",
    "price_affects_decision",
    "clothes_good_condition",
    "find_quality_brands",
    "find_style_fit",
    "clothing_durability",
    "price_perception",
    "social_acceptability",
];

/// Input-shape errors. All of them abort the run before any analysis.
#[derive(Error, Debug)]
pub enum SurveyError {
    #[error("Failed to open survey file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed CSV in survey data: {0}")]
    Csv(#[from] csv::Error),

    #[error("Expected exactly {expected} columns on line {line}, found {found}")]
    ColumnCount {
        expected: usize,
        found: usize,
        line: u64,
    },

    #[error("Survey file has no header row")]
    MissingHeader,
}

pub type Result<T> = std::result::Result<T, SurveyError>;

/// One survey participant exactly as submitted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    pub respondent_id: String,
    pub duration_hours: Option<String>,
    pub age_group: Option<String>,
    pub program: Option<String>,
    pub year_of_study: Option<String>,
    pub international_student: Option<String>,
    pub employed: Option<String>,
    pub income: Option<String>,
    pub housing: Option<String>,
    pub living_arrangement: Option<String>,
    pub hometown_size: Option<String>,
    pub has_pets: Option<String>,
    pub political_views: Option<String>,
    /// Multi-select answer, delimiter-joined by the survey tool
    pub motivations: Option<String>,
    pub thrift_past_year: Option<String>,
    pub thrift_five_years_ago: Option<String>,
    pub price_affects_decision: Option<String>,
    pub clothes_good_condition: Option<String>,
    pub find_quality_brands: Option<String>,
    pub find_style_fit: Option<String>,
    pub clothing_durability: Option<String>,
    pub price_perception: Option<String>,
    pub social_acceptability: Option<String>,
}

impl RawRecord {
    /// Build a record from one CSV row, which must already have 23 fields
    fn from_fields(fields: &csv::StringRecord) -> Self {
        let cell = |idx: usize| -> Option<String> {
            fields
                .get(idx)
                .filter(|value| !value.trim().is_empty())
                .map(str::to_string)
        };

        Self {
            respondent_id: fields.get(0).unwrap_or_default().to_string(),
            duration_hours: cell(1),
            age_group: cell(2),
            program: cell(3),
            year_of_study: cell(4),
            international_student: cell(5),
            employed: cell(6),
            income: cell(7),
            housing: cell(8),
            living_arrangement: cell(9),
            hometown_size: cell(10),
            has_pets: cell(11),
            political_views: cell(12),
            motivations: cell(13),
            thrift_past_year: cell(14),
            thrift_five_years_ago: cell(15),
            price_affects_decision: cell(16),
            clothes_good_condition: cell(17),
            find_quality_brands: cell(18),
            find_style_fit: cell(19),
            clothing_durability: cell(20),
            price_perception: cell(21),
            social_acceptability: cell(22),
        }
    }

    /// Raw values in [`RAW_COLUMNS`] order, missing cells as empty strings
    pub fn values(&self) -> [&str; COLUMN_COUNT] {
        fn text(value: &Option<String>) -> &str {
            value.as_deref().unwrap_or("")
        }
        [
            self.respondent_id.as_str(),
            text(&self.duration_hours),
            text(&self.age_group),
            text(&self.program),
            text(&self.year_of_study),
            text(&self.international_student),
            text(&self.employed),
            text(&self.income),
            text(&self.housing),
            text(&self.living_arrangement),
            text(&self.hometown_size),
            text(&self.has_pets),
            text(&self.political_views),
            text(&self.motivations),
            text(&self.thrift_past_year),
            text(&self.thrift_five_years_ago),
            text(&self.price_affects_decision),
            text(&self.clothes_good_condition),
            text(&self.find_quality_brands),
            text(&self.find_style_fit),
            text(&self.clothing_durability),
            text(&self.price_perception),
            text(&self.social_acceptability),
        ]
    }
}

/// Load the survey export from disk
pub fn load_survey<P: AsRef<Path>>(path: P) -> Result<Vec<RawRecord>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| SurveyError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    read_survey(file)
}

/// Parse survey rows from any reader
///
/// The header row is required (its names are ignored) and every row, header
/// included, must have exactly [`COLUMN_COUNT`] fields.
pub fn read_survey<R: Read>(reader: R) -> Result<Vec<RawRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let header = rdr.headers()?;
    if header.is_empty() {
        return Err(SurveyError::MissingHeader);
    }
    if header.len() != COLUMN_COUNT {
        return Err(SurveyError::ColumnCount {
            expected: COLUMN_COUNT,
            found: header.len(),
            line: 1,
        });
    }

    let mut records = Vec::new();
    for row in rdr.records() {
        let row = row?;
        if row.len() != COLUMN_COUNT {
            return Err(SurveyError::ColumnCount {
                expected: COLUMN_COUNT,
                found: row.len(),
                line: row.position().map_or(0, csv::Position::line),
            });
        }
        records.push(RawRecord::from_fields(&row));
    }

    tracing::info!(rows = records.len(), "Loaded survey data");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header() -> String {
        (1..=COLUMN_COUNT)
            .map(|i| format!("Q{}", i))
            .collect::<Vec<_>>()
            .join(",")
    }

    fn row(id: &str, past_year: &str) -> String {
        let mut cells = vec![String::new(); COLUMN_COUNT];
        cells[0] = id.to_string();
        cells[5] = "Yes".to_string();
        cells[14] = past_year.to_string();
        cells.join(",")
    }

    #[test]
    fn test_read_survey_maps_columns_by_position() {
        let data = format!("{}\n{}\n", header(), row("R1", "1 to 3 times"));
        let records = read_survey(data.as_bytes()).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].respondent_id, "R1");
        assert_eq!(records[0].international_student.as_deref(), Some("Yes"));
        assert_eq!(records[0].thrift_past_year.as_deref(), Some("1 to 3 times"));
    }

    #[test]
    fn test_empty_cells_are_missing() {
        let data = format!("{}\n{}\n", header(), row("R1", ""));
        let records = read_survey(data.as_bytes()).unwrap();
        assert!(records[0].thrift_past_year.is_none());
        assert!(records[0].income.is_none());
    }

    #[test]
    fn test_wrong_header_width_is_fatal() {
        let data = "a,b,c\n1,2,3\n";
        match read_survey(data.as_bytes()) {
            Err(SurveyError::ColumnCount {
                expected, found, ..
            }) => {
                assert_eq!(expected, COLUMN_COUNT);
                assert_eq!(found, 3);
            }
            other => panic!("Expected ColumnCount error, got {:?}", other),
        }
    }

    #[test]
    fn test_short_row_reports_line() {
        let data = format!("{}\n{}\nR2,oops\n", header(), row("R1", "did not thrift"));
        match read_survey(data.as_bytes()) {
            Err(SurveyError::ColumnCount { found, line, .. }) => {
                assert_eq!(found, 2);
                assert_eq!(line, 3);
            }
            other => panic!("Expected ColumnCount error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file_is_open_error() {
        let err = load_survey("/nonexistent/survey.csv").unwrap_err();
        assert!(matches!(err, SurveyError::Open { .. }));
        assert!(err.to_string().contains("/nonexistent/survey.csv"));
    }

    #[test]
    fn test_values_round_trip_order() {
        let data = format!("{}\n{}\n", header(), row("R9", "4 to 8 times"));
        let records = read_survey(data.as_bytes()).unwrap();
        let values = records[0].values();
        assert_eq!(values[0], "R9");
        assert_eq!(values[14], "4 to 8 times");
        assert_eq!(values[22], "");
    }
}
