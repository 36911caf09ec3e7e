//! CSV output for the cleaned table and the grouped result tables
//!
//! The cleaned table keeps the 23 raw survey columns and appends the derived
//! ones. Missing values are written as empty cells; flags as `True`/`False`
//! and frequencies with a decimal point, as the dataframe tools the analysts
//! load these files into expect.

use crate::battery::TableRow;
use crate::recode::{CleanedTable, Respondent};
use crate::survey::RAW_COLUMNS;
use std::io::Write;

/// Derived columns appended after the raw ones, in output order
pub const DERIVED_COLUMNS: [&str; 14] = [
    "thrift_past_year_num",
    "thrift_five_years_ago_num",
    "price_affects_num",
    "condition_rating",
    "quality_brands",
    "style_fit",
    "social_accept_num",
    "price_perception_num",
    "thrift_frequency_group",
    "thrift_change",
    "motivated_by_sustainability",
    "motivated_by_affordability",
    "motivated_by_enjoyment",
    "income_level",
];

fn float_cell(value: Option<f64>) -> String {
    value.map(|v| format!("{v:?}")).unwrap_or_default()
}

fn int_cell(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn flag_cell(value: bool) -> String {
    if value { "True" } else { "False" }.to_string()
}

fn derived_cells(r: &Respondent) -> [String; 14] {
    [
        float_cell(r.thrift_past_year_num),
        float_cell(r.thrift_five_years_ago_num),
        int_cell(r.price_affects_num),
        int_cell(r.condition_rating),
        int_cell(r.quality_brands),
        int_cell(r.style_fit),
        int_cell(r.social_accept_num),
        int_cell(r.price_perception_num),
        r.thrift_frequency_group
            .map(|g| g.label().to_string())
            .unwrap_or_default(),
        float_cell(r.thrift_change),
        flag_cell(r.motivated_by_sustainability),
        flag_cell(r.motivated_by_affordability),
        flag_cell(r.motivated_by_enjoyment),
        r.income_level
            .map(|l| l.label().to_string())
            .unwrap_or_default(),
    ]
}

/// Write every admitted respondent with raw and derived columns
pub fn write_cleaned<W: Write>(writer: W, table: &CleanedTable) -> csv::Result<()> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(RAW_COLUMNS.iter().chain(DERIVED_COLUMNS.iter()))?;

    for row in table.rows() {
        let raw = row.raw.values();
        let derived = derived_cells(row);
        out.write_record(
            raw.iter()
                .copied()
                .chain(derived.iter().map(String::as_str)),
        )?;
    }

    out.flush()?;
    Ok(())
}

/// Write one grouped result table; an empty table still gets its header
pub fn write_table<W: Write, T: TableRow>(writer: W, rows: &[T]) -> csv::Result<()> {
    let mut out = csv::Writer::from_writer(writer);
    if rows.is_empty() {
        out.write_record(T::COLUMNS)?;
    }
    for row in rows {
        out.serialize(row)?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battery::{
        barriers_by_group, change_by_group, income_analysis, international_analysis,
        political_analysis, run_battery, BarrierRow, ChangeRow, IncomeRow, InternationalRow,
        PoliticalRow,
    };
    use crate::config::AnalysisConfig;
    use crate::survey::{RawRecord, COLUMN_COUNT};

    fn table() -> CleanedTable {
        CleanedTable::from_raw(vec![
            RawRecord {
                respondent_id: "R1".to_string(),
                thrift_past_year: Some("9 to 12 times".to_string()),
                thrift_five_years_ago: Some("1 to 3 times".to_string()),
                motivations: Some("Affordability".to_string()),
                program: Some("Arts, Science".to_string()),
                income: Some("$80,001 or more".to_string()),
                ..RawRecord::default()
            },
            RawRecord {
                respondent_id: "R2".to_string(),
                thrift_past_year: None,
                ..RawRecord::default()
            },
        ])
    }

    fn write_to_string(table: &CleanedTable) -> String {
        let mut buffer = Vec::new();
        write_cleaned(&mut buffer, table).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_cleaned_header_has_raw_then_derived_columns() {
        let text = write_to_string(&table());
        let header: Vec<&str> = text.lines().next().unwrap().split(',').collect();
        assert_eq!(header.len(), COLUMN_COUNT + DERIVED_COLUMNS.len());
        assert_eq!(header[0], "respondentID");
        assert_eq!(header[COLUMN_COUNT], "thrift_past_year_num");
        assert_eq!(header.last(), Some(&"income_level"));
    }

    #[test]
    fn test_cleaned_rows_only_admitted() {
        let text = write_to_string(&table());
        let mut reader = csv::Reader::from_reader(text.as_bytes());
        let records: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();

        assert_eq!(records.len(), 1);
        let row = &records[0];
        assert_eq!(&row[0], "R1");
        assert_eq!(&row[3], "Arts, Science");
        assert_eq!(&row[COLUMN_COUNT], "10.5");
        assert_eq!(&row[COLUMN_COUNT + 1], "2.0");
        assert_eq!(&row[COLUMN_COUNT + 2], "");
        assert_eq!(&row[COLUMN_COUNT + 8], "Frequent Thrifters");
        assert_eq!(&row[COLUMN_COUNT + 9], "8.5");
        assert_eq!(&row[COLUMN_COUNT + 11], "True");
        assert_eq!(&row[COLUMN_COUNT + 12], "False");
        assert_eq!(&row[COLUMN_COUNT + 13], "High");
    }

    #[test]
    fn test_grouped_table_header_and_missing_cells() {
        let rows: Vec<BarrierRow> = barriers_by_group(&table());
        let mut buffer = Vec::new();
        write_table(&mut buffer, &rows).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();

        assert_eq!(
            lines.next(),
            Some(
                "thrift_frequency_group,n,avg_price_barrier,avg_condition,avg_quality_brands,\
                 avg_style_fit,avg_social_accept,pct_overpriced"
            )
        );
        assert_eq!(lines.next(), Some("Frequent Thrifters,1,,,,,,"));
    }

    fn table_text<T: TableRow>(rows: &[T]) -> String {
        let mut buffer = Vec::new();
        write_table(&mut buffer, rows).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_empty_grouped_table_writes_header() {
        let report = run_battery(&CleanedTable::default(), &AnalysisConfig::default());
        assert!(report.income.is_empty());
        assert_eq!(
            table_text(&report.income),
            "income_level,n,avg_frequency,pct_motivated_by_affordability\n"
        );
        assert_eq!(table_text(&report.political).lines().count(), 1);
    }

    #[test]
    fn test_declared_columns_match_serialized_header() {
        fn header<T: TableRow>(rows: &[T]) -> String {
            assert!(!rows.is_empty());
            table_text(rows).lines().next().unwrap().to_string()
        }

        let table = CleanedTable::from_raw(vec![RawRecord {
            respondent_id: "R1".to_string(),
            thrift_past_year: Some("4 to 8 times".to_string()),
            thrift_five_years_ago: Some("1 to 3 times".to_string()),
            income: Some("$0-20,000".to_string()),
            international_student: Some("Yes".to_string()),
            political_views: Some("Left".to_string()),
            ..RawRecord::default()
        }]);

        assert_eq!(header(&barriers_by_group(&table)), BarrierRow::COLUMNS.join(","));
        assert_eq!(
            header(&change_by_group(&table.paired())),
            ChangeRow::COLUMNS.join(",")
        );
        assert_eq!(
            header(&income_analysis(&table)),
            IncomeRow::COLUMNS.join(",")
        );
        assert_eq!(
            header(&international_analysis(&table)),
            InternationalRow::COLUMNS.join(",")
        );
        assert_eq!(
            header(&political_analysis(&table)),
            PoliticalRow::COLUMNS.join(",")
        );
    }
}
