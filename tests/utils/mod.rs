// Survey fixture builder shared by the CLI integration tests
//
// Writes a 23-column survey export into a temp directory so each test can run
// the binary against a known file.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const HEADER: &str = "respondentID,duration_hours,age_group,program,year_of_study,\
international_student,employed,income,housing,living_arrangement,hometown_size,has_pets,\
political_views,motivations,thrift_past_year,thrift_five_years_ago,price_affects_decision,\
clothes_good_condition,find_quality_brands,find_style_fit,clothing_durability,\
price_perception,social_acceptability";

/// One survey row; unset answers are left empty
#[derive(Debug, Clone, Default)]
pub struct Row {
    pub international: &'static str,
    pub income: &'static str,
    pub political: &'static str,
    pub motivations: &'static str,
    pub past_year: &'static str,
    pub five_years_ago: &'static str,
    pub price_affects: &'static str,
    pub condition: &'static str,
    pub brands: &'static str,
    pub style: &'static str,
    pub price_perception: &'static str,
    pub social: &'static str,
}

impl Row {
    fn cells(&self, id: usize) -> [String; 23] {
        [
            format!("R{id}"),
            "0.2".to_string(),
            "18-22".to_string(),
            "Science".to_string(),
            "2".to_string(),
            self.international.to_string(),
            "No".to_string(),
            self.income.to_string(),
            "Residence".to_string(),
            "Roommates".to_string(),
            "Medium".to_string(),
            "No".to_string(),
            self.political.to_string(),
            self.motivations.to_string(),
            self.past_year.to_string(),
            self.five_years_ago.to_string(),
            self.price_affects.to_string(),
            self.condition.to_string(),
            self.brands.to_string(),
            self.style.to_string(),
            "3 - Sometimes".to_string(),
            self.price_perception.to_string(),
            self.social.to_string(),
        ]
    }
}

/// A temp directory holding `survey.csv` and an `out/` directory for results
pub struct SurveyFixture {
    pub dir: TempDir,
}

impl SurveyFixture {
    pub fn new(rows: &[Row]) -> Self {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record(HEADER.split(','))
            .expect("write header");
        for (i, row) in rows.iter().enumerate() {
            writer.write_record(row.cells(i + 1)).expect("write row");
        }
        let bytes = writer.into_inner().expect("flush survey");
        Self::from_text(&String::from_utf8(bytes).expect("utf-8 survey"))
    }

    pub fn from_text(text: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        fs::write(dir.path().join("survey.csv"), text).expect("write survey");
        Self { dir }
    }

    pub fn input(&self) -> PathBuf {
        self.dir.path().join("survey.csv")
    }

    pub fn output(&self) -> PathBuf {
        self.dir.path().join("out")
    }

    pub fn read_output(&self, name: &str) -> String {
        fs::read_to_string(self.output().join(name)).expect("read output file")
    }
}

pub fn exists(dir: &Path, name: &str) -> bool {
    dir.join(name).is_file()
}

const FREQUENCIES: [&str; 6] = [
    "I did not thrift",
    "1 to 3 times",
    "4 to 8 times",
    "9 to 12 times",
    "13 to 20 times",
    "21 or more times",
];

/// A varied sample where every test in the battery has enough data
pub fn varied_rows(count: usize) -> Vec<Row> {
    let likert = ["1 - Never", "2 - Rarely", "3 - Sometimes", "4 - Often", "5 - Always"];
    let social = [
        "1 - Very Unacceptable",
        "2 - Unacceptable",
        "3 - Neutral",
        "4 - Acceptable",
        "5 - Very Acceptable",
    ];
    let incomes = ["$0-20,000", "$20,001-40,000", "$40,001-60,000", "$60,001-80,000", "$80,001 or more"];
    let prices = ["Underpriced", "Priced correctly", "Overpriced"];
    let motivations = ["Affordability", "Sustainability, Affordability", "Enjoyment", "Sustainability"];
    let politics = ["Left", "Centre", "Right"];

    (0..count)
        .map(|i| Row {
            international: if i % 3 == 0 { "Yes" } else { "No" },
            income: incomes[i % 5],
            political: politics[i % 3],
            motivations: motivations[i % 4],
            past_year: FREQUENCIES[i % 6],
            five_years_ago: FREQUENCIES[(i * 5 + 1) % 6],
            price_affects: likert[(i * 2) % 5],
            condition: likert[(i + 1) % 5],
            brands: likert[(i * 3) % 5],
            style: likert[(i + i / 6) % 5],
            price_perception: prices[(i / 2) % 3],
            social: social[(i * 7) % 5],
        })
        .collect()
}
