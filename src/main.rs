use anyhow::{Context, Result};
use clap::Parser;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;
use thriftscope::battery::{run_battery, BatteryReport, TableRow};
use thriftscope::cli::Cli;
use thriftscope::config::AnalysisConfig;
use thriftscope::json_output::SummaryRecord;
use thriftscope::recode::CleanedTable;
use thriftscope::{csv_output, survey, svg_output};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber; diagnostics go to stderr so stdout stays the report
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<AnalysisConfig> {
    let mut config = match &cli.config {
        Some(path) => AnalysisConfig::from_file(path)
            .with_context(|| format!("Invalid config file {}", path.display()))?,
        None => AnalysisConfig::default(),
    };
    if cli.no_plots {
        config.render_plots = false;
    }
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?;
    Ok(config)
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    Ok(BufWriter::new(file))
}

fn write_table<T: TableRow>(dir: &Path, name: &str, rows: &[T]) -> Result<()> {
    let path = dir.join(name);
    csv_output::write_table(create(&path)?, rows)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), rows = rows.len(), "Wrote table");
    Ok(())
}

fn write_outputs(cli: &Cli, table: &CleanedTable, report: &BatteryReport) -> Result<()> {
    let dir = &cli.output_dir;
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    let cleaned = dir.join("data_cleaned.csv");
    csv_output::write_cleaned(create(&cleaned)?, table)
        .with_context(|| format!("Failed to write {}", cleaned.display()))?;

    write_table(dir, "results_barriers_by_group.csv", &report.barriers)?;
    write_table(dir, "results_change_by_group.csv", &report.change_by_group)?;
    write_table(dir, "results_income_analysis.csv", &report.income)?;
    write_table(dir, "results_international_analysis.csv", &report.international)?;
    write_table(dir, "results_political_analysis.csv", &report.political)?;

    let summary_path = dir.join("analysis_results_summary.json");
    let json = SummaryRecord::from_report(report)
        .to_json()
        .context("Failed to serialize summary")?;
    fs::write(&summary_path, json)
        .with_context(|| format!("Failed to write {}", summary_path.display()))?;

    if report.config.render_plots {
        let plots = cli.plots_dir();
        let charts = svg_output::render_charts(table, report);
        svg_output::write_charts(&plots, &charts)
            .with_context(|| format!("Failed to write charts to {}", plots.display()))?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let config = load_config(&cli)?;
    let records = survey::load_survey(&cli.input)
        .with_context(|| format!("Failed to load survey {}", cli.input.display()))?;
    tracing::info!(records = records.len(), "Loaded survey");

    let table = CleanedTable::from_raw(records);
    let report = run_battery(&table, &config);

    write_outputs(&cli, &table, &report)?;

    if cli.json {
        println!("{}", SummaryRecord::from_report(&report).to_json()?);
    } else {
        print!("{}", report.to_report_string());
    }
    Ok(())
}
