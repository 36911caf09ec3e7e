//! CLI argument parsing for thriftscope

use clap::Parser;
use std::path::PathBuf;

/// Default survey export file name, resolved against the working directory
pub const DEFAULT_INPUT: &str = "Survey_Data_GRP-04.csv";

#[derive(Parser, Debug)]
#[command(name = "thriftscope")]
#[command(version)]
#[command(
    about = "Recode the thrift-shopping survey and run its hypothesis-test battery",
    long_about = None
)]
pub struct Cli {
    /// Survey export (CSV with 23 columns and a header row)
    #[arg(value_name = "INPUT", default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// Directory that receives the CSV, JSON and plot outputs
    #[arg(short = 'o', long = "output-dir", value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Analysis settings (TOML); built-in defaults are used when omitted
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Skip rendering the SVG charts
    #[arg(long = "no-plots")]
    pub no_plots: bool,

    /// Print the summary record as JSON instead of the text report
    #[arg(long = "json")]
    pub json: bool,

    /// Enable debug tracing output to stderr
    #[arg(long = "debug")]
    pub debug: bool,
}

impl Cli {
    /// Where the charts go
    pub fn plots_dir(&self) -> PathBuf {
        self.output_dir.join("plots")
    }
}
