//! Run settings for the survey analysis
//!
//! Every field has a default, so a config file only needs the keys it
//! changes:
//!
//! ```toml
//! significance_level = 0.01
//! equal_variance = false
//! render_plots = false
//! ```

use crate::hypothesis::TTestVariant;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Thresholds and rendering options for one analysis run
///
/// # Example
/// ```
/// use thriftscope::config::AnalysisConfig;
///
/// let config = AnalysisConfig::default();
/// assert_eq!(config.significance_level, 0.05);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Alpha for every test, and the family-wise rate for Tukey HSD
    pub significance_level: f64,

    /// VIF above which a predictor is flagged as severely collinear
    pub vif_threshold: f64,

    /// Pooled-variance t-test when true, Welch's when false
    pub equal_variance: bool,

    /// Respondents drawn for the paired-change line chart
    pub paired_plot_sample: usize,

    /// Seed for that draw, so reruns produce the same chart
    pub sample_seed: u64,

    pub frequency_bins: usize,
    pub change_bins: usize,

    /// Skip the SVG charts entirely
    pub render_plots: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            significance_level: 0.05,
            vif_threshold: 10.0,
            equal_variance: true,
            paired_plot_sample: 50,
            sample_seed: 42,
            frequency_bins: 15,
            change_bins: 20,
            render_plots: true,
        }
    }
}

impl AnalysisConfig {
    /// Load from a TOML file; missing keys keep their defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML")
    }

    pub fn ttest_variant(&self) -> TTestVariant {
        if self.equal_variance {
            TTestVariant::Pooled
        } else {
            TTestVariant::Welch
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        let alpha = self.significance_level;
        if alpha.is_nan() || alpha <= 0.0 || alpha >= 1.0 {
            return Err(format!(
                "significance_level must be in (0, 1), got {}",
                self.significance_level
            ));
        }

        if self.vif_threshold.is_nan() || self.vif_threshold <= 0.0 {
            return Err(format!(
                "vif_threshold must be positive, got {}",
                self.vif_threshold
            ));
        }

        if self.frequency_bins == 0 || self.change_bins == 0 {
            return Err(format!(
                "histogram bins must be >= 1, got frequency_bins={} change_bins={}",
                self.frequency_bins, self.change_bins
            ));
        }

        Ok(())
    }
}
