//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.launchstats.toml` files.

use crate::models::{SummaryOptions, DEFAULT_TOP_SITES, DEFAULT_WINDOWS};
use crate::source::DEFAULT_API_URL;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".launchstats.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Launch data source settings.
    #[serde(default)]
    pub source: SourceConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Default output file path.
    #[serde(default = "default_output")]
    pub output: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
        }
    }
}

fn default_output() -> String {
    "launch_stats.md".to_string()
}

/// Launch API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Launches endpoint returning a JSON array.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout() -> u64 {
    30
}

/// Report generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Number of rows in the top launch sites table.
    #[serde(default = "default_top_sites")]
    pub top_sites: usize,

    /// Recency windows in days.
    #[serde(default = "default_windows")]
    pub windows: Vec<u32>,

    /// Include the launches-per-year chart.
    #[serde(default = "default_true")]
    pub include_year_chart: bool,

    /// Include the top launch sites table.
    #[serde(default = "default_true")]
    pub include_sites_table: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_sites: default_top_sites(),
            windows: default_windows(),
            include_year_chart: true,
            include_sites_table: true,
        }
    }
}

fn default_top_sites() -> usize {
    DEFAULT_TOP_SITES
}

fn default_windows() -> Vec<u32> {
    DEFAULT_WINDOWS.to_vec()
}

fn default_true() -> bool {
    true
}

impl ReportConfig {
    /// Aggregation options derived from the report settings.
    pub fn summary_options(&self) -> SummaryOptions {
        SummaryOptions {
            windows: self.windows.clone(),
            top_sites: self.top_sites,
        }
    }
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(CONFIG_FILE_NAME);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings, but only
    /// when they were actually given.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref api_url) = args.api_url {
            self.source.api_url = api_url.clone();
        }
        if let Some(timeout) = args.timeout {
            self.source.timeout_seconds = timeout;
        }

        if let Some(ref output) = args.output {
            self.general.output = output.display().to_string();
        }
        if let Some(top_sites) = args.top_sites {
            self.report.top_sites = top_sites;
        }
        if let Some(ref windows) = args.windows {
            self.report.windows = windows.clone();
        }
    }

    /// Check the merged settings, whichever layer they came from.
    pub fn validate(&self) -> Result<()> {
        if self.report.top_sites == 0 {
            bail!("report.top_sites must be at least 1");
        }
        if self.report.windows.is_empty() {
            bail!("report.windows needs at least one window");
        }
        if self.source.timeout_seconds == 0 {
            bail!("source.timeout_seconds must be at least 1");
        }
        Ok(())
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
