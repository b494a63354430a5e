//! Data models for the launch statistics dashboard.
//!
//! This module contains the launch records consumed from the data source,
//! the derived views computed by the aggregator, and the report structures
//! handed to the renderers.

use crate::analysis::{self, LaunchIdResolver, SiteNameResolver};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Labels paired with [`OutcomeDistribution::data`], in order.
pub const OUTCOME_LABELS: [&str; 3] = ["Success", "Failed", "Unknown"];

/// Default recency windows, in days.
pub const DEFAULT_WINDOWS: [u32; 3] = [30, 90, 365];

/// Default number of entries in the top launch sites table.
pub const DEFAULT_TOP_SITES: usize = 5;

/// Outcome of a launch.
///
/// The API reports `success` as `true`, `false` or `null`; a missing or null
/// value means the outcome is not known, which is kept distinct from failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<bool>", into = "Option<bool>")]
pub enum Outcome {
    /// Launch succeeded
    Success,
    /// Launch failed
    Failure,
    /// No outcome data
    #[default]
    Unknown,
}

impl From<Option<bool>> for Outcome {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(true) => Outcome::Success,
            Some(false) => Outcome::Failure,
            None => Outcome::Unknown,
        }
    }
}

impl From<Outcome> for Option<bool> {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success => Some(true),
            Outcome::Failure => Some(false),
            Outcome::Unknown => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Success => write!(f, "Success"),
            Outcome::Failure => write!(f, "Failed"),
            Outcome::Unknown => write!(f, "Unknown"),
        }
    }
}

impl Outcome {
    /// Returns an emoji representation of the outcome.
    pub fn emoji(&self) -> &'static str {
        match self {
            Outcome::Success => "🟢",
            Outcome::Failure => "🔴",
            Outcome::Unknown => "🟠",
        }
    }
}

/// A single historical launch record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Launch {
    /// Launch identifier. May be missing or empty in source data.
    #[serde(default)]
    pub id: Option<String>,
    /// Mission name.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    /// Launch time in UTC, if known.
    #[serde(default)]
    pub date_utc: Option<DateTime<Utc>>,
    /// Launch outcome (the API's `success` field).
    #[serde(rename = "success", default)]
    pub outcome: Outcome,
}

impl Launch {
    /// Creates a launch with the given identifier and name, no date and an
    /// unknown outcome.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            name: name.into(),
            date_utc: None,
            outcome: Outcome::Unknown,
        }
    }

    /// Sets the launch date.
    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date_utc = Some(date);
        self
    }

    /// Sets the launch outcome.
    pub fn with_outcome(mut self, outcome: Outcome) -> Self {
        self.outcome = outcome;
        self
    }

    /// Returns true if the record carries a usable (non-blank) identifier.
    pub fn has_id(&self) -> bool {
        self.id.as_deref().is_some_and(|id| !id.trim().is_empty())
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Per-site launch statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchSiteStats {
    /// Site label.
    pub site_name: String,
    /// Number of launches attributed to the site (at least 1).
    pub launch_count: usize,
    /// Number of successful launches, never above `launch_count`.
    pub success_count: usize,
    /// Success percentage, rounded to one decimal.
    pub success_rate: f64,
}

/// Launch count for one recency window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowCount {
    /// Window size in days.
    pub days: u32,
    /// Dated launches inside the window.
    pub count: usize,
}

impl WindowCount {
    /// Human label for the window ("Last 30 days", "Last year").
    pub fn label(&self) -> String {
        match self.days {
            1 => "Last day".to_string(),
            365 => "Last year".to_string(),
            days => format!("Last {} days", days),
        }
    }
}

/// Outcome counts for categorical charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeDistribution {
    /// Always [`OUTCOME_LABELS`].
    pub labels: Vec<String>,
    /// Successful, failed and unknown counts.
    pub data: [f64; 3],
}

/// Launches per calendar year, as parallel arrays.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct YearSeries {
    /// Year labels, strictly ascending.
    pub labels: Vec<String>,
    /// Launch count for each year in `labels`.
    pub counts: Vec<f64>,
}

impl YearSeries {
    /// Returns true if no dated launches were seen.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Iterate over `(label, count)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.counts.iter().copied())
    }
}

/// Knobs for computing a [`LaunchSummary`].
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryOptions {
    /// Recency windows in days.
    pub windows: Vec<u32>,
    /// Maximum number of launch sites to keep.
    pub top_sites: usize,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            windows: DEFAULT_WINDOWS.to_vec(),
            top_sites: DEFAULT_TOP_SITES,
        }
    }
}

/// Every derived view of a launch list at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchSummary {
    /// Total number of launches.
    pub total: usize,
    /// Successful launches.
    pub successful: usize,
    /// Failed launches.
    pub failed: usize,
    /// Launches without outcome data.
    pub unknown: usize,
    /// Success percentage, rounded to one decimal.
    pub success_rate: f64,
    /// Launch counts for each recency window.
    pub recent: Vec<WindowCount>,
    /// Outcome chart input.
    pub outcomes: OutcomeDistribution,
    /// Per-year chart input.
    pub per_year: YearSeries,
    /// Busiest launch sites.
    pub top_sites: Vec<LaunchSiteStats>,
}

impl LaunchSummary {
    /// Computes a summary from a list of launches.
    pub fn from_launches(launches: &[Launch], now: DateTime<Utc>, options: &SummaryOptions) -> Self {
        Self::from_launches_with(launches, now, options, &LaunchIdResolver)
    }

    /// Computes a summary, grouping launch sites with `resolver`.
    pub fn from_launches_with<R>(
        launches: &[Launch],
        now: DateTime<Utc>,
        options: &SummaryOptions,
        resolver: &R,
    ) -> Self
    where
        R: SiteNameResolver + ?Sized,
    {
        Self {
            total: analysis::total_launches(launches),
            successful: analysis::successful_launches(launches),
            failed: analysis::failed_launches(launches),
            unknown: analysis::unknown_launches(launches),
            success_rate: analysis::success_rate(launches),
            recent: analysis::recent_activity(launches, &options.windows, now),
            outcomes: analysis::outcome_distribution(launches),
            per_year: analysis::launches_per_year(launches),
            top_sites: analysis::top_launch_sites_with(launches, options.top_sites, resolver),
        }
    }
}

/// A named data series for a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    /// Series name shown in the legend.
    pub name: String,
    /// One value per label.
    pub data: Vec<f64>,
}

/// Rendering hints passed along to chart consumers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartOptions {
    /// Colors, one per category or series.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub palette: Vec<String>,
    /// Number of Y-axis ticks, if the chart has a value axis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_axis_ticks: Option<u32>,
    /// Draw horizontal grid lines.
    #[serde(default)]
    pub y_axis_lines: bool,
    /// Draw vertical grid lines.
    #[serde(default)]
    pub x_axis_lines: bool,
}

/// Chart-ready data for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSet {
    /// Outcome donut chart labels.
    pub outcome_labels: Vec<String>,
    /// Outcome counts, parallel to `outcome_labels`.
    pub outcome_data: Vec<f64>,
    /// Outcome chart palette.
    pub outcome_options: ChartOptions,
    /// Year labels for the launches per year bar chart.
    pub year_labels: Vec<String>,
    /// Bar chart series; empty when there are no launches.
    pub year_series: Vec<ChartSeries>,
    /// Bar chart axis settings.
    pub year_options: ChartOptions,
}

impl ChartSet {
    /// Builds chart inputs from a computed summary.
    pub fn from_summary(summary: &LaunchSummary) -> Self {
        // An empty launch list yields no bar series at all.
        let year_series = if summary.total == 0 {
            Vec::new()
        } else {
            vec![ChartSeries {
                name: "Launches".to_string(),
                data: summary.per_year.counts.clone(),
            }]
        };

        Self {
            outcome_labels: summary.outcomes.labels.clone(),
            outcome_data: summary.outcomes.data.to_vec(),
            outcome_options: ChartOptions {
                palette: vec![
                    "#00C853".to_string(),
                    "#F44336".to_string(),
                    "#FFA726".to_string(),
                ],
                ..ChartOptions::default()
            },
            year_labels: summary.per_year.labels.clone(),
            year_series,
            year_options: ChartOptions {
                palette: Vec::new(),
                y_axis_ticks: Some(10),
                y_axis_lines: true,
                x_axis_lines: false,
            },
        }
    }
}

/// Metadata about a generated report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Where the launches came from (URL or file path).
    pub source: String,
    /// Instant used as "now" for recency windows.
    pub generated_at: DateTime<Utc>,
    /// Number of launch records fetched.
    pub launches_fetched: usize,
    /// Time spent fetching and aggregating, in seconds.
    pub duration_seconds: f64,
}

/// The complete dashboard report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Source and timing details.
    pub metadata: ReportMetadata,
    /// Aggregated statistics.
    pub summary: LaunchSummary,
    /// Chart-ready series derived from the summary.
    pub charts: ChartSet,
}

impl Report {
    /// Creates a report, deriving chart data from the summary.
    pub fn new(metadata: ReportMetadata, summary: LaunchSummary) -> Self {
        let charts = ChartSet::from_summary(&summary);
        Self {
            metadata,
            summary,
            charts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_outcome_from_option() {
        assert_eq!(Outcome::from(Some(true)), Outcome::Success);
        assert_eq!(Outcome::from(Some(false)), Outcome::Failure);
        assert_eq!(Outcome::from(None), Outcome::Unknown);
    }

    #[test]
    fn test_deserialize_launch() {
        let json = r#"{
            "id": "5eb87cd9ffd86e000604b32a",
            "name": "FalconSat",
            "date_utc": "2006-03-24T22:30:00.000Z",
            "success": false,
            "rocket": "5e9d0d95eda69955f709d1eb"
        }"#;

        let launch: Launch = serde_json::from_str(json).unwrap();
        assert_eq!(launch.id.as_deref(), Some("5eb87cd9ffd86e000604b32a"));
        assert_eq!(launch.name, "FalconSat");
        assert_eq!(
            launch.date_utc,
            Some(Utc.with_ymd_and_hms(2006, 3, 24, 22, 30, 0).unwrap())
        );
        assert_eq!(launch.outcome, Outcome::Failure);
    }

    #[test]
    fn test_deserialize_sparse_launch() {
        let launch: Launch =
            serde_json::from_str(r#"{"name": null, "date_utc": null, "success": null}"#).unwrap();
        assert_eq!(launch.id, None);
        assert_eq!(launch.name, "");
        assert_eq!(launch.date_utc, None);
        assert_eq!(launch.outcome, Outcome::Unknown);

        let launch: Launch = serde_json::from_str("{}").unwrap();
        assert_eq!(launch.outcome, Outcome::Unknown);
    }

    #[test]
    fn test_outcome_serializes_as_nullable_bool() {
        let launch = Launch::new("a", "Demo").with_outcome(Outcome::Success);
        let json = serde_json::to_value(&launch).unwrap();
        assert_eq!(json["success"], serde_json::Value::Bool(true));

        let launch = Launch::new("b", "Demo");
        let json = serde_json::to_value(&launch).unwrap();
        assert!(json["success"].is_null());
    }

    #[test]
    fn test_has_id() {
        assert!(Launch::new("abc", "x").has_id());
        assert!(!Launch::new("   ", "x").has_id());
        assert!(!Launch::new("", "x").has_id());

        let mut launch = Launch::new("abc", "x");
        launch.id = None;
        assert!(!launch.has_id());
    }

    #[test]
    fn test_window_label() {
        assert_eq!(WindowCount { days: 30, count: 0 }.label(), "Last 30 days");
        assert_eq!(WindowCount { days: 365, count: 0 }.label(), "Last year");
    }

    #[test]
    fn test_chart_set_for_empty_summary() {
        let summary =
            LaunchSummary::from_launches(&[], Utc::now(), &SummaryOptions::default());
        let charts = ChartSet::from_summary(&summary);

        assert!(charts.year_series.is_empty());
        assert!(charts.year_labels.is_empty());
        assert_eq!(charts.outcome_labels, OUTCOME_LABELS);
        assert_eq!(charts.outcome_options.palette.len(), 3);
        assert_eq!(charts.year_options.y_axis_ticks, Some(10));
    }
}
