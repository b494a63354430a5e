//! Markdown report generation.
//!
//! This module renders the launch dashboard as a Markdown document, with
//! text bars standing in for the charts, or as JSON carrying the raw chart
//! series for a graphical consumer.

use crate::config::ReportConfig;
use crate::models::{
    LaunchSiteStats, LaunchSummary, Outcome, Report, ReportMetadata, WindowCount, YearSeries,
};
use anyhow::Result;

/// Width of the longest bar in the per-year chart.
const BAR_WIDTH: usize = 40;

/// Generate a complete Markdown report.
pub fn generate_markdown_report(report: &Report, config: &ReportConfig) -> String {
    let mut output = String::new();

    // Title
    output.push_str("# Launch Statistics\n\n");

    output.push_str(&generate_metadata_section(&report.metadata));
    output.push_str(&generate_table_of_contents(config));
    output.push_str(&generate_summary_section(&report.summary));
    output.push_str(&generate_recent_activity_section(&report.summary.recent));
    output.push_str(&generate_outcome_section(report));

    if config.include_year_chart {
        output.push_str(&generate_year_section(&report.summary.per_year));
    }

    if config.include_sites_table {
        output.push_str(&generate_sites_section(&report.summary.top_sites));
    }

    output.push_str(&generate_footer());

    output
}

/// Generate the metadata section.
fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!("- **Source:** {}\n", metadata.source));
    section.push_str(&format!(
        "- **Generated At:** {}\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!(
        "- **Launches Fetched:** {}\n",
        metadata.launches_fetched
    ));
    section.push_str(&format!(
        "- **Duration:** {:.1}s\n",
        metadata.duration_seconds
    ));
    section.push('\n');

    section
}

/// Generate the table of contents.
fn generate_table_of_contents(config: &ReportConfig) -> String {
    let mut toc = String::new();

    toc.push_str("## Table of Contents\n\n");
    toc.push_str("- [Metadata](#metadata)\n");
    toc.push_str("- [Summary](#summary)\n");
    toc.push_str("- [Recent Activity](#recent-activity)\n");
    toc.push_str("- [Launch Outcomes](#launch-outcomes)\n");

    if config.include_year_chart {
        toc.push_str("- [Launches per Year](#launches-per-year)\n");
    }
    if config.include_sites_table {
        toc.push_str("- [Top Launch Sites](#top-launch-sites)\n");
    }

    toc.push('\n');

    toc
}

/// Generate the summary section.
fn generate_summary_section(summary: &LaunchSummary) -> String {
    let mut section = String::new();

    section.push_str("## Summary\n\n");
    section.push_str(&format!(
        "| {} Success | {} Failed | {} Unknown | **Total** | **Success Rate** |\n",
        Outcome::Success.emoji(),
        Outcome::Failure.emoji(),
        Outcome::Unknown.emoji(),
    ));
    section.push_str("|:---:|:---:|:---:|:---:|:---:|\n");
    section.push_str(&format!(
        "| {} | {} | {} | **{}** | **{:.1}%** |\n\n",
        summary.successful, summary.failed, summary.unknown, summary.total, summary.success_rate
    ));

    section
}

/// Generate the recent activity section.
fn generate_recent_activity_section(recent: &[WindowCount]) -> String {
    let mut section = String::new();

    section.push_str("## Recent Activity\n\n");

    if recent.is_empty() {
        section.push_str("No recency windows configured.\n\n");
        return section;
    }

    section.push_str("| Window | Launches |\n");
    section.push_str("|:---|:---:|\n");
    for window in recent {
        section.push_str(&format!("| {} | {} |\n", window.label(), window.count));
    }
    section.push('\n');

    section
}

/// Generate the outcome distribution section.
fn generate_outcome_section(report: &Report) -> String {
    let mut section = String::new();
    let charts = &report.charts;
    let total = report.summary.total;

    section.push_str("## Launch Outcomes\n\n");
    section.push_str("| Outcome | Launches | Share | Color |\n");
    section.push_str("|:---|:---:|:---:|:---:|\n");

    for (i, (label, value)) in charts
        .outcome_labels
        .iter()
        .zip(&charts.outcome_data)
        .enumerate()
    {
        let share = if total > 0 {
            value / total as f64 * 100.0
        } else {
            0.0
        };
        let color = charts
            .outcome_options
            .palette
            .get(i)
            .map(String::as_str)
            .unwrap_or("-");
        section.push_str(&format!(
            "| {} | {} | {:.1}% | `{}` |\n",
            label, value, share, color
        ));
    }
    section.push('\n');

    section
}

/// Generate the launches-per-year section.
fn generate_year_section(per_year: &YearSeries) -> String {
    let mut section = String::new();

    section.push_str("## Launches per Year\n\n");

    if per_year.is_empty() {
        section.push_str("No dated launches.\n\n");
        return section;
    }

    let max = per_year.counts.iter().copied().fold(0.0_f64, f64::max);

    section.push_str("```\n");
    for (year, count) in per_year.iter() {
        section.push_str(&format!(
            "{:>6} | {:<width$} {}\n",
            year,
            render_bar(count, max),
            count,
            width = BAR_WIDTH
        ));
    }
    section.push_str("```\n\n");

    section
}

/// Render a horizontal bar scaled against `max`.
fn render_bar(value: f64, max: f64) -> String {
    if max <= 0.0 || value <= 0.0 {
        return String::new();
    }

    let len = ((value / max) * BAR_WIDTH as f64).round() as usize;
    "█".repeat(len.max(1))
}

/// Generate the top launch sites section.
fn generate_sites_section(sites: &[LaunchSiteStats]) -> String {
    let mut section = String::new();

    section.push_str("## Top Launch Sites\n\n");

    if sites.is_empty() {
        section.push_str("No launch sites to report.\n\n");
        return section;
    }

    section.push_str("| # | Site | Launches | Successes | Success Rate |\n");
    section.push_str("|:---:|:---|:---:|:---:|:---:|\n");
    for (i, site) in sites.iter().enumerate() {
        section.push_str(&format!(
            "| {} | {} | {} | {} | {:.1}% |\n",
            i + 1,
            code_cell(&site.site_name),
            site.launch_count,
            site.success_count,
            site.success_rate
        ));
    }
    section.push('\n');
    section.push_str("*Launch records carry no launchpad, so sites are keyed by launch id.*\n\n");

    section
}

/// Render `text` as inline code that is safe inside a table cell.
///
/// Pipes are escaped and the backtick fence is made longer than any
/// backtick run in the text.
fn code_cell(text: &str) -> String {
    let text = text.replace(['\r', '\n'], " ").replace('|', "\\|");

    let longest_run = text
        .split(|c: char| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    let fence = "`".repeat(longest_run + 1);

    if longest_run > 0 {
        format!("{fence} {text} {fence}")
    } else {
        format!("{fence}{text}{fence}")
    }
}

/// Generate the report footer.
fn generate_footer() -> String {
    let mut footer = String::new();

    footer.push_str("---\n\n");
    footer.push_str("*Report generated by LaunchStats*\n");

    footer
}

/// Generate a JSON report.
pub fn generate_json_report(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Launch, SummaryOptions};
    use chrono::{TimeZone, Utc};

    fn create_test_report() -> Report {
        let now = Utc.with_ymd_and_hms(2021, 6, 1, 0, 0, 0).unwrap();
        let launches = vec![
            Launch::new("a", "Alpha")
                .with_outcome(Outcome::Success)
                .with_date(Utc.with_ymd_and_hms(2020, 2, 1, 0, 0, 0).unwrap()),
            Launch::new("b", "Bravo")
                .with_outcome(Outcome::Success)
                .with_date(Utc.with_ymd_and_hms(2021, 5, 20, 0, 0, 0).unwrap()),
            Launch::new("c", "Charlie")
                .with_outcome(Outcome::Failure)
                .with_date(Utc.with_ymd_and_hms(2021, 3, 1, 0, 0, 0).unwrap()),
            Launch::new("d", "Delta"),
        ];

        let summary = LaunchSummary::from_launches(&launches, now, &SummaryOptions::default());
        let metadata = ReportMetadata {
            source: "https://api.spacexdata.com/v4/launches".to_string(),
            generated_at: now,
            launches_fetched: launches.len(),
            duration_seconds: 1.5,
        };

        Report::new(metadata, summary)
    }

    #[test]
    fn test_generate_markdown_report() {
        let report = create_test_report();
        let markdown = generate_markdown_report(&report, &ReportConfig::default());

        assert!(markdown.contains("# Launch Statistics"));
        assert!(markdown.contains("## Metadata"));
        assert!(markdown.contains("## Summary"));
        assert!(markdown.contains("## Recent Activity"));
        assert!(markdown.contains("## Launches per Year"));
        assert!(markdown.contains("## Top Launch Sites"));
        assert!(markdown.contains("**50.0%**"));
        assert!(markdown.contains("| Last 30 days | 1 |"));
        assert!(markdown.contains("| Last year | 2 |"));
    }

    #[test]
    fn test_optional_sections_can_be_disabled() {
        let report = create_test_report();
        let config = ReportConfig {
            include_year_chart: false,
            include_sites_table: false,
            ..ReportConfig::default()
        };
        let markdown = generate_markdown_report(&report, &config);

        assert!(!markdown.contains("## Launches per Year"));
        assert!(!markdown.contains("## Top Launch Sites"));
        assert!(!markdown.contains("#top-launch-sites"));
    }

    #[test]
    fn test_generate_metadata_section() {
        let report = create_test_report();
        let section = generate_metadata_section(&report.metadata);

        assert!(section.contains("https://api.spacexdata.com/v4/launches"));
        assert!(section.contains("2021-06-01 00:00:00 UTC"));
        assert!(section.contains("**Launches Fetched:** 4"));
    }

    #[test]
    fn test_year_section_bars() {
        let series = YearSeries {
            labels: vec!["2020".to_string(), "2021".to_string()],
            counts: vec![1.0, 2.0],
        };
        let section = generate_year_section(&series);

        assert!(section.contains("2020 | "));
        assert!(section.contains(&"█".repeat(BAR_WIDTH)));
        assert!(section.contains(&"█".repeat(BAR_WIDTH / 2)));
    }

    #[test]
    fn test_empty_sections() {
        assert!(generate_year_section(&YearSeries::default()).contains("No dated launches."));
        assert!(generate_sites_section(&[]).contains("No launch sites to report."));
    }

    #[test]
    fn test_outcome_section_uses_palette() {
        let report = create_test_report();
        let section = generate_outcome_section(&report);

        assert!(section.contains("| Success | 2 | 50.0% | `#00C853` |"));
        assert!(section.contains("| Failed | 1 | 25.0% | `#F44336` |"));
        assert!(section.contains("| Unknown | 1 | 25.0% | `#FFA726` |"));
    }

    #[test]
    fn test_site_names_cannot_break_table() {
        let sites = vec![LaunchSiteStats {
            site_name: "LC|39`A".to_string(),
            launch_count: 2,
            success_count: 1,
            success_rate: 50.0,
        }];

        let section = generate_sites_section(&sites);
        let row = section
            .lines()
            .find(|line| line.starts_with("| 1 |"))
            .unwrap();

        assert!(row.contains("`` LC\\|39`A ``"));
        // Five columns: four inner separators plus the outer edges.
        assert_eq!(row.replace("\\|", "").matches('|').count(), 6);
    }

    #[test]
    fn test_code_cell_plain_name() {
        assert_eq!(code_cell("5e9e4502f5090995de566f86"), "`5e9e4502f5090995de566f86`");
    }

    #[test]
    fn test_generate_json_report() {
        let report = create_test_report();
        let json = generate_json_report(&report).unwrap();

        assert!(json.contains("\"metadata\""));
        assert!(json.contains("\"success_rate\""));
        assert!(json.contains("\"year_series\""));
        assert!(json.contains("\"#00C853\""));
    }
}
