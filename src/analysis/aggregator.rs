//! Launch aggregation and statistics.
//!
//! Pure functions over a launch list. None of them fail: an empty list
//! yields zero counts and empty series.

use crate::analysis::sites::{LaunchIdResolver, SiteNameResolver};
use crate::models::{
    Launch, LaunchSiteStats, Outcome, OutcomeDistribution, WindowCount, YearSeries,
    OUTCOME_LABELS,
};
use chrono::{DateTime, Datelike, Duration, Utc};
use std::collections::{BTreeMap, HashMap};

/// Round a percentage to one decimal, ties to even.
pub fn round_percentage(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}

/// Percentage of `part` in `whole`, 0 when `whole` is 0.
fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    round_percentage(part as f64 / whole as f64 * 100.0)
}

fn count_outcome(launches: &[Launch], outcome: Outcome) -> usize {
    launches.iter().filter(|l| l.outcome == outcome).count()
}

/// Count all launches.
pub fn total_launches(launches: &[Launch]) -> usize {
    launches.len()
}

/// Count successful launches.
pub fn successful_launches(launches: &[Launch]) -> usize {
    count_outcome(launches, Outcome::Success)
}

/// Count failed launches.
pub fn failed_launches(launches: &[Launch]) -> usize {
    count_outcome(launches, Outcome::Failure)
}

/// Count launches with no outcome data.
pub fn unknown_launches(launches: &[Launch]) -> usize {
    count_outcome(launches, Outcome::Unknown)
}

/// Success percentage over all launches, rounded to one decimal.
pub fn success_rate(launches: &[Launch]) -> f64 {
    percentage(successful_launches(launches), total_launches(launches))
}

/// Count dated launches at or after `now - days`.
///
/// A window reaching past the earliest representable date counts every
/// dated launch.
pub fn launches_in_window(launches: &[Launch], days: u32, now: DateTime<Utc>) -> usize {
    let cutoff = now.checked_sub_signed(Duration::days(i64::from(days)));

    launches
        .iter()
        .filter_map(|l| l.date_utc)
        .filter(|date| cutoff.map_or(true, |cutoff| *date >= cutoff))
        .count()
}

/// Launch counts for each window, in the order given.
pub fn recent_activity(launches: &[Launch], windows: &[u32], now: DateTime<Utc>) -> Vec<WindowCount> {
    windows
        .iter()
        .map(|&days| WindowCount {
            days,
            count: launches_in_window(launches, days, now),
        })
        .collect()
}

/// Successful, failed and unknown counts for the outcome chart.
pub fn outcome_distribution(launches: &[Launch]) -> OutcomeDistribution {
    OutcomeDistribution {
        labels: OUTCOME_LABELS.iter().map(|s| s.to_string()).collect(),
        data: [
            successful_launches(launches) as f64,
            failed_launches(launches) as f64,
            unknown_launches(launches) as f64,
        ],
    }
}

/// Group dated launches by UTC calendar year, ascending.
pub fn launches_per_year(launches: &[Launch]) -> YearSeries {
    let mut per_year: BTreeMap<i32, usize> = BTreeMap::new();

    for date in launches.iter().filter_map(|l| l.date_utc) {
        *per_year.entry(date.year()).or_default() += 1;
    }

    let (labels, counts) = per_year
        .into_iter()
        .map(|(year, count)| (year.to_string(), count as f64))
        .unzip();

    YearSeries { labels, counts }
}

/// Top `n` launch sites by launch count, using the default site heuristic.
pub fn top_launch_sites(launches: &[Launch], n: usize) -> Vec<LaunchSiteStats> {
    top_launch_sites_with(launches, n, &LaunchIdResolver)
}

/// Top `n` launch sites by launch count.
///
/// Launches without a usable id are skipped. Groups with equal counts keep
/// the order in which they were first seen.
pub fn top_launch_sites_with<R>(launches: &[Launch], n: usize, resolver: &R) -> Vec<LaunchSiteStats>
where
    R: SiteNameResolver + ?Sized,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(String, usize, usize)> = Vec::new();

    for launch in launches.iter().filter(|l| l.has_id()) {
        let site = resolver.site_name(launch);
        let slot = *index.entry(site.clone()).or_insert_with(|| {
            groups.push((site, 0, 0));
            groups.len() - 1
        });

        let group = &mut groups[slot];
        group.1 += 1;
        if launch.outcome == Outcome::Success {
            group.2 += 1;
        }
    }

    // Stable sort: ties stay in discovery order.
    groups.sort_by_key(|(_, launch_count, _)| std::cmp::Reverse(*launch_count));
    groups.truncate(n);

    groups
        .into_iter()
        .map(|(site_name, launch_count, success_count)| LaunchSiteStats {
            site_name,
            launch_count,
            success_count,
            success_rate: percentage(success_count, launch_count),
        })
        .collect()
}
