//! Launch dashboard state.
//!
//! The dashboard starts out loading, awaits one fetch from a
//! [`LaunchDataSource`], and then holds either the launch list or the fetch
//! error. Every view is computed from the held list on access; while loading
//! or after a failure the views are `None`, never zero.

use crate::analysis::{self, LaunchIdResolver, SiteNameResolver};
use crate::models::{
    Launch, LaunchSiteStats, LaunchSummary, OutcomeDistribution, SummaryOptions, YearSeries,
};
use crate::source::{FetchError, LaunchDataSource};
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

/// Where the dashboard is in its one-shot load.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    /// No fetch has completed yet.
    Loading,
    /// The latest fetch succeeded.
    Ready(Vec<Launch>),
    /// The latest fetch failed.
    Failed(FetchError),
}

/// Read-only launch statistics over the latest completed fetch.
pub struct LaunchDashboard {
    state: LoadState,
    options: SummaryOptions,
    resolver: Box<dyn SiteNameResolver + Send + Sync>,
}

impl std::fmt::Debug for LaunchDashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LaunchDashboard")
            .field("state", &self.state)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Default for LaunchDashboard {
    fn default() -> Self {
        Self::new(SummaryOptions::default())
    }
}

impl LaunchDashboard {
    /// Create a dashboard in the loading state.
    pub fn new(options: SummaryOptions) -> Self {
        Self {
            state: LoadState::Loading,
            options,
            resolver: Box::new(LaunchIdResolver),
        }
    }

    /// Replace the site name heuristic used by [`Self::top_launch_sites`].
    pub fn with_resolver<R>(mut self, resolver: R) -> Self
    where
        R: SiteNameResolver + Send + Sync + 'static,
    {
        self.resolver = Box::new(resolver);
        self
    }

    /// Fetch launches from `source` and replace the current state.
    ///
    /// Returns the number of launches fetched. On failure the error is kept
    /// as the dashboard state and also returned. The state only changes once
    /// the fetch resolves, so a cancelled reload keeps the previous result.
    pub async fn load(&mut self, source: &dyn LaunchDataSource) -> Result<usize, FetchError> {
        debug!("Loading launches from {}", source.description());

        match source.fetch_all().await {
            Ok(launches) => {
                let count = launches.len();
                info!("Dashboard ready with {} launches", count);
                self.state = LoadState::Ready(launches);
                Ok(count)
            }
            Err(e) => {
                warn!("Failed to load launches from {}: {}", source.description(), e);
                self.state = LoadState::Failed(e.clone());
                Err(e)
            }
        }
    }

    /// True until a fetch has completed (successfully or not).
    pub fn loading(&self) -> bool {
        matches!(self.state, LoadState::Loading)
    }

    /// True if the latest fetch failed.
    pub fn is_failed(&self) -> bool {
        matches!(self.state, LoadState::Failed(_))
    }

    /// The error from the latest fetch, if it failed.
    pub fn error(&self) -> Option<&FetchError> {
        match &self.state {
            LoadState::Failed(e) => Some(e),
            _ => None,
        }
    }

    /// The launch list, once loaded.
    pub fn launches(&self) -> Option<&[Launch]> {
        match &self.state {
            LoadState::Ready(launches) => Some(launches.as_slice()),
            _ => None,
        }
    }

    /// Number of launches.
    pub fn total_launches(&self) -> Option<usize> {
        self.launches().map(analysis::total_launches)
    }

    /// Number of successful launches.
    pub fn successful_launches(&self) -> Option<usize> {
        self.launches().map(analysis::successful_launches)
    }

    /// Number of failed launches.
    pub fn failed_launches(&self) -> Option<usize> {
        self.launches().map(analysis::failed_launches)
    }

    /// Number of launches with no outcome data.
    pub fn unknown_launches(&self) -> Option<usize> {
        self.launches().map(analysis::unknown_launches)
    }

    /// Success percentage, rounded to one decimal.
    pub fn success_rate(&self) -> Option<f64> {
        self.launches().map(analysis::success_rate)
    }

    /// Dated launches within `days` of `now`.
    pub fn launches_in_window(&self, days: u32, now: DateTime<Utc>) -> Option<usize> {
        self.launches()
            .map(|launches| analysis::launches_in_window(launches, days, now))
    }

    /// Data for the outcome chart.
    pub fn outcome_distribution(&self) -> Option<OutcomeDistribution> {
        self.launches().map(analysis::outcome_distribution)
    }

    /// Dated launches per UTC year, ascending.
    pub fn launches_per_year(&self) -> Option<YearSeries> {
        self.launches().map(analysis::launches_per_year)
    }

    /// Busiest sites, limited to the configured number of entries.
    pub fn top_launch_sites(&self) -> Option<Vec<LaunchSiteStats>> {
        self.launches().map(|launches| {
            analysis::top_launch_sites_with(launches, self.options.top_sites, self.resolver.as_ref())
        })
    }

    /// All views at once, computed for `now`.
    pub fn summary(&self, now: DateTime<Utc>) -> Option<LaunchSummary> {
        self.launches().map(|launches| {
            LaunchSummary::from_launches_with(launches, now, &self.options, self.resolver.as_ref())
        })
    }
}
