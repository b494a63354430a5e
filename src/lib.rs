//! LaunchStats - launch statistics dashboard
//!
//! Fetches launch records from a [`source::LaunchDataSource`], aggregates
//! them with the pure functions in [`analysis`], and renders the result
//! through [`report`]. [`dashboard::LaunchDashboard`] ties the one-shot
//! fetch to the derived views.
//!
//! # Example
//!
//! ```no_run
//! use chrono::Utc;
//! use launchstats::dashboard::LaunchDashboard;
//! use launchstats::source::{HttpLaunchSource, DEFAULT_API_URL};
//! use std::time::Duration;
//!
//! # async fn demo() -> Result<(), launchstats::source::FetchError> {
//! let source = HttpLaunchSource::new(DEFAULT_API_URL, Duration::from_secs(30))?;
//! let mut dashboard = LaunchDashboard::default();
//! dashboard.load(&source).await?;
//!
//! if let Some(summary) = dashboard.summary(Utc::now()) {
//!     println!("{} launches, {:.1}% successful", summary.total, summary.success_rate);
//! }
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod models;
pub mod report;
pub mod source;

pub use dashboard::{LaunchDashboard, LoadState};
pub use models::{Launch, LaunchSiteStats, LaunchSummary, Outcome};
pub use source::{FetchError, LaunchDataSource};
