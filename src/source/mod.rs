//! Launch data sources.
//!
//! A [`LaunchDataSource`] produces the raw launch list in one shot. The
//! aggregator never talks to a source directly; the dashboard awaits a
//! single fetch and keeps either the list or the [`FetchError`].

mod file;
mod http;

pub use file::FileLaunchSource;
pub use http::{HttpLaunchSource, DEFAULT_API_URL};

use crate::models::Launch;
use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

/// Errors that can occur while fetching launches.
///
/// Kept `Clone` so a failed load can be stored and reported later.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The server answered with a non-success status or the transfer broke.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Could not reach the server.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Timeout waiting for response.
    #[error("Request timed out")]
    Timeout,

    /// The body is not a list of launches.
    #[error("Failed to parse launch data: {0}")]
    Parse(String),

    /// The source answered, but with no launch list at all.
    #[error("Launch source returned no data")]
    Empty,

    /// Reading a local source failed.
    #[error("Failed to read launch data: {0}")]
    Io(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if err.is_connect() {
            FetchError::Connection(err.to_string())
        } else if err.is_decode() {
            FetchError::Parse(err.to_string())
        } else {
            FetchError::Http(err.to_string())
        }
    }
}

impl From<std::io::Error> for FetchError {
    fn from(err: std::io::Error) -> Self {
        FetchError::Io(err.to_string())
    }
}

/// Something that can produce the full launch list.
#[async_trait]
pub trait LaunchDataSource: Send + Sync + Debug {
    /// Fetch every launch record.
    ///
    /// An empty list is a valid answer; "no answer" is [`FetchError::Empty`].
    async fn fetch_all(&self) -> Result<Vec<Launch>, FetchError>;

    /// Human-readable description of the source (URL or path).
    fn description(&self) -> &str;
}

/// Parse a JSON launch array. A JSON `null` body means the source returned
/// nothing.
pub(crate) fn parse_launches(body: &str) -> Result<Vec<Launch>, FetchError> {
    let launches: Option<Vec<Launch>> =
        serde_json::from_str(body).map_err(|e| FetchError::Parse(e.to_string()))?;

    launches.ok_or(FetchError::Empty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Outcome;

    #[test]
    fn test_parse_launch_array() {
        let body = r#"[
            {"id": "a", "name": "One", "date_utc": "2020-01-01T00:00:00.000Z", "success": true},
            {"id": "b", "name": "Two", "date_utc": null, "success": null}
        ]"#;

        let launches = parse_launches(body).unwrap();
        assert_eq!(launches.len(), 2);
        assert_eq!(launches[0].outcome, Outcome::Success);
        assert_eq!(launches[1].outcome, Outcome::Unknown);
    }

    #[test]
    fn test_parse_empty_array_is_valid() {
        assert_eq!(parse_launches("[]").unwrap(), Vec::<Launch>::new());
    }

    #[test]
    fn test_parse_null_is_empty_error() {
        assert_eq!(parse_launches("null"), Err(FetchError::Empty));
    }

    #[test]
    fn test_parse_garbage() {
        assert!(matches!(
            parse_launches(r#"{"docs": []}"#),
            Err(FetchError::Parse(_))
        ));
        assert!(matches!(parse_launches("<html>"), Err(FetchError::Parse(_))));
    }
}
