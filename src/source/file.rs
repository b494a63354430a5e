//! Launch source reading a JSON export from disk.

use super::{parse_launches, FetchError, LaunchDataSource};
use crate::models::Launch;
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::info;

/// Reads the same JSON array the HTTP API returns from a local file.
#[derive(Debug, Clone)]
pub struct FileLaunchSource {
    path: PathBuf,
    description: String,
}

impl FileLaunchSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let description = path.display().to_string();
        Self { path, description }
    }
}

#[async_trait]
impl LaunchDataSource for FileLaunchSource {
    async fn fetch_all(&self) -> Result<Vec<Launch>, FetchError> {
        info!("Reading launches from {}", self.path.display());

        let body = tokio::fs::read_to_string(&self.path).await?;
        parse_launches(&body)
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_launch_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": "a", "name": "Demo", "date_utc": "2021-05-01T10:00:00Z", "success": true}}]"#
        )
        .unwrap();

        let source = FileLaunchSource::new(file.path());
        let launches = tokio_test::block_on(source.fetch_all()).unwrap();

        assert_eq!(launches.len(), 1);
        assert_eq!(launches[0].name, "Demo");
    }

    #[tokio::test]
    async fn test_missing_file() {
        let source = FileLaunchSource::new("/nonexistent/launches.json");
        assert!(matches!(source.fetch_all().await, Err(FetchError::Io(_))));
    }
}
