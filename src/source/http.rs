//! Launch source backed by a SpaceX-v4-compatible HTTP API.

use super::{parse_launches, FetchError, LaunchDataSource};
use crate::models::Launch;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

/// Public SpaceX launches endpoint.
pub const DEFAULT_API_URL: &str = "https://api.spacexdata.com/v4/launches";

/// Fetches the launch list with a single GET request.
#[derive(Debug, Clone)]
pub struct HttpLaunchSource {
    client: Client,
    url: String,
}

impl HttpLaunchSource {
    /// Create a source with its own client and request timeout.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("launchstats/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Http(e.to_string()))?;

        Ok(Self::with_client(client, url))
    }

    /// Create a source around an existing client.
    pub fn with_client(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl LaunchDataSource for HttpLaunchSource {
    async fn fetch_all(&self) -> Result<Vec<Launch>, FetchError> {
        info!("Fetching launches from {}", self.url);

        let response = self.client.get(&self.url).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::Http(format!(
                "API returned status {}",
                response.status()
            )));
        }

        let body = response.text().await?;
        debug!("Received {} bytes", body.len());

        let launches = parse_launches(&body)?;
        info!("Fetched {} launches", launches.len());

        Ok(launches)
    }

    fn description(&self) -> &str {
        &self.url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Outcome;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn setup() -> (MockServer, HttpLaunchSource) {
        let server = MockServer::start().await;
        let source = HttpLaunchSource::with_client(
            Client::new(),
            format!("{}/v4/launches", server.uri()),
        );
        (server, source)
    }

    #[tokio::test]
    async fn test_fetch_all_success() {
        let (server, source) = setup().await;

        Mock::given(method("GET"))
            .and(path("/v4/launches"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "id": "5eb87cd9ffd86e000604b32a",
                    "name": "FalconSat",
                    "date_utc": "2006-03-24T22:30:00.000Z",
                    "success": false
                },
                {
                    "id": "5eb87d46ffd86e000604b388",
                    "name": "Crew-1",
                    "date_utc": "2020-11-16T00:27:00.000Z",
                    "success": true
                },
                { "id": "", "name": "TBD", "date_utc": null, "success": null }
            ])))
            .mount(&server)
            .await;

        let launches = source.fetch_all().await.unwrap();
        assert_eq!(launches.len(), 3);
        assert_eq!(launches[0].outcome, Outcome::Failure);
        assert_eq!(launches[1].outcome, Outcome::Success);
        assert_eq!(launches[2].date_utc, None);
    }

    #[tokio::test]
    async fn test_fetch_all_server_error() {
        let (server, source) = setup().await;

        Mock::given(method("GET"))
            .and(path("/v4/launches"))
            .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
            .mount(&server)
            .await;

        let result = source.fetch_all().await;
        assert!(
            matches!(result, Err(FetchError::Http(ref msg)) if msg.contains("503")),
            "expected Http error, got: {result:?}"
        );
    }

    #[tokio::test]
    async fn test_fetch_all_null_body() {
        let (server, source) = setup().await;

        Mock::given(method("GET"))
            .and(path("/v4/launches"))
            .respond_with(ResponseTemplate::new(200).set_body_string("null"))
            .mount(&server)
            .await;

        assert_eq!(source.fetch_all().await, Err(FetchError::Empty));
    }

    #[tokio::test]
    async fn test_fetch_all_malformed_body() {
        let (server, source) = setup().await;

        Mock::given(method("GET"))
            .and(path("/v4/launches"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "docs": [] })))
            .mount(&server)
            .await;

        assert!(matches!(source.fetch_all().await, Err(FetchError::Parse(_))));
    }

    #[test]
    fn test_description_is_url() {
        let source = HttpLaunchSource::new(DEFAULT_API_URL, Duration::from_secs(5)).unwrap();
        assert_eq!(source.description(), DEFAULT_API_URL);
    }
}
