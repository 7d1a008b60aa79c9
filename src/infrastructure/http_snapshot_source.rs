// HTTP snapshot source backed by the scanner backend
use crate::application::snapshot_source::SnapshotSource;
use crate::domain::snapshot::DashboardSnapshot;
use crate::infrastructure::config::UpstreamSettings;
use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned status {status}: {body}")]
    Status {
        url: String,
        status: StatusCode,
        body: String,
    },
    #[error("failed to decode snapshot from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

#[derive(Debug, Clone)]
pub struct HttpSnapshotSource {
    base_url: String,
    client: reqwest::Client,
}

impl HttpSnapshotSource {
    pub fn new(settings: &UpstreamSettings) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout())
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self {
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn build_url(&self, key: &str) -> String {
        format!("{}{}", self.base_url, key)
    }

    async fn get_snapshot(&self, key: &str) -> Result<Option<DashboardSnapshot>, FetchError> {
        let url = self.build_url(key);
        tracing::debug!("Requesting dashboard snapshot from {}", url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status { url, status, body });
        }

        // A `null` body decodes to `None`.
        response
            .json::<Option<DashboardSnapshot>>()
            .await
            .map_err(|source| FetchError::Decode { url, source })
    }
}

#[async_trait]
impl SnapshotSource for HttpSnapshotSource {
    async fn fetch_snapshot(&self, key: &str) -> anyhow::Result<Option<DashboardSnapshot>> {
        Ok(self.get_snapshot(key).await?)
    }
}
