use super::error::RobotError;
use super::models::RobotRequest;
use crate::Config;
use async_trait::async_trait;
use reqwest::Url;
use std::time::Duration;

/// Carries one request to the robot and hands back the response body.
///
/// Non-2xx answers must be reported as errors.
#[async_trait]
pub trait RobotTransport: Send + Sync {
    async fn execute(&self, request: &RobotRequest) -> Result<String, RobotError>;
}

#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpTransport {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, RobotError> {
        let client = reqwest::Client::builder()
            .no_proxy()
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: parse_base_url(base_url)?,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, RobotError> {
        Self::new(&config.robot_api_url, config.request_timeout())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Full URL for `request`, resolved against the base URL.
    pub fn endpoint(&self, request: &RobotRequest) -> Result<Url, RobotError> {
        let mut url = self
            .base_url
            .join(request.path())
            .map_err(|e| RobotError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;

        if let Some((key, value)) = request.query() {
            url.query_pairs_mut().append_pair(key, &value);
        }
        Ok(url)
    }
}

#[async_trait]
impl RobotTransport for HttpTransport {
    async fn execute(&self, request: &RobotRequest) -> Result<String, RobotError> {
        let url = self.endpoint(request)?;
        tracing::debug!(url = %url, "Sending request to robot");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(RobotError::Status(status.as_u16()));
        }

        Ok(response.text().await?)
    }
}

// Endpoints are joined relative to the base, so its path must end in '/'.
fn parse_base_url(raw: &str) -> Result<Url, RobotError> {
    let invalid = |reason: String| RobotError::InvalidBaseUrl {
        url: raw.to_string(),
        reason,
    };

    let mut url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("expected an http(s) url".to_string()));
    }

    url.set_query(None);
    url.set_fragment(None);
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
