//! HTTP client for the meetings backend plugin
//!
//! Wraps reqwest::Client with site-URL normalization and response checking.

use thiserror::Error;
use url::Url;

/// Failure talking to the meetings backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend answered with a non-success status. The payload is kept
    /// verbatim: the upstream meeting provider's JSON error envelopes pass
    /// through here and are parsed later for display.
    #[error("{0}")]
    Backend(String),
    /// Transport-level failure before a usable response arrived.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl ApiError {
    pub(crate) fn transport(url: &str, source: reqwest::Error) -> Self {
        Self::Transport {
            url: url.to_string(),
            source,
        }
    }
}

/// Client for the backend plugin's HTTP surface.
pub struct BackendClient {
    http: reqwest::Client,
    site_url: String,
}

impl BackendClient {
    /// Build a client from the host's site URL. The URL is validated and
    /// its trailing slash trimmed so endpoint joins stay clean.
    pub fn new(site_url: &str) -> Result<Self, ApiError> {
        Url::parse(site_url)
            .map_err(|err| ApiError::Backend(format!("invalid site URL {}: {}", site_url, err)))?;

        Ok(Self {
            http: reqwest::Client::new(),
            site_url: site_url.trim_end_matches('/').to_string(),
        })
    }

    /// Normalized site URL (no trailing slash).
    pub fn site_url(&self) -> &str {
        &self.site_url
    }

    /// POST a JSON body and check the response status.
    pub(crate) async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<reqwest::Response, ApiError> {
        tracing::debug!("Meetings POST {}", url);

        let resp = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|err| ApiError::transport(url, err))?;

        check_response(resp, url).await
    }
}

/// Check HTTP response status and surface the failure body verbatim.
async fn check_response(resp: reqwest::Response, url: &str) -> Result<reqwest::Response, ApiError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        let message = if body.trim().is_empty() {
            format!("HTTP {} for {}", status.as_u16(), url)
        } else {
            body.trim().to_string()
        };
        return Err(ApiError::Backend(message));
    }
    Ok(resp)
}
