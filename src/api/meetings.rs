//! Meeting start and confirm operations against the backend plugin.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::client::{ApiError, BackendClient};
use crate::manifest::PLUGIN_ID;

/// Body of a start-meeting request.
#[derive(Debug, Serialize)]
struct StartMeetingRequest<'a> {
    channel_id: &'a str,
    personal: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    topic: Option<&'a str>,
}

/// Backend response; an empty URL means no meeting was created.
#[derive(Debug, Deserialize)]
struct StartMeetingResponse {
    meeting_url: Option<String>,
}

/// Outcome of a warn-and-confirm call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationOutcome {
    /// No recent meeting existed; the backend created one.
    Started { meeting_url: String },
    /// A recent meeting already exists; the backend issued a
    /// duplicate-warning prompt to the user instead of creating one.
    PromptIssued,
}

/// Meeting operations the backend plugin exposes.
#[async_trait]
pub trait MeetingsApi: Send + Sync {
    /// Start a meeting, or have the backend prompt when a recent one
    /// already exists in the channel. Returns the join URL; empty when the
    /// backend issued a prompt instead of creating a meeting.
    async fn start_meeting(&self, channel_id: &str) -> Result<String, ApiError>;

    /// Create a new meeting even if one is already active for the channel.
    async fn force_start_meeting(&self, channel_id: &str) -> Result<String, ApiError>;

    /// Check for an existing recent meeting without forcing a new one.
    async fn warn_and_confirm_meeting(
        &self,
        channel_id: &str,
    ) -> Result<ConfirmationOutcome, ApiError>;
}

#[async_trait]
impl MeetingsApi for BackendClient {
    async fn start_meeting(&self, channel_id: &str) -> Result<String, ApiError> {
        self.request_meeting(channel_id, false).await
    }

    async fn force_start_meeting(&self, channel_id: &str) -> Result<String, ApiError> {
        self.request_meeting(channel_id, true).await
    }

    async fn warn_and_confirm_meeting(
        &self,
        channel_id: &str,
    ) -> Result<ConfirmationOutcome, ApiError> {
        let meeting_url = self.request_meeting(channel_id, false).await?;
        if meeting_url.is_empty() {
            Ok(ConfirmationOutcome::PromptIssued)
        } else {
            Ok(ConfirmationOutcome::Started { meeting_url })
        }
    }
}

impl BackendClient {
    async fn request_meeting(&self, channel_id: &str, force: bool) -> Result<String, ApiError> {
        let mut url = format!("{}/plugins/{}/api/v1/meetings", self.site_url(), PLUGIN_ID);
        if force {
            url.push_str("?force=true");
        }

        let request = StartMeetingRequest {
            channel_id,
            personal: true,
            topic: None,
        };
        let body = serde_json::to_value(&request)
            .map_err(|err| ApiError::Backend(format!("failed to encode request: {}", err)))?;

        let resp = self.post_json(&url, &body).await?;
        let parsed: StartMeetingResponse = resp
            .json()
            .await
            .map_err(|err| ApiError::transport(&url, err))?;

        Ok(parsed.meeting_url.unwrap_or_default())
    }
}
