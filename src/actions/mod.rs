//! Meeting start orchestration
//!
//! Issues start / force-start / warn-and-confirm requests to the backend,
//! normalizes failures into a single user-visible message, and publishes
//! that message as an ephemeral post in the requesting channel.

pub mod guard;

use std::sync::Arc;

use crate::api::{ApiError, ConfirmationOutcome, MeetingsApi};
use crate::host::{StateStore, UrlOpener};
use crate::models::Post;

pub use guard::{InFlight, StartGuard};

/// Result of a successful start call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartOutcome {
    /// Whether a meeting URL came back and was handed to the opener. False
    /// when the backend prompted about an existing meeting instead.
    pub opened: bool,
}

/// Stateless, reentrant meeting-start front end. Callers own the per-surface
/// single-flight guard; concurrent calls against different channels do not
/// interfere.
pub struct MeetingActions {
    api: Arc<dyn MeetingsApi>,
    store: Arc<dyn StateStore>,
    opener: Arc<dyn UrlOpener>,
}

impl MeetingActions {
    pub fn new(
        api: Arc<dyn MeetingsApi>,
        store: Arc<dyn StateStore>,
        opener: Arc<dyn UrlOpener>,
    ) -> Self {
        Self { api, store, opener }
    }

    /// Start a meeting in the channel, forcing creation past an existing one
    /// when `force` is set. On success with a non-empty URL the meeting
    /// opens in a new browsing context. On failure the error is normalized
    /// and posted as a single ephemeral notice to the acting user, and the
    /// original error is returned.
    pub async fn start_meeting(
        &self,
        channel_id: &str,
        force: bool,
    ) -> Result<StartOutcome, ApiError> {
        let result = if force {
            self.api.force_start_meeting(channel_id).await
        } else {
            self.api.start_meeting(channel_id).await
        };

        let meeting_url = match result {
            Ok(url) => url,
            Err(err) => {
                self.post_error(channel_id, &err);
                return Err(err);
            }
        };

        if meeting_url.is_empty() {
            return Ok(StartOutcome { opened: false });
        }

        if let Err(err) = self.opener.open(&meeting_url) {
            // The meeting exists; failing to launch a browser is not a
            // meeting failure and must not produce an error post.
            tracing::warn!("failed to open meeting URL {}: {:#}", meeting_url, err);
            return Ok(StartOutcome { opened: false });
        }

        tracing::debug!("opened meeting URL for channel {}", channel_id);
        Ok(StartOutcome { opened: true })
    }

    /// Check whether a meeting already exists in the channel, letting the
    /// backend prompt the user before a duplicate gets created.
    pub async fn warn_and_confirm(
        &self,
        channel_id: &str,
    ) -> Result<ConfirmationOutcome, ApiError> {
        match self.api.warn_and_confirm_meeting(channel_id).await {
            Ok(outcome) => Ok(outcome),
            Err(err) => {
                self.post_error(channel_id, &err);
                Err(err)
            }
        }
    }

    /// Open an already-running meeting's join URL.
    pub fn join_meeting(&self, meeting_url: &str) {
        if let Err(err) = self.opener.open(meeting_url) {
            tracing::warn!("failed to open meeting URL {}: {:#}", meeting_url, err);
        }
    }

    /// Exactly one ephemeral post per failure, attributed to the current
    /// user in the requesting channel.
    fn post_error(&self, channel_id: &str, err: &ApiError) {
        let message = normalize_error_message(&err.to_string());
        let post = Post::ephemeral_error(channel_id, &self.store.current_user_id(), message);
        self.store.dispatch_ephemeral_post(post);
    }
}

/// Normalize a backend failure into a display string.
///
/// Messages starting with `{` are treated as JSON error envelopes from the
/// upstream meeting-provider API: a nested `error.message` is surfaced with
/// a provider marker, an envelope without one degrades to the parsed value,
/// and unparsable input degrades to an empty string. Backend error shapes
/// have varied across versions, so this is best-effort display text and
/// never fails. Anything not starting with `{` passes through verbatim.
pub fn normalize_error_message(raw: &str) -> String {
    if !raw.starts_with('{') {
        return raw.to_string();
    }

    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(value) => match value.pointer("/error/message").and_then(|m| m.as_str()) {
            Some(message) => format!("\nMSTMeeting error: {}", message),
            None => value.to_string(),
        },
        Err(_) => String::new(),
    }
}
