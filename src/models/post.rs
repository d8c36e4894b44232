//! Chat post model matching the host's message schema.

use chrono::Utc;
use serde::{Deserialize, Deserializer, Serialize};

/// Post type of locally synthesized error notices, visible only to the
/// acting user and never persisted by the backend.
pub const EPHEMERAL_POST_TYPE: &str = "system_ephemeral";

/// Prefix for locally generated post ids.
const LOCAL_ID_PREFIX: &str = "mstMeetingsPlugin";

/// Lifecycle stage of the meeting a post describes. Within one meeting's
/// postings the stage only moves forward (STARTED then ENDED);
/// RECENTLY_CREATED is a separate duplicate-attempt notice, not a
/// transition of the same meeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeetingStatus {
    Started,
    Ended,
    RecentlyCreated,
    /// Any status string this client does not recognize.
    Unknown,
}

impl MeetingStatus {
    /// Parse the wire tag the backend stamps on posts.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "STARTED" => Self::Started,
            "ENDED" => Self::Ended,
            "RECENTLY_CREATED" => Self::RecentlyCreated,
            _ => Self::Unknown,
        }
    }

    pub fn as_tag(&self) -> &'static str {
        match self {
            Self::Started => "STARTED",
            Self::Ended => "ENDED",
            Self::RecentlyCreated => "RECENTLY_CREATED",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl Serialize for MeetingStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_tag())
    }
}

impl<'de> Deserialize<'de> for MeetingStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(Self::from_tag(&tag))
    }
}

/// Free-form property bag carrying meeting metadata on a post.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PostProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_status: Option<MeetingStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_link: Option<String>,
    #[serde(
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub meeting_id: Option<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub meeting_personal: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_creator_username: Option<String>,
    /// Hosts stamp bot posts with either a JSON bool or the string
    /// "true"/"false"; both shapes are accepted.
    #[serde(deserialize_with = "lenient_bool", skip_serializing_if = "is_false")]
    pub from_bot: bool,
}

/// A chat post in the host's wire schema.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Post {
    pub id: String,
    pub create_at: i64,
    pub update_at: i64,
    pub edit_at: i64,
    pub delete_at: i64,
    pub is_pinned: bool,
    pub user_id: String,
    pub channel_id: String,
    pub root_id: String,
    pub parent_id: String,
    pub original_id: String,
    pub message: String,
    #[serde(rename = "type")]
    pub post_type: String,
    pub props: PostProps,
    pub hashtags: String,
    pub pending_post_id: String,
}

impl Post {
    /// Build an ephemeral error notice for the acting user. The id is
    /// generated locally (prefix plus a high-resolution timestamp) since
    /// the post never reaches a backend that could assign one.
    pub fn ephemeral_error(channel_id: &str, user_id: &str, message: String) -> Self {
        let now = Utc::now();
        let create_at = now.timestamp_millis();
        let stamp = now
            .timestamp_nanos_opt()
            .unwrap_or(create_at.saturating_mul(1_000_000));

        Self {
            id: format!("{}{}", LOCAL_ID_PREFIX, stamp),
            create_at,
            update_at: 0,
            edit_at: 0,
            delete_at: 0,
            is_pinned: false,
            user_id: user_id.to_string(),
            channel_id: channel_id.to_string(),
            root_id: String::new(),
            parent_id: String::new(),
            original_id: String::new(),
            message,
            post_type: EPHEMERAL_POST_TYPE.to_string(),
            props: PostProps::default(),
            hashtags: String::new(),
            pending_post_id: String::new(),
        }
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Accept a bool, a "true"/"false" string, or null.
fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    match Option::<Flag>::deserialize(deserializer)? {
        Some(Flag::Bool(value)) => Ok(value),
        Some(Flag::Text(value)) => Ok(value.eq_ignore_ascii_case("true")),
        None => Ok(false),
    }
}

/// Accept a string or a bare number for ids, returning the display form.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(i64),
    }

    Ok(Option::<Id>::deserialize(deserializer)?.map(|id| match id {
        Id::Text(value) => value,
        Id::Number(value) => value.to_string(),
    }))
}
