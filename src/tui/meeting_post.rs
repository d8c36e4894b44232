//! Meeting lifecycle post rendering
//!
//! Derives a presentation from a post's meeting metadata and wires the
//! create-new / join-existing choices back to the start flow.

use std::sync::Arc;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::Theme;
use crate::actions::{MeetingActions, StartGuard};
use crate::dates::{duration_minutes_ceil, format_meeting_time, local_datetime};
use crate::host::StateStore;
use crate::models::{MeetingStatus, Post};

const DEFAULT_TITLE: &str = "MS Teams Meeting";
const DEFAULT_CREATOR: &str = "Someone";

const JOIN_LABEL: &str = "JOIN MEETING";
const CREATE_NEW_LABEL: &str = "CREATE NEW MEETING";
const JOIN_EXISTING_LABEL: &str = "JOIN EXISTING MEETING";

/// Presentation derived from one meeting-carrying post.
#[derive(Debug, Clone, PartialEq)]
pub struct MeetingPostView {
    pub pre_text: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub body: MeetingBody,
}

/// Body of the presentation, keyed on the meeting's lifecycle stage.
#[derive(Debug, Clone, PartialEq)]
pub enum MeetingBody {
    /// A live meeting: one join button.
    Join { link: String },
    /// A finished meeting: id, start time, and rounded-up duration.
    Summary {
        id_label: &'static str,
        meeting_id: String,
        started_at: String,
        duration_minutes: i64,
    },
    /// A duplicate-attempt notice: create-new and join-existing choices.
    Choice { link: String },
    /// Not a recognizable meeting stage.
    Empty,
}

/// An activatable element of the rendered presentation.
#[derive(Debug, Clone, PartialEq)]
pub enum MeetingAction {
    /// Force-start a new meeting in the current channel.
    CreateNew,
    /// Open the running meeting's join URL.
    JoinExisting { link: String },
}

impl MeetingPostView {
    /// Derive the presentation for a post. Pure: same post and preferences,
    /// same view.
    pub fn derive(post: &Post, use_military_time: bool) -> Self {
        let props = &post.props;
        let creator = props
            .meeting_creator_username
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_CREATOR);
        let link = props.meeting_link.clone().unwrap_or_default();

        let (pre_text, subtitle, body) = match props.meeting_status {
            Some(MeetingStatus::Started) => {
                let pre_text = if props.from_bot {
                    format!("{} has started a meeting", creator)
                } else {
                    "I have started a meeting".to_string()
                };
                (pre_text, None, MeetingBody::Join { link })
            }
            Some(MeetingStatus::Ended) => {
                let pre_text = if props.from_bot {
                    format!("{} has ended the meeting", creator)
                } else {
                    "I have ended the meeting".to_string()
                };
                let id_label = if props.meeting_personal {
                    "Personal Meeting ID (PMI)"
                } else {
                    "Meeting ID"
                };
                let started_at = local_datetime(post.create_at)
                    .map(|dt| format_meeting_time(dt, use_military_time))
                    .unwrap_or_default();
                let body = MeetingBody::Summary {
                    id_label,
                    meeting_id: props.meeting_id.clone().unwrap_or_default(),
                    started_at,
                    duration_minutes: duration_minutes_ceil(post.create_at, post.update_at),
                };
                (pre_text, None, body)
            }
            Some(MeetingStatus::RecentlyCreated) => {
                // Addresses the viewer directly, so always third person.
                let pre_text =
                    format!("{} already created a MS Teams Meeting recently", creator);
                let subtitle = "Would you like to join, or create your own meeting?".to_string();
                (pre_text, Some(subtitle), MeetingBody::Choice { link })
            }
            _ => (String::new(), None, MeetingBody::Empty),
        };

        let title = props
            .meeting_topic
            .as_deref()
            .filter(|topic| !topic.is_empty())
            .unwrap_or(DEFAULT_TITLE)
            .to_string();

        Self {
            pre_text,
            title,
            subtitle,
            body,
        }
    }

    /// Activatable elements of this view, in display order.
    pub fn actions(&self) -> Vec<MeetingAction> {
        match &self.body {
            MeetingBody::Join { link } => vec![MeetingAction::JoinExisting { link: link.clone() }],
            MeetingBody::Choice { link } => vec![
                MeetingAction::CreateNew,
                MeetingAction::JoinExisting { link: link.clone() },
            ],
            MeetingBody::Summary { .. } | MeetingBody::Empty => Vec::new(),
        }
    }
}

/// Build the line buffer for a view (the host composes it into its message
/// pane).
pub fn render_lines(view: &MeetingPostView, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    if !view.pre_text.is_empty() {
        lines.push(Line::from(Span::styled(
            view.pre_text.clone(),
            theme.pre_text,
        )));
    }

    lines.push(Line::from(Span::styled(view.title.clone(), theme.title)));

    if let Some(subtitle) = &view.subtitle {
        lines.push(Line::from(Span::styled(subtitle.clone(), theme.subtitle)));
    }

    match &view.body {
        MeetingBody::Join { link } => {
            lines.push(button_line(JOIN_LABEL, Some(link), theme));
        }
        MeetingBody::Summary {
            id_label,
            meeting_id,
            started_at,
            duration_minutes,
        } => {
            lines.push(Line::from(Span::styled(
                format!("{}: {}", id_label, meeting_id),
                theme.summary,
            )));
            lines.push(Line::from(Span::styled(
                format!("Started at {}", started_at),
                theme.summary,
            )));
            let unit = if *duration_minutes == 1 {
                "minute"
            } else {
                "minutes"
            };
            lines.push(Line::from(Span::styled(
                format!("Duration: {} {}", duration_minutes, unit),
                theme.summary,
            )));
        }
        MeetingBody::Choice { link } => {
            lines.push(button_line(CREATE_NEW_LABEL, None, theme));
            lines.push(button_line(JOIN_EXISTING_LABEL, Some(link), theme));
        }
        MeetingBody::Empty => {}
    }

    lines
}

fn button_line(label: &str, link: Option<&str>, theme: &Theme) -> Line<'static> {
    let mut spans = vec![Span::styled(format!("[ {} ]", label), theme.button)];
    if let Some(link) = link {
        if !link.is_empty() {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(link.to_string(), theme.link));
        }
    }
    Line::from(spans)
}

/// Render a view into the given area.
pub fn render(area: Rect, buf: &mut Buffer, view: &MeetingPostView, theme: &Theme) {
    if area.height == 0 || area.width == 0 {
        return;
    }
    Paragraph::new(render_lines(view, theme)).render(area, buf);
}

/// The registered post-type component: derives views for meeting posts and
/// handles their actions. One instance is registered per host, so the
/// create-new choice carries its own single-flight guard.
pub struct MeetingPostComponent {
    actions: Arc<MeetingActions>,
    store: Arc<dyn StateStore>,
    guard: StartGuard,
}

impl MeetingPostComponent {
    pub fn new(actions: Arc<MeetingActions>, store: Arc<dyn StateStore>) -> Self {
        Self {
            actions,
            store,
            guard: StartGuard::new(),
        }
    }

    /// Derive the presentation for a post using the host's display
    /// preferences.
    pub fn view(&self, post: &Post) -> MeetingPostView {
        MeetingPostView::derive(post, self.store.use_military_time())
    }

    /// Handle an activated element. Create-new force-starts a meeting in
    /// the channel currently in view; repeated activations while one is
    /// outstanding are dropped.
    pub fn on_action(&self, action: &MeetingAction) {
        match action {
            MeetingAction::CreateNew => {
                let Some(in_flight) = self.guard.try_begin() else {
                    tracing::debug!("meeting start already in flight");
                    return;
                };
                let actions = self.actions.clone();
                let channel_id = self.store.current_channel_id();
                tokio::spawn(async move {
                    let _in_flight = in_flight;
                    if let Err(err) = actions.start_meeting(&channel_id, true).await {
                        tracing::warn!("force start failed: {}", err);
                    }
                });
            }
            MeetingAction::JoinExisting { link } => {
                self.actions.join_meeting(link);
            }
        }
    }
}
