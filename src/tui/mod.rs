//! Meeting post presentation for Ratatui hosts

mod meeting_post;

pub use meeting_post::{
    render, render_lines, MeetingAction, MeetingBody, MeetingPostComponent, MeetingPostView,
};

use ratatui::style::{Color, Modifier, Style};

/// Icon glyph for the channel-header action.
pub const MEETING_ICON: &str = "[cam]";

/// Styles the host theme supplies for meeting posts.
#[derive(Debug, Clone)]
pub struct Theme {
    pub pre_text: Style,
    pub title: Style,
    pub subtitle: Style,
    pub button: Style,
    pub link: Style,
    pub summary: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            pre_text: Style::default().fg(Color::Gray),
            title: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            subtitle: Style::default().fg(Color::Gray),
            button: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            link: Style::default().fg(Color::DarkGray),
            summary: Style::default().fg(Color::Gray),
        }
    }
}
