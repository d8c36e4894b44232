//! Narrow interfaces onto the hosting chat client
//!
//! The extension never depends on concrete host types; the host implements
//! these traits and hands them to [`crate::Plugin`].

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::models::Post;
use crate::tui::MeetingPostComponent;

/// The channel a registered action was triggered in.
#[derive(Debug, Clone)]
pub struct Channel {
    pub id: String,
}

/// Callback attached to a registered toolbar or app-bar action.
pub type ChannelAction = Arc<dyn Fn(&Channel) + Send + Sync>;

/// Extension points the host exposes at registration time.
pub trait Registry {
    /// Register a clickable channel-header action with an icon glyph and
    /// hover help text.
    fn register_channel_header_action(
        &mut self,
        icon: &str,
        action: ChannelAction,
        help_text: &str,
    );

    /// Register the same action on the app bar. Returns false when the host
    /// has no app bar; the caller treats that as a no-op.
    fn register_app_bar_action(&mut self, icon_url: &str, action: ChannelAction, help_text: &str)
        -> bool;

    /// Map a custom post type tag to the meeting post renderer.
    fn register_post_type_renderer(&mut self, post_type: &str, component: Arc<MeetingPostComponent>);
}

/// Read/write access to the host's global client state.
pub trait StateStore: Send + Sync {
    /// Id of the authenticated user on this client.
    fn current_user_id(&self) -> String;

    /// Id of the channel currently in view.
    fn current_channel_id(&self) -> String;

    /// Display preference: 24-hour clock.
    fn use_military_time(&self) -> bool;

    /// Append a locally synthesized post to the message stream. The post is
    /// visible only on this client and never persisted by a backend.
    fn dispatch_ephemeral_post(&self, post: Post);
}

/// Opens a URL in a new top-level browsing context.
pub trait UrlOpener: Send + Sync {
    fn open(&self, url: &str) -> Result<()>;
}

/// Opens URLs with the operating system's default handler.
pub struct SystemUrlOpener;

impl UrlOpener for SystemUrlOpener {
    fn open(&self, url: &str) -> Result<()> {
        open::that(url).with_context(|| format!("failed to open {}", url))
    }
}
