//! MS Teams Meetings extension for terminal chat clients
//!
//! Adds a start-meeting action to the hosting client, issues meeting
//! start / force-start / warn-and-confirm requests to the companion backend
//! plugin, and renders meeting lifecycle posts (started, ended, duplicate
//! warning) into the message pane.
//!
//! The host implements the traits in [`host`] and calls
//! [`Plugin::initialize`] with its registry. Start requests run on the
//! host's tokio runtime; failures surface as ephemeral posts visible only
//! to the acting user.

pub mod actions;
pub mod api;
pub mod dates;
pub mod host;
pub mod manifest;
pub mod models;
pub mod plugin;
pub mod tui;

pub use actions::{MeetingActions, StartGuard, StartOutcome};
pub use api::{ApiError, BackendClient, ConfirmationOutcome, MeetingsApi};
pub use host::{Channel, ChannelAction, Registry, StateStore, SystemUrlOpener, UrlOpener};
pub use models::{MeetingStatus, Post, PostProps};
pub use plugin::Plugin;
pub use tui::{MeetingAction, MeetingBody, MeetingPostComponent, MeetingPostView, Theme};
