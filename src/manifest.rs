//! Plugin identity constants shared with the backend plugin bundle.

/// Plugin id as registered with the chat server; also the path segment the
/// backend routes plugin HTTP requests under.
pub const PLUGIN_ID: &str = "com.mattermost.mstmeetings";

/// Post type tag the backend stamps on meeting lifecycle posts.
pub const MEETING_POST_TYPE: &str = "custom_mstmeetings";

/// Help text shown next to the registered header / app-bar actions.
pub const START_MEETING_HELP: &str = "Start MS Teams Meeting";
