//! Host registration wiring
//!
//! Builds the backend client and collaborators, then hooks the start-meeting
//! action and the meeting post renderer into the host's extension points.

use std::sync::Arc;

use anyhow::Result;

use crate::actions::{MeetingActions, StartGuard};
use crate::api::{BackendClient, MeetingsApi};
use crate::host::{Channel, ChannelAction, Registry, StateStore, SystemUrlOpener, UrlOpener};
use crate::manifest::{MEETING_POST_TYPE, PLUGIN_ID, START_MEETING_HELP};
use crate::tui::{MeetingPostComponent, MEETING_ICON};

/// The meetings extension, ready to register with a host.
pub struct Plugin {
    actions: Arc<MeetingActions>,
    store: Arc<dyn StateStore>,
    site_url: String,
}

impl Plugin {
    /// Build the extension against the host's site URL, opening meeting
    /// URLs with the operating system handler.
    pub fn new(site_url: &str, store: Arc<dyn StateStore>) -> Result<Self> {
        let client = BackendClient::new(site_url)?;
        Ok(Self::with_collaborators(
            site_url,
            Arc::new(client),
            store,
            Arc::new(SystemUrlOpener),
        ))
    }

    /// Build with explicit collaborators (hosts with their own HTTP stack
    /// or URL handling, and tests).
    pub fn with_collaborators(
        site_url: &str,
        api: Arc<dyn MeetingsApi>,
        store: Arc<dyn StateStore>,
        opener: Arc<dyn UrlOpener>,
    ) -> Self {
        let actions = Arc::new(MeetingActions::new(api, store.clone(), opener));
        Self {
            actions,
            store,
            site_url: site_url.trim_end_matches('/').to_string(),
        }
    }

    /// Shared start/confirm front end (for hosts wiring their own surfaces).
    pub fn actions(&self) -> Arc<MeetingActions> {
        self.actions.clone()
    }

    /// Register the channel-header action, the app-bar action where the
    /// host has one, and the meeting post renderer.
    pub fn initialize(&self, registry: &mut dyn Registry) {
        let action = self.start_meeting_action();

        registry.register_channel_header_action(MEETING_ICON, action.clone(), START_MEETING_HELP);

        let icon_url = format!(
            "{}/plugins/{}/public/app-bar-icon.png",
            self.site_url, PLUGIN_ID
        );
        if !registry.register_app_bar_action(&icon_url, action, START_MEETING_HELP) {
            tracing::debug!("host has no app bar; skipping app-bar action");
        }

        let component = Arc::new(MeetingPostComponent::new(
            self.actions.clone(),
            self.store.clone(),
        ));
        registry.register_post_type_renderer(MEETING_POST_TYPE, component);
    }

    /// Toolbar callback: start a meeting in the clicked channel. The whole
    /// toolbar surface shares one single-flight guard, so a click while a
    /// start is outstanding is dropped.
    fn start_meeting_action(&self) -> ChannelAction {
        let guard = StartGuard::new();
        let actions = self.actions.clone();

        Arc::new(move |channel: &Channel| {
            let Some(in_flight) = guard.try_begin() else {
                tracing::debug!("meeting start already in flight");
                return;
            };
            let actions = actions.clone();
            let channel_id = channel.id.clone();
            tokio::spawn(async move {
                let _in_flight = in_flight;
                if let Err(err) = actions.start_meeting(&channel_id, false).await {
                    tracing::warn!("meeting start failed: {}", err);
                }
            });
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;

    use crate::api::{ApiError, ConfirmationOutcome};
    use crate::models::Post;

    struct CountingApi {
        calls: AtomicUsize,
        settle: tokio::sync::Notify,
    }

    #[async_trait]
    impl MeetingsApi for CountingApi {
        async fn start_meeting(&self, _channel_id: &str) -> Result<String, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.settle.notified().await;
            Ok(String::new())
        }

        async fn force_start_meeting(&self, channel_id: &str) -> Result<String, ApiError> {
            self.start_meeting(channel_id).await
        }

        async fn warn_and_confirm_meeting(
            &self,
            _channel_id: &str,
        ) -> Result<ConfirmationOutcome, ApiError> {
            Ok(ConfirmationOutcome::PromptIssued)
        }
    }

    struct FixedStore;

    impl StateStore for FixedStore {
        fn current_user_id(&self) -> String {
            "user-1".to_string()
        }

        fn current_channel_id(&self) -> String {
            "channel-1".to_string()
        }

        fn use_military_time(&self) -> bool {
            false
        }

        fn dispatch_ephemeral_post(&self, _post: Post) {}
    }

    struct NoopOpener;

    impl UrlOpener for NoopOpener {
        fn open(&self, _url: &str) -> anyhow::Result<()> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct FakeRegistry {
        header_actions: Vec<(String, ChannelAction, String)>,
        app_bar_actions: Vec<(String, ChannelAction, String)>,
        renderers: Vec<String>,
        has_app_bar: bool,
    }

    impl Registry for FakeRegistry {
        fn register_channel_header_action(
            &mut self,
            icon: &str,
            action: ChannelAction,
            help_text: &str,
        ) {
            self.header_actions
                .push((icon.to_string(), action, help_text.to_string()));
        }

        fn register_app_bar_action(
            &mut self,
            icon_url: &str,
            action: ChannelAction,
            help_text: &str,
        ) -> bool {
            if !self.has_app_bar {
                return false;
            }
            self.app_bar_actions
                .push((icon_url.to_string(), action, help_text.to_string()));
            true
        }

        fn register_post_type_renderer(
            &mut self,
            post_type: &str,
            _component: Arc<MeetingPostComponent>,
        ) {
            self.renderers.push(post_type.to_string());
        }
    }

    fn plugin(api: Arc<CountingApi>) -> Plugin {
        Plugin::with_collaborators(
            "https://chat.example.com/",
            api,
            Arc::new(FixedStore),
            Arc::new(NoopOpener),
        )
    }

    #[tokio::test]
    async fn test_initialize_registers_extension_points() {
        let api = Arc::new(CountingApi {
            calls: AtomicUsize::new(0),
            settle: tokio::sync::Notify::new(),
        });
        let plugin = plugin(api);
        let mut registry = FakeRegistry {
            has_app_bar: true,
            ..FakeRegistry::default()
        };

        plugin.initialize(&mut registry);

        assert_eq!(registry.header_actions.len(), 1);
        assert_eq!(registry.header_actions[0].2, "Start MS Teams Meeting");
        assert_eq!(registry.app_bar_actions.len(), 1);
        assert_eq!(
            registry.app_bar_actions[0].0,
            "https://chat.example.com/plugins/com.mattermost.mstmeetings/public/app-bar-icon.png"
        );
        assert_eq!(registry.renderers, ["custom_mstmeetings"]);
    }

    #[tokio::test]
    async fn test_initialize_without_app_bar() {
        let api = Arc::new(CountingApi {
            calls: AtomicUsize::new(0),
            settle: tokio::sync::Notify::new(),
        });
        let plugin = plugin(api);
        let mut registry = FakeRegistry::default();

        plugin.initialize(&mut registry);

        assert_eq!(registry.header_actions.len(), 1);
        assert!(registry.app_bar_actions.is_empty());
    }

    #[tokio::test]
    async fn test_toolbar_action_is_single_flight_per_surface() {
        let api = Arc::new(CountingApi {
            calls: AtomicUsize::new(0),
            settle: tokio::sync::Notify::new(),
        });
        let plugin = plugin(api.clone());
        let mut registry = FakeRegistry::default();
        plugin.initialize(&mut registry);

        let action = registry.header_actions[0].1.as_ref();
        let channel = Channel {
            id: "channel-1".to_string(),
        };

        // Second click before the first request settles is dropped.
        action(&channel);
        action(&channel);

        tokio::time::timeout(Duration::from_secs(1), async {
            while api.calls.load(Ordering::SeqCst) == 0 {
                tokio::task::yield_now().await;
            }
        })
        .await
        .unwrap();
        for _ in 0..16 {
            tokio::task::yield_now().await;
        }
        assert_eq!(api.calls.load(Ordering::SeqCst), 1);

        // Once it settles the surface accepts the next click.
        api.settle.notify_waiters();
        for _ in 0..16 {
            tokio::task::yield_now().await;
        }
        action(&channel);
        tokio::time::timeout(Duration::from_secs(1), async {
            while api.calls.load(Ordering::SeqCst) < 2 {
                tokio::task::yield_now().await;
            }
        })
        .await
        .unwrap();
        assert_eq!(api.calls.load(Ordering::SeqCst), 2);
    }
}
