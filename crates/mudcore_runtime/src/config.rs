//! Configuration for the interactive shell.

use std::time::Duration;

use mudcore_dispatch::DispatchConfig;

/// Settings for a [`Repl`](crate::Repl) and the session behind it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Prompt shown before each line.
    pub prompt: String,

    /// Whether to print the welcome banner.
    pub show_banner: bool,

    /// Logical time that passes after each line typed.
    pub tick_interval: Duration,

    /// `tracing` filter directive. `None` defers to `RUST_LOG`.
    pub log_filter: Option<String>,

    /// Whether the local player gets admin commands.
    pub admin: bool,

    /// Display name of the local player.
    pub player_name: String,

    /// Settings for the dispatch chain.
    pub dispatch: DispatchConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            prompt: "> ".to_string(),
            show_banner: true,
            tick_interval: Duration::from_secs(1),
            log_filter: None,
            admin: false,
            player_name: "Wanderer".to_string(),
            dispatch: DispatchConfig::default(),
        }
    }
}

impl RuntimeConfig {
    /// A configuration for scripted runs: no banner, admin enabled.
    #[must_use]
    pub fn scripted() -> Self {
        Self {
            show_banner: false,
            admin: true,
            ..Self::default()
        }
    }

    /// Builder method to set the prompt.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Builder method to toggle the banner.
    #[must_use]
    pub fn with_banner(mut self, show: bool) -> Self {
        self.show_banner = show;
        self
    }

    /// Builder method to set the tick interval.
    #[must_use]
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    /// Builder method to set the log filter.
    #[must_use]
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = Some(filter.into());
        self
    }

    /// Builder method to grant admin commands.
    #[must_use]
    pub fn with_admin(mut self, admin: bool) -> Self {
        self.admin = admin;
        self
    }

    /// Builder method to set the player's name.
    #[must_use]
    pub fn with_player_name(mut self, name: impl Into<String>) -> Self {
        self.player_name = name.into();
        self
    }

    /// Builder method to replace the dispatch settings.
    #[must_use]
    pub fn with_dispatch(mut self, dispatch: DispatchConfig) -> Self {
        self.dispatch = dispatch;
        self
    }
}
