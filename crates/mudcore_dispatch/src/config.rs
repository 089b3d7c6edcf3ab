//! Configuration for the dispatch chain.

/// Tunables for [`Dispatcher`](crate::Dispatcher).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DispatchConfig {
    /// Sent to the actor when no level of the chain accepts a line.
    pub unknown_command: String,

    /// Sent to an actor who tries a balance-gated command too soon. The
    /// remaining seconds are appended.
    pub cooldown_notice: String,

    /// How many generations of follow-up commands a single line may spawn.
    /// Follow-ups queued beyond this depth are dropped with a warning.
    pub max_follow_up_depth: usize,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            unknown_command: "Huh?".to_string(),
            cooldown_notice: "You are still recovering.".to_string(),
            max_follow_up_depth: 8,
        }
    }
}

impl DispatchConfig {
    /// A configuration that allows no follow-up commands at all.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            max_follow_up_depth: 0,
            ..Self::default()
        }
    }

    /// Builder method to set the unknown-command notice.
    #[must_use]
    pub fn with_unknown_command(mut self, text: impl Into<String>) -> Self {
        self.unknown_command = text.into();
        self
    }

    /// Builder method to set the cooldown notice.
    #[must_use]
    pub fn with_cooldown_notice(mut self, text: impl Into<String>) -> Self {
        self.cooldown_notice = text.into();
        self
    }

    /// Builder method to set the follow-up depth limit.
    #[must_use]
    pub fn with_max_follow_up_depth(mut self, depth: usize) -> Self {
        self.max_follow_up_depth = depth;
        self
    }

    /// Formats the cooldown notice for `remaining` seconds.
    #[must_use]
    pub fn cooldown_message(&self, remaining: std::time::Duration) -> String {
        format!(
            "{} ({:.1} seconds remaining)",
            self.cooldown_notice,
            remaining.as_secs_f64()
        )
    }
}
