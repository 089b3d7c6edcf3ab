//! Output to participants.

use mudcore_foundation::CharacterId;

/// Where text for participants goes.
///
/// The transport behind a sink is not this crate's concern; a server would
/// forward to each connection, tests collect into a [`Mailbox`].
pub trait MessageSink {
    /// Delivers one line of text to `to`.
    fn emit(&mut self, to: CharacterId, text: &str);
}

/// A sink that keeps everything in memory, in emission order.
#[derive(Clone, Debug, Default)]
pub struct Mailbox {
    messages: Vec<(CharacterId, String)>,
}

impl Mailbox {
    /// Creates an empty mailbox.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All undelivered messages.
    #[must_use]
    pub fn messages(&self) -> &[(CharacterId, String)] {
        &self.messages
    }

    /// Removes and returns every message.
    pub fn take(&mut self) -> Vec<(CharacterId, String)> {
        std::mem::take(&mut self.messages)
    }

    /// Removes and returns the messages for one recipient.
    pub fn take_for(&mut self, recipient: CharacterId) -> Vec<String> {
        let (mine, rest): (Vec<_>, Vec<_>) = self
            .take()
            .into_iter()
            .partition(|(to, _)| *to == recipient);
        self.messages = rest;
        mine.into_iter().map(|(_, text)| text).collect()
    }

    /// Whether nothing is waiting.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl MessageSink for Mailbox {
    fn emit(&mut self, to: CharacterId, text: &str) {
        self.messages.push((to, text.to_string()));
    }
}
