//! Delayed commands.
//!
//! Each conversation may have at most one pending command. Entries are kept
//! in due order against the world's logical clock, with insertion order
//! breaking ties.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use mudcore_foundation::{CharacterId, ConversationId};

/// A line to dispatch as input from `actor` once the clock reaches `due`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduledCommand {
    /// Owning conversation.
    pub conversation: ConversationId,
    /// Who the line is dispatched for.
    pub actor: CharacterId,
    /// Raw input line.
    pub line: String,
    /// Logical time it fires at.
    pub due: Duration,
}

type Slot = (Duration, u64);

/// Pending scheduled commands.
#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    queue: BTreeMap<Slot, ScheduledCommand>,
    index: HashMap<ConversationId, Slot>,
    seq: u64,
}

impl Scheduler {
    /// Creates an empty scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `command`, returning the one it replaced.
    pub fn schedule(&mut self, command: ScheduledCommand) -> Option<ScheduledCommand> {
        let replaced = self.cancel(command.conversation);
        self.seq += 1;
        let slot = (command.due, self.seq);
        self.index.insert(command.conversation, slot);
        self.queue.insert(slot, command);
        replaced
    }

    /// Removes the conversation's pending command without firing it.
    pub fn cancel(&mut self, conversation: ConversationId) -> Option<ScheduledCommand> {
        let slot = self.index.remove(&conversation)?;
        self.queue.remove(&slot)
    }

    /// The conversation's pending command.
    #[must_use]
    pub fn pending(&self, conversation: ConversationId) -> Option<&ScheduledCommand> {
        self.index
            .get(&conversation)
            .and_then(|slot| self.queue.get(slot))
    }

    /// Removes and returns every command due at or before `now`, in due order.
    pub fn pop_due(&mut self, now: Duration) -> Vec<ScheduledCommand> {
        let through = self.last_sequence();
        std::iter::from_fn(|| self.pop_next_due(now, through)).collect()
    }

    /// Removes and returns the earliest command due at or before `now` among
    /// those scheduled at or before sequence number `through`. Commands
    /// scheduled after `through` wait for a later call.
    pub fn pop_next_due(&mut self, now: Duration, through: u64) -> Option<ScheduledCommand> {
        let slot = self
            .queue
            .keys()
            .take_while(|(due, _)| *due <= now)
            .find(|(_, seq)| *seq <= through)
            .copied()?;
        let command = self.queue.remove(&slot)?;
        self.index.remove(&command.conversation);
        Some(command)
    }

    /// Sequence number of the most recently scheduled command.
    #[must_use]
    pub fn last_sequence(&self) -> u64 {
        self.seq
    }

    /// When the next command fires.
    #[must_use]
    pub fn next_due(&self) -> Option<Duration> {
        self.queue.keys().next().map(|(due, _)| *due)
    }

    /// Number of pending commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
