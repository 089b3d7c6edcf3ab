//! Conversations.
//!
//! A conversation captures every line its participants type until it ends.
//! Conversations may nest: a child becomes the sole receiver for the
//! participants it shares with its parent, and when it ends, control returns
//! to the parent along with whatever completion data the child produced.
//!
//! Parent and child refer to each other by [`ConversationId`]. Ending either
//! side clears both links; neither keeps the other alive.
//!
//! Lifecycle operations live on [`CommandContext`] because they also update
//! the participants in the world and run callbacks.

use std::collections::BTreeMap;

use mudcore_foundation::{CharacterId, ConversationId, Value};
use mudcore_parser::Command;

use crate::context::CommandContext;
use crate::definition::CommandOutcome;
use crate::scheduler::Scheduler;

/// Behavior of one conversation.
pub trait Conversation {
    /// Offered every line a participant types while this is their innermost
    /// conversation. Return [`CommandOutcome::NotHandled`] to let the rest of
    /// the chain see the line.
    fn on_input(
        &mut self,
        ctx: &mut CommandContext<'_>,
        me: ConversationId,
        actor: CharacterId,
        command: &Command,
    ) -> CommandOutcome;

    /// Called when a child conversation ends, with the child's completion data.
    fn return_to_conversation(
        &mut self,
        _ctx: &mut CommandContext<'_>,
        _me: ConversationId,
        _data: Value,
    ) {
    }

    /// Called once per world tick while active.
    fn on_tick(&mut self, _ctx: &mut CommandContext<'_>, _me: ConversationId) {}
}

/// Called when a top-level conversation ends.
pub type EndCallback = Box<dyn FnOnce(&mut CommandContext<'_>, Value)>;

pub(crate) struct Entry {
    pub(crate) participants: Vec<CharacterId>,
    pub(crate) parent: Option<ConversationId>,
    pub(crate) child: Option<ConversationId>,
    pub(crate) behavior: Option<Box<dyn Conversation>>,
    pub(crate) on_end: Option<EndCallback>,
    /// Completion data from children that ended while `behavior` was out.
    pub(crate) pending_returns: Vec<Value>,
}

/// Arena of active conversations plus their scheduled commands.
#[derive(Default)]
pub struct ConversationTable {
    entries: BTreeMap<ConversationId, Entry>,
    scheduler: Scheduler,
    next_id: u64,
}

impl ConversationTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `id` is active.
    #[must_use]
    pub fn contains(&self, id: ConversationId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Active conversation ids in creation order.
    pub fn ids(&self) -> impl Iterator<Item = ConversationId> + '_ {
        self.entries.keys().copied()
    }

    /// Number of active conversations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no conversation is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The conversation's participants.
    #[must_use]
    pub fn participants(&self, id: ConversationId) -> Option<&[CharacterId]> {
        self.entries.get(&id).map(|e| e.participants.as_slice())
    }

    /// The conversation's parent.
    #[must_use]
    pub fn parent(&self, id: ConversationId) -> Option<ConversationId> {
        self.entries.get(&id)?.parent
    }

    /// The conversation's active child.
    #[must_use]
    pub fn child(&self, id: ConversationId) -> Option<ConversationId> {
        self.entries.get(&id)?.child
    }

    /// Scheduled commands.
    #[must_use]
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub(crate) fn scheduler_mut(&mut self) -> &mut Scheduler {
        &mut self.scheduler
    }

    /// The deepest conversation at or below `start` that includes `actor`.
    /// A child that leaves `actor` out does not end the search, since one of
    /// its own children may include them again.
    #[must_use]
    pub fn innermost_for(&self, start: ConversationId, actor: CharacterId) -> ConversationId {
        let mut innermost = start;
        let mut current = start;
        while let Some(child) = self.child(current) {
            if self
                .participants(child)
                .is_some_and(|p| p.contains(&actor))
            {
                innermost = child;
            }
            current = child;
        }
        innermost
    }

    /// `id` and all its ancestors, innermost first.
    #[must_use]
    pub fn lineage(&self, id: ConversationId) -> Vec<ConversationId> {
        let mut chain = Vec::new();
        let mut current = Some(id);
        while let Some(c) = current.filter(|c| self.contains(*c)) {
            chain.push(c);
            current = self.parent(c);
        }
        chain
    }

    pub(crate) fn insert(&mut self, entry: Entry) -> ConversationId {
        self.next_id += 1;
        let id = ConversationId::new(self.next_id);
        if let Some(parent) = entry.parent.and_then(|p| self.entries.get_mut(&p)) {
            parent.child = Some(id);
        }
        self.entries.insert(id, entry);
        id
    }

    /// Removes an entry, unlinking it from its parent and cancelling its
    /// scheduled command.
    pub(crate) fn remove(&mut self, id: ConversationId) -> Option<Entry> {
        let entry = self.entries.remove(&id)?;
        self.scheduler.cancel(id);
        if let Some(parent) = entry.parent.and_then(|p| self.entries.get_mut(&p)) {
            if parent.child == Some(id) {
                parent.child = None;
            }
        }
        Some(entry)
    }

    pub(crate) fn take_behavior(&mut self, id: ConversationId) -> Option<Box<dyn Conversation>> {
        self.entries.get_mut(&id)?.behavior.take()
    }

    /// Whether the conversation's behavior is taken out for a callback.
    pub(crate) fn is_busy(&self, id: ConversationId) -> bool {
        self.entries.get(&id).is_some_and(|e| e.behavior.is_none())
    }

    /// Holds a child's completion data until the conversation's behavior is
    /// back in the table.
    pub(crate) fn defer_return(&mut self, id: ConversationId, data: Value) {
        if let Some(entry) = self.entries.get_mut(&id) {
            entry.pending_returns.push(data);
        }
    }

    pub(crate) fn take_pending_return(&mut self, id: ConversationId) -> Option<Value> {
        let pending = &mut self.entries.get_mut(&id)?.pending_returns;
        (!pending.is_empty()).then(|| pending.remove(0))
    }

    /// Puts a behavior back unless the conversation ended while it was out.
    pub(crate) fn restore_behavior(&mut self, id: ConversationId, behavior: Box<dyn Conversation>) {
        if let Some(entry) = self.entries.get_mut(&id) {
            entry.behavior = Some(behavior);
        }
    }
}

impl std::fmt::Debug for ConversationTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversationTable")
            .field("active", &self.entries.keys().collect::<Vec<_>>())
            .field("scheduled", &self.scheduler.len())
            .finish()
    }
}
