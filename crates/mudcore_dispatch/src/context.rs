//! The context handed to handlers, conversations, and tick hooks.

use std::collections::VecDeque;
use std::time::Duration;

use mudcore_foundation::{CharacterId, ConversationId, Error, ErrorKind, Result, RoomId, Value};
use mudcore_parser::Command;
use mudcore_world::World;

use crate::config::DispatchConfig;
use crate::conversation::{Conversation, ConversationTable, EndCallback, Entry};
use crate::definition::CommandOutcome;
use crate::registry::Registries;
use crate::scheduler::ScheduledCommand;
use crate::sink::MessageSink;

/// A line queued by a handler, dispatched after the current one finishes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FollowUp {
    /// Who the line is dispatched for.
    pub actor: CharacterId,
    /// Raw input line.
    pub line: String,
    /// How many lines deep in the follow-up chain this is.
    pub depth: usize,
}

/// Mutable access to everything a command may touch.
pub struct CommandContext<'a> {
    world: &'a mut World,
    sink: &'a mut dyn MessageSink,
    conversations: &'a mut ConversationTable,
    registries: &'a Registries,
    follow_ups: &'a mut VecDeque<FollowUp>,
    config: &'a DispatchConfig,
    depth: usize,
}

impl<'a> CommandContext<'a> {
    pub(crate) fn new(
        world: &'a mut World,
        sink: &'a mut dyn MessageSink,
        conversations: &'a mut ConversationTable,
        registries: &'a Registries,
        follow_ups: &'a mut VecDeque<FollowUp>,
        config: &'a DispatchConfig,
        depth: usize,
    ) -> Self {
        Self {
            world,
            sink,
            conversations,
            registries,
            follow_ups,
            config,
            depth,
        }
    }

    /// The world.
    #[must_use]
    pub fn world(&self) -> &World {
        self.world
    }

    /// Mutable world.
    pub fn world_mut(&mut self) -> &mut World {
        self.world
    }

    /// The registries of the dispatch chain.
    #[must_use]
    pub fn registries(&self) -> &Registries {
        self.registries
    }

    /// Active conversations.
    #[must_use]
    pub fn conversations(&self) -> &ConversationTable {
        self.conversations
    }

    /// Dispatch settings.
    #[must_use]
    pub fn config(&self) -> &DispatchConfig {
        self.config
    }

    // =========================================================================
    // Output
    // =========================================================================

    /// Sends a line of text to one character.
    pub fn emit(&mut self, to: CharacterId, text: impl AsRef<str>) {
        self.sink.emit(to, text.as_ref());
    }

    /// Sends a line to everyone in a room, optionally skipping one character.
    pub fn emit_room(&mut self, room: RoomId, except: Option<CharacterId>, text: impl AsRef<str>) {
        let Some(occupants) = self.world.room(room).map(|r| r.characters().clone()) else {
            return;
        };
        for id in occupants.iter().filter(|id| Some(**id) != except) {
            self.sink.emit(*id, text.as_ref());
        }
    }

    /// Queues a line to be dispatched for `actor` once the current line is
    /// done. Queued lines run in the order they were sent.
    pub fn send_command(&mut self, actor: CharacterId, line: impl Into<String>) {
        self.follow_ups.push_back(FollowUp {
            actor,
            line: line.into(),
            depth: self.depth + 1,
        });
    }

    /// Puts a character off balance for `duration`.
    ///
    /// # Errors
    ///
    /// Returns `CharacterNotFound` if the character does not exist.
    pub fn put_off_balance(&mut self, actor: CharacterId, duration: Duration) -> Result<()> {
        self.world.put_off_balance(actor, duration)
    }

    // =========================================================================
    // Conversations
    // =========================================================================

    /// Starts a top-level conversation. `on_end` runs when it ends.
    ///
    /// # Errors
    ///
    /// Returns `CharacterNotFound` for an unknown participant, or
    /// `ConversationBusy` if a participant is already in a conversation.
    pub fn start_conversation(
        &mut self,
        participants: Vec<CharacterId>,
        behavior: Box<dyn Conversation>,
        on_end: Option<EndCallback>,
    ) -> Result<ConversationId> {
        require_participants(&participants)?;
        for p in &participants {
            let character = self
                .world
                .character(*p)
                .ok_or_else(|| Error::character_not_found(*p))?;
            if let Some(active) = character.conversation() {
                return Err(Error::conversation_busy(*p, active));
            }
        }
        let id = self.conversations.insert(Entry {
            participants: participants.clone(),
            parent: None,
            child: None,
            behavior: Some(behavior),
            on_end,
            pending_returns: Vec::new(),
        });
        self.claim(id, &participants);
        tracing::debug!(%id, ?participants, "conversation started");
        Ok(id)
    }

    /// Starts a child of `parent`. It receives the input of the participants
    /// it shares with the parent until it ends.
    ///
    /// # Errors
    ///
    /// Returns `ConversationNotFound` if the parent is not active,
    /// `CharacterNotFound` for an unknown participant, or `ConversationBusy`
    /// if the parent already has a child or a participant is held by an
    /// unrelated conversation.
    pub fn start_child(
        &mut self,
        parent: ConversationId,
        participants: Vec<CharacterId>,
        behavior: Box<dyn Conversation>,
    ) -> Result<ConversationId> {
        if !self.conversations.contains(parent) {
            return Err(Error::conversation_not_found(parent));
        }
        require_participants(&participants)?;
        let lineage = self.conversations.lineage(parent);
        let existing_child = self.conversations.child(parent);
        for p in &participants {
            let character = self
                .world
                .character(*p)
                .ok_or_else(|| Error::character_not_found(*p))?;
            if let Some(existing) = existing_child {
                return Err(Error::conversation_busy(*p, existing));
            }
            if let Some(active) = character.conversation().filter(|c| !lineage.contains(c)) {
                return Err(Error::conversation_busy(*p, active));
            }
        }
        let id = self.conversations.insert(Entry {
            participants: participants.clone(),
            parent: Some(parent),
            child: None,
            behavior: Some(behavior),
            on_end: None,
            pending_returns: Vec::new(),
        });
        self.claim(id, &participants);
        tracing::debug!(%id, %parent, ?participants, "child conversation started");
        Ok(id)
    }

    /// Ends a conversation with completion `data`.
    ///
    /// An active child is ended first, without returning to this one. Then
    /// the parent's `return_to_conversation` receives `data`, or for a
    /// top-level conversation its end callback does.
    ///
    /// # Errors
    ///
    /// Returns `ConversationNotFound` if the conversation is not active.
    pub fn end_conversation(&mut self, id: ConversationId, data: Value) -> Result<()> {
        self.finish(id, Some(data))
    }

    fn finish(&mut self, id: ConversationId, data: Option<Value>) -> Result<()> {
        if !self.conversations.contains(id) {
            return Err(Error::conversation_not_found(id));
        }
        if let Some(child) = self.conversations.child(id) {
            self.finish(child, None)?;
        }
        let entry = self
            .conversations
            .remove(id)
            .ok_or_else(|| Error::conversation_not_found(id))?;

        for p in &entry.participants {
            if let Some(character) = self.world.character_mut(*p) {
                if character.conversation() == Some(id) {
                    character.set_conversation(None);
                }
            }
        }
        tracing::debug!(%id, returned = data.is_some(), "conversation ended");

        let Some(data) = data else {
            return Ok(());
        };
        match entry.parent {
            Some(parent) => self.return_to(parent, data),
            None => {
                if let Some(on_end) = entry.on_end {
                    on_end(self, data);
                }
            }
        }
        Ok(())
    }

    /// Schedules `line` to be dispatched for `actor` after `delay`,
    /// replacing the conversation's pending command.
    ///
    /// # Errors
    ///
    /// Returns `ConversationNotFound` if the conversation is not active.
    pub fn schedule_command(
        &mut self,
        conversation: ConversationId,
        actor: CharacterId,
        line: impl Into<String>,
        delay: Duration,
    ) -> Result<()> {
        if !self.conversations.contains(conversation) {
            return Err(Error::conversation_not_found(conversation));
        }
        let command = ScheduledCommand {
            conversation,
            actor,
            line: line.into(),
            due: self.world.now() + delay,
        };
        if let Some(replaced) = self.conversations.scheduler_mut().schedule(command) {
            tracing::debug!(%conversation, line = %replaced.line, "scheduled command replaced");
        }
        Ok(())
    }

    /// Cancels the conversation's pending command. Returns whether one was
    /// pending.
    pub fn cancel_scheduled(&mut self, conversation: ConversationId) -> bool {
        self.conversations
            .scheduler_mut()
            .cancel(conversation)
            .is_some()
    }

    /// The innermost conversation receiving `actor`'s input.
    #[must_use]
    pub fn active_conversation(&self, actor: CharacterId) -> Option<ConversationId> {
        let outer = self.world.character(actor)?.conversation()?;
        self.conversations
            .contains(outer)
            .then(|| self.conversations.innermost_for(outer, actor))
    }

    pub(crate) fn offer_to_conversation(
        &mut self,
        id: ConversationId,
        actor: CharacterId,
        command: &Command,
    ) -> CommandOutcome {
        self.with_behavior(id, |behavior, ctx| behavior.on_input(ctx, id, actor, command))
            .unwrap_or(CommandOutcome::NotHandled)
    }

    pub(crate) fn tick_conversation(&mut self, id: ConversationId) {
        self.with_behavior(id, |behavior, ctx| behavior.on_tick(ctx, id));
    }

    /// Runs `f` with the conversation's behavior taken out of the table, so
    /// the behavior can reach the table through the context.
    fn with_behavior<R>(
        &mut self,
        id: ConversationId,
        f: impl FnOnce(&mut dyn Conversation, &mut Self) -> R,
    ) -> Option<R> {
        let Some(mut behavior) = self.conversations.take_behavior(id) else {
            tracing::trace!(%id, "conversation behavior unavailable");
            return None;
        };
        let result = f(behavior.as_mut(), self);
        self.conversations.restore_behavior(id, behavior);
        while let Some(data) = self.conversations.take_pending_return(id) {
            self.return_to(id, data);
        }
        Some(result)
    }

    /// Hands a child's completion data to `parent`, or queues it if the
    /// parent is in the middle of a callback.
    fn return_to(&mut self, parent: ConversationId, data: Value) {
        if self.conversations.is_busy(parent) {
            self.conversations.defer_return(parent, data);
            return;
        }
        self.with_behavior(parent, |behavior, ctx| {
            behavior.return_to_conversation(ctx, parent, data);
        });
    }

    fn claim(&mut self, id: ConversationId, participants: &[CharacterId]) {
        for p in participants {
            if let Some(character) = self.world.character_mut(*p) {
                if character.conversation().is_none() {
                    character.set_conversation(Some(id));
                }
            }
        }
    }
}

fn require_participants(participants: &[CharacterId]) -> Result<()> {
    if participants.is_empty() {
        return Err(Error::new(ErrorKind::Internal(
            "a conversation needs at least one participant".to_string(),
        )));
    }
    Ok(())
}
