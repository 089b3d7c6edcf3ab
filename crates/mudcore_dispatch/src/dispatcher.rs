//! The dispatch chain.
//!
//! A line typed by an actor is offered, in order, to:
//!
//! 1. the actor's innermost active conversation
//! 2. the registry of the actor's room
//! 3. the registry of each other character in the room, in membership order
//! 4. the global registry
//!
//! The first level that does not answer [`CommandOutcome::NotHandled`] wins.
//! If none accepts the line, the actor gets the unknown-command notice.

use std::collections::VecDeque;
use std::time::Duration;

use mudcore_foundation::{CharacterId, ConversationId, RoomId};
use mudcore_parser::{Command, CommandTokenizer};
use mudcore_world::{Character, World};

use crate::config::DispatchConfig;
use crate::context::{CommandContext, FollowUp};
use crate::conversation::ConversationTable;
use crate::definition::{CommandOutcome, Origin};
use crate::registry::{CommandRegistry, Registries};
use crate::sink::MessageSink;

/// Called once per world tick, after scheduled commands and conversations.
pub type TickHook = Box<dyn FnMut(&mut CommandContext<'_>, Duration)>;

/// Which level of the chain accepted a line.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Responder {
    /// The actor's innermost conversation.
    Conversation(ConversationId),
    /// The actor's room.
    Room(RoomId),
    /// Another character in the room.
    Character(CharacterId),
    /// The global registry.
    Global,
}

/// Result of dispatching one line.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The line was blank.
    Empty,
    /// Accepted by a level of the chain.
    Handled(Responder),
    /// Nobody accepted it; the unknown-command notice was sent.
    Unknown,
}

impl DispatchOutcome {
    /// Whether some level accepted the line.
    #[must_use]
    pub fn is_handled(self) -> bool {
        matches!(self, Self::Handled(_))
    }
}

/// Owns the registries and conversations and routes input through them.
pub struct Dispatcher {
    config: DispatchConfig,
    registries: Registries,
    conversations: ConversationTable,
    follow_ups: VecDeque<FollowUp>,
    tick_hooks: Vec<TickHook>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(DispatchConfig::default())
    }
}

impl Dispatcher {
    /// Creates a dispatcher with empty registries.
    #[must_use]
    pub fn new(config: DispatchConfig) -> Self {
        Self {
            config,
            registries: Registries::default(),
            conversations: ConversationTable::new(),
            follow_ups: VecDeque::new(),
            tick_hooks: Vec::new(),
        }
    }

    /// Dispatch settings.
    #[must_use]
    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// All registries.
    #[must_use]
    pub fn registries(&self) -> &Registries {
        &self.registries
    }

    /// All registries, for registration.
    pub fn registries_mut(&mut self) -> &mut Registries {
        &mut self.registries
    }

    /// The global registry.
    pub fn global_mut(&mut self) -> &mut CommandRegistry {
        self.registries.global_mut()
    }

    /// A room's registry, created on first use.
    pub fn room_registry_mut(&mut self, room: RoomId) -> &mut CommandRegistry {
        self.registries.room_mut(room)
    }

    /// A character's registry, created on first use.
    pub fn character_registry_mut(&mut self, character: CharacterId) -> &mut CommandRegistry {
        self.registries.character_mut(character)
    }

    /// Active conversations.
    #[must_use]
    pub fn conversations(&self) -> &ConversationTable {
        &self.conversations
    }

    /// Registers a hook run on every tick.
    pub fn add_tick_hook<F>(&mut self, hook: F)
    where
        F: FnMut(&mut CommandContext<'_>, Duration) + 'static,
    {
        self.tick_hooks.push(Box::new(hook));
    }

    /// Dispatches one line for `actor`, then every follow-up it queued.
    pub fn dispatch(
        &mut self,
        world: &mut World,
        sink: &mut dyn MessageSink,
        actor: CharacterId,
        line: &str,
    ) -> DispatchOutcome {
        let outcome = self.dispatch_line(world, sink, actor, line, 0);
        self.drain_follow_ups(world, sink);
        outcome
    }

    /// Runs `f` with a full command context, then dispatches any follow-ups
    /// it queued. For driving conversations or scripts from outside a
    /// command.
    pub fn with_context<R>(
        &mut self,
        world: &mut World,
        sink: &mut dyn MessageSink,
        f: impl FnOnce(&mut CommandContext<'_>) -> R,
    ) -> R {
        let result = {
            let mut ctx = CommandContext::new(
                world,
                sink,
                &mut self.conversations,
                &self.registries,
                &mut self.follow_ups,
                &self.config,
                0,
            );
            f(&mut ctx)
        };
        self.drain_follow_ups(world, sink);
        result
    }

    /// Advances the world clock by `delta` and runs one tick.
    ///
    /// Due scheduled commands are dispatched first, in due order, then every
    /// active conversation's `on_tick`, then the tick hooks.
    pub fn tick(&mut self, world: &mut World, sink: &mut dyn MessageSink, delta: Duration) {
        world.advance(delta);
        // One at a time, so a fired command can still cancel the ones after it.
        let through = self.conversations.scheduler().last_sequence();
        while let Some(command) = self
            .conversations
            .scheduler_mut()
            .pop_next_due(world.now(), through)
        {
            tracing::debug!(
                conversation = %command.conversation,
                actor = %command.actor,
                line = %command.line,
                "scheduled command fired"
            );
            self.dispatch_line(world, sink, command.actor, &command.line, 0);
            self.drain_follow_ups(world, sink);
        }

        let Self {
            config,
            registries,
            conversations,
            follow_ups,
            tick_hooks,
        } = self;
        let active: Vec<ConversationId> = conversations.ids().collect();
        let mut ctx =
            CommandContext::new(world, sink, conversations, registries, follow_ups, config, 0);
        for id in active {
            ctx.tick_conversation(id);
        }
        for hook in tick_hooks.iter_mut() {
            hook(&mut ctx, delta);
        }
        self.drain_follow_ups(world, sink);
    }

    fn drain_follow_ups(&mut self, world: &mut World, sink: &mut dyn MessageSink) {
        while let Some(follow_up) = self.follow_ups.pop_front() {
            if follow_up.depth > self.config.max_follow_up_depth {
                tracing::warn!(
                    actor = %follow_up.actor,
                    line = %follow_up.line,
                    depth = follow_up.depth,
                    "follow-up dropped"
                );
                continue;
            }
            self.dispatch_line(world, sink, follow_up.actor, &follow_up.line, follow_up.depth);
        }
    }

    fn dispatch_line(
        &mut self,
        world: &mut World,
        sink: &mut dyn MessageSink,
        actor: CharacterId,
        line: &str,
        depth: usize,
    ) -> DispatchOutcome {
        let command = CommandTokenizer::tokenize(line);
        if command.is_empty() {
            return DispatchOutcome::Empty;
        }

        let Self {
            config,
            registries,
            conversations,
            follow_ups,
            ..
        } = self;
        let registries: &Registries = registries;
        let mut ctx =
            CommandContext::new(world, sink, conversations, registries, follow_ups, config, depth);

        let outcome = match Self::route(&mut ctx, registries, actor, &command) {
            Some(responder) => DispatchOutcome::Handled(responder),
            None => {
                let notice = ctx.config().unknown_command.clone();
                ctx.emit(actor, notice);
                DispatchOutcome::Unknown
            }
        };
        tracing::debug!(%actor, word = command.command_word(), ?outcome, "dispatched");
        outcome
    }

    fn route(
        ctx: &mut CommandContext<'_>,
        registries: &Registries,
        actor: CharacterId,
        command: &Command,
    ) -> Option<Responder> {
        if let Some(conversation) = ctx.active_conversation(actor) {
            if ctx
                .offer_to_conversation(conversation, actor, command)
                .is_handled()
            {
                return Some(Responder::Conversation(conversation));
            }
        }

        let room = ctx.world().character(actor).and_then(Character::room);
        if let Some(room) = room {
            if let Some(registry) = registries.room(room) {
                if registry
                    .handle(ctx, actor, command, Origin::Room(room))
                    .is_handled()
                {
                    return Some(Responder::Room(room));
                }
            }

            let occupants = ctx
                .world()
                .room(room)
                .map(|r| r.characters().clone())
                .unwrap_or_default();
            for other in occupants.iter().copied().filter(|c| *c != actor) {
                if let Some(registry) = registries.character(other) {
                    if registry
                        .handle(ctx, actor, command, Origin::Character(other))
                        .is_handled()
                    {
                        return Some(Responder::Character(other));
                    }
                }
            }
        }

        registries
            .global()
            .handle(ctx, actor, command, Origin::Global)
            .is_handled()
            .then_some(Responder::Global)
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("config", &self.config)
            .field("registries", &self.registries)
            .field("conversations", &self.conversations)
            .field("follow_ups", &self.follow_ups.len())
            .field("tick_hooks", &self.tick_hooks.len())
            .finish()
    }
}
