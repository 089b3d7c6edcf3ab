//! Command registries.
//!
//! A registry maps command words to definitions. Aliases are secondary
//! entries pointing at the same shared definition. Registries exist on three
//! levels: one global, and optionally one per room and one per character.

use std::collections::HashMap;
use std::rc::Rc;

use mudcore_foundation::{CharacterId, Error, Result, RoomId};
use mudcore_parser::{ArgumentResolver, Command, ResolveContext};

use crate::context::CommandContext;
use crate::definition::{CommandDefinition, CommandOutcome, Invocation, Origin};

/// Command word to definition map.
#[derive(Clone, Debug, Default)]
pub struct CommandRegistry {
    entries: HashMap<String, Rc<CommandDefinition>>,
}

impl CommandRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a definition, logging and ignoring a duplicate name.
    pub fn register(&mut self, definition: CommandDefinition) {
        if let Err(err) = self.try_register(definition) {
            tracing::warn!(%err, "command registration ignored");
        }
    }

    /// Registers a definition.
    ///
    /// Aliases that collide with an existing entry are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateRegistration` if the name is already taken. The
    /// existing entry is left untouched.
    pub fn try_register(&mut self, definition: CommandDefinition) -> Result<()> {
        if self.entries.contains_key(definition.name()) {
            return Err(Error::duplicate_registration(definition.name()));
        }
        let definition = Rc::new(definition);
        self.entries
            .insert(definition.name().to_string(), Rc::clone(&definition));
        for alias in definition.aliases() {
            if self.entries.contains_key(alias) {
                tracing::warn!(command = definition.name(), %alias, "alias already taken");
                continue;
            }
            self.entries.insert(alias.clone(), Rc::clone(&definition));
        }
        Ok(())
    }

    /// Removes a definition and every alias pointing at it.
    pub fn unregister(&mut self, name: &str) -> Option<Rc<CommandDefinition>> {
        let name = name.to_lowercase();
        let removed = self.entries.get(&name).filter(|d| d.name() == name).cloned()?;
        self.entries.retain(|_, d| !Rc::ptr_eq(d, &removed));
        Some(removed)
    }

    /// Resolves a command word or alias.
    #[must_use]
    pub fn lookup(&self, word: &str) -> Option<&Rc<CommandDefinition>> {
        self.entries.get(&word.to_lowercase())
    }

    /// Every definition once, by name.
    #[must_use]
    pub fn definitions(&self) -> Vec<&Rc<CommandDefinition>> {
        let mut defs: Vec<_> = self
            .entries
            .iter()
            .filter(|(key, def)| key.as_str() == def.name())
            .map(|(_, def)| def)
            .collect();
        defs.sort_by(|a, b| a.name().cmp(b.name()));
        defs
    }

    /// Number of distinct definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .iter()
            .filter(|(key, def)| key.as_str() == def.name())
            .count()
    }

    /// Whether nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Offers a tokenized line to this registry.
    ///
    /// Unknown words and admin-only commands run by non-admins are
    /// `NotHandled`. A balance-gated command run while off balance sends the
    /// cooldown notice and is `Blocked`. Otherwise the grammar is resolved and
    /// the handler's own outcome is returned.
    pub fn handle(
        &self,
        ctx: &mut CommandContext<'_>,
        actor: CharacterId,
        command: &Command,
        origin: Origin,
    ) -> CommandOutcome {
        let Some(definition) = self.lookup(command.command_word()) else {
            return CommandOutcome::NotHandled;
        };
        let Some(character) = ctx.world().character(actor) else {
            return CommandOutcome::NotHandled;
        };

        if definition.is_admin_only() && !character.is_admin() {
            tracing::debug!(%actor, command = definition.name(), "admin command refused");
            return CommandOutcome::NotHandled;
        }

        if definition.is_balance_gated() {
            if let Some(remaining) = ctx.world().balance_remaining(actor) {
                let notice = ctx.config().cooldown_message(remaining);
                ctx.emit(actor, notice);
                return CommandOutcome::Blocked;
            }
        }

        let args = match definition.grammar() {
            Some(grammar) => ArgumentResolver::resolve(
                &ResolveContext::new(ctx.world(), actor),
                grammar,
                command.params(),
            ),
            None => Some(Vec::new()),
        };
        tracing::debug!(
            %actor,
            command = definition.name(),
            ?origin,
            bound = args.is_some(),
            "invoking"
        );

        let invocation = Invocation {
            actor,
            command,
            args,
            origin,
            data: definition.data(),
        };
        definition.invoke(ctx, &invocation)
    }
}

/// The registries the dispatch chain consults.
#[derive(Clone, Debug, Default)]
pub struct Registries {
    global: CommandRegistry,
    rooms: HashMap<RoomId, CommandRegistry>,
    characters: HashMap<CharacterId, CommandRegistry>,
}

impl Registries {
    /// The global registry.
    #[must_use]
    pub fn global(&self) -> &CommandRegistry {
        &self.global
    }

    /// Mutable global registry.
    pub fn global_mut(&mut self) -> &mut CommandRegistry {
        &mut self.global
    }

    /// A room's registry, if it has one.
    #[must_use]
    pub fn room(&self, room: RoomId) -> Option<&CommandRegistry> {
        self.rooms.get(&room)
    }

    /// A room's registry, created on first use.
    pub fn room_mut(&mut self, room: RoomId) -> &mut CommandRegistry {
        self.rooms.entry(room).or_default()
    }

    /// Detaches a room's registry.
    pub fn remove_room(&mut self, room: RoomId) -> Option<CommandRegistry> {
        self.rooms.remove(&room)
    }

    /// A character's registry, if it has one.
    #[must_use]
    pub fn character(&self, character: CharacterId) -> Option<&CommandRegistry> {
        self.characters.get(&character)
    }

    /// A character's registry, created on first use.
    pub fn character_mut(&mut self, character: CharacterId) -> &mut CommandRegistry {
        self.characters.entry(character).or_default()
    }

    /// Detaches a character's registry.
    pub fn remove_character(&mut self, character: CharacterId) -> Option<CommandRegistry> {
        self.characters.remove(&character)
    }
}
