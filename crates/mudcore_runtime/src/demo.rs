//! A small village to walk around in.
//!
//! Besides rooms and doors of every kind, the village shows the three layers
//! of the dispatch chain working together: the temple has a room command, the
//! innkeeper owns a character command that opens a conversation, and buying a
//! drink nests a yes/no confirmation inside that conversation.

use std::time::Duration;

use mudcore_dispatch::{
    CommandContext, CommandDefinition, CommandOutcome, Conversation, Dispatcher, Invocation,
};
use mudcore_foundation::{CharacterId, ConversationId, Result, RoomId, Value, ZonedKey};
use mudcore_parser::{Argument, Command};
use mudcore_world::{CharacterTemplate, Direction, Door, Exit, ItemLocation, ItemTemplate, World};

use crate::config::RuntimeConfig;
use crate::session::Session;
use crate::stdlib::register_standard_commands;

/// Zone key of the demo village.
pub const ZONE: &str = "village";

/// How long the innkeeper waits for a customer before giving up.
pub const IDLE_TIMEOUT: Duration = Duration::from_secs(30);

/// How often the temple bell rings.
pub const BELL_INTERVAL: Duration = Duration::from_secs(60);

/// Builds the village and a session playing a fresh character in the square.
///
/// # Errors
///
/// Returns an error if the world fails to build.
pub fn build(config: &RuntimeConfig) -> Result<Session> {
    let mut world = World::new();
    let zone = world.add_zone(ZONE, "Millbrook")?;

    let square = world.add_room(
        zone,
        "square",
        "Village Square",
        "Cobblestones ring a dry fountain. An inn stands to the north and a temple to the east.",
    )?;
    let inn = world.add_room(
        zone,
        "inn",
        "The Crooked Kettle",
        "Low beams, a smoky hearth, and the smell of spilled ale.",
    )?;
    let temple = world.add_room(
        zone,
        "temple",
        "Temple of the Dawn",
        "Pale light falls across a worn altar.",
    )?;
    let gate = world.add_room(
        zone,
        "gate",
        "South Gate",
        "A heavy gate keeps the road out. Guards let no beast through.",
    )?;
    let road = world.add_room(zone, "road", "Muddy Road", "The road winds south into the hills.")?;
    let cellar = world.add_room(
        zone,
        "cellar",
        "Hidden Cellar",
        "Dust, barrels, and a single locked hatch.",
    )?;
    let vault = world.add_room(
        zone,
        "vault",
        "Smugglers' Vault",
        "Crates stamped with foreign seals.",
    )?;

    link(&mut world, square, Direction::North, "inn", None)?;
    link(&mut world, inn, Direction::South, "square", None)?;
    link(&mut world, square, Direction::East, "temple", None)?;
    link(&mut world, temple, Direction::West, "square", None)?;
    link(&mut world, square, Direction::South, "gate", None)?;
    link(&mut world, gate, Direction::North, "square", None)?;
    let gate_door = Door::closed().no_mob();
    link(&mut world, gate, Direction::South, "road", Some(gate_door))?;
    link(&mut world, road, Direction::North, "gate", Some(gate_door))?;
    link(&mut world, inn, Direction::Down, "cellar", Some(Door::closed().secret()))?;
    link(&mut world, cellar, Direction::Up, "inn", Some(Door::closed()))?;
    let hatch = Door::closed().locked();
    link(&mut world, cellar, Direction::East, "vault", Some(hatch))?;
    link(&mut world, vault, Direction::West, "cellar", Some(hatch))?;

    world.spawn_item(
        ItemLocation::Room(square),
        ItemTemplate::new("lantern", "a brass lantern").with_keywords(["lantern", "brass"]),
    )?;
    world.spawn_item(
        ItemLocation::Room(temple),
        ItemTemplate::new("candle", "a stub of candle").with_keywords(["candle", "stub"]),
    )?;

    let mut template = CharacterTemplate::player("player", config.player_name.as_str())
        .with_keywords([config.player_name.to_lowercase()]);
    if config.admin {
        template = template.admin();
    }
    let player = world.spawn_character(square, template)?;
    world.spawn_item(
        ItemLocation::Inventory(player),
        ItemTemplate::new("cloak", "a travel-stained cloak").with_keywords(["cloak"]),
    )?;
    let keeper = world.spawn_character(
        inn,
        CharacterTemplate::npc("innkeeper", "Maren the innkeeper")
            .with_keywords(["maren", "innkeeper"]),
    )?;
    world.spawn_character(
        gate,
        CharacterTemplate::npc("guard", "a bored guard").with_keywords(["guard"]),
    )?;

    let mut dispatcher = Dispatcher::new(config.dispatch.clone());
    register_standard_commands(dispatcher.global_mut())?;
    dispatcher
        .room_registry_mut(temple)
        .register(CommandDefinition::new("pray", pray));
    dispatcher.character_registry_mut(keeper).register(
        CommandDefinition::new("talk", move |ctx, inv| talk_to_keeper(ctx, inv, keeper))
            .with_grammar("char.room.noself")?,
    );
    let mut since_bell = Duration::ZERO;
    dispatcher.add_tick_hook(move |ctx, delta| {
        since_bell += delta;
        while since_bell >= BELL_INTERVAL {
            since_bell -= BELL_INTERVAL;
            for room in [square, temple] {
                ctx.emit_room(room, None, "The temple bell tolls.");
            }
        }
    });

    Session::new(world, dispatcher, player)
}

fn link(
    world: &mut World,
    from: RoomId,
    direction: Direction,
    to: &str,
    door: Option<Door>,
) -> Result<()> {
    let mut exit = Exit::new(direction, ZonedKey::from_parts(to, ZONE)?);
    if let Some(door) = door {
        exit = exit.with_door(door);
    }
    world.add_exit(from, exit)
}

fn name(ctx: &CommandContext<'_>, id: CharacterId) -> String {
    ctx.world()
        .character(id)
        .map_or_else(|| "Someone".to_string(), |c| c.name().to_string())
}

// =============================================================================
// Temple
// =============================================================================

fn pray(ctx: &mut CommandContext<'_>, inv: &Invocation<'_>) -> CommandOutcome {
    ctx.emit(inv.actor, "You kneel at the altar. A calm settles over you.");
    let who = name(ctx, inv.actor);
    if let Some(room) = ctx.world().character(inv.actor).and_then(mudcore_world::Character::room) {
        ctx.emit_room(room, Some(inv.actor), format!("{who} kneels in prayer."));
    }
    CommandOutcome::Handled
}

// =============================================================================
// Innkeeper
// =============================================================================

fn talk_to_keeper(
    ctx: &mut CommandContext<'_>,
    inv: &Invocation<'_>,
    keeper: CharacterId,
) -> CommandOutcome {
    if inv.arg(0).and_then(Argument::as_character) != Some(keeper) {
        return CommandOutcome::NotHandled;
    }
    let customer = inv.actor;
    let farewell = move |ctx: &mut CommandContext<'_>, _: Value| {
        ctx.emit(customer, "Maren turns back to polishing mugs.");
    };
    let started = ctx.start_conversation(
        vec![customer, keeper],
        Box::new(Haggle { customer, keeper }),
        Some(Box::new(farewell)),
    );
    match started {
        Ok(id) => {
            ctx.emit(
                customer,
                "Maren looks up. \"What'll it be? I can tell you the menu, or you can buy \
                 an ale. Say bye when you're done.\"",
            );
            if let Err(e) = ctx.schedule_command(id, customer, "bye", IDLE_TIMEOUT) {
                tracing::warn!(error = %e, "could not schedule innkeeper timeout");
            }
        }
        Err(e) => {
            tracing::debug!(error = %e, "innkeeper busy");
            ctx.emit(customer, "Maren is busy with someone else.");
        }
    }
    CommandOutcome::Handled
}

/// The customer's side of a chat with the innkeeper.
struct Haggle {
    customer: CharacterId,
    keeper: CharacterId,
}

impl Haggle {
    fn keep_waiting(ctx: &mut CommandContext<'_>, me: ConversationId, customer: CharacterId) {
        if let Err(e) = ctx.schedule_command(me, customer, "bye", IDLE_TIMEOUT) {
            tracing::warn!(error = %e, "could not reschedule innkeeper timeout");
        }
    }
}

impl Conversation for Haggle {
    fn on_input(
        &mut self,
        ctx: &mut CommandContext<'_>,
        me: ConversationId,
        actor: CharacterId,
        command: &Command,
    ) -> CommandOutcome {
        if actor != self.customer {
            return CommandOutcome::NotHandled;
        }
        match command.command_word() {
            "menu" => {
                ctx.emit(actor, "\"Ale, one coin. That's the menu.\"");
                Self::keep_waiting(ctx, me, actor);
                CommandOutcome::Handled
            }
            "buy" => {
                ctx.cancel_scheduled(me);
                match ctx.start_child(me, vec![actor], Box::new(Confirm)) {
                    Ok(_) => ctx.emit(actor, "\"One ale, then?\" (yes/no)"),
                    Err(e) => tracing::warn!(error = %e, "could not start confirmation"),
                }
                CommandOutcome::Handled
            }
            "bye" => {
                let keeper = name(ctx, self.keeper);
                ctx.emit(actor, format!("You nod to {keeper}."));
                if let Err(e) = ctx.end_conversation(me, Value::Nil) {
                    tracing::warn!(error = %e, "could not end innkeeper conversation");
                }
                CommandOutcome::Handled
            }
            _ => {
                Self::keep_waiting(ctx, me, actor);
                CommandOutcome::NotHandled
            }
        }
    }

    fn return_to_conversation(
        &mut self,
        ctx: &mut CommandContext<'_>,
        me: ConversationId,
        data: Value,
    ) {
        if data.as_bool() == Some(true) {
            let ale = ItemTemplate::new("ale", "a mug of ale").with_keywords(["ale", "mug"]);
            match ctx.world_mut().spawn_item(ItemLocation::Inventory(self.customer), ale) {
                Ok(_) => ctx.emit(self.customer, "Maren slides a mug of ale across the bar."),
                Err(e) => tracing::warn!(error = %e, "could not hand over ale"),
            }
        } else {
            ctx.emit(self.customer, "\"Suit yourself.\"");
        }
        Self::keep_waiting(ctx, me, self.customer);
    }
}

/// A yes/no question that ends with a boolean.
struct Confirm;

impl Conversation for Confirm {
    fn on_input(
        &mut self,
        ctx: &mut CommandContext<'_>,
        me: ConversationId,
        actor: CharacterId,
        command: &Command,
    ) -> CommandOutcome {
        let answer = match command.command_word() {
            "yes" | "y" => true,
            "no" | "n" => false,
            _ => {
                ctx.emit(actor, "Please answer yes or no.");
                return CommandOutcome::Handled;
            }
        };
        if let Err(e) = ctx.end_conversation(me, Value::Bool(answer)) {
            tracing::warn!(error = %e, "could not end confirmation");
        }
        CommandOutcome::Handled
    }
}
