//! Standard commands.
//!
//! The command set every world starts with: looking around, talking, moving,
//! handling items and doors. Worlds add their own on top, usually on room or
//! character registries so they take precedence over these.

use std::fmt::Write as _;
use std::time::Duration;

use mudcore_dispatch::{
    CommandContext, CommandDefinition, CommandOutcome, CommandRegistry, Invocation,
};
use mudcore_foundation::{CharacterId, Result, RoomId};
use mudcore_parser::Argument;
use mudcore_world::{Direction, HoldsItems, ItemLocation, World};

/// How long `rest` keeps a character off balance.
pub const REST_DURATION: Duration = Duration::from_secs(3);

/// Registers every standard command on `registry`.
///
/// # Errors
///
/// Returns an error if a standard grammar fails to compile.
pub fn register_standard_commands(registry: &mut CommandRegistry) -> Result<()> {
    registry.register(CommandDefinition::new("look", look).with_aliases(["l"]));
    registry.register(CommandDefinition::new("peek", peek).with_grammar("exit.visible.peekable")?);
    registry.register(
        CommandDefinition::new("say", say)
            .with_aliases(["'"])
            .with_grammar("string")?,
    );
    registry.register(
        CommandDefinition::new("tell", tell).with_grammar("char.zone.player.noself string")?,
    );
    registry.register(
        CommandDefinition::new("get", get)
            .with_aliases(["take"])
            .with_grammar("item.room")?,
    );
    registry.register(CommandDefinition::new("drop", drop_item).with_grammar("item.inv")?);
    registry.register(
        CommandDefinition::new("give", give).with_grammar("item.inv [to] char.room.noself")?,
    );
    registry.register(CommandDefinition::new("inventory", inventory).with_aliases(["i", "inv"]));
    registry.register(
        CommandDefinition::new("equip", equip)
            .with_aliases(["wear"])
            .with_grammar("item.inv [on] word")?,
    );
    registry.register(CommandDefinition::new("go", go).with_grammar("exit.visible.passable")?);
    for direction in Direction::ALL {
        registry.register(
            CommandDefinition::new(direction.name(), walk)
                .with_aliases([direction.alias()])
                .with_data(direction.name()),
        );
    }
    registry.register(CommandDefinition::new("open", open).with_grammar("exit.visible.openable")?);
    registry.register(
        CommandDefinition::new("close", close).with_grammar("exit.visible.closeable")?,
    );
    registry.register(CommandDefinition::new("rest", rest).requires_balance());
    registry.register(CommandDefinition::new("who", who));
    registry.register(CommandDefinition::new("goto", goto).admin_only().with_grammar("word")?);
    registry.register(CommandDefinition::new("commands", commands));
    registry.register(CommandDefinition::new("talk", talk).with_grammar("char.room.noself")?);
    Ok(())
}

// =============================================================================
// Helpers
// =============================================================================

fn actor_room(world: &World, actor: CharacterId) -> Option<RoomId> {
    world.character(actor)?.room()
}

fn character_name(world: &World, id: CharacterId) -> String {
    world
        .character(id)
        .map_or_else(|| "Someone".to_string(), |c| c.name().to_string())
}

fn item_name(world: &World, id: mudcore_foundation::ItemId) -> String {
    world
        .item(id)
        .map_or_else(|| "something".to_string(), |i| i.name().to_string())
}

/// Renders a room as seen by `viewer`.
#[must_use]
pub fn describe_room(world: &World, room: RoomId, viewer: CharacterId) -> String {
    let (Some(room), Some(character)) = (world.room(room), world.character(viewer)) else {
        return "You see nothing.".to_string();
    };
    let mut out = format!("{}\n{}", room.title(), room.description());

    let exits: Vec<String> = room
        .exits()
        .filter(|e| e.is_visible_to(character))
        .map(|e| {
            if e.is_closed() {
                format!("{} (closed)", e.direction)
            } else {
                e.direction.to_string()
            }
        })
        .collect();
    if exits.is_empty() {
        out.push_str("\nExits: none");
    } else {
        let _ = write!(out, "\nExits: {}", exits.join(", "));
    }

    let others: Vec<String> = room
        .characters()
        .iter()
        .filter(|id| **id != viewer)
        .map(|id| character_name(world, *id))
        .collect();
    if !others.is_empty() {
        let _ = write!(out, "\nAlso here: {}", others.join(", "));
    }

    let items: Vec<String> = room.items().iter().map(|id| item_name(world, *id)).collect();
    if !items.is_empty() {
        let _ = write!(out, "\nYou see: {}", items.join(", "));
    }
    out
}

/// Moves `actor` through the exit in `direction`, announcing it on both
/// sides. Returns whether the actor moved.
pub fn move_actor(ctx: &mut CommandContext<'_>, actor: CharacterId, direction: Direction) -> bool {
    let Some(from) = actor_room(ctx.world(), actor) else {
        return false;
    };
    let Some(to) = ctx.world().exit_destination(from, direction) else {
        return false;
    };
    let name = character_name(ctx.world(), actor);
    if ctx.world_mut().move_character(actor, to).is_err() {
        return false;
    }
    ctx.emit_room(from, Some(actor), format!("{name} leaves {direction}."));
    ctx.emit_room(to, Some(actor), format!("{name} arrives from the {}.", direction.opposite()));
    true
}

// =============================================================================
// Looking
// =============================================================================

fn look(ctx: &mut CommandContext<'_>, inv: &Invocation<'_>) -> CommandOutcome {
    let text = match actor_room(ctx.world(), inv.actor) {
        Some(room) => describe_room(ctx.world(), room, inv.actor),
        None => "You are nowhere.".to_string(),
    };
    ctx.emit(inv.actor, text);
    CommandOutcome::Handled
}

fn peek(ctx: &mut CommandContext<'_>, inv: &Invocation<'_>) -> CommandOutcome {
    let target = inv
        .arg(0)
        .and_then(Argument::as_exit)
        .zip(actor_room(ctx.world(), inv.actor))
        .and_then(|(dir, room)| ctx.world().exit_destination(room, dir));
    let text = match target {
        Some(room) => describe_room(ctx.world(), room, inv.actor),
        None => "You can't see that way.".to_string(),
    };
    ctx.emit(inv.actor, text);
    CommandOutcome::Handled
}

// =============================================================================
// Talking
// =============================================================================

fn say(ctx: &mut CommandContext<'_>, inv: &Invocation<'_>) -> CommandOutcome {
    let Some(text) = inv.arg(0).and_then(Argument::as_str) else {
        ctx.emit(inv.actor, "Say what?");
        return CommandOutcome::Handled;
    };
    let name = character_name(ctx.world(), inv.actor);
    if let Some(room) = actor_room(ctx.world(), inv.actor) {
        ctx.emit_room(room, Some(inv.actor), format!("{name} says: {text}"));
    }
    ctx.emit(inv.actor, format!("You say: {text}"));
    CommandOutcome::Handled
}

fn tell(ctx: &mut CommandContext<'_>, inv: &Invocation<'_>) -> CommandOutcome {
    let target = inv.arg(0).and_then(Argument::as_character);
    let text = inv.arg(1).and_then(Argument::as_str);
    let (Some(target), Some(text)) = (target, text) else {
        ctx.emit(inv.actor, "Tell whom what?");
        return CommandOutcome::Handled;
    };
    let from = character_name(ctx.world(), inv.actor);
    let to = character_name(ctx.world(), target);
    ctx.emit(target, format!("{from} tells you: {text}"));
    ctx.emit(inv.actor, format!("You tell {to}: {text}"));
    CommandOutcome::Handled
}

fn talk(ctx: &mut CommandContext<'_>, inv: &Invocation<'_>) -> CommandOutcome {
    let text = match inv.arg(0).and_then(Argument::as_character) {
        Some(target) => format!("{} has nothing to say.", character_name(ctx.world(), target)),
        None => "Talk to whom?".to_string(),
    };
    ctx.emit(inv.actor, text);
    CommandOutcome::Handled
}

// =============================================================================
// Items
// =============================================================================

fn get(ctx: &mut CommandContext<'_>, inv: &Invocation<'_>) -> CommandOutcome {
    let Some(item) = inv.arg(0).and_then(Argument::as_item) else {
        ctx.emit(inv.actor, "You don't see that here.");
        return CommandOutcome::Handled;
    };
    let name = item_name(ctx.world(), item);
    let text = match ctx.world_mut().move_item(item, ItemLocation::Inventory(inv.actor)) {
        Ok(()) => format!("You pick up {name}."),
        Err(_) => format!("You can't pick up {name}."),
    };
    ctx.emit(inv.actor, text);
    CommandOutcome::Handled
}

fn drop_item(ctx: &mut CommandContext<'_>, inv: &Invocation<'_>) -> CommandOutcome {
    let item = inv.arg(0).and_then(Argument::as_item);
    let room = actor_room(ctx.world(), inv.actor);
    let (Some(item), Some(room)) = (item, room) else {
        ctx.emit(inv.actor, "You aren't carrying that.");
        return CommandOutcome::Handled;
    };
    let name = item_name(ctx.world(), item);
    let text = match ctx.world_mut().move_item(item, ItemLocation::Room(room)) {
        Ok(()) => format!("You drop {name}."),
        Err(_) => format!("You can't drop {name}."),
    };
    ctx.emit(inv.actor, text);
    CommandOutcome::Handled
}

fn give(ctx: &mut CommandContext<'_>, inv: &Invocation<'_>) -> CommandOutcome {
    let item = inv.arg(0).and_then(Argument::as_item);
    let target = inv.arg(1).and_then(Argument::as_character);
    let (Some(item), Some(target)) = (item, target) else {
        ctx.emit(inv.actor, "Give what to whom?");
        return CommandOutcome::Handled;
    };
    let name = item_name(ctx.world(), item);
    let giver = character_name(ctx.world(), inv.actor);
    let receiver = character_name(ctx.world(), target);
    match ctx.world_mut().move_item(item, ItemLocation::Inventory(target)) {
        Ok(()) => {
            ctx.emit(inv.actor, format!("You give {name} to {receiver}."));
            ctx.emit(target, format!("{giver} gives you {name}."));
        }
        Err(_) => ctx.emit(inv.actor, format!("You can't give {name} to {receiver}.")),
    }
    CommandOutcome::Handled
}

fn inventory(ctx: &mut CommandContext<'_>, inv: &Invocation<'_>) -> CommandOutcome {
    let world = ctx.world();
    let Some(character) = world.character(inv.actor) else {
        return CommandOutcome::NotHandled;
    };
    let mut out = String::from("You are carrying:");
    if character.item_count() == 0 {
        out.push_str("\n  nothing");
    }
    for id in character.items() {
        let _ = write!(out, "\n  {}", item_name(world, *id));
    }
    if !character.equipment().is_empty() {
        out.push_str("\nYou are wearing:");
        for (slot, id) in character.equipment() {
            let _ = write!(out, "\n  {} ({slot})", item_name(world, *id));
        }
    }
    ctx.emit(inv.actor, out);
    CommandOutcome::Handled
}

fn equip(ctx: &mut CommandContext<'_>, inv: &Invocation<'_>) -> CommandOutcome {
    let item = inv.arg(0).and_then(Argument::as_item);
    let slot = inv.arg(1).and_then(Argument::as_str).map(str::to_lowercase);
    let (Some(item), Some(slot)) = (item, slot) else {
        ctx.emit(inv.actor, "Equip what, where?");
        return CommandOutcome::Handled;
    };
    let name = item_name(ctx.world(), item);
    let location = ItemLocation::Equipped(inv.actor, slot.clone());
    let text = match ctx.world_mut().move_item(item, location) {
        Ok(()) => format!("You wear {name} on your {slot}."),
        Err(_) => format!("You can't wear {name} on your {slot}."),
    };
    ctx.emit(inv.actor, text);
    CommandOutcome::Handled
}

// =============================================================================
// Movement and doors
// =============================================================================

fn go(ctx: &mut CommandContext<'_>, inv: &Invocation<'_>) -> CommandOutcome {
    let moved = inv
        .arg(0)
        .and_then(Argument::as_exit)
        .is_some_and(|dir| move_actor(ctx, inv.actor, dir));
    if moved {
        ctx.send_command(inv.actor, "look");
    } else {
        ctx.emit(inv.actor, "You can't go that way.");
    }
    CommandOutcome::Handled
}

fn walk(ctx: &mut CommandContext<'_>, inv: &Invocation<'_>) -> CommandOutcome {
    match inv.data.and_then(|d| d.as_str()) {
        Some(direction) => {
            ctx.send_command(inv.actor, format!("go {direction}"));
            CommandOutcome::Handled
        }
        None => CommandOutcome::NotHandled,
    }
}

fn set_door(ctx: &mut CommandContext<'_>, inv: &Invocation<'_>, closed: bool) -> CommandOutcome {
    let verb = if closed { "close" } else { "open" };
    let target = inv.arg(0).and_then(Argument::as_exit).zip(actor_room(ctx.world(), inv.actor));
    let Some((direction, room)) = target else {
        ctx.emit(inv.actor, format!("There is nothing to {verb} there."));
        return CommandOutcome::Handled;
    };
    let locked = ctx
        .world()
        .room(room)
        .and_then(|r| r.exit(direction))
        .and_then(|e| e.door)
        .is_some_and(|d| d.locked);
    if locked && !closed {
        ctx.emit(inv.actor, "It is locked.");
        return CommandOutcome::Handled;
    }
    if let Ok(true) = ctx.world_mut().set_door_closed(room, direction, closed) {
        let name = character_name(ctx.world(), inv.actor);
        ctx.emit(inv.actor, format!("You {verb} the door {direction}."));
        ctx.emit_room(room, Some(inv.actor), format!("{name} {verb}s the door {direction}."));
    }
    CommandOutcome::Handled
}

fn open(ctx: &mut CommandContext<'_>, inv: &Invocation<'_>) -> CommandOutcome {
    set_door(ctx, inv, false)
}

fn close(ctx: &mut CommandContext<'_>, inv: &Invocation<'_>) -> CommandOutcome {
    set_door(ctx, inv, true)
}

// =============================================================================
// Misc
// =============================================================================

fn rest(ctx: &mut CommandContext<'_>, inv: &Invocation<'_>) -> CommandOutcome {
    if ctx.put_off_balance(inv.actor, REST_DURATION).is_err() {
        return CommandOutcome::NotHandled;
    }
    ctx.emit(inv.actor, "You sit down and rest.");
    CommandOutcome::Handled
}

fn who(ctx: &mut CommandContext<'_>, inv: &Invocation<'_>) -> CommandOutcome {
    let mut names: Vec<&str> = ctx
        .world()
        .characters()
        .filter(|c| c.is_player())
        .map(|c| c.name())
        .collect();
    names.sort_unstable();
    let text = format!("Players online: {}", names.join(", "));
    ctx.emit(inv.actor, text);
    CommandOutcome::Handled
}

fn goto(ctx: &mut CommandContext<'_>, inv: &Invocation<'_>) -> CommandOutcome {
    let world = ctx.world();
    let zone_key = world
        .character_zone(inv.actor)
        .and_then(|z| world.zone(z))
        .map(|z| z.key().to_string())
        .unwrap_or_default();
    let target = inv
        .arg(0)
        .and_then(Argument::as_str)
        .and_then(|key| world.lookup_room(key, &zone_key));
    match target {
        Some(room) if ctx.world_mut().move_character(inv.actor, room).is_ok() => {
            ctx.send_command(inv.actor, "look");
        }
        _ => ctx.emit(inv.actor, "No such room."),
    }
    CommandOutcome::Handled
}

fn commands(ctx: &mut CommandContext<'_>, inv: &Invocation<'_>) -> CommandOutcome {
    let admin = ctx.world().character(inv.actor).is_some_and(|c| c.is_admin());
    let mut names: Vec<String> = ctx
        .registries()
        .global()
        .definitions()
        .into_iter()
        .filter(|d| admin || !d.is_admin_only())
        .map(|d| d.name().to_string())
        .collect();
    if let Some(local) = actor_room(ctx.world(), inv.actor).and_then(|r| ctx.registries().room(r)) {
        names.extend(local.definitions().into_iter().map(|d| d.name().to_string()));
    }
    names.sort_unstable();
    names.dedup();
    let text = format!("Commands: {}", names.join(", "));
    ctx.emit(inv.actor, text);
    CommandOutcome::Handled
}
