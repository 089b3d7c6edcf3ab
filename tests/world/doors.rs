//! Door and exit capability tests.

use mudcore_foundation::ZonedKey;
use mudcore_world::{CharacterTemplate, Direction, Door, Exit, World};

fn character(world: &mut World, player: bool) -> mudcore_foundation::CharacterId {
    let zone = world.lookup_zone("z").unwrap_or_else(|| world.add_zone("z", "Z").unwrap());
    let room = world
        .lookup_room("r", "z")
        .unwrap_or_else(|| world.add_room(zone, "r", "R", "").unwrap());
    let template = if player {
        CharacterTemplate::player("p", "P")
    } else {
        CharacterTemplate::npc("n", "N")
    };
    world.spawn_character(room, template).unwrap()
}

fn exit(door: Door) -> Exit {
    Exit::new(Direction::North, ZonedKey::parse("x@z").unwrap()).with_door(door)
}

#[test]
fn secret_doors_hide_only_while_closed() {
    let mut world = World::new();
    let p = character(&mut world, true);
    let who = world.character(p).unwrap();
    assert!(!exit(Door::closed().secret()).is_visible_to(who));
    assert!(exit(Door::open().secret()).is_visible_to(who));
}

#[test]
fn nomob_doors_stop_npcs() {
    let mut world = World::new();
    let p = character(&mut world, true);
    let n = character(&mut world, false);
    let gate = exit(Door::open().no_mob());
    assert!(gate.is_passable_by(world.character(p).unwrap()));
    assert!(!gate.is_passable_by(world.character(n).unwrap()));
}

#[test]
fn open_and_close_predicates() {
    let mut world = World::new();
    let p = character(&mut world, true);
    let who = world.character(p).unwrap();

    let shut = exit(Door::closed());
    assert!(shut.is_openable());
    assert!(!shut.is_closeable());
    assert!(!shut.is_peekable_by(who));
    assert!(!shut.is_passable_by(who));

    let open = exit(Door::open());
    assert!(open.is_closeable());
    assert!(open.is_peekable_by(who));

    let doorless = Exit::new(Direction::South, ZonedKey::parse("y@z").unwrap());
    assert!(!doorless.is_openable());
    assert!(!doorless.is_closeable());
    assert!(doorless.is_passable_by(who));
}

#[test]
fn locked_doors_are_closed() {
    let door = Door::open().locked();
    assert!(door.closed);
    assert!(door.locked);
}

#[test]
fn directions_parse_names_and_aliases() {
    assert_eq!(Direction::parse("NE"), Some(Direction::Northeast));
    assert_eq!(Direction::parse("down"), Some(Direction::Down));
    assert_eq!(Direction::parse("nor"), None);
    assert_eq!(Direction::West.opposite(), Direction::East);
}
