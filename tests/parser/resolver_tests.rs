//! Argument resolution tests against a small world.

use mudcore_foundation::{CharacterId, ItemId, ZonedKey};
use mudcore_parser::{Argument, ArgumentResolver, CommandTokenizer, Grammar, ResolveContext};
use mudcore_world::{CharacterTemplate, Direction, Door, Exit, ItemLocation, ItemTemplate, World};

struct Fixture {
    world: World,
    alice: CharacterId,
    bob: CharacterId,
    rat: CharacterId,
    far_player: CharacterId,
    sword: ItemId,
    helm: ItemId,
}

fn fixture() -> Fixture {
    let mut world = World::new();
    let zone = world.add_zone("town", "Town").unwrap();
    world.add_zone("wilds", "Wilds").unwrap();
    let square = world.add_room(zone, "square", "Square", "").unwrap();
    let alley = world.add_room(zone, "alley", "Alley", "").unwrap();
    world
        .add_exit(square, Exit::new(Direction::North, ZonedKey::parse("alley@town").unwrap()))
        .unwrap();
    world
        .add_exit(
            square,
            Exit::new(Direction::Down, ZonedKey::parse("sewer@town").unwrap())
                .with_door(Door::closed().secret()),
        )
        .unwrap();
    world
        .add_exit(
            square,
            Exit::new(Direction::East, ZonedKey::parse("gate@town").unwrap())
                .with_door(Door::open().no_mob()),
        )
        .unwrap();

    let alice = world
        .spawn_character(
            square,
            CharacterTemplate::player("alice", "Alice").with_keywords(["alice"]),
        )
        .unwrap();
    let bob = world
        .spawn_character(square, CharacterTemplate::player("bob", "Bob").with_keywords(["bob"]))
        .unwrap();
    let rat = world
        .spawn_character(
            square,
            CharacterTemplate::npc("rat", "a sewer rat").with_keywords(["rat"]),
        )
        .unwrap();
    let far_player = world
        .spawn_character(alley, CharacterTemplate::player("carol", "Carol"))
        .unwrap();
    let sword = world
        .spawn_item(ItemLocation::Inventory(alice), ItemTemplate::new("sword", "a sword"))
        .unwrap();
    let helm = world
        .spawn_item(
            ItemLocation::Equipped(alice, "head".to_string()),
            ItemTemplate::new("helm", "a helm").with_keywords(["hat"]),
        )
        .unwrap();
    world
        .spawn_item(ItemLocation::Room(square), ItemTemplate::new("sword", "a dropped sword"))
        .unwrap();

    Fixture {
        world,
        alice,
        bob,
        rat,
        far_player,
        sword,
        helm,
    }
}

fn resolve(f: &Fixture, actor: CharacterId, grammar: &str, line: &str) -> Option<Vec<Argument>> {
    let grammar = Grammar::compile(grammar).unwrap();
    let command = CommandTokenizer::tokenize(line);
    ArgumentResolver::resolve(&ResolveContext::new(&f.world, actor), &grammar, command.params())
}

#[test]
fn give_item_to_character() {
    let f = fixture();
    let args = resolve(&f, f.alice, "item.inv [to] char.room.noself", "give sword to bob").unwrap();
    assert_eq!(args, [Argument::Item(f.sword), Argument::Character(f.bob)]);

    let args = resolve(&f, f.alice, "item.inv [to] char.room.noself", "give sword bob").unwrap();
    assert_eq!(args, [Argument::Item(f.sword), Argument::Character(f.bob)]);
}

#[test]
fn noself_excludes_the_actor() {
    let f = fixture();
    assert!(resolve(&f, f.alice, "char.room.noself", "x alice").is_none());
    assert_eq!(
        resolve(&f, f.alice, "char.room", "x alice").unwrap(),
        [Argument::Character(f.alice)]
    );
}

#[test]
fn npc_and_player_filters() {
    let f = fixture();
    assert!(resolve(&f, f.alice, "char.npc", "x bob").is_none());
    assert_eq!(resolve(&f, f.alice, "char.npc", "x rat").unwrap(), [Argument::Character(f.rat)]);
    assert!(resolve(&f, f.alice, "char.player", "x rat").is_none());
}

#[test]
fn zone_scope_reaches_other_rooms() {
    let f = fixture();
    assert!(resolve(&f, f.alice, "char.room", "x carol").is_none());
    assert_eq!(
        resolve(&f, f.alice, "char.zone.player", "x carol").unwrap(),
        [Argument::Character(f.far_player)]
    );
}

#[test]
fn item_scopes() {
    let f = fixture();
    assert_eq!(resolve(&f, f.alice, "item.eq", "x hat").unwrap(), [Argument::Item(f.helm)]);
    assert!(resolve(&f, f.alice, "item.inv", "x hat").is_none());
    // Inventory is searched before the floor.
    assert_eq!(resolve(&f, f.alice, "item", "x sword").unwrap(), [Argument::Item(f.sword)]);
    let floor = resolve(&f, f.alice, "item.room", "x sword").unwrap();
    assert_ne!(floor, [Argument::Item(f.sword)]);
    // The second ranked sword is the one on the floor.
    assert_eq!(resolve(&f, f.alice, "item", "x sword.2").unwrap(), floor);
}

#[test]
fn exit_predicates() {
    let f = fixture();
    assert_eq!(
        resolve(&f, f.alice, "exit.visible", "x N").unwrap(),
        [Argument::Exit(Direction::North)]
    );
    assert!(resolve(&f, f.alice, "exit.visible", "x down").is_none());
    assert_eq!(resolve(&f, f.alice, "exit", "x d").unwrap(), [Argument::Exit(Direction::Down)]);
    assert!(resolve(&f, f.alice, "exit.openable", "x north").is_none());
    assert!(resolve(&f, f.alice, "exit.passable", "x east").is_some());
    assert!(resolve(&f, f.rat, "exit.passable", "x east").is_none());
    assert!(resolve(&f, f.alice, "exit", "x nor").is_none());
}

#[test]
fn zone_word_and_string() {
    let f = fixture();
    let args = resolve(&f, f.alice, "zone word string", "x wilds Quickly go away now").unwrap();
    assert!(args[0].as_zone().is_some());
    assert_eq!(args[1].as_str(), Some("Quickly"));
    assert_eq!(args[2].as_str(), Some("go away now"));
    assert!(resolve(&f, f.alice, "zone", "x mars").is_none());
    assert!(resolve(&f, f.alice, "word string", "x only").is_none());
}

#[test]
fn required_literal_is_case_sensitive() {
    let f = fixture();
    assert!(resolve(&f, f.alice, "item into item", "x sword into helm").is_some());
    assert!(resolve(&f, f.alice, "item into item", "x sword INTO helm").is_none());
}

#[test]
fn best_effort_returns_partial() {
    let f = fixture();
    let g = "char.room |[and] char.room";
    assert_eq!(
        resolve(&f, f.alice, g, "x bob").unwrap(),
        [Argument::Character(f.bob)]
    );
    assert_eq!(
        resolve(&f, f.alice, g, "x bob and rat").unwrap(),
        [Argument::Character(f.bob), Argument::Character(f.rat)]
    );
    assert_eq!(
        resolve(&f, f.alice, g, "x bob and ghost").unwrap(),
        [Argument::Character(f.bob)]
    );
    assert!(resolve(&f, f.alice, g, "x ghost").is_none());
}

#[test]
fn extra_params_are_ignored() {
    let f = fixture();
    assert_eq!(
        resolve(&f, f.alice, "char.room", "x bob please").unwrap(),
        [Argument::Character(f.bob)]
    );
}
