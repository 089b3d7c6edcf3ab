//! Walking the demo village as several characters.

use std::time::Duration;

use mudcore_dispatch::{DispatchOutcome, Responder};
use mudcore_foundation::CharacterId;
use mudcore_runtime::{RuntimeConfig, Session, demo};
use mudcore_world::HoldsItems;

fn village() -> Session {
    demo::build(&RuntimeConfig::scripted()).unwrap()
}

fn npc(session: &Session, name: &str) -> CharacterId {
    session
        .world()
        .characters()
        .find(|c| c.name() == name)
        .map(mudcore_world::Character::id)
        .unwrap()
}

fn room_of(session: &Session, id: CharacterId) -> &str {
    let world = session.world();
    let room = world.character(id).and_then(mudcore_world::Character::room).unwrap();
    world.room(room).unwrap().title()
}

#[test]
fn player_sees_others_come_and_go() {
    let mut session = village();
    let guard = npc(&session, "a bored guard");

    assert_eq!(
        session.submit_as(guard, "north"),
        ["a bored guard arrives from the south."]
    );
    let out = session.submit("look");
    assert!(out[0].contains("Also here: a bored guard"));

    assert_eq!(session.submit_as(guard, "say move along"), ["a bored guard says: move along"]);
    assert_eq!(session.submit_as(guard, "s"), ["a bored guard leaves south."]);
}

#[test]
fn guard_cannot_pass_the_gate() {
    let mut session = village();
    let guard = npc(&session, "a bored guard");

    session.submit_as(guard, "open south");
    session.submit_as(guard, "south");
    assert_eq!(room_of(&session, guard), "South Gate");

    session.submit("south");
    session.submit("south");
    assert_eq!(room_of(&session, session.player()), "Muddy Road");
}

#[test]
fn items_change_hands() {
    let mut session = village();
    assert_eq!(session.submit("get lantern"), ["You pick up a brass lantern."]);
    assert_eq!(session.submit("drop cloak"), ["You drop a travel-stained cloak."]);
    assert_eq!(
        session.submit("inventory"),
        ["You are carrying:\n  a brass lantern"]
    );
    let out = session.submit("look");
    assert!(out[0].contains("You see: a travel-stained cloak"));

    let square = session.world().lookup_room("square", demo::ZONE).unwrap();
    assert_eq!(session.world().room(square).unwrap().item_count(), 1);
}

#[test]
fn innkeeper_serves_one_customer_at_a_time() {
    let mut session = village();
    let keeper = npc(&session, "Maren the innkeeper");
    let guard = npc(&session, "a bored guard");

    session.submit("north");
    session.submit("talk maren");
    assert_eq!(session.dispatcher().conversations().len(), 1);

    session.submit_as(guard, "north");
    session.submit_as(guard, "north");
    session.submit_as(guard, "talk maren");
    assert_eq!(
        session.last_outcome(),
        DispatchOutcome::Handled(Responder::Character(keeper))
    );
    assert_eq!(session.world().character(guard).unwrap().conversation(), None);
    assert_eq!(session.dispatcher().conversations().len(), 1);
}

#[test]
fn conversation_outlives_a_purchase_then_times_out() {
    let mut session = village();
    session.submit("north");
    session.submit("talk maren");
    session.submit("buy");

    // The timer is paused while the confirmation is open.
    assert!(session.tick(demo::IDLE_TIMEOUT * 2).is_empty());
    assert_eq!(session.submit("y"), ["Maren slides a mug of ale across the bar."]);

    assert!(session.tick(demo::IDLE_TIMEOUT - Duration::from_secs(1)).is_empty());
    assert_eq!(
        session.tick(Duration::from_secs(1)),
        ["You nod to Maren the innkeeper.", "Maren turns back to polishing mugs."]
    );
    assert_eq!(session.world().character(session.player()).unwrap().conversation(), None);
}

#[test]
fn the_bell_carries_only_where_it_should() {
    let mut session = village();
    session.submit("north");
    assert!(session.tick(demo::BELL_INTERVAL).is_empty());
    session.submit("south");
    session.submit("east");
    assert_eq!(session.tick(demo::BELL_INTERVAL), ["The temple bell tolls."]);
}

#[test]
fn non_admins_cannot_teleport() {
    let config = RuntimeConfig::scripted().with_admin(false);
    let mut session = demo::build(&config).unwrap();
    assert_eq!(session.submit("goto vault"), ["Huh?"]);
    let out = session.submit("commands");
    assert!(!out[0].contains("goto"));
}

#[test]
fn admins_can_reach_the_vault() {
    let mut session = village();
    let out = session.submit("goto vault");
    assert!(out[0].starts_with("Smugglers' Vault"));
    assert!(out[0].contains("Exits: west (closed)"));
    assert_eq!(session.submit("open west"), ["It is locked."]);
}

#[test]
fn player_name_sets_keywords() {
    let config = RuntimeConfig::scripted().with_player_name("Ash");
    let mut session = demo::build(&config).unwrap();
    let guard = npc(&session, "a bored guard");
    session.submit_as(guard, "north");
    assert_eq!(session.submit_as(guard, "tell ash hello"), ["a bored guard tells you: hello"]);
}
