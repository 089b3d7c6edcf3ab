//! Dispatch chain ordering and command gates.

use std::time::Duration;

use mudcore_dispatch::{
    CommandDefinition, CommandOutcome, DispatchConfig, DispatchOutcome, Dispatcher, Origin,
    Responder,
};
use mudcore_foundation::ErrorKind;

use crate::fixtures::Fixture;

fn announce(label: &'static str) -> CommandDefinition {
    CommandDefinition::new("ring", move |ctx, inv| {
        let origin = match inv.origin {
            Origin::Global => "global".to_string(),
            Origin::Room(_) => "room".to_string(),
            Origin::Character(_) => "character".to_string(),
        };
        ctx.emit(inv.actor, format!("{label} via {origin}"));
        CommandOutcome::Handled
    })
}

#[test]
fn room_then_occupants_then_global() {
    let mut f = Fixture::new();
    f.dispatcher.global_mut().register(announce("bell"));
    f.dispatcher.character_registry_mut(f.guard).register(announce("whistle"));
    f.dispatcher.room_registry_mut(f.square).register(announce("gong"));

    assert_eq!(f.send(f.alice, "ring"), DispatchOutcome::Handled(Responder::Room(f.square)));
    assert_eq!(f.mailbox.take_for(f.alice), ["gong via room"]);

    f.dispatcher.registries_mut().remove_room(f.square);
    assert_eq!(
        f.send(f.alice, "ring"),
        DispatchOutcome::Handled(Responder::Character(f.guard))
    );
    assert_eq!(f.mailbox.take_for(f.alice), ["whistle via character"]);

    // A character's own registry is not consulted for its own input.
    assert_eq!(f.send(f.guard, "ring"), DispatchOutcome::Handled(Responder::Global));
    assert_eq!(f.mailbox.take_for(f.guard), ["bell via global"]);
}

#[test]
fn not_handled_falls_through() {
    let mut f = Fixture::new();
    f.dispatcher.global_mut().register(announce("bell"));
    f.dispatcher
        .room_registry_mut(f.square)
        .register(CommandDefinition::new("ring", |_, _| CommandOutcome::NotHandled));

    assert_eq!(f.send(f.alice, "RING"), DispatchOutcome::Handled(Responder::Global));
}

#[test]
fn admin_commands_are_invisible_to_players() {
    let mut f = Fixture::new();
    f.dispatcher.global_mut().register(announce("bell"));
    f.dispatcher
        .room_registry_mut(f.square)
        .register(announce("secret").admin_only());

    f.send(f.alice, "ring");
    assert_eq!(f.mailbox.take_for(f.alice), ["bell via global"]);

    f.world.character_mut(f.alice).unwrap().set_admin(true);
    f.send(f.alice, "ring");
    assert_eq!(f.mailbox.take_for(f.alice), ["secret via room"]);
}

#[test]
fn off_balance_blocks_without_running_handler() {
    let mut f = Fixture::new();
    f.dispatcher.global_mut().register(announce("bell").requires_balance());
    f.dispatcher
        .room_registry_mut(f.square)
        .register(announce("gong").requires_balance());
    f.world.put_off_balance(f.alice, Duration::from_millis(1500)).unwrap();

    // Blocked stops the chain at the first gated level.
    assert_eq!(f.send(f.alice, "ring"), DispatchOutcome::Handled(Responder::Room(f.square)));
    assert_eq!(
        f.mailbox.take_for(f.alice),
        ["You are still recovering. (1.5 seconds remaining)"]
    );

    f.world.advance(Duration::from_secs(2));
    f.send(f.alice, "ring");
    assert_eq!(f.mailbox.take_for(f.alice), ["gong via room"]);
}

#[test]
fn unknown_command_uses_configured_notice() {
    let mut f = Fixture::new();
    f.dispatcher = Dispatcher::new(DispatchConfig::default().with_unknown_command("What?"));
    assert_eq!(f.send(f.alice, "dance"), DispatchOutcome::Unknown);
    assert_eq!(f.mailbox.take_for(f.alice), ["What?"]);
    assert_eq!(f.send(f.alice, "   "), DispatchOutcome::Empty);
    assert!(f.mailbox.is_empty());
}

#[test]
fn aliases_share_one_definition() {
    let mut f = Fixture::new();
    f.dispatcher
        .global_mut()
        .register(announce("bell").with_aliases(["ding", "dong"]));
    f.send(f.alice, "DONG");
    assert_eq!(f.mailbox.take_for(f.alice), ["bell via global"]);
    assert_eq!(f.dispatcher.registries().global().definitions().len(), 1);
}

#[test]
fn duplicate_registration() {
    let mut f = Fixture::new();
    let registry = f.dispatcher.global_mut();
    registry.register(announce("first"));
    registry.register(announce("second"));
    let err = registry.try_register(announce("third")).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::DuplicateRegistration(_)));

    f.send(f.alice, "ring");
    assert_eq!(f.mailbox.take_for(f.alice), ["first via global"]);
}

#[test]
fn grammar_arguments_reach_the_handler() {
    let mut f = Fixture::new();
    f.dispatcher.global_mut().register(
        CommandDefinition::new("poke", |ctx, inv| {
            let text = match inv.arg(0).and_then(mudcore_parser::Argument::as_character) {
                Some(target) => {
                    let name = ctx.world().character(target).map_or("?", |c| c.name());
                    format!("poked {name}")
                }
                None => format!("poke what? ({})", inv.command.rest()),
            };
            ctx.emit(inv.actor, text);
            CommandOutcome::Handled
        })
        .with_grammar("char.room.noself")
        .unwrap(),
    );
    f.send(f.alice, "poke gua");
    f.send(f.alice, "poke alice");
    assert_eq!(f.mailbox.take_for(f.alice), ["poked Guard", "poke what? (alice)"]);
}

#[test]
fn follow_ups_run_in_order_after_the_handler() {
    let mut f = Fixture::new();
    f.dispatcher.global_mut().register(CommandDefinition::new("combo", |ctx, inv| {
        ctx.send_command(inv.actor, "say one");
        ctx.send_command(inv.actor, "say two");
        ctx.emit(inv.actor, "combo");
        CommandOutcome::Handled
    }));
    f.dispatcher.global_mut().register(
        CommandDefinition::new("say", |ctx, inv| {
            ctx.emit(inv.actor, inv.command.rest());
            CommandOutcome::Handled
        }),
    );
    f.send(f.alice, "combo");
    assert_eq!(f.mailbox.take_for(f.alice), ["combo", "one", "two"]);
}

#[test]
fn definition_data_is_passed_through() {
    let mut f = Fixture::new();
    f.dispatcher.global_mut().register(
        CommandDefinition::new("price", |ctx, inv| {
            let price = inv.data.and_then(mudcore_foundation::Value::as_int).unwrap_or_default();
            ctx.emit(inv.actor, format!("{price} coins"));
            CommandOutcome::Handled
        })
        .with_data(12_i64),
    );
    f.send(f.bob, "price");
    assert_eq!(f.mailbox.take_for(f.bob), ["12 coins"]);
}
