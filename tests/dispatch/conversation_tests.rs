//! Stacked conversations and their callbacks.

use std::rc::Rc;

use mudcore_dispatch::{
    CommandContext, CommandDefinition, CommandOutcome, Conversation, DispatchOutcome, EndCallback,
    Responder,
};
use mudcore_foundation::{CharacterId, ConversationId, ErrorKind, Value};
use mudcore_parser::Command;

use crate::fixtures::{Fixture, Log, Recorder, entries, log};

/// Gives up on its child on the first tick.
struct Impatient {
    log: Log,
}

impl Conversation for Impatient {
    fn on_input(
        &mut self,
        _ctx: &mut CommandContext<'_>,
        _me: ConversationId,
        _actor: CharacterId,
        _command: &Command,
    ) -> CommandOutcome {
        CommandOutcome::NotHandled
    }

    fn return_to_conversation(
        &mut self,
        _ctx: &mut CommandContext<'_>,
        _me: ConversationId,
        data: Value,
    ) {
        self.log.borrow_mut().push(format!("impatient returned {data}"));
    }

    fn on_tick(&mut self, ctx: &mut CommandContext<'_>, me: ConversationId) {
        if let Some(child) = ctx.conversations().child(me) {
            ctx.end_conversation(child, Value::from("timed out")).unwrap();
            self.log.borrow_mut().push("impatient ended child".to_string());
        }
    }
}

fn record_end(log: &crate::fixtures::Log, label: &'static str) -> Option<EndCallback> {
    let log = Rc::clone(log);
    Some(Box::new(move |_: &mut CommandContext<'_>, data: Value| {
        log.borrow_mut().push(format!("{label} ended with {data}"));
    }))
}

#[test]
fn conversation_captures_participant_input() {
    let mut f = Fixture::new();
    let log = log();
    let (alice, guard) = (f.alice, f.guard);
    let id = f
        .with_context(|ctx| {
            ctx.start_conversation(vec![alice, guard], Recorder::boxed("chat", &log), None)
        })
        .unwrap();

    assert_eq!(f.send(alice, "hello"), DispatchOutcome::Handled(Responder::Conversation(id)));
    assert_eq!(f.send(guard, "halt"), DispatchOutcome::Handled(Responder::Conversation(id)));
    // Bob is not a participant.
    assert_eq!(f.send(f.bob, "hello"), DispatchOutcome::Unknown);
    assert_eq!(entries(&log), ["chat got hello", "chat got halt"]);
    assert_eq!(f.world.character(alice).unwrap().conversation(), Some(id));
}

#[test]
fn unhandled_input_continues_down_the_chain() {
    let mut f = Fixture::new();
    let log = log();
    f.dispatcher.global_mut().register(CommandDefinition::new("pass", |ctx, inv| {
        ctx.emit(inv.actor, "passed");
        CommandOutcome::Handled
    }));
    let alice = f.alice;
    f.with_context(|ctx| ctx.start_conversation(vec![alice], Recorder::boxed("chat", &log), None))
        .unwrap();

    assert_eq!(f.send(alice, "pass"), DispatchOutcome::Handled(Responder::Global));
    assert_eq!(f.mailbox.take_for(alice), ["passed"]);
    assert!(entries(&log).is_empty());
}

#[test]
fn busy_participant_is_refused() {
    let mut f = Fixture::new();
    let log = log();
    let (alice, bob) = (f.alice, f.bob);
    let first = f
        .with_context(|ctx| ctx.start_conversation(vec![alice], Recorder::boxed("one", &log), None))
        .unwrap();
    let err = f
        .with_context(|ctx| {
            ctx.start_conversation(vec![bob, alice], Recorder::boxed("two", &log), None)
        })
        .unwrap_err();
    match err.kind {
        ErrorKind::ConversationBusy { participant, active } => {
            assert_eq!(participant, alice);
            assert_eq!(active, first);
        }
        other => panic!("unexpected error: {other}"),
    }
    // Nothing was claimed by the refused conversation.
    assert_eq!(f.world.character(bob).unwrap().conversation(), None);
    assert_eq!(f.dispatcher.conversations().len(), 1);
}

#[test]
fn empty_participant_list_is_rejected() {
    let mut f = Fixture::new();
    let log = log();
    let result =
        f.with_context(|ctx| ctx.start_conversation(vec![], Recorder::boxed("empty", &log), None));
    assert!(result.is_err());
}

#[test]
fn child_takes_over_shared_participants() {
    let mut f = Fixture::new();
    let log = log();
    let (alice, guard) = (f.alice, f.guard);
    let (parent, child) = f.with_context(|ctx| {
        let parent = ctx
            .start_conversation(vec![alice, guard], Recorder::boxed("parent", &log), None)
            .unwrap();
        let child = ctx
            .start_child(parent, vec![alice], Recorder::boxed("child", &log))
            .unwrap();
        (parent, child)
    });

    assert_eq!(f.send(alice, "one"), DispatchOutcome::Handled(Responder::Conversation(child)));
    assert_eq!(f.send(guard, "two"), DispatchOutcome::Handled(Responder::Conversation(parent)));
    assert_eq!(entries(&log), ["child got one", "parent got two"]);

    // The character still points at the outermost conversation.
    assert_eq!(f.world.character(alice).unwrap().conversation(), Some(parent));
    assert_eq!(f.dispatcher.conversations().child(parent), Some(child));
    assert_eq!(f.dispatcher.conversations().parent(child), Some(parent));
}

#[test]
fn unhandled_child_input_skips_the_parent() {
    let mut f = Fixture::new();
    let log = log();
    let alice = f.alice;
    f.with_context(|ctx| {
        let parent = ctx
            .start_conversation(vec![alice], Recorder::boxed("parent", &log), None)
            .unwrap();
        ctx.start_child(parent, vec![alice], Recorder::boxed("child", &log))
            .unwrap();
    });

    assert_eq!(f.send(alice, "pass"), DispatchOutcome::Unknown);
    assert!(entries(&log).is_empty());
}

#[test]
fn ending_child_returns_data_to_parent() {
    let mut f = Fixture::new();
    let log = log();
    let alice = f.alice;
    let (parent, child) = f.with_context(|ctx| {
        let parent = ctx
            .start_conversation(
                vec![alice],
                Recorder::boxed("parent", &log),
                record_end(&log, "parent"),
            )
            .unwrap();
        let child = ctx
            .start_child(parent, vec![alice], Recorder::boxed("child", &log))
            .unwrap();
        (parent, child)
    });

    f.with_context(|ctx| ctx.end_conversation(child, Value::Int(7)))
        .unwrap();
    assert_eq!(entries(&log), ["parent returned 7"]);
    assert_eq!(f.dispatcher.conversations().child(parent), None);
    assert_eq!(f.send(alice, "next"), DispatchOutcome::Handled(Responder::Conversation(parent)));

    f.with_context(|ctx| ctx.end_conversation(parent, Value::Bool(true)))
        .unwrap();
    assert_eq!(
        entries(&log),
        ["parent returned 7", "parent got next", "parent ended with true"]
    );
    assert_eq!(f.world.character(alice).unwrap().conversation(), None);
    assert!(f.dispatcher.conversations().is_empty());
}

#[test]
fn ending_parent_discards_child_silently() {
    let mut f = Fixture::new();
    let log = log();
    let alice = f.alice;
    let (parent, child) = f.with_context(|ctx| {
        let parent = ctx
            .start_conversation(
                vec![alice],
                Recorder::boxed("parent", &log),
                record_end(&log, "parent"),
            )
            .unwrap();
        let child = ctx
            .start_child(parent, vec![alice], Recorder::boxed("child", &log))
            .unwrap();
        (parent, child)
    });

    f.with_context(|ctx| ctx.end_conversation(parent, Value::Nil))
        .unwrap();
    assert_eq!(entries(&log), ["parent ended with nil"]);
    assert!(!f.dispatcher.conversations().contains(child));
    assert!(f.dispatcher.conversations().is_empty());

    let again = f.with_context(|ctx| ctx.end_conversation(parent, Value::Nil));
    assert!(matches!(again.unwrap_err().kind, ErrorKind::ConversationNotFound(_)));
}

#[test]
fn second_child_is_refused() {
    let mut f = Fixture::new();
    let log = log();
    let alice = f.alice;
    let result = f.with_context(|ctx| {
        let parent = ctx
            .start_conversation(vec![alice], Recorder::boxed("parent", &log), None)
            .unwrap();
        ctx.start_child(parent, vec![alice], Recorder::boxed("first", &log))
            .unwrap();
        ctx.start_child(parent, vec![alice], Recorder::boxed("second", &log))
    });
    assert!(matches!(result.unwrap_err().kind, ErrorKind::ConversationBusy { .. }));
}

#[test]
fn conversations_tick_with_the_world() {
    let mut f = Fixture::new();
    let log = log();
    let alice = f.alice;
    f.with_context(|ctx| ctx.start_conversation(vec![alice], Recorder::boxed("chat", &log), None))
        .unwrap();
    f.tick(1);
    f.tick(1);
    assert_eq!(entries(&log), ["chat tick", "chat tick"]);
}

#[test]
fn handler_can_start_conversation() {
    let mut f = Fixture::new();
    let log = log();
    let recorder_log = Rc::clone(&log);
    f.dispatcher.global_mut().register(CommandDefinition::new("chat", move |ctx, inv| {
        let started =
            ctx.start_conversation(vec![inv.actor], Recorder::boxed("chat", &recorder_log), None);
        match started {
            Ok(_) => ctx.emit(inv.actor, "You start chatting."),
            Err(_) => ctx.emit(inv.actor, "You are already chatting."),
        }
        CommandOutcome::Handled
    }));

    f.send(f.alice, "chat");
    assert_eq!(f.mailbox.take_for(f.alice), ["You start chatting."]);
    // The conversation now captures the same word.
    f.send(f.alice, "chat");
    assert!(f.mailbox.take_for(f.alice).is_empty());
    assert_eq!(entries(&log), ["chat got chat"]);
}

#[test]
fn parent_ending_its_own_child_still_gets_the_data() {
    let mut f = Fixture::new();
    let log = log();
    let alice = f.alice;
    let parent = f.with_context(|ctx| {
        let impatient = Box::new(Impatient {
            log: Rc::clone(&log),
        });
        let parent = ctx.start_conversation(vec![alice], impatient, None).unwrap();
        ctx.start_child(parent, vec![alice], Recorder::boxed("child", &log))
            .unwrap();
        parent
    });

    f.tick(1);
    assert_eq!(
        entries(&log)
            .into_iter()
            .filter(|e| !e.ends_with("tick"))
            .collect::<Vec<_>>(),
        ["impatient ended child", "impatient returned \"timed out\""]
    );
    assert_eq!(f.dispatcher.conversations().len(), 1);
    assert_eq!(f.dispatcher.conversations().child(parent), None);
}

#[test]
fn grandchild_reaches_participant_its_parent_left_out() {
    let mut f = Fixture::new();
    let log = log();
    let (alice, bob) = (f.alice, f.bob);
    let (child, grandchild) = f.with_context(|ctx| {
        let parent = ctx
            .start_conversation(vec![alice, bob], Recorder::boxed("parent", &log), None)
            .unwrap();
        let child = ctx
            .start_child(parent, vec![bob], Recorder::boxed("child", &log))
            .unwrap();
        let grandchild = ctx
            .start_child(child, vec![alice], Recorder::boxed("grandchild", &log))
            .unwrap();
        (child, grandchild)
    });

    assert_eq!(
        f.send(alice, "hi"),
        DispatchOutcome::Handled(Responder::Conversation(grandchild))
    );
    assert_eq!(
        f.send(bob, "hey"),
        DispatchOutcome::Handled(Responder::Conversation(child))
    );
    assert_eq!(entries(&log), ["grandchild got hi", "child got hey"]);
}
