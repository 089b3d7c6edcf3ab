//! Scheduled commands, tick hooks and follow-up limits.

use std::cell::Cell;
use std::rc::Rc;

use mudcore_dispatch::{
    CommandContext, CommandDefinition, CommandOutcome, Conversation, DispatchConfig, Dispatcher,
};
use mudcore_foundation::{CharacterId, ConversationId};
use mudcore_parser::Command;

use crate::fixtures::{Fixture, Log, Recorder, entries, log};

/// Cancels another conversation's timer when its own timer fires.
struct Canceller {
    other: ConversationId,
    log: Log,
}

impl Conversation for Canceller {
    fn on_input(
        &mut self,
        ctx: &mut CommandContext<'_>,
        _me: ConversationId,
        _actor: CharacterId,
        _command: &Command,
    ) -> CommandOutcome {
        let cancelled = ctx.cancel_scheduled(self.other);
        self.log.borrow_mut().push(format!("cancelled {cancelled}"));
        CommandOutcome::Handled
    }
}

#[test]
fn scheduled_command_reaches_the_conversation() {
    let mut f = Fixture::new();
    let log = log();
    let alice = f.alice;
    f.with_context(|ctx| {
        let id = ctx
            .start_conversation(vec![alice], Recorder::boxed("chat", &log), None)
            .unwrap();
        ctx.schedule_command(id, alice, "timeout", std::time::Duration::from_secs(5))
            .unwrap();
    });

    f.tick(4);
    assert_eq!(entries(&log), ["chat tick"]);
    f.tick(1);
    assert_eq!(entries(&log), ["chat tick", "chat got timeout", "chat tick"]);
    assert!(f.dispatcher.conversations().scheduler().is_empty());
}

#[test]
fn rescheduling_replaces_the_pending_command() {
    let mut f = Fixture::new();
    let log = log();
    let alice = f.alice;
    let id = f.with_context(|ctx| {
        let id = ctx
            .start_conversation(vec![alice], Recorder::boxed("chat", &log), None)
            .unwrap();
        ctx.schedule_command(id, alice, "early", std::time::Duration::from_secs(2))
            .unwrap();
        ctx.schedule_command(id, alice, "late", std::time::Duration::from_secs(6))
            .unwrap();
        id
    });
    assert_eq!(f.dispatcher.conversations().scheduler().len(), 1);
    assert_eq!(
        f.dispatcher.conversations().scheduler().pending(id).map(|c| c.line.as_str()),
        Some("late")
    );

    f.tick(6);
    assert_eq!(entries(&log), ["chat got late", "chat tick"]);
}

#[test]
fn cancel_and_end_clear_the_schedule() {
    let mut f = Fixture::new();
    let log = log();
    let alice = f.alice;
    let id = f.with_context(|ctx| {
        let id = ctx
            .start_conversation(vec![alice], Recorder::boxed("chat", &log), None)
            .unwrap();
        ctx.schedule_command(id, alice, "timeout", std::time::Duration::from_secs(1))
            .unwrap();
        assert!(ctx.cancel_scheduled(id));
        assert!(!ctx.cancel_scheduled(id));
        ctx.schedule_command(id, alice, "timeout", std::time::Duration::from_secs(1))
            .unwrap();
        id
    });

    f.with_context(|ctx| ctx.end_conversation(id, mudcore_foundation::Value::Nil))
        .unwrap();
    assert!(f.dispatcher.conversations().scheduler().is_empty());

    f.tick(2);
    assert!(f.mailbox.take_for(alice).is_empty());
    assert!(entries(&log).is_empty());
}

#[test]
fn scheduling_needs_a_live_conversation() {
    let mut f = Fixture::new();
    let alice = f.alice;
    let result = f.with_context(|ctx| {
        ctx.schedule_command(
            mudcore_foundation::ConversationId::new(42),
            alice,
            "timeout",
            std::time::Duration::from_secs(1),
        )
    });
    assert!(result.is_err());
}

#[test]
fn tick_hooks_run_after_conversations() {
    let mut f = Fixture::new();
    let log = log();
    let hook_log = Rc::clone(&log);
    let alice = f.alice;
    f.dispatcher.add_tick_hook(move |ctx, delta| {
        hook_log
            .borrow_mut()
            .push(format!("hook at {}s after {}s", ctx.world().now().as_secs(), delta.as_secs()));
    });
    f.with_context(|ctx| ctx.start_conversation(vec![alice], Recorder::boxed("chat", &log), None))
        .unwrap();

    f.tick(3);
    assert_eq!(entries(&log), ["chat tick", "hook at 3s after 3s"]);
}

#[test]
fn tick_hook_follow_ups_are_dispatched() {
    let mut f = Fixture::new();
    let alice = f.alice;
    f.dispatcher.global_mut().register(CommandDefinition::new("yawn", |ctx, inv| {
        ctx.emit(inv.actor, "You yawn.");
        CommandOutcome::Handled
    }));
    f.dispatcher.add_tick_hook(move |ctx, _| ctx.send_command(alice, "yawn"));

    f.tick(1);
    assert_eq!(f.mailbox.take_for(alice), ["You yawn."]);
}

#[test]
fn follow_up_depth_is_limited() {
    let mut f = Fixture::new();
    f.dispatcher = Dispatcher::new(DispatchConfig::default().with_max_follow_up_depth(3));
    let runs = Rc::new(Cell::new(0));
    let counter = Rc::clone(&runs);
    f.dispatcher.global_mut().register(CommandDefinition::new("echo", move |ctx, inv| {
        counter.set(counter.get() + 1);
        ctx.send_command(inv.actor, "echo");
        CommandOutcome::Handled
    }));

    f.send(f.alice, "echo");
    // The typed line plus three generations of follow-ups.
    assert_eq!(runs.get(), 4);

    f.dispatcher = Dispatcher::new(DispatchConfig::strict());
    let counter = Rc::clone(&runs);
    f.dispatcher.global_mut().register(CommandDefinition::new("echo", move |ctx, inv| {
        counter.set(counter.get() + 1);
        ctx.send_command(inv.actor, "echo");
        CommandOutcome::Handled
    }));
    f.send(f.alice, "echo");
    assert_eq!(runs.get(), 5);
}

#[test]
fn fired_command_can_cancel_another_due_at_the_same_time() {
    let mut f = Fixture::new();
    let log = log();
    let (alice, bob) = (f.alice, f.bob);
    f.with_context(|ctx| {
        let other = ctx
            .start_conversation(vec![bob], Recorder::boxed("other", &log), None)
            .unwrap();
        let canceller = Box::new(Canceller {
            other,
            log: Rc::clone(&log),
        });
        let first = ctx.start_conversation(vec![alice], canceller, None).unwrap();
        ctx.schedule_command(first, alice, "nudge", std::time::Duration::from_secs(5))
            .unwrap();
        ctx.schedule_command(other, bob, "nudge", std::time::Duration::from_secs(5))
            .unwrap();
    });

    f.tick(5);
    assert_eq!(entries(&log), ["cancelled true", "other tick"]);
    assert!(f.dispatcher.conversations().scheduler().is_empty());
}

#[test]
fn command_scheduled_while_firing_waits_for_the_next_tick() {
    let mut f = Fixture::new();
    let log = log();
    let alice = f.alice;
    f.dispatcher.global_mut().register(CommandDefinition::new("pass", |ctx, inv| {
        ctx.emit(inv.actor, "passed");
        if let Some(id) = ctx.active_conversation(inv.actor) {
            ctx.schedule_command(id, inv.actor, "pass", std::time::Duration::ZERO)
                .unwrap();
        }
        CommandOutcome::Handled
    }));
    f.with_context(|ctx| {
        let id = ctx
            .start_conversation(vec![alice], Recorder::boxed("chat", &log), None)
            .unwrap();
        ctx.schedule_command(id, alice, "pass", std::time::Duration::from_secs(1))
            .unwrap();
    });

    f.tick(1);
    assert_eq!(f.mailbox.take_for(alice), ["passed"]);
    assert_eq!(f.dispatcher.conversations().scheduler().len(), 1);
    f.tick(1);
    assert_eq!(f.mailbox.take_for(alice), ["passed"]);
}
