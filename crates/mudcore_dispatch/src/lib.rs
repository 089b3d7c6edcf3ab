//! Command dispatch for mudcore.
//!
//! This crate decides who gets to act on a line of input and runs them:
//!
//! - [`CommandRegistry`] maps command words and aliases to definitions and
//!   applies the admin and balance gates before a handler runs
//! - [`Conversation`]s capture a participant's input for multi-step exchanges
//!   and may nest, schedule delayed commands, and hand completion data back
//!   to their parent
//! - [`Dispatcher`] offers each line to the conversation, room, other
//!   characters, and global levels in turn, and drives the world tick
//!
//! # Example
//!
//! ```
//! use mudcore_dispatch::{CommandDefinition, CommandOutcome, Dispatcher, Mailbox};
//! use mudcore_world::{CharacterTemplate, World};
//!
//! let mut world = World::new();
//! let zone = world.add_zone("town", "Town").unwrap();
//! let square = world.add_room(zone, "square", "Town Square", "").unwrap();
//! let alice = world.spawn_character(square, CharacterTemplate::player("alice", "Alice")).unwrap();
//!
//! let mut dispatcher = Dispatcher::default();
//! dispatcher.global_mut().register(CommandDefinition::new("wave", |ctx, inv| {
//!     ctx.emit(inv.actor, "You wave.");
//!     CommandOutcome::Handled
//! }));
//!
//! let mut mailbox = Mailbox::new();
//! assert!(dispatcher.dispatch(&mut world, &mut mailbox, alice, "WAVE").is_handled());
//! assert_eq!(mailbox.take_for(alice), ["You wave."]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod context;
pub mod conversation;
pub mod definition;
pub mod dispatcher;
pub mod registry;
pub mod scheduler;
pub mod sink;

pub use config::DispatchConfig;
pub use context::{CommandContext, FollowUp};
pub use conversation::{Conversation, ConversationTable, EndCallback};
pub use definition::{CommandDefinition, CommandOutcome, Handler, Invocation, Origin};
pub use dispatcher::{DispatchOutcome, Dispatcher, Responder, TickHook};
pub use registry::{CommandRegistry, Registries};
pub use scheduler::{ScheduledCommand, Scheduler};
pub use sink::{Mailbox, MessageSink};
