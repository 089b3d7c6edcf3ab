//! Standard commands, sessions, and the interactive shell for mudcore.
//!
//! This crate provides:
//! - [`register_standard_commands`] - the command set every world starts with
//! - [`Session`] - a world, its dispatcher, and one local player
//! - [`Repl`] - an interactive loop over a session
//! - [`logging`] - the `tracing` subscriber the shell installs
//! - [`demo`] - a small village that exercises doors, room and character
//!   commands, and nested conversations

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod demo;
pub mod editor;
pub mod logging;
pub mod repl;
pub mod session;
pub mod stdlib;

pub use config::RuntimeConfig;
pub use editor::{LineEditor, ReadResult, RustylineEditor};
pub use repl::Repl;
pub use session::Session;
pub use stdlib::{REST_DURATION, describe_room, move_actor, register_standard_commands};
