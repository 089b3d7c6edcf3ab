//! Command-line parsing for mudcore.
//!
//! This crate turns a line typed by a participant into a [`Command`] and, given
//! a command's argument grammar, binds the command's parameters to live world
//! objects.
//!
//! # Architecture
//!
//! ```text
//! "give sword.2 to bob"
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   TOKENIZER     │  → word "give", params ["sword.2", "to", "bob"]
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ GRAMMAR         │  → "item.inv [to] char.room.noself"
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ ENTITY          │  → exact key, keyword, key prefix, name prefix
//! │ MATCHING        │
//! └─────────────────┘
//!          │
//!          ▼
//!   [Item(#12), Character(#4)]
//! ```
//!
//! # Modules
//!
//! - [`tokenizer`] - Split raw input into a command word and parameters
//! - [`matcher`] - Rank candidate entities against a free-text identifier
//! - [`grammar`] - Compile per-command argument grammars
//! - [`resolver`] - Bind parameters to world objects following a grammar

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod grammar;
pub mod matcher;
pub mod resolver;
pub mod tokenizer;

pub use grammar::{Grammar, GrammarElement, GrammarToken};
pub use matcher::{EntityMatcher, MatchTier, Matchable};
pub use resolver::{Argument, ArgumentResolver, ResolveContext};
pub use tokenizer::{Command, CommandTokenizer};
