//! Core identifiers, zoned keys, values, and errors for mudcore.
//!
//! This crate provides:
//! - Typed identifiers ([`CharacterId`], [`ItemId`], [`RoomId`], [`ZoneId`], [`ConversationId`])
//! - [`ZonedKey`] - Canonical `basic@zone` identifiers and the functions that build them
//! - [`Value`] - Small dynamic value used for opaque command data and conversation payloads
//! - [`Error`] - Rich error types with context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod entity;
pub mod error;
pub mod key;
pub mod value;

pub use entity::{CharacterId, ConversationId, ItemId, RoomId, ZoneId};
pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use key::{ZonedKey, build_zoned_key, split_zoned_key};
pub use value::Value;
