//! Error types for mudcore.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//!
//! Only genuinely invalid static configuration surfaces as an [`Error`]:
//! malformed keys, malformed grammars, duplicate registrations when the
//! caller asks for them to be reported. Resolution failures, unknown
//! commands, and gating failures are ordinary outcomes, not errors.

use std::fmt;

use thiserror::Error;

use crate::entity::{CharacterId, ConversationId, ItemId, RoomId};

/// Convenience alias for results in mudcore.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for mudcore operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates an invalid key error.
    #[must_use]
    pub fn invalid_key(key: impl Into<String>, reason: &'static str) -> Self {
        Self::new(ErrorKind::InvalidKey {
            key: key.into(),
            reason,
        })
    }

    /// Creates an invalid grammar error.
    #[must_use]
    pub fn invalid_grammar(grammar: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidGrammar {
            grammar: grammar.into(),
            message: message.into(),
        })
    }

    /// Creates a duplicate registration error.
    #[must_use]
    pub fn duplicate_registration(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::DuplicateRegistration(name.into()))
    }

    /// Creates an unknown zone error.
    #[must_use]
    pub fn unknown_zone(key: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownZone(key.into()))
    }

    /// Creates an unknown room error.
    #[must_use]
    pub fn unknown_room(key: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownRoom(key.into()))
    }

    /// Creates a character not found error.
    #[must_use]
    pub fn character_not_found(id: CharacterId) -> Self {
        Self::new(ErrorKind::CharacterNotFound(id))
    }

    /// Creates an item not found error.
    #[must_use]
    pub fn item_not_found(id: ItemId) -> Self {
        Self::new(ErrorKind::ItemNotFound(id))
    }

    /// Creates a room not found error.
    #[must_use]
    pub fn room_not_found(id: RoomId) -> Self {
        Self::new(ErrorKind::RoomNotFound(id))
    }

    /// Creates a conversation not found error.
    #[must_use]
    pub fn conversation_not_found(id: ConversationId) -> Self {
        Self::new(ErrorKind::ConversationNotFound(id))
    }

    /// Creates a conversation busy error.
    #[must_use]
    pub fn conversation_busy(participant: CharacterId, active: ConversationId) -> Self {
        Self::new(ErrorKind::ConversationBusy {
            participant,
            active,
        })
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A key could not be canonicalized or split.
    #[error("invalid key {key:?}: {reason}")]
    InvalidKey {
        /// The offending key.
        key: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// A command grammar string could not be compiled.
    #[error("invalid grammar {grammar:?}: {message}")]
    InvalidGrammar {
        /// The grammar source.
        grammar: String,
        /// Description of the problem.
        message: String,
    },

    /// A command name was registered twice on the same registry.
    #[error("command already registered: {0}")]
    DuplicateRegistration(String),

    /// No zone with the given key exists.
    #[error("unknown zone: {0}")]
    UnknownZone(String),

    /// No room with the given zoned key exists.
    #[error("unknown room: {0}")]
    UnknownRoom(String),

    /// Character id does not refer to a live character.
    #[error("character not found: {0:?}")]
    CharacterNotFound(CharacterId),

    /// Item id does not refer to a live item.
    #[error("item not found: {0:?}")]
    ItemNotFound(ItemId),

    /// Room id does not refer to a live room.
    #[error("room not found: {0:?}")]
    RoomNotFound(RoomId),

    /// Conversation id does not refer to an active conversation.
    #[error("conversation not found: {0:?}")]
    ConversationNotFound(ConversationId),

    /// A participant is already held by another top-level conversation.
    #[error("{participant:?} is already in {active:?}")]
    ConversationBusy {
        /// The participant that could not be claimed.
        participant: CharacterId,
        /// The conversation currently holding it.
        active: ConversationId,
    },

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Source of the failing definition (zone file, script, module).
    pub source: Option<String>,
    /// Stack of enclosing definitions.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Adds a stack frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "at {source}")?;
        }
        if !self.stack.is_empty() {
            writeln!(f)?;
            for frame in &self.stack {
                writeln!(f, "  in {frame}")?;
            }
        }
        Ok(())
    }
}
