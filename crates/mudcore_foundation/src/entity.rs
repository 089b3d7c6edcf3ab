//! Typed identifiers for live simulation objects.
//!
//! Every collection the core queries is keyed by one of these. They are plain
//! indices handed out by the world (or the conversation table); holding one
//! never keeps the referenced object alive.

use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name(pub u64);

        impl $name {
            /// Creates an identifier from a raw index.
            #[must_use]
            pub const fn new(index: u64) -> Self {
                Self(index)
            }

            /// Returns the raw index.
            #[must_use]
            pub const fn index(self) -> u64 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, "({})"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, "#{}"), self.0)
            }
        }
    };
}

define_id!(
    /// Identifier of a character (player or NPC).
    CharacterId,
    "Character"
);
define_id!(
    /// Identifier of an item instance.
    ItemId,
    "Item"
);
define_id!(
    /// Identifier of a room.
    RoomId,
    "Room"
);
define_id!(
    /// Identifier of a zone.
    ZoneId,
    "Zone"
);
define_id!(
    /// Identifier of an entry in the conversation table.
    ConversationId,
    "Conversation"
);
