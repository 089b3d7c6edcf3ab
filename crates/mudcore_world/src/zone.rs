//! Zones.

use mudcore_foundation::{CharacterId, RoomId, ZoneId};

/// A zone: the unit that owns entity definitions and scopes their keys.
#[derive(Clone, Debug)]
pub struct Zone {
    id: ZoneId,
    key: String,
    name: String,
    pub(crate) rooms: Vec<RoomId>,
    pub(crate) characters: im::Vector<CharacterId>,
}

impl Zone {
    pub(crate) fn new(id: ZoneId, key: String, name: String) -> Self {
        Self {
            id,
            key,
            name,
            rooms: Vec::new(),
            characters: im::Vector::new(),
        }
    }

    /// The zone's id.
    #[must_use]
    pub fn id(&self) -> ZoneId {
        self.id
    }

    /// The zone key that scopes `basic@zone` keys.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rooms in creation order.
    #[must_use]
    pub fn rooms(&self) -> &[RoomId] {
        &self.rooms
    }

    /// Characters anywhere in the zone, in arrival order.
    #[must_use]
    pub fn characters(&self) -> &im::Vector<CharacterId> {
        &self.characters
    }
}
