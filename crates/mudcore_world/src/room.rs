//! Rooms.

use std::collections::BTreeMap;

use mudcore_foundation::{CharacterId, RoomId, ZoneId, ZonedKey};

use crate::container::{HoldsItems, ItemContainer};
use crate::exit::{Direction, Exit};

/// A room: occupants, items on the floor, and exits keyed by direction.
#[derive(Clone, Debug)]
pub struct Room {
    id: RoomId,
    key: ZonedKey,
    zone: ZoneId,
    title: String,
    description: String,
    pub(crate) characters: im::Vector<CharacterId>,
    items: ItemContainer,
    pub(crate) exits: BTreeMap<Direction, Exit>,
}

impl Room {
    pub(crate) fn new(
        id: RoomId,
        key: ZonedKey,
        zone: ZoneId,
        title: String,
        description: String,
    ) -> Self {
        Self {
            id,
            key,
            zone,
            title,
            description,
            characters: im::Vector::new(),
            items: ItemContainer::new(),
            exits: BTreeMap::new(),
        }
    }

    /// The room's id.
    #[must_use]
    pub fn id(&self) -> RoomId {
        self.id
    }

    /// The room's zoned key.
    #[must_use]
    pub fn key(&self) -> &ZonedKey {
        &self.key
    }

    /// The zone the room belongs to.
    #[must_use]
    pub fn zone(&self) -> ZoneId {
        self.zone
    }

    /// Short title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Long description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Occupants in arrival order.
    ///
    /// Cloning the returned vector is O(1).
    #[must_use]
    pub fn characters(&self) -> &im::Vector<CharacterId> {
        &self.characters
    }

    /// Exits in direction order.
    pub fn exits(&self) -> impl Iterator<Item = &Exit> {
        self.exits.values()
    }

    /// The exit leading `direction`, if any.
    #[must_use]
    pub fn exit(&self, direction: Direction) -> Option<&Exit> {
        self.exits.get(&direction)
    }

    /// The exit leading `direction`, mutably.
    pub fn exit_mut(&mut self, direction: Direction) -> Option<&mut Exit> {
        self.exits.get_mut(&direction)
    }
}

impl HoldsItems for Room {
    fn container(&self) -> &ItemContainer {
        &self.items
    }

    fn container_mut(&mut self) -> &mut ItemContainer {
        &mut self.items
    }
}
