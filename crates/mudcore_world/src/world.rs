//! World storage.
//!
//! The `World` owns every zone, room, character, and item, plus the logical
//! clock that cooldowns and scheduled commands are measured against. It is
//! mutated only from the single dispatch thread.

use std::collections::HashMap;
use std::time::Duration;

use mudcore_foundation::{
    CharacterId, Error, ErrorKind, ItemId, Result, RoomId, ZoneId, ZonedKey, build_zoned_key,
};

use crate::character::{Character, CharacterTemplate};
use crate::container::HoldsItems;
use crate::exit::{Direction, Exit};
use crate::item::{Item, ItemLocation, ItemTemplate};
use crate::room::Room;
use crate::zone::Zone;

/// The live world.
#[derive(Clone, Debug, Default)]
pub struct World {
    zones: HashMap<ZoneId, Zone>,
    zone_index: HashMap<String, ZoneId>,
    rooms: HashMap<RoomId, Room>,
    room_index: HashMap<ZonedKey, RoomId>,
    characters: HashMap<CharacterId, Character>,
    items: HashMap<ItemId, Item>,
    next_id: u64,
    now: Duration,
}

impl World {
    /// Creates an empty world at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    // =========================================================================
    // Clock
    // =========================================================================

    /// Logical time since the world started.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Advances the logical clock.
    pub fn advance(&mut self, delta: Duration) {
        self.now += delta;
    }

    // =========================================================================
    // Zones and rooms
    // =========================================================================

    /// Adds a zone.
    ///
    /// # Errors
    ///
    /// Returns `InvalidKey` if the key is empty, contains `@`, or is taken.
    pub fn add_zone(&mut self, key: &str, name: &str) -> Result<ZoneId> {
        if key.is_empty() || key.contains('@') {
            return Err(Error::invalid_key(key, "zone keys must be bare"));
        }
        if self.zone_index.contains_key(key) {
            return Err(Error::invalid_key(key, "zone already exists"));
        }
        let id = ZoneId::new(self.allocate());
        self.zones
            .insert(id, Zone::new(id, key.to_string(), name.to_string()));
        self.zone_index.insert(key.to_string(), id);
        Ok(id)
    }

    /// Adds a room to a zone. Bare keys are scoped to that zone.
    ///
    /// # Errors
    ///
    /// Returns an error if the zone is unknown or the key is invalid or taken.
    pub fn add_room(
        &mut self,
        zone: ZoneId,
        key: &str,
        title: &str,
        description: &str,
    ) -> Result<RoomId> {
        let zone_key = self
            .zones
            .get(&zone)
            .map(|z| z.key().to_string())
            .ok_or_else(|| Error::unknown_zone(zone.to_string()))?;
        let key = build_zoned_key(key, &zone_key)?;
        if self.room_index.contains_key(&key) {
            return Err(Error::invalid_key(key.as_str(), "room already exists"));
        }
        let id = RoomId::new(self.allocate());
        self.room_index.insert(key.clone(), id);
        self.rooms.insert(
            id,
            Room::new(id, key, zone, title.to_string(), description.to_string()),
        );
        if let Some(z) = self.zones.get_mut(&zone) {
            z.rooms.push(id);
        }
        Ok(id)
    }

    /// Adds or replaces the exit in `exit.direction`.
    ///
    /// # Errors
    ///
    /// Returns `RoomNotFound` if the room does not exist.
    pub fn add_exit(&mut self, room: RoomId, exit: Exit) -> Result<()> {
        let r = self
            .rooms
            .get_mut(&room)
            .ok_or_else(|| Error::room_not_found(room))?;
        r.exits.insert(exit.direction, exit);
        Ok(())
    }

    /// Gets a zone.
    #[must_use]
    pub fn zone(&self, id: ZoneId) -> Option<&Zone> {
        self.zones.get(&id)
    }

    /// Finds a zone by exact key.
    #[must_use]
    pub fn lookup_zone(&self, key: &str) -> Option<ZoneId> {
        self.zone_index.get(key).copied()
    }

    /// Gets a room.
    #[must_use]
    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(&id)
    }

    /// Gets a room mutably.
    pub fn room_mut(&mut self, id: RoomId) -> Option<&mut Room> {
        self.rooms.get_mut(&id)
    }

    /// Finds a room by key, scoping bare keys to `default_zone`.
    #[must_use]
    pub fn lookup_room(&self, key: &str, default_zone: &str) -> Option<RoomId> {
        let key = build_zoned_key(key, default_zone).ok()?;
        self.room_index.get(&key).copied()
    }

    /// The room an exit leads to, if the exit and destination both exist.
    #[must_use]
    pub fn exit_destination(&self, room: RoomId, direction: Direction) -> Option<RoomId> {
        let exit = self.rooms.get(&room)?.exit(direction)?;
        self.room_index.get(&exit.destination).copied()
    }

    /// Opens or shuts the door on an exit, and on the matching exit back if
    /// the destination has one. Returns whether the door's state changed.
    ///
    /// # Errors
    ///
    /// Returns `RoomNotFound` if the room does not exist.
    pub fn set_door_closed(
        &mut self,
        room: RoomId,
        direction: Direction,
        closed: bool,
    ) -> Result<bool> {
        let here_key = self
            .rooms
            .get(&room)
            .map(|r| r.key().clone())
            .ok_or_else(|| Error::room_not_found(room))?;
        let destination = self.exit_destination(room, direction);
        let changed = self
            .rooms
            .get_mut(&room)
            .and_then(|r| r.exit_mut(direction))
            .and_then(|e| e.door.as_mut())
            .is_some_and(|door| {
                let changed = door.closed != closed;
                door.closed = closed;
                changed
            });

        let back = destination
            .and_then(|d| self.rooms.get_mut(&d))
            .and_then(|r| r.exit_mut(direction.opposite()))
            .filter(|e| e.destination == here_key)
            .and_then(|e| e.door.as_mut());
        if let Some(door) = back {
            door.closed = closed;
        }
        Ok(changed)
    }

    // =========================================================================
    // Characters
    // =========================================================================

    /// Gets a character.
    #[must_use]
    pub fn character(&self, id: CharacterId) -> Option<&Character> {
        self.characters.get(&id)
    }

    /// Gets a character mutably.
    pub fn character_mut(&mut self, id: CharacterId) -> Option<&mut Character> {
        self.characters.get_mut(&id)
    }

    /// All characters, in no particular order.
    pub fn characters(&self) -> impl Iterator<Item = &Character> {
        self.characters.values()
    }

    /// The zone a character is in, through its room.
    #[must_use]
    pub fn character_zone(&self, id: CharacterId) -> Option<ZoneId> {
        let room = self.characters.get(&id)?.room()?;
        self.rooms.get(&room).map(Room::zone)
    }

    /// Spawns a character into a room. Bare keys are scoped to the room's zone.
    ///
    /// # Errors
    ///
    /// Returns an error if the room is unknown or the key is invalid.
    pub fn spawn_character(
        &mut self,
        room: RoomId,
        template: CharacterTemplate,
    ) -> Result<CharacterId> {
        let zone_key = self.room_zone_key(room)?;
        let id = CharacterId::new(self.allocate());
        let character = template.build(id, &zone_key)?;
        self.characters.insert(id, character);
        self.place_character(id, room);
        tracing::trace!(character = %id, room = %room, "spawned character");
        Ok(id)
    }

    /// Moves a character to another room.
    ///
    /// # Errors
    ///
    /// Returns an error if the character or room does not exist.
    pub fn move_character(&mut self, id: CharacterId, to: RoomId) -> Result<()> {
        if !self.rooms.contains_key(&to) {
            return Err(Error::room_not_found(to));
        }
        if !self.characters.contains_key(&id) {
            return Err(Error::character_not_found(id));
        }
        self.unplace_character(id);
        self.place_character(id, to);
        tracing::trace!(character = %id, room = %to, "moved character");
        Ok(())
    }

    /// Removes a character and drops everything it carries into its room.
    ///
    /// # Errors
    ///
    /// Returns `CharacterNotFound` if the character does not exist.
    pub fn despawn_character(&mut self, id: CharacterId) -> Result<()> {
        let character = self
            .characters
            .get(&id)
            .ok_or_else(|| Error::character_not_found(id))?;
        let mut carried: Vec<ItemId> = character.items().iter().copied().collect();
        carried.extend(character.equipment().values().copied());
        if let Some(room) = character.room() {
            for item in carried {
                self.move_item(item, ItemLocation::Room(room))?;
            }
        }
        self.unplace_character(id);
        self.characters.remove(&id);
        Ok(())
    }

    fn place_character(&mut self, id: CharacterId, room: RoomId) {
        let Some(r) = self.rooms.get_mut(&room) else {
            return;
        };
        r.characters.push_back(id);
        let zone = r.zone();
        if let Some(z) = self.zones.get_mut(&zone) {
            z.characters.push_back(id);
        }
        if let Some(c) = self.characters.get_mut(&id) {
            c.room = Some(room);
        }
    }

    fn unplace_character(&mut self, id: CharacterId) {
        let Some(room) = self.characters.get_mut(&id).and_then(|c| c.room.take()) else {
            return;
        };
        let Some(r) = self.rooms.get_mut(&room) else {
            return;
        };
        r.characters.retain(|c| *c != id);
        let zone = r.zone();
        if let Some(z) = self.zones.get_mut(&zone) {
            z.characters.retain(|c| *c != id);
        }
    }

    /// Puts a character off balance for `duration` from now.
    ///
    /// # Errors
    ///
    /// Returns `CharacterNotFound` if the character does not exist.
    pub fn put_off_balance(&mut self, id: CharacterId, duration: Duration) -> Result<()> {
        let until = self.now + duration;
        let c = self
            .characters
            .get_mut(&id)
            .ok_or_else(|| Error::character_not_found(id))?;
        c.balance_until = Some(until);
        Ok(())
    }

    /// Remaining cooldown for a character, if it is off balance.
    #[must_use]
    pub fn balance_remaining(&self, id: CharacterId) -> Option<Duration> {
        self.characters.get(&id)?.balance_remaining(self.now)
    }

    // =========================================================================
    // Items
    // =========================================================================

    /// Gets an item.
    #[must_use]
    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.get(&id)
    }

    /// Gets an item mutably.
    pub fn item_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.items.get_mut(&id)
    }

    /// Items a character wears, in slot order.
    #[must_use]
    pub fn equipped_items(&self, id: CharacterId) -> Vec<ItemId> {
        self.characters
            .get(&id)
            .map(|c| c.equipment().values().copied().collect())
            .unwrap_or_default()
    }

    /// Spawns an item at a location. Bare keys are scoped to the location's zone.
    ///
    /// # Errors
    ///
    /// Returns an error if the location does not exist or the key is invalid.
    pub fn spawn_item(&mut self, location: ItemLocation, template: ItemTemplate) -> Result<ItemId> {
        let zone_key = self.location_zone_key(&location)?;
        let id = ItemId::new(self.allocate());
        let item = template.build(id, &zone_key)?;
        self.items.insert(id, item);
        self.attach_item(id, location)?;
        Ok(id)
    }

    /// Moves an item to a new location.
    ///
    /// Equipping into an occupied slot sends the previous occupant back to
    /// the wearer's inventory.
    ///
    /// # Errors
    ///
    /// Returns an error if the item or destination does not exist.
    pub fn move_item(&mut self, id: ItemId, to: ItemLocation) -> Result<()> {
        if !self.items.contains_key(&id) {
            return Err(Error::item_not_found(id));
        }
        if to == ItemLocation::Container(id) {
            return Err(Error::new(ErrorKind::Internal(format!(
                "{id} cannot contain itself"
            ))));
        }
        self.location_zone_key(&to)?;
        self.detach_item(id);
        self.attach_item(id, to)
    }

    fn detach_item(&mut self, id: ItemId) {
        let Some(location) = self.items.get_mut(&id).and_then(|i| i.location.take()) else {
            return;
        };
        match location {
            ItemLocation::Room(room) => {
                if let Some(r) = self.rooms.get_mut(&room) {
                    r.remove_item(id);
                }
            }
            ItemLocation::Inventory(owner) => {
                if let Some(c) = self.characters.get_mut(&owner) {
                    c.remove_item(id);
                }
            }
            ItemLocation::Equipped(owner, slot) => {
                if let Some(c) = self.characters.get_mut(&owner) {
                    c.equipment.remove(&slot);
                }
            }
            ItemLocation::Container(parent) => {
                if let Some(p) = self.items.get_mut(&parent) {
                    p.remove_item(id);
                }
            }
        }
    }

    fn attach_item(&mut self, id: ItemId, location: ItemLocation) -> Result<()> {
        match &location {
            ItemLocation::Room(room) => self
                .rooms
                .get_mut(room)
                .ok_or_else(|| Error::room_not_found(*room))?
                .add_item(id),
            ItemLocation::Inventory(owner) => self
                .characters
                .get_mut(owner)
                .ok_or_else(|| Error::character_not_found(*owner))?
                .add_item(id),
            ItemLocation::Equipped(owner, slot) => {
                let c = self
                    .characters
                    .get_mut(owner)
                    .ok_or_else(|| Error::character_not_found(*owner))?;
                if let Some(previous) = c.equipment.insert(slot.clone(), id) {
                    c.add_item(previous);
                    if let Some(p) = self.items.get_mut(&previous) {
                        p.location = Some(ItemLocation::Inventory(*owner));
                    }
                }
            }
            ItemLocation::Container(parent) => {
                self.items
                    .get_mut(parent)
                    .ok_or_else(|| Error::item_not_found(*parent))?
                    .add_item(id);
            }
        }
        if let Some(item) = self.items.get_mut(&id) {
            item.location = Some(location);
        }
        Ok(())
    }

    fn room_zone_key(&self, room: RoomId) -> Result<String> {
        let r = self.rooms.get(&room).ok_or_else(|| Error::room_not_found(room))?;
        self.zones
            .get(&r.zone())
            .map(|z| z.key().to_string())
            .ok_or_else(|| Error::unknown_zone(r.zone().to_string()))
    }

    fn location_zone_key(&self, location: &ItemLocation) -> Result<String> {
        match location {
            ItemLocation::Room(room) => self.room_zone_key(*room),
            ItemLocation::Inventory(owner) | ItemLocation::Equipped(owner, _) => {
                let c = self
                    .characters
                    .get(owner)
                    .ok_or_else(|| Error::character_not_found(*owner))?;
                Ok(c.key().zone_key().to_string())
            }
            ItemLocation::Container(parent) => {
                let p = self
                    .items
                    .get(parent)
                    .ok_or_else(|| Error::item_not_found(*parent))?;
                Ok(p.key().zone_key().to_string())
            }
        }
    }
}
