//! Items, including items that hold other items.

use mudcore_foundation::{CharacterId, ItemId, Result, RoomId, ZonedKey, build_zoned_key};

use crate::container::{HoldsItems, ItemContainer};

/// Where an item currently is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ItemLocation {
    /// Lying in a room.
    Room(RoomId),
    /// Carried in a character's inventory.
    Inventory(CharacterId),
    /// Worn by a character in a named slot.
    Equipped(CharacterId, String),
    /// Inside another item.
    Container(ItemId),
}

/// An item instance.
#[derive(Clone, Debug)]
pub struct Item {
    id: ItemId,
    key: ZonedKey,
    name: String,
    keywords: Vec<String>,
    pub(crate) location: Option<ItemLocation>,
    contents: ItemContainer,
}

impl Item {
    /// The item's id.
    #[must_use]
    pub fn id(&self) -> ItemId {
        self.id
    }

    /// The zoned key of the item's definition.
    #[must_use]
    pub fn key(&self) -> &ZonedKey {
        &self.key
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Authored keyword aliases.
    #[must_use]
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Current location.
    #[must_use]
    pub fn location(&self) -> Option<&ItemLocation> {
        self.location.as_ref()
    }
}

impl HoldsItems for Item {
    fn container(&self) -> &ItemContainer {
        &self.contents
    }

    fn container_mut(&mut self) -> &mut ItemContainer {
        &mut self.contents
    }
}

/// Blueprint for spawning an item.
#[derive(Clone, Debug)]
pub struct ItemTemplate {
    key: String,
    name: String,
    keywords: Vec<String>,
}

impl ItemTemplate {
    /// Creates a template.
    #[must_use]
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            keywords: Vec::new(),
        }
    }

    /// Adds keyword aliases.
    #[must_use]
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords.extend(keywords.into_iter().map(Into::into));
        self
    }

    /// Builds an unplaced item, scoping a bare key to `default_zone`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidKey` if the template key cannot be canonicalized.
    pub fn build(self, id: ItemId, default_zone: &str) -> Result<Item> {
        Ok(Item {
            id,
            key: build_zoned_key(&self.key, default_zone)?,
            name: self.name,
            keywords: self.keywords,
            location: None,
            contents: ItemContainer::new(),
        })
    }
}
