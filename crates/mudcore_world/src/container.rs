//! The "holds items" capability.
//!
//! Rooms, characters, and items-as-containers all hold an ordered list of
//! items. Each embeds an [`ItemContainer`] and implements [`HoldsItems`] by
//! pointing at it; the add/remove/list behavior lives in the trait's
//! provided methods.

use mudcore_foundation::ItemId;

/// Ordered list of held items.
///
/// Cloning is O(1), so callers can snapshot a container and keep iterating
/// while the world is mutated underneath them.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemContainer {
    items: im::Vector<ItemId>,
}

impl ItemContainer {
    /// Creates an empty container.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Items in insertion order.
    #[must_use]
    pub fn items(&self) -> &im::Vector<ItemId> {
        &self.items
    }

    /// Appends an item unless it is already held.
    pub fn add(&mut self, item: ItemId) {
        if !self.items.contains(&item) {
            self.items.push_back(item);
        }
    }

    /// Removes an item, returning whether it was held.
    pub fn remove(&mut self, item: ItemId) -> bool {
        match self.items.index_of(&item) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }
}

/// Anything that can hold items.
pub trait HoldsItems {
    /// The embedded container.
    fn container(&self) -> &ItemContainer;

    /// The embedded container, mutably.
    fn container_mut(&mut self) -> &mut ItemContainer;

    /// Held items in insertion order.
    fn items(&self) -> &im::Vector<ItemId> {
        self.container().items()
    }

    /// Whether `item` is held directly (not nested).
    fn has_item(&self, item: ItemId) -> bool {
        self.container().items().contains(&item)
    }

    /// Number of directly held items.
    fn item_count(&self) -> usize {
        self.container().items().len()
    }

    /// Adds an item.
    fn add_item(&mut self, item: ItemId) {
        self.container_mut().add(item);
    }

    /// Removes an item, returning whether it was held.
    fn remove_item(&mut self, item: ItemId) -> bool {
        self.container_mut().remove(item)
    }
}

impl HoldsItems for ItemContainer {
    fn container(&self) -> &ItemContainer {
        self
    }

    fn container_mut(&mut self) -> &mut ItemContainer {
        self
    }
}
