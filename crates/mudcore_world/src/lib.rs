//! Zones, rooms, exits, characters, and items.
//!
//! This is the live world the command core reads from. The core never owns
//! or caches these collections; it queries them through [`World`] each time
//! a command is resolved.
//!
//! - [`container`] - The "holds items" capability shared by rooms, characters, and items
//! - [`exit`] - Directions, exits, doors, and exit capability predicates
//! - [`character`] / [`item`] / [`room`] / [`zone`] - The entities themselves
//! - [`world`] - Storage, lookups, movement, balance, and the world clock

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod character;
pub mod container;
pub mod exit;
pub mod item;
pub mod room;
pub mod world;
pub mod zone;

pub use character::{Character, CharacterTemplate};
pub use container::{HoldsItems, ItemContainer};
pub use exit::{Direction, Door, Exit};
pub use item::{Item, ItemLocation, ItemTemplate};
pub use room::Room;
pub use world::World;
pub use zone::Zone;
