//! mudcore - command interpretation for text-driven multi-user worlds
//!
//! This crate re-exports all layers of the mudcore system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: mudcore_runtime    - Sessions, standard commands, shell, logging
//! Layer 2: mudcore_dispatch   - Registries, conversations, dispatch chain
//! Layer 1: mudcore_parser     - Tokenizer, matcher, grammars, argument resolution
//!          mudcore_world      - Zones, rooms, exits, characters, items, clock
//! Layer 0: mudcore_foundation - Core types (ids, ZonedKey, Value, Error)
//! ```

pub use mudcore_dispatch as dispatch;
pub use mudcore_foundation as foundation;
pub use mudcore_parser as parser;
pub use mudcore_runtime as runtime;
pub use mudcore_world as world;
