//! Integration tests for Layer 1: World
//!
//! Tests for the collaborator model the command core queries: rooms and
//! exits, occupancy, item locations, doors, and the balance clock.

mod doors;
mod items;
