//! Integration tests for Layer 3: Runtime
//!
//! End-to-end runs through the demo village: sessions, the standard command
//! set, conversations, and the scripted shell.

mod village_tests;
