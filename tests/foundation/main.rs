//! Integration tests for Layer 0: Foundation
//!
//! Tests for core types: zoned keys, Value, and Error.

mod keys;
mod values;
