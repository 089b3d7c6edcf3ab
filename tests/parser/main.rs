//! Integration tests for Layer 1: Parser
//!
//! Tests for turning a typed line into bound arguments: tokenizing, entity
//! matching, grammar compilation, and argument resolution.

mod resolver_tests;
