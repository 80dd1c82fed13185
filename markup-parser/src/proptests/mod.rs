//! Property-based tests for the parser
//!
//! These tests verify invariants that should hold for ANY input, not just the
//! hand-picked cases in the unit tests.

mod generators;
mod invariants;
