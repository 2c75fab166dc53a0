//! Test utilities
//!
//! Manual in-memory implementations of the ports and test fixtures.
//!
//! Why manual mocks instead of mockall?
//! - The transactor takes a higher-ranked closure, which mockall cannot express
//! - Staged commit/rollback needs real state, not canned return values
//! - We control exactly which call fails without macro magic

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
