//! Domain layer
//!
//! Aggregates, their invariants, and the persistence contracts they rely on.
//! - `entities`: Domain models representing core business concepts
//! - `ports`: Repository and transaction traits the services depend on

pub mod entities;
pub mod ports;
