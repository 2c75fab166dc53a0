//! SeaORM entities
//!
//! Table definitions mapped by the PostgreSQL adapters. Domain code never
//! sees these types; see `adapters::postgres` for the conversions.

pub mod dishes;
pub mod orders;
pub mod promotions;
