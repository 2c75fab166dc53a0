//! Domain ports (traits)
//!
//! Port traits define interfaces that the domain layer requires.
//! Adapters provide concrete implementations of these traits.

pub mod repositories;
pub mod transactor;

pub use repositories::{DishRepository, OrderRepository, PromotionRepository};
pub use transactor::{KitchenScope, MenuScope, Transactor, UnitOfWork};
