//! Domain entities
//!
//! Pure domain models representing core business concepts.
//! These are separate from the SeaORM entities in the `entity` module.

pub mod dish;
pub mod order;
pub mod patch;
pub mod promotion;
pub mod timestamps;

pub use dish::{Dish, DishId, DishPatch, NewDish};
pub use order::{Order, OrderId, OrderStatus};
pub use patch::Patch;
pub use promotion::{NewPromotion, Promotion, PromotionId};
