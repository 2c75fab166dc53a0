//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod dishes;
pub mod orders;
pub mod promotions;

pub use dishes::{create_dish, delete_dish, get_dish, list_dishes, update_dish};
pub use orders::{accept_order, complete_preparing, get_order, start_preparing};
pub use promotions::{activate_promotion, create_promotion, get_promotion, list_promotions};
