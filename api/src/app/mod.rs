//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services run every command through the transactor so each one either
//! commits as a whole or leaves storage untouched.

pub mod kitchen_service;
pub mod menu_service;

pub use kitchen_service::KitchenService;
pub use menu_service::MenuService;
