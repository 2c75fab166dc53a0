//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.
//! Each fixture function creates a valid entity that can be customized.

use chrono::{Duration, Utc};
use rust_decimal::Decimal;

use crate::domain::entities::{Dish, DishId, NewDish, NewPromotion, Order, OrderId, Promotion};

/// Creation payload for a plain pizza
pub fn margherita() -> NewDish {
    NewDish {
        name: "Margherita".to_string(),
        description: Some("classic".to_string()),
        price: Decimal::new(59900, 2),
        category: "Pizza".to_string(),
    }
}

/// Create a test dish with default values
pub fn test_dish() -> Dish {
    test_dish_named("Margherita")
}

/// Create a test dish with a specific name
pub fn test_dish_named(name: &str) -> Dish {
    let mut dish = Dish::create(margherita()).expect("fixture dish is valid");
    dish.name = name.to_string();
    dish
}

/// Creation payload for a promotion over the given dishes
pub fn pizza_week(dish_ids: Vec<DishId>) -> NewPromotion {
    let starts_at = Utc::now();
    NewPromotion {
        name: "Pizza week".to_string(),
        description: Some("10% off pizza".to_string()),
        discount_percent: Decimal::new(10, 0),
        dish_ids,
        starts_at,
        ends_at: Some(starts_at + Duration::days(7)),
    }
}

/// Create an inactive test promotion covering one fresh dish id
pub fn test_promotion() -> Promotion {
    Promotion::create(pizza_week(vec![DishId::new()])).expect("fixture promotion is valid")
}

/// Create a freshly accepted test order
pub fn test_order() -> Order {
    Order::accepted(OrderId::new())
}
