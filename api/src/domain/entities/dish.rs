//! Dish domain entity
//!
//! A menu item. Name and category are never empty and price is always
//! strictly positive; every mutation goes through [`Dish::apply`] so those
//! rules and the `updated_at` refresh cannot be skipped.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::patch::Patch;
use super::timestamps;
use crate::error::DomainError;

pub const MAX_NAME_LEN: usize = 255;
pub const MAX_DESCRIPTION_LEN: usize = 1000;
pub const MAX_CATEGORY_LEN: usize = 100;

/// Prices are stored as NUMERIC(10, 2)
pub const PRICE_SCALE: u32 = 2;
const MAX_PRICE_INTEGER_DIGITS: u32 = 8;

/// Unique identifier for a dish
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DishId(pub Uuid);

impl DishId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DishId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for DishId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for DishId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A dish on the menu
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dish {
    pub id: DishId,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category: String,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Dish {
    /// Build a new, available dish with a generated id
    pub fn create(new: NewDish) -> Result<Self, DomainError> {
        validate_text("name", &new.name, MAX_NAME_LEN)?;
        validate_description(new.description.as_deref())?;
        validate_text("category", &new.category, MAX_CATEGORY_LEN)?;
        let price = normalize_price(new.price)?;

        let now = timestamps::now();
        Ok(Self {
            id: DishId::new(),
            name: new.name,
            description: new.description,
            price,
            category: new.category,
            is_available: true,
            created_at: now,
            updated_at: now,
        })
    }

    /// Apply the supplied fields of `patch` and refresh `updated_at`
    ///
    /// The whole patch is validated before any field is touched.
    pub fn apply(&mut self, patch: DishPatch) -> Result<(), DomainError> {
        if let Patch::Set(name) = patch.name.as_ref() {
            validate_text("name", name, MAX_NAME_LEN)?;
        }
        if let Patch::Set(description) = patch.description.as_ref() {
            validate_description(description.as_deref())?;
        }
        if let Patch::Set(category) = patch.category.as_ref() {
            validate_text("category", category, MAX_CATEGORY_LEN)?;
        }
        let price = match patch.price {
            Patch::Set(price) => Patch::Set(normalize_price(price)?),
            Patch::Unset => Patch::Unset,
        };

        patch.name.apply_to(&mut self.name);
        patch.description.apply_to(&mut self.description);
        price.apply_to(&mut self.price);
        patch.category.apply_to(&mut self.category);
        patch.is_available.apply_to(&mut self.is_available);
        self.updated_at = timestamps::refreshed(self.updated_at);
        Ok(())
    }
}

/// Data needed to create a new dish
#[derive(Debug, Clone, Deserialize)]
pub struct NewDish {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category: String,
}

/// Partial update of a dish
///
/// `description: Set(None)` clears the description; `Unset` keeps it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DishPatch {
    #[serde(default)]
    pub name: Patch<String>,
    #[serde(default)]
    pub description: Patch<Option<String>>,
    #[serde(default)]
    pub price: Patch<Decimal>,
    #[serde(default)]
    pub category: Patch<String>,
    #[serde(default)]
    pub is_available: Patch<bool>,
}

impl DishPatch {
    pub fn is_empty(&self) -> bool {
        !(self.name.is_set()
            || self.description.is_set()
            || self.price.is_set()
            || self.category.is_set()
            || self.is_available.is_set())
    }
}

pub(crate) fn validate_text(field: &str, value: &str, max_len: usize) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::Validation(format!("{} must not be empty", field)));
    }
    if value.chars().count() > max_len {
        return Err(DomainError::Validation(format!(
            "{} must be at most {} characters",
            field, max_len
        )));
    }
    Ok(())
}

pub(crate) fn validate_description(description: Option<&str>) -> Result<(), DomainError> {
    match description {
        Some(d) if d.chars().count() > MAX_DESCRIPTION_LEN => Err(DomainError::Validation(
            format!("description must be at most {} characters", MAX_DESCRIPTION_LEN),
        )),
        _ => Ok(()),
    }
}

fn normalize_price(price: Decimal) -> Result<Decimal, DomainError> {
    if price <= Decimal::ZERO {
        return Err(DomainError::Validation(
            "price must be greater than zero".to_string(),
        ));
    }
    if price.normalize().scale() > PRICE_SCALE {
        return Err(DomainError::Validation(format!(
            "price must have at most {} decimal places",
            PRICE_SCALE
        )));
    }
    if price >= Decimal::from(10u64.pow(MAX_PRICE_INTEGER_DIGITS)) {
        return Err(DomainError::Validation("price is too large".to_string()));
    }
    let mut price = price;
    price.rescale(PRICE_SCALE);
    Ok(price)
}
