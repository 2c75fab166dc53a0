//! Promotion domain entity
//!
//! A discount over a set of dishes, valid from `starts_at` until the
//! optional `ends_at`. Promotions are created inactive and switched on by
//! an administrator.

use std::collections::HashSet;

use chrono::{DateTime, SubsecRound, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::dish::{validate_description, validate_text, DishId, MAX_NAME_LEN};
use super::timestamps;
use crate::error::DomainError;

/// Discounts are stored as NUMERIC(5, 2)
pub const DISCOUNT_SCALE: u32 = 2;

/// Unique identifier for a promotion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PromotionId(pub Uuid);

impl PromotionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PromotionId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for PromotionId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for PromotionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A discount campaign
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Promotion {
    pub id: PromotionId,
    pub name: String,
    pub description: Option<String>,
    pub discount_percent: Decimal,
    pub dish_ids: Vec<DishId>,
    pub is_active: bool,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Promotion {
    /// Build a new, inactive promotion with a generated id
    pub fn create(new: NewPromotion) -> Result<Self, DomainError> {
        validate_text("name", &new.name, MAX_NAME_LEN)?;
        validate_description(new.description.as_deref())?;
        let discount_percent = normalize_discount(new.discount_percent)?;
        let starts_at = new.starts_at.trunc_subsecs(6);
        let ends_at = new.ends_at.map(|t| t.trunc_subsecs(6));
        if let Some(ends_at) = ends_at {
            if ends_at <= starts_at {
                return Err(DomainError::Validation(
                    "ends_at must be after starts_at".to_string(),
                ));
            }
        }

        let mut seen = HashSet::new();
        let mut dish_ids = new.dish_ids;
        dish_ids.retain(|id| seen.insert(*id));

        let now = timestamps::now();
        Ok(Self {
            id: PromotionId::new(),
            name: new.name,
            description: new.description,
            discount_percent,
            dish_ids,
            is_active: false,
            starts_at,
            ends_at,
            created_at: now,
            updated_at: now,
        })
    }

    /// Switch the promotion on
    ///
    /// Returns `false` and changes nothing when it is already active.
    pub fn activate(&mut self) -> bool {
        if self.is_active {
            return false;
        }
        self.is_active = true;
        self.updated_at = timestamps::refreshed(self.updated_at);
        true
    }
}

/// Data needed to create a new promotion
#[derive(Debug, Clone, Deserialize)]
pub struct NewPromotion {
    pub name: String,
    pub description: Option<String>,
    pub discount_percent: Decimal,
    #[serde(default)]
    pub dish_ids: Vec<DishId>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
}

fn normalize_discount(discount: Decimal) -> Result<Decimal, DomainError> {
    if discount <= Decimal::ZERO || discount > Decimal::ONE_HUNDRED {
        return Err(DomainError::Validation(
            "discount_percent must be greater than 0 and at most 100".to_string(),
        ));
    }
    if discount.normalize().scale() > DISCOUNT_SCALE {
        return Err(DomainError::Validation(format!(
            "discount_percent must have at most {} decimal places",
            DISCOUNT_SCALE
        )));
    }
    let mut discount = discount;
    discount.rescale(DISCOUNT_SCALE);
    Ok(discount)
}
