//! Menu service
//!
//! Commands over the Dish and Promotion aggregates. Every command is one
//! load -> validate -> mutate -> persist sequence inside a single
//! transaction; queries read straight from the repositories.

use std::sync::Arc;

use crate::domain::entities::{
    Dish, DishId, DishPatch, NewDish, NewPromotion, Promotion, PromotionId,
};
use crate::domain::ports::{DishRepository, MenuScope, PromotionRepository, Transactor};
use crate::error::DomainError;

/// Service for managing dishes and promotions
pub struct MenuService<DR, PR, TX>
where
    DR: DishRepository,
    PR: PromotionRepository,
    TX: Transactor,
    TX::Scope: MenuScope,
{
    dishes: Arc<DR>,
    promotions: Arc<PR>,
    transactor: Arc<TX>,
}

impl<DR, PR, TX> MenuService<DR, PR, TX>
where
    DR: DishRepository,
    PR: PromotionRepository,
    TX: Transactor,
    TX::Scope: MenuScope,
{
    pub fn new(dishes: Arc<DR>, promotions: Arc<PR>, transactor: Arc<TX>) -> Self {
        Self {
            dishes,
            promotions,
            transactor,
        }
    }

    // ------------------------------------------------------------------------
    // Dishes
    // ------------------------------------------------------------------------

    /// Add a dish to the menu
    ///
    /// Returns the stored row, so anything the store fills in is reflected.
    pub async fn add_dish(&self, new: NewDish) -> Result<Dish, DomainError> {
        let dish = Dish::create(new)?;

        let created = self
            .transactor
            .within_transaction::<_, DomainError, _>(move |scope| {
                Box::pin(async move { scope.dishes().create(&dish).await })
            })
            .await?;

        tracing::info!("Dish {} added ({})", created.id, created.name);
        Ok(created)
    }

    /// Apply a partial update to a dish
    pub async fn update_dish(&self, id: DishId, patch: DishPatch) -> Result<Dish, DomainError> {
        if patch.is_empty() {
            tracing::debug!("Empty patch for dish {}, refreshing updated_at only", id);
        }

        let updated = self
            .transactor
            .within_transaction::<_, DomainError, _>(move |scope| {
                Box::pin(async move {
                    let dishes = scope.dishes();
                    let mut dish = dishes
                        .find_by_id(&id)
                        .await?
                        .ok_or(DomainError::DishNotFound(id))?;

                    dish.apply(patch)?;
                    dishes.update(&dish).await
                })
            })
            .await?;

        tracing::info!("Dish {} updated", updated.id);
        Ok(updated)
    }

    /// Remove a dish from the menu
    pub async fn delete_dish(&self, id: DishId) -> Result<(), DomainError> {
        self.transactor
            .within_transaction::<_, DomainError, _>(move |scope| {
                Box::pin(async move {
                    let dishes = scope.dishes();
                    if dishes.find_by_id(&id).await?.is_none() {
                        return Err(DomainError::DishNotFound(id));
                    }
                    dishes.delete(&id).await
                })
            })
            .await?;

        tracing::info!("Dish {} deleted", id);
        Ok(())
    }

    pub async fn get_dish(&self, id: DishId) -> Result<Dish, DomainError> {
        self.dishes
            .find_by_id(&id)
            .await?
            .ok_or(DomainError::DishNotFound(id))
    }

    /// Dishes, newest first
    pub async fn list_dishes(&self, limit: u64, offset: u64) -> Result<Vec<Dish>, DomainError> {
        self.dishes.list(limit, offset).await
    }

    // ------------------------------------------------------------------------
    // Promotions
    // ------------------------------------------------------------------------

    /// Create an inactive promotion
    pub async fn create_promotion(&self, new: NewPromotion) -> Result<Promotion, DomainError> {
        let promotion = Promotion::create(new)?;

        let created = self
            .transactor
            .within_transaction::<_, DomainError, _>(move |scope| {
                Box::pin(async move { scope.promotions().create(&promotion).await })
            })
            .await?;

        tracing::info!("Promotion {} created ({})", created.id, created.name);
        Ok(created)
    }

    /// Switch a promotion on
    ///
    /// Activating an already-active promotion is a no-op: nothing is written
    /// and the promotion is returned as stored.
    pub async fn activate_promotion(&self, id: PromotionId) -> Result<Promotion, DomainError> {
        let (promotion, changed) = self
            .transactor
            .within_transaction::<_, DomainError, _>(move |scope| {
                Box::pin(async move {
                    let promotions = scope.promotions();
                    let mut promotion = promotions
                        .find_by_id(&id)
                        .await?
                        .ok_or(DomainError::PromotionNotFound(id))?;

                    if !promotion.activate() {
                        return Ok((promotion, false));
                    }
                    let updated = promotions.update(&promotion).await?;
                    Ok((updated, true))
                })
            })
            .await?;

        if changed {
            tracing::info!("Promotion {} activated", id);
        } else {
            tracing::debug!("Promotion {} was already active", id);
        }
        Ok(promotion)
    }

    pub async fn get_promotion(&self, id: PromotionId) -> Result<Promotion, DomainError> {
        self.promotions
            .find_by_id(&id)
            .await?
            .ok_or(DomainError::PromotionNotFound(id))
    }

    /// Promotions, newest first
    pub async fn list_promotions(
        &self,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<Promotion>, DomainError> {
        self.promotions.list(limit, offset).await
    }
}
