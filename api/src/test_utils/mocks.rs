//! In-memory implementations of port traits
//!
//! These store data in memory and allow tests to verify behavior. The
//! transactor stages every write on a private copy of the store and only
//! publishes it on commit, so rollback really discards partial writes.
//! Faults can be injected at begin, on commit and on individual writes.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::{Dish, DishId, Order, OrderId, OrderStatus, Promotion, PromotionId};
use crate::domain::ports::{
    DishRepository, KitchenScope, MenuScope, OrderRepository, PromotionRepository, Transactor,
    UnitOfWork,
};
use crate::error::DomainError;

// ============================================================================
// Shared state
// ============================================================================

/// Everything the in-memory store holds; dishes and promotions keep insertion order
#[derive(Debug, Default, Clone)]
pub struct StoreState {
    pub dishes: Vec<Dish>,
    pub promotions: Vec<Promotion>,
    pub orders: HashMap<OrderId, OrderStatus>,
}

#[derive(Debug, Default)]
struct Faults {
    fail_begin: AtomicBool,
    fail_commit: AtomicBool,
    fail_status_writes: AtomicBool,
    fail_dish_writes: AtomicBool,
}

#[derive(Debug, Default)]
struct Calls {
    begins: AtomicUsize,
    commits: AtomicUsize,
    rollbacks: AtomicUsize,
    status_writes: AtomicUsize,
    promotion_writes: AtomicUsize,
}

/// Handle shared by repositories, transactor and test assertions
#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<StoreState>>,
    faults: Arc<Faults>,
    calls: Arc<Calls>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a dish for testing
    pub fn with_dish(self, dish: Dish) -> Self {
        self.state.write().unwrap().dishes.push(dish);
        self
    }

    /// Pre-populate with a promotion for testing
    pub fn with_promotion(self, promotion: Promotion) -> Self {
        self.state.write().unwrap().promotions.push(promotion);
        self
    }

    /// Pre-populate with an order in the given status
    pub fn with_order(self, id: OrderId, status: OrderStatus) -> Self {
        self.state.write().unwrap().orders.insert(id, status);
        self
    }

    pub fn dish_repo(&self) -> InMemoryDishRepository {
        InMemoryDishRepository {
            state: self.state.clone(),
            faults: self.faults.clone(),
        }
    }

    pub fn promotion_repo(&self) -> InMemoryPromotionRepository {
        InMemoryPromotionRepository {
            state: self.state.clone(),
            calls: self.calls.clone(),
        }
    }

    pub fn order_repo(&self) -> InMemoryOrderRepository {
        InMemoryOrderRepository {
            state: self.state.clone(),
            faults: self.faults.clone(),
            calls: self.calls.clone(),
        }
    }

    pub fn transactor(&self) -> InMemoryTransactor {
        InMemoryTransactor {
            store: self.clone(),
        }
    }

    /// Committed state
    pub fn snapshot(&self) -> StoreState {
        self.state.read().unwrap().clone()
    }

    pub fn order_status(&self, id: &OrderId) -> Option<OrderStatus> {
        self.state.read().unwrap().orders.get(id).copied()
    }

    pub fn fail_begin(&self, fail: bool) {
        self.faults.fail_begin.store(fail, Ordering::SeqCst);
    }

    pub fn fail_commit(&self, fail: bool) {
        self.faults.fail_commit.store(fail, Ordering::SeqCst);
    }

    pub fn fail_status_writes(&self, fail: bool) {
        self.faults.fail_status_writes.store(fail, Ordering::SeqCst);
    }

    pub fn fail_dish_writes(&self, fail: bool) {
        self.faults.fail_dish_writes.store(fail, Ordering::SeqCst);
    }

    pub fn begins(&self) -> usize {
        self.calls.begins.load(Ordering::SeqCst)
    }

    pub fn commits(&self) -> usize {
        self.calls.commits.load(Ordering::SeqCst)
    }

    pub fn rollbacks(&self) -> usize {
        self.calls.rollbacks.load(Ordering::SeqCst)
    }

    /// Attempted order status writes, failed ones included
    pub fn status_writes(&self) -> usize {
        self.calls.status_writes.load(Ordering::SeqCst)
    }

    pub fn promotion_writes(&self) -> usize {
        self.calls.promotion_writes.load(Ordering::SeqCst)
    }
}

fn newest_first<T: Clone>(
    items: &[T],
    created_at: impl Fn(&T) -> DateTime<Utc>,
    limit: u64,
    offset: u64,
) -> Vec<T> {
    // Reverse insertion order first so equal timestamps still list newest first
    let mut items: Vec<T> = items.iter().rev().cloned().collect();
    items.sort_by(|a, b| created_at(b).cmp(&created_at(a)));
    items
        .into_iter()
        .skip(offset as usize)
        .take(limit as usize)
        .collect()
}

// ============================================================================
// In-Memory Dish Repository
// ============================================================================

pub struct InMemoryDishRepository {
    state: Arc<RwLock<StoreState>>,
    faults: Arc<Faults>,
}

impl InMemoryDishRepository {
    fn check_writable(&self) -> Result<(), DomainError> {
        if self.faults.fail_dish_writes.load(Ordering::SeqCst) {
            return Err(DomainError::Database("dish write failed".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl DishRepository for InMemoryDishRepository {
    async fn create(&self, dish: &Dish) -> Result<Dish, DomainError> {
        self.check_writable()?;
        let mut state = self.state.write().unwrap();
        if state.dishes.iter().any(|d| d.id == dish.id) {
            return Err(DomainError::Database(format!("duplicate dish id {}", dish.id)));
        }
        state.dishes.push(dish.clone());
        Ok(dish.clone())
    }

    async fn find_by_id(&self, id: &DishId) -> Result<Option<Dish>, DomainError> {
        let state = self.state.read().unwrap();
        Ok(state.dishes.iter().find(|d| d.id == *id).cloned())
    }

    async fn update(&self, dish: &Dish) -> Result<Dish, DomainError> {
        self.check_writable()?;
        let mut state = self.state.write().unwrap();
        let stored = state
            .dishes
            .iter_mut()
            .find(|d| d.id == dish.id)
            .ok_or(DomainError::DishNotFound(dish.id))?;
        // created_at is never rewritten by an update
        *stored = Dish {
            created_at: stored.created_at,
            ..dish.clone()
        };
        Ok(stored.clone())
    }

    async fn delete(&self, id: &DishId) -> Result<(), DomainError> {
        self.check_writable()?;
        let mut state = self.state.write().unwrap();
        let before = state.dishes.len();
        state.dishes.retain(|d| d.id != *id);
        if state.dishes.len() == before {
            return Err(DomainError::DishNotFound(*id));
        }
        Ok(())
    }

    async fn list(&self, limit: u64, offset: u64) -> Result<Vec<Dish>, DomainError> {
        let state = self.state.read().unwrap();
        Ok(newest_first(&state.dishes, |d| d.created_at, limit, offset))
    }
}

// ============================================================================
// In-Memory Promotion Repository
// ============================================================================

pub struct InMemoryPromotionRepository {
    state: Arc<RwLock<StoreState>>,
    calls: Arc<Calls>,
}

#[async_trait]
impl PromotionRepository for InMemoryPromotionRepository {
    async fn create(&self, promotion: &Promotion) -> Result<Promotion, DomainError> {
        let mut state = self.state.write().unwrap();
        state.promotions.push(promotion.clone());
        Ok(promotion.clone())
    }

    async fn find_by_id(&self, id: &PromotionId) -> Result<Option<Promotion>, DomainError> {
        let state = self.state.read().unwrap();
        Ok(state.promotions.iter().find(|p| p.id == *id).cloned())
    }

    async fn update(&self, promotion: &Promotion) -> Result<Promotion, DomainError> {
        self.calls.promotion_writes.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.write().unwrap();
        let stored = state
            .promotions
            .iter_mut()
            .find(|p| p.id == promotion.id)
            .ok_or(DomainError::PromotionNotFound(promotion.id))?;
        *stored = Promotion {
            created_at: stored.created_at,
            ..promotion.clone()
        };
        Ok(stored.clone())
    }

    async fn list(&self, limit: u64, offset: u64) -> Result<Vec<Promotion>, DomainError> {
        let state = self.state.read().unwrap();
        Ok(newest_first(&state.promotions, |p| p.created_at, limit, offset))
    }
}

// ============================================================================
// In-Memory Order Repository
// ============================================================================

pub struct InMemoryOrderRepository {
    state: Arc<RwLock<StoreState>>,
    faults: Arc<Faults>,
    calls: Arc<Calls>,
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn create(&self, order: &Order) -> Result<Order, DomainError> {
        let mut state = self.state.write().unwrap();
        if state.orders.contains_key(&order.id) {
            return Err(DomainError::Validation(format!(
                "Order {} is already registered",
                order.id
            )));
        }
        state.orders.insert(order.id, order.status);
        Ok(order.clone())
    }

    async fn get_status(&self, id: &OrderId) -> Result<Option<OrderStatus>, DomainError> {
        let state = self.state.read().unwrap();
        Ok(state.orders.get(id).copied())
    }

    async fn update_status(&self, id: &OrderId, status: OrderStatus) -> Result<(), DomainError> {
        self.calls.status_writes.fetch_add(1, Ordering::SeqCst);
        if self.faults.fail_status_writes.load(Ordering::SeqCst) {
            return Err(DomainError::Database("status write failed".to_string()));
        }
        let mut state = self.state.write().unwrap();
        match state.orders.get_mut(id) {
            Some(current) => {
                *current = status;
                Ok(())
            }
            None => Err(DomainError::OrderNotFound(*id)),
        }
    }
}

// ============================================================================
// In-Memory Transactor
// ============================================================================

pub struct InMemoryTransactor {
    store: InMemoryStore,
}

/// Repositories over a private, staged copy of the store
pub struct InMemoryScope {
    staged: Arc<RwLock<StoreState>>,
    dishes: InMemoryDishRepository,
    promotions: InMemoryPromotionRepository,
    orders: InMemoryOrderRepository,
}

impl MenuScope for InMemoryScope {
    fn dishes(&self) -> &dyn DishRepository {
        &self.dishes
    }

    fn promotions(&self) -> &dyn PromotionRepository {
        &self.promotions
    }
}

impl KitchenScope for InMemoryScope {
    fn orders(&self) -> &dyn OrderRepository {
        &self.orders
    }
}

#[async_trait]
impl Transactor for InMemoryTransactor {
    type Scope = InMemoryScope;

    async fn within_transaction<T, E, F>(&self, work: F) -> Result<T, E>
    where
        T: Send,
        E: From<DomainError> + Send,
        F: for<'s> FnOnce(&'s Self::Scope) -> UnitOfWork<'s, T, E> + Send,
    {
        let store = &self.store;
        store.calls.begins.fetch_add(1, Ordering::SeqCst);
        if store.faults.fail_begin.load(Ordering::SeqCst) {
            return Err(DomainError::Database("begin failed".to_string()).into());
        }

        let staged = Arc::new(RwLock::new(store.snapshot()));
        let scope = InMemoryScope {
            dishes: InMemoryDishRepository {
                state: staged.clone(),
                faults: store.faults.clone(),
            },
            promotions: InMemoryPromotionRepository {
                state: staged.clone(),
                calls: store.calls.clone(),
            },
            orders: InMemoryOrderRepository {
                state: staged.clone(),
                faults: store.faults.clone(),
                calls: store.calls.clone(),
            },
            staged,
        };

        match work(&scope).await {
            Ok(value) => {
                if store.faults.fail_commit.load(Ordering::SeqCst) {
                    store.calls.rollbacks.fetch_add(1, Ordering::SeqCst);
                    return Err(DomainError::Database("commit failed".to_string()).into());
                }
                let committed = scope.staged.read().unwrap().clone();
                *store.state.write().unwrap() = committed;
                store.calls.commits.fetch_add(1, Ordering::SeqCst);
                Ok(value)
            }
            Err(err) => {
                store.calls.rollbacks.fetch_add(1, Ordering::SeqCst);
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_dish;

    #[tokio::test]
    async fn rollback_discards_staged_writes() {
        let store = InMemoryStore::new();
        let transactor = store.transactor();
        let dish = test_dish();

        let result = transactor
            .within_transaction::<(), DomainError, _>(move |scope| {
                Box::pin(async move {
                    scope.dishes().create(&dish).await?;
                    Err(DomainError::Validation("abort".to_string()))
                })
            })
            .await;

        assert!(matches!(result, Err(DomainError::Validation(msg)) if msg == "abort"));
        assert!(store.snapshot().dishes.is_empty());
        assert_eq!(store.rollbacks(), 1);
        assert_eq!(store.commits(), 0);
    }

    #[tokio::test]
    async fn commit_publishes_staged_writes() {
        let store = InMemoryStore::new();
        let transactor = store.transactor();
        let dish = test_dish();
        let id = dish.id;

        transactor
            .within_transaction::<_, DomainError, _>(move |scope| {
                Box::pin(async move { scope.dishes().create(&dish).await })
            })
            .await
            .unwrap();

        assert_eq!(store.snapshot().dishes.len(), 1);
        assert_eq!(store.snapshot().dishes[0].id, id);
    }

    #[tokio::test]
    async fn order_create_rejects_known_id() {
        let store = InMemoryStore::new();
        let repo = store.order_repo();
        let order = crate::test_utils::test_order();

        repo.create(&order).await.unwrap();
        let result = repo.create(&order).await;

        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert_eq!(store.order_status(&order.id), Some(OrderStatus::Created));
    }

    #[tokio::test]
    async fn staged_writes_are_invisible_until_commit() {
        let store = InMemoryStore::new();
        let transactor = store.transactor();
        let outside = store.dish_repo();
        let dish = test_dish();
        let id = dish.id;

        let seen_outside = transactor
            .within_transaction::<_, DomainError, _>(move |scope| {
                Box::pin(async move {
                    scope.dishes().create(&dish).await?;
                    outside.find_by_id(&id).await
                })
            })
            .await
            .unwrap();

        assert!(seen_outside.is_none());
        assert!(store.dish_repo().find_by_id(&id).await.unwrap().is_some());
    }
}
