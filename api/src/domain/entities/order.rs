//! Order domain entity
//!
//! The kitchen's view of an order: an identity and where it sits in the
//! preparation lifecycle `created -> preparing -> delivering`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(pub Uuid);

impl OrderId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for OrderId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for OrderId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Order status as tracked by the kitchen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Created,
    Preparing,
    Delivering,
}

impl OrderStatus {
    /// The only status an order may be in right before entering `self`
    pub fn predecessor(self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Created => None,
            OrderStatus::Preparing => Some(OrderStatus::Created),
            OrderStatus::Delivering => Some(OrderStatus::Preparing),
        }
    }

    /// Whether an order in `self` may advance to `next`
    pub fn can_advance_to(self, next: OrderStatus) -> bool {
        next.predecessor() == Some(self)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Created => write!(f, "created"),
            OrderStatus::Preparing => write!(f, "preparing"),
            OrderStatus::Delivering => write!(f, "delivering"),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "created" => Ok(OrderStatus::Created),
            "preparing" => Ok(OrderStatus::Preparing),
            "delivering" => Ok(OrderStatus::Delivering),
            _ => Err(format!("Unknown order status: {}", s)),
        }
    }
}

/// An order known to the kitchen
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    pub id: OrderId,
    pub status: OrderStatus,
}

impl Order {
    /// A freshly accepted order
    pub fn accepted(id: OrderId) -> Self {
        Self {
            id,
            status: OrderStatus::Created,
        }
    }
}
