use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single line item within an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    /// Referenced product
    pub product_id: Uuid,
    /// Quantity purchased
    pub quantity: i32,
}

/// Order entity - a purchase record stored in MongoDB.
///
/// Orders are created by an external checkout flow, so fields written by
/// older versions of that flow may be missing; deserialization is lenient
/// where the data allows it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    /// Purchasing user, when the writer recorded one
    #[serde(default)]
    pub user_id: Option<Uuid>,
    /// Order total
    pub total: f64,
    /// Line items
    #[serde(default)]
    pub items: Vec<OrderItem>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Build an order from its parts, stamping the current time.
    pub fn new(user_id: Option<Uuid>, total: f64, items: Vec<OrderItem>) -> Self {
        Self {
            id: Uuid::now_v7(),
            user_id,
            total,
            items,
            created_at: Utc::now(),
        }
    }
}
