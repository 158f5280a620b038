//! Order types and the listing views built from them.
//!
//! Orders are stored as one `orders` row plus one `order_items` row per
//! painting. The three listing views below are the shapes the storefront
//! renders; each groups item rows under their order, newest order first.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::StatusError;
use crate::{OrderId, PaintingId, PaintingOption, PaintingStatus, UserId, UserOption};

/// Quantity recorded for every item placed through the multi-painting
/// checkout. Each painting is a single original.
pub const CHECKOUT_ITEM_QUANTITY: i32 = 1;

/// Fulfilment status of an order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum OrderStatus {
    /// Placed, not yet shipped.
    #[default]
    Processing,

    /// Handed to the carrier.
    Shipped,
}

impl OrderStatus {
    /// The stored, lower-case form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Processing => "processing",
            Self::Shipped => "shipped",
        }
    }
}

impl FromStr for OrderStatus {
    type Err = StatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "processing" => Ok(Self::Processing),
            "shipped" => Ok(Self::Shipped),
            _ => Err(StatusError {
                kind: "order",
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for OrderStatus {
    type Error = StatusError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An order row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Primary key.
    pub order_id: OrderId,
    /// The purchasing customer.
    pub user_id: UserId,
    /// Fulfilment status.
    pub status: OrderStatus,
    /// Creation time, the listing sort key.
    pub created_at: DateTime<Utc>,
}

/// An order line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Owning order.
    pub order_id: OrderId,
    /// Purchased painting.
    pub painting_id: PaintingId,
    /// Number of units, always positive.
    pub quantity: i32,
}

// ============================================================================
// Requests
// ============================================================================

/// Checkout request: one order for several paintings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceOrderRequest {
    /// The purchasing user.
    pub user_id: UserId,
    /// Paintings to buy, in order. May be empty.
    pub painting_ids: Vec<PaintingId>,
}

/// Admin request: one order with a single line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    /// The ordering user.
    pub user_id: UserId,
    /// The ordered painting.
    pub painting_id: PaintingId,
    /// Units ordered. Defaults to 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i32>,
    /// Initial status. Defaults to processing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
}

/// Body returned when an order is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCreated {
    /// Human-readable confirmation.
    pub message: String,
    /// Key of the new order.
    pub order_id: OrderId,
}

// ============================================================================
// Listing Views
// ============================================================================

/// One item in a customer's order history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserOrderItem {
    /// Painting title.
    pub title: String,
    /// Painting artist.
    pub artist: String,
    /// Current painting price.
    pub price: Decimal,
    /// Current painting status.
    pub status: PaintingStatus,
}

/// An order in a customer's order history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserOrder {
    /// Order key.
    pub order_id: OrderId,
    /// Fulfilment status.
    pub status: OrderStatus,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Purchased paintings, in insertion order.
    pub items: Vec<UserOrderItem>,
}

/// One item in the admin order listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminOrderItem {
    /// Painting title.
    pub title: String,
    /// Painting artist.
    pub artist: String,
    /// Current painting price.
    pub price: Decimal,
    /// Painting image.
    pub image_url: String,
    /// Units ordered.
    pub quantity: i32,
}

/// An order in the admin listing, annotated with its customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminOrder {
    /// Order key.
    pub order_id: OrderId,
    /// Fulfilment status.
    pub status: OrderStatus,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Customer full name.
    pub customer_name: String,
    /// Customer email.
    pub email: String,
    /// Order lines, in insertion order.
    pub items: Vec<AdminOrderItem>,
}

/// The painting fields shown on the order page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaintingSummary {
    /// Painting title.
    pub title: String,
    /// Painting image.
    pub image_url: String,
}

/// An order line on the order page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NestedOrderItem {
    /// The referenced painting.
    pub painting: PaintingSummary,
}

/// An order on the order page. Orders without lines carry an empty list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderWithItems {
    /// Order key.
    pub order_id: OrderId,
    /// Fulfilment status.
    pub status: OrderStatus,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Order lines, in insertion order.
    pub order_items: Vec<NestedOrderItem>,
}

/// Dropdown data for the order form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderFormOptions {
    /// Selectable customers.
    pub users: Vec<UserOption>,
    /// Selectable paintings.
    pub paintings: Vec<PaintingOption>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_status_defaults_to_processing() {
        assert_eq!(OrderStatus::default(), OrderStatus::Processing);
    }

    #[test]
    fn order_status_parsing_is_lenient() {
        assert_eq!("Shipped ".parse::<OrderStatus>(), Ok(OrderStatus::Shipped));

        let err = "lost".parse::<OrderStatus>().unwrap_err();
        assert_eq!(err.kind, "order");
        assert_eq!(err.to_string(), "invalid order status: \"lost\"");
    }

    #[test]
    fn nested_listing_serializes_empty_items() {
        let order = OrderWithItems {
            order_id: OrderId::new(1),
            status: OrderStatus::Processing,
            created_at: Utc::now(),
            order_items: Vec::new(),
        };

        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["order_items"], serde_json::json!([]));
        assert_eq!(json["status"], "processing");
    }

    #[test]
    fn create_order_request_defaults_optional_fields() {
        let req: CreateOrderRequest =
            serde_json::from_str(r#"{"user_id": 2, "painting_id": 5}"#).unwrap();

        assert_eq!(req.user_id, UserId::new(2));
        assert_eq!(req.painting_id, PaintingId::new(5));
        assert_eq!(req.quantity, None);
        assert_eq!(req.status, None);
    }

    #[test]
    fn create_order_request_accepts_mixed_case_status() {
        let req: CreateOrderRequest = serde_json::from_str(
            r#"{"user_id": 2, "painting_id": 5, "quantity": 3, "status": " SHIPPED"}"#,
        )
        .unwrap();

        assert_eq!(req.quantity, Some(3));
        assert_eq!(req.status, Some(OrderStatus::Shipped));
    }
}
