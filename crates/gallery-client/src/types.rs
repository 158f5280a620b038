//! Wire types that only the client needs.
//!
//! Domain records and request bodies come from `gallery_core`.

use serde::{Deserialize, Serialize};

pub use gallery_core::{
    AdminOrder, CreateOrderRequest, OrderCreated, OrderFormOptions, OrderId, OrderStatus,
    OrderWithItems, Painting, PaintingId, PaintingInput, PaintingStatus, PlaceOrderRequest, UserId,
    UserOrder,
};

/// Error body returned by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    /// Human-readable message.
    pub error: String,
    /// Machine-readable code.
    pub code: String,
    /// Extra context, if any.
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}

/// Confirmation body for mutations that return no record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable confirmation.
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service name.
    pub service: String,
    /// Service version.
    pub version: String,
    /// Database reachability.
    pub database: String,
}
