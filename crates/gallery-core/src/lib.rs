//! Core types for the online gallery storefront.
//!
//! This crate provides the foundational types shared by the store, the HTTP
//! service and the client:
//!
//! - **Identifiers**: `UserId`, `PaintingId`, `OrderId`
//! - **Catalog**: `Painting`, `PaintingInput`, `PaintingStatus`
//! - **Customers**: `User`
//! - **Orders**: `Order`, `OrderItem`, `OrderStatus`
//! - **Requests**: `PlaceOrderRequest`, `CreateOrderRequest`, `OrderCreated`
//! - **Listings**: `UserOrder`, `AdminOrder`, `OrderWithItems`, `OrderFormOptions`
//!
//! # Prices
//!
//! Prices are `rust_decimal::Decimal` and map to `NUMERIC(12, 2)` in
//! PostgreSQL. On the wire they serialize as strings (`"100.00"`) and accept
//! either strings or JSON numbers on input.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod ids;
pub mod order;
pub mod painting;
pub mod user;

pub use error::StatusError;
pub use ids::{OrderId, PaintingId, UserId};
pub use order::{
    AdminOrder, AdminOrderItem, CreateOrderRequest, NestedOrderItem, Order, OrderCreated,
    OrderFormOptions, OrderItem, OrderStatus, OrderWithItems, PaintingSummary, PlaceOrderRequest,
    UserOrder, UserOrderItem, CHECKOUT_ITEM_QUANTITY,
};
pub use painting::{Painting, PaintingInput, PaintingOption, PaintingStatus};
pub use user::{User, UserOption};
