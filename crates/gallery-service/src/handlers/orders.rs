//! Order handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use gallery_core::{
    AdminOrder, CreateOrderRequest, OrderCreated, OrderFormOptions, OrderWithItems,
    PlaceOrderRequest, UserId, UserOrder,
};

use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath};
use crate::state::AppState;

/// Check out a list of paintings.
pub async fn place_order(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<PlaceOrderRequest>,
) -> Result<(StatusCode, Json<OrderCreated>), ApiError> {
    let order_id = state
        .orders
        .place_order(body.user_id, &body.painting_ids)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(OrderCreated {
            message: "Order placed successfully".to_string(),
            order_id,
        }),
    ))
}

/// A user's order history.
pub async fn list_user_orders(
    State(state): State<Arc<AppState>>,
    ApiPath(user_id): ApiPath<UserId>,
) -> Result<Json<Vec<UserOrder>>, ApiError> {
    Ok(Json(state.orders.list_orders_for_user(user_id).await?))
}

/// Every order with its customer.
pub async fn list_all_orders(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<AdminOrder>>, ApiError> {
    Ok(Json(state.orders.list_all_orders().await?))
}

/// Every order with nested painting summaries.
pub async fn list_orders_with_items(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<OrderWithItems>>, ApiError> {
    Ok(Json(state.orders.list_orders_with_items().await?))
}

/// Record a single-line order.
pub async fn create_order(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderCreated>), ApiError> {
    let order_id = state.orders.create_order(&body).await?;

    Ok((
        StatusCode::CREATED,
        Json(OrderCreated {
            message: "Order created".to_string(),
            order_id,
        }),
    ))
}

/// Dropdown data for the order form.
pub async fn order_form_options(
    State(state): State<Arc<AppState>>,
) -> Result<Json<OrderFormOptions>, ApiError> {
    Ok(Json(state.orders.order_form_options().await?))
}
