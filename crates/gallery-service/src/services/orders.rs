//! Order placement and order listings.

use std::sync::Arc;

use gallery_core::{
    AdminOrder, CreateOrderRequest, OrderFormOptions, OrderId, OrderStatus, OrderWithItems,
    PaintingId, PaintingOption, UserId, UserOption, UserOrder, CHECKOUT_ITEM_QUANTITY,
};
use gallery_store::Store;

use crate::error::ApiError;

/// Order workflows.
#[derive(Clone)]
pub struct OrderService {
    store: Arc<dyn Store>,
}

impl OrderService {
    /// Create an order service over a store.
    #[must_use]
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Check out a list of paintings as one order.
    ///
    /// Each painting is marked sold and recorded as a single-unit line. The
    /// whole order is written in one transaction: if any painting is missing
    /// or already sold nothing is persisted.
    ///
    /// # Errors
    ///
    /// - `ApiError::NotFound` if a painting doesn't exist.
    /// - `ApiError::PaintingUnavailable` if a painting was already sold.
    /// - `ApiError::Internal` if the user doesn't exist or the store fails.
    pub async fn place_order(
        &self,
        user_id: UserId,
        painting_ids: &[PaintingId],
    ) -> Result<OrderId, ApiError> {
        let mut tx = self.store.begin().await?;
        let order_id = tx.insert_order(user_id, OrderStatus::Processing).await?;

        for &painting_id in painting_ids {
            tx.mark_painting_sold(painting_id).await?;
            tx.insert_order_item(order_id, painting_id, CHECKOUT_ITEM_QUANTITY)
                .await?;
        }

        tx.commit().await?;

        tracing::info!(
            order_id = %order_id,
            user_id = %user_id,
            item_count = painting_ids.len(),
            "Order placed"
        );

        Ok(order_id)
    }

    /// Record a single-line order without touching painting availability.
    ///
    /// # Errors
    ///
    /// - `ApiError::BadRequest` if the quantity is below 1.
    /// - `ApiError::Internal` if the user or painting doesn't exist.
    pub async fn create_order(&self, request: &CreateOrderRequest) -> Result<OrderId, ApiError> {
        let quantity = request.quantity.unwrap_or(CHECKOUT_ITEM_QUANTITY);
        if quantity < 1 {
            return Err(ApiError::BadRequest(format!(
                "quantity must be at least 1, got {quantity}"
            )));
        }
        let status = request.status.unwrap_or_default();

        let mut tx = self.store.begin().await?;
        let order_id = tx.insert_order(request.user_id, status).await?;
        tx.insert_order_item(order_id, request.painting_id, quantity)
            .await?;
        tx.commit().await?;

        tracing::info!(
            order_id = %order_id,
            user_id = %request.user_id,
            painting_id = %request.painting_id,
            quantity,
            "Order created"
        );

        Ok(order_id)
    }

    /// A user's order history, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store query fails.
    pub async fn list_orders_for_user(&self, user_id: UserId) -> Result<Vec<UserOrder>, ApiError> {
        Ok(self.store.list_orders_for_user(user_id).await?)
    }

    /// Every order with its customer, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store query fails.
    pub async fn list_all_orders(&self) -> Result<Vec<AdminOrder>, ApiError> {
        Ok(self.store.list_all_orders().await?)
    }

    /// Every order with nested painting summaries, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store query fails.
    pub async fn list_orders_with_items(&self) -> Result<Vec<OrderWithItems>, ApiError> {
        Ok(self.store.list_orders_with_items().await?)
    }

    /// Users and paintings for the order form, fetched concurrently.
    ///
    /// # Errors
    ///
    /// Returns an error if either query fails.
    pub async fn order_form_options(&self) -> Result<OrderFormOptions, ApiError> {
        let (users, paintings) =
            tokio::try_join!(self.store.list_users(), self.store.list_paintings())?;

        Ok(OrderFormOptions {
            users: users.iter().map(UserOption::from).collect(),
            paintings: paintings.iter().map(PaintingOption::from).collect(),
        })
    }
}
