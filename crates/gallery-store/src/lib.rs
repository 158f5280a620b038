//! Storage layer for the online gallery.
//!
//! This crate provides persistent storage for users, paintings, orders and
//! order items behind the [`Store`] trait, with two backends:
//!
//! - [`PgStore`]: PostgreSQL via `sqlx`, with embedded migrations
//! - [`MemoryStore`]: an in-process backend for tests and local runs
//!
//! # Transactions
//!
//! Multi-row writes go through an [`OrderTransaction`] obtained from
//! [`Store::begin`]. Nothing written through the handle is visible until
//! [`OrderTransaction::commit`] succeeds; dropping the handle rolls back.
//!
//! # Example
//!
//! ```no_run
//! use gallery_core::OrderStatus;
//! use gallery_store::{MemoryStore, Store};
//!
//! # async fn example() -> gallery_store::Result<()> {
//! let store = MemoryStore::new();
//! let user = store.add_user("Ada Lovelace", "ada@example.com").await;
//!
//! let mut tx = store.begin().await?;
//! let _order_id = tx.insert_order(user.user_id, OrderStatus::Processing).await?;
//! tx.commit().await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod memory;
pub mod postgres;
pub mod schema;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use postgres::PgStore;

use async_trait::async_trait;
use gallery_core::{
    AdminOrder, OrderId, OrderStatus, OrderWithItems, Painting, PaintingId, PaintingInput, User,
    UserId, UserOrder,
};

/// The storage trait defining all database operations.
///
/// Services hold an `Arc<dyn Store>` so they can be exercised against
/// [`MemoryStore`] in tests and [`PgStore`] in production.
#[async_trait]
pub trait Store: Send + Sync {
    /// Check that the backend is reachable.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried.
    async fn ping(&self) -> Result<()>;

    // =========================================================================
    // Users
    // =========================================================================

    /// List every user, ordered by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn list_users(&self) -> Result<Vec<User>>;

    // =========================================================================
    // Paintings
    // =========================================================================

    /// List every painting, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn list_paintings(&self) -> Result<Vec<Painting>>;

    /// Get a painting by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn get_painting(&self, painting_id: PaintingId) -> Result<Option<Painting>>;

    /// Insert a painting stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Constraint` if the row violates a table constraint.
    async fn create_painting(&self, input: &PaintingInput) -> Result<Painting>;

    /// Overwrite every writable field of a painting.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the painting doesn't exist.
    async fn update_painting(
        &self,
        painting_id: PaintingId,
        input: &PaintingInput,
    ) -> Result<Painting>;

    /// Delete a painting.
    ///
    /// # Errors
    ///
    /// - `StoreError::NotFound` if the painting doesn't exist.
    /// - `StoreError::Constraint` if an order item still references it.
    async fn delete_painting(&self, painting_id: PaintingId) -> Result<()>;

    // =========================================================================
    // Orders
    // =========================================================================

    /// Open a transaction for writing an order and its items.
    ///
    /// # Errors
    ///
    /// Returns an error if a connection or transaction cannot be acquired.
    async fn begin(&self) -> Result<Box<dyn OrderTransaction>>;

    /// List a user's orders with their paintings, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn list_orders_for_user(&self, user_id: UserId) -> Result<Vec<UserOrder>>;

    /// List every order with its customer and lines, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn list_all_orders(&self) -> Result<Vec<AdminOrder>>;

    /// List every order with nested painting summaries, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn list_orders_with_items(&self) -> Result<Vec<OrderWithItems>>;
}

/// A scoped write transaction over the order tables.
///
/// Writes become visible only after [`commit`](Self::commit). Dropping the
/// handle without committing discards every write made through it.
#[async_trait]
pub trait OrderTransaction: Send {
    /// Insert an order row stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Constraint` if the user doesn't exist.
    async fn insert_order(&mut self, user_id: UserId, status: OrderStatus) -> Result<OrderId>;

    /// Mark a painting sold, only if it is currently available.
    ///
    /// # Errors
    ///
    /// - `StoreError::NotFound` if the painting doesn't exist.
    /// - `StoreError::PaintingUnavailable` if it was already sold.
    async fn mark_painting_sold(&mut self, painting_id: PaintingId) -> Result<()>;

    /// Insert an order line.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Constraint` if the order or painting doesn't exist
    /// or the quantity is not positive.
    async fn insert_order_item(
        &mut self,
        order_id: OrderId,
        painting_id: PaintingId,
        quantity: i32,
    ) -> Result<()>;

    /// Persist every write made through this handle.
    ///
    /// # Errors
    ///
    /// Returns an error if the commit fails; nothing is persisted in that case.
    async fn commit(self: Box<Self>) -> Result<()>;
}
