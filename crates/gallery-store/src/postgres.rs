//! PostgreSQL storage implementation.
//!
//! This module provides the `PgStore` implementation of the `Store` trait.
//! Listings are read as one flat `LEFT JOIN` per view and folded into nested
//! groups here, so orders without items still appear with an empty list.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions, PgRow};
use sqlx::{Postgres, Row, Transaction};

use gallery_core::{
    AdminOrder, AdminOrderItem, NestedOrderItem, OrderId, OrderStatus, OrderWithItems, Painting,
    PaintingId, PaintingInput, PaintingStatus, PaintingSummary, StatusError, User, UserId,
    UserOrder, UserOrderItem,
};

use crate::error::{Result, StoreError};
use crate::schema::MIGRATOR;
use crate::{OrderTransaction, Store};

/// PostgreSQL-backed storage implementation.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Open a connection pool.
    ///
    /// # Errors
    ///
    /// Returns an error if the first connection cannot be established.
    pub async fn connect(
        options: PgConnectOptions,
        max_connections: u32,
        acquire_timeout: Duration,
    ) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(acquire_timeout)
            .connect_with(options)
            .await?;

        tracing::info!(max_connections, "PostgreSQL connection pool established");
        Ok(Self { pool })
    }

    /// Apply the embedded migrations.
    ///
    /// # Errors
    ///
    /// Returns an error if a migration fails to apply.
    pub async fn migrate(&self) -> Result<()> {
        MIGRATOR.run(&self.pool).await?;
        tracing::info!("Database migrations applied");
        Ok(())
    }

    /// Get a reference to the connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    // =========================================================================
    // Users
    // =========================================================================

    async fn list_users(&self) -> Result<Vec<User>> {
        let rows = sqlx::query("SELECT user_id, full_name, email FROM users ORDER BY user_id")
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(|r| -> Result<User> {
                Ok(User {
                    user_id: UserId::new(r.try_get("user_id")?),
                    full_name: r.try_get("full_name")?,
                    email: r.try_get("email")?,
                })
            })
            .collect()
    }

    // =========================================================================
    // Paintings
    // =========================================================================

    async fn list_paintings(&self) -> Result<Vec<Painting>> {
        let rows = sqlx::query(
            r"SELECT painting_id, title, artist, price, image_url, status, created_at
              FROM paintings
              ORDER BY created_at DESC, painting_id DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(painting_from_row).collect()
    }

    async fn get_painting(&self, painting_id: PaintingId) -> Result<Option<Painting>> {
        let row = sqlx::query(
            r"SELECT painting_id, title, artist, price, image_url, status, created_at
              FROM paintings WHERE painting_id = $1",
        )
        .bind(painting_id.get())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(painting_from_row).transpose()
    }

    async fn create_painting(&self, input: &PaintingInput) -> Result<Painting> {
        let row = sqlx::query(
            r"INSERT INTO paintings (title, artist, price, image_url, status, created_at)
              VALUES ($1, $2, $3, $4, $5, NOW())
              RETURNING painting_id, title, artist, price, image_url, status, created_at",
        )
        .bind(input.title.as_str())
        .bind(input.artist.as_str())
        .bind(input.price)
        .bind(input.image_url.as_str())
        .bind(input.status.as_str())
        .fetch_one(&self.pool)
        .await?;

        painting_from_row(&row)
    }

    async fn update_painting(
        &self,
        painting_id: PaintingId,
        input: &PaintingInput,
    ) -> Result<Painting> {
        let row = sqlx::query(
            r"UPDATE paintings
              SET title = $1, artist = $2, price = $3, image_url = $4, status = $5
              WHERE painting_id = $6
              RETURNING painting_id, title, artist, price, image_url, status, created_at",
        )
        .bind(input.title.as_str())
        .bind(input.artist.as_str())
        .bind(input.price)
        .bind(input.image_url.as_str())
        .bind(input.status.as_str())
        .bind(painting_id.get())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| StoreError::painting_not_found(painting_id))?;

        painting_from_row(&row)
    }

    async fn delete_painting(&self, painting_id: PaintingId) -> Result<()> {
        let result = sqlx::query("DELETE FROM paintings WHERE painting_id = $1")
            .bind(painting_id.get())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::painting_not_found(painting_id));
        }

        Ok(())
    }

    // =========================================================================
    // Orders
    // =========================================================================

    async fn begin(&self) -> Result<Box<dyn OrderTransaction>> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgOrderTransaction { tx }))
    }

    async fn list_orders_for_user(&self, user_id: UserId) -> Result<Vec<UserOrder>> {
        let rows = sqlx::query(
            r"SELECT o.order_id, o.status, o.created_at,
                     oi.order_item_id, p.title, p.artist, p.price,
                     p.status AS painting_status
              FROM orders o
              LEFT JOIN order_items oi ON oi.order_id = o.order_id
              LEFT JOIN paintings p ON p.painting_id = oi.painting_id
              WHERE o.user_id = $1
              ORDER BY o.created_at DESC, o.order_id DESC, oi.order_item_id",
        )
        .bind(user_id.get())
        .fetch_all(&self.pool)
        .await?;

        group_rows(
            &rows,
            |r| {
                Ok(UserOrder {
                    order_id: OrderId::new(r.try_get("order_id")?),
                    status: parse_column(r, "status")?,
                    created_at: r.try_get("created_at")?,
                    items: Vec::new(),
                })
            },
            |r| {
                Ok(UserOrderItem {
                    title: r.try_get("title")?,
                    artist: r.try_get("artist")?,
                    price: r.try_get("price")?,
                    status: parse_column(r, "painting_status")?,
                })
            },
        )
    }

    async fn list_all_orders(&self) -> Result<Vec<AdminOrder>> {
        let rows = sqlx::query(
            r"SELECT o.order_id, o.status, o.created_at,
                     u.full_name AS customer_name, u.email,
                     oi.order_item_id, oi.quantity,
                     p.title, p.artist, p.price, p.image_url
              FROM orders o
              JOIN users u ON u.user_id = o.user_id
              LEFT JOIN order_items oi ON oi.order_id = o.order_id
              LEFT JOIN paintings p ON p.painting_id = oi.painting_id
              ORDER BY o.created_at DESC, o.order_id DESC, oi.order_item_id",
        )
        .fetch_all(&self.pool)
        .await?;

        group_rows(
            &rows,
            |r| {
                Ok(AdminOrder {
                    order_id: OrderId::new(r.try_get("order_id")?),
                    status: parse_column(r, "status")?,
                    created_at: r.try_get("created_at")?,
                    customer_name: r.try_get("customer_name")?,
                    email: r.try_get("email")?,
                    items: Vec::new(),
                })
            },
            |r| {
                Ok(AdminOrderItem {
                    title: r.try_get("title")?,
                    artist: r.try_get("artist")?,
                    price: r.try_get("price")?,
                    image_url: r.try_get("image_url")?,
                    quantity: r.try_get("quantity")?,
                })
            },
        )
    }

    async fn list_orders_with_items(&self) -> Result<Vec<OrderWithItems>> {
        let rows = sqlx::query(
            r"SELECT o.order_id, o.status, o.created_at,
                     oi.order_item_id, p.title, p.image_url
              FROM orders o
              LEFT JOIN order_items oi ON oi.order_id = o.order_id
              LEFT JOIN paintings p ON p.painting_id = oi.painting_id
              ORDER BY o.created_at DESC, o.order_id DESC, oi.order_item_id",
        )
        .fetch_all(&self.pool)
        .await?;

        group_rows(
            &rows,
            |r| {
                Ok(OrderWithItems {
                    order_id: OrderId::new(r.try_get("order_id")?),
                    status: parse_column(r, "status")?,
                    created_at: r.try_get("created_at")?,
                    order_items: Vec::new(),
                })
            },
            |r| {
                Ok(NestedOrderItem {
                    painting: PaintingSummary {
                        title: r.try_get("title")?,
                        image_url: r.try_get("image_url")?,
                    },
                })
            },
        )
    }
}

/// A transaction on a pooled connection. Dropping it rolls back.
struct PgOrderTransaction {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl OrderTransaction for PgOrderTransaction {
    async fn insert_order(&mut self, user_id: UserId, status: OrderStatus) -> Result<OrderId> {
        let order_id: i64 = sqlx::query_scalar(
            r"INSERT INTO orders (user_id, status, created_at)
              VALUES ($1, $2, NOW()) RETURNING order_id",
        )
        .bind(user_id.get())
        .bind(status.as_str())
        .fetch_one(&mut *self.tx)
        .await?;

        Ok(OrderId::new(order_id))
    }

    async fn mark_painting_sold(&mut self, painting_id: PaintingId) -> Result<()> {
        let result = sqlx::query(
            r"UPDATE paintings SET status = $1
              WHERE painting_id = $2 AND status = $3",
        )
        .bind(PaintingStatus::Sold.as_str())
        .bind(painting_id.get())
        .bind(PaintingStatus::Available.as_str())
        .execute(&mut *self.tx)
        .await?;

        if result.rows_affected() > 0 {
            return Ok(());
        }

        // Zero rows: tell a missing painting apart from a sold one.
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM paintings WHERE painting_id = $1)")
                .bind(painting_id.get())
                .fetch_one(&mut *self.tx)
                .await?;

        if exists {
            Err(StoreError::PaintingUnavailable { painting_id })
        } else {
            Err(StoreError::painting_not_found(painting_id))
        }
    }

    async fn insert_order_item(
        &mut self,
        order_id: OrderId,
        painting_id: PaintingId,
        quantity: i32,
    ) -> Result<()> {
        sqlx::query(
            r"INSERT INTO order_items (order_id, painting_id, quantity)
              VALUES ($1, $2, $3)",
        )
        .bind(order_id.get())
        .bind(painting_id.get())
        .bind(quantity)
        .execute(&mut *self.tx)
        .await?;

        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        self.tx.commit().await?;
        Ok(())
    }
}

// =============================================================================
// Row Mapping
// =============================================================================

fn painting_from_row(r: &PgRow) -> Result<Painting> {
    Ok(Painting {
        painting_id: PaintingId::new(r.try_get("painting_id")?),
        title: r.try_get("title")?,
        artist: r.try_get("artist")?,
        price: r.try_get("price")?,
        image_url: r.try_get("image_url")?,
        status: parse_column(r, "status")?,
        created_at: r.try_get("created_at")?,
    })
}

/// Decode a text status column into its enum.
fn parse_column<T>(r: &PgRow, column: &str) -> Result<T>
where
    T: FromStr<Err = StatusError>,
{
    let raw: String = r.try_get(column)?;
    raw.parse()
        .map_err(|e: StatusError| StoreError::Database(format!("column {column}: {e}")))
}

/// A listing view that owns a list of item rows.
trait OrderGroup {
    type Item;

    fn order_id(&self) -> OrderId;

    fn items_mut(&mut self) -> &mut Vec<Self::Item>;
}

impl OrderGroup for UserOrder {
    type Item = UserOrderItem;

    fn order_id(&self) -> OrderId {
        self.order_id
    }

    fn items_mut(&mut self) -> &mut Vec<Self::Item> {
        &mut self.items
    }
}

impl OrderGroup for AdminOrder {
    type Item = AdminOrderItem;

    fn order_id(&self) -> OrderId {
        self.order_id
    }

    fn items_mut(&mut self) -> &mut Vec<Self::Item> {
        &mut self.items
    }
}

impl OrderGroup for OrderWithItems {
    type Item = NestedOrderItem;

    fn order_id(&self) -> OrderId {
        self.order_id
    }

    fn items_mut(&mut self) -> &mut Vec<Self::Item> {
        &mut self.order_items
    }
}

/// Fold flat join rows (sorted by order) into one group per order.
///
/// A row with a NULL `order_item_id` comes from an order without items and
/// contributes only the group header.
fn group_rows<G, H, I>(rows: &[PgRow], header: H, item: I) -> Result<Vec<G>>
where
    G: OrderGroup,
    H: Fn(&PgRow) -> Result<G>,
    I: Fn(&PgRow) -> Result<G::Item>,
{
    let mut groups: Vec<G> = Vec::new();

    for row in rows {
        let order_id = OrderId::new(row.try_get("order_id")?);
        if groups.last().map(OrderGroup::order_id) != Some(order_id) {
            groups.push(header(row)?);
        }

        let has_item = row.try_get::<Option<i64>, _>("order_item_id")?.is_some();
        if let (true, Some(group)) = (has_item, groups.last_mut()) {
            group.items_mut().push(item(row)?);
        }
    }

    Ok(groups)
}
