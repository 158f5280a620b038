//! Database schema definitions.
//!
//! The DDL lives in `migrations/` and is embedded into the binary at compile
//! time. Table names are shared with the in-memory backend so constraint
//! errors read the same regardless of backend.

use sqlx::migrate::Migrator;

/// Table names for the gallery database.
pub mod table {
    /// Customers, keyed by `user_id`.
    pub const USERS: &str = "users";

    /// Catalog paintings, keyed by `painting_id`.
    pub const PAINTINGS: &str = "paintings";

    /// Orders, keyed by `order_id`.
    pub const ORDERS: &str = "orders";

    /// Order lines, keyed by `order_item_id`.
    pub const ORDER_ITEMS: &str = "order_items";
}

/// Embedded migrations creating every table.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

