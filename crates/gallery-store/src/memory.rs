//! In-memory storage implementation.
//!
//! `MemoryStore` keeps every table in a single `Tables` value behind an async
//! mutex. A transaction takes the lock for its whole lifetime and writes to a
//! private copy; `commit` swaps the copy in. Foreign-key and check
//! constraints from the SQL schema are enforced so both backends fail the
//! same way.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use tokio::sync::{Mutex, OwnedMutexGuard};

use gallery_core::{
    AdminOrder, AdminOrderItem, NestedOrderItem, Order, OrderId, OrderItem, OrderStatus,
    OrderWithItems, Painting, PaintingId, PaintingInput, PaintingStatus, PaintingSummary, User,
    UserId, UserOrder, UserOrderItem,
};

use crate::error::{Result, StoreError};
use crate::schema::table;
use crate::{OrderTransaction, Store};

/// Every table plus the serial counters.
#[derive(Debug, Clone, Default)]
struct Tables {
    users: BTreeMap<UserId, User>,
    paintings: BTreeMap<PaintingId, Painting>,
    orders: BTreeMap<OrderId, Order>,
    /// Kept in insertion order, mirroring `order_item_id`.
    order_items: Vec<OrderItem>,
    last_user_id: i64,
    last_painting_id: i64,
    last_order_id: i64,
}

impl Tables {
    /// Orders sorted newest first, ties broken by id.
    fn orders_newest_first(&self) -> Vec<&Order> {
        let mut orders: Vec<&Order> = self.orders.values().collect();
        orders.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then(b.order_id.cmp(&a.order_id))
        });
        orders
    }

    /// Each item of an order joined with its painting.
    fn items_of(&self, order_id: OrderId) -> impl Iterator<Item = (&OrderItem, &Painting)> {
        self.order_items
            .iter()
            .filter(move |item| item.order_id == order_id)
            .filter_map(move |item| {
                self.paintings
                    .get(&item.painting_id)
                    .map(|painting| (item, painting))
            })
    }
}

fn check_price(price: Decimal) -> Result<()> {
    if price.is_sign_negative() {
        return Err(StoreError::Constraint(format!(
            "new row for relation \"{}\" violates check constraint \"paintings_price_check\"",
            table::PAINTINGS
        )));
    }
    Ok(())
}

/// In-process storage backend.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a user. Users are provisioned outside the service, so this is
    /// how tests and local runs seed them.
    pub async fn add_user(&self, full_name: impl Into<String>, email: impl Into<String>) -> User {
        let mut tables = self.tables.lock().await;
        tables.last_user_id += 1;

        let user = User {
            user_id: UserId::new(tables.last_user_id),
            full_name: full_name.into(),
            email: email.into(),
        };
        tables.users.insert(user.user_id, user.clone());
        user
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    // =========================================================================
    // Users
    // =========================================================================

    async fn list_users(&self) -> Result<Vec<User>> {
        let tables = self.tables.lock().await;
        Ok(tables.users.values().cloned().collect())
    }

    // =========================================================================
    // Paintings
    // =========================================================================

    async fn list_paintings(&self) -> Result<Vec<Painting>> {
        let tables = self.tables.lock().await;
        let mut paintings: Vec<Painting> = tables.paintings.values().cloned().collect();
        paintings.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then(b.painting_id.cmp(&a.painting_id))
        });
        Ok(paintings)
    }

    async fn get_painting(&self, painting_id: PaintingId) -> Result<Option<Painting>> {
        let tables = self.tables.lock().await;
        Ok(tables.paintings.get(&painting_id).cloned())
    }

    async fn create_painting(&self, input: &PaintingInput) -> Result<Painting> {
        check_price(input.price)?;

        let mut tables = self.tables.lock().await;
        tables.last_painting_id += 1;

        let painting = Painting {
            painting_id: PaintingId::new(tables.last_painting_id),
            title: input.title.clone(),
            artist: input.artist.clone(),
            price: input.price,
            image_url: input.image_url.clone(),
            status: input.status,
            created_at: Utc::now(),
        };
        tables.paintings.insert(painting.painting_id, painting.clone());
        Ok(painting)
    }

    async fn update_painting(
        &self,
        painting_id: PaintingId,
        input: &PaintingInput,
    ) -> Result<Painting> {
        check_price(input.price)?;

        let mut tables = self.tables.lock().await;
        let painting = tables
            .paintings
            .get_mut(&painting_id)
            .ok_or_else(|| StoreError::painting_not_found(painting_id))?;

        painting.title.clone_from(&input.title);
        painting.artist.clone_from(&input.artist);
        painting.price = input.price;
        painting.image_url.clone_from(&input.image_url);
        painting.status = input.status;

        Ok(painting.clone())
    }

    async fn delete_painting(&self, painting_id: PaintingId) -> Result<()> {
        let mut tables = self.tables.lock().await;

        if !tables.paintings.contains_key(&painting_id) {
            return Err(StoreError::painting_not_found(painting_id));
        }

        if tables
            .order_items
            .iter()
            .any(|item| item.painting_id == painting_id)
        {
            return Err(StoreError::Constraint(format!(
                "update or delete on table \"{}\" violates foreign key constraint on table \"{}\"",
                table::PAINTINGS,
                table::ORDER_ITEMS
            )));
        }

        tables.paintings.remove(&painting_id);
        Ok(())
    }

    // =========================================================================
    // Orders
    // =========================================================================

    async fn begin(&self) -> Result<Box<dyn OrderTransaction>> {
        let guard = Arc::clone(&self.tables).lock_owned().await;
        let working = (*guard).clone();
        Ok(Box::new(MemoryOrderTransaction { guard, working }))
    }

    async fn list_orders_for_user(&self, user_id: UserId) -> Result<Vec<UserOrder>> {
        let tables = self.tables.lock().await;

        Ok(tables
            .orders_newest_first()
            .into_iter()
            .filter(|order| order.user_id == user_id)
            .map(|order| UserOrder {
                order_id: order.order_id,
                status: order.status,
                created_at: order.created_at,
                items: tables
                    .items_of(order.order_id)
                    .map(|(_, painting)| UserOrderItem {
                        title: painting.title.clone(),
                        artist: painting.artist.clone(),
                        price: painting.price,
                        status: painting.status,
                    })
                    .collect(),
            })
            .collect())
    }

    async fn list_all_orders(&self) -> Result<Vec<AdminOrder>> {
        let tables = self.tables.lock().await;

        Ok(tables
            .orders_newest_first()
            .into_iter()
            .filter_map(|order| {
                let customer = tables.users.get(&order.user_id)?;
                Some(AdminOrder {
                    order_id: order.order_id,
                    status: order.status,
                    created_at: order.created_at,
                    customer_name: customer.full_name.clone(),
                    email: customer.email.clone(),
                    items: tables
                        .items_of(order.order_id)
                        .map(|(item, painting)| AdminOrderItem {
                            title: painting.title.clone(),
                            artist: painting.artist.clone(),
                            price: painting.price,
                            image_url: painting.image_url.clone(),
                            quantity: item.quantity,
                        })
                        .collect(),
                })
            })
            .collect())
    }

    async fn list_orders_with_items(&self) -> Result<Vec<OrderWithItems>> {
        let tables = self.tables.lock().await;

        Ok(tables
            .orders_newest_first()
            .into_iter()
            .map(|order| OrderWithItems {
                order_id: order.order_id,
                status: order.status,
                created_at: order.created_at,
                order_items: tables
                    .items_of(order.order_id)
                    .map(|(_, painting)| NestedOrderItem {
                        painting: PaintingSummary {
                            title: painting.title.clone(),
                            image_url: painting.image_url.clone(),
                        },
                    })
                    .collect(),
            })
            .collect())
    }
}

/// Holds the store lock until committed or dropped.
struct MemoryOrderTransaction {
    guard: OwnedMutexGuard<Tables>,
    working: Tables,
}

#[async_trait]
impl OrderTransaction for MemoryOrderTransaction {
    async fn insert_order(&mut self, user_id: UserId, status: OrderStatus) -> Result<OrderId> {
        if !self.working.users.contains_key(&user_id) {
            return Err(StoreError::Constraint(format!(
                "insert on table \"{}\" violates foreign key constraint: user {user_id} is not present in table \"{}\"",
                table::ORDERS,
                table::USERS
            )));
        }

        self.working.last_order_id += 1;
        let order = Order {
            order_id: OrderId::new(self.working.last_order_id),
            user_id,
            status,
            created_at: Utc::now(),
        };
        let order_id = order.order_id;
        self.working.orders.insert(order_id, order);
        Ok(order_id)
    }

    async fn mark_painting_sold(&mut self, painting_id: PaintingId) -> Result<()> {
        let painting = self
            .working
            .paintings
            .get_mut(&painting_id)
            .ok_or_else(|| StoreError::painting_not_found(painting_id))?;

        if !painting.is_available() {
            return Err(StoreError::PaintingUnavailable { painting_id });
        }

        painting.status = PaintingStatus::Sold;
        Ok(())
    }

    async fn insert_order_item(
        &mut self,
        order_id: OrderId,
        painting_id: PaintingId,
        quantity: i32,
    ) -> Result<()> {
        if !self.working.orders.contains_key(&order_id) {
            return Err(StoreError::Constraint(format!(
                "insert on table \"{}\" violates foreign key constraint: order {order_id} is not present in table \"{}\"",
                table::ORDER_ITEMS,
                table::ORDERS
            )));
        }
        if !self.working.paintings.contains_key(&painting_id) {
            return Err(StoreError::Constraint(format!(
                "insert on table \"{}\" violates foreign key constraint: painting {painting_id} is not present in table \"{}\"",
                table::ORDER_ITEMS,
                table::PAINTINGS
            )));
        }
        if quantity <= 0 {
            return Err(StoreError::Constraint(format!(
                "new row for relation \"{}\" violates check constraint \"order_items_quantity_check\"",
                table::ORDER_ITEMS
            )));
        }

        self.working.order_items.push(OrderItem {
            order_id,
            painting_id,
            quantity,
        });
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        let Self { mut guard, working } = *self;
        *guard = working;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn painting(title: &str) -> PaintingInput {
        PaintingInput {
            title: title.into(),
            artist: "A".into(),
            price: dec!(100),
            image_url: "x.jpg".into(),
            status: PaintingStatus::Available,
        }
    }

    #[tokio::test]
    async fn painting_crud() {
        let store = MemoryStore::new();

        let created = store.create_painting(&painting("Sunset")).await.unwrap();
        assert_eq!(created.painting_id, PaintingId::new(1));

        let fetched = store.get_painting(created.painting_id).await.unwrap();
        assert_eq!(fetched, Some(created.clone()));

        let mut input = painting("Sunrise");
        input.status = PaintingStatus::Sold;
        let updated = store
            .update_painting(created.painting_id, &input)
            .await
            .unwrap();
        assert_eq!(updated.title, "Sunrise");
        assert_eq!(updated.created_at, created.created_at);

        store.delete_painting(created.painting_id).await.unwrap();
        assert!(store
            .get_painting(created.painting_id)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn missing_painting_mutations_are_not_found() {
        let store = MemoryStore::new();
        let id = PaintingId::new(99);

        let update = store.update_painting(id, &painting("X")).await;
        assert!(matches!(update, Err(StoreError::NotFound { id: 99, .. })));

        let delete = store.delete_painting(id).await;
        assert!(matches!(delete, Err(StoreError::NotFound { .. })));
    }

    #[tokio::test]
    async fn negative_price_violates_check() {
        let store = MemoryStore::new();
        let mut input = painting("Debt");
        input.price = dec!(-1);

        let result = store.create_painting(&input).await;
        assert!(matches!(result, Err(StoreError::Constraint(_))));
    }

    #[tokio::test]
    async fn commit_publishes_writes() {
        let store = MemoryStore::new();
        let user = store.add_user("Ada", "ada@example.com").await;
        let p = store.create_painting(&painting("Sunset")).await.unwrap();

        let mut tx = store.begin().await.unwrap();
        let order_id = tx
            .insert_order(user.user_id, OrderStatus::Processing)
            .await
            .unwrap();
        tx.mark_painting_sold(p.painting_id).await.unwrap();
        tx.insert_order_item(order_id, p.painting_id, 1)
            .await
            .unwrap();
        tx.commit().await.unwrap();

        let sold = store.get_painting(p.painting_id).await.unwrap().unwrap();
        assert_eq!(sold.status, PaintingStatus::Sold);

        let orders = store.list_orders_for_user(user.user_id).await.unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].items[0].title, "Sunset");
    }

    #[tokio::test]
    async fn dropped_transaction_discards_writes() {
        let store = MemoryStore::new();
        let user = store.add_user("Ada", "ada@example.com").await;
        let p = store.create_painting(&painting("Sunset")).await.unwrap();

        {
            let mut tx = store.begin().await.unwrap();
            tx.insert_order(user.user_id, OrderStatus::Processing)
                .await
                .unwrap();
            tx.mark_painting_sold(p.painting_id).await.unwrap();
        }

        let after = store.get_painting(p.painting_id).await.unwrap().unwrap();
        assert!(after.is_available());
        assert!(store.list_orders_with_items().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn sold_painting_is_unavailable() {
        let store = MemoryStore::new();
        let mut input = painting("Gone");
        input.status = PaintingStatus::Sold;
        let p = store.create_painting(&input).await.unwrap();

        let mut tx = store.begin().await.unwrap();
        let result = tx.mark_painting_sold(p.painting_id).await;
        assert!(matches!(
            result,
            Err(StoreError::PaintingUnavailable { painting_id }) if painting_id == p.painting_id
        ));
    }

    #[tokio::test]
    async fn order_for_unknown_user_violates_foreign_key() {
        let store = MemoryStore::new();

        let mut tx = store.begin().await.unwrap();
        let result = tx
            .insert_order(UserId::new(404), OrderStatus::Processing)
            .await;
        assert!(matches!(result, Err(StoreError::Constraint(_))));
    }

    #[tokio::test]
    async fn ordered_painting_cannot_be_deleted() {
        let store = MemoryStore::new();
        let user = store.add_user("Ada", "ada@example.com").await;
        let p = store.create_painting(&painting("Kept")).await.unwrap();

        let mut tx = store.begin().await.unwrap();
        let order_id = tx
            .insert_order(user.user_id, OrderStatus::Processing)
            .await
            .unwrap();
        tx.insert_order_item(order_id, p.painting_id, 1)
            .await
            .unwrap();
        tx.commit().await.unwrap();

        let result = store.delete_painting(p.painting_id).await;
        assert!(matches!(result, Err(StoreError::Constraint(_))));
    }

    #[tokio::test]
    async fn listings_are_newest_first_and_keep_empty_orders() {
        let store = MemoryStore::new();
        let user = store.add_user("Ada", "ada@example.com").await;
        let p = store.create_painting(&painting("Sunset")).await.unwrap();

        let mut tx = store.begin().await.unwrap();
        let first = tx
            .insert_order(user.user_id, OrderStatus::Processing)
            .await
            .unwrap();
        tx.insert_order_item(first, p.painting_id, 2).await.unwrap();
        tx.commit().await.unwrap();

        let mut tx = store.begin().await.unwrap();
        let second = tx
            .insert_order(user.user_id, OrderStatus::Shipped)
            .await
            .unwrap();
        tx.commit().await.unwrap();

        let nested = store.list_orders_with_items().await.unwrap();
        assert_eq!(nested[0].order_id, second);
        assert!(nested[0].order_items.is_empty());
        assert_eq!(nested[1].order_id, first);
        assert_eq!(nested[1].order_items[0].painting.title, "Sunset");

        let admin = store.list_all_orders().await.unwrap();
        assert_eq!(admin[1].customer_name, "Ada");
        assert_eq!(admin[1].items[0].quantity, 2);
    }
}
