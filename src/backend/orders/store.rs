/**
 * Order Model and Store
 *
 * Order persistence behind the same trait seam as the credential store:
 * PostgreSQL in deployments, an in-memory map when no database is
 * configured.
 */

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::backend::auth::users::StoreError;

/// An order placed through the storefront.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Order {
    /// Unique order ID (UUID)
    pub id: Uuid,
    /// Customer email the order is filed under
    pub email: String,
    /// Order total
    pub total_price: f64,
    /// Fulfillment status ("pending" on creation)
    pub status: String,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
}

/// Input for creating an order.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub email: String,
    pub total_price: f64,
}

/// Persistence seam for orders.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Create an order with status "pending".
    async fn create(&self, new_order: NewOrder) -> Result<Order, StoreError>;

    /// List orders for a customer email, newest first.
    async fn find_by_email(&self, email: &str) -> Result<Vec<Order>, StoreError>;

    /// List every order, newest first.
    async fn list_all(&self) -> Result<Vec<Order>, StoreError>;

    /// Update an order's status.
    ///
    /// # Returns
    ///
    /// The updated order, or `None` if the id is unknown.
    async fn update_status(&self, id: Uuid, status: &str) -> Result<Option<Order>, StoreError>;
}

/// PostgreSQL-backed order store.
#[derive(Clone)]
pub struct PgOrderStore {
    pool: PgPool,
}

impl PgOrderStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderStore for PgOrderStore {
    async fn create(&self, new_order: NewOrder) -> Result<Order, StoreError> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        let order = sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders (id, email, total_price, status, created_at)
            VALUES ($1, $2, $3, 'pending', $4)
            RETURNING id, email, total_price, status, created_at
            "#,
        )
        .bind(id)
        .bind(&new_order.email)
        .bind(new_order.total_price)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(order)
    }

    async fn find_by_email(&self, email: &str) -> Result<Vec<Order>, StoreError> {
        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, email, total_price, status, created_at
            FROM orders
            WHERE email = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }

    async fn list_all(&self) -> Result<Vec<Order>, StoreError> {
        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, email, total_price, status, created_at
            FROM orders
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }

    async fn update_status(&self, id: Uuid, status: &str) -> Result<Option<Order>, StoreError> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            UPDATE orders
            SET status = $1
            WHERE id = $2
            RETURNING id, email, total_price, status, created_at
            "#,
        )
        .bind(status)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }
}

/// In-memory order store for development and tests.
#[derive(Clone, Default)]
pub struct MemoryOrderStore {
    orders: Arc<RwLock<HashMap<Uuid, Order>>>,
}

impl MemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first(mut orders: Vec<Order>) -> Vec<Order> {
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    orders
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn create(&self, new_order: NewOrder) -> Result<Order, StoreError> {
        let order = Order {
            id: Uuid::new_v4(),
            email: new_order.email,
            total_price: new_order.total_price,
            status: "pending".to_string(),
            created_at: Utc::now(),
        };

        self.orders.write().await.insert(order.id, order.clone());
        Ok(order)
    }

    async fn find_by_email(&self, email: &str) -> Result<Vec<Order>, StoreError> {
        let orders = self.orders.read().await;
        Ok(newest_first(
            orders.values().filter(|o| o.email == email).cloned().collect(),
        ))
    }

    async fn list_all(&self) -> Result<Vec<Order>, StoreError> {
        let orders = self.orders.read().await;
        Ok(newest_first(orders.values().cloned().collect()))
    }

    async fn update_status(&self, id: Uuid, status: &str) -> Result<Option<Order>, StoreError> {
        let mut orders = self.orders.write().await;
        Ok(orders.get_mut(&id).map(|order| {
            order.status = status.to_string();
            order.clone()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_starts_pending() {
        let store = MemoryOrderStore::new();
        let order = store
            .create(NewOrder {
                email: "a@x.com".to_string(),
                total_price: 42.5,
            })
            .await
            .unwrap();

        assert_eq!(order.status, "pending");
        assert_eq!(order.email, "a@x.com");
    }

    #[tokio::test]
    async fn test_find_by_email_filters() {
        let store = MemoryOrderStore::new();
        for email in ["a@x.com", "b@x.com", "a@x.com"] {
            store
                .create(NewOrder {
                    email: email.to_string(),
                    total_price: 10.0,
                })
                .await
                .unwrap();
        }

        assert_eq!(store.find_by_email("a@x.com").await.unwrap().len(), 2);
        assert_eq!(store.find_by_email("b@x.com").await.unwrap().len(), 1);
        assert_eq!(store.list_all().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_update_status() {
        let store = MemoryOrderStore::new();
        let order = store
            .create(NewOrder {
                email: "a@x.com".to_string(),
                total_price: 10.0,
            })
            .await
            .unwrap();

        let updated = store.update_status(order.id, "shipped").await.unwrap().unwrap();
        assert_eq!(updated.status, "shipped");

        assert!(store
            .update_status(Uuid::new_v4(), "shipped")
            .await
            .unwrap()
            .is_none());
    }
}
