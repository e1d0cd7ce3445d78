use chrono::{DateTime, Utc};
use packhouse_core::constants::ORDERS_COLLECTION;
use packhouse_core::models::Order;
use packhouse_core::AppError;
use serde_json::Value;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

use super::into_fields;

/// Orders are written by the order service; this side only reads them.
#[async_trait::async_trait]
pub trait OrderRepository: Send + Sync {
    async fn list_orders(&self) -> Result<Vec<Order>, AppError>;
}

#[derive(Clone)]
pub struct PostgresOrderRepository {
    pool: PgPool,
}

impl PostgresOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Build an `Order` from a stored document. The row id wins over any `id` in
/// the body, and the row timestamp fills in a missing `created_at`.
pub(crate) fn order_from_document(
    id: Uuid,
    body: Value,
    stored_at: Option<DateTime<Utc>>,
) -> Result<Order, serde_json::Error> {
    let mut fields = into_fields(body);
    fields.insert("id".to_string(), Value::String(id.to_string()));

    let mut order: Order = serde_json::from_value(Value::Object(fields))?;
    if order.created_at.is_none() {
        order.created_at = stored_at;
    }
    Ok(order)
}

#[async_trait::async_trait]
impl OrderRepository for PostgresOrderRepository {
    #[tracing::instrument(skip(self), fields(db.table = "documents", db.collection = ORDERS_COLLECTION, db.operation = "select"))]
    async fn list_orders(&self) -> Result<Vec<Order>, AppError> {
        let rows = sqlx::query_as::<Postgres, (Uuid, Value, DateTime<Utc>)>(
            "SELECT id, body, created_at FROM documents WHERE collection = $1 ORDER BY created_at DESC",
        )
        .bind(ORDERS_COLLECTION)
        .fetch_all(&self.pool)
        .await?;

        let mut orders = Vec::with_capacity(rows.len());
        for (id, body, created_at) in rows {
            match order_from_document(id, body, Some(created_at)) {
                Ok(order) => orders.push(order),
                Err(e) => {
                    tracing::warn!(order_id = %id, error = %e, "Skipping malformed order document");
                }
            }
        }

        Ok(orders)
    }
}
