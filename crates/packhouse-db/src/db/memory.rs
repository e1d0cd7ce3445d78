use packhouse_core::models::{Order, Packer, PackerFields};
use packhouse_core::AppError;
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

use super::order::OrderRepository;
use super::packer::PackerRepository;

/// Document store kept in process memory.
///
/// Backs `DOCUMENT_STORE=memory` and the HTTP tests. Packers keep insertion
/// order so listing matches the Postgres `created_at` ordering.
#[derive(Clone, Default)]
pub struct InMemoryDocumentStore {
    packers: Arc<Mutex<Vec<Packer>>>,
    orders: Arc<Mutex<Vec<Order>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, AppError> {
    mutex
        .lock()
        .map_err(|_| AppError::Internal("In-memory document store lock poisoned".to_string()))
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the read-only orders collection.
    pub fn with_orders(orders: Vec<Order>) -> Self {
        Self {
            packers: Arc::default(),
            orders: Arc::new(Mutex::new(orders)),
        }
    }

    pub fn insert_order(&self, order: Order) -> Result<(), AppError> {
        lock(&self.orders)?.push(order);
        Ok(())
    }

    pub fn packer_count(&self) -> usize {
        self.packers.lock().map(|p| p.len()).unwrap_or(0)
    }
}

#[async_trait::async_trait]
impl PackerRepository for InMemoryDocumentStore {
    async fn list(&self) -> Result<Vec<Packer>, AppError> {
        Ok(lock(&self.packers)?.clone())
    }

    async fn create(&self, fields: PackerFields) -> Result<Packer, AppError> {
        let packer = Packer::new(Uuid::new_v4(), fields);
        lock(&self.packers)?.push(packer.clone());
        Ok(packer)
    }

    async fn replace(&self, id: Uuid, fields: PackerFields) -> Result<Option<Packer>, AppError> {
        let mut packers = lock(&self.packers)?;
        Ok(packers.iter_mut().find(|p| p.id == id).map(|packer| {
            packer.fields = fields;
            packer.clone()
        }))
    }

    async fn merge(&self, id: Uuid, fields: PackerFields) -> Result<Option<Packer>, AppError> {
        let mut packers = lock(&self.packers)?;
        Ok(packers.iter_mut().find(|p| p.id == id).map(|packer| {
            packer.fields.extend(fields);
            packer.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let mut packers = lock(&self.packers)?;
        let before = packers.len();
        packers.retain(|p| p.id != id);
        Ok(packers.len() < before)
    }
}

#[async_trait::async_trait]
impl OrderRepository for InMemoryDocumentStore {
    /// Newest first; orders without a timestamp go last.
    async fn list_orders(&self) -> Result<Vec<Order>, AppError> {
        let mut orders = lock(&self.orders)?.clone();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use packhouse_core::models::OrderStatus;
    use serde_json::json;

    fn fields(value: serde_json::Value) -> PackerFields {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn created_packer_is_listed_with_same_id() {
        let store = InMemoryDocumentStore::new();
        let created = store.create(fields(json!({"name": "Asha"}))).await.unwrap();

        let listed = store.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, created.id);
        assert_eq!(listed[0].name(), Some("Asha"));
    }

    #[tokio::test]
    async fn replace_drops_missing_keys_and_merge_keeps_them() {
        let store = InMemoryDocumentStore::new();
        let created = store
            .create(fields(json!({"name": "Asha", "shift": "night"})))
            .await
            .unwrap();

        let merged = store
            .merge(created.id, fields(json!({"shift": "day"})))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(merged.fields.get("name"), Some(&json!("Asha")));
        assert_eq!(merged.fields.get("shift"), Some(&json!("day")));

        let replaced = store
            .replace(created.id, fields(json!({"name": "Asha K"})))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(replaced.fields.get("shift"), None);
    }

    #[tokio::test]
    async fn missing_id_leaves_store_unchanged() {
        let store = InMemoryDocumentStore::new();
        store.create(fields(json!({"name": "Ravi"}))).await.unwrap();
        let before = store.list().await.unwrap();

        let absent = Uuid::new_v4();
        assert!(store.replace(absent, fields(json!({"name": "x"}))).await.unwrap().is_none());
        assert!(store.merge(absent, fields(json!({"name": "x"}))).await.unwrap().is_none());
        assert!(!store.delete(absent).await.unwrap());

        assert_eq!(store.list().await.unwrap(), before);
    }

    #[tokio::test]
    async fn delete_removes_packer() {
        let store = InMemoryDocumentStore::new();
        let created = store.create(fields(json!({"name": "Ravi"}))).await.unwrap();
        assert!(store.delete(created.id).await.unwrap());
        assert_eq!(store.packer_count(), 0);
    }

    #[tokio::test]
    async fn seeded_orders_are_listed() {
        let store = InMemoryDocumentStore::with_orders(vec![Order {
            id: Uuid::new_v4(),
            customer_name: "Meera".to_string(),
            total_amount: 10.0,
            pending_payments: 0.0,
            status: OrderStatus::Delivered,
            created_at: None,
        }]);
        assert_eq!(store.list_orders().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn orders_are_listed_newest_first() {
        let order = |customer: &str, created_at: Option<&str>| Order {
            id: Uuid::new_v4(),
            customer_name: customer.to_string(),
            total_amount: 1.0,
            pending_payments: 0.0,
            status: OrderStatus::Pending,
            created_at: created_at.map(|ts| ts.parse().unwrap()),
        };
        let store = InMemoryDocumentStore::with_orders(vec![
            order("undated", None),
            order("older", Some("2024-01-01T08:00:00Z")),
            order("newer", Some("2024-03-01T08:00:00Z")),
        ]);

        let names: Vec<String> = store
            .list_orders()
            .await
            .unwrap()
            .into_iter()
            .map(|o| o.customer_name)
            .collect();
        assert_eq!(names, vec!["newer", "older", "undated"]);
    }
}
