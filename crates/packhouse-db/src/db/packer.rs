use packhouse_core::constants::PACKERS_COLLECTION;
use packhouse_core::models::{Packer, PackerFields};
use packhouse_core::AppError;
use serde_json::Value;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

use super::into_fields;

/// Packer collection operations.
///
/// `replace` and `merge` return `Ok(None)` and `delete` returns `Ok(false)`
/// when the id does not exist; the store is left untouched in that case.
#[async_trait::async_trait]
pub trait PackerRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Packer>, AppError>;

    async fn create(&self, fields: PackerFields) -> Result<Packer, AppError>;

    async fn replace(&self, id: Uuid, fields: PackerFields) -> Result<Option<Packer>, AppError>;

    async fn merge(&self, id: Uuid, fields: PackerFields) -> Result<Option<Packer>, AppError>;

    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}

#[derive(Clone)]
pub struct PostgresPackerRepository {
    pool: PgPool,
}

impl PostgresPackerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl PackerRepository for PostgresPackerRepository {
    #[tracing::instrument(skip(self), fields(db.table = "documents", db.collection = PACKERS_COLLECTION, db.operation = "select"))]
    async fn list(&self) -> Result<Vec<Packer>, AppError> {
        let rows = sqlx::query_as::<Postgres, (Uuid, Value)>(
            "SELECT id, body FROM documents WHERE collection = $1 ORDER BY created_at ASC, id ASC",
        )
        .bind(PACKERS_COLLECTION)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, body)| Packer::new(id, into_fields(body)))
            .collect())
    }

    #[tracing::instrument(skip(self, fields), fields(db.table = "documents", db.collection = PACKERS_COLLECTION, db.operation = "insert"))]
    async fn create(&self, fields: PackerFields) -> Result<Packer, AppError> {
        let id = Uuid::new_v4();

        sqlx::query("INSERT INTO documents (collection, id, body) VALUES ($1, $2, $3)")
            .bind(PACKERS_COLLECTION)
            .bind(id)
            .bind(Value::Object(fields.clone()))
            .execute(&self.pool)
            .await?;

        tracing::debug!(packer_id = %id, "Packer document inserted");
        Ok(Packer::new(id, fields))
    }

    #[tracing::instrument(skip(self, fields), fields(db.table = "documents", db.collection = PACKERS_COLLECTION, db.operation = "update", db.record_id = %id))]
    async fn replace(&self, id: Uuid, fields: PackerFields) -> Result<Option<Packer>, AppError> {
        let body = sqlx::query_scalar::<Postgres, Value>(
            r#"
            UPDATE documents
            SET body = $3, updated_at = NOW()
            WHERE collection = $1 AND id = $2
            RETURNING body
            "#,
        )
        .bind(PACKERS_COLLECTION)
        .bind(id)
        .bind(Value::Object(fields))
        .fetch_optional(&self.pool)
        .await?;

        Ok(body.map(|body| Packer::new(id, into_fields(body))))
    }

    #[tracing::instrument(skip(self, fields), fields(db.table = "documents", db.collection = PACKERS_COLLECTION, db.operation = "update", db.record_id = %id))]
    async fn merge(&self, id: Uuid, fields: PackerFields) -> Result<Option<Packer>, AppError> {
        // jsonb || overwrites top-level keys and keeps the rest
        let body = sqlx::query_scalar::<Postgres, Value>(
            r#"
            UPDATE documents
            SET body = body || $3, updated_at = NOW()
            WHERE collection = $1 AND id = $2
            RETURNING body
            "#,
        )
        .bind(PACKERS_COLLECTION)
        .bind(id)
        .bind(Value::Object(fields))
        .fetch_optional(&self.pool)
        .await?;

        Ok(body.map(|body| Packer::new(id, into_fields(body))))
    }

    #[tracing::instrument(skip(self), fields(db.table = "documents", db.collection = PACKERS_COLLECTION, db.operation = "delete", db.record_id = %id))]
    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(PACKERS_COLLECTION)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
