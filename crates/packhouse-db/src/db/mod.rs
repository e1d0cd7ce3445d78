//! Repository traits and their implementations.
//
// Postgres JSONB backed repositories
pub mod order;
pub mod packer;
//
// Process-local store used by DOCUMENT_STORE=memory and tests
pub mod memory;

pub use memory::InMemoryDocumentStore;
pub use order::{OrderRepository, PostgresOrderRepository};
pub use packer::{PackerRepository, PostgresPackerRepository};

/// Stored bodies are always objects; anything else is read back as empty.
pub(crate) fn into_fields(body: serde_json::Value) -> packhouse_core::models::PackerFields {
    match body {
        serde_json::Value::Object(map) => map,
        _ => Default::default(),
    }
}
