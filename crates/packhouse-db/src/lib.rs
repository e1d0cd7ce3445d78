//! Packhouse document store
//!
//! Packers and orders live as JSON documents grouped by collection. The
//! repositories hide whether that is a Postgres JSONB table or process memory.

pub mod db;

pub use db::{
    InMemoryDocumentStore, OrderRepository, PackerRepository, PostgresOrderRepository,
    PostgresPackerRepository,
};
