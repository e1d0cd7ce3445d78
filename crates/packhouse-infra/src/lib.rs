//! Packhouse Infrastructure Library
//!
//! Shared plumbing for the HTTP server:
//! - Request ID middleware
//! - Tracing subscriber initialization

pub mod middleware;
pub mod telemetry;

pub use middleware::{request_id_middleware, RequestId, REQUEST_ID_HEADER};
pub use telemetry::{init_telemetry, LogFormat};
