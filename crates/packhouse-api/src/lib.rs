//! Packhouse API Library
//!
//! HTTP handlers, application state and server setup for the packhouse
//! backend: packers, orders, notifications, uploads and realtime events.

mod api_doc;
pub mod constants;
mod handlers;
pub mod setup;
mod utils;

pub mod error;
pub mod state;

pub use error::{ErrorResponse, HttpAppError};
