//! Packhouse Services Layer
//!
//! Business services used by the HTTP handlers: text message dispatch through
//! the messaging provider, the low-stock alert batch and the realtime event
//! fan-out. Handlers stay thin and call into these.

pub mod alerts;
pub mod events;
pub mod notification;

pub use alerts::LowStockAlerter;
pub use events::EventBroadcaster;
pub use notification::{
    LogOnlySender, MessageSender, NotificationError, NotificationService, TwilioClient,
    TwilioCredentials,
};
