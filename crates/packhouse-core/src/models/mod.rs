//! Domain models shared between the API, services and clients.

pub mod event;
pub mod material;
pub mod notification;
pub mod order;
pub mod packer;
pub mod upload;

pub use event::{EventKind, RealtimeEvent};
pub use material::{AlertLevel, LowStockAlert, Material, StockStatus};
pub use notification::{
    AlertBatchReport, AlertDispatchResult, LowStockAlertRequest, MessageChannel,
    NotificationResponse, SendNotificationRequest,
};
pub use order::{Order, OrderStatus, OrderSummary};
pub use packer::{sanitize_packer_fields, Packer, PackerFields};
pub use upload::{UploadResponse, UploadedFile};
