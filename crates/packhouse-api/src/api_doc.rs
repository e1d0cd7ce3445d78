//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use packhouse_core::models;

pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Packhouse API",
        version = "0.1.0",
        description = "Inventory and order back office: packers, orders, WhatsApp/SMS notifications, low-stock alerts and file uploads."
    ),
    paths(
        handlers::health::health_check,
        // Packers
        handlers::packers::list_packers,
        handlers::packers::create_packer,
        handlers::packers::replace_packer,
        handlers::packers::update_packer,
        handlers::packers::delete_packer,
        // Orders
        handlers::orders::list_orders,
        // Notifications
        handlers::notifications::send_whatsapp,
        handlers::notifications::send_sms,
        handlers::notifications::send_low_stock_alerts,
        // Uploads
        handlers::upload::upload_file,
        // Realtime
        handlers::events::stream_events,
    ),
    components(
        schemas(
            models::Order,
            models::OrderStatus,
            models::Material,
            models::StockStatus,
            models::MessageChannel,
            models::SendNotificationRequest,
            models::NotificationResponse,
            models::LowStockAlertRequest,
            models::AlertBatchReport,
            models::AlertDispatchResult,
            models::UploadResponse,
            handlers::health::HealthResponse,
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "packers", description = "Packer documents"),
        (name = "orders", description = "Read-only order list"),
        (name = "notifications", description = "WhatsApp/SMS dispatch and low-stock alerts"),
        (name = "uploads", description = "File uploads"),
        (name = "events", description = "Realtime change stream"),
        (name = "health", description = "Liveness"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_lists_every_route() {
        let spec = get_openapi_spec();
        for path in [
            "/health",
            "/packers",
            "/packers/{id}",
            "/orders",
            "/notifications/whatsapp",
            "/notifications/sms",
            "/notifications/low-stock",
            "/upload",
            "/events",
        ] {
            assert!(spec.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}
