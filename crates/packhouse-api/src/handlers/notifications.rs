use crate::error::{log_error, status_of, ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::NotificationState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use packhouse_core::models::{
    AlertBatchReport, LowStockAlertRequest, MessageChannel, NotificationResponse,
    SendNotificationRequest,
};
use packhouse_core::{AppError, ErrorMetadata};
use validator::Validate;

type NotificationReply = (StatusCode, Json<NotificationResponse>);

/// Shared body of the single-message endpoints. Always answers in the
/// `{success, messageId | error}` shape, including for bad input.
async fn dispatch(
    notifications: &NotificationState,
    channel: MessageChannel,
    payload: Result<Json<SendNotificationRequest>, JsonRejection>,
) -> NotificationReply {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(NotificationResponse::failed(format!(
                    "Invalid request body: {}",
                    rejection.body_text()
                ))),
            )
        }
    };

    let (to, message) = match request.required_fields() {
        Ok(fields) => fields,
        Err(reason) => {
            tracing::debug!(reason = %reason, "Rejected notification request");
            return (StatusCode::BAD_REQUEST, Json(NotificationResponse::failed(reason)));
        }
    };

    match notifications.service.send(channel, to, message).await {
        Ok(message_id) => (StatusCode::OK, Json(NotificationResponse::sent(message_id))),
        Err(e) => {
            let err = AppError::from(e);
            log_error(&err);
            (status_of(&err), Json(NotificationResponse::failed(err.client_message())))
        }
    }
}

#[utoipa::path(
    post,
    path = "/notifications/whatsapp",
    tag = "notifications",
    request_body = SendNotificationRequest,
    responses(
        (status = 200, description = "Message accepted by the provider", body = NotificationResponse),
        (status = 400, description = "Missing 'to' or 'message'", body = NotificationResponse),
        (status = 500, description = "Provider rejected the message", body = NotificationResponse)
    )
)]
#[tracing::instrument(skip(notifications, payload), fields(channel = "whatsapp"))]
pub async fn send_whatsapp(
    State(notifications): State<NotificationState>,
    payload: Result<Json<SendNotificationRequest>, JsonRejection>,
) -> NotificationReply {
    dispatch(&notifications, MessageChannel::WhatsApp, payload).await
}

#[utoipa::path(
    post,
    path = "/notifications/sms",
    tag = "notifications",
    request_body = SendNotificationRequest,
    responses(
        (status = 200, description = "Message accepted by the provider", body = NotificationResponse),
        (status = 400, description = "Missing 'to' or 'message'", body = NotificationResponse),
        (status = 500, description = "Provider rejected the message", body = NotificationResponse)
    )
)]
#[tracing::instrument(skip(notifications, payload), fields(channel = "sms"))]
pub async fn send_sms(
    State(notifications): State<NotificationState>,
    payload: Result<Json<SendNotificationRequest>, JsonRejection>,
) -> NotificationReply {
    dispatch(&notifications, MessageChannel::Sms, payload).await
}

#[utoipa::path(
    post,
    path = "/notifications/low-stock",
    tag = "notifications",
    request_body = LowStockAlertRequest,
    responses(
        (status = 200, description = "Per-material outcome of the batch", body = AlertBatchReport),
        (status = 400, description = "Invalid body or no recipient configured", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(notifications, request), fields(materials = request.materials.len()))]
pub async fn send_low_stock_alerts(
    State(notifications): State<NotificationState>,
    ValidatedJson(request): ValidatedJson<LowStockAlertRequest>,
) -> Result<Json<AlertBatchReport>, HttpAppError> {
    request.validate()?;
    let recipient = notifications.service.alert_recipient(request.to.as_deref())?;

    let report = notifications
        .alerter
        .dispatch(&request.materials, &recipient)
        .await;

    Ok(Json(report))
}
