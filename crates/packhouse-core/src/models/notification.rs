use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;
use validator::Validate;

use super::material::{Material, StockStatus};

/// Delivery channel offered by the messaging provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MessageChannel {
    WhatsApp,
    Sms,
}

impl fmt::Display for MessageChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageChannel::WhatsApp => write!(f, "whatsapp"),
            MessageChannel::Sms => write!(f, "sms"),
        }
    }
}

/// Body of `POST /notifications/{channel}`. Both fields are optional at the
/// serde level so a missing field becomes a `{success:false}` reply instead of
/// a generic JSON rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct SendNotificationRequest {
    pub to: Option<String>,
    pub message: Option<String>,
}

impl SendNotificationRequest {
    /// Returns `(to, message)` trimmed, or the reason the request is unusable.
    pub fn required_fields(&self) -> Result<(&str, &str), String> {
        let to = self.to.as_deref().map(str::trim).unwrap_or_default();
        let message = self.message.as_deref().map(str::trim).unwrap_or_default();

        match (to.is_empty(), message.is_empty()) {
            (true, true) => Err("Fields 'to' and 'message' are required".to_string()),
            (true, false) => Err("Field 'to' is required".to_string()),
            (false, true) => Err("Field 'message' is required".to_string()),
            (false, false) => Ok((to, message)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NotificationResponse {
    pub success: bool,
    #[serde(rename = "messageId", default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl NotificationResponse {
    pub fn sent(message_id: impl Into<String>) -> Self {
        Self {
            success: true,
            message_id: Some(message_id.into()),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message_id: None,
            error: Some(error.into()),
        }
    }
}

/// Body of `POST /notifications/low-stock`. `to` overrides the configured
/// admin number.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct LowStockAlertRequest {
    #[validate(nested)]
    pub materials: Vec<Material>,
    #[serde(default)]
    pub to: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AlertDispatchResult {
    pub material: String,
    pub status: StockStatus,
    pub success: bool,
    #[serde(rename = "messageId", default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Per-item outcome of one low-stock batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AlertBatchReport {
    pub matched: usize,
    pub sent: usize,
    pub failed: usize,
    pub results: Vec<AlertDispatchResult>,
}

impl AlertBatchReport {
    pub fn record(&mut self, result: AlertDispatchResult) {
        if result.success {
            self.sent += 1;
        } else {
            self.failed += 1;
        }
        self.results.push(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_fields_are_reported() {
        let req = SendNotificationRequest::default();
        assert!(req.required_fields().unwrap_err().contains("'to' and 'message'"));

        let req = SendNotificationRequest {
            to: Some("+15550001".to_string()),
            message: Some("   ".to_string()),
        };
        assert_eq!(req.required_fields().unwrap_err(), "Field 'message' is required");

        let req = SendNotificationRequest {
            to: Some(" +15550001 ".to_string()),
            message: Some("hi".to_string()),
        };
        assert_eq!(req.required_fields().unwrap(), ("+15550001", "hi"));
    }

    #[test]
    fn response_uses_message_id_key() {
        let value = serde_json::to_value(NotificationResponse::sent("SM123")).unwrap();
        assert_eq!(value, json!({"success": true, "messageId": "SM123"}));

        let value = serde_json::to_value(NotificationResponse::failed("boom")).unwrap();
        assert_eq!(value, json!({"success": false, "error": "boom"}));
    }

    #[test]
    fn blank_material_name_fails_validation() {
        let request: LowStockAlertRequest = serde_json::from_value(json!({
            "materials": [{"name": "", "quantity": 1, "threshold": 5, "status": "low"}]
        }))
        .unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn report_counts_outcomes() {
        let mut report = AlertBatchReport {
            matched: 2,
            ..Default::default()
        };
        report.record(AlertDispatchResult {
            material: "a".to_string(),
            status: StockStatus::Low,
            success: true,
            message_id: Some("1".to_string()),
            error: None,
        });
        report.record(AlertDispatchResult {
            material: "b".to_string(),
            status: StockStatus::Critical,
            success: false,
            message_id: None,
            error: Some("nope".to_string()),
        });
        assert_eq!((report.sent, report.failed), (1, 1));
        assert_eq!(report.results.len(), 2);
    }
}
