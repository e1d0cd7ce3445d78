//! Low-stock alert batch.
//!
//! Materials at `low` or `critical` get one formatted message each, sent one
//! after another with a fixed pause between consecutive sends. A failed send is
//! recorded in the report and the batch moves on.

use packhouse_core::models::{
    AlertBatchReport, AlertDispatchResult, LowStockAlert, Material, MessageChannel,
};
use std::sync::Arc;
use std::time::Duration;

use crate::notification::MessageSender;

pub struct LowStockAlerter {
    sender: Arc<dyn MessageSender>,
    channel: MessageChannel,
    send_delay: Duration,
}

impl LowStockAlerter {
    pub fn new(sender: Arc<dyn MessageSender>, send_delay: Duration) -> Self {
        Self {
            sender,
            channel: MessageChannel::WhatsApp,
            send_delay,
        }
    }

    /// Alerts for the given materials, input order preserved.
    pub fn collect_alerts(materials: &[Material]) -> Vec<(&Material, LowStockAlert)> {
        materials
            .iter()
            .filter_map(|m| LowStockAlert::from_material(m).map(|alert| (m, alert)))
            .collect()
    }

    #[tracing::instrument(skip(self, materials), fields(materials = materials.len(), channel = %self.channel))]
    pub async fn dispatch(&self, materials: &[Material], to: &str) -> AlertBatchReport {
        let alerts = Self::collect_alerts(materials);
        let mut report = AlertBatchReport {
            matched: alerts.len(),
            ..Default::default()
        };

        for (index, (material, alert)) in alerts.into_iter().enumerate() {
            if index > 0 && !self.send_delay.is_zero() {
                tokio::time::sleep(self.send_delay).await;
            }

            let result = match self.sender.send(self.channel, to, &alert.message()).await {
                Ok(message_id) => {
                    tracing::info!(
                        material = %material.name,
                        message_id = %message_id,
                        "Low-stock alert sent"
                    );
                    AlertDispatchResult {
                        material: material.name.clone(),
                        status: material.status,
                        success: true,
                        message_id: Some(message_id),
                        error: None,
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        material = %material.name,
                        error = %e,
                        "Low-stock alert failed, continuing with remaining items"
                    );
                    AlertDispatchResult {
                        material: material.name.clone(),
                        status: material.status,
                        success: false,
                        message_id: None,
                        error: Some(e.to_string()),
                    }
                }
            };
            report.record(result);
        }

        tracing::info!(
            matched = report.matched,
            sent = report.sent,
            failed = report.failed,
            "Low-stock alert batch finished"
        );

        report
    }
}
