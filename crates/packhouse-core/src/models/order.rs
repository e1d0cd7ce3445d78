use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;
use uuid::Uuid;

/// Order status as written by the order service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

/// Read-only order record. The order service writes camelCase documents, so
/// the aliases accept both spellings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: Uuid,
    #[serde(alias = "customerName")]
    pub customer_name: String,
    #[serde(alias = "totalAmount")]
    pub total_amount: f64,
    #[serde(default, alias = "pendingPayments")]
    pub pending_payments: f64,
    pub status: OrderStatus,
    #[serde(default, alias = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Aggregates shown under the orders table.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OrderSummary {
    pub order_count: usize,
    pub total_amount: f64,
    pub pending_payments: f64,
    pub by_status: BTreeMap<OrderStatus, usize>,
}

impl OrderSummary {
    pub fn from_orders(orders: &[Order]) -> Self {
        let mut summary = OrderSummary {
            order_count: orders.len(),
            ..Default::default()
        };
        for order in orders {
            summary.total_amount += order.total_amount;
            summary.pending_payments += order.pending_payments;
            *summary.by_status.entry(order.status).or_insert(0) += 1;
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_camel_case_documents() {
        let id = Uuid::new_v4();
        let order: Order = serde_json::from_value(json!({
            "id": id,
            "customerName": "Meera Traders",
            "totalAmount": 1250.5,
            "pendingPayments": 250.0,
            "status": "shipped"
        }))
        .unwrap();
        assert_eq!(order.customer_name, "Meera Traders");
        assert_eq!(order.status, OrderStatus::Shipped);
        assert_eq!(order.created_at, None);
    }

    #[test]
    fn summary_totals_by_status() {
        let make = |amount: f64, pending: f64, status| Order {
            id: Uuid::new_v4(),
            customer_name: "c".to_string(),
            total_amount: amount,
            pending_payments: pending,
            status,
            created_at: None,
        };
        let orders = vec![
            make(100.0, 0.0, OrderStatus::Delivered),
            make(50.0, 50.0, OrderStatus::Pending),
            make(25.0, 10.0, OrderStatus::Pending),
        ];
        let summary = OrderSummary::from_orders(&orders);
        assert_eq!(summary.order_count, 3);
        assert_eq!(summary.total_amount, 175.0);
        assert_eq!(summary.pending_payments, 60.0);
        assert_eq!(summary.by_status.get(&OrderStatus::Pending), Some(&2));
        assert_eq!(summary.by_status.get(&OrderStatus::Shipped), None);
    }
}
