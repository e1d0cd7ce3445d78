use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Stock status as reported by the inventory view. Anything unrecognised is
/// treated as `unknown` and never alerts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StockStatus {
    Ok,
    Low,
    Critical,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, Validate)]
pub struct Material {
    #[validate(length(min = 1, message = "Material name must not be empty"))]
    pub name: String,
    pub quantity: f64,
    pub threshold: f64,
    #[serde(default)]
    pub unit: String,
    pub status: StockStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevel {
    Low,
    Critical,
}

impl AlertLevel {
    pub fn emoji(&self) -> &'static str {
        match self {
            AlertLevel::Low => "⚠️",
            AlertLevel::Critical => "🚨",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AlertLevel::Low => "LOW",
            AlertLevel::Critical => "CRITICAL",
        }
    }

    pub fn call_to_action(&self) -> &'static str {
        match self {
            AlertLevel::Low => "Please restock soon",
            AlertLevel::Critical => "Restock immediately",
        }
    }
}

/// Transient alert payload for one material below its threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct LowStockAlert {
    pub material_name: String,
    pub current_quantity: f64,
    pub threshold: f64,
    pub unit: String,
    pub level: AlertLevel,
}

impl LowStockAlert {
    /// Returns `None` for materials that are not `low` or `critical`.
    pub fn from_material(material: &Material) -> Option<Self> {
        let level = match material.status {
            StockStatus::Low => AlertLevel::Low,
            StockStatus::Critical => AlertLevel::Critical,
            StockStatus::Ok | StockStatus::Unknown => return None,
        };

        Some(Self {
            material_name: material.name.clone(),
            current_quantity: material.quantity,
            threshold: material.threshold,
            unit: material.unit.clone(),
            level,
        })
    }

    /// Human readable message body sent to the admin phone.
    pub fn message(&self) -> String {
        format!(
            "{emoji} *Low Stock Alert*\n\n\
             Material: {name}\n\
             Current stock: {current}\n\
             Threshold: {threshold}\n\
             Status: {label}\n\n\
             {action}",
            emoji = self.level.emoji(),
            name = self.material_name,
            current = with_unit(self.current_quantity, &self.unit),
            threshold = with_unit(self.threshold, &self.unit),
            label = self.level.label(),
            action = self.level.call_to_action(),
        )
    }
}

fn with_unit(amount: f64, unit: &str) -> String {
    if unit.trim().is_empty() {
        amount.to_string()
    } else {
        format!("{} {}", amount, unit.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn material(name: &str, status: StockStatus) -> Material {
        Material {
            name: name.to_string(),
            quantity: 4.0,
            threshold: 10.0,
            unit: "kg".to_string(),
            status,
        }
    }

    #[test]
    fn only_low_and_critical_alert() {
        assert!(LowStockAlert::from_material(&material("tape", StockStatus::Ok)).is_none());
        assert!(LowStockAlert::from_material(&material("tape", StockStatus::Unknown)).is_none());
        assert_eq!(
            LowStockAlert::from_material(&material("tape", StockStatus::Low)).map(|a| a.level),
            Some(AlertLevel::Low)
        );
    }

    #[test]
    fn critical_message_text() {
        let alert = LowStockAlert::from_material(&material("Bubble wrap", StockStatus::Critical)).unwrap();
        let text = alert.message();
        assert!(text.starts_with("🚨"));
        assert!(text.contains("Material: Bubble wrap"));
        assert!(text.contains("Current stock: 4 kg"));
        assert!(text.contains("Threshold: 10 kg"));
        assert!(text.contains("Status: CRITICAL"));
        assert!(text.ends_with("Restock immediately"));
    }

    #[test]
    fn low_message_without_unit() {
        let mut m = material("Boxes", StockStatus::Low);
        m.unit = String::new();
        let text = LowStockAlert::from_material(&m).unwrap().message();
        assert!(text.starts_with("⚠️"));
        assert!(text.contains("Current stock: 4\n"));
        assert!(text.ends_with("Please restock soon"));
    }

    #[test]
    fn unrecognised_status_deserializes_as_unknown() {
        let m: Material = serde_json::from_value(json!({
            "name": "Labels", "quantity": 1, "threshold": 2, "status": "discontinued"
        }))
        .unwrap();
        assert_eq!(m.status, StockStatus::Unknown);
        assert_eq!(m.unit, "");
    }
}
