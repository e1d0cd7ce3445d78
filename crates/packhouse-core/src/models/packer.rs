use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::AppError;

/// Free-form client supplied packer fields.
pub type PackerFields = Map<String, Value>;

/// A person or role responsible for packing orders.
///
/// Only `id` is owned by the server; every other key is stored exactly as the
/// client sent it and flattened back into the same JSON object on the way out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Packer {
    pub id: Uuid,
    #[serde(flatten)]
    pub fields: PackerFields,
}

impl Packer {
    pub fn new(id: Uuid, fields: PackerFields) -> Self {
        Self { id, fields }
    }

    /// Display name, if the client stored one.
    pub fn name(&self) -> Option<&str> {
        self.fields.get("name").and_then(Value::as_str)
    }
}

/// Turn a request body into storable packer fields.
///
/// The body must be a JSON object. A client supplied `id` is dropped so the
/// document id stays the single source of identity. With `require_name` the
/// object must carry a non-blank `name` string (create and full replace).
pub fn sanitize_packer_fields(body: Value, require_name: bool) -> Result<PackerFields, AppError> {
    let mut fields = match body {
        Value::Object(map) => map,
        _ => {
            return Err(AppError::InvalidInput(
                "Packer body must be a JSON object".to_string(),
            ))
        }
    };

    fields.remove("id");

    if require_name {
        let has_name = fields
            .get("name")
            .and_then(Value::as_str)
            .map(|name| !name.trim().is_empty())
            .unwrap_or(false);
        if !has_name {
            return Err(AppError::InvalidInput(
                "Field 'name' is required".to_string(),
            ));
        }
    } else if fields.is_empty() {
        return Err(AppError::InvalidInput(
            "Update body must contain at least one field".to_string(),
        ));
    }

    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn packer_serializes_flat() {
        let id = Uuid::new_v4();
        let fields = sanitize_packer_fields(json!({"name": "Asha", "shift": "night"}), true).unwrap();
        let packer = Packer::new(id, fields);

        let value = serde_json::to_value(&packer).unwrap();
        assert_eq!(value["id"], json!(id.to_string()));
        assert_eq!(value["name"], json!("Asha"));
        assert_eq!(value["shift"], json!("night"));

        let back: Packer = serde_json::from_value(value).unwrap();
        assert_eq!(back, packer);
        assert_eq!(back.name(), Some("Asha"));
    }

    #[test]
    fn client_id_is_dropped() {
        let fields = sanitize_packer_fields(json!({"id": "abc", "name": "Ravi"}), true).unwrap();
        assert!(!fields.contains_key("id"));
    }

    #[test]
    fn non_object_body_is_rejected() {
        assert!(matches!(
            sanitize_packer_fields(json!(["name"]), true),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn name_required_on_create() {
        assert!(sanitize_packer_fields(json!({"phone": "+911"}), true).is_err());
        assert!(sanitize_packer_fields(json!({"name": "   "}), true).is_err());
        assert!(sanitize_packer_fields(json!({"phone": "+911"}), false).is_ok());
    }

    #[test]
    fn empty_patch_is_rejected() {
        assert!(sanitize_packer_fields(json!({}), false).is_err());
        assert!(sanitize_packer_fields(json!({"id": "x"}), false).is_err());
    }
}
