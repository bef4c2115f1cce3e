use crate::errors::{Field, ValidationError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Scan document as posted by a device, before any validation.
///
/// Field names follow the scanner app (`id_unico`, `entrada_sali`, `puesto`); the
/// canonical names are accepted too. Loosely typed on purpose so that the validator,
/// not the deserializer, decides which field is wrong.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawScan {
    #[serde(default, alias = "id_unico")]
    pub employee_id: Option<Value>,

    #[serde(default, alias = "entrada_sali")]
    pub action: Option<Value>,

    #[serde(default)]
    pub timestamp: Option<Value>,

    #[serde(default)]
    pub location: Option<Value>,

    /// Informational only: the directory is authoritative for names.
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default, alias = "puesto")]
    pub role: Option<String>,
}

impl RawScan {
    pub fn from_json(s: &str) -> Result<Self, ValidationError> {
        serde_json::from_str(s)
            .map_err(|e| ValidationError::new(Field::Payload, format!("malformed JSON: {e}")))
    }

    /// Convenience constructor for callers that already hold typed values.
    pub fn new(
        employee_id: &str,
        action: &str,
        timestamp: &str,
        location: Option<(f64, f64)>,
    ) -> Self {
        Self {
            employee_id: Some(Value::from(employee_id)),
            action: Some(Value::from(action)),
            timestamp: Some(Value::from(timestamp)),
            location: location.map(|(lat, lon)| {
                serde_json::json!({ "latitude": lat, "longitude": lon })
            }),
            name: None,
            role: None,
        }
    }
}
