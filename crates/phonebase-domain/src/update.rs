use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{DomainError, DomainResult};

/// The fixed set of mutable `device_details` columns. The struct itself is
/// the allow-list: a field exists here exactly when the column may be set by
/// an update, and the repository builds its SET clause from these fields
/// rather than from client-supplied key strings.
///
/// A JSON `null` for a key is treated as "field absent", not "set NULL".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_res: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub camera: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ram: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chipset: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub battery: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub battery_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

impl DeviceUpdate {
    /// Builds an update from a raw JSON object, silently dropping keys that
    /// are not in the allow-list. A value of the wrong type for a known key
    /// is a validation error.
    pub fn from_json(body: &Map<String, Value>) -> DomainResult<Self> {
        serde_json::from_value(Value::Object(body.clone()))
            .map_err(|e| DomainError::InvalidUpdateValue(e.to_string()))
    }

    /// True when no allow-listed field is present.
    pub fn is_empty(&self) -> bool {
        self.device_name.is_none()
            && self.device_image_url.is_none()
            && self.display_size.is_none()
            && self.display_res.is_none()
            && self.camera.is_none()
            && self.video.is_none()
            && self.ram.is_none()
            && self.chipset.is_none()
            && self.battery.is_none()
            && self.battery_type.is_none()
            && self.release_date.is_none()
            && self.body.is_none()
            && self.os_type.is_none()
            && self.storage.is_none()
            && self.price.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn keeps_only_allow_listed_keys() {
        let body = object(json!({
            "price": 500.0,
            "bogus_field": "x",
            "device_id": "must-not-leak-into-set-clause"
        }));

        let update = DeviceUpdate::from_json(&body).unwrap();
        assert_eq!(update.price, Some(500.0));
        assert_eq!(
            update,
            DeviceUpdate {
                price: Some(500.0),
                ..Default::default()
            }
        );
    }

    #[test]
    fn only_unrecognized_keys_is_empty() {
        let body = object(json!({"bogus": 1, "another": "y"}));
        let update = DeviceUpdate::from_json(&body).unwrap();
        assert!(update.is_empty());
    }

    #[test]
    fn null_values_count_as_absent() {
        let body = object(json!({"price": null}));
        let update = DeviceUpdate::from_json(&body).unwrap();
        assert!(update.is_empty());
    }

    #[test]
    fn release_date_parses_as_iso_date() {
        let body = object(json!({"release_date": "2024-01-15"}));
        let update = DeviceUpdate::from_json(&body).unwrap();
        assert_eq!(
            update.release_date,
            Some(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap())
        );
    }

    #[test]
    fn wrong_type_for_known_key_is_rejected() {
        let body = object(json!({"price": "not-a-number"}));
        let err = DeviceUpdate::from_json(&body).unwrap_err();
        assert!(matches!(err, DomainError::InvalidUpdateValue(_)));
    }

    #[test]
    fn default_update_is_empty() {
        assert!(DeviceUpdate::default().is_empty());
    }
}
