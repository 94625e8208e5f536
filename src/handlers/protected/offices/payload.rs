use std::collections::HashMap;

use axum::{extract::rejection::JsonRejection, http::StatusCode, Json};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::database::OfficeFields;
use crate::error::ApiError;

/// How strictly required fields are checked on create and update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ValidationPolicy {
    /// Every field must be present and truthy: empty strings, nulls and a
    /// zero quantity all count as missing.
    #[default]
    Truthy,
    /// As `Truthy`, except `quantity: 0` is accepted.
    AllowZeroQuantity,
}

/// Request body for POST /offices and PUT /offices/:id.
///
/// Owner fields sent by the client are not part of this shape and are
/// dropped during deserialization.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfficePayload {
    pub name: Option<String>,
    pub description: Option<String>,
    pub quantity: Option<i64>,
    pub date_added: Option<String>,
}

impl OfficePayload {
    /// Decode an axum JSON body. Bodies over the size limit are a 413, every
    /// other failure a 400.
    pub fn from_body(body: Result<Json<Value>, JsonRejection>) -> Result<Self, ApiError> {
        let Json(value) = body.map_err(|rejection| {
            if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                ApiError::payload_too_large("Request body too large")
            } else {
                ApiError::invalid_json(format!("Invalid JSON body: {}", rejection.body_text()))
            }
        })?;

        serde_json::from_value(value).map_err(|e| {
            ApiError::validation_error(format!("Invalid field format: {}", e), None)
        })
    }

    pub fn validate(self, policy: ValidationPolicy) -> Result<OfficeFields, ApiError> {
        let mut missing = HashMap::new();
        let mut invalid = HashMap::new();

        let name = required_text(self.name, "name", &mut missing);
        let description = required_text(self.description, "description", &mut missing);

        let quantity = match self.quantity {
            Some(0) if policy == ValidationPolicy::Truthy => None,
            other => other,
        };
        if quantity.is_none() {
            missing.insert("quantity".to_string(), REQUIRED.to_string());
        }

        let date_added = required_text(self.date_added, "dateAdded", &mut missing).and_then(|raw| {
            let parsed = parse_date_added(&raw);
            if parsed.is_none() {
                invalid.insert("dateAdded".to_string(), format!("Invalid date: {}", raw));
            }
            parsed
        });

        if !missing.is_empty() {
            missing.extend(invalid);
            return Err(ApiError::validation_error("All fields are required", Some(missing)));
        }
        if !invalid.is_empty() {
            return Err(ApiError::validation_error("Invalid field format", Some(invalid)));
        }

        match (name, description, quantity, date_added) {
            (Some(name), Some(description), Some(quantity), Some(date_added)) => Ok(OfficeFields {
                name,
                description,
                quantity,
                date_added,
            }),
            _ => Err(ApiError::validation_error("All fields are required", None)),
        }
    }
}

const REQUIRED: &str = "This field is required";

fn required_text(
    value: Option<String>,
    field: &str,
    missing: &mut HashMap<String, String>,
) -> Option<String> {
    match value {
        Some(text) if !text.is_empty() => Some(text),
        _ => {
            missing.insert(field.to_string(), REQUIRED.to_string());
            None
        }
    }
}

/// Accepts RFC 3339, a zone-less `YYYY-MM-DDTHH:MM:SS`, or a bare date.
/// Zone-less inputs are taken as UTC.
pub fn parse_date_added(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
