//! Alert submission and log row models

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::AppError;
use super::score::{Outcome, Probability, ScoringResult};

/// Timestamp format used in the alert log and map popup
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Column order of the alert log
pub const LOG_COLUMNS: [&str; 6] = [
    "Latitude",
    "Longitude",
    "Incident Type",
    "Timestamp",
    "Predicted Outcome",
    "Probability",
];

/// Raw submission body, fields are checked by [`AlertSubmission::validate`]
#[derive(Debug, Default, Deserialize)]
pub struct AlertSubmission {
    pub lat: Option<Value>,
    pub lon: Option<Value>,
    pub incident_type: Option<Value>,
}

/// A submission that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub latitude: f64,
    pub longitude: f64,
    pub incident_type: String,
}

impl AlertSubmission {
    pub fn from_json(body: Value) -> Result<Self, AppError> {
        if !body.is_object() {
            return Err(AppError::ValidationError("Invalid JSON payload".to_string()));
        }
        serde_json::from_value(body)
            .map_err(|_| AppError::ValidationError("Invalid JSON payload".to_string()))
    }

    pub fn validate(self) -> Result<Alert, AppError> {
        let (lat, lon, incident_type) = match (self.lat, self.lon, self.incident_type) {
            (Some(lat), Some(lon), Some(kind))
                if is_present(&lat) && is_present(&lon) && is_present(&kind) => (lat, lon, kind),
            _ => return Err(AppError::ValidationError("Incomplete data".to_string())),
        };

        let incident_type = match incident_type {
            Value::String(s) => s,
            _ => return Err(AppError::ValidationError("Invalid incident type".to_string())),
        };

        Ok(Alert {
            latitude: parse_coordinate(&lat)?,
            longitude: parse_coordinate(&lon)?,
            incident_type,
        })
    }
}

/// Null and blank strings count as missing
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        _ => true,
    }
}

fn parse_coordinate(value: &Value) -> Result<f64, AppError> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    parsed
        .filter(|v| v.is_finite())
        .ok_or_else(|| AppError::ValidationError("Invalid coordinates".to_string()))
}

/// One row of the alert log, fields in [`LOG_COLUMNS`] order
#[derive(Debug, Clone, Serialize)]
pub struct LogRow {
    pub latitude: f64,
    pub longitude: f64,
    pub incident_type: String,
    pub timestamp: String,
    pub predicted_outcome: Outcome,
    pub probability: Probability,
}

impl LogRow {
    pub fn new(alert: &Alert, received_at: DateTime<Local>, score: ScoringResult) -> Self {
        Self {
            latitude: alert.latitude,
            longitude: alert.longitude,
            incident_type: alert.incident_type.clone(),
            timestamp: received_at.format(TIMESTAMP_FORMAT).to_string(),
            predicted_outcome: score.predicted_outcome,
            probability: score.probability,
        }
    }
}
