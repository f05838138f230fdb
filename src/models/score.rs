//! Scoring result model

use serde::{Serialize, Serializer};

/// Sentinel written when no prediction is available
pub const NOT_AVAILABLE: &str = "N/A";

/// Predicted outcome label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Resolved,
    Unresolved,
    NotAvailable,
}

impl Outcome {
    /// Map a binary class to its label (1 = resolved)
    pub fn from_class(class: u8) -> Self {
        if class == 1 {
            Outcome::Resolved
        } else {
            Outcome::Unresolved
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Resolved => "Resolved",
            Outcome::Unresolved => "Unresolved/In Progress",
            Outcome::NotAvailable => NOT_AVAILABLE,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Outcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Probability of class 1, or "N/A"
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Probability {
    Value(f64),
    NotAvailable,
}

impl Probability {
    #[cfg(test)]
    pub fn value(&self) -> Option<f64> {
        match self {
            Probability::Value(p) => Some(*p),
            Probability::NotAvailable => None,
        }
    }
}

impl std::fmt::Display for Probability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Probability::Value(p) => write!(f, "{:.2}", p),
            Probability::NotAvailable => f.write_str(NOT_AVAILABLE),
        }
    }
}

impl Serialize for Probability {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Probability::Value(p) => serializer.serialize_f64(*p),
            Probability::NotAvailable => serializer.serialize_str(NOT_AVAILABLE),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoringResult {
    pub predicted_outcome: Outcome,
    pub probability: Probability,
}

impl ScoringResult {
    pub fn new(class: u8, probability: f64) -> Self {
        Self {
            predicted_outcome: Outcome::from_class(class),
            probability: Probability::Value(probability),
        }
    }

    /// Result used when the classifier is unavailable or fails
    pub fn not_available() -> Self {
        Self {
            predicted_outcome: Outcome::NotAvailable,
            probability: Probability::NotAvailable,
        }
    }
}
