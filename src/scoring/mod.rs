//! Scoring Module - feature template, vector builder and classifier
//!
//! The classifier and template are loaded once at startup. If either fails
//! to load the service runs in [`Scoring::Unavailable`] mode and every alert
//! is scored as "N/A".

pub mod classifier;
pub mod template;
pub mod vector;

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

use crate::models::{Alert, ScoringResult};

pub use classifier::{Classifier, LogisticModel};
pub use template::FeatureTemplate;
pub use vector::FeatureVector;

/// Startup failure loading the model or feature template
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("feature template is empty")]
    EmptyTemplate,

    #[error("duplicate feature column '{0}'")]
    DuplicateColumn(String),

    #[error("invalid model: {0}")]
    InvalidModel(String),

    #[error("model expects {expected} features but template has {actual}")]
    WidthMismatch { expected: usize, actual: usize },
}

/// Per-request prediction failure, degraded to "N/A" by the caller
#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("feature vector has {actual} columns, model expects {expected}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("model produced a non-finite probability")]
    NonFinite,

    #[error("prediction failed: {0}")]
    Prediction(String),
}

/// Load-once scoring state
#[derive(Clone)]
pub enum Scoring {
    Ready {
        template: Arc<FeatureTemplate>,
        classifier: Arc<dyn Classifier>,
    },
    Unavailable {
        reason: String,
    },
}

impl Scoring {
    /// Load model and template, falling back to `Unavailable` on any error
    pub fn load(model_path: &Path, features_path: &Path) -> Self {
        let loaded = FeatureTemplate::load(features_path).and_then(|template| {
            let model = LogisticModel::load(model_path)?;
            Self::ready(template, Arc::new(model))
        });

        match loaded {
            Ok(scoring) => {
                tracing::info!("Scoring ready with {} feature columns", scoring.feature_count());
                scoring
            }
            Err(e) => {
                tracing::warn!("Model or feature template failed to load, predictions disabled: {}", e);
                Self::unavailable(e.to_string())
            }
        }
    }

    pub fn ready(template: FeatureTemplate, classifier: Arc<dyn Classifier>) -> Result<Self, LoadError> {
        if let Some(expected) = classifier.input_width() {
            if expected != template.len() {
                return Err(LoadError::WidthMismatch { expected, actual: template.len() });
            }
        }

        Ok(Scoring::Ready {
            template: Arc::new(template),
            classifier,
        })
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Scoring::Unavailable { reason: reason.into() }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Scoring::Ready { .. })
    }

    pub fn feature_count(&self) -> usize {
        match self {
            Scoring::Ready { template, .. } => template.len(),
            Scoring::Unavailable { .. } => 0,
        }
    }

    pub fn status(&self) -> &'static str {
        if self.is_ready() {
            "ready"
        } else {
            "unavailable"
        }
    }

    /// Score an alert. Never fails: errors degrade to "N/A".
    pub fn score(&self, alert: &Alert) -> ScoringResult {
        match self {
            Scoring::Ready { template, classifier } => {
                let vector = FeatureVector::build(template, alert);
                match classifier.score(&vector) {
                    Ok((label, proba)) => ScoringResult::new(label, proba),
                    Err(e) => {
                        tracing::warn!("Prediction error: {}", e);
                        ScoringResult::not_available()
                    }
                }
            }
            Scoring::Unavailable { .. } => ScoringResult::not_available(),
        }
    }
}

impl std::fmt::Debug for Scoring {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scoring::Ready { template, .. } => f
                .debug_struct("Ready")
                .field("feature_count", &template.len())
                .finish_non_exhaustive(),
            Scoring::Unavailable { reason } => f.debug_struct("Unavailable").field("reason", reason).finish(),
        }
    }
}
