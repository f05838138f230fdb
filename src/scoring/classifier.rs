//! Classifier Adapter
//!
//! Wraps a pre-trained binary model behind the [`Classifier`] trait so the
//! intake path never depends on a concrete model format.

use std::path::Path;

use serde::Deserialize;

use super::vector::FeatureVector;
use super::{LoadError, ScoringError};

pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// Trait for binary classifiers scoring a single feature vector
pub trait Classifier: Send + Sync {
    /// Probability of class 1
    fn predict_proba(&self, vector: &FeatureVector<'_>) -> Result<f64, ScoringError>;

    fn threshold(&self) -> f64 {
        DEFAULT_THRESHOLD
    }

    /// Number of input columns the model expects, if known
    fn input_width(&self) -> Option<usize> {
        None
    }

    fn predict(&self, vector: &FeatureVector<'_>) -> Result<u8, ScoringError> {
        let proba = self.predict_proba(vector)?;
        Ok(u8::from(proba >= self.threshold()))
    }

    /// (label, probability) in one pass
    fn score(&self, vector: &FeatureVector<'_>) -> Result<(u8, f64), ScoringError> {
        let proba = self.predict_proba(vector)?;
        Ok((u8::from(proba >= self.threshold()), proba))
    }
}

/// Logistic regression exported as JSON
#[derive(Debug, Clone, Deserialize)]
pub struct LogisticModel {
    pub intercept: f64,
    pub coefficients: Vec<f64>,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

impl LogisticModel {
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let raw = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let model: LogisticModel = serde_json::from_str(&raw).map_err(|source| LoadError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        model.check()?;

        tracing::info!(
            "Classifier loaded from {} ({} coefficients, threshold {})",
            path.display(),
            model.coefficients.len(),
            model.threshold
        );
        Ok(model)
    }

    fn check(&self) -> Result<(), LoadError> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(LoadError::InvalidModel(format!("threshold {} out of range", self.threshold)));
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|w| !w.is_finite()) {
            return Err(LoadError::InvalidModel("non-finite weight".to_string()));
        }
        Ok(())
    }
}

impl Classifier for LogisticModel {
    fn predict_proba(&self, vector: &FeatureVector<'_>) -> Result<f64, ScoringError> {
        if vector.len() != self.coefficients.len() {
            return Err(ScoringError::ShapeMismatch {
                expected: self.coefficients.len(),
                actual: vector.len(),
            });
        }

        let z = self.intercept
            + self
                .coefficients
                .iter()
                .zip(vector.values())
                .map(|(w, x)| w * x)
                .sum::<f64>();

        let proba = sigmoid(z);
        if proba.is_finite() {
            Ok(proba)
        } else {
            Err(ScoringError::NonFinite)
        }
    }

    fn threshold(&self) -> f64 {
        self.threshold
    }

    fn input_width(&self) -> Option<usize> {
        Some(self.coefficients.len())
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}
