//! Feature Vector - single-row model input
//!
//! Always carries exactly the template's columns, in template order.

use crate::models::Alert;
use super::template::FeatureTemplate;

pub const LATITUDE_COLUMN: &str = "Latitude";
pub const LONGITUDE_COLUMN: &str = "Longitude";
pub const INCIDENT_TYPE_PREFIX: &str = "Incident Type_";

#[derive(Debug, Clone)]
pub struct FeatureVector<'a> {
    template: &'a FeatureTemplate,
    values: Vec<f64>,
}

impl<'a> FeatureVector<'a> {
    /// Zeroed vector shaped by the template
    pub fn zeroed(template: &'a FeatureTemplate) -> Self {
        Self {
            template,
            values: vec![0.0; template.len()],
        }
    }

    /// Build the vector for an alert.
    ///
    /// Columns missing from the template are skipped, so an incident type
    /// without a one-hot column leaves every flag at 0.
    pub fn build(template: &'a FeatureTemplate, alert: &Alert) -> Self {
        let mut vector = Self::zeroed(template);
        vector.set(LATITUDE_COLUMN, alert.latitude);
        vector.set(LONGITUDE_COLUMN, alert.longitude);

        let one_hot = one_hot_column(&alert.incident_type);
        if !vector.set(&one_hot, 1.0) {
            tracing::debug!("No one-hot column for incident type '{}'", alert.incident_type);
        }

        vector
    }

    /// Set a column by name, returns false if the template lacks it
    pub fn set(&mut self, column: &str, value: f64) -> bool {
        match self.template.position(column) {
            Some(i) => {
                self.values[i] = value;
                true
            }
            None => false,
        }
    }

    #[cfg(test)]
    pub fn get(&self, column: &str) -> Option<f64> {
        self.template.position(column).map(|i| self.values[i])
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.template
            .columns()
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}

pub fn one_hot_column(incident_type: &str) -> String {
    format!("{}{}", INCIDENT_TYPE_PREFIX, incident_type)
}
