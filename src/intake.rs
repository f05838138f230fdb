//! Intake Handler
//!
//! validate -> score -> append log row -> render map. Runs synchronously;
//! the HTTP layer moves it onto the blocking pool.

use std::sync::Arc;

use chrono::Local;

use crate::models::{AlertSubmission, LogRow};
use crate::scoring::Scoring;
use crate::store::{AlertLog, MapRenderer};
use crate::AppResult;

#[derive(Debug, Clone)]
pub struct IntakeHandler {
    scoring: Arc<Scoring>,
    log: AlertLog,
    map: MapRenderer,
}

impl IntakeHandler {
    pub fn new(scoring: Arc<Scoring>, log: AlertLog, map: MapRenderer) -> Self {
        Self { scoring, log, map }
    }

    pub fn scoring(&self) -> &Scoring {
        &self.scoring
    }

    pub fn map(&self) -> &MapRenderer {
        &self.map
    }

    /// Accept one submission and return the row that was logged
    pub fn accept(&self, submission: AlertSubmission) -> AppResult<LogRow> {
        let alert = submission.validate()?;
        let received_at = Local::now();

        tracing::info!(
            "Received alert: {} at ({}, {})",
            alert.incident_type, alert.latitude, alert.longitude
        );

        let score = self.scoring.score(&alert);
        let row = LogRow::new(&alert, received_at, score);

        self.log.append(&row)?;
        self.map.render(&row)?;

        tracing::debug!(
            "Alert logged: outcome={}, probability={}",
            row.predicted_outcome, row.probability
        );
        Ok(row)
    }
}
