//! In-memory prediction session

use std::sync::Arc;

use chrono::{Datelike, Local};
use tracing::{info, warn};

use super::error::ClientError;
use super::http::PredictionApi;
use crate::domain::vehicle::validate_client_input;
use crate::domain::{FuelType, PredictionRecord, VehicleFeatures};

/// Number of entries the history view shows
pub const HISTORY_LIMIT: usize = 10;

/// Where a session is in the request lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestPhase {
    Idle,
    Submitting,
}

/// Result of one submit action
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Success(PredictionRecord),
    Failed(ClientError),
}

/// Aggregates over the session history
#[derive(Debug, Clone, PartialEq)]
pub struct SessionStats {
    pub count: usize,
    pub average: f64,
    pub max: f64,
    pub min: f64,
    /// Predictions per fuel type, in declaration order
    pub fuel_counts: Vec<(FuelType, usize)>,
}

/// Prediction history for one interactive session.
///
/// Only successful predictions are recorded. Nothing outlives the session.
pub struct PredictionSession {
    api: Arc<dyn PredictionApi>,
    history: Vec<PredictionRecord>,
    phase: RequestPhase,
    current_year: i32,
}

impl PredictionSession {
    pub fn new(api: Arc<dyn PredictionApi>) -> Self {
        Self::with_current_year(api, Local::now().year())
    }

    /// Session evaluating client-side bounds against a fixed year
    pub fn with_current_year(api: Arc<dyn PredictionApi>, current_year: i32) -> Self {
        Self {
            api,
            history: Vec::new(),
            phase: RequestPhase::Idle,
            current_year,
        }
    }

    pub fn phase(&self) -> RequestPhase {
        self.phase
    }

    pub fn current_year(&self) -> i32 {
        self.current_year
    }

    /// Validate, gate on service health, then request a prediction.
    ///
    /// Failures are returned once without retrying and leave the history untouched.
    pub async fn submit(&mut self, features: VehicleFeatures) -> SubmitOutcome {
        self.phase = RequestPhase::Submitting;
        let outcome = self.attempt(&features).await;
        self.phase = RequestPhase::Idle;

        match outcome {
            Ok(price) => {
                let record = PredictionRecord::new(features, price, Local::now());
                info!(car_name = %record.features.name, price, "Prediction recorded");
                self.history.push(record.clone());
                SubmitOutcome::Success(record)
            }
            Err(e) => {
                warn!(kind = e.kind(), error = %e, "Prediction failed");
                SubmitOutcome::Failed(e)
            }
        }
    }

    async fn attempt(&self, features: &VehicleFeatures) -> Result<f64, ClientError> {
        validate_client_input(features, self.current_year)
            .map_err(|e| ClientError::Validation(e.into_fields()))?;

        if !self.api.health().await {
            return Err(ClientError::network(
                "API server is not accessible. Please start the backend service.",
            ));
        }

        self.api.predict(features).await
    }

    /// All records, oldest first
    pub fn history(&self) -> &[PredictionRecord] {
        &self.history
    }

    /// The last `limit` records, most recent first
    pub fn recent(&self, limit: usize) -> impl Iterator<Item = &PredictionRecord> {
        self.history.iter().rev().take(limit)
    }

    pub fn last_prediction(&self) -> Option<&PredictionRecord> {
        self.history.last()
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }

    /// Statistics over the history, or `None` when nothing was predicted yet
    pub fn stats(&self) -> Option<SessionStats> {
        if self.history.is_empty() {
            return None;
        }

        let prices = self.history.iter().map(|r| r.predicted_price);
        let sum: f64 = prices.clone().sum();
        let max = prices.clone().fold(f64::MIN, f64::max);
        let min = prices.fold(f64::MAX, f64::min);

        let fuel_counts = FuelType::ALL
            .iter()
            .map(|fuel| {
                let count = self
                    .history
                    .iter()
                    .filter(|r| r.features.fuel_type == *fuel)
                    .count();
                (*fuel, count)
            })
            .collect();

        Some(SessionStats {
            count: self.history.len(),
            average: sum / self.history.len() as f64,
            max,
            min,
            fuel_counts,
        })
    }
}

impl std::fmt::Debug for PredictionSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PredictionSession")
            .field("history", &self.history.len())
            .field("phase", &self.phase)
            .finish()
    }
}
