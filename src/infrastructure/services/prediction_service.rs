//! Prediction service - validates vehicle records and scores them

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::prediction::{PredictionResult, PriceScorer, ScorerInfo};
use crate::domain::{DomainError, VehicleFeatures};
use crate::infrastructure::observability::{record_prediction, PredictionOutcome};

/// Prediction service wrapping the scorer loaded at startup.
///
/// The scorer is either present for the whole process lifetime or absent
/// with the reason it failed to load; it is never swapped at runtime.
pub struct PredictionService {
    scorer: Option<Arc<dyn PriceScorer>>,
    unavailable_reason: String,
}

impl PredictionService {
    /// Create a service backed by a loaded scorer
    pub fn new(scorer: Arc<dyn PriceScorer>) -> Self {
        Self {
            scorer: Some(scorer),
            unavailable_reason: String::new(),
        }
    }

    /// Create a service whose scoring artifact could not be loaded
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            scorer: None,
            unavailable_reason: reason.into(),
        }
    }

    /// Whether a scoring artifact is loaded
    pub fn is_ready(&self) -> bool {
        self.scorer.is_some()
    }

    /// Metadata of the loaded scorer
    pub fn info(&self) -> Result<ScorerInfo, DomainError> {
        Ok(self.scorer()?.info())
    }

    /// Validate an untyped request body, then score it
    pub fn predict_json(&self, payload: &Value) -> Result<PredictionResult, DomainError> {
        let features = VehicleFeatures::from_json(payload).map_err(|e| {
            debug!(error = %e, "Rejected prediction request");
            record_prediction(PredictionOutcome::Invalid);
            DomainError::from(e)
        })?;

        self.predict(&features)
    }

    /// Score already validated features
    pub fn predict(&self, features: &VehicleFeatures) -> Result<PredictionResult, DomainError> {
        let scorer = self.scorer().inspect_err(|_| {
            record_prediction(PredictionOutcome::Unavailable);
        })?;

        match scorer.score(features) {
            Ok(price) => {
                debug!(car_name = %features.name, price, "Scored vehicle");
                record_prediction(PredictionOutcome::Success);
                Ok(PredictionResult::new(price))
            }
            Err(e) => {
                warn!(error = %e, "Scoring failed");
                record_prediction(PredictionOutcome::Failed);
                Err(e)
            }
        }
    }

    fn scorer(&self) -> Result<&Arc<dyn PriceScorer>, DomainError> {
        self.scorer.as_ref().ok_or_else(|| {
            DomainError::scoring_unavailable(format!(
                "scoring artifact is not loaded: {}",
                self.unavailable_reason
            ))
        })
    }
}

impl std::fmt::Debug for PredictionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PredictionService")
            .field("ready", &self.is_ready())
            .finish()
    }
}
