//! Immutable service context shared by handlers

use std::sync::Arc;

use crate::infrastructure::services::PredictionService;

/// Application state built once at startup and never mutated
#[derive(Clone, Debug)]
pub struct AppState {
    pub prediction_service: Arc<PredictionService>,
}

impl AppState {
    pub fn new(prediction_service: PredictionService) -> Self {
        Self {
            prediction_service: Arc::new(prediction_service),
        }
    }
}
