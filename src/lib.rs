//! Car Valuation
//!
//! Resale-price estimation for used cars:
//! - An HTTP prediction service backed by a pre-trained scoring artifact
//! - An interactive client with local depreciation and usage analytics
//! - Session history and JSON valuation reports

pub mod api;
pub mod cli;
pub mod client;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use domain::DomainError;
use infrastructure::scoring::LinearPriceModel;
use infrastructure::services::PredictionService;
use tracing::{info, warn};

/// Create the application state, loading the scoring artifact once.
///
/// A missing or invalid artifact does not abort startup: the service comes up
/// and every prediction is answered as unavailable.
pub fn create_app_state(config: &AppConfig) -> AppState {
    let path = &config.scoring.artifact_path;

    let service = match LinearPriceModel::load(path) {
        Ok(model) => {
            info!(
                artifact = %path,
                name = %model.name,
                version = %model.version,
                "Scoring artifact loaded"
            );
            PredictionService::new(Arc::new(model))
        }
        Err(e) => {
            let err = DomainError::from(e);
            warn!(artifact = %path, error = %err, "Scoring artifact unavailable, predictions disabled");
            PredictionService::unavailable(err.to_string())
        }
    };

    AppState::new(service)
}
