//! Prediction endpoint handlers

use axum::extract::State;
use serde_json::Value;
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::{PredictionResult, ScorerInfo};

/// POST /predict
///
/// The body is taken as untyped JSON so every offending field can be
/// reported at once instead of failing on the first.
pub async fn predict(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<Json<PredictionResult>, ApiError> {
    debug!("Received prediction request");

    let result = state.prediction_service.predict_json(&payload)?;

    Ok(Json(result))
}

/// GET /model
pub async fn model_info(State(state): State<AppState>) -> Result<Json<ScorerInfo>, ApiError> {
    Ok(Json(state.prediction_service.info()?))
}
