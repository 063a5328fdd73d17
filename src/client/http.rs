//! HTTP client for the prediction service

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::debug;

#[cfg(test)]
use mockall::automock;

use super::error::ClientError;
use crate::api::types::ApiErrorResponse;
use crate::config::ClientConfig;
use crate::domain::{PredictionResult, VehicleFeatures};

/// Operations the interactive client needs from the prediction service
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PredictionApi: Send + Sync {
    /// Probe `GET /`; any failure counts as unreachable
    async fn health(&self) -> bool;

    /// Submit a vehicle record and return the estimated price in lakhs
    async fn predict(&self, features: &VehicleFeatures) -> Result<f64, ClientError>;
}

/// Real client using reqwest
#[derive(Debug, Clone)]
pub struct PredictionClient {
    client: reqwest::Client,
    base_url: String,
    health_timeout: Duration,
}

impl PredictionClient {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        health_timeout: Duration,
    ) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            health_timeout,
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        Self::new(
            config.api_url.clone(),
            Duration::from_secs(config.timeout_secs),
            Duration::from_secs(config.health_timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl PredictionApi for PredictionClient {
    async fn health(&self) -> bool {
        match self
            .client
            .get(self.url("/"))
            .timeout(self.health_timeout)
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!(error = %e, url = %self.base_url, "Health probe failed");
                false
            }
        }
    }

    async fn predict(&self, features: &VehicleFeatures) -> Result<f64, ClientError> {
        let response = self
            .client
            .post(self.url("/predict"))
            .json(features)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let result: PredictionResult = response.json().await?;
            return Ok(result.predicted_price);
        }

        let body = response.text().await?;
        Err(error_from_response(status, &body))
    }
}

/// Map a non-success response to a client error, reading the error envelope when present
fn error_from_response(status: StatusCode, body: &str) -> ClientError {
    match serde_json::from_str::<ApiErrorResponse>(body) {
        Ok(envelope)
            if status == StatusCode::UNPROCESSABLE_ENTITY && !envelope.error.fields.is_empty() =>
        {
            ClientError::Validation(envelope.error.fields)
        }
        Ok(envelope) => ClientError::server(status.as_u16(), envelope.error.message),
        Err(_) => {
            let message = match body.trim() {
                "" => status.canonical_reason().unwrap_or("unknown error").to_string(),
                text => text.to_string(),
            };
            ClientError::server(status.as_u16(), message)
        }
    }
}
