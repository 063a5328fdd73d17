//! Exportable valuation reports

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use super::format::{kilometres, lakhs};
use crate::domain::PredictionRecord;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write report to '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// JSON document exported for one completed prediction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValuationReport {
    #[serde(rename = "Vehicle")]
    pub vehicle: String,
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Present_Price")]
    pub present_price: String,
    #[serde(rename = "Predicted_Price")]
    pub predicted_price: String,
    #[serde(rename = "Kilometers")]
    pub kilometers: String,
    #[serde(rename = "Fuel_Type")]
    pub fuel_type: String,
    #[serde(rename = "Transmission")]
    pub transmission: String,
    #[serde(rename = "Seller_Type")]
    pub seller_type: String,
    #[serde(rename = "Owner")]
    pub owner: u8,
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
    #[serde(skip)]
    file_stamp: String,
}

impl ValuationReport {
    pub fn from_record(record: &PredictionRecord) -> Self {
        let features = &record.features;

        Self {
            vehicle: features.name.clone(),
            year: features.year,
            present_price: lakhs(features.present_price),
            predicted_price: lakhs(record.predicted_price),
            kilometers: kilometres(features.kms_driven),
            fuel_type: features.fuel_type.to_string(),
            transmission: features.transmission.to_string(),
            seller_type: features.seller_type.to_string(),
            owner: features.owner,
            timestamp: record.timestamp(),
            file_stamp: record.captured_at.format("%Y%m%d_%H%M%S").to_string(),
        }
    }

    /// `valuation_<name>_<stamp>.json` with spaces in the name replaced by `_`
    pub fn file_name(&self) -> String {
        format!(
            "valuation_{}_{}.json",
            self.vehicle.replace(' ', "_"),
            self.file_stamp
        )
    }

    pub fn to_json(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the report into `dir`, returning the created file's path
    pub fn write_to(&self, dir: impl AsRef<Path>) -> Result<PathBuf, ReportError> {
        let path = dir.as_ref().join(self.file_name());
        let body = self.to_json()?;

        std::fs::write(&path, body).map_err(|source| ReportError::Io {
            path: path.clone(),
            source,
        })?;

        info!(path = %path.display(), "Valuation report exported");
        Ok(path)
    }
}
