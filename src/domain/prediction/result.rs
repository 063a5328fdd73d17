//! Prediction outcome types

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::domain::vehicle::VehicleFeatures;

/// Price estimate returned by `POST /predict`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Estimated resale price in lakhs
    #[serde(rename = "prediction_price")]
    pub predicted_price: f64,
}

impl PredictionResult {
    pub fn new(predicted_price: f64) -> Self {
        Self { predicted_price }
    }
}

/// A completed prediction captured by a client session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub features: VehicleFeatures,
    pub predicted_price: f64,
    pub captured_at: DateTime<Local>,
}

impl PredictionRecord {
    pub fn new(features: VehicleFeatures, predicted_price: f64, captured_at: DateTime<Local>) -> Self {
        Self {
            features,
            predicted_price,
            captured_at,
        }
    }

    /// Capture timestamp formatted the way reports and history display it
    pub fn timestamp(&self) -> String {
        self.captured_at.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::vehicle::fixtures::defender;
    use chrono::TimeZone;

    #[test]
    fn test_prediction_result_wire_format() {
        let json = serde_json::to_string(&PredictionResult::new(7.25)).unwrap();
        assert_eq!(json, r#"{"prediction_price":7.25}"#);
    }

    #[test]
    fn test_prediction_result_parses_integer_price() {
        let result: PredictionResult = serde_json::from_str(r#"{"prediction_price":7}"#).unwrap();
        assert_eq!(result.predicted_price, 7.0);
    }

    #[test]
    fn test_record_timestamp_format() {
        let at = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        let record = PredictionRecord::new(defender(), 6.1, at);

        assert_eq!(record.timestamp(), "2024-03-09 14:05:07");
    }
}
