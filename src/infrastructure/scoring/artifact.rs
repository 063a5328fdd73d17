//! Linear scoring artifact persisted as JSON

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::domain::prediction::{PriceScorer, ScorerInfo};
use crate::domain::vehicle::{
    FuelType, SellerType, Transmission, VehicleFeatures, FIELD_FUEL_TYPE, FIELD_KMS_DRIVEN,
    FIELD_OWNER, FIELD_PRESENT_PRICE, FIELD_SELLER_TYPE, FIELD_TRANSMISSION, FIELD_YEAR,
};
use crate::domain::DomainError;

/// Errors raised while loading a scoring artifact
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Failed to read artifact {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed artifact: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Coefficient '{name}' is not a finite number")]
    NonFinite { name: String },

    #[error("Artifact has no weight for {field} label '{label}'")]
    MissingLabel { field: &'static str, label: &'static str },
}

impl From<ArtifactError> for DomainError {
    fn from(err: ArtifactError) -> Self {
        DomainError::configuration(err.to_string())
    }
}

/// Weights applied to the numeric features
#[derive(Debug, Clone, Deserialize)]
pub struct NumericCoefficients {
    /// Applied to `year - base_year`
    pub year: f64,
    pub present_price: f64,
    pub kms_driven: f64,
    pub owner: f64,
}

/// Label → weight tables for the categorical features
#[derive(Debug, Clone, Deserialize)]
pub struct CategoricalWeights {
    #[serde(rename = "Fuel_Type")]
    pub fuel_type: HashMap<String, f64>,
    #[serde(rename = "Seller_Type")]
    pub seller_type: HashMap<String, f64>,
    #[serde(rename = "Transmission")]
    pub transmission: HashMap<String, f64>,
}

/// Pre-trained linear price model.
///
/// Categorical features are looked up by their text labels. The model holds
/// no mutable state and is shared read-only across requests.
#[derive(Debug, Clone, Deserialize)]
pub struct LinearPriceModel {
    pub name: String,
    pub version: String,
    pub base_year: i32,
    pub intercept: f64,
    pub coefficients: NumericCoefficients,
    pub categorical: CategoricalWeights,
}

impl LinearPriceModel {
    /// Load and verify an artifact from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ArtifactError> {
        let model: Self = serde_json::from_str(raw)?;
        model.verify()?;
        Ok(model)
    }

    fn verify(&self) -> Result<(), ArtifactError> {
        let numeric = [
            ("intercept", self.intercept),
            ("year", self.coefficients.year),
            ("present_price", self.coefficients.present_price),
            ("kms_driven", self.coefficients.kms_driven),
            ("owner", self.coefficients.owner),
        ];

        for (name, value) in numeric {
            if !value.is_finite() {
                return Err(ArtifactError::NonFinite {
                    name: name.to_string(),
                });
            }
        }

        verify_labels(FIELD_FUEL_TYPE, FuelType::LABELS, &self.categorical.fuel_type)?;
        verify_labels(FIELD_SELLER_TYPE, SellerType::LABELS, &self.categorical.seller_type)?;
        verify_labels(
            FIELD_TRANSMISSION,
            Transmission::LABELS,
            &self.categorical.transmission,
        )?;

        Ok(())
    }
}

fn verify_labels(
    field: &'static str,
    labels: &'static [&'static str],
    weights: &HashMap<String, f64>,
) -> Result<(), ArtifactError> {
    for label in labels {
        match weights.get(*label) {
            None => return Err(ArtifactError::MissingLabel { field, label }),
            Some(w) if !w.is_finite() => {
                return Err(ArtifactError::NonFinite {
                    name: format!("{}.{}", field, label),
                })
            }
            Some(_) => {}
        }
    }

    Ok(())
}

fn weight(table: &HashMap<String, f64>, field: &str, label: &str) -> Result<f64, DomainError> {
    table
        .get(label)
        .copied()
        .ok_or_else(|| DomainError::scoring(format!("no weight for {} '{}'", field, label)))
}

impl PriceScorer for LinearPriceModel {
    fn score(&self, features: &VehicleFeatures) -> Result<f64, DomainError> {
        let c = &self.coefficients;

        let numeric = self.intercept
            + c.year * (f64::from(features.year) - f64::from(self.base_year))
            + c.present_price * features.present_price
            + c.kms_driven * features.kms_driven as f64
            + c.owner * f64::from(features.owner);

        let categorical = weight(
            &self.categorical.fuel_type,
            FIELD_FUEL_TYPE,
            features.fuel_type.as_str(),
        )? + weight(
            &self.categorical.seller_type,
            FIELD_SELLER_TYPE,
            features.seller_type.as_str(),
        )? + weight(
            &self.categorical.transmission,
            FIELD_TRANSMISSION,
            features.transmission.as_str(),
        )?;

        let estimate = numeric + categorical;

        if !estimate.is_finite() {
            return Err(DomainError::scoring("estimate is not a finite number"));
        }

        Ok(estimate)
    }

    fn info(&self) -> ScorerInfo {
        ScorerInfo {
            name: self.name.clone(),
            version: self.version.clone(),
            features: [
                FIELD_YEAR,
                FIELD_PRESENT_PRICE,
                FIELD_KMS_DRIVEN,
                FIELD_FUEL_TYPE,
                FIELD_SELLER_TYPE,
                FIELD_TRANSMISSION,
                FIELD_OWNER,
            ]
            .iter()
            .map(|f| f.to_string())
            .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::vehicle::fixtures::defender;
    use crate::infrastructure::scoring::TEST_ARTIFACT;

    #[test]
    fn test_score_example_listing() {
        let model = LinearPriceModel::from_json_str(TEST_ARTIFACT).unwrap();
        // 1.0 + 0.5*10 + 0.5*10.5 - 0.27 - 1.0
        let score = model.score(&defender()).unwrap();
        assert!((score - 9.98).abs() < 1e-9, "got {}", score);
    }

    #[test]
    fn test_extreme_years_score_without_overflow() {
        let model = LinearPriceModel::from_json_str(TEST_ARTIFACT).unwrap();

        for year in [i32::MIN, i32::MAX] {
            let features = VehicleFeatures {
                year,
                ..defender()
            };
            assert!(model.score(&features).unwrap().is_finite());
        }
    }

    #[test]
    fn test_categorical_labels_change_score() {
        let model = LinearPriceModel::from_json_str(TEST_ARTIFACT).unwrap();
        let base = model.score(&defender()).unwrap();

        let mut diesel = defender();
        diesel.fuel_type = FuelType::Diesel;
        diesel.transmission = Transmission::Automatic;

        let score = model.score(&diesel).unwrap();
        assert!((score - base - 3.5).abs() < 1e-9);
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let model = LinearPriceModel::from_json_str(TEST_ARTIFACT).unwrap();
        let first = model.score(&defender()).unwrap();

        for _ in 0..10 {
            assert_eq!(model.score(&defender()).unwrap(), first);
        }
    }

    #[test]
    fn test_missing_label_is_rejected_at_load() {
        let raw = TEST_ARTIFACT.replace(r#""CNG": -0.5"#, r#""LPG": -0.5"#);
        let err = LinearPriceModel::from_json_str(&raw).unwrap_err();

        assert!(matches!(
            err,
            ArtifactError::MissingLabel {
                field: "Fuel_Type",
                label: "CNG"
            }
        ));
    }

    #[test]
    fn test_malformed_artifact() {
        let err = LinearPriceModel::from_json_str("{\"name\": 1}").unwrap_err();
        assert!(matches!(err, ArtifactError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = LinearPriceModel::load("/nonexistent/model.json").unwrap_err();
        assert!(matches!(err, ArtifactError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/model.json"));

        let domain = DomainError::from(err);
        assert!(matches!(domain, DomainError::Configuration { .. }));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, TEST_ARTIFACT).unwrap();

        let model = LinearPriceModel::load(&path).unwrap();
        assert_eq!(model.info().name, "test-linear");
        assert_eq!(model.info().features.len(), 7);
    }

    #[test]
    fn test_bundled_artifact_is_valid() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/artifacts/car_price_model.json");
        let model = LinearPriceModel::load(path).unwrap();

        assert!(model.score(&defender()).unwrap() > 0.0);
    }
}
