//! Scoring artifact loading

mod artifact;

pub use artifact::{ArtifactError, CategoricalWeights, LinearPriceModel, NumericCoefficients};

#[cfg(test)]
pub(crate) const TEST_ARTIFACT: &str = r#"{
    "name": "test-linear",
    "version": "0.0.1",
    "base_year": 2010,
    "intercept": 1.0,
    "coefficients": { "year": 0.5, "present_price": 0.5, "kms_driven": -0.00001, "owner": -1.0 },
    "categorical": {
        "Fuel_Type": { "Petrol": 0.0, "Diesel": 2.0, "CNG": -0.5 },
        "Seller_Type": { "Dealer": 0.0, "Individual": -1.0 },
        "Transmission": { "Manual": 0.0, "Automatic": 1.5 }
    }
}"#;
