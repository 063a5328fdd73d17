//! Derived vehicle analytics computed without calling the prediction service

mod depreciation;
mod usage;
mod valuation;

pub use depreciation::{expected_value, vehicle_age, AgeClass, ANNUAL_DEPRECIATION_RATE, RESIDUAL_VALUE_FLOOR};
pub use usage::{average_yearly_km, usage_insight, UsageClass};
pub use valuation::{variance, PriceVariance, Recommendation, VarianceDirection};

use serde::Serialize;

use crate::domain::vehicle::FuelType;

/// Tone of an insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightLevel {
    Positive,
    Moderate,
    Caution,
    Info,
}

impl InsightLevel {
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Positive => "🟢",
            Self::Moderate => "🟡",
            Self::Caution => "🟠",
            Self::Info => "🔵",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Insight {
    pub level: InsightLevel,
    pub title: &'static str,
    pub description: &'static str,
}

impl Insight {
    pub const fn new(level: InsightLevel, title: &'static str, description: &'static str) -> Self {
        Self {
            level,
            title,
            description,
        }
    }
}

/// Static note for a fuel type label; unrecognised labels fall back to Petrol
pub fn fuel_note(label: &str) -> Insight {
    match label.parse::<FuelType>() {
        Ok(FuelType::Diesel) => Insight::new(
            InsightLevel::Info,
            "Diesel Engine",
            "Better fuel efficiency, higher resale in commercial segment",
        ),
        Ok(FuelType::Cng) => Insight::new(
            InsightLevel::Moderate,
            "CNG Variant",
            "Economical fuel costs, environmental friendly",
        ),
        Ok(FuelType::Petrol) | Err(_) => Insight::new(
            InsightLevel::Positive,
            "Petrol Engine",
            "Lower maintenance, preferred for city driving",
        ),
    }
}

/// Age, usage and fuel insights shown before a prediction is requested
pub fn market_insights(year: i32, kms_driven: u64, fuel_label: &str, current_year: i32) -> Vec<Insight> {
    vec![
        AgeClass::from_age(vehicle_age(year, current_year)).insight(),
        usage_insight(year, kms_driven, current_year).insight(),
        fuel_note(fuel_label),
    ]
}
