//! Yearly usage tiers

use super::depreciation::vehicle_age;
use super::{Insight, InsightLevel};

pub const LOW_USAGE_KM_PER_YEAR: f64 = 10_000.0;
pub const HIGH_USAGE_KM_PER_YEAR: f64 = 15_000.0;

/// Usage tier derived from average kilometres per year
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageClass {
    Low,
    Average,
    High,
}

impl UsageClass {
    pub fn from_yearly_km(avg_yearly_km: f64) -> Self {
        if avg_yearly_km < LOW_USAGE_KM_PER_YEAR {
            Self::Low
        } else if avg_yearly_km < HIGH_USAGE_KM_PER_YEAR {
            Self::Average
        } else {
            Self::High
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Low => "Low Usage",
            Self::Average => "Average Usage",
            Self::High => "High Usage",
        }
    }

    pub fn insight(&self) -> Insight {
        match self {
            Self::Low => Insight::new(
                InsightLevel::Positive,
                self.title(),
                "Below average annual mileage - positive for resale",
            ),
            Self::Average => Insight::new(
                InsightLevel::Moderate,
                self.title(),
                "Normal usage pattern for this age",
            ),
            Self::High => Insight::new(
                InsightLevel::Caution,
                self.title(),
                "Above average mileage - may affect valuation",
            ),
        }
    }
}

/// Average kilometres per year, with age floored at one year
pub fn average_yearly_km(year: i32, kms_driven: u64, current_year: i32) -> f64 {
    let age = vehicle_age(year, current_year).max(1);
    kms_driven as f64 / age as f64
}

pub fn usage_insight(year: i32, kms_driven: u64, current_year: i32) -> UsageClass {
    UsageClass::from_yearly_km(average_yearly_km(year, kms_driven, current_year))
}
