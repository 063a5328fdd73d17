//! Price variance and recommendation tiers

use std::fmt;

/// Variance below this magnitude (in percent) counts as aligned
pub const ALIGNED_VARIANCE_PERCENT: f64 = 5.0;

pub const GOOD_RETENTION_RATIO: f64 = 0.95;
pub const FAIR_VALUATION_RATIO: f64 = 0.80;

/// How the predicted price compares to the present price
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarianceDirection {
    Aligned,
    Higher,
    Lower,
}

impl fmt::Display for VarianceDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Aligned => write!(f, "aligned"),
            Self::Higher => write!(f, "higher"),
            Self::Lower => write!(f, "lower"),
        }
    }
}

/// Percentage difference between predicted and present price
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceVariance {
    pub diff_percent: f64,
    pub direction: VarianceDirection,
}

impl PriceVariance {
    pub fn assessment(&self) -> String {
        match self.direction {
            VarianceDirection::Aligned => {
                "Predicted price aligns well with market value".to_string()
            }
            VarianceDirection::Higher => format!(
                "Predicted price is {:.1}% higher - indicating strong market demand or unique features",
                self.diff_percent.abs()
            ),
            VarianceDirection::Lower => format!(
                "Predicted price is {:.1}% lower - consider factors like mileage, condition, or market trends",
                self.diff_percent.abs()
            ),
        }
    }
}

/// Compare a prediction with the present price; a non-positive present price yields 0%
pub fn variance(predicted: f64, present: f64) -> PriceVariance {
    let diff_percent = if present > 0.0 {
        (predicted - present) / present * 100.0
    } else {
        0.0
    };

    let direction = if diff_percent.abs() < ALIGNED_VARIANCE_PERCENT {
        VarianceDirection::Aligned
    } else if diff_percent > ALIGNED_VARIANCE_PERCENT {
        VarianceDirection::Higher
    } else {
        VarianceDirection::Lower
    };

    PriceVariance {
        diff_percent,
        direction,
    }
}

/// Recommendation tier from the predicted / present ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recommendation {
    GoodValueRetention,
    FairValuation,
    BelowAverageValuation,
}

impl Recommendation {
    pub fn classify(predicted: f64, present: f64) -> Self {
        if predicted >= present * GOOD_RETENTION_RATIO {
            Self::GoodValueRetention
        } else if predicted >= present * FAIR_VALUATION_RATIO {
            Self::FairValuation
        } else {
            Self::BelowAverageValuation
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::GoodValueRetention => "good value retention",
            Self::FairValuation => "fair valuation",
            Self::BelowAverageValuation => "below average valuation",
        }
    }

    pub fn advice(&self) -> &'static str {
        match self {
            Self::GoodValueRetention => "Good value retention - Recommended for purchase/sale",
            Self::FairValuation => "Fair valuation - Reasonable deal within market range",
            Self::BelowAverageValuation => {
                "Below average valuation - Review vehicle condition and market timing"
            }
        }
    }
}
