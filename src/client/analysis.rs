//! Valuation analysis merging a prediction with locally derived metrics

use std::fmt::Write;

use crate::domain::insights::{
    expected_value, variance, PriceVariance, Recommendation, VarianceDirection,
};
use crate::domain::PredictionRecord;

use super::format::lakhs;

/// A completed prediction alongside the client-side metrics
#[derive(Debug, Clone, PartialEq)]
pub struct ValuationAnalysis {
    pub car_name: String,
    pub predicted_price: f64,
    pub present_price: f64,
    pub expected_value: f64,
    pub variance: PriceVariance,
    pub recommendation: Recommendation,
    pub vehicle_age: i64,
}

impl ValuationAnalysis {
    pub fn from_record(record: &PredictionRecord, current_year: i32) -> Self {
        let features = &record.features;
        let predicted = record.predicted_price;

        Self {
            car_name: features.name.clone(),
            predicted_price: predicted,
            present_price: features.present_price,
            expected_value: expected_value(features.year, features.present_price, current_year),
            variance: variance(predicted, features.present_price),
            recommendation: Recommendation::classify(predicted, features.present_price),
            vehicle_age: features.age(current_year),
        }
    }

    /// Signed variance with an arrow, e.g. `↑ 20.0%`
    pub fn variance_badge(&self) -> String {
        let arrow = match self.variance.diff_percent {
            d if d > 0.0 => "↑",
            d if d < 0.0 => "↓",
            _ => "→",
        };
        format!("{} {:.1}%", arrow, self.variance.diff_percent.abs())
    }

    /// Multi-line text report
    pub fn render(&self) -> String {
        let mut out = String::new();
        let marker = match self.variance.direction {
            VarianceDirection::Aligned => "✅",
            VarianceDirection::Higher => "📈",
            VarianceDirection::Lower => "📉",
        };
        let advice_marker = match self.recommendation {
            Recommendation::GoodValueRetention => "✅",
            Recommendation::FairValuation => "ℹ️",
            Recommendation::BelowAverageValuation => "⚠️",
        };

        let _ = writeln!(out, "📊 Valuation Report: {}", self.car_name);
        let _ = writeln!(out, "  Predicted Price : {}", lakhs(self.predicted_price));
        let _ = writeln!(out, "  Price Variance  : {}", self.variance_badge());
        let _ = writeln!(out, "  Expected Value  : {}", lakhs(self.expected_value));
        let _ = writeln!(out, "  Vehicle Age     : {} years", self.vehicle_age);
        let _ = writeln!(out);
        let _ = writeln!(out, "💰 Price Assessment");
        let _ = writeln!(out, "  {} {}", marker, self.variance.assessment());
        let _ = writeln!(out, "🎯 Recommendation");
        let _ = write!(out, "  {} {}", advice_marker, self.recommendation.advice());

        out
    }
}
