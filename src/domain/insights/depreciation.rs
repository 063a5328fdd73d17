//! Depreciation curve and age tiers

use super::{Insight, InsightLevel};

/// Average yearly loss of value
pub const ANNUAL_DEPRECIATION_RATE: f64 = 0.15;

/// Share of the present price a vehicle never drops below
pub const RESIDUAL_VALUE_FLOOR: f64 = 0.10;

/// Whole years between `year` and `current_year`; negative for future model years.
///
/// Widened to i64 so any pair of i32 years is representable.
pub fn vehicle_age(year: i32, current_year: i32) -> i64 {
    i64::from(current_year) - i64::from(year)
}

/// Expected value after compounding depreciation from `year` to `current_year`.
///
/// Age is not clamped, so a future model year yields a value above the
/// present price. The result never drops below 10% of the present price.
pub fn expected_value(year: i32, present_price: f64, current_year: i32) -> f64 {
    let age = vehicle_age(year, current_year) as f64;
    let raw_value = present_price * (1.0 - ANNUAL_DEPRECIATION_RATE).powf(age);

    raw_value.max(present_price * RESIDUAL_VALUE_FLOOR)
}

/// Age tier of a vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeClass {
    LowDepreciation,
    ModerateAge,
    HigherDepreciation,
}

impl AgeClass {
    /// Classify an unfloored age in years
    pub fn from_age(age: i64) -> Self {
        match age {
            a if a < 3 => Self::LowDepreciation,
            a if a < 7 => Self::ModerateAge,
            _ => Self::HigherDepreciation,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::LowDepreciation => "Low Depreciation",
            Self::ModerateAge => "Moderate Age",
            Self::HigherDepreciation => "Higher Depreciation",
        }
    }

    pub fn insight(&self) -> Insight {
        match self {
            Self::LowDepreciation => Insight::new(
                InsightLevel::Positive,
                self.title(),
                "Vehicle is relatively new with minimal depreciation",
            ),
            Self::ModerateAge => Insight::new(
                InsightLevel::Moderate,
                self.title(),
                "Good condition expected with reasonable depreciation",
            ),
            Self::HigherDepreciation => Insight::new(
                InsightLevel::Caution,
                self.title(),
                "Older vehicle - expect higher depreciation",
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expected_value_four_years() {
        let value = expected_value(2020, 10.5, 2024);
        assert!((value - 5.481).abs() < 0.001, "got {}", value);
    }

    #[test]
    fn test_expected_value_same_year_is_present_price() {
        assert_eq!(expected_value(2024, 8.0, 2024), 8.0);
    }

    #[test]
    fn test_expected_value_is_floored() {
        // 0.85^30 is about 0.0076, well under the floor
        let value = expected_value(1994, 20.0, 2024);
        assert!((value - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_expected_value_future_year_is_not_clamped() {
        let value = expected_value(2026, 10.0, 2024);
        assert!((value - 10.0 / (0.85 * 0.85)).abs() < 1e-9);
        assert!(value > 10.0);
    }

    #[test]
    fn test_age_class_boundaries() {
        assert_eq!(AgeClass::from_age(-1), AgeClass::LowDepreciation);
        assert_eq!(AgeClass::from_age(2), AgeClass::LowDepreciation);
        assert_eq!(AgeClass::from_age(3), AgeClass::ModerateAge);
        assert_eq!(AgeClass::from_age(6), AgeClass::ModerateAge);
        assert_eq!(AgeClass::from_age(7), AgeClass::HigherDepreciation);
    }

    #[test]
    fn test_extreme_years_do_not_overflow() {
        assert_eq!(vehicle_age(i32::MIN, 2024), 2024 + 2_147_483_648);
        assert_eq!(vehicle_age(i32::MAX, i32::MIN), -(u32::MAX as i64));

        let ancient = expected_value(i32::MIN, 10.0, 2024);
        assert!((ancient - 1.0).abs() < 1e-9);
        assert_eq!(AgeClass::from_age(vehicle_age(i32::MIN, 2024)), AgeClass::HigherDepreciation);
        assert_eq!(AgeClass::from_age(vehicle_age(i32::MAX, 2024)), AgeClass::LowDepreciation);
    }
}
