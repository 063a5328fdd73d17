//! Vehicle feature record and its closed enumerations

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::validation::{parse_features, VehicleValidationError};

pub const FIELD_CAR_NAME: &str = "Car_Name";
pub const FIELD_YEAR: &str = "Year";
pub const FIELD_PRESENT_PRICE: &str = "Present_Price";
pub const FIELD_KMS_DRIVEN: &str = "Kms_Driven";
pub const FIELD_FUEL_TYPE: &str = "Fuel_Type";
pub const FIELD_SELLER_TYPE: &str = "Seller_Type";
pub const FIELD_TRANSMISSION: &str = "Transmission";
pub const FIELD_OWNER: &str = "Owner";

/// Error returned when a label does not belong to a closed enumeration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLabel {
    pub label: String,
    pub allowed: &'static [&'static str],
}

impl fmt::Display for UnknownLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' is not one of: {}",
            self.label,
            self.allowed.join(", ")
        )
    }
}

impl std::error::Error for UnknownLabel {}

macro_rules! closed_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $label:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];
            pub const LABELS: &'static [&'static str] = &[$($label),+];

            /// Text label used on the wire and by the scoring artifact
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl FromStr for $name {
            type Err = UnknownLabel;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($label => Ok($name::$variant),)+
                    other => Err(UnknownLabel {
                        label: other.to_string(),
                        allowed: Self::LABELS,
                    }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

closed_enum! {
    /// Fuel the vehicle runs on
    FuelType { Petrol => "Petrol", Diesel => "Diesel", Cng => "CNG" }
}

closed_enum! {
    /// Who is selling the vehicle
    SellerType { Dealer => "Dealer", Individual => "Individual" }
}

closed_enum! {
    /// Gearbox type
    Transmission { Manual => "Manual", Automatic => "Automatic" }
}

/// Validated vehicle record submitted for price estimation.
///
/// Serializes to the wire shape accepted by `POST /predict`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleFeatures {
    #[serde(rename = "Car_Name")]
    pub name: String,
    #[serde(rename = "Year")]
    pub year: i32,
    /// Current ex-showroom price in lakhs
    #[serde(rename = "Present_Price")]
    pub present_price: f64,
    #[serde(rename = "Kms_Driven")]
    pub kms_driven: u64,
    #[serde(rename = "Fuel_Type")]
    pub fuel_type: FuelType,
    #[serde(rename = "Seller_Type")]
    pub seller_type: SellerType,
    #[serde(rename = "Transmission")]
    pub transmission: Transmission,
    /// Number of previous owners (0 = first owner, 3 = fourth or later)
    #[serde(rename = "Owner")]
    pub owner: u8,
}

impl VehicleFeatures {
    /// Parse and validate an untyped JSON payload, reporting every offending field
    pub fn from_json(value: &serde_json::Value) -> Result<Self, VehicleValidationError> {
        parse_features(value)
    }

    /// Age in whole years relative to `current_year`; negative for future model years
    pub fn age(&self, current_year: i32) -> i64 {
        crate::domain::insights::vehicle_age(self.year, current_year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::vehicle::fixtures::defender;

    #[test]
    fn test_fuel_type_labels() {
        assert_eq!(FuelType::Cng.as_str(), "CNG");
        assert_eq!("Diesel".parse::<FuelType>().unwrap(), FuelType::Diesel);
        assert_eq!(FuelType::ALL.len(), 3);
    }

    #[test]
    fn test_unknown_label_is_rejected() {
        let err = "Hybrid".parse::<FuelType>().unwrap_err();
        assert_eq!(err.label, "Hybrid");
        assert_eq!(err.to_string(), "'Hybrid' is not one of: Petrol, Diesel, CNG");
    }

    #[test]
    fn test_labels_are_case_sensitive() {
        assert!("petrol".parse::<FuelType>().is_err());
        assert!("manual".parse::<Transmission>().is_err());
    }

    #[test]
    fn test_wire_serialization_uses_dataset_keys() {
        let json = serde_json::to_value(defender()).unwrap();

        assert_eq!(json["Car_Name"], "Defender");
        assert_eq!(json["Year"], 2020);
        assert_eq!(json["Present_Price"], 10.5);
        assert_eq!(json["Kms_Driven"], 27000);
        assert_eq!(json["Fuel_Type"], "Petrol");
        assert_eq!(json["Seller_Type"], "Dealer");
        assert_eq!(json["Transmission"], "Manual");
        assert_eq!(json["Owner"], 1);
    }

    #[test]
    fn test_age_is_not_clamped() {
        let features = defender();
        assert_eq!(features.age(2024), 4);
        assert_eq!(features.age(2018), -2);

        let ancient = VehicleFeatures {
            year: i32::MIN,
            ..defender()
        };
        assert_eq!(ancient.age(i32::MAX), u32::MAX as i64);
    }
}
