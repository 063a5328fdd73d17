//! Vehicle feature validation

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::entity::{
    FuelType, SellerType, Transmission, VehicleFeatures, FIELD_CAR_NAME, FIELD_FUEL_TYPE,
    FIELD_KMS_DRIVEN, FIELD_OWNER, FIELD_PRESENT_PRICE, FIELD_SELLER_TYPE, FIELD_TRANSMISSION,
    FIELD_YEAR,
};

/// Highest ownership count accepted (3 = fourth owner or later)
pub const MAX_OWNER: u8 = 3;

/// Earliest model year the client accepts
pub const MIN_CLIENT_YEAR: i32 = 1990;

/// Present price bounds the client accepts, in lakhs
pub const MIN_CLIENT_PRESENT_PRICE: f64 = 0.5;
pub const MAX_CLIENT_PRESENT_PRICE: f64 = 150.0;

/// A single offending field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn missing(field: &str) -> Self {
        Self::new(field, "field required")
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Vehicle validation failure carrying every offending field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleValidationError {
    fields: Vec<FieldError>,
}

impl VehicleValidationError {
    pub fn new(fields: Vec<FieldError>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[FieldError] {
        &self.fields
    }

    pub fn into_fields(self) -> Vec<FieldError> {
        self.fields
    }

    /// Whether the named field is among the offending ones
    pub fn has_field(&self, field: &str) -> bool {
        self.fields.iter().any(|e| e.field == field)
    }
}

impl fmt::Display for VehicleValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.fields.iter().map(ToString::to_string).collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for VehicleValidationError {}

/// Parse a `POST /predict` body into validated features
pub(super) fn parse_features(value: &Value) -> Result<VehicleFeatures, VehicleValidationError> {
    let Some(object) = value.as_object() else {
        return Err(VehicleValidationError::new(vec![FieldError::new(
            "body",
            "expected a JSON object",
        )]));
    };

    let mut errors = Vec::new();

    let name = keep(&mut errors, read_text(object, FIELD_CAR_NAME));
    let year = keep(&mut errors, read_year(object));
    let present_price = keep(&mut errors, read_number(object, FIELD_PRESENT_PRICE));
    let kms_driven = keep(&mut errors, read_kms(object));
    let fuel_type = keep(&mut errors, read_label::<FuelType>(object, FIELD_FUEL_TYPE));
    let seller_type = keep(&mut errors, read_label::<SellerType>(object, FIELD_SELLER_TYPE));
    let transmission = keep(
        &mut errors,
        read_label::<Transmission>(object, FIELD_TRANSMISSION),
    );
    let owner = keep(&mut errors, read_owner(object));

    match (
        name,
        year,
        present_price,
        kms_driven,
        fuel_type,
        seller_type,
        transmission,
        owner,
    ) {
        (
            Some(name),
            Some(year),
            Some(present_price),
            Some(kms_driven),
            Some(fuel_type),
            Some(seller_type),
            Some(transmission),
            Some(owner),
        ) if errors.is_empty() => Ok(VehicleFeatures {
            name,
            year,
            present_price,
            kms_driven,
            fuel_type,
            seller_type,
            transmission,
            owner,
        }),
        _ => Err(VehicleValidationError::new(errors)),
    }
}

/// Check the tighter bounds the interactive client applies before submitting
pub fn validate_client_input(
    features: &VehicleFeatures,
    current_year: i32,
) -> Result<(), VehicleValidationError> {
    let mut errors = Vec::new();

    if features.name.trim().is_empty() {
        errors.push(FieldError::new(
            FIELD_CAR_NAME,
            "please enter a vehicle model name",
        ));
    }

    if !(MIN_CLIENT_YEAR..=current_year).contains(&features.year) {
        errors.push(FieldError::new(
            FIELD_YEAR,
            format!("must be between {} and {}", MIN_CLIENT_YEAR, current_year),
        ));
    }

    if !(MIN_CLIENT_PRESENT_PRICE..=MAX_CLIENT_PRESENT_PRICE).contains(&features.present_price) {
        errors.push(FieldError::new(
            FIELD_PRESENT_PRICE,
            format!(
                "must be between {} and {} lakhs",
                MIN_CLIENT_PRESENT_PRICE, MAX_CLIENT_PRESENT_PRICE
            ),
        ));
    }

    if features.owner > MAX_OWNER {
        errors.push(owner_range_error());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(VehicleValidationError::new(errors))
    }
}

fn keep<T>(errors: &mut Vec<FieldError>, result: Result<T, FieldError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            errors.push(e);
            None
        }
    }
}

fn field<'a>(object: &'a Map<String, Value>, name: &str) -> Result<&'a Value, FieldError> {
    match object.get(name) {
        None | Some(Value::Null) => Err(FieldError::missing(name)),
        Some(value) => Ok(value),
    }
}

fn read_text(object: &Map<String, Value>, name: &str) -> Result<String, FieldError> {
    field(object, name)?
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| FieldError::new(name, "expected a string"))
}

/// Numbers may also arrive as strings such as `"10.5"`
fn read_number(object: &Map<String, Value>, name: &str) -> Result<f64, FieldError> {
    let value = field(object, name)?;

    let number = match value {
        Value::String(text) => text.trim().parse::<f64>().ok(),
        other => other.as_f64(),
    };

    number
        .filter(|v| v.is_finite())
        .ok_or_else(|| FieldError::new(name, "expected a number"))
}

/// Integers may arrive as `2020`, `2020.0` or `"2020"`; fractional values are rejected
fn read_integer(object: &Map<String, Value>, name: &str) -> Result<i64, FieldError> {
    let value = field(object, name)?;

    if let Some(v) = value.as_i64() {
        return Ok(v);
    }

    if let Value::String(text) = value {
        return text
            .trim()
            .parse::<i64>()
            .map_err(|_| FieldError::new(name, "expected an integer"));
    }

    match value.as_f64() {
        Some(v) if v.fract() == 0.0 && v >= i64::MIN as f64 && v <= i64::MAX as f64 => {
            Ok(v as i64)
        }
        _ => Err(FieldError::new(name, "expected an integer")),
    }
}

fn read_year(object: &Map<String, Value>) -> Result<i32, FieldError> {
    let year = read_integer(object, FIELD_YEAR)?;
    i32::try_from(year).map_err(|_| FieldError::new(FIELD_YEAR, "integer out of range"))
}

fn read_kms(object: &Map<String, Value>) -> Result<u64, FieldError> {
    if let Some(v) = field(object, FIELD_KMS_DRIVEN)?.as_u64() {
        return Ok(v);
    }

    let kms = read_integer(object, FIELD_KMS_DRIVEN)?;
    u64::try_from(kms)
        .map_err(|_| FieldError::new(FIELD_KMS_DRIVEN, "must be a non-negative integer"))
}

fn read_owner(object: &Map<String, Value>) -> Result<u8, FieldError> {
    let owner = read_integer(object, FIELD_OWNER)?;

    if (0..=i64::from(MAX_OWNER)).contains(&owner) {
        Ok(owner as u8)
    } else {
        Err(owner_range_error())
    }
}

fn owner_range_error() -> FieldError {
    FieldError::new(FIELD_OWNER, format!("must be between 0 and {}", MAX_OWNER))
}

fn read_label<T>(object: &Map<String, Value>, name: &str) -> Result<T, FieldError>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    let label = field(object, name)?
        .as_str()
        .ok_or_else(|| FieldError::new(name, "expected a string"))?;

    label
        .parse::<T>()
        .map_err(|e| FieldError::new(name, e.to_string()))
}
