//! Vehicle domain - feature record, closed enumerations and validation

mod entity;
mod validation;

pub use entity::{
    FuelType, SellerType, Transmission, UnknownLabel, VehicleFeatures, FIELD_CAR_NAME,
    FIELD_FUEL_TYPE, FIELD_KMS_DRIVEN, FIELD_OWNER, FIELD_PRESENT_PRICE, FIELD_SELLER_TYPE,
    FIELD_TRANSMISSION, FIELD_YEAR,
};
pub use validation::{
    validate_client_input, FieldError, VehicleValidationError, MAX_CLIENT_PRESENT_PRICE,
    MAX_OWNER, MIN_CLIENT_PRESENT_PRICE, MIN_CLIENT_YEAR,
};
