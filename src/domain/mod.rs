//! Domain layer - Core business logic and entities

pub mod error;
pub mod insights;
pub mod prediction;
pub mod vehicle;

pub use error::DomainError;
pub use prediction::{PredictionRecord, PredictionResult, PriceScorer, ScorerInfo};
pub use vehicle::{
    FieldError, FuelType, SellerType, Transmission, VehicleFeatures, VehicleValidationError,
};
