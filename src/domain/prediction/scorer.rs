//! Scoring function seam

use serde::Serialize;

#[cfg(test)]
use mockall::automock;

use crate::domain::error::DomainError;
use crate::domain::vehicle::VehicleFeatures;

/// Descriptive metadata about a loaded scorer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScorerInfo {
    pub name: String,
    pub version: String,
    pub features: Vec<String>,
}

/// Opaque pre-trained function mapping vehicle features to a price estimate.
///
/// Implementations are immutable once constructed and must be deterministic:
/// the same features always yield the same estimate.
#[cfg_attr(test, automock)]
pub trait PriceScorer: Send + Sync {
    /// Estimate the resale price in lakhs
    fn score(&self, features: &VehicleFeatures) -> Result<f64, DomainError>;

    fn info(&self) -> ScorerInfo;
}
