//! Prediction domain - scorer seam and result types

mod result;
mod scorer;

pub use result::{PredictionRecord, PredictionResult};
pub use scorer::{PriceScorer, ScorerInfo};

#[cfg(test)]
pub use scorer::MockPriceScorer;
