//! Interactive client - talks to the prediction service and keeps session state

mod analysis;
mod error;
pub mod format;
mod http;
mod report;
mod session;

pub use analysis::ValuationAnalysis;
pub use error::ClientError;
pub use http::{PredictionApi, PredictionClient};
pub use report::{ReportError, ValuationReport};
pub use session::{
    PredictionSession, RequestPhase, SessionStats, SubmitOutcome, HISTORY_LIMIT,
};

#[cfg(test)]
pub use http::MockPredictionApi;
