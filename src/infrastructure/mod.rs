//! Infrastructure layer - Artifact loading, services and observability

pub mod logging;
pub mod observability;
pub mod scoring;
pub mod services;
