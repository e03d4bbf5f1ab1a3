//! Service Layer
//!
//! Orchestrates the filter with its collaborators.

pub mod gateway;

pub use gateway::{AnalyticsGateway, GatewayConfig, TrackOutcome, AUDIT_TARGET};
