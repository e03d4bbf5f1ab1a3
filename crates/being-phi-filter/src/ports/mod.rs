//! Ports Layer
//!
//! Defines the interfaces (traits) for:
//! - Driving Ports (inbound) - validation API for call sites
//! - Driven Ports (outbound) - consent store and analytics transport

pub mod inbound;
pub mod outbound;

pub use inbound::PhiFilterApi;
pub use outbound::{AnalyticsTransport, ConsentStore, ANALYTICS_CATEGORY};
