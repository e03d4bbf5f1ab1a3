//! # Being PHI Filter
//!
//! Gatekeeper between the Being. app and its third-party analytics sink.
//! Every proposed analytics event is checked so that Protected Health
//! Information (assessment scores, mood values, crisis signals) never leaves
//! the device through analytics.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): Pure business logic
//!   - `PhiFilter`: Ordered, fail-closed validation
//!   - `FilterPolicy`: Immutable allowlist/denylist configuration
//!   - `PolicyHandle`: Whole-policy atomic swap for reloads
//!
//! - **Ports Layer** (`ports/`): Trait definitions
//!   - `PhiFilterApi`: Driving port (inbound API)
//!   - `ConsentStore`, `AnalyticsTransport`: Driven ports
//!
//! - **Service Layer** (`service/`): Orchestration
//!   - `AnalyticsGateway`: consent -> filter -> transport
//!
//! - **Adapters Layer** (`adapters/`): In-process port implementations
//!
//! ## Rules
//!
//! 1. Event name must be on the allowlist (exact match)
//! 2. Property values must be strings, numbers or booleans
//! 3. No key or value may contain a forbidden substring (case-insensitive)
//! 4. Numbers only under whitelisted keys (`duration`, `count`, `timestamp`)
//!
//! ## Invariants
//!
//! - Validation is pure and total; it never panics or errors
//! - A rejection always carries a reason; an allowed event never does
//! - A policy that fails to load is replaced by deny-all, never by allow-all
//!
//! ## Usage Example
//!
//! ```ignore
//! use being_phi_filter::{AnalyticsEvent, FilterPolicy, PhiFilter};
//! use std::sync::Arc;
//!
//! let filter = PhiFilter::new(Arc::new(FilterPolicy::bundled()?));
//! let event = AnalyticsEvent::new("session_started").with_property("duration", 120);
//! assert!(filter.validate(&event.name, &event.properties).is_allowed());
//! ```
//!
//! ## Wiring
//!
//! ```ignore
//! use being_phi_filter::{
//!     AnalyticsGateway, InMemoryConsentStore, PolicyHandle, PolicySource, RecordingTransport,
//! };
//! use std::sync::Arc;
//!
//! let policy = Arc::new(PolicyHandle::load(&PolicySource::Bundled));
//! let consent = Arc::new(InMemoryConsentStore::new());
//! let transport = Arc::new(RecordingTransport::new());
//! let gateway = AnalyticsGateway::new(policy, consent, transport);
//!
//! let outcome = gateway.track_event(&event).await;
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod ports;
pub mod service;

// Re-exports for convenience
pub use adapters::{InMemoryConsentStore, NoopTransport, RecordingTransport};
pub use domain::{
    load_policy, AnalyticsEvent, FilterPolicy, FilterPolicyBuilder, PhiFilter, PolicyHandle,
    PolicySource, Properties, PropertyValue, RejectionReason, ValidationResult,
};
pub use error::{PolicyError, TransportError};
pub use metrics::{FilterMetrics, MetricsSnapshot};
pub use ports::{AnalyticsTransport, ConsentStore, PhiFilterApi, ANALYTICS_CATEGORY};
pub use service::{AnalyticsGateway, GatewayConfig, TrackOutcome, AUDIT_TARGET};
