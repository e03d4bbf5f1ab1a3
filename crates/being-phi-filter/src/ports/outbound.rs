//! Outbound Ports (Driven Ports)
//!
//! Collaborators the gateway depends on. Consent gating and PHI filtering
//! stay separate: the filter never looks at consent, and the consent store
//! never looks at event content.

use async_trait::async_trait;

use crate::domain::Properties;
use crate::error::TransportError;

/// Consent category the gateway checks by default
pub const ANALYTICS_CATEGORY: &str = "analytics";

/// Consent store (Driven Port)
///
/// Answers whether the user has agreed to a category of data processing.
/// Must be asked before the filter runs.
pub trait ConsentStore: Send + Sync {
    fn can_perform_operation(&self, category: &str) -> bool;
}

/// Analytics transport (Driven Port)
///
/// Delivers an already-validated event to the third-party sink. Only the
/// gateway calls it, and only after the filter allowed the event.
#[async_trait]
pub trait AnalyticsTransport: Send + Sync {
    async fn capture(&self, name: &str, properties: &Properties) -> Result<(), TransportError>;
}
