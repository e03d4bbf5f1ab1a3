//! Adapters Layer
//!
//! In-process implementations of the driven ports.

pub mod consent;
pub mod transport;

pub use consent::InMemoryConsentStore;
pub use transport::{NoopTransport, RecordingTransport};
