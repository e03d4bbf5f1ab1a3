//! Analytics transports
//!
//! `RecordingTransport` keeps every captured event in memory, which is what
//! dry runs and tests need. `NoopTransport` drops them.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::domain::{AnalyticsEvent, Properties};
use crate::error::TransportError;
use crate::ports::AnalyticsTransport;

/// Transport that records captured events
#[derive(Debug, Default)]
pub struct RecordingTransport {
    captured: Mutex<Vec<AnalyticsEvent>>,
    unavailable: AtomicBool,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent captures fail with `TransportError::Unavailable`
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Events captured so far
    pub fn captured(&self) -> Vec<AnalyticsEvent> {
        self.captured.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.captured.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.captured.lock().is_empty()
    }

    pub fn clear(&self) {
        self.captured.lock().clear();
    }
}

#[async_trait]
impl AnalyticsTransport for RecordingTransport {
    async fn capture(&self, name: &str, properties: &Properties) -> Result<(), TransportError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(TransportError::Unavailable("recording transport offline".into()));
        }

        self.captured.lock().push(AnalyticsEvent {
            name: name.to_string(),
            properties: properties.clone(),
        });
        Ok(())
    }
}

/// Transport that discards everything
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopTransport;

#[async_trait]
impl AnalyticsTransport for NoopTransport {
    async fn capture(&self, _name: &str, _properties: &Properties) -> Result<(), TransportError> {
        Ok(())
    }
}
