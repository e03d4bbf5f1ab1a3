//! Policy loading and hot swap
//!
//! A failed load never yields a permissive policy. The fallback is the
//! deny-all policy, which rejects every event.
//!
//! Reloading replaces the whole `Arc<FilterPolicy>` under a write lock.
//! Readers take a snapshot and validate against it, so no caller ever sees
//! a half-updated policy.

use parking_lot::RwLock;
use std::path::PathBuf;
use std::sync::Arc;

use super::event::Properties;
use super::filter::evaluate;
use super::policy::FilterPolicy;
use super::validation::ValidationResult;
use crate::error::PolicyError;

/// Where a policy comes from
#[derive(Clone, Debug, Default)]
pub enum PolicySource {
    /// JSON document compiled into the crate
    #[default]
    Bundled,
    /// Inline JSON document
    Json(String),
    /// JSON document on disk
    File(PathBuf),
}

impl PolicySource {
    /// Load the policy without a fallback
    pub fn try_load(&self) -> Result<FilterPolicy, PolicyError> {
        match self {
            PolicySource::Bundled => FilterPolicy::bundled(),
            PolicySource::Json(json) => FilterPolicy::from_json(json),
            PolicySource::File(path) => FilterPolicy::from_file(path),
        }
    }
}

/// Load a policy, falling back to deny-all on any error
pub fn load_policy(source: &PolicySource) -> Arc<FilterPolicy> {
    match source.try_load() {
        Ok(policy) => {
            tracing::info!(
                allowed_events = policy.allowed_event_names().len(),
                forbidden_substrings = policy.forbidden_substrings().len(),
                numeric_keys = policy.numeric_whitelist_keys().len(),
                "Analytics filter policy loaded"
            );
            Arc::new(policy)
        }
        Err(e) => {
            tracing::error!(
                error = %e,
                source = ?source,
                "Failed to load analytics filter policy, rejecting all events"
            );
            Arc::new(FilterPolicy::deny_all())
        }
    }
}

/// Swappable reference to the current policy
#[derive(Debug)]
pub struct PolicyHandle {
    current: RwLock<Arc<FilterPolicy>>,
}

impl PolicyHandle {
    pub fn new(policy: Arc<FilterPolicy>) -> Self {
        Self {
            current: RwLock::new(policy),
        }
    }

    /// Handle loaded from `source`, deny-all on failure
    pub fn load(source: &PolicySource) -> Self {
        Self::new(load_policy(source))
    }

    /// The policy in effect right now
    pub fn snapshot(&self) -> Arc<FilterPolicy> {
        Arc::clone(&*self.current.read())
    }

    /// Swap in a new policy, returning the previous one
    pub fn replace(&self, policy: Arc<FilterPolicy>) -> Arc<FilterPolicy> {
        std::mem::replace(&mut *self.current.write(), policy)
    }

    /// Reload from `source`. On failure the current policy is kept.
    pub fn reload(&self, source: &PolicySource) -> Result<(), PolicyError> {
        let policy = source.try_load()?;
        self.replace(Arc::new(policy));
        tracing::info!(source = ?source, "Analytics filter policy reloaded");
        Ok(())
    }

    /// Validate against a single snapshot of the current policy
    pub fn validate(&self, name: &str, properties: &Properties) -> ValidationResult {
        let policy = self.snapshot();
        evaluate(&policy, name, properties)
    }
}

impl Default for PolicyHandle {
    fn default() -> Self {
        Self::new(Arc::new(FilterPolicy::deny_all()))
    }
}
