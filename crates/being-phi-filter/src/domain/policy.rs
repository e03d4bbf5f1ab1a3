//! Filter policy and its validation
//!
//! A policy is the three sets the filter reads: allowed event names,
//! forbidden substrings and numeric whitelist keys. Once built it cannot be
//! changed; a new policy must be built and swapped in whole.
//!
//! # Example
//!
//! ```ignore
//! use being_phi_filter::domain::FilterPolicy;
//!
//! let policy = FilterPolicy::builder()
//!     .allow_event("screen_viewed")
//!     .forbid_substring("mood")
//!     .numeric_key("duration")
//!     .build()?;
//! ```

use crate::error::PolicyError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// Policy compiled into the crate; the one the app ships with.
const BUNDLED_POLICY: &str = include_str!("../../policy/default_policy.json");

/// On-disk shape of a policy
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyDocument {
    #[serde(default)]
    pub allowed_event_names: Vec<String>,
    #[serde(default)]
    pub forbidden_substrings: Vec<String>,
    #[serde(default)]
    pub numeric_whitelist_keys: Vec<String>,
}

/// Immutable filter policy
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterPolicy {
    allowed_event_names: BTreeSet<String>,
    forbidden_substrings: BTreeSet<String>,
    numeric_whitelist_keys: BTreeSet<String>,
}

impl FilterPolicy {
    /// Start building a policy
    pub fn builder() -> FilterPolicyBuilder {
        FilterPolicyBuilder::new()
    }

    /// Policy with empty sets. Rejects every event.
    pub fn deny_all() -> Self {
        Self::default()
    }

    /// Parse the policy bundled with the crate
    pub fn bundled() -> Result<Self, PolicyError> {
        Self::from_json(BUNDLED_POLICY)
    }

    /// Parse and validate a JSON policy document
    pub fn from_json(json: &str) -> Result<Self, PolicyError> {
        let document: PolicyDocument = serde_json::from_str(json)?;
        Self::from_document(document)
    }

    /// Read, parse and validate a JSON policy file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, PolicyError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| PolicyError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Validate a parsed document
    pub fn from_document(document: PolicyDocument) -> Result<Self, PolicyError> {
        FilterPolicyBuilder::new()
            .allow_events(document.allowed_event_names)
            .forbid_substrings(document.forbidden_substrings)
            .numeric_keys(document.numeric_whitelist_keys)
            .build()
    }

    /// Document form of this policy, sorted
    pub fn to_document(&self) -> PolicyDocument {
        PolicyDocument {
            allowed_event_names: self.allowed_event_names.iter().cloned().collect(),
            forbidden_substrings: self.forbidden_substrings.iter().cloned().collect(),
            numeric_whitelist_keys: self.numeric_whitelist_keys.iter().cloned().collect(),
        }
    }

    /// Pretty JSON form of this policy
    pub fn to_json_pretty(&self) -> Result<String, PolicyError> {
        Ok(serde_json::to_string_pretty(&self.to_document())?)
    }

    /// Exact, case-sensitive allowlist membership
    pub fn allows_event(&self, name: &str) -> bool {
        self.allowed_event_names.contains(name)
    }

    /// Whether `key` may carry a numeric value
    pub fn permits_numeric(&self, key: &str) -> bool {
        self.numeric_whitelist_keys.contains(key)
    }

    pub fn allowed_event_names(&self) -> &BTreeSet<String> {
        &self.allowed_event_names
    }

    /// Lowercase forbidden substrings, in sorted order
    pub fn forbidden_substrings(&self) -> &BTreeSet<String> {
        &self.forbidden_substrings
    }

    pub fn numeric_whitelist_keys(&self) -> &BTreeSet<String> {
        &self.numeric_whitelist_keys
    }

    /// True when no event can pass
    pub fn is_deny_all(&self) -> bool {
        self.allowed_event_names.is_empty()
    }
}

/// Builder for FilterPolicy with validation
///
/// Forbidden substrings are lowercased on insertion. `build` checks every
/// entry; nothing is validated lazily.
#[derive(Default)]
pub struct FilterPolicyBuilder {
    allowed_event_names: Vec<String>,
    forbidden_substrings: Vec<String>,
    numeric_whitelist_keys: Vec<String>,
}

impl FilterPolicyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allow_event(mut self, name: impl Into<String>) -> Self {
        self.allowed_event_names.push(name.into());
        self
    }

    pub fn allow_events<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_event_names.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn forbid_substring(mut self, substring: impl Into<String>) -> Self {
        self.forbidden_substrings.push(substring.into().to_lowercase());
        self
    }

    pub fn forbid_substrings<I, S>(mut self, substrings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.forbidden_substrings
            .extend(substrings.into_iter().map(|s| s.into().to_lowercase()));
        self
    }

    pub fn numeric_key(mut self, key: impl Into<String>) -> Self {
        self.numeric_whitelist_keys.push(key.into());
        self
    }

    pub fn numeric_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.numeric_whitelist_keys.extend(keys.into_iter().map(Into::into));
        self
    }

    /// Build the policy, validating all entries
    pub fn build(self) -> Result<FilterPolicy, PolicyError> {
        if let Some(bad) = self
            .allowed_event_names
            .iter()
            .find(|n| n.is_empty() || n.chars().any(char::is_whitespace))
        {
            return Err(PolicyError::InvalidEventName(bad.clone()));
        }

        // The unit separator joins fields during scanning and must never match.
        if let Some(bad) = self
            .forbidden_substrings
            .iter()
            .find(|s| s.is_empty() || s.chars().any(char::is_control))
        {
            return Err(PolicyError::InvalidForbiddenSubstring(bad.clone()));
        }

        if let Some(bad) = self.numeric_whitelist_keys.iter().find(|k| k.is_empty()) {
            return Err(PolicyError::InvalidNumericKey(bad.clone()));
        }

        Ok(FilterPolicy {
            allowed_event_names: self.allowed_event_names.into_iter().collect(),
            forbidden_substrings: self.forbidden_substrings.into_iter().collect(),
            numeric_whitelist_keys: self.numeric_whitelist_keys.into_iter().collect(),
        })
    }
}
