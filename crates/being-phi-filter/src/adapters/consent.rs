//! In-memory consent store
//!
//! Holds the set of categories the user has granted. Nothing is granted at
//! construction, so a fresh store blocks all analytics.

use parking_lot::RwLock;
use std::collections::HashSet;

use crate::ports::ConsentStore;

#[derive(Debug, Default)]
pub struct InMemoryConsentStore {
    granted: RwLock<HashSet<String>>,
}

impl InMemoryConsentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store with the given categories already granted
    pub fn with_granted<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            granted: RwLock::new(categories.into_iter().map(Into::into).collect()),
        }
    }

    pub fn grant(&self, category: impl Into<String>) {
        self.granted.write().insert(category.into());
    }

    pub fn revoke(&self, category: &str) {
        self.granted.write().remove(category);
    }

    pub fn revoke_all(&self) {
        self.granted.write().clear();
    }
}

impl ConsentStore for InMemoryConsentStore {
    fn can_perform_operation(&self, category: &str) -> bool {
        self.granted.read().contains(category)
    }
}
