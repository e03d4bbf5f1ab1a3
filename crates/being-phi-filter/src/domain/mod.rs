//! Domain Layer - Pure business logic
//!
//! This layer contains:
//! - Analytics event model
//! - Filter policy and its builder
//! - Validation result types
//! - The PHI filter itself
//! - Policy loading and hot-swap handle
//!
//! RULES:
//! - No network I/O
//! - No async code
//! - Validation is a pure function

pub mod event;
pub mod filter;
pub mod policy;
pub mod policy_handle;
pub mod validation;

pub use event::{AnalyticsEvent, Properties, PropertyValue};
pub use filter::{evaluate, PhiFilter};
pub use policy::{FilterPolicy, FilterPolicyBuilder, PolicyDocument};
pub use policy_handle::{load_policy, PolicyHandle, PolicySource};
pub use validation::{RejectionReason, ValidationResult};
