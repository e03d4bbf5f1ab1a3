//! # Being Analytics Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/          # Filter throughput
//! └── src/integration/  # Cross-crate flows
//!     ├── gateway_flows.rs   # consent -> filter -> transport
//!     └── policy_reload.rs   # file-backed policy swaps
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p being-tests
//! cargo test -p being-tests integration::gateway_flows::
//! cargo bench -p being-tests
//! ```
