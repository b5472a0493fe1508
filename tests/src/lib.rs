//! # Klay Decode Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Keys and well-formed RPC records
//! ├── properties.rs     # proptest properties over the decoders
//! │
//! └── integration/      # End-to-end flows through the public API
//!     ├── accounts.rs
//!     ├── governance.rs
//!     ├── scenarios.rs
//!     ├── service.rs
//!     └── transactions.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p klay-tests
//!
//! # By category
//! cargo test -p klay-tests integration::
//! cargo test -p klay-tests properties::
//!
//! # Benchmarks
//! cargo bench -p klay-tests
//! ```

#![allow(dead_code)]

pub mod integration;
pub mod properties;
