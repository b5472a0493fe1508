//! # Integration Tests
//!
//! End-to-end flows through the public `klay_decode` API.

pub mod accounts;
pub mod scenarios;
pub mod service;
pub mod transactions;
