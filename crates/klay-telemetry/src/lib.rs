//! # Klay Telemetry
//!
//! Structured logging for the decode crates.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use klay_telemetry::{init_logging, TelemetryConfig};
//!
//! fn main() {
//!     init_logging(&TelemetryConfig::from_env()).expect("Failed to init logging");
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `KLAY_SERVICE_NAME` | `klay-decode` | Service name in logs |
//! | `KLAY_LOG_LEVEL` | `info` | Log level filter (falls back to `RUST_LOG`) |
//! | `KLAY_CONSOLE_OUTPUT` | `true` | Write logs to stdout |
//! | `KLAY_JSON_LOGS` | `false` | JSON formatted logs |

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::init_logging;

#[doc(hidden)]
pub use tracing;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// The global subscriber could not be installed
    #[error("Failed to initialize subscriber: {0}")]
    SubscriberInit(String),

    /// The configuration is unusable
    #[error("Invalid configuration: {0}")]
    Config(String),
}
