//! Subscriber setup and structured log macros.
//!
//! Every decode log line carries:
//! - `subsystem`: always `klay-decode`
//! - `operation`: the API entry point that produced it
//! - Additional context fields (`tag`, `error_kind`, `field`, `record_index`)

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{TelemetryConfig, TelemetryError};

/// Install the global subscriber.
///
/// Fails if a global subscriber is already set.
pub fn init_logging(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let env_filter = EnvFilter::try_new(&config.log_level)
        .map_err(|e| TelemetryError::Config(format!("log level {:?}: {e}", config.log_level)))?;

    if !config.console_output {
        tracing_subscriber::registry()
            .with(env_filter)
            .try_init()
            .map_err(|e| TelemetryError::SubscriberInit(e.to_string()))?;
        return Ok(());
    }

    if config.json_logs {
        // JSON output for containers/production
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(json_layer)
            .try_init()
            .map_err(|e| TelemetryError::SubscriberInit(e.to_string()))?;
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
            .map_err(|e| TelemetryError::SubscriberInit(e.to_string()))?;
    }

    tracing::info!(
        service = %config.service_name,
        json_logs = config.json_logs,
        "logging initialized"
    );
    Ok(())
}

/// Log a decode event with the standard `subsystem` and `operation` fields.
///
/// ```rust,ignore
/// log_decode_event!(warn, "decode_transaction", "rejected", error_kind = err.kind());
/// ```
#[macro_export]
macro_rules! log_decode_event {
    ($level:ident, $operation:expr, $msg:expr $(, $($field:tt)*)?) => {
        $crate::tracing::$level!(
            subsystem = "klay-decode",
            operation = $operation,
            $($($field)*,)?
            $msg
        )
    };
}
