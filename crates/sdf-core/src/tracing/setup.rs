//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding per-subsystem log directives.
pub const LOG_ENV_VAR: &str = "SDF_LOG";

/// Initialize the SDF-CVF tracing/logging system.
///
/// Reads `SDF_LOG` for per-subsystem log levels.
/// Format: `SDF_LOG=sdf_analysis=debug,sdf_storage=info`
///
/// Falls back to `default_directive` if `SDF_LOG` is unset or invalid.
/// Output goes to stderr so hook and report output on stdout stays clean.
///
/// Idempotent: only the first call installs a subscriber.
pub fn init_tracing(default_directive: &str) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(default_directive));

        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
    });
}
