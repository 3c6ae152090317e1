//! Tracing setup: subscriber initialization, span definitions and event helpers.

pub mod events;
pub mod spans;

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use chorus_core::config::ObservabilityConfig;

static INIT: Once = Once::new();

/// Environment variable holding the filter directives.
pub const LOG_ENV: &str = "CHORUS_LOG";

/// Filter used when `CHORUS_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "chorus=info";

/// Initialize human-readable logging.
///
/// Reads `CHORUS_LOG` for per-crate levels, e.g.
/// `CHORUS_LOG=chorus_generation=debug,chorus_learning=info`.
/// Falls back to `chorus=info`. Idempotent; the first initializer wins.
pub fn init_tracing() {
    init(DEFAULT_FILTER, false);
}

/// Like [`init_tracing`] but emits JSON lines.
pub fn init_tracing_json() {
    init(DEFAULT_FILTER, true);
}

/// Initialize from the `[observability]` config section. `CHORUS_LOG`
/// still takes precedence over `log_level`.
pub fn init_from_config(config: &ObservabilityConfig) {
    let fallback = format!("chorus={}", config.log_level);
    init(&fallback, config.json_logs);
}

fn init(fallback: &str, json: bool) {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));
        let registry = tracing_subscriber::registry().with(filter);
        // A host may have installed its own subscriber; keep it.
        let _ = if json {
            registry
                .with(fmt::layer().json().with_target(true).with_current_span(true))
                .try_init()
        } else {
            registry
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_file(true)
                        .with_line_number(true),
                )
                .try_init()
        };
    });
}
