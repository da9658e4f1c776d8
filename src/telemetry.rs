//! Telemetry helpers for applications embedding `axis-rs`.
//!
//! Tracing setup stays explicit and opt-in. Consumers either call
//! [`init_default_tracing`] or wire their own `tracing` subscriber; the
//! division search logs its accepted candidates at `trace` level under the
//! `axis_rs` target, which is the usual thing to turn up when a chart picks
//! surprising ticks.

/// Initializes a default `tracing` subscriber when the `telemetry` feature
/// is enabled.
///
/// The filter comes from `RUST_LOG` when set and falls back to `info`.
/// Returns `true` on success, `false` when the feature is disabled or a
/// global subscriber was already installed by the host application.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
