//! Tracing setup for hosts embedding `candle-scope`.
//!
//! The library only emits `tracing` events: `debug` for each price-range
//! derivation and overlay build, `trace` for individual pan/zoom steps and
//! `warn` for skipped updates. Hosts either call [`init_default_tracing`]
//! or install their own subscriber.

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "candle_scope=info";

/// Installs a compact `fmt` subscriber honoring `RUST_LOG`, when the
/// `telemetry` feature is enabled.
///
/// Returns `false` when the feature is disabled or a global subscriber is
/// already set.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_FILTER));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
