//! Tracing and logging setup shared by hosts embedding the allocation domain.
//!
//! Domain crates only emit events through the `tracing` facade; installing a
//! subscriber is the host's call, made once at startup via [`init`].

/// Tracing configuration (filters, output format).
pub mod tracing;

pub use self::tracing::{LogFormat, TracingConfig, UnknownLogFormat, init_with};

/// Initialize process-wide observability (tracing/logging) from the environment.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    self::tracing::init();
}
