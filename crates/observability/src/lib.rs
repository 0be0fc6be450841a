//! Tracing and logging setup shared by the service binaries.

/// Tracing configuration (filters, layers).
pub mod tracing;

pub use self::tracing::DEFAULT_FILTER;

/// Initialize process-wide observability (tracing/logging).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(DEFAULT_FILTER);
}
