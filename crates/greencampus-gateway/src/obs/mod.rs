//! Lightweight in-process metrics.
//!
//! Exposes Prometheus-compatible counters without a metrics client crate.
//! Values are stored as atomics and rendered by the `/ops/metrics` handler.

pub mod metrics;

pub use metrics::GatewayMetrics;
