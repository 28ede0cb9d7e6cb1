//! Green Campus core: snapshot model, metrics projection, and renderers.
//!
//! This crate turns raw campus counters into the view-model the dashboard
//! draws from. It carries no transport or runtime dependencies so the same
//! projection runs in the gateway, in tests, and in offline tooling.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Bad field names, score ranges and threshold tables surface as
//! `GreenCampusError` so the caller decides how a widget degrades.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod dashboard;
pub mod error;
pub mod fixtures;
pub mod model;
pub mod projector;
pub mod render;

/// Shared result type.
pub use error::{GreenCampusError, Result};
