//! Green Campus gateway library entry.
//!
//! This crate wires the metrics source, snapshot store, refresh loop and HTTP
//! routes around the projection core. It is consumed by the binary
//! (`main.rs`) and by integration tests.

pub mod api;
pub mod app_state;
pub mod config;
pub mod error;
pub mod obs;
pub mod ops;
pub mod refresh;
pub mod router;
pub mod snapshot;
pub mod source;
