//! Top-level facade crate for Green Campus.
//!
//! Re-exports the projection core and the gateway library so users can depend on a single crate.

pub mod core {
    pub use greencampus_core::*;
}

pub mod gateway {
    pub use greencampus_gateway::*;
}
