//! blindquery Harness
//!
//! In-process end-to-end pipeline wiring both protocol sides together with
//! no network boundary. Used by the integration test suite and for local
//! experiments.

mod local;

pub use local::LocalPipeline;
