//! Crate-level test suites.
//!
//! - `determinism.rs`: identical inputs give identical service calls and frames
//! - `integration.rs`: end-to-end engagement scenarios
//! - `helpers.rs`: recording services and unit factories shared by every
//!   module's tests

mod helpers;

pub use helpers::*;
