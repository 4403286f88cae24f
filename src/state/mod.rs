//! State module
//!
//! Every run is a full re-sync of the configured date window. State is
//! accepted for protocol compatibility and otherwise ignored.

mod types;

pub use types::State;
