//! State module for tracking export progress
//!
//! # Components
//!
//! - `RunState`: where an export run currently is (metadata, counts, which type is being exported)

mod run_state;

// Re-export main types
pub use run_state::RunState;
