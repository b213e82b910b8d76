//! Configuration module
//!
//! User preferences and session state, serialized to JSON under the
//! platform config directory.

mod persistence;
mod settings;

pub use persistence::*;
pub use settings::*;
