//! Utility functions and helpers.
//!
//! - [`paths`]: tilde expansion and default locations

/// Path manipulation and resolution utilities
pub mod paths;

pub use paths::expand_tilde;
