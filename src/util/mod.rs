//! Utility modules: JSON extraction, timeout.

pub mod json;
pub mod timeout;
