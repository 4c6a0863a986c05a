//! Core types for toctoc.

pub mod generation;
pub mod message;
pub mod usage;

pub use generation::*;
pub use message::*;
pub use usage::*;
