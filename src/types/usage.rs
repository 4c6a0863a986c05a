//! Token usage reported by the backend.

use serde::{Deserialize, Serialize};

/// Token usage for a single model call.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
    pub total_tokens: u32,
}
