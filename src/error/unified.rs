//! Error classification.

/// Broad error category for routing recovery logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Authentication,
    RateLimit,
    Network,
    Timeout,
    Server,
    Api,
    Configuration,
    Serialization,
    /// The model replied with something that breaks the turn contract.
    ModelContract,
    /// A precondition on the caller's side was violated.
    Usage,
    Unknown,
}
