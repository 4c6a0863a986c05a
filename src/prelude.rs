//! Convenience re-exports for common use.

pub use crate::agent::{
    AgentProfile, AgentState, AppraisalAgent, AppraisalRequest, CollectionAgent, MortgageAgent,
    MortgageApplication, PropertySearchAgent, PropertySearchFilters, TurnOutput, TurnResult,
};
pub use crate::config::ToctocConfig;
pub use crate::error::{ErrorCategory, Result, ToctocError};
pub use crate::models::OpenAiModel;
pub use crate::provider::{ChatBackend, ModelGateway};
pub use crate::router::{Intent, IntentRouter};
pub use crate::telemetry::{SpanKind, Tracer};
pub use crate::types::{FunctionCallOutput, FunctionSchema, GenerationSettings, Message, Role};
pub use crate::valuation::{PropertyDetails, ValuationClient};
