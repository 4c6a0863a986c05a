//! Language-model backend trait, its OpenAI implementation, and the gateway
//! that fronts it.

pub mod gateway;
pub mod http;
pub mod openai;

pub use gateway::ModelGateway;
pub use openai::OpenAiBackend;

use async_trait::async_trait;

use crate::error::ToctocError;
use crate::types::{FunctionSchema, GenerationSettings, Message, Usage};

/// A request sent to a chat backend.
#[derive(Debug, Clone)]
pub struct BackendRequest {
    pub messages: Vec<Message>,
    pub settings: GenerationSettings,
    /// Present only in function-call mode.
    pub functions: Option<Vec<FunctionSchema>>,
}

/// Function selection exactly as the backend returned it.
#[derive(Debug, Clone, PartialEq)]
pub struct RawFunctionCall {
    pub name: String,
    /// JSON-encoded arguments object.
    pub arguments: String,
}

/// The backend's first choice.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendResponse {
    /// Assistant text; empty when the model only selected a function.
    pub content: String,
    pub function_call: Option<RawFunctionCall>,
    pub usage: Option<Usage>,
}

/// Transport to a chat completion service.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Backend name (e.g., "openai").
    fn backend_name(&self) -> &str;

    /// Send one request and return the first choice.
    async fn chat(&self, request: &BackendRequest) -> Result<BackendResponse, ToctocError>;
}
