//! Generation settings and function-call types.

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::models::openai::OpenAiModel;

/// Temperature used for conversational turns when none is configured.
pub const DEFAULT_COMPLETION_TEMPERATURE: f64 = 0.7;

/// Temperature used for function-call requests when none is configured.
pub const DEFAULT_FUNCTION_CALL_TEMPERATURE: f64 = 1.0;

/// Settings sent with every model request.
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct GenerationSettings {
    #[builder(default = OpenAiModel::Gpt4TurboPreview)]
    pub model: OpenAiModel,
    #[builder(default = DEFAULT_COMPLETION_TEMPERATURE)]
    pub temperature: f64,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl GenerationSettings {
    /// Same model, with the temperature used for function calls.
    pub fn for_function_call(&self) -> Self {
        Self {
            model: self.model.clone(),
            temperature: DEFAULT_FUNCTION_CALL_TEMPERATURE,
        }
    }
}

/// A function the model may choose to invoke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionSchema {
    pub name: String,
    pub description: String,
    /// JSON Schema of the arguments object.
    pub parameters: serde_json::Value,
}

impl FunctionSchema {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: serde_json::Value,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
        }
    }
}

/// The function selected by the model together with its parsed arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCallOutput {
    pub function_name: String,
    pub arguments: serde_json::Map<String, serde_json::Value>,
}
