//! Model gateway: normalized completions and function calls over a
//! [`ChatBackend`], with one observability span per call.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::config::ToctocConfig;
use crate::error::{Result, ToctocError};
use crate::telemetry::{attributes, ActiveSpan, SpanKind, Tracer};
use crate::types::{FunctionCallOutput, FunctionSchema, GenerationSettings, Message, Role};
use crate::util::timeout::bounded;

use super::{BackendRequest, BackendResponse, ChatBackend, OpenAiBackend};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Front door to the language model.
///
/// Cloning is cheap; clones share the backend and the tracer.
#[derive(Clone)]
pub struct ModelGateway {
    backend: Arc<dyn ChatBackend>,
    tracer: Tracer,
    timeout: Duration,
}

impl ModelGateway {
    pub fn new(backend: Arc<dyn ChatBackend>, tracer: Tracer) -> Self {
        Self {
            backend,
            tracer,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Build a gateway to OpenAI from configuration.
    pub fn from_config(config: &ToctocConfig, tracer: Tracer) -> Result<Self> {
        let api_key = config.require_openai_key()?;
        let backend = OpenAiBackend::new(api_key, config.openai_base_url.clone());
        Ok(Self::new(Arc::new(backend), tracer).with_timeout(config.timeout()))
    }

    /// Upper bound for a single backend call.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn tracer(&self) -> &Tracer {
        &self.tracer
    }

    /// Send the full history and return the assistant's reply.
    pub async fn completion(
        &self,
        history: &[Message],
        settings: &GenerationSettings,
    ) -> Result<Message> {
        let mut span = self.tracer.span("ChatCompletion", SpanKind::Llm);
        record_request(&mut span, history, settings);

        let request = BackendRequest {
            messages: history.to_vec(),
            settings: settings.clone(),
            functions: None,
        };

        match self.send(&request).await {
            Ok(response) => {
                record_usage(&mut span, &response);
                span.set_attribute(attributes::OUTPUT_VALUE, response.content.clone());
                Ok(Message::assistant(response.content))
            }
            Err(e) => {
                span.record_error(&e);
                Err(e)
            }
        }
    }

    /// Ask the model to pick one function from `functions`.
    ///
    /// When the model selects nothing, the first catalog entry is returned
    /// with empty arguments.
    pub async fn function_call(
        &self,
        history: &[Message],
        functions: &[FunctionSchema],
        settings: &GenerationSettings,
    ) -> Result<FunctionCallOutput> {
        let first = functions.first().ok_or_else(|| {
            ToctocError::InvalidArgument("function catalog must not be empty".into())
        })?;

        let mut span = self.tracer.span("FunctionCall", SpanKind::Chain);
        record_request(&mut span, history, settings);
        span.set_attribute(
            attributes::LLM_FUNCTION_CALL,
            serde_json::to_string(functions)?,
        );

        let request = BackendRequest {
            messages: history.to_vec(),
            settings: settings.clone(),
            functions: Some(functions.to_vec()),
        };

        let outcome = self
            .send(&request)
            .await
            .and_then(|response| {
                record_usage(&mut span, &response);
                parse_function_call(response, first)
            });

        match outcome {
            Ok(output) => {
                span.set_attribute(attributes::OUTPUT_VALUE, serde_json::to_string(&output)?);
                Ok(output)
            }
            Err(e) => {
                span.record_error(&e);
                Err(e)
            }
        }
    }

    async fn send(&self, request: &BackendRequest) -> Result<BackendResponse> {
        debug!(
            backend = self.backend.backend_name(),
            model = request.settings.model.as_str(),
            "gateway request"
        );
        bounded(
            self.backend.backend_name(),
            self.timeout,
            self.backend.chat(request),
        )
        .await
    }
}

fn parse_function_call(
    response: BackendResponse,
    fallback: &FunctionSchema,
) -> Result<FunctionCallOutput> {
    let Some(call) = response.function_call else {
        warn!(
            function = %fallback.name,
            "model selected no function, using first catalog entry"
        );
        return Ok(FunctionCallOutput {
            function_name: fallback.name.clone(),
            arguments: serde_json::Map::new(),
        });
    };

    let arguments = if call.arguments.trim().is_empty() {
        serde_json::Map::new()
    } else {
        serde_json::from_str(&call.arguments)?
    };

    Ok(FunctionCallOutput {
        function_name: call.name,
        arguments,
    })
}

fn record_request(span: &mut ActiveSpan, history: &[Message], settings: &GenerationSettings) {
    if let Some(last_user) = history.iter().rev().find(|m| m.role() == Role::User) {
        span.set_attribute(attributes::INPUT_VALUE, last_user.content());
    }
    span.set_attribute(attributes::LLM_MODEL_NAME, settings.model.as_str());
    span.set_attribute(
        attributes::LLM_INVOCATION_PARAMETERS,
        serde_json::json!({
            "model": settings.model.as_str(),
            "temperature": settings.temperature,
        })
        .to_string(),
    );
}

fn record_usage(span: &mut ActiveSpan, response: &BackendResponse) {
    if let Some(usage) = response.usage {
        span.set_attribute(attributes::LLM_TOKEN_COUNT_PROMPT, usage.input_tokens);
        span.set_attribute(attributes::LLM_TOKEN_COUNT_COMPLETION, usage.output_tokens);
    }
}
