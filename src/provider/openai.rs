//! OpenAI Chat Completions backend.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::error::ToctocError;
use crate::types::Usage;

use super::http::{bearer_headers, shared_client, status_to_error};
use super::{BackendRequest, BackendResponse, ChatBackend, RawFunctionCall};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

pub struct OpenAiBackend {
    api_key: String,
    base_url: String,
}

impl OpenAiBackend {
    pub fn new(api_key: impl Into<String>, base_url: Option<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_request_body(&self, request: &BackendRequest) -> serde_json::Value {
        let mut body = serde_json::json!({
            "model": request.settings.model.as_str(),
            "messages": request.messages,
            "temperature": request.settings.temperature,
        });

        if let (Some(functions), Some(obj)) = (&request.functions, body.as_object_mut()) {
            obj.insert("functions".into(), serde_json::json!(functions));
        }

        body
    }
}

#[async_trait]
impl ChatBackend for OpenAiBackend {
    fn backend_name(&self) -> &str {
        "openai"
    }

    async fn chat(&self, request: &BackendRequest) -> Result<BackendResponse, ToctocError> {
        let body = self.build_request_body(request);
        let url = format!("{}/chat/completions", self.base_url);

        debug!(
            model = request.settings.model.as_str(),
            messages = request.messages.len(),
            function_mode = request.functions.is_some(),
            "OpenAI chat"
        );

        let resp = shared_client()
            .post(&url)
            .headers(bearer_headers(&self.api_key))
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body_text = resp.text().await.unwrap_or_default();
            return Err(status_to_error(status.as_u16(), &body_text));
        }

        let data: OpenAiChatResponse = resp.json().await?;
        let choice = data
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ToctocError::api(status.as_u16(), "No choices in OpenAI response"))?;

        Ok(BackendResponse {
            content: choice.message.content.unwrap_or_default(),
            function_call: choice.message.function_call.map(|fc| RawFunctionCall {
                name: fc.name,
                arguments: fc.arguments,
            }),
            usage: data.usage.map(|u| Usage {
                input_tokens: u.prompt_tokens,
                output_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            }),
        })
    }
}

// OpenAI API response types (internal)

#[derive(Deserialize)]
struct OpenAiChatResponse {
    choices: Vec<OpenAiChoice>,
    usage: Option<OpenAiUsage>,
}

#[derive(Deserialize)]
struct OpenAiChoice {
    message: OpenAiMessage,
}

#[derive(Deserialize)]
struct OpenAiMessage {
    content: Option<String>,
    function_call: Option<OpenAiFunctionCall>,
}

#[derive(Deserialize)]
struct OpenAiFunctionCall {
    name: String,
    #[serde(default)]
    arguments: String,
}

#[derive(Deserialize)]
struct OpenAiUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FunctionSchema, GenerationSettings, Message};

    #[test]
    fn request_body_carries_history_model_and_temperature() {
        let backend = OpenAiBackend::new("sk-test", None);
        let request = BackendRequest {
            messages: vec![Message::system("instrucción"), Message::user("hola")],
            settings: GenerationSettings::default(),
            functions: None,
        };

        let body = backend.build_request_body(&request);

        assert_eq!(
            body,
            serde_json::json!({
                "model": "gpt-4-turbo-preview",
                "messages": [
                    {"role": "system", "content": "instrucción"},
                    {"role": "user", "content": "hola"}
                ],
                "temperature": 0.7,
            })
        );
    }

    #[test]
    fn request_body_adds_functions_in_function_mode() {
        let backend = OpenAiBackend::new("sk-test", Some("http://localhost:9/v1/".into()));
        assert_eq!(backend.base_url(), "http://localhost:9/v1");

        let request = BackendRequest {
            messages: vec![Message::user("quiero tasar")],
            settings: GenerationSettings::default().for_function_call(),
            functions: Some(vec![FunctionSchema::new(
                "tasar_propiedad",
                "Tasa una propiedad",
                serde_json::json!({"type": "object", "properties": {}}),
            )]),
        };

        let body = backend.build_request_body(&request);

        assert_eq!(body["temperature"], 1.0);
        assert_eq!(body["functions"][0]["name"], "tasar_propiedad");
        assert_eq!(body["functions"][0]["parameters"]["type"], "object");
    }
}
