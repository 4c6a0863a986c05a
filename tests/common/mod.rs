//! Shared test helpers and scripted backend.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use toctoc::error::ToctocError;
use toctoc::provider::{BackendRequest, BackendResponse, ChatBackend, ModelGateway, RawFunctionCall};
use toctoc::telemetry::{MemorySink, Tracer};
use toctoc::types::Usage;

/// A backend that replays queued replies in order and records every request.
#[derive(Default)]
pub struct ScriptedBackend {
    replies: Mutex<VecDeque<Result<BackendResponse, ToctocError>>>,
    requests: Mutex<Vec<BackendRequest>>,
    delay: Option<Duration>,
}

impl ScriptedBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// A backend that sleeps before answering.
    pub fn slow(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            delay: Some(delay),
            ..Default::default()
        })
    }

    /// Queue a plain text reply.
    pub fn queue_text(&self, text: &str) {
        self.push(Ok(BackendResponse {
            content: text.to_string(),
            function_call: None,
            usage: Some(Usage {
                input_tokens: 10,
                output_tokens: 20,
                total_tokens: 30,
            }),
        }));
    }

    /// Queue a `{message, finished}` envelope reply.
    pub fn queue_envelope(&self, message: &str, finished: bool) {
        self.queue_text(&envelope(message, finished));
    }

    /// Queue a function selection.
    pub fn queue_function_call(&self, name: &str, arguments: serde_json::Value) {
        self.push(Ok(BackendResponse {
            content: String::new(),
            function_call: Some(RawFunctionCall {
                name: name.to_string(),
                arguments: arguments.to_string(),
            }),
            usage: None,
        }));
    }

    /// Queue a function selection with raw (possibly invalid) arguments.
    pub fn queue_raw_function_call(&self, name: &str, arguments: &str) {
        self.push(Ok(BackendResponse {
            content: String::new(),
            function_call: Some(RawFunctionCall {
                name: name.to_string(),
                arguments: arguments.to_string(),
            }),
            usage: None,
        }));
    }

    /// Queue a backend failure.
    pub fn queue_error(&self, error: ToctocError) {
        self.push(Err(error));
    }

    fn push(&self, reply: Result<BackendResponse, ToctocError>) {
        self.replies.lock().unwrap().push_back(reply);
    }

    pub fn requests(&self) -> Vec<BackendRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> BackendRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl ChatBackend for ScriptedBackend {
    fn backend_name(&self) -> &str {
        "scripted"
    }

    async fn chat(&self, request: &BackendRequest) -> Result<BackendResponse, ToctocError> {
        self.requests.lock().unwrap().push(request.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ToctocError::api(500, "no scripted reply left")))
    }
}

/// Gateway over `backend` that discards spans.
pub fn gateway(backend: &Arc<ScriptedBackend>) -> ModelGateway {
    ModelGateway::new(backend.clone(), Tracer::noop())
}

/// Gateway over `backend` whose spans land in the returned sink.
pub fn traced_gateway(backend: &Arc<ScriptedBackend>) -> (ModelGateway, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::default());
    let gateway = ModelGateway::new(backend.clone(), Tracer::new("test", sink.clone()));
    (gateway, sink)
}

pub fn envelope(message: &str, finished: bool) -> String {
    serde_json::json!({"message": message, "finished": finished}).to_string()
}
