//! Observability handle: spans for model calls and agent turns.
//!
//! A [`Tracer`] is constructed explicitly and passed to whatever needs to
//! record spans. Spans are exported to a [`SpanSink`] when they end; sink
//! failures are logged and never reach the caller.

pub mod attributes;
pub mod sink;

pub use sink::{LogSink, MemorySink, NoopSink, SpanSink};

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

/// The kind of work a span represents (OpenInference span kinds).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum SpanKind {
    /// A chat completion call.
    Llm,
    /// A function-call request.
    Chain,
    /// A full agent turn.
    Agent,
}

/// A finished span, as handed to a sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpanRecord {
    pub id: Uuid,
    pub project: String,
    pub name: String,
    pub kind: SpanKind,
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
    pub attributes: BTreeMap<String, serde_json::Value>,
    /// Error message when the traced operation failed.
    pub error: Option<String>,
}

impl SpanRecord {
    /// Look up an attribute as a string.
    pub fn attribute_str(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).and_then(|v| v.as_str())
    }
}

/// Cheaply cloneable tracing handle.
#[derive(Clone)]
pub struct Tracer {
    project: Arc<str>,
    sink: Arc<dyn SpanSink>,
}

impl fmt::Debug for Tracer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tracer")
            .field("project", &self.project)
            .finish_non_exhaustive()
    }
}

impl Tracer {
    pub fn new(project: impl Into<String>, sink: Arc<dyn SpanSink>) -> Self {
        Self {
            project: Arc::from(project.into()),
            sink,
        }
    }

    /// A tracer that discards every span.
    pub fn noop() -> Self {
        Self::new("noop", Arc::new(NoopSink))
    }

    /// A tracer that writes every span as a structured log event.
    pub fn logging(project: impl Into<String>) -> Self {
        Self::new(project, Arc::new(LogSink))
    }

    /// Start a span. It is exported when dropped or [`ActiveSpan::end`]ed.
    pub fn span(&self, name: impl Into<String>, kind: SpanKind) -> ActiveSpan {
        let mut attrs = BTreeMap::new();
        attrs.insert(
            attributes::SPAN_KIND.to_string(),
            serde_json::Value::String(kind.to_string()),
        );
        ActiveSpan {
            sink: Arc::clone(&self.sink),
            started: Instant::now(),
            record: SpanRecord {
                id: Uuid::new_v4(),
                project: self.project.to_string(),
                name: name.into(),
                kind,
                started_at: Utc::now(),
                duration_ms: 0,
                attributes: attrs,
                error: None,
            },
        }
    }
}

/// A span in progress.
pub struct ActiveSpan {
    sink: Arc<dyn SpanSink>,
    started: Instant,
    record: SpanRecord,
}

impl ActiveSpan {
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) {
        self.record.attributes.insert(key.into(), value.into());
    }

    /// Mark the traced operation as failed.
    pub fn record_error(&mut self, error: &dyn fmt::Display) {
        self.record.error = Some(error.to_string());
    }

    pub fn end(self) {}
}

impl Drop for ActiveSpan {
    fn drop(&mut self) {
        self.record.duration_ms = self.started.elapsed().as_millis() as u64;
        if let Err(e) = self.sink.export(&self.record) {
            tracing::warn!(span = %self.record.name, error = %e, "span export failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ToctocError;

    struct FailingSink;

    impl SpanSink for FailingSink {
        fn export(&self, _span: &SpanRecord) -> crate::error::Result<()> {
            Err(ToctocError::Configuration("collector unreachable".into()))
        }
    }

    #[test]
    fn span_is_exported_on_end_with_kind_attribute() {
        let sink = Arc::new(MemorySink::default());
        let tracer = Tracer::new("test", sink.clone());

        let mut span = tracer.span("ChatCompletion", SpanKind::Llm);
        span.set_attribute("output.value", "hola");
        span.end();

        let spans = sink.spans();
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].project, "test");
        assert_eq!(spans[0].attribute_str(attributes::SPAN_KIND), Some("LLM"));
        assert_eq!(spans[0].attribute_str("output.value"), Some("hola"));
        assert!(spans[0].error.is_none());
    }

    #[test]
    fn dropped_span_is_exported_with_error() {
        let sink = Arc::new(MemorySink::default());
        let tracer = Tracer::new("test", sink.clone());
        {
            let mut span = tracer.span("Turn", SpanKind::Agent);
            span.record_error(&"boom");
        }
        assert_eq!(sink.spans()[0].error.as_deref(), Some("boom"));
    }

    #[test]
    fn failing_sink_does_not_panic() {
        let tracer = Tracer::new("test", Arc::new(FailingSink));
        tracer.span("Turn", SpanKind::Agent).end();
    }
}
