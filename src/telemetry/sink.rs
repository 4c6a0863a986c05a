//! Span sinks.

use std::sync::Mutex;

use tracing::info;

use super::SpanRecord;
use crate::error::Result;

/// Destination for finished spans.
pub trait SpanSink: Send + Sync {
    fn export(&self, span: &SpanRecord) -> Result<()>;
}

/// Discards every span.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl SpanSink for NoopSink {
    fn export(&self, _span: &SpanRecord) -> Result<()> {
        Ok(())
    }
}

/// Emits each span as one structured `tracing` event.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl SpanSink for LogSink {
    fn export(&self, span: &SpanRecord) -> Result<()> {
        let attributes = serde_json::to_string(&span.attributes)?;
        info!(
            target: "toctoc::spans",
            span_id = %span.id,
            project = %span.project,
            name = %span.name,
            kind = %span.kind,
            duration_ms = span.duration_ms,
            error = span.error.as_deref(),
            %attributes,
            "span"
        );
        Ok(())
    }
}

/// Keeps finished spans in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    spans: Mutex<Vec<SpanRecord>>,
}

impl MemorySink {
    /// Snapshot of the spans exported so far, oldest first.
    pub fn spans(&self) -> Vec<SpanRecord> {
        self.spans
            .lock()
            .map(|spans| spans.clone())
            .unwrap_or_default()
    }
}

impl SpanSink for MemorySink {
    fn export(&self, span: &SpanRecord) -> Result<()> {
        self.spans
            .lock()
            .map_err(|_| crate::error::ToctocError::InvalidState("span buffer poisoned".into()))?
            .push(span.clone());
        Ok(())
    }
}
