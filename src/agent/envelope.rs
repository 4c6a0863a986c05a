//! The `{message, finished}` envelope every collection turn must return.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::util::json::strip_code_fences;

/// One validated collection turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnEnvelope {
    /// Reply, confirmation or next question for the user.
    pub message: String,
    /// Whether every required field has been gathered.
    pub finished: bool,
}

/// Why a model reply is not a valid [`TurnEnvelope`].
#[derive(Error, Debug)]
pub enum EnvelopeError {
    #[error("reply is not valid JSON: {0}")]
    NotJson(#[source] serde_json::Error),

    #[error("reply is not a JSON object")]
    NotAnObject,

    #[error("missing field `{0}`")]
    MissingField(&'static str),

    #[error("field `{field}` must be a {expected}")]
    InvalidType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("field `message` is empty")]
    EmptyMessage,

    #[error("unexpected field `{0}`")]
    UnexpectedField(String),
}

impl TurnEnvelope {
    pub fn new(message: impl Into<String>, finished: bool) -> Self {
        Self {
            message: message.into(),
            finished,
        }
    }

    /// Parse and strictly validate a raw model reply.
    ///
    /// A surrounding markdown code fence is stripped first. Exactly the two
    /// fields `message` (non-blank string) and `finished` (boolean) are
    /// accepted.
    pub fn parse(raw: &str) -> Result<Self, EnvelopeError> {
        let value: serde_json::Value =
            serde_json::from_str(strip_code_fences(raw)).map_err(EnvelopeError::NotJson)?;
        let serde_json::Value::Object(mut obj) = value else {
            return Err(EnvelopeError::NotAnObject);
        };

        let message = match obj.remove("message") {
            None => return Err(EnvelopeError::MissingField("message")),
            Some(serde_json::Value::String(s)) => s,
            Some(_) => {
                return Err(EnvelopeError::InvalidType {
                    field: "message",
                    expected: "string",
                })
            }
        };

        let finished = match obj.remove("finished") {
            None => return Err(EnvelopeError::MissingField("finished")),
            Some(serde_json::Value::Bool(b)) => b,
            Some(_) => {
                return Err(EnvelopeError::InvalidType {
                    field: "finished",
                    expected: "boolean",
                })
            }
        };

        if let Some(extra) = obj.keys().next() {
            return Err(EnvelopeError::UnexpectedField(extra.clone()));
        }

        if message.trim().is_empty() {
            return Err(EnvelopeError::EmptyMessage);
        }

        Ok(Self { message, finished })
    }
}
