//! Collection agent: a multi-turn conversation that gathers structured data.

use serde::de::DeserializeOwned;
use serde::Serialize;
use strum::Display;
use tracing::{debug, info, warn};

use crate::error::{Result, ToctocError};
use crate::provider::ModelGateway;
use crate::telemetry::{attributes, SpanKind};
use crate::types::{GenerationSettings, Message, Role};
use crate::util::json::{extract_json_object, strip_code_fences};

use super::conversation::Conversation;
use super::envelope::TurnEnvelope;
use super::profile::AgentProfile;
use super::schema::{AppraisalRequest, MortgageApplication, PropertySearchFilters};

/// Where an agent is in its collection lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum AgentState {
    /// Asking questions; every turn returns a reply.
    Collecting,
    /// The model declared collection finished but the normalized result
    /// has not been produced yet.
    Finalizing,
    /// The collected result is available. Terminal.
    Done,
}

/// What one turn produced.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnOutput<T> {
    /// The agent's reply or next question.
    Reply(String),
    /// Collection finished; `raw` is the JSON object the result was parsed from.
    Completed { result: T, raw: String },
}

/// Outcome of [`CollectionAgent::run`].
#[derive(Debug, Clone, PartialEq)]
pub struct TurnResult<T> {
    /// Content of the last user message.
    pub input: String,
    pub output: TurnOutput<T>,
}

impl<T> TurnResult<T> {
    /// The reply text, or the normalized JSON when collection finished.
    pub fn output_text(&self) -> &str {
        match &self.output {
            TurnOutput::Reply(text) => text,
            TurnOutput::Completed { raw, .. } => raw,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self.output, TurnOutput::Completed { .. })
    }
}

/// Gathers information over several turns, then normalizes it into `T`.
///
/// Each [`run`](Self::run) sends the whole history to the model, which must
/// answer with a `{message, finished}` envelope. When `finished` is true the
/// profile's finalize instruction is appended and one more completion turns
/// the conversation into a `T`.
pub struct CollectionAgent<T = serde_json::Value> {
    gateway: ModelGateway,
    profile: AgentProfile,
    settings: GenerationSettings,
    conversation: Conversation,
    state: AgentState,
    result: Option<T>,
}

pub type PropertySearchAgent = CollectionAgent<PropertySearchFilters>;
pub type MortgageAgent = CollectionAgent<MortgageApplication>;
pub type AppraisalAgent = CollectionAgent<AppraisalRequest>;

impl<T> CollectionAgent<T>
where
    T: DeserializeOwned + Serialize + Clone,
{
    pub fn new(gateway: ModelGateway, profile: AgentProfile) -> Self {
        let conversation = Conversation::new(profile.instruction.clone());
        Self {
            gateway,
            profile,
            settings: GenerationSettings::default(),
            conversation,
            state: AgentState::Collecting,
            result: None,
        }
    }

    /// Set generation settings.
    pub fn with_settings(mut self, settings: GenerationSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn add_message(&mut self, role: Role, content: impl Into<String>) {
        self.conversation.add(role, content);
    }

    pub fn add_user_message(&mut self, content: impl Into<String>) {
        self.add_message(Role::User, content);
    }

    /// Start over: keep only the instruction and return to collecting.
    pub fn clear_history(&mut self) {
        self.conversation.clear();
        self.state = AgentState::Collecting;
        self.result = None;
    }

    pub fn get_history(&self) -> &[Message] {
        self.conversation.messages()
    }

    pub fn state(&self) -> AgentState {
        self.state
    }

    pub fn collected_result(&self) -> Option<&T> {
        self.result.as_ref()
    }

    pub fn is_done(&self) -> bool {
        self.state == AgentState::Done
    }

    pub fn profile(&self) -> &AgentProfile {
        &self.profile
    }

    /// Run one turn, recorded as an `AGENT` span.
    pub async fn run(&mut self) -> Result<TurnResult<T>> {
        let mut span = self
            .gateway
            .tracer()
            .span(self.profile.name.clone(), SpanKind::Agent);

        let outcome = self.step().await;

        match &outcome {
            Ok(turn) => {
                span.set_attribute(attributes::INPUT_VALUE, turn.input.clone());
                span.set_attribute(attributes::OUTPUT_VALUE, turn.output_text());
            }
            Err(e) => span.record_error(e),
        }
        for (i, message) in self.conversation.messages().iter().enumerate() {
            span.set_attribute(
                attributes::input_message_role(i),
                message.role().to_string(),
            );
            span.set_attribute(attributes::input_message_content(i), message.content());
        }

        outcome
    }

    async fn step(&mut self) -> Result<TurnResult<T>> {
        if self.state == AgentState::Done {
            return Err(ToctocError::InvalidState(format!(
                "{} already finished collecting; clear the history to start over",
                self.profile.name
            )));
        }

        let input = self
            .conversation
            .last_user_message()
            .map(|m| m.content().to_string())
            .ok_or_else(|| {
                ToctocError::InvalidState("run() needs at least one user message".into())
            })?;

        if self.state == AgentState::Finalizing {
            debug!(agent = %self.profile.name, "retrying finalize exchange");
            return self.finalize(input).await;
        }

        let reply = self
            .gateway
            .completion(self.conversation.messages(), &self.settings)
            .await?;

        let envelope = TurnEnvelope::parse(reply.content()).map_err(|reason| {
            warn!(agent = %self.profile.name, error = %reason, "malformed turn envelope");
            ToctocError::MalformedEnvelope {
                reason,
                raw: reply.content().to_string(),
            }
        })?;

        self.conversation
            .push(Message::assistant(envelope.message.clone()));

        if !envelope.finished {
            debug!(agent = %self.profile.name, "collection continues");
            return Ok(TurnResult {
                input,
                output: TurnOutput::Reply(envelope.message),
            });
        }

        info!(agent = %self.profile.name, "collection finished, normalizing result");
        self.state = AgentState::Finalizing;
        self.conversation
            .add(Role::System, self.profile.finalize_instruction.clone());

        self.finalize(input).await
    }

    async fn finalize(&mut self, input: String) -> Result<TurnResult<T>> {
        let reply = self
            .gateway
            .completion(self.conversation.messages(), &self.settings)
            .await?;
        let content = reply.content();

        let json = extract_json_object(strip_code_fences(content)).ok_or_else(|| {
            ToctocError::MalformedResult {
                message: "reply contains no JSON object".into(),
                raw: content.to_string(),
            }
        })?;

        let result: T = serde_json::from_str(json).map_err(|e| ToctocError::MalformedResult {
            message: e.to_string(),
            raw: content.to_string(),
        })?;

        self.result = Some(result.clone());
        self.state = AgentState::Done;
        info!(agent = %self.profile.name, state = %self.state, "collected result stored");

        Ok(TurnResult {
            input,
            output: TurnOutput::Completed {
                result,
                raw: json.to_string(),
            },
        })
    }
}

impl PropertySearchAgent {
    pub fn property_search(gateway: ModelGateway) -> Self {
        Self::new(gateway, AgentProfile::property_search())
    }
}

impl MortgageAgent {
    pub fn mortgage(gateway: ModelGateway) -> Self {
        Self::new(gateway, AgentProfile::mortgage())
    }
}

impl AppraisalAgent {
    pub fn appraisal(gateway: ModelGateway) -> Self {
        Self::new(gateway, AgentProfile::appraisal())
    }
}
