//! Collection agents: multi-turn conversations that gather structured data.

pub mod agent;
pub mod conversation;
pub mod envelope;
pub mod profile;
pub mod prompts;
pub mod schema;

pub use agent::{
    AgentState, AppraisalAgent, CollectionAgent, MortgageAgent, PropertySearchAgent, TurnOutput,
    TurnResult,
};
pub use conversation::Conversation;
pub use envelope::{EnvelopeError, TurnEnvelope};
pub use profile::AgentProfile;
pub use schema::{
    AppraisalRequest, BorrowerInfo, MortgageApplication, MortgageDetails, PropertySearchFilters,
};
