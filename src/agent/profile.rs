//! Agent profiles: the instruction pair that specializes a collection agent.

use crate::router::Intent;

use super::prompts;

/// What a collection agent asks for and how it reformats the answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentProfile {
    /// Span name for the agent's turns.
    pub name: String,
    /// System instruction at index 0 of the conversation.
    pub instruction: String,
    /// System message appended once collection is finished.
    pub finalize_instruction: String,
}

impl AgentProfile {
    pub fn new(
        name: impl Into<String>,
        instruction: impl Into<String>,
        finalize_instruction: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            instruction: instruction.into(),
            finalize_instruction: finalize_instruction.into(),
        }
    }

    /// Gathers property-search preferences.
    pub fn property_search() -> Self {
        Self::new(
            "PropertySearchAssistant",
            prompts::PROPERTY_SEARCH,
            prompts::PROPERTY_SEARCH_FINALIZE,
        )
    }

    /// Gathers mortgage-application data.
    pub fn mortgage() -> Self {
        Self::new(
            "MortgageAssistant",
            prompts::MORTGAGE,
            prompts::MORTGAGE_FINALIZE,
        )
    }

    /// Gathers the inputs of a sale appraisal.
    pub fn appraisal() -> Self {
        Self::new(
            "AppraisalAssistant",
            prompts::APPRAISAL,
            prompts::APPRAISAL_FINALIZE,
        )
    }

    pub fn for_intent(intent: Intent) -> Self {
        match intent {
            Intent::Busqueda => Self::property_search(),
            Intent::Hipotecario => Self::mortgage(),
            Intent::Tasar => Self::appraisal(),
        }
    }
}
