//! OpenAI chat model identifiers.

use strum::EnumString;

/// OpenAI chat completion models.
#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumString)]
pub enum OpenAiModel {
    #[strum(serialize = "gpt-4-turbo-preview")]
    Gpt4TurboPreview,
    #[strum(serialize = "gpt-4-turbo")]
    Gpt4Turbo,
    #[strum(serialize = "gpt-4o")]
    Gpt4o,
    #[strum(serialize = "gpt-4o-mini")]
    Gpt4oMini,
    #[strum(serialize = "gpt-3.5-turbo")]
    Gpt35Turbo,
    /// Custom/unknown OpenAI model by ID.
    #[strum(default)]
    Custom(String),
}

impl OpenAiModel {
    /// Get the API model identifier.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Gpt4TurboPreview => "gpt-4-turbo-preview",
            Self::Gpt4Turbo => "gpt-4-turbo",
            Self::Gpt4o => "gpt-4o",
            Self::Gpt4oMini => "gpt-4o-mini",
            Self::Gpt35Turbo => "gpt-3.5-turbo",
            Self::Custom(s) => s,
        }
    }

    /// Parse a model id, keeping unknown ids as [`OpenAiModel::Custom`].
    pub fn from_id(id: &str) -> Self {
        id.parse().unwrap_or_else(|_| Self::Custom(id.to_string()))
    }
}

impl std::fmt::Display for OpenAiModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
