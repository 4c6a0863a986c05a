//! Configuration system (layered: defaults < TOML file < environment).

use std::fmt;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{Result, ToctocError};
use crate::models::OpenAiModel;
use crate::types::GenerationSettings;

/// Crate configuration.
///
/// ```toml
/// model = "gpt-4o"
/// temperature = 0.5
/// timeout_secs = 60
/// project = "toctoc-dev"
/// ```
#[derive(Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ToctocConfig {
    pub openai_api_key: Option<String>,
    pub openai_base_url: Option<String>,
    pub model: String,
    pub temperature: f64,
    pub timeout_secs: u64,
    /// Bearer token for the valuation API.
    pub access_token: Option<String>,
    pub valuation_base_url: Option<String>,
    /// Project name attached to every span.
    pub project: String,
}

impl Default for ToctocConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_base_url: None,
            model: OpenAiModel::Gpt4TurboPreview.as_str().to_string(),
            temperature: crate::types::DEFAULT_COMPLETION_TEMPERATURE,
            timeout_secs: 120,
            access_token: None,
            valuation_base_url: None,
            project: "toctoc".to_string(),
        }
    }
}

impl fmt::Debug for ToctocConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToctocConfig")
            .field("openai_api_key", &self.openai_api_key.as_ref().map(|_| ".."))
            .field("openai_base_url", &self.openai_base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("timeout_secs", &self.timeout_secs)
            .field("access_token", &self.access_token.as_ref().map(|_| ".."))
            .field("valuation_base_url", &self.valuation_base_url)
            .field("project", &self.project)
            .finish()
    }
}

impl ToctocConfig {
    /// Load from environment variables (after reading `.env` if present).
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        Self::default().apply_overrides(|key| std::env::var(key).ok())
    }

    /// Load a TOML file, then apply environment overrides.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let _ = dotenvy::dotenv();
        Self::from_toml_str(&raw)?.apply_overrides(|key| std::env::var(key).ok())
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Overlay values from `lookup` (normally the process environment).
    pub fn apply_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = lookup("OPENAI_API_KEY") {
            self.openai_api_key = Some(v);
        }
        if let Some(v) = lookup("OPENAI_BASE_URL") {
            self.openai_base_url = Some(v);
        }
        if let Some(v) = lookup("TOCTOC_MODEL") {
            self.model = v;
        }
        if let Some(v) = lookup("TOCTOC_TEMPERATURE") {
            self.temperature = parse_number("TOCTOC_TEMPERATURE", &v)?;
        }
        if let Some(v) = lookup("TOCTOC_TIMEOUT_SECS") {
            self.timeout_secs = parse_number("TOCTOC_TIMEOUT_SECS", &v)?;
        }
        if let Some(v) = lookup("TOCTOC_ACCESS_TOKEN") {
            self.access_token = Some(v);
        }
        if let Some(v) = lookup("TOCTOC_BASE_URL") {
            self.valuation_base_url = Some(v);
        }
        if let Some(v) = lookup("TOCTOC_PROJECT") {
            self.project = v;
        }
        Ok(self)
    }

    /// Generation settings for conversational turns.
    pub fn settings(&self) -> GenerationSettings {
        GenerationSettings::builder()
            .model(OpenAiModel::from_id(&self.model))
            .temperature(self.temperature)
            .build()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn require_openai_key(&self) -> Result<String> {
        self.openai_api_key
            .clone()
            .ok_or_else(|| ToctocError::Authentication("Missing OPENAI_API_KEY".into()))
    }

    pub fn require_access_token(&self) -> Result<String> {
        self.access_token
            .clone()
            .ok_or_else(|| ToctocError::Authentication("Missing TOCTOC_ACCESS_TOKEN".into()))
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| ToctocError::Configuration(format!("{key} is not a valid number: {value}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_documented_values() {
        let config = ToctocConfig::default();
        assert_eq!(config.model, "gpt-4-turbo-preview");
        assert_eq!(config.temperature, 0.7);
        assert_eq!(config.timeout(), Duration::from_secs(120));
        assert_eq!(config.project, "toctoc");
        assert!(matches!(
            config.require_openai_key(),
            Err(ToctocError::Authentication(_))
        ));
    }

    #[test]
    fn environment_overrides_file_values() {
        let config = ToctocConfig::from_toml_str("model = \"gpt-4o\"\ntemperature = 0.2\n")
            .unwrap()
            .apply_overrides(env(&[
                ("TOCTOC_TEMPERATURE", "0.9"),
                ("OPENAI_API_KEY", "sk-env"),
                ("TOCTOC_PROJECT", "  "),
            ]))
            .unwrap();

        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.temperature, 0.9);
        assert_eq!(config.require_openai_key().unwrap(), "sk-env");
        assert_eq!(config.project, "toctoc");
        assert_eq!(config.settings().model, OpenAiModel::Gpt4o);
    }

    #[test]
    fn bad_number_is_a_configuration_error() {
        let err = ToctocConfig::default()
            .apply_overrides(env(&[("TOCTOC_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert!(matches!(err, ToctocError::Configuration(_)));
    }

    #[test]
    fn debug_redacts_secrets() {
        let config = ToctocConfig {
            openai_api_key: Some("sk-secret".into()),
            access_token: Some("tok-secret".into()),
            ..Default::default()
        };
        let printed = format!("{config:?}");
        assert!(!printed.contains("sk-secret"));
        assert!(!printed.contains("tok-secret"));
    }
}
