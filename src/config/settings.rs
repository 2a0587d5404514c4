//! Configuration settings for vidtutor.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub server: ServerSettings,
    pub openai: OpenAISettings,
    pub tutor: TutorSettings,
    pub transcript: TranscriptSettings,
    pub prompts: PromptSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Host to bind to.
    pub host: String,
    /// Port to bind to. Overridden by `PORT`.
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5001,
        }
    }
}

/// OpenAI API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAISettings {
    /// API key. Overridden by `OPENAI_API_KEY`; never written back to disk.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for OpenAISettings {
    fn default() -> Self {
        Self {
            api_key: None,
            timeout_secs: crate::openai::DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Tutor (LLM answer generation) settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TutorSettings {
    /// LLM model for answers.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Maximum output tokens per answer.
    pub max_tokens: u32,
}

impl Default for TutorSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            temperature: 0.7,
            max_tokens: 800,
        }
    }
}

/// Transcript fetching settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptSettings {
    /// Preferred transcript languages, in order.
    pub languages: Vec<String>,
    /// Keep HTML formatting tags in transcript text.
    pub preserve_formatting: bool,
}

impl Default for TranscriptSettings {
    fn default() -> Self {
        Self {
            languages: vec!["en".to_string()],
            preserve_formatting: false,
        }
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct PromptSettings {
    /// Directory for custom prompts (overrides defaults).
    pub custom_dir: Option<String>,
    /// Custom variables available in all prompts as {{variable_name}}.
    pub variables: std::collections::HashMap<String, String>,
}

impl Settings {
    /// Load settings from the default configuration file and the process environment.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    ///
    /// Environment variables are applied on top of the file contents, and any
    /// ignored environment values are logged.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let mut settings = Self::load_file(path)?;
        for warning in settings.apply_env(|key| std::env::var(key).ok()) {
            warn!("{}", warning);
        }
        Ok(settings)
    }

    /// Load settings from a file only, without the environment overlay.
    pub fn load_file(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Ok(toml::from_str::<Settings>(&content)?)
        } else {
            Ok(Settings::default())
        }
    }

    /// Overlay `OPENAI_API_KEY` and `PORT` using the given variable lookup.
    ///
    /// Returns a message for every value that was ignored.
    pub fn apply_env<F>(&mut self, lookup: F) -> Vec<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut ignored = Vec::new();

        if let Some(key) = lookup("OPENAI_API_KEY").filter(|k| !k.is_empty()) {
            self.openai.api_key = Some(key);
        }

        if let Some(port) = lookup("PORT") {
            match port.trim().parse::<u16>() {
                Ok(port) => self.server.port = port,
                Err(_) => ignored.push(format!("Ignoring invalid PORT value: {}", port)),
            }
        }

        ignored
    }

    /// OpenAI request timeout. A zero setting falls back to the default.
    pub fn openai_timeout(&self) -> Duration {
        let secs = match self.openai.timeout_secs {
            0 => crate::openai::DEFAULT_TIMEOUT_SECS,
            secs => secs,
        };
        Duration::from_secs(secs)
    }

    /// Whether an OpenAI API key is available.
    pub fn api_key_configured(&self) -> bool {
        self.openai
            .api_key
            .as_deref()
            .is_some_and(|k| !k.trim().is_empty())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vidtutor")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 5001);
        assert_eq!(settings.tutor.model, "gpt-4o-mini");
        assert_eq!(settings.tutor.max_tokens, 800);
        assert_eq!(settings.openai.timeout_secs, 60);
        assert_eq!(settings.transcript.languages, vec!["en".to_string()]);
        assert!(!settings.api_key_configured());
    }

    #[test]
    fn test_env_overrides() {
        let mut settings = Settings::default();
        let ignored = settings.apply_env(env(&[("OPENAI_API_KEY", "sk-test"), ("PORT", "8080")]));

        assert!(ignored.is_empty());

        assert!(settings.api_key_configured());
        assert_eq!(settings.server.port, 8080);
    }

    #[test]
    fn test_invalid_port_is_ignored() {
        let mut settings = Settings::default();
        let ignored = settings.apply_env(env(&[("PORT", "not-a-port")]));
        assert_eq!(settings.server.port, 5001);
        assert_eq!(ignored, vec!["Ignoring invalid PORT value: not-a-port".to_string()]);
    }

    #[test]
    fn test_empty_api_key_is_not_configured() {
        let mut settings = Settings::default();
        settings.apply_env(env(&[("OPENAI_API_KEY", "")]));
        assert!(!settings.api_key_configured());
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[tutor]\nmodel = \"gpt-4o\"\n\n[server]\nhost = \"127.0.0.1\"\n",
        )
        .unwrap();

        let settings = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(settings.tutor.model, "gpt-4o");
        assert_eq!(settings.tutor.max_tokens, 800);
        assert_eq!(settings.server.host, "127.0.0.1");
    }

    #[test]
    fn test_api_key_not_serialized() {
        let mut settings = Settings::default();
        settings.openai.api_key = Some("sk-secret".to_string());
        let rendered = toml::to_string_pretty(&settings).unwrap();
        assert!(!rendered.contains("sk-secret"));
    }

    #[test]
    fn test_zero_timeout_falls_back_to_default() {
        let mut settings = Settings::default();
        settings.openai.timeout_secs = 0;
        assert_eq!(settings.openai_timeout(), Duration::from_secs(60));

        settings.openai.timeout_secs = 15;
        assert_eq!(settings.openai_timeout(), Duration::from_secs(15));
    }

    #[test]
    fn test_load_file_ignores_environment() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nport = 7000\n").unwrap();

        let settings = Settings::load_file(Some(&path)).unwrap();
        assert_eq!(settings.server.port, 7000);
        assert!(settings.openai.api_key.is_none());
    }
}
