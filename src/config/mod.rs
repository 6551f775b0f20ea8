use crate::cli::parser::Args;
use crate::core::error::ChatError;
use crate::models::{DEFAULT_MODELS, ModelChain};
use crate::providers::openrouter::DEFAULT_BASE_URL;
use reqwest::header::HeaderValue;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_SITE_NAME: &str = "AI Chat Assistant";
pub const DEFAULT_SITE_URL: &str = "http://localhost:3000";
pub const DEFAULT_GREETING: &str = "Hello! How can I help you today?";

const ENV_API_KEY: &str = "OPENROUTER_API_KEY";
const ENV_SITE_NAME: &str = "OPENROUTER_SITE_NAME";
const ENV_SITE_URL: &str = "OPENROUTER_SITE_URL";

/// On-disk configuration, `~/.fchat/config.yaml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub base_url: String,
    pub site_name: String,
    pub site_url: String,
    pub models: Vec<String>,
    pub max_attempts: Option<usize>,
    pub request_timeout_secs: u64,
    pub greeting: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            site_name: DEFAULT_SITE_NAME.to_string(),
            site_url: DEFAULT_SITE_URL.to_string(),
            models: DEFAULT_MODELS.iter().map(|m| m.to_string()).collect(),
            max_attempts: None,
            request_timeout_secs: 60,
            greeting: DEFAULT_GREETING.to_string(),
        }
    }
}

/// Everything a session needs, after merging flags, environment and file.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_key: String,
    pub base_url: String,
    pub site_name: String,
    pub site_url: String,
    pub models: ModelChain,
    pub max_attempts: usize,
    pub start_index: usize,
    pub timeout: Duration,
    pub greeting: String,
}

impl Config {
    fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".fchat")
    }

    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    pub fn history_path() -> PathBuf {
        Self::config_dir().join("input_history.txt")
    }

    pub fn load() -> Result<Config, ChatError> {
        Self::load_from(&Self::config_path())
    }

    /// Reads `path`, writing a default file there first if none exists.
    pub fn load_from(path: &Path) -> Result<Config, ChatError> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            let config = serde_yml::from_str::<Config>(&contents)
                .map_err(|e| ChatError::Config(format!("Parse {}: {}", path.display(), e)))?;
            debug!(path = %path.display(), "loaded config");
            return Ok(config);
        }

        let config = Config::default();
        if let Err(e) = config.save_to(path) {
            debug!(path = %path.display(), error = %e, "could not write default config");
        }
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ChatError> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let yaml_content = serde_yml::to_string(self)?;
        fs::write(path, yaml_content)?;
        Ok(())
    }

    /// Lets environment variables override file values.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(ENV_API_KEY) {
            self.api_key = Some(key);
        }
        if let Some(name) = lookup(ENV_SITE_NAME) {
            self.site_name = name;
        }
        if let Some(url) = lookup(ENV_SITE_URL) {
            self.site_url = url;
        }
    }

    /// Merges command-line flags over this config and validates the result.
    pub fn resolve(self, args: &Args) -> Result<Settings, ChatError> {
        let api_key = self
            .api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                ChatError::Config(format!(
                    "{} must be set from config or environment variable",
                    ENV_API_KEY
                ))
            })?;
        if HeaderValue::from_str(&format!("Bearer {}", api_key)).is_err() {
            return Err(ChatError::Config(format!(
                "{} contains characters not allowed in an HTTP header",
                ENV_API_KEY
            )));
        }

        if self.request_timeout_secs == 0 {
            return Err(ChatError::Config(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }

        let models = if args.models.is_empty() {
            ModelChain::new(self.models)?
        } else {
            ModelChain::new(args.models.clone())?
        };

        let max_attempts = args
            .max_attempts
            .or(self.max_attempts)
            .unwrap_or(models.len());

        Ok(Settings {
            api_key,
            base_url: args.base_url.clone().unwrap_or(self.base_url),
            site_name: self.site_name,
            site_url: self.site_url,
            models,
            max_attempts,
            start_index: args.start_index,
            timeout: Duration::from_secs(self.request_timeout_secs),
            greeting: self.greeting,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn with_key() -> Config {
        Config {
            api_key: Some("sk-or-test".into()),
            ..Config::default()
        }
    }

    #[test]
    fn missing_file_is_created_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");

        let config = Config::load_from(&path).unwrap();

        assert_eq!(config, Config::default());
        assert!(path.exists());
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());
    }

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "models:\n  - a/one\n  - b/two\nmax_attempts: 1\n").unwrap();

        let config = Config::load_from(&path).unwrap();

        assert_eq!(config.models, vec!["a/one", "b/two"]);
        assert_eq!(config.max_attempts, Some(1));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.greeting, DEFAULT_GREETING);
    }

    #[test]
    fn invalid_yaml_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "models: [unterminated").unwrap();

        assert!(matches!(Config::load_from(&path), Err(ChatError::Config(_))));
    }

    #[test]
    fn environment_overrides_file_values() {
        let env: HashMap<&str, &str> = [
            ("OPENROUTER_API_KEY", "sk-env"),
            ("OPENROUTER_SITE_URL", "https://chat.example.com"),
        ]
        .into_iter()
        .collect();
        let mut config = with_key();

        config.apply_env(|name| env.get(name).map(|v| v.to_string()));

        assert_eq!(config.api_key.as_deref(), Some("sk-env"));
        assert_eq!(config.site_url, "https://chat.example.com");
        assert_eq!(config.site_name, DEFAULT_SITE_NAME);
    }

    #[test]
    fn budget_defaults_to_chain_length() {
        let settings = with_key().resolve(&Args::default()).unwrap();

        assert_eq!(settings.models.len(), DEFAULT_MODELS.len());
        assert_eq!(settings.max_attempts, DEFAULT_MODELS.len());
        assert_eq!(settings.timeout, Duration::from_secs(60));
    }

    #[test]
    fn flags_take_precedence() {
        let args = Args {
            models: vec!["x/only".into()],
            max_attempts: Some(4),
            base_url: Some("http://127.0.0.1:9999/v1".into()),
            start_index: 2,
            ..Args::default()
        };
        let config = Config {
            max_attempts: Some(1),
            ..with_key()
        };

        let settings = config.resolve(&args).unwrap();

        assert_eq!(settings.models.iter().collect::<Vec<_>>(), vec!["x/only"]);
        assert_eq!(settings.max_attempts, 4);
        assert_eq!(settings.start_index, 2);
        assert_eq!(settings.base_url, "http://127.0.0.1:9999/v1");
    }

    #[test]
    fn blank_api_key_is_rejected() {
        let config = Config {
            api_key: Some("   ".into()),
            ..Config::default()
        };
        assert!(matches!(
            config.resolve(&Args::default()),
            Err(ChatError::Config(_))
        ));
        assert!(matches!(
            Config::default().resolve(&Args::default()),
            Err(ChatError::Config(_))
        ));
    }

    #[test]
    fn api_key_from_environment_is_trimmed() {
        let mut config = Config::default();
        config.apply_env(|name| (name == "OPENROUTER_API_KEY").then(|| "sk-or-real\n".to_string()));

        let settings = config.resolve(&Args::default()).unwrap();

        assert_eq!(settings.api_key, "sk-or-real");
    }

    #[test]
    fn api_key_with_inner_control_characters_is_rejected() {
        let config = Config {
            api_key: Some("sk-or\nreal".into()),
            ..Config::default()
        };
        assert!(matches!(
            config.resolve(&Args::default()),
            Err(ChatError::Config(_))
        ));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let config = Config {
            request_timeout_secs: 0,
            ..with_key()
        };
        assert!(matches!(
            config.resolve(&Args::default()),
            Err(ChatError::Config(_))
        ));
    }

    #[test]
    fn empty_model_list_is_rejected() {
        let config = Config {
            models: Vec::new(),
            ..with_key()
        };
        assert!(matches!(
            config.resolve(&Args::default()),
            Err(ChatError::Config(_))
        ));
    }
}
