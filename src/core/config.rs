//! Application configuration management
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! environment variables (a `.env` file is loaded into the environment by the
//! binaries before this module runs). Everything is validated at startup so a
//! run fails fast before the first API call.

use crate::core::constants::{defaults, env};
use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ApiSection {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AgentSection {
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub max_tokens: Option<u32>,
    #[serde(default)]
    pub timeout: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RunSection {
    #[serde(default)]
    pub verbose: Option<bool>,
    #[serde(default)]
    pub debug: Option<bool>,
    #[serde(default)]
    pub log_level: Option<String>,
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    #[serde(default)]
    pub workflow: Option<String>,
}

/// On-disk layout of the optional configuration file
#[derive(Debug, Clone, Deserialize, Default)]
pub struct TomlConfig {
    #[serde(default)]
    pub api: ApiSection,
    #[serde(default)]
    pub agent: AgentSection,
    #[serde(default)]
    pub run: RunSection,
}

impl TomlConfig {
    fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file {}", path.display()))?;

        toml::from_str(&content).context("Failed to parse TOML configuration")
    }
}

/// Run configuration shared by both demos
#[derive(Debug, Clone)]
pub struct Config {
    /// API key for the completion endpoint (required)
    pub api_key: String,

    /// OpenAI-compatible API base URL
    pub api_base: String,

    /// Chat model used by every agent
    pub model: String,

    /// Default sampling temperature for agents
    pub temperature: f32,

    /// Completion token limit per call
    pub max_tokens: u32,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Echo the context handed to each agent
    pub verbose: bool,

    /// Enables debug logging
    pub debug: bool,

    pub log_level: String,

    /// Directory receiving the transcript and summary files
    pub output_dir: PathBuf,

    /// Scenario slug; `None` selects the binary's default
    pub workflow: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base: defaults::API_BASE.to_string(),
            model: defaults::MODEL.to_string(),
            temperature: defaults::TEMPERATURE,
            max_tokens: defaults::MAX_TOKENS,
            request_timeout: defaults::TIMEOUT,
            verbose: true,
            debug: false,
            log_level: defaults::LOG_LEVEL.to_string(),
            output_dir: PathBuf::from(defaults::OUTPUT_DIR),
            workflow: None,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file, with defaults for absent keys
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::default();
        config.apply_file(TomlConfig::from_file(path)?);
        Ok(config)
    }

    /// Load configuration from the process environment
    ///
    /// Reads `CONFIG_PATH` (or `agents.toml` in the current directory when it
    /// exists) first, then lets environment variables override it.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(with_default_file(
            |key| std::env::var(key).ok(),
            Path::new(defaults::CONFIG_FILE),
        ))
    }

    /// Load configuration using `lookup` as the environment
    ///
    /// Blank values are treated as unset. Only `CONFIG_PATH` names a file to
    /// read; the working directory is never consulted.
    ///
    /// # Errors
    ///
    /// Returns error if the configuration file is unreadable or a numeric
    /// setting does not parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let file = match lookup(env::CONFIG_PATH) {
            Some(path) => Some(TomlConfig::from_file(path)?),
            None => None,
        };

        let mut config = Self::default();
        if let Some(file) = file {
            config.apply_file(file);
        }
        config.apply_env(&lookup)?;
        Ok(config)
    }

    fn apply_file(&mut self, file: TomlConfig) {
        let TomlConfig { api, agent, run } = file;

        if let Some(api_key) = api.api_key {
            self.api_key = api_key;
        }
        if let Some(base_url) = api.base_url {
            self.api_base = base_url;
        }
        if let Some(model) = api.model {
            self.model = model;
        }
        if let Some(temperature) = agent.temperature {
            self.temperature = temperature;
        }
        if let Some(max_tokens) = agent.max_tokens {
            self.max_tokens = max_tokens;
        }
        if let Some(timeout) = agent.timeout {
            self.request_timeout = timeout;
        }
        if let Some(verbose) = run.verbose {
            self.verbose = verbose;
        }
        if let Some(debug) = run.debug {
            self.debug = debug;
        }
        if let Some(log_level) = run.log_level {
            self.log_level = log_level;
        }
        if let Some(output_dir) = run.output_dir {
            self.output_dir = output_dir;
        }
        if run.workflow.is_some() {
            self.workflow = run.workflow;
        }
    }

    fn apply_env<F>(&mut self, lookup: &F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(api_key) = lookup(env::API_KEY) {
            self.api_key = api_key.trim().to_string();
        }
        if let Some(api_base) = lookup(env::API_BASE) {
            self.api_base = api_base;
        }
        if let Some(model) = lookup(env::MODEL) {
            self.model = model;
        }
        if let Some(temperature) = parse_var(lookup, env::TEMPERATURE)? {
            self.temperature = temperature;
        }
        if let Some(max_tokens) = parse_var(lookup, env::MAX_TOKENS)? {
            self.max_tokens = max_tokens;
        }
        if let Some(timeout) = parse_var(lookup, env::TIMEOUT)? {
            self.request_timeout = timeout;
        }
        if let Some(verbose) = lookup(env::VERBOSE) {
            self.verbose = parse_flag(&verbose);
        }
        if let Some(debug) = lookup(env::DEBUG) {
            self.debug = parse_flag(&debug);
        }
        if let Some(log_level) = lookup(env::LOG_LEVEL) {
            self.log_level = log_level;
        }
        if let Some(output_dir) = lookup(env::OUTPUT_DIR) {
            self.output_dir = PathBuf::from(output_dir);
        }
        if let Some(workflow) = lookup(env::WORKFLOW) {
            self.workflow = Some(workflow.trim().to_lowercase());
        }
        Ok(())
    }

    /// Whether an API key is present
    pub fn validate_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Validate settings that cannot be defaulted
    ///
    /// # Errors
    ///
    /// Returns error when the API key is missing or blank.
    pub fn validate(&self) -> Result<()> {
        if !self.validate_api_key() {
            bail!("{} is not set in .env.", env::API_KEY);
        }
        Ok(())
    }

    /// Log level after applying the `DEBUG` switch
    pub fn effective_log_level(&self) -> &str {
        if self.debug { "debug" } else { &self.log_level }
    }
}

/// Point an unset `CONFIG_PATH` at `default_file` when that file exists
fn with_default_file<'a, F>(lookup: F, default_file: &'a Path) -> impl Fn(&str) -> Option<String> + 'a
where
    F: Fn(&str) -> Option<String> + 'a,
{
    move |key| {
        let value = lookup(key).filter(|value| !value.trim().is_empty());
        if value.is_none() && key == env::CONFIG_PATH && default_file.is_file() {
            return Some(default_file.to_string_lossy().into_owned());
        }
        value
    }
}

/// Boolean switches follow the `.lower() == "true"` convention: anything else is off
fn parse_flag(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}

fn parse_var<F, T>(lookup: &F, name: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    lookup(name)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .with_context(|| format!("Invalid {} value: '{}'", name, raw))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    fn create_test_config() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
            [api]
            api_key = "gsk-file"
            model = "llama-3.3-70b-versatile"

            [agent]
            temperature = 0.2
            max_tokens = 1024

            [run]
            verbose = false
            output_dir = "reports"
            workflow = "product"
        "#
        )
        .unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_defaults_without_env() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.api_base, "https://api.groq.com/openai/v1");
        assert_eq!(config.model, "llama-3.1-8b-instant");
        assert_eq!(config.temperature, 0.7);
        assert_eq!(config.max_tokens, 2000);
        assert_eq!(config.request_timeout, 300);
        assert!(config.verbose);
        assert!(!config.debug);
        assert!(config.workflow.is_none());
    }

    #[test]
    fn test_load_config_file() {
        let file = create_test_config();
        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.api_key, "gsk-file");
        assert_eq!(config.model, "llama-3.3-70b-versatile");
        assert_eq!(config.max_tokens, 1024);
        assert!(!config.verbose);
        assert_eq!(config.output_dir, PathBuf::from("reports"));
        assert_eq!(config.workflow.as_deref(), Some("product"));
        // untouched sections keep their defaults
        assert_eq!(config.request_timeout, 300);
    }

    #[test]
    fn test_env_overrides_file() {
        let file = create_test_config();
        let path = file.path().to_string_lossy().to_string();
        let config = Config::from_lookup(lookup_from(&[
            ("CONFIG_PATH", path.as_str()),
            ("GROQ_API_KEY", "gsk-env"),
            ("AGENT_MAX_TOKENS", "512"),
            ("VERBOSE", "TRUE"),
        ]))
        .unwrap();
        assert_eq!(config.api_key, "gsk-env");
        assert_eq!(config.max_tokens, 512);
        assert!(config.verbose);
        assert_eq!(config.temperature, 0.2);
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let result = Config::from_lookup(lookup_from(&[(
            "CONFIG_PATH",
            "/definitely/not/here/agents.toml",
        )]));
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_number_is_reported() {
        let err = Config::from_lookup(lookup_from(&[("AGENT_MAX_TOKENS", "lots")])).unwrap_err();
        assert!(err.to_string().contains("AGENT_MAX_TOKENS"));
        assert!(err.to_string().contains("'lots'"));
    }

    #[test]
    fn test_flags_only_accept_true() {
        let config =
            Config::from_lookup(lookup_from(&[("VERBOSE", "yes"), ("DEBUG", "True")])).unwrap();
        assert!(!config.verbose);
        assert!(config.debug);
        assert_eq!(config.effective_log_level(), "debug");
    }

    #[test]
    fn test_validate_rejects_missing_api_key() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        let err = config.validate().unwrap_err();
        assert_eq!(err.to_string(), "GROQ_API_KEY is not set in .env.");
    }

    #[test]
    fn test_validate_rejects_blank_api_key() {
        let config = Config {
            api_key: "   ".to_string(),
            ..Config::default()
        };
        assert!(!config.validate_api_key());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_api_key() {
        let config = Config::from_lookup(lookup_from(&[("GROQ_API_KEY", "gsk-test123")])).unwrap();
        assert!(config.validate_api_key());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_blank_verbose_keeps_default() {
        let config = Config::from_lookup(lookup_from(&[("VERBOSE", "")])).unwrap();
        assert!(config.verbose);

        let config = Config::from_lookup(lookup_from(&[("VERBOSE", "false")])).unwrap();
        assert!(!config.verbose);
    }

    #[test]
    fn test_lookup_without_config_path_reads_no_file() {
        let dir = TempDir::new().unwrap();
        let default_file = dir.path().join("agents.toml");
        std::fs::write(&default_file, "[api]\napi_key = \"gsk-from-file\"\n").unwrap();

        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.api_key, "");
        assert!(config.validate().is_err());

        let config = Config::from_lookup(with_default_file(lookup_from(&[]), &default_file)).unwrap();
        assert_eq!(config.api_key, "gsk-from-file");
    }

    #[test]
    fn test_default_file_only_fills_unset_config_path() {
        let dir = TempDir::new().unwrap();
        let default_file = dir.path().join("agents.toml");
        let explicit = create_test_config();
        let explicit_path = explicit.path().to_string_lossy().to_string();

        let absent = with_default_file(lookup_from(&[]), &default_file);
        assert_eq!(absent(env::CONFIG_PATH), None);

        std::fs::write(&default_file, "").unwrap();
        let lookup = with_default_file(
            lookup_from(&[("CONFIG_PATH", explicit_path.as_str()), ("GROQ_MODEL", " ")]),
            &default_file,
        );
        assert_eq!(lookup(env::CONFIG_PATH), Some(explicit_path.clone()));
        assert_eq!(lookup(env::MODEL), None);

        let blank = with_default_file(lookup_from(&[("CONFIG_PATH", "")]), &default_file);
        assert_eq!(
            blank(env::CONFIG_PATH),
            Some(default_file.to_string_lossy().into_owned())
        );
    }

    #[test]
    fn test_workflow_slug_is_normalized() {
        let config = Config::from_lookup(lookup_from(&[("AGENT_WORKFLOW", " Travel ")])).unwrap();
        assert_eq!(config.workflow.as_deref(), Some("travel"));
    }
}
