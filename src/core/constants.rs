//! Constants for chat roles, environment variables and defaults
//!
//! This module defines string constants used throughout the application for
//! message roles, the environment variables read at startup, and the static
//! defaults applied when a setting is absent.

/// Message role constants
pub mod role {
    /// User role identifier
    pub const USER: &str = "user";

    /// Assistant role identifier
    pub const ASSISTANT: &str = "assistant";

    /// System role identifier
    pub const SYSTEM: &str = "system";
}

/// Environment variable names
pub mod env {
    pub const API_KEY: &str = "GROQ_API_KEY";
    pub const API_BASE: &str = "GROQ_API_BASE";
    pub const MODEL: &str = "GROQ_MODEL";
    pub const TEMPERATURE: &str = "AGENT_TEMPERATURE";
    pub const MAX_TOKENS: &str = "AGENT_MAX_TOKENS";
    pub const TIMEOUT: &str = "AGENT_TIMEOUT";
    pub const VERBOSE: &str = "VERBOSE";
    pub const DEBUG: &str = "DEBUG";
    pub const LOG_LEVEL: &str = "LOG_LEVEL";
    pub const OUTPUT_DIR: &str = "OUTPUT_DIR";
    pub const WORKFLOW: &str = "AGENT_WORKFLOW";
    pub const CONFIG_PATH: &str = "CONFIG_PATH";
}

/// Static defaults
pub mod defaults {
    /// Groq's OpenAI-compatible base URL
    pub const API_BASE: &str = "https://api.groq.com/openai/v1";

    pub const MODEL: &str = "llama-3.1-8b-instant";

    pub const TEMPERATURE: f32 = 0.7;

    pub const MAX_TOKENS: u32 = 2000;

    /// Request timeout in seconds
    pub const TIMEOUT: u64 = 300;

    pub const LOG_LEVEL: &str = "info";

    pub const OUTPUT_DIR: &str = ".";

    pub const CONFIG_FILE: &str = "agents.toml";
}

/// Width of the `=` rules printed around section titles
pub const RULE_WIDTH: usize = 80;
