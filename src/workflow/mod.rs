//! Sequential multi-agent workflows
//!
//! Two orchestration styles share the same plumbing: every phase is one chat
//! completion, run strictly after the previous one, with all earlier outputs
//! folded into its prompt.
//!
//! - [`conversation`]: agents are a role plus instructions, and see earlier
//!   replies as labelled context blocks.
//! - [`crew`]: agents have a role, goal and backstory; tasks carry a
//!   description and an expected output and are interpolated from kickoff
//!   inputs.

pub mod conversation;
pub mod crew;

pub use conversation::{ConversableAgent, ConversationPhase, ConversationWorkflow};
pub use crew::{Crew, CrewAgent, CrewTask, interpolate};

use crate::core::config::Config;
use crate::core::provider::{Provider, ProviderError};
use crate::models::openai::{OpenAIChatCompletionRequest, OpenAIMessage, OpenAIUsage};
use chrono::{DateTime, Local};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that end a workflow run
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("Phase '{phase}' failed: {source}")]
    Phase {
        phase: String,
        #[source]
        source: ProviderError,
    },

    #[error("Phase '{phase}' returned an empty response")]
    EmptyResponse { phase: String },

    #[error("Workflow has no phases")]
    NoPhases,

    #[error("No input provided for placeholder {{{key}}}")]
    MissingInput { key: String },
}

impl WorkflowError {
    /// The provider failure behind this error, if any
    pub fn provider_error(&self) -> Option<&ProviderError> {
        match self {
            WorkflowError::Phase { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Which orchestration style produced a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Framework {
    Conversation,
    Crew,
}

impl Framework {
    pub fn label(&self) -> &'static str {
        match self {
            Framework::Conversation => "Conversational agents",
            Framework::Crew => "Task-based crew",
        }
    }

    /// Name of the executable running this framework
    pub fn binary_name(&self) -> &'static str {
        match self {
            Framework::Conversation => "conversation-demo",
            Framework::Crew => "crew-demo",
        }
    }
}

/// Per-run completion settings
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Echo the prompt context before each call
    pub verbose: bool,
}

impl From<&Config> for RunSettings {
    fn from(config: &Config) -> Self {
        Self {
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            verbose: config.verbose,
        }
    }
}

/// Text produced by one phase
#[derive(Debug, Clone)]
pub struct PhaseOutput {
    pub name: String,
    pub description: String,
    pub agent_role: String,
    pub content: String,
    pub usage: Option<OpenAIUsage>,
}

/// Everything a finished run produced, in phase order
#[derive(Debug, Clone)]
pub struct WorkflowRun {
    pub framework: Framework,
    /// Scenario slug, used as the report file prefix
    pub slug: String,
    pub title: String,
    /// What the subject is called in headers ("Topic", "Conference theme")
    pub subject_label: String,
    pub subject: String,
    pub model: String,
    pub started_at: DateTime<Local>,
    pub phases: Vec<PhaseOutput>,
}

impl WorkflowRun {
    /// Output of the last phase, which is the result of the run
    pub fn final_output(&self) -> Option<&str> {
        self.phases.last().map(|phase| phase.content.as_str())
    }

    pub fn output_for(&self, phase_name: &str) -> Option<&str> {
        self.phases
            .iter()
            .find(|phase| phase.name == phase_name)
            .map(|phase| phase.content.as_str())
    }

    /// Token usage summed over phases; `None` if the API never reported any
    pub fn total_usage(&self) -> Option<OpenAIUsage> {
        self.phases
            .iter()
            .filter_map(|phase| phase.usage)
            .reduce(|mut total, usage| {
                total += usage;
                total
            })
    }
}

/// Run one phase's prompt pair against the provider
pub(crate) async fn complete_phase(
    provider: &dyn Provider,
    settings: &RunSettings,
    temperature: Option<f32>,
    phase: &str,
    system_prompt: String,
    user_prompt: String,
) -> Result<(String, Option<OpenAIUsage>), WorkflowError> {
    let request = OpenAIChatCompletionRequest {
        model: settings.model.clone(),
        messages: vec![
            OpenAIMessage::system(system_prompt),
            OpenAIMessage::user(user_prompt),
        ],
        max_tokens: Some(settings.max_tokens),
        temperature: Some(temperature.unwrap_or(settings.temperature)),
        stream: false,
    };

    info!("Running phase '{}' on {}", phase, settings.model);
    debug!("Phase '{}' request: {:?}", phase, request);

    let response = provider
        .create_chat_completion(&request)
        .await
        .map_err(|source| WorkflowError::Phase {
            phase: phase.to_string(),
            source,
        })?;

    let content = response
        .first_text()
        .ok_or_else(|| WorkflowError::EmptyResponse {
            phase: phase.to_string(),
        })?
        .trim()
        .to_string();

    if let Some(usage) = response.usage {
        info!(
            "Phase '{}' done: {} prompt + {} completion tokens",
            phase, usage.prompt_tokens, usage.completion_tokens
        );
    } else {
        info!("Phase '{}' done", phase);
    }

    Ok((content, response.usage))
}

/// Print a title between two `=` rules
pub(crate) fn print_banner(title: &str) {
    let rule = "=".repeat(crate::core::constants::RULE_WIDTH);
    println!("\n{}", rule);
    println!("{}", title);
    println!("{}", rule);
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted provider shared by the workflow tests

    use super::*;
    use crate::models::openai::{OpenAIChatCompletionResponse, OpenAIChoice};
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    pub enum Reply {
        Text(&'static str),
        Fail(u16, &'static str),
    }

    /// Returns canned replies in order and records every request
    pub struct ScriptedProvider {
        replies: Mutex<VecDeque<Reply>>,
        pub requests: Mutex<Vec<OpenAIChatCompletionRequest>>,
    }

    impl ScriptedProvider {
        pub fn new(replies: Vec<Reply>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn texts(texts: &[&'static str]) -> Self {
            Self::new(texts.iter().map(|t| Reply::Text(*t)).collect())
        }

        /// (system, user) content of the n-th request
        pub fn prompts(&self, n: usize) -> (String, String) {
            let requests = self.requests.lock().unwrap();
            let request = &requests[n];
            (
                request.messages[0].content.clone().unwrap(),
                request.messages[1].content.clone().unwrap(),
            )
        }

        pub fn request_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl Provider for ScriptedProvider {
        async fn create_chat_completion(
            &self,
            request: &OpenAIChatCompletionRequest,
        ) -> Result<OpenAIChatCompletionResponse, ProviderError> {
            self.requests.lock().unwrap().push(request.clone());
            let reply = self
                .replies
                .lock()
                .unwrap()
                .pop_front()
                .expect("scripted provider ran out of replies");

            match reply {
                Reply::Fail(status, message) => {
                    Err(ProviderError::from_status(status, message.to_string()))
                }
                Reply::Text(text) => Ok(OpenAIChatCompletionResponse {
                    id: "chatcmpl-scripted".to_string(),
                    object: "chat.completion".to_string(),
                    created: 0,
                    model: request.model.clone(),
                    choices: vec![OpenAIChoice {
                        index: 0,
                        message: OpenAIMessage::assistant(text),
                        finish_reason: Some("stop".to_string()),
                    }],
                    usage: Some(OpenAIUsage {
                        prompt_tokens: 10,
                        completion_tokens: 5,
                        total_tokens: 15,
                    }),
                }),
            }
        }

        fn provider_name(&self) -> &str {
            "Scripted"
        }
    }

    pub fn settings() -> RunSettings {
        RunSettings {
            model: "llama-3.1-8b-instant".to_string(),
            temperature: 0.7,
            max_tokens: 2000,
            verbose: false,
        }
    }
}
