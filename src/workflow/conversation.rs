//! Conversational workflow
//!
//! Each phase hands one agent a system prompt built from its role and
//! instructions, plus a user message carrying every earlier phase's output as
//! a labelled block followed by the phase's request.

use super::{
    Framework, PhaseOutput, RunSettings, WorkflowError, WorkflowRun, complete_phase, print_banner,
};
use crate::core::provider::Provider;
use chrono::Local;

/// Placeholder context for the first phase
pub const NO_CONTEXT: &str = "No prior context yet.";

/// An agent defined by a role and free-form instructions
#[derive(Debug, Clone)]
pub struct ConversableAgent {
    pub name: String,
    pub role: String,
    pub instructions: String,
    /// Overrides the run's default temperature
    pub temperature: Option<f32>,
}

impl ConversableAgent {
    pub fn new(name: &str, role: &str, instructions: &str) -> Self {
        Self {
            name: name.to_string(),
            role: role.to_string(),
            instructions: instructions.to_string(),
            temperature: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// System prompt for this agent working on `topic`
    pub fn system_prompt(&self, subject_label: &str, topic: &str) -> String {
        format!(
            "You are a {}.\n\n{}\n\nThe {} is: '{}'.",
            self.role,
            self.instructions,
            subject_label.to_lowercase(),
            topic
        )
    }
}

/// One step of a conversational workflow
#[derive(Debug, Clone)]
pub struct ConversationPhase {
    pub name: String,
    pub description: String,
    pub agent: ConversableAgent,
    /// What the agent is asked to do in this phase
    pub request: String,
}

impl ConversationPhase {
    pub fn new(name: &str, description: &str, agent: ConversableAgent, request: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            agent,
            request: request.to_string(),
        }
    }
}

/// A fixed sequence of conversational phases
#[derive(Debug, Clone)]
pub struct ConversationWorkflow {
    pub slug: String,
    pub title: String,
    /// e.g. "Paper topic", "Product idea"
    pub subject_label: String,
    pub default_topic: String,
    pub phases: Vec<ConversationPhase>,
}

/// Render earlier outputs as `[NAME OUTPUT]` blocks
pub fn context_text(outputs: &[PhaseOutput]) -> String {
    if outputs.is_empty() {
        return NO_CONTEXT.to_string();
    }

    outputs
        .iter()
        .map(|output| format!("[{} OUTPUT]\n{}\n", output.name.to_uppercase(), output.content))
        .collect::<Vec<_>>()
        .join("\n")
}

/// User message: earlier context first, then the phase request
pub fn user_prompt(context: &str, request: &str) -> String {
    format!(
        "Context from previous phases:\n\n{}\n\nYour task:\n{}",
        context, request
    )
}

/// Context echo printed before a phase when the run is verbose
fn context_echo(settings: &RunSettings, agent_name: &str, context: &str) -> Option<String> {
    settings
        .verbose
        .then(|| format!("\n[Context passed to {}]\n\n{}", agent_name, context))
}

impl ConversationWorkflow {
    /// Run every phase in order against `provider`
    ///
    /// # Errors
    ///
    /// Stops at the first phase that fails or comes back empty.
    pub async fn run(
        &self,
        provider: &dyn Provider,
        settings: &RunSettings,
        topic: &str,
    ) -> Result<WorkflowRun, WorkflowError> {
        if self.phases.is_empty() {
            return Err(WorkflowError::NoPhases);
        }

        let started_at = Local::now();
        let mut outputs: Vec<PhaseOutput> = Vec::with_capacity(self.phases.len());

        for phase in &self.phases {
            print_banner(&format!(
                "PHASE: {} ({})",
                phase.description.to_uppercase(),
                phase.name
            ));

            let context = context_text(&outputs);
            if let Some(echo) = context_echo(settings, &phase.agent.name, &context) {
                println!("{}", echo);
            }

            let (content, usage) = complete_phase(
                provider,
                settings,
                phase.agent.temperature,
                &phase.name,
                phase.agent.system_prompt(&self.subject_label, topic),
                user_prompt(&context, &phase.request),
            )
            .await?;

            println!("\n[{} output]\n", phase.agent.name);
            println!("{}", content);

            outputs.push(PhaseOutput {
                name: phase.name.clone(),
                description: phase.description.clone(),
                agent_role: phase.agent.role.clone(),
                content,
                usage,
            });
        }

        Ok(WorkflowRun {
            framework: Framework::Conversation,
            slug: self.slug.clone(),
            title: self.title.clone(),
            subject_label: self.subject_label.clone(),
            subject: topic.to_string(),
            model: settings.model.clone(),
            started_at,
            phases: outputs,
        })
    }
}
