//! Task-based crew workflow
//!
//! Agents carry a role, goal and backstory; tasks carry a description and the
//! expected shape of the answer. `kickoff` fills `{placeholders}` from the
//! supplied inputs, then runs the tasks sequentially, each with the outputs of
//! all earlier tasks as context. The crew's result is the last task's output.

use super::{
    Framework, PhaseOutput, RunSettings, WorkflowError, WorkflowRun, complete_phase, print_banner,
};
use crate::core::provider::Provider;
use chrono::Local;
use std::collections::BTreeMap;
use std::sync::Arc;

const CONTEXT_DIVIDER: &str = "\n\n----------\n\n";

/// A crew member
#[derive(Debug, Clone)]
pub struct CrewAgent {
    pub role: String,
    pub goal: String,
    pub backstory: String,
}

impl CrewAgent {
    pub fn new(role: &str, goal: &str, backstory: &str) -> Arc<Self> {
        Arc::new(Self {
            role: role.to_string(),
            goal: goal.to_string(),
            backstory: backstory.to_string(),
        })
    }

    fn system_prompt(&self, inputs: &BTreeMap<String, String>) -> Result<String, WorkflowError> {
        Ok(format!(
            "You are {}. {}\nYour personal goal is: {}",
            interpolate(&self.role, inputs)?,
            interpolate(&self.backstory, inputs)?,
            interpolate(&self.goal, inputs)?
        ))
    }
}

/// A unit of work assigned to one agent
#[derive(Debug, Clone)]
pub struct CrewTask {
    pub name: String,
    pub description: String,
    pub expected_output: String,
    pub agent: Arc<CrewAgent>,
}

impl CrewTask {
    pub fn new(name: &str, agent: &Arc<CrewAgent>, description: &str, expected_output: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            expected_output: expected_output.to_string(),
            agent: Arc::clone(agent),
        }
    }

    fn user_prompt(
        &self,
        inputs: &BTreeMap<String, String>,
        context: &[PhaseOutput],
    ) -> Result<String, WorkflowError> {
        let mut prompt = format!(
            "Current Task: {}\n\nThis is the expected criteria for your final answer: {}\n\
             You MUST return the actual complete content as the final answer, not a summary.",
            interpolate(&self.description, inputs)?,
            interpolate(&self.expected_output, inputs)?
        );

        if !context.is_empty() {
            let joined = context
                .iter()
                .map(|output| output.content.as_str())
                .collect::<Vec<_>>()
                .join(CONTEXT_DIVIDER);
            prompt.push_str("\n\nThis is the context you're working with:\n");
            prompt.push_str(&joined);
        }

        prompt.push_str("\n\nBegin! Give your best final answer.");
        Ok(prompt)
    }
}

/// Agents plus the ordered tasks they execute
#[derive(Debug, Clone)]
pub struct Crew {
    pub slug: String,
    pub title: String,
    /// Kickoff input naming the subject of the run, e.g. `conference_theme`
    pub input_key: String,
    pub subject_label: String,
    pub default_input: String,
    pub agents: Vec<Arc<CrewAgent>>,
    pub tasks: Vec<CrewTask>,
}

impl Crew {
    /// Kickoff inputs holding `subject` under the crew's input key
    pub fn inputs_for(&self, subject: &str) -> BTreeMap<String, String> {
        BTreeMap::from([(self.input_key.clone(), subject.to_string())])
    }

    /// Run every task in order
    ///
    /// # Errors
    ///
    /// Fails before the first call if a placeholder has no input, and stops
    /// at the first task whose completion fails.
    pub async fn kickoff(
        &self,
        provider: &dyn Provider,
        settings: &RunSettings,
        inputs: &BTreeMap<String, String>,
    ) -> Result<WorkflowRun, WorkflowError> {
        if self.tasks.is_empty() {
            return Err(WorkflowError::NoPhases);
        }
        let subject = inputs
            .get(&self.input_key)
            .cloned()
            .ok_or_else(|| WorkflowError::MissingInput {
                key: self.input_key.clone(),
            })?;

        // Resolve every placeholder before the first call.
        for task in &self.tasks {
            task.agent.system_prompt(inputs)?;
            task.user_prompt(inputs, &[])?;
        }

        let started_at = Local::now();
        let mut outputs: Vec<PhaseOutput> = Vec::with_capacity(self.tasks.len());

        for task in &self.tasks {
            let description = interpolate(&task.description, inputs)?;
            let system_prompt = task.agent.system_prompt(inputs)?;
            let user_prompt = task.user_prompt(inputs, &outputs)?;

            println!("\n# Agent: {}", task.agent.role);
            println!("## Task: {}", task.name);
            if settings.verbose {
                println!("{}", description);
            }

            let (content, usage) =
                complete_phase(provider, settings, None, &task.name, system_prompt, user_prompt)
                    .await?;

            if settings.verbose {
                println!("\n## Final Answer:\n{}", content);
            }

            outputs.push(PhaseOutput {
                name: task.name.clone(),
                description,
                agent_role: task.agent.role.clone(),
                content,
                usage,
            });
        }

        print_banner(&format!("{}: CREW FINISHED ({} tasks)", self.title.to_uppercase(), outputs.len()));

        Ok(WorkflowRun {
            framework: Framework::Crew,
            slug: self.slug.clone(),
            title: self.title.clone(),
            subject_label: self.subject_label.clone(),
            subject,
            model: settings.model.clone(),
            started_at,
            phases: outputs,
        })
    }
}

/// Replace `{key}` placeholders with values from `inputs`
///
/// `{{` and `}}` produce literal braces. Braces not enclosing a plain
/// identifier are copied through unchanged.
pub fn interpolate(template: &str, inputs: &BTreeMap<String, String>) -> Result<String, WorkflowError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(pos) = rest.find(['{', '}']) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        if let Some(after) = tail.strip_prefix("{{") {
            out.push('{');
            rest = after;
            continue;
        }
        if let Some(after) = tail.strip_prefix("}}") {
            out.push('}');
            rest = after;
            continue;
        }

        if tail.starts_with('{') {
            if let Some(end) = tail.find('}') {
                let key = &tail[1..end];
                if is_placeholder(key) {
                    let value = inputs.get(key).ok_or_else(|| WorkflowError::MissingInput {
                        key: key.to_string(),
                    })?;
                    out.push_str(value);
                    rest = &tail[end + 1..];
                    continue;
                }
            }
        }

        out.push_str(&tail[..1]);
        rest = &tail[1..];
    }

    out.push_str(rest);
    Ok(out)
}

fn is_placeholder(key: &str) -> bool {
    !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
