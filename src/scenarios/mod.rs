//! Built-in workflow definitions
//!
//! Each framework ships two four-phase scenarios. `AGENT_WORKFLOW` picks one
//! by slug; without it the first listed scenario runs.

pub mod conference;
pub mod product;
pub mod research;
pub mod travel;

use crate::workflow::{Crew, ConversationWorkflow};
use thiserror::Error;

pub const CONVERSATION_SLUGS: [&str; 2] = [research::SLUG, product::SLUG];

pub const CREW_SLUGS: [&str; 2] = [conference::SLUG, travel::SLUG];

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown workflow '{slug}'. Available: {}", .available.join(", "))]
pub struct UnknownScenario {
    pub slug: String,
    pub available: Vec<&'static str>,
}

fn unknown(slug: &str, available: &[&'static str]) -> UnknownScenario {
    UnknownScenario {
        slug: slug.to_string(),
        available: available.to_vec(),
    }
}

/// Look up a conversational scenario, defaulting to the research outline
pub fn conversation(slug: Option<&str>) -> Result<ConversationWorkflow, UnknownScenario> {
    match slug.map(|s| s.trim().to_lowercase()).as_deref() {
        None | Some(research::SLUG) => Ok(research::workflow()),
        Some(product::SLUG) => Ok(product::workflow()),
        Some(other) => Err(unknown(other, &CONVERSATION_SLUGS)),
    }
}

/// Look up a crew scenario, defaulting to the conference agenda
pub fn crew(slug: Option<&str>) -> Result<Crew, UnknownScenario> {
    match slug.map(|s| s.trim().to_lowercase()).as_deref() {
        None | Some(conference::SLUG) => Ok(conference::crew()),
        Some(travel::SLUG) => Ok(travel::crew()),
        Some(other) => Err(unknown(other, &CREW_SLUGS)),
    }
}
