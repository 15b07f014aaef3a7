//! Conversational agents demo
//!
//! Runs the research paper outline workflow (or `AGENT_WORKFLOW`) with each
//! agent seeing earlier replies as conversation context.

use agent_pipelines::app;
use agent_pipelines::workflow::Framework;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    app::run(Framework::Conversation).await
}
