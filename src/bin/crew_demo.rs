//! Task-based crew demo
//!
//! Runs the conference agenda crew (or `AGENT_WORKFLOW`). Positional
//! arguments replace the crew's input, e.g. `crew-demo Climate Tech`.

use agent_pipelines::app;
use agent_pipelines::workflow::Framework;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    app::run(Framework::Crew).await
}
