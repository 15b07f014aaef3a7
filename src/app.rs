//! Command-line entry point shared by both demo binaries

use crate::core::config::Config;
use crate::core::constants::RULE_WIDTH;
use crate::core::logging::init_logging;
use crate::core::provider::{Provider, ProviderError};
use crate::core::providers::OpenAIProvider;
use crate::output::ReportWriter;
use crate::scenarios;
use crate::workflow::{Framework, RunSettings, WorkflowError, WorkflowRun};
use std::process::ExitCode;
use tracing::{error, info};

/// Run one demo end to end and return the process exit code
pub async fn run(framework: Framework) -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        print_help(framework);
        return ExitCode::SUCCESS;
    }

    // A missing .env is fine; variables may come from the shell.
    dotenv::dotenv().ok();

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration Error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    init_logging(config.effective_log_level());

    if let Err(e) = config.validate() {
        eprintln!("Configuration Error: {}", e);
        eprintln!("Create a .env file next to where you run the demo containing:");
        eprintln!("  GROQ_API_KEY=your-key-here");
        return ExitCode::FAILURE;
    }

    let provider = match OpenAIProvider::new(
        config.api_key.clone(),
        config.api_base.clone(),
        config.request_timeout,
    ) {
        Ok(provider) => provider,
        Err(e) => {
            error!("Failed to initialize provider: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let subject = (!args.is_empty()).then(|| args.join(" "));

    match execute(framework, &config, &provider, subject).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            report_failure(&e);
            ExitCode::FAILURE
        }
    }
}

/// Failures after configuration has been validated
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Scenario(#[from] scenarios::UnknownScenario),

    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    #[error("Failed to save output: {0:#}")]
    Output(anyhow::Error),
}

/// Select the scenario, run it, print and save the results
pub async fn execute(
    framework: Framework,
    config: &Config,
    provider: &dyn Provider,
    subject: Option<String>,
) -> Result<WorkflowRun, RunError> {
    let settings = RunSettings::from(config);
    let workflow = config.workflow.as_deref();

    let run = match framework {
        Framework::Conversation => {
            let workflow = scenarios::conversation(workflow)?;
            let topic = subject.unwrap_or_else(|| workflow.default_topic.clone());
            print_startup_banner(framework, config, provider, &workflow.title, &workflow.subject_label, &topic);
            let run = workflow.run(provider, &settings, &topic).await?;

            print_rule();
            println!("WORKFLOW COMPLETE");
            print_rule();
            if let Some(last) = run.phases.last() {
                println!("Final result is in the '{}' phase output.", last.name);
            }
            run
        }
        Framework::Crew => {
            let crew = scenarios::crew(workflow)?;
            let input = subject.unwrap_or_else(|| crew.default_input.clone());
            print_startup_banner(framework, config, provider, &crew.title, &crew.subject_label, &input);
            println!("Forming the crew: {}", crew_roster(&crew));
            println!("Starting crew execution...");
            let run = crew.kickoff(provider, &settings, &crew.inputs_for(&input)).await?;

            println!();
            print_rule();
            println!("FINAL {} (SUMMARY)", run.title.to_uppercase());
            print_rule();
            println!("{}", run.final_output().unwrap_or_default());
            run
        }
    };

    let saved = ReportWriter::new(&config.output_dir)
        .write(&run)
        .map_err(RunError::Output)?;
    println!("\nSaved full transcript to: {}", saved.transcript.display());
    println!("Saved executive summary to: {}", saved.summary.display());

    info!("Run '{}' finished with {} phases", run.slug, run.phases.len());
    Ok(run)
}

fn crew_roster(crew: &crate::workflow::Crew) -> String {
    crew.agents
        .iter()
        .map(|agent| agent.role.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_rule() {
    println!("{}", "=".repeat(RULE_WIDTH));
}

/// Print startup banner with configuration
fn print_startup_banner(
    framework: Framework,
    config: &Config,
    provider: &dyn Provider,
    title: &str,
    subject_label: &str,
    subject: &str,
) {
    print_rule();
    println!("{} - {} ({})", title.to_uppercase(), framework.label(), provider.provider_name());
    print_rule();
    println!("   Model: {}", config.model);
    println!("   {}: {}", subject_label, subject);
    println!("   Temperature: {}", config.temperature);
    println!("   Max Tokens: {}", config.max_tokens);
    println!("   Request Timeout: {}s", config.request_timeout);
    println!("   Output Directory: {}", config.output_dir.display());
    print_rule();
}

/// Troubleshooting hints for a failed run
pub fn troubleshooting_hints(err: &RunError) -> Vec<&'static str> {
    let provider_error = match err {
        RunError::Workflow(workflow_error) => workflow_error.provider_error(),
        RunError::Scenario(_) => {
            return vec!["Unset AGENT_WORKFLOW or pick one of the listed workflows"];
        }
        RunError::Output(_) => {
            return vec!["Check that OUTPUT_DIR exists or can be created and is writable"];
        }
    };

    match provider_error {
        Some(ProviderError::Authentication(_)) => vec![
            "Check that GROQ_API_KEY in .env is a valid, active key",
            "Make sure GROQ_API_BASE points at the service that issued the key",
        ],
        Some(ProviderError::RateLimit(_)) => vec![
            "Wait a minute and run again",
            "Lower AGENT_MAX_TOKENS or switch GROQ_MODEL to a smaller model",
        ],
        Some(ProviderError::BadRequest(_)) => vec![
            "Check that GROQ_MODEL names a model available to your account",
            "Lower AGENT_MAX_TOKENS if the prompt plus completion exceeds the context window",
        ],
        Some(ProviderError::Timeout(_)) => vec![
            "Raise AGENT_TIMEOUT",
            "Lower AGENT_MAX_TOKENS so each completion finishes sooner",
        ],
        Some(ProviderError::Network(_)) => vec![
            "Check your internet connection and proxy settings",
            "Verify GROQ_API_BASE is reachable",
        ],
        Some(ProviderError::ApiError { .. }) | Some(ProviderError::Unexpected(_)) | None => vec![
            "Run again with DEBUG=true for detailed logs",
            "Check the provider's status page",
        ],
    }
}

fn report_failure(err: &RunError) {
    eprintln!("\nError: {}", err);
    eprintln!("\nTroubleshooting:");
    for hint in troubleshooting_hints(err) {
        eprintln!("  - {}", hint);
    }
}

/// Print help message
fn print_help(framework: Framework) {
    let (subject, default_workflow, workflows) = match framework {
        Framework::Conversation => ("TOPIC", scenarios::research::SLUG, scenarios::CONVERSATION_SLUGS),
        Framework::Crew => ("INPUT", scenarios::conference::SLUG, scenarios::CREW_SLUGS),
    };

    println!("{} - {} demo", framework.binary_name(), framework.label());
    println!();
    println!("Usage: {} [{}...]", framework.binary_name(), subject);
    println!();
    println!("Arguments:");
    println!("  {}    Words joined into the run's subject (default: the workflow's own)", subject);
    println!();
    println!("Options:");
    println!("  --help    Display this help message");
    println!();
    println!("Environment variables (also read from .env):");
    println!("  GROQ_API_KEY - API key (required)");
    println!("  GROQ_API_BASE - API base URL (default: https://api.groq.com/openai/v1)");
    println!("  GROQ_MODEL - Chat model (default: llama-3.1-8b-instant)");
    println!("  AGENT_TEMPERATURE - Sampling temperature (default: 0.7)");
    println!("  AGENT_MAX_TOKENS - Completion token limit per phase (default: 2000)");
    println!("  AGENT_TIMEOUT - Request timeout in seconds (default: 300)");
    println!("  VERBOSE - Echo prompt context, true/false (default: True)");
    println!("  DEBUG - Debug logging, true/false (default: False)");
    println!("  LOG_LEVEL - Logging level (default: info)");
    println!("  OUTPUT_DIR - Directory for report files (default: .)");
    println!("  CONFIG_PATH - Optional TOML config file (default: agents.toml if present)");
    println!(
        "  AGENT_WORKFLOW - One of: {} (default: {})",
        workflows.join(", "),
        default_workflow
    );
}
