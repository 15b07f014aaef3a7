//! Transcript and executive summary files
//!
//! Every run produces two plain-text files in the output directory:
//! `<slug>_<YYYYMMDD_HHMMSS>.txt` with every phase's output, and
//! `<slug>_summary_<YYYYMMDD_HHMMSS>.txt` with totals and the final result.

use crate::core::constants::RULE_WIDTH;
use crate::workflow::WorkflowRun;
use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// strftime pattern embedded in report file names
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Header that opens each phase section
pub fn phase_header(name: &str) -> String {
    format!("--- PHASE: {} ---", name)
}

pub fn transcript_file_name<Tz: TimeZone>(slug: &str, at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("{}_{}.txt", slug, at.format(TIMESTAMP_FORMAT))
}

pub fn summary_file_name<Tz: TimeZone>(slug: &str, at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("{}_summary_{}.txt", slug, at.format(TIMESTAMP_FORMAT))
}

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

fn write_header(out: &mut String, heading: &str, run: &WorkflowRun) {
    out.push_str(heading);
    out.push('\n');
    out.push_str(&rule());
    out.push('\n');
    out.push_str(&format!("Framework: {}\n", run.framework.label()));
    out.push_str(&format!("{}: {}\n", run.subject_label, run.subject));
    out.push_str(&format!("Model: {}\n", run.model));
    out.push_str(&format!(
        "Generated at: {}\n\n",
        run.started_at.format("%Y-%m-%d %H:%M:%S")
    ));
}

/// Full transcript: header plus every phase in order
pub fn render_transcript(run: &WorkflowRun) -> String {
    let mut out = String::new();
    write_header(&mut out, &format!("{} - Full Transcript", run.title), run);

    for phase in &run.phases {
        out.push_str(&phase_header(&phase.name));
        out.push('\n');
        out.push_str(&format!("Agent: {}\n", phase.agent_role));
        out.push_str(&format!("Task: {}\n", phase.description));
        out.push('\n');
        out.push_str(&phase.content);
        out.push_str("\n\n");
    }

    out
}

/// Executive summary: totals, a one-line overview per phase, and the final result
pub fn render_summary(run: &WorkflowRun) -> String {
    let mut out = String::new();
    write_header(&mut out, &format!("{} - Executive Summary", run.title), run);

    out.push_str(&format!("Phases completed: {}\n", run.phases.len()));
    if let Some(usage) = run.total_usage() {
        out.push_str(&format!(
            "Tokens used: {} ({} prompt, {} completion)\n",
            usage.total_tokens, usage.prompt_tokens, usage.completion_tokens
        ));
    }
    out.push('\n');

    out.push_str("Phase overview:\n");
    for (index, phase) in run.phases.iter().enumerate() {
        out.push_str(&format!(
            "  {}. {} ({}) - {} words\n",
            index + 1,
            phase.name,
            phase.agent_role,
            phase.content.split_whitespace().count()
        ));
    }
    out.push('\n');

    out.push_str("FINAL RESULT\n");
    out.push_str(&rule());
    out.push('\n');
    out.push_str(run.final_output().unwrap_or("(no output)"));
    out.push('\n');

    out
}

/// Paths of the files written for one run
#[derive(Debug, Clone)]
pub struct SavedReport {
    pub transcript: PathBuf,
    pub summary: PathBuf,
}

/// Writes run reports into a directory
pub struct ReportWriter {
    dir: PathBuf,
}

impl ReportWriter {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Write the transcript and summary for `run`
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created or a file cannot be
    /// written.
    pub fn write(&self, run: &WorkflowRun) -> Result<SavedReport> {
        fs::create_dir_all(&self.dir).with_context(|| {
            format!("Failed to create output directory {}", self.dir.display())
        })?;

        let transcript = self.dir.join(transcript_file_name(&run.slug, &run.started_at));
        fs::write(&transcript, render_transcript(run))
            .with_context(|| format!("Failed to write {}", transcript.display()))?;

        let summary = self.dir.join(summary_file_name(&run.slug, &run.started_at));
        fs::write(&summary, render_summary(run))
            .with_context(|| format!("Failed to write {}", summary.display()))?;

        info!(
            "Saved report files {} and {}",
            transcript.display(),
            summary.display()
        );

        Ok(SavedReport { transcript, summary })
    }
}
