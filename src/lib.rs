//! Sequential multi-agent LLM pipelines
//!
//! Two small orchestration styles, a conversational one and a task-based
//! crew, each running a fixed four-phase workflow against an
//! OpenAI-compatible chat API (Groq by default). Every phase's prompt carries
//! the text produced by the phases before it; the results are printed and
//! saved as a timestamped transcript and executive summary.

pub mod app;
pub mod core;
pub mod models;
pub mod output;
pub mod scenarios;
pub mod workflow;
