//! API data models
//!
//! This module contains data structures for the OpenAI-compatible chat API.

pub mod openai;
