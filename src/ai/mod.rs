//! AI provider integration.
//!
//! Prompt construction, the blocking HTTP client for the chat completions
//! endpoint, and lenient parsing of the structured analysis reply.

pub mod client;
pub mod parser;
pub mod prompts;

pub use client::ChatClient;
pub use parser::{parse_analysis, AnalysisResult};
