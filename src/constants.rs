//! Application-wide constants for mull.
//!
//! Environment variable names, provider defaults, cache policy, and the
//! wire formats shared between modules live here so they are defined in
//! exactly one place.

use std::time::Duration;

/// Application name used in CLI help and user-facing messages.
pub const APP_NAME: &str = "mull";

/// Short description shown by `--help`.
pub const APP_DESCRIPTION: &str =
    "Journaling companion that turns daily entries into AI mood insight";

// Environment variables

/// Required API key for the AI provider.
pub const ENV_VAR_API_KEY: &str = "GROQ_API_KEY";

/// Overrides the database file location.
pub const ENV_VAR_DB_PATH: &str = "MULL_DB";

/// Overrides the provider base URL (tests point this at a local mock).
pub const ENV_VAR_PROVIDER_URL: &str = "MULL_PROVIDER_URL";

/// Overrides the chat model name.
pub const ENV_VAR_MODEL: &str = "MULL_MODEL";

// Provider defaults

/// Default provider base URL (Groq's OpenAI-compatible API).
pub const DEFAULT_PROVIDER_URL: &str = "https://api.groq.com";

/// Default chat model.
pub const DEFAULT_CHAT_MODEL: &str = "llama-3.1-8b-instant";

/// Path of the chat completions endpoint, relative to the base URL.
pub const CHAT_COMPLETIONS_PATH: &str = "/openai/v1/chat/completions";

/// Hard ceiling on a single provider request.
pub const PROVIDER_TIMEOUT: Duration = Duration::from_secs(30);

// Analysis reply format

/// Line prefix carrying the one-word mood.
pub const FIELD_MOOD: &str = "MOOD:";

/// Line prefix carrying the 1-10 mood score.
pub const FIELD_SCORE: &str = "SCORE:";

/// Line prefix carrying the short summary.
pub const FIELD_SUMMARY: &str = "SUMMARY:";

/// Line prefix carrying the practical suggestion.
pub const FIELD_SUGGESTION: &str = "SUGGESTION:";

// Caching

/// How long a computed summary stays valid for a given user.
pub const SUMMARY_CACHE_TTL: Duration = Duration::from_secs(3600);

// Storage formats

/// Calendar dates in the database, `YYYY-MM-DD`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Timestamps in the database, `YYYY-MM-DD HH:MM:SS` in server-local time.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// Defaults

/// Database location under `$HOME` when `MULL_DB` is unset.
pub const DEFAULT_DB_SUBPATH: &str = ".mull/journal.db";

/// Username assumed when the CLI is run without `--user`.
pub const DEFAULT_USERNAME: &str = "default";

/// How many common words `stats` reports.
pub const COMMON_WORD_LIMIT: usize = 5;

/// Placeholder for sensitive values in Debug output.
pub const REDACTED_PLACEHOLDER: &str = "[REDACTED]";
