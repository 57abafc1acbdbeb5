//! Command-line interface definitions for mull.

use clap::{Parser, Subcommand};

use crate::constants::{APP_DESCRIPTION, APP_NAME, DEFAULT_USERNAME};

/// Top-level arguments for the `mull` binary.
#[derive(Parser, Debug)]
#[command(name = APP_NAME, about = APP_DESCRIPTION, version)]
pub struct CliArgs {
    /// Journal owner; created on first use
    #[arg(short, long, global = true, default_value = DEFAULT_USERNAME)]
    pub user: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Record a journal entry
    Add {
        /// Entry text
        content: String,
    },
    /// List entries, newest first
    List,
    /// Rewrite an entry's content
    Edit {
        /// Entry id (see `list`)
        id: i64,
        /// Replacement text
        content: String,
    },
    /// Delete an entry
    Delete {
        /// Entry id (see `list`)
        id: i64,
    },
    /// AI mood summary of the whole journal
    Summary,
    /// Ask the AI a question about the journal
    Ask {
        /// The question
        question: String,
    },
    /// Current daily writing streak
    Streak,
    /// Stored mood history, oldest first
    Trends {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Entry counts and common words
    Stats,
    /// Totals, today's mood, and streak at a glance
    Overview,
}
