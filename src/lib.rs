/*!
# mull

Journaling companion that turns daily entries into AI mood insight.

Users write short entries; mull aggregates them, asks an AI provider for a
structured mood analysis, records one mood observation per calendar day,
tracks a daily writing streak, and answers free-form questions about the
corpus. Expensive provider calls are cached per user for an hour.

## Architecture

- [`config`]: environment-driven configuration
- [`db`]: pooled SQLite storage (users, entries, mood trends)
- [`ai`]: provider client, prompts, and lenient reply parsing
- [`cache`]: per-user TTL cache of computed summaries
- [`insight`]: the engine tying the pieces together
- [`cli`]: argument parsing for the `mull` binary
- [`errors`]: the error taxonomy

## Example

```no_run
use mull::db::users::ensure_user;
use mull::{ChatClient, Config, Database, InsightEngine};

fn main() -> mull::AppResult<()> {
    let config = Config::load()?;
    let db = Database::open(&config.db_path)?;
    db.initialize_schema()?;
    let client = ChatClient::new(&config.provider_url, &config.api_key, &config.model)?;
    let engine = InsightEngine::new(db.clone(), client);

    let user = ensure_user(&*db.get_conn()?, "maya")?;
    let summary = engine.summarize(user)?;
    println!("{} ({}/10)", summary.analysis.mood, summary.analysis.score_value());
    Ok(())
}
```
*/

pub mod ai;
pub mod cache;
pub mod cli;
pub mod config;
pub mod constants;
pub mod db;
pub mod errors;
pub mod insight;

pub use ai::{AnalysisResult, ChatClient};
pub use cache::SummaryCache;
pub use config::Config;
pub use db::users::UserId;
pub use db::Database;
pub use errors::{AppError, AppResult, DatabaseError, ProviderError};
pub use insight::InsightEngine;
