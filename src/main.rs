//! Binary entry point: wires configuration, storage, the AI client, and
//! the engine together, then dispatches one subcommand.

use std::fs;

use chrono::Local;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use mull::cli::{CliArgs, Command};
use mull::db::entries::{add_entry, delete_entry, entries_for, update_entry};
use mull::db::users::ensure_user;
use mull::insight::MoodSummary;
use mull::{AppError, AppResult, ChatClient, Config, Database, InsightEngine, UserId};

const NO_DATA_HINT: &str = "No journal entries to analyze yet. Write one with `mull add \"...\"`.";

fn main() -> AppResult<()> {
    init_tracing();

    let args = CliArgs::parse();
    let config = Config::load()?;
    config.validate()?;
    debug!(?config, "configuration loaded");

    if let Some(parent) = config.db_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let db = Database::open(&config.db_path)?;
    db.initialize_schema()?;

    let client = ChatClient::new(&config.provider_url, &config.api_key, &config.model)?;
    let engine = InsightEngine::new(db.clone(), client);

    let user = {
        let conn = db.get_conn()?;
        ensure_user(&conn, &args.user)?
    };

    run(&engine, &db, user, &args.command)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mull=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(engine: &InsightEngine, db: &Database, user: UserId, command: &Command) -> AppResult<()> {
    match command {
        Command::Add { content } => {
            let conn = db.get_conn()?;
            let id = add_entry(&conn, user, content, Local::now().naive_local())?;
            println!("Recorded entry {id}.");
        }
        Command::List => {
            let conn = db.get_conn()?;
            let entries = entries_for(&conn, user)?;
            if entries.is_empty() {
                println!("No entries yet. Write one with `mull add \"...\"`.");
            }
            for entry in entries {
                println!(
                    "[{}] {}  {}",
                    entry.id,
                    entry.created_at.format("%Y-%m-%d %H:%M"),
                    entry.content
                );
            }
        }
        Command::Edit { id, content } => {
            let conn = db.get_conn()?;
            update_entry(&conn, user, *id, content)?;
            println!("Updated entry {id}.");
        }
        Command::Delete { id } => {
            let conn = db.get_conn()?;
            delete_entry(&conn, user, *id)?;
            println!("Deleted entry {id}.");
        }
        Command::Summary => match engine.summarize(user) {
            Ok(summary) => print_summary(&summary),
            Err(AppError::NoData) => println!("{NO_DATA_HINT}"),
            Err(e) => return Err(e),
        },
        Command::Ask { question } => match engine.answer_question(user, question) {
            Ok(reply) => println!("{reply}"),
            Err(AppError::NoData) => println!("{NO_DATA_HINT}"),
            Err(e) => return Err(e),
        },
        Command::Streak => match engine.streak(user)? {
            0 => println!("No streak right now. Today is a good day to start one."),
            1 => println!("1 day streak. Keep it going!"),
            n => println!("{n} day streak. Keep it going!"),
        },
        Command::Trends { json } => {
            let trends = engine.mood_trends(user)?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&trends)?);
            } else if trends.is_empty() {
                println!("No mood history yet. Run `mull summary` to record today's mood.");
            } else {
                for trend in trends {
                    println!("{}  {:<12} {}/10", trend.day, trend.mood, trend.score);
                }
            }
        }
        Command::Stats => match engine.entry_stats(user) {
            Ok(stats) => {
                println!("Entries: {}", stats.total_entries);
                if let Some(last) = stats.last_entry_at {
                    println!("Last entry: {}", last.format("%Y-%m-%d %H:%M"));
                }
                if !stats.common_words.is_empty() {
                    let words: Vec<String> = stats
                        .common_words
                        .iter()
                        .map(|(word, count)| format!("{word} ({count})"))
                        .collect();
                    println!("Common words: {}", words.join(", "));
                }
            }
            Err(AppError::NoData) => println!("{NO_DATA_HINT}"),
            Err(e) => return Err(e),
        },
        Command::Overview => {
            let overview = engine.overview(user)?;
            println!("Entries: {}", overview.total_entries);
            match overview.last_entry {
                Some(entry) => {
                    println!("Last entry: {}", entry.created_at.format("%Y-%m-%d %H:%M"))
                }
                None => println!("Last entry: none"),
            }
            match overview.mood_today {
                Some(trend) => println!("Mood today: {} ({}/10)", trend.mood, trend.score),
                None => println!("Mood today: not analyzed yet"),
            }
            println!("Streak: {} days", overview.streak);
        }
    }
    Ok(())
}

fn print_summary(summary: &MoodSummary) {
    let analysis = &summary.analysis;
    println!("Mood: {}", analysis.mood);
    println!("Score: {}/10", analysis.score_value());
    println!("Summary: {}", analysis.summary);
    println!("Suggestion: {}", analysis.suggestion);
    if summary.from_cache {
        println!("(cached)");
    }
}
