//! The insight engine: journal analysis operations over storage, the
//! cache, and the AI client.
//!
//! One engine instance serves all users. Every piece of state it touches
//! is partitioned by [`UserId`], so concurrent requests for different
//! users never contend, and concurrent requests for the same user collapse
//! into a single provider call.

pub mod stats;
pub mod streak;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{Local, NaiveDate, NaiveDateTime};
use tracing::{debug, info};

use crate::ai::{AnalysisResult, ChatClient};
use crate::cache::SummaryCache;
use crate::constants::{COMMON_WORD_LIMIT, SUMMARY_CACHE_TTL};
use crate::db::entries::{distinct_entry_dates, entries_for, Entry};
use crate::db::trends::{list_trends, trend_for_day, upsert_trend, MoodTrend};
use crate::db::users::UserId;
use crate::db::Database;
use crate::errors::{AppError, AppResult};

/// A computed (or cache-served) mood summary.
#[derive(Debug, Clone)]
pub struct MoodSummary {
    pub analysis: AnalysisResult,
    /// Whether this result came out of the cache instead of a fresh
    /// provider call.
    pub from_cache: bool,
}

/// Dashboard numbers for one user. Meaningful for an empty journal too:
/// everything is zero or absent.
#[derive(Debug, Clone)]
pub struct Overview {
    pub total_entries: usize,
    pub last_entry: Option<Entry>,
    pub mood_today: Option<MoodTrend>,
    pub streak: u32,
}

/// Plain-text statistics over the corpus, no AI involved.
#[derive(Debug, Clone)]
pub struct EntryStats {
    pub total_entries: usize,
    pub last_entry_at: Option<NaiveDateTime>,
    /// Most frequent words with their counts, highest first.
    pub common_words: Vec<(String, usize)>,
}

/// Orchestrates storage, cache, and the AI client.
///
/// Construct one per process with [`InsightEngine::new`]; both
/// collaborators are injected so tests can point the client at a mock
/// server and the database at a scratch file.
pub struct InsightEngine {
    db: Database,
    client: ChatClient,
    cache: SummaryCache,
    in_flight: Mutex<HashMap<UserId, Arc<Mutex<()>>>>,
}

impl InsightEngine {
    pub fn new(db: Database, client: ChatClient) -> Self {
        InsightEngine {
            db,
            client,
            cache: SummaryCache::new(),
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    /// Analyzes the user's full journal, serving a cached result while one
    /// is still fresh.
    ///
    /// A fresh computation persists today's mood trend and caches the
    /// result for [`SUMMARY_CACHE_TTL`]. Provider failure aborts before
    /// either write, so a failed call leaves no trace.
    pub fn summarize(&self, user: UserId) -> AppResult<MoodSummary> {
        self.summarize_on(user, Local::now().date_naive())
    }

    /// Like [`summarize`], with the trend day supplied by the caller.
    ///
    /// [`summarize`]: InsightEngine::summarize
    pub fn summarize_on(&self, user: UserId, today: NaiveDate) -> AppResult<MoodSummary> {
        if let Some(analysis) = self.cache.get(user) {
            debug!(user = user.0, "summary served from cache");
            return Ok(MoodSummary {
                analysis,
                from_cache: true,
            });
        }

        // One provider call per user at a time; whoever waited here gets
        // the warm cache instead of issuing a second call.
        let flight = self.flight_slot(user);
        let _guard = flight.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(analysis) = self.cache.get(user) {
            debug!(user = user.0, "summary computed concurrently, serving cache");
            return Ok(MoodSummary {
                analysis,
                from_cache: true,
            });
        }

        let conn = self.db.get_conn()?;
        let entries = entries_for(&conn, user)?;
        if entries.is_empty() {
            return Err(AppError::NoData);
        }

        let combined = combine_contents(&entries);
        let analysis = self.client.analyze(&combined)?;

        upsert_trend(&conn, user, today, &analysis.mood, analysis.score_value())?;
        self.cache.put(user, analysis.clone(), SUMMARY_CACHE_TTL);
        info!(
            user = user.0,
            mood = %analysis.mood,
            score = analysis.score_value(),
            "computed mood summary"
        );

        Ok(MoodSummary {
            analysis,
            from_cache: false,
        })
    }

    /// Answers a free-form question against the user's journal, returning
    /// the provider reply verbatim. Replies are never cached and never
    /// persisted.
    ///
    /// An empty question is treated like an empty journal: nothing to
    /// analyze.
    pub fn answer_question(&self, user: UserId, question: &str) -> AppResult<String> {
        let question = question.trim();
        if question.is_empty() {
            return Err(AppError::NoData);
        }

        let conn = self.db.get_conn()?;
        let entries = entries_for(&conn, user)?;
        if entries.is_empty() {
            return Err(AppError::NoData);
        }

        info!(user = user.0, entries = entries.len(), "answering question");
        self.client.answer(&combine_contents(&entries), question)
    }

    /// Days in the user's current writing streak, ending today.
    pub fn streak(&self, user: UserId) -> AppResult<u32> {
        self.streak_on(user, Local::now().date_naive())
    }

    /// Like [`streak`], with `today` supplied by the caller.
    ///
    /// [`streak`]: InsightEngine::streak
    pub fn streak_on(&self, user: UserId, today: NaiveDate) -> AppResult<u32> {
        let conn = self.db.get_conn()?;
        let dates = distinct_entry_dates(&conn, user)?;
        Ok(streak::consecutive_days(&dates, today))
    }

    /// The user's stored mood history, oldest day first.
    pub fn mood_trends(&self, user: UserId) -> AppResult<Vec<MoodTrend>> {
        let conn = self.db.get_conn()?;
        list_trends(&conn, user)
    }

    /// Dashboard panel: totals, last entry, today's stored mood, streak.
    pub fn overview(&self, user: UserId) -> AppResult<Overview> {
        self.overview_on(user, Local::now().date_naive())
    }

    /// Like [`overview`], with `today` supplied by the caller.
    ///
    /// [`overview`]: InsightEngine::overview
    pub fn overview_on(&self, user: UserId, today: NaiveDate) -> AppResult<Overview> {
        let conn = self.db.get_conn()?;
        let entries = entries_for(&conn, user)?;
        let dates = distinct_entry_dates(&conn, user)?;
        Ok(Overview {
            total_entries: entries.len(),
            last_entry: entries.into_iter().next(),
            mood_today: trend_for_day(&conn, user, today)?,
            streak: streak::consecutive_days(&dates, today),
        })
    }

    /// Plain-text statistics over the corpus.
    ///
    /// # Errors
    ///
    /// [`AppError::NoData`] for an empty journal.
    pub fn entry_stats(&self, user: UserId) -> AppResult<EntryStats> {
        let conn = self.db.get_conn()?;
        let entries = entries_for(&conn, user)?;
        if entries.is_empty() {
            return Err(AppError::NoData);
        }

        let texts: Vec<&str> = entries.iter().map(|e| e.content.as_str()).collect();
        let common_words = stats::top_words(&texts, COMMON_WORD_LIMIT);
        Ok(EntryStats {
            total_entries: entries.len(),
            last_entry_at: entries.first().map(|e| e.created_at),
            common_words,
        })
    }

    fn flight_slot(&self, user: UserId) -> Arc<Mutex<()>> {
        let mut slots = self
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        slots.entry(user).or_default().clone()
    }
}

// Newest-first with blank-line separators; deterministic for identical
// corpus state.
fn combine_contents(entries: &[Entry]) -> String {
    let contents: Vec<&str> = entries.iter().map(|e| e.content.as_str()).collect();
    contents.join("\n\n")
}
