//! In-process cache for computed mood summaries.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use tracing::debug;

use crate::ai::AnalysisResult;
use crate::db::users::UserId;

struct CachedSummary {
    result: AnalysisResult,
    expires_at: Instant,
}

/// Per-user cache of analysis results with a fixed time-to-live.
///
/// Purely an optimization: slots are evicted lazily on read, and a poisoned
/// lock degrades to a miss rather than an error. Losing the cache only ever
/// costs a recomputation.
#[derive(Default)]
pub struct SummaryCache {
    slots: Mutex<HashMap<UserId, CachedSummary>>,
}

impl SummaryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached result for `user` if it has not expired.
    /// An expired slot is removed on the way out.
    pub fn get(&self, user: UserId) -> Option<AnalysisResult> {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        match slots.get(&user) {
            Some(slot) if slot.expires_at > Instant::now() => Some(slot.result.clone()),
            Some(_) => {
                slots.remove(&user);
                debug!(user = user.0, "evicted expired summary");
                None
            }
            None => None,
        }
    }

    /// Stores `result` for `user`, valid for `ttl` from now. An existing
    /// slot is replaced and its clock restarts.
    pub fn put(&self, user: UserId, result: AnalysisResult, ttl: Duration) {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.insert(
            user,
            CachedSummary {
                result,
                expires_at: Instant::now() + ttl,
            },
        );
    }
}
