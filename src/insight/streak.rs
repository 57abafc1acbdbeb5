//! Engagement streak calculation.

use std::collections::HashSet;

use chrono::NaiveDate;

/// Number of consecutive days ending at `today` on which the user wrote.
///
/// Walks backwards from `today` while the set contains the current day and
/// stops at the first gap. When `today` itself is absent the streak is 0,
/// no matter how long past runs were. Runs in O(streak) with no
/// allocation.
pub fn consecutive_days(dates: &HashSet<NaiveDate>, today: NaiveDate) -> u32 {
    let mut streak = 0;
    let mut cursor = today;
    while dates.contains(&cursor) {
        streak += 1;
        match cursor.pred_opt() {
            Some(previous) => cursor = previous,
            // Ran off the start of the calendar.
            None => break,
        }
    }
    streak
}
