//! Review eligibility guard
//!
//! One reviewer may rate a given target at most once per 24 hours. The check
//! is a linear scan over the target's reviews; review volumes are small
//! enough that no index is kept.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};

use crate::store::Review;

/// Cooldown between two reviews of the same target by the same reviewer
pub const COOLDOWN_HOURS: i64 = 24;

/// Whether `user_id` may submit a new review for a target with the given
/// review history at time `now`
pub fn can_review(reviews: &[Review], user_id: i64, now: DateTime<Utc>) -> bool {
    can_review_within(reviews, user_id, now, Duration::hours(COOLDOWN_HOURS))
}

/// `can_review` with an explicit cooldown window
pub fn can_review_within(
    reviews: &[Review],
    user_id: i64,
    now: DateTime<Utc>,
    cooldown: Duration,
) -> bool {
    for review in reviews.iter().filter(|r| r.user_id == user_id) {
        // Timestamps that fail to parse (hand-edited documents) count as old
        let Some(submitted) = parse_timestamp(&review.date) else {
            continue;
        };
        if now.signed_duration_since(submitted) < cooldown {
            return false;
        }
    }
    true
}

/// Parse a stored review timestamp.
///
/// New reviews are written as RFC 3339; documents seeded by earlier tooling
/// may carry naive ISO-8601 local timestamps, which are read as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}
