//! Persisted document models
//!
//! The document is a single JSON object keyed by category: kitchen workshops
//! map directly to an aggregate record, staff categories map to an ordered
//! `staff_id -> StaffRecord` table. Every field carries a serde default so
//! documents written by older builds stay loadable.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::category::Category;

/// A single guest review, immutable once appended
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    /// Platform user id of the reviewer
    pub user_id: i64,

    /// Reviewer display name at submission time
    pub user: String,

    /// Star rating, 1-5
    pub rating: u8,

    /// Free-text review body, captured verbatim
    pub text: String,

    /// ISO-8601 submission timestamp
    pub date: String,
}

impl Review {
    /// Build a review stamped with the given submission time
    pub fn new(user_id: i64, user: impl Into<String>, rating: u8, text: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            user: user.into(),
            rating,
            text: text.into(),
            date: now.to_rfc3339(),
        }
    }
}

/// An individual staff member (waiters/bartenders categories)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffRecord {
    /// Display name
    pub name: String,

    /// Tip payment reference (phone number or card alias)
    #[serde(default)]
    pub phone: String,

    /// Aggregate rating, mean of review ratings rounded to 1 decimal
    #[serde(default)]
    pub rating: f64,

    /// Reviews in insertion order
    #[serde(default)]
    pub reviews: Vec<Review>,

    /// Photo filename under the photos directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

/// A kitchen workshop rated in aggregate (no individual staff)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkshopRecord {
    #[serde(default)]
    pub rating: f64,

    #[serde(default)]
    pub reviews: Vec<Review>,
}

/// A review subject: a staff record or a workshop aggregate
pub trait Reviewable {
    fn rating(&self) -> f64;
    fn reviews(&self) -> &[Review];

    /// Append a review and recompute the aggregate rating
    fn apply_review(&mut self, review: Review);
}

/// Mean of all review ratings rounded to 1 decimal place, 0.0 when empty.
///
/// Halfway cases round to the even digit (4.25 -> 4.2), matching how the
/// ratings already persisted in guest documents were computed.
pub fn mean_rating(reviews: &[Review]) -> f64 {
    if reviews.is_empty() {
        return 0.0;
    }
    let sum: u32 = reviews.iter().map(|r| u32::from(r.rating)).sum();
    let mean = f64::from(sum) / reviews.len() as f64;
    (mean * 10.0).round_ties_even() / 10.0
}

impl Reviewable for StaffRecord {
    fn rating(&self) -> f64 {
        self.rating
    }

    fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    fn apply_review(&mut self, review: Review) {
        self.reviews.push(review);
        self.rating = mean_rating(&self.reviews);
    }
}

impl Reviewable for WorkshopRecord {
    fn rating(&self) -> f64 {
        self.rating
    }

    fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    fn apply_review(&mut self, review: Review) {
        self.reviews.push(review);
        self.rating = mean_rating(&self.reviews);
    }
}

/// Ordered staff table for one category
pub type StaffTable = IndexMap<String, StaffRecord>;

/// Top-level persisted document
///
/// Missing categories deserialize to their defaults, which is also the
/// back-fill behavior for documents written before a category existed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaffDocument {
    #[serde(default)]
    pub waiters: StaffTable,

    #[serde(default)]
    pub bartenders: StaffTable,

    #[serde(default)]
    pub cold_kitchen: WorkshopRecord,

    #[serde(default)]
    pub hot_kitchen: WorkshopRecord,

    #[serde(default)]
    pub pastry_kitchen: WorkshopRecord,
}

impl StaffDocument {
    /// Staff table for a non-workshop category
    pub fn staff_table(&self, category: Category) -> Option<&StaffTable> {
        match category {
            Category::Waiters => Some(&self.waiters),
            Category::Bartenders => Some(&self.bartenders),
            _ => None,
        }
    }

    /// Mutable staff table for a non-workshop category
    pub fn staff_table_mut(&mut self, category: Category) -> Option<&mut StaffTable> {
        match category {
            Category::Waiters => Some(&mut self.waiters),
            Category::Bartenders => Some(&mut self.bartenders),
            _ => None,
        }
    }

    /// Workshop record for a kitchen category
    pub fn workshop(&self, category: Category) -> Option<&WorkshopRecord> {
        match category {
            Category::ColdKitchen => Some(&self.cold_kitchen),
            Category::HotKitchen => Some(&self.hot_kitchen),
            Category::PastryKitchen => Some(&self.pastry_kitchen),
            _ => None,
        }
    }

    /// Mutable workshop record for a kitchen category
    pub fn workshop_mut(&mut self, category: Category) -> Option<&mut WorkshopRecord> {
        match category {
            Category::ColdKitchen => Some(&mut self.cold_kitchen),
            Category::HotKitchen => Some(&mut self.hot_kitchen),
            Category::PastryKitchen => Some(&mut self.pastry_kitchen),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn review(rating: u8) -> Review {
        Review::new(1, "Guest", rating, "ok", Utc::now())
    }

    #[test]
    fn mean_rating_rounds_to_one_decimal() {
        let reviews = vec![review(5), review(4), review(5)];
        assert_eq!(mean_rating(&reviews), 4.7);

        let reviews = vec![review(4), review(4), review(5)];
        assert_eq!(mean_rating(&reviews), 4.3);
    }

    #[test]
    fn mean_rating_rounds_halves_to_even() {
        // 17/4 = 4.25 -> 4.2, 9/4 = 2.25 -> 2.2
        let reviews = vec![review(5), review(4), review(5), review(3)];
        assert_eq!(mean_rating(&reviews), 4.2);

        let reviews = vec![review(1), review(2), review(3), review(3)];
        assert_eq!(mean_rating(&reviews), 2.2);
    }

    #[test]
    fn mean_rating_empty_is_zero() {
        assert_eq!(mean_rating(&[]), 0.0);
    }

    #[test]
    fn apply_review_recomputes_rating() {
        let mut workshop = WorkshopRecord::default();
        assert_eq!(workshop.rating, 0.0);

        workshop.apply_review(review(5));
        workshop.apply_review(review(4));
        assert_eq!(workshop.rating, 4.5);
        assert_eq!(workshop.reviews.len(), 2);
    }

    #[test]
    fn staff_record_tolerates_missing_fields() {
        // Older documents may miss phone/rating/reviews/photo entirely
        let staff: StaffRecord = serde_json::from_str(r#"{"name": "Анна"}"#).unwrap();
        assert_eq!(staff.name, "Анна");
        assert_eq!(staff.rating, 0.0);
        assert!(staff.reviews.is_empty());
        assert!(staff.photo.is_none());
    }
}
