//! Top-staff ranking engine

use crate::category::Category;
use crate::store::StaffDocument;

/// Minimum review count for leaderboard inclusion
pub const DEFAULT_MIN_REVIEWS: usize = 3;

/// Leaderboard length cap
pub const DEFAULT_TOP_LIMIT: usize = 10;

/// One leaderboard row
#[derive(Debug, Clone, PartialEq)]
pub struct RankEntry {
    pub name: String,
    pub rating: f64,
    pub review_count: usize,
    pub category_label: &'static str,
}

/// Build the top-staff leaderboard.
///
/// Workshops are never ranked. Staff qualify with a non-zero rating and at
/// least `min_reviews` reviews. Sorted by rating descending; the sort is
/// stable, so ties keep category-then-document order.
pub fn top_staff(doc: &StaffDocument, min_reviews: usize, limit: usize) -> Vec<RankEntry> {
    let mut entries = Vec::new();

    for category in Category::ALL.into_iter().filter(|c| !c.is_workshop()) {
        let Some(table) = doc.staff_table(category) else {
            continue;
        };
        for staff in table.values() {
            if staff.rating > 0.0 && staff.reviews.len() >= min_reviews {
                entries.push(RankEntry {
                    name: staff.name.clone(),
                    rating: staff.rating,
                    review_count: staff.reviews.len(),
                    category_label: category.label(),
                });
            }
        }
    }

    entries.sort_by(|a, b| b.rating.total_cmp(&a.rating));
    entries.truncate(limit);
    entries
}
