//! Callback-token intents
//!
//! Button presses carry an opaque string token. Tokens are parsed once at
//! the boundary into this tagged enum; handlers dispatch over the variant,
//! never over string prefixes. Every intent round-trips back to its wire
//! token when keyboards are built.

use foros_common::store::TargetRef;
use foros_common::Category;

/// A parsed navigation or dialogue action
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Back to the main menu
    MainMenu,

    /// Open the category picker
    SelectCategory,

    /// Open the kitchen workshop picker
    SelectKitchen,

    /// Show a category: staff list, or the workshop card for kitchens
    ShowCategory(Category),

    /// Show one staff member's card
    ShowStaff(Category, String),

    /// Show the recent reviews of a target
    ShowReviews(TargetRef),

    /// Begin the review dialogue for a target
    StartReview(TargetRef),

    /// Star selection inside the review dialogue
    Rate(u8),

    /// Show the top-staff leaderboard
    TopStaff,
}

impl Intent {
    /// Parse a callback token; `None` for unrecognized tokens
    pub fn parse(token: &str) -> Option<Intent> {
        match token {
            "main_menu" => return Some(Intent::MainMenu),
            "select_category" => return Some(Intent::SelectCategory),
            "select_kitchen" => return Some(Intent::SelectKitchen),
            "top_staff" => return Some(Intent::TopStaff),
            _ => {}
        }

        if let Some(key) = token.strip_prefix("category_") {
            return Category::from_key(key).map(Intent::ShowCategory);
        }
        if let Some(rest) = token.strip_prefix("staff_") {
            return split_staff(rest).map(|(category, id)| Intent::ShowStaff(category, id.to_string()));
        }
        if let Some(key) = token.strip_prefix("reviews_workshop_") {
            return Category::from_key(key)
                .filter(Category::is_workshop)
                .map(|c| Intent::ShowReviews(TargetRef::workshop(c)));
        }
        if let Some(rest) = token.strip_prefix("reviews_") {
            return split_staff(rest)
                .map(|(category, id)| Intent::ShowReviews(TargetRef::staff(category, id)));
        }
        if let Some(key) = token.strip_prefix("review_workshop_") {
            return Category::from_key(key)
                .filter(Category::is_workshop)
                .map(|c| Intent::StartReview(TargetRef::workshop(c)));
        }
        if let Some(rest) = token.strip_prefix("review_") {
            return split_staff(rest)
                .map(|(category, id)| Intent::StartReview(TargetRef::staff(category, id)));
        }
        if let Some(digits) = token.strip_prefix("rate_") {
            return digits
                .parse::<u8>()
                .ok()
                .filter(|n| (1..=5).contains(n))
                .map(Intent::Rate);
        }

        None
    }

    /// Wire token for this intent
    pub fn token(&self) -> String {
        match self {
            Intent::MainMenu => "main_menu".to_string(),
            Intent::SelectCategory => "select_category".to_string(),
            Intent::SelectKitchen => "select_kitchen".to_string(),
            Intent::TopStaff => "top_staff".to_string(),
            Intent::ShowCategory(category) => format!("category_{}", category.key()),
            Intent::ShowStaff(category, id) => format!("staff_{}_{}", category.key(), id),
            Intent::ShowReviews(target) => target_token("reviews", target),
            Intent::StartReview(target) => target_token("review", target),
            Intent::Rate(n) => format!("rate_{n}"),
        }
    }
}

fn target_token(action: &str, target: &TargetRef) -> String {
    match &target.staff_id {
        None => format!("{action}_workshop_{}", target.category.key()),
        Some(id) => format!("{action}_{}_{}", target.category.key(), id),
    }
}

/// Split `<category-key>_<staff-id>` on the category boundary.
///
/// Staff ids may themselves contain underscores, so the category part is
/// matched against the known keys instead of splitting on a separator.
fn split_staff(rest: &str) -> Option<(Category, &str)> {
    for category in Category::ALL.into_iter().filter(|c| !c.is_workshop()) {
        if let Some(id) = rest.strip_prefix(category.key()).and_then(|r| r.strip_prefix('_')) {
            if !id.is_empty() {
                return Some((category, id));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_tokens_parse() {
        assert_eq!(Intent::parse("main_menu"), Some(Intent::MainMenu));
        assert_eq!(Intent::parse("select_category"), Some(Intent::SelectCategory));
        assert_eq!(Intent::parse("select_kitchen"), Some(Intent::SelectKitchen));
        assert_eq!(Intent::parse("top_staff"), Some(Intent::TopStaff));
    }

    #[test]
    fn category_tokens_parse() {
        assert_eq!(
            Intent::parse("category_waiters"),
            Some(Intent::ShowCategory(Category::Waiters))
        );
        assert_eq!(
            Intent::parse("category_cold_kitchen"),
            Some(Intent::ShowCategory(Category::ColdKitchen))
        );
        assert_eq!(Intent::parse("category_managers"), None);
    }

    #[test]
    fn staff_ids_may_contain_underscores() {
        assert_eq!(
            Intent::parse("staff_waiters_anna_v"),
            Some(Intent::ShowStaff(Category::Waiters, "anna_v".to_string()))
        );
        assert_eq!(
            Intent::parse("review_bartenders_gleb"),
            Some(Intent::StartReview(TargetRef::staff(Category::Bartenders, "gleb")))
        );
    }

    #[test]
    fn workshop_tokens_win_over_staff_tokens() {
        assert_eq!(
            Intent::parse("reviews_workshop_hot_kitchen"),
            Some(Intent::ShowReviews(TargetRef::workshop(Category::HotKitchen)))
        );
        assert_eq!(
            Intent::parse("review_workshop_pastry_kitchen"),
            Some(Intent::StartReview(TargetRef::workshop(Category::PastryKitchen)))
        );
    }

    #[test]
    fn rate_tokens_are_bounded() {
        assert_eq!(Intent::parse("rate_1"), Some(Intent::Rate(1)));
        assert_eq!(Intent::parse("rate_5"), Some(Intent::Rate(5)));
        assert_eq!(Intent::parse("rate_0"), None);
        assert_eq!(Intent::parse("rate_6"), None);
        assert_eq!(Intent::parse("rate_x"), None);
    }

    #[test]
    fn unknown_tokens_parse_to_none() {
        assert_eq!(Intent::parse(""), None);
        assert_eq!(Intent::parse("staff_waiters"), None);
        assert_eq!(Intent::parse("reviews_workshop_waiters"), None);
        assert_eq!(Intent::parse("tip_anna"), None);
    }

    #[test]
    fn tokens_round_trip() {
        let intents = [
            Intent::MainMenu,
            Intent::SelectCategory,
            Intent::SelectKitchen,
            Intent::TopStaff,
            Intent::ShowCategory(Category::HotKitchen),
            Intent::ShowStaff(Category::Waiters, "anna_v".to_string()),
            Intent::ShowReviews(TargetRef::staff(Category::Bartenders, "gleb")),
            Intent::ShowReviews(TargetRef::workshop(Category::ColdKitchen)),
            Intent::StartReview(TargetRef::staff(Category::Waiters, "anna")),
            Intent::StartReview(TargetRef::workshop(Category::PastryKitchen)),
            Intent::Rate(4),
        ];

        for intent in intents {
            assert_eq!(Intent::parse(&intent.token()), Some(intent));
        }
    }
}
