//! Staff categories and kitchen workshops

/// Review target categories.
///
/// The three kitchen categories are workshops: they are rated in aggregate
/// and hold no individual staff entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Waiters,
    Bartenders,
    ColdKitchen,
    HotKitchen,
    PastryKitchen,
}

impl Category {
    /// All categories, in document and keyboard order
    pub const ALL: [Category; 5] = [
        Category::Waiters,
        Category::Bartenders,
        Category::ColdKitchen,
        Category::HotKitchen,
        Category::PastryKitchen,
    ];

    /// Kitchen workshop categories, in keyboard order
    pub const KITCHEN: [Category; 3] = [
        Category::ColdKitchen,
        Category::HotKitchen,
        Category::PastryKitchen,
    ];

    /// Stable key used in the persisted document and in callback tokens
    pub fn key(&self) -> &'static str {
        match self {
            Category::Waiters => "waiters",
            Category::Bartenders => "bartenders",
            Category::ColdKitchen => "cold_kitchen",
            Category::HotKitchen => "hot_kitchen",
            Category::PastryKitchen => "pastry_kitchen",
        }
    }

    /// User-facing label
    pub fn label(&self) -> &'static str {
        match self {
            Category::Waiters => "🤵 Официанты",
            Category::Bartenders => "🍸 Бар",
            Category::ColdKitchen => "🥗 Холодный цех",
            Category::HotKitchen => "🍲 Горячий цех",
            Category::PastryKitchen => "🍕 Мучной цех",
        }
    }

    /// Whether this category is a kitchen workshop (aggregate-only rating)
    pub fn is_workshop(&self) -> bool {
        matches!(
            self,
            Category::ColdKitchen | Category::HotKitchen | Category::PastryKitchen
        )
    }

    /// Parse a category from its stable key
    pub fn from_key(key: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.key() == key)
    }
}
