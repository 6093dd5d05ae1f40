//! Screen texts and keyboards
//!
//! Every user-facing string and keyboard layout lives here; handlers only
//! pick which screen to show. Texts use the platform's HTML parse mode.

use foros_common::ranking::RankEntry;
use foros_common::store::{Review, StaffRecord, StaffTable, TargetRef, WorkshopRecord};
use foros_common::Category;

use crate::gateway::{Button, Keyboard};
use crate::intent::Intent;

/// Label of the persistent reply-keyboard button
pub const START_BUTTON: &str = "🚀 START";

/// How many recent reviews a reviews screen shows
pub const RECENT_REVIEWS: usize = 5;

pub const WELCOME: &str = "🍇 Добро пожаловать в бот ресторана «Форос»! 🍷 \n\nСпасибо, что заглянули!\nЗдесь вы можете сделать две простые, но очень важные для нас вещи:\n\n1️⃣ Оставить отзыв о вашем посещении — поделитесь впечатлениями о кухне, обслуживании и атмосфере. Это поможет другим гостям и нам самим становиться лучше.\n\n2️⃣ Поддержать нашу команду чаевыми, если у вас остались тёплые эмоции после визита!";

pub const MAIN_MENU: &str = "📋 Главное меню\n\nЗдесь вы можете поделиться своим мнением о визите в ресторан «Форос». Выберите действие:\n\n⭐ Топ сотрудников\n\nПосмотрите рейтинг наших коллег, отмеченных в отзывах гостей. Узнайте, кто создаёт самые тёплые впечатления!\n\n📝 Оставить отзыв или поддержать нашу команду\nВыберите категорию, чтобы ваша благодарность или совет попали точно адресату:";

pub const MAIN_MENU_SHORT: &str = "📋 Главное меню\n\nВыберите действие:";

pub const SELECT_CATEGORY: &str =
    "Выберите категорию чтобы оставить отзыв 🗨️ или оставить на чай ☕:";

pub const SELECT_KITCHEN: &str = "Выберите цех кухни:";

pub const SELECT_STAFF: &str = "Выберите сотрудника:";

pub const NO_REVIEWS: &str = "Пока нет отзывов.";

pub const NO_TOP_STAFF: &str = "Пока нет сотрудников с достаточным количеством отзывов 😔";

pub const RATE_WORKSHOP: &str = "Оцените цех:";

pub const RATE_STAFF: &str = "Выберите оценку:";

pub const WRITE_REVIEW: &str = "Напишите отзыв:";

pub const REVIEW_SAVED: &str =
    "✅ Отзыв сохранён!\n\nНажмите 🚀 START, чтобы оставить отзыв или оставить на чай!";

pub const COOLDOWN_WORKSHOP: &str = "❌ Вы уже оставляли отзыв этому цеху сегодня";

pub const COOLDOWN_STAFF: &str = "❌ Вы уже оставляли отзыв этому сотруднику сегодня";

pub const PRESS_START: &str = "Нажмите 🚀 START для начала работы";

/// Persistent reply keyboard with the single START button
pub fn start_keyboard() -> Keyboard {
    Keyboard::Reply(vec![vec![START_BUTTON.to_string()]])
}

/// Main menu: category picker and leaderboard
pub fn main_menu_keyboard() -> Keyboard {
    Keyboard::Inline(vec![
        vec![Button::new("👥 Выбрать категорию", Intent::SelectCategory.token())],
        vec![Button::new("🏆 Топ сотрудников", Intent::TopStaff.token())],
    ])
}

/// Category picker: waiters, kitchen submenu, bar, back
pub fn category_keyboard() -> Keyboard {
    Keyboard::Inline(vec![
        vec![Button::new(
            Category::Waiters.label(),
            Intent::ShowCategory(Category::Waiters).token(),
        )],
        vec![Button::new("👨‍🍳 Кухня", Intent::SelectKitchen.token())],
        vec![Button::new(
            Category::Bartenders.label(),
            Intent::ShowCategory(Category::Bartenders).token(),
        )],
        vec![Button::new("↩️ Назад", Intent::MainMenu.token())],
    ])
}

/// Kitchen workshop picker
pub fn kitchen_keyboard() -> Keyboard {
    let mut rows: Vec<Vec<Button>> = Category::KITCHEN
        .into_iter()
        .map(|c| vec![Button::new(c.label(), Intent::ShowCategory(c).token())])
        .collect();
    rows.push(vec![Button::new("↩️ Назад", Intent::SelectCategory.token())]);
    Keyboard::Inline(rows)
}

/// Staff list of a category, one button per person
pub fn staff_list_keyboard(category: Category, table: &StaffTable) -> Keyboard {
    let mut rows: Vec<Vec<Button>> = table
        .iter()
        .map(|(id, staff)| {
            vec![Button::new(
                staff.name.clone(),
                Intent::ShowStaff(category, id.clone()).token(),
            )]
        })
        .collect();
    rows.push(vec![Button::new("↩️ Назад", Intent::SelectCategory.token())]);
    Keyboard::Inline(rows)
}

/// Actions on one staff member's card
pub fn staff_actions_keyboard(category: Category, staff_id: &str) -> Keyboard {
    let target = TargetRef::staff(category, staff_id);
    Keyboard::Inline(vec![
        vec![Button::new("⭐ Отзывы", Intent::ShowReviews(target.clone()).token())],
        vec![Button::new("📝 Оставить отзыв", Intent::StartReview(target).token())],
        vec![Button::new("↩️ Назад", Intent::ShowCategory(category).token())],
    ])
}

/// Actions on a workshop card
pub fn workshop_keyboard(category: Category) -> Keyboard {
    let target = TargetRef::workshop(category);
    Keyboard::Inline(vec![
        vec![Button::new("⭐ Отзывы", Intent::ShowReviews(target.clone()).token())],
        vec![Button::new("📝 Оставить отзыв", Intent::StartReview(target).token())],
        vec![Button::new("↩️ Назад", Intent::SelectKitchen.token())],
    ])
}

/// 1-5 star picker, one row
pub fn rating_keyboard() -> Keyboard {
    Keyboard::Inline(vec![(1..=5)
        .map(|n| Button::new(format!("{n} ⭐"), Intent::Rate(n).token()))
        .collect()])
}

/// Single back button
pub fn back_keyboard(back: Intent) -> Keyboard {
    Keyboard::Inline(vec![vec![Button::new("↩️ Назад", back.token())]])
}

/// Computed ratings carry one decimal (5.0, 4.2); a bare 0 marks a record
/// nothing has rated yet
fn fmt_rating(rating: f64) -> String {
    if rating == 0.0 {
        "0".to_string()
    } else {
        format!("{rating:.1}")
    }
}

/// Staff member card: name, tip reference, rating
pub fn staff_card(staff: &StaffRecord) -> String {
    format!(
        "<b>{}</b>\n💳 Чаевые официанту: {}\n⭐ Рейтинг: {}/5",
        staff.name,
        staff.phone,
        fmt_rating(staff.rating)
    )
}

/// Workshop card: label, aggregate rating, review count
pub fn workshop_card(category: Category, workshop: &WorkshopRecord) -> String {
    format!(
        "<b>{}</b>\n⭐ Рейтинг: {}/5\n📝 Отзывов: {}",
        category.label(),
        fmt_rating(workshop.rating),
        workshop.reviews.len()
    )
}

/// Recent reviews of a target; the tail of the insertion-ordered sequence
pub fn reviews_list(reviews: &[Review], workshop: bool) -> String {
    if reviews.is_empty() {
        return NO_REVIEWS.to_string();
    }

    let mut text = if workshop {
        "<b>Отзывы о цехе:</b>\n\n".to_string()
    } else {
        "<b>Отзывы:</b>\n\n".to_string()
    };
    let tail = reviews.len().saturating_sub(RECENT_REVIEWS);
    for review in &reviews[tail..] {
        text.push_str(&format!(
            "⭐ {} — {}\n{}\n\n",
            review.rating, review.user, review.text
        ));
    }
    text
}

/// Top-staff leaderboard text
pub fn top_staff_list(entries: &[RankEntry]) -> String {
    if entries.is_empty() {
        return NO_TOP_STAFF.to_string();
    }

    let mut text = "<b>🏆 ТОП сотрудников</b>\n\n".to_string();
    for (i, entry) in entries.iter().enumerate() {
        text.push_str(&format!(
            "{}. <b>{}</b>\n   {}\n   ⭐ {} | 📝 {} отзывов\n\n",
            i + 1,
            entry.name,
            entry.category_label,
            fmt_rating(entry.rating),
            entry.review_count
        ));
    }
    text
}

/// Star prompt for the target kind
pub fn rate_prompt(target: &TargetRef) -> &'static str {
    if target.is_workshop() {
        RATE_WORKSHOP
    } else {
        RATE_STAFF
    }
}

/// Cooldown alert for the target kind
pub fn cooldown_alert(target: &TargetRef) -> &'static str {
    if target.is_workshop() {
        COOLDOWN_WORKSHOP
    } else {
        COOLDOWN_STAFF
    }
}
