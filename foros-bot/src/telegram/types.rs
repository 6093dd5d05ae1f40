//! Telegram Bot API wire types
//!
//! Inbound types keep only the fields the bot reads; unknown fields are
//! ignored by serde. Outbound payloads skip optional fields entirely.

use serde::{Deserialize, Serialize};

use crate::gateway::Keyboard;

/// One item of the `getUpdates` result
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,

    #[serde(default)]
    pub message: Option<Message>,

    #[serde(default)]
    pub callback_query: Option<CallbackQuery>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,

    #[serde(default)]
    pub from: Option<User>,

    pub chat: Chat,

    #[serde(default)]
    pub text: Option<String>,

    /// Present when the message displays a photo
    #[serde(default)]
    pub photo: Option<Vec<PhotoSize>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
    pub first_name: String,

    #[serde(default)]
    pub last_name: Option<String>,
}

impl User {
    /// First and last name joined, the platform's display-name convention
    pub fn full_name(&self) -> String {
        match &self.last_name {
            Some(last) => format!("{} {}", self.first_name, last),
            None => self.first_name.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PhotoSize {
    pub file_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    pub from: User,

    /// Message hosting the pressed keyboard
    #[serde(default)]
    pub message: Option<Message>,

    /// Opaque callback token set when the keyboard was built
    #[serde(default)]
    pub data: Option<String>,
}

/// Response envelope of every Bot API method
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,

    #[serde(default = "Option::default")]
    pub result: Option<T>,

    #[serde(default)]
    pub description: Option<String>,
}

/// Outbound keyboard markup
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ReplyMarkup {
    Inline(InlineKeyboardMarkup),
    Reply(ReplyKeyboardMarkup),
}

#[derive(Debug, Clone, Serialize)]
pub struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InlineKeyboardButton {
    pub text: String,
    pub callback_data: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReplyKeyboardMarkup {
    pub keyboard: Vec<Vec<KeyboardButton>>,
    pub resize_keyboard: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct KeyboardButton {
    pub text: String,
}

impl ReplyMarkup {
    /// Convert a gateway keyboard into wire markup; `None` for no keyboard
    pub fn from_keyboard(keyboard: Keyboard) -> Option<ReplyMarkup> {
        match keyboard {
            Keyboard::None => None,
            Keyboard::Inline(rows) => Some(ReplyMarkup::Inline(InlineKeyboardMarkup {
                inline_keyboard: rows
                    .into_iter()
                    .map(|row| {
                        row.into_iter()
                            .map(|button| InlineKeyboardButton {
                                text: button.text,
                                callback_data: button.token,
                            })
                            .collect()
                    })
                    .collect(),
            })),
            Keyboard::Reply(rows) => Some(ReplyMarkup::Reply(ReplyKeyboardMarkup {
                keyboard: rows
                    .into_iter()
                    .map(|row| row.into_iter().map(|text| KeyboardButton { text }).collect())
                    .collect(),
                resize_keyboard: true,
            })),
        }
    }
}

/// `sendMessage` payload
#[derive(Debug, Serialize)]
pub struct SendMessage<'a> {
    pub chat_id: i64,
    pub text: &'a str,
    pub parse_mode: &'a str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<ReplyMarkup>,
}

/// `editMessageText` payload
#[derive(Debug, Serialize)]
pub struct EditMessageText<'a> {
    pub chat_id: i64,
    pub message_id: i64,
    pub text: &'a str,
    pub parse_mode: &'a str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<ReplyMarkup>,
}

/// `deleteMessage` payload
#[derive(Debug, Serialize)]
pub struct DeleteMessage {
    pub chat_id: i64,
    pub message_id: i64,
}

/// `answerCallbackQuery` payload
#[derive(Debug, Serialize)]
pub struct AnswerCallbackQuery<'a> {
    pub callback_query_id: &'a str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<&'a str>,

    pub show_alert: bool,
}

/// `getUpdates` payload
#[derive(Debug, Serialize)]
pub struct GetUpdates {
    pub offset: i64,
    pub timeout: u64,
}

/// `deleteWebhook` payload
#[derive(Debug, Serialize)]
pub struct DeleteWebhook {
    pub drop_pending_updates: bool,
}
