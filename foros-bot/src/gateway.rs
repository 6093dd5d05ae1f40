//! Messaging gateway abstraction
//!
//! Capability surface the dispatcher renders screens through. The concrete
//! transport (Telegram in production, a recording mock in tests) is behind
//! this trait; the dispatcher never assumes which one it talks to.

use std::path::Path;

use async_trait::async_trait;

use crate::error::Result;

/// Platform chat id
pub type ChatId = i64;

/// Platform message id
pub type MessageId = i64;

/// One inline button: label plus the callback token it fires
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub text: String,
    pub token: String,
}

impl Button {
    pub fn new(text: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            token: token.into(),
        }
    }
}

/// Keyboard attached to an outgoing message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Keyboard {
    /// Inline buttons in rows under the message
    Inline(Vec<Vec<Button>>),

    /// Persistent reply keyboard with plain-text buttons
    Reply(Vec<Vec<String>>),

    /// No keyboard
    None,
}

/// Outbound capability set of the messaging platform
#[async_trait]
pub trait MessagingGateway: Send + Sync {
    /// Send a text message; returns the new message id
    async fn send_message(&self, chat: ChatId, text: &str, keyboard: Keyboard) -> Result<MessageId>;

    /// Edit a text message and its keyboard in place
    async fn edit_message(
        &self,
        chat: ChatId,
        message: MessageId,
        text: &str,
        keyboard: Keyboard,
    ) -> Result<()>;

    /// Delete a message
    async fn delete_message(&self, chat: ChatId, message: MessageId) -> Result<()>;

    /// Send a photo with caption; returns the new message id
    async fn send_photo(
        &self,
        chat: ChatId,
        photo: &Path,
        caption: &str,
        keyboard: Keyboard,
    ) -> Result<MessageId>;

    /// Acknowledge a button press; with `alert` set, shows a blocking
    /// alert to the user instead of a silent ack
    async fn answer_callback(&self, callback_id: &str, alert: Option<&str>) -> Result<()>;
}
