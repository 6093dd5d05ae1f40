//! Inbound user events
//!
//! The transport layer reduces platform updates to the two event kinds the
//! dispatcher routes on: an inline-button press carrying an opaque token,
//! and a plain message.

use crate::gateway::{ChatId, MessageId};

/// Identity of the user an event originated from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRef {
    /// Platform user id
    pub id: i64,

    /// Display name used when signing reviews
    pub display_name: String,
}

/// An inbound user action
#[derive(Debug, Clone)]
pub enum UserEvent {
    /// Inline-button press
    ButtonPress {
        user: UserRef,
        chat_id: ChatId,
        /// Message hosting the pressed keyboard
        message_id: MessageId,
        /// Callback id to acknowledge the press with
        callback_id: String,
        /// Opaque callback token, parsed into an `Intent` at dispatch
        token: String,
        /// Whether the hosting message displays a photo; a photo message
        /// cannot be edited into a text message in place, so this drives
        /// the edit-vs-resend choice
        has_photo: bool,
    },

    /// Plain message; `text` is `None` for non-text payloads such as
    /// stickers or photos
    Text {
        user: UserRef,
        chat_id: ChatId,
        text: Option<String>,
    },
}

impl UserEvent {
    /// The user the event originated from
    pub fn user(&self) -> &UserRef {
        match self {
            UserEvent::ButtonPress { user, .. } => user,
            UserEvent::Text { user, .. } => user,
        }
    }
}
