//! Shared fixtures for dispatcher tests
//!
//! Provides a recording mock gateway and a seeded staff document so flows
//! can be driven end-to-end without a messaging platform.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tempfile::TempDir;

use foros_bot::dispatcher::Dispatcher;
use foros_bot::error::Result;
use foros_bot::events::{UserEvent, UserRef};
use foros_bot::gateway::{ChatId, Keyboard, MessageId, MessagingGateway};
use foros_common::config::BotConfig;
use foros_common::store::StaffStore;

pub const CHAT: ChatId = 700;

/// One recorded outbound gateway call
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayCall {
    Send {
        chat: ChatId,
        text: String,
        keyboard: Keyboard,
    },
    Edit {
        chat: ChatId,
        message: MessageId,
        text: String,
        keyboard: Keyboard,
    },
    Delete {
        chat: ChatId,
        message: MessageId,
    },
    Photo {
        chat: ChatId,
        path: PathBuf,
        caption: String,
        keyboard: Keyboard,
    },
    Answer {
        callback_id: String,
        alert: Option<String>,
    },
}

/// Gateway that records every call instead of talking to a platform
#[derive(Debug, Default)]
pub struct MockGateway {
    calls: Mutex<Vec<GatewayCall>>,
    next_message_id: AtomicI64,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// All calls recorded so far, in order
    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: GatewayCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl MessagingGateway for MockGateway {
    async fn send_message(&self, chat: ChatId, text: &str, keyboard: Keyboard) -> Result<MessageId> {
        self.record(GatewayCall::Send {
            chat,
            text: text.to_string(),
            keyboard,
        });
        Ok(101 + self.next_message_id.fetch_add(1, Ordering::SeqCst))
    }

    async fn edit_message(
        &self,
        chat: ChatId,
        message: MessageId,
        text: &str,
        keyboard: Keyboard,
    ) -> Result<()> {
        self.record(GatewayCall::Edit {
            chat,
            message,
            text: text.to_string(),
            keyboard,
        });
        Ok(())
    }

    async fn delete_message(&self, chat: ChatId, message: MessageId) -> Result<()> {
        self.record(GatewayCall::Delete { chat, message });
        Ok(())
    }

    async fn send_photo(
        &self,
        chat: ChatId,
        photo: &Path,
        caption: &str,
        keyboard: Keyboard,
    ) -> Result<MessageId> {
        self.record(GatewayCall::Photo {
            chat,
            path: photo.to_path_buf(),
            caption: caption.to_string(),
            keyboard,
        });
        Ok(101 + self.next_message_id.fetch_add(1, Ordering::SeqCst))
    }

    async fn answer_callback(&self, callback_id: &str, alert: Option<&str>) -> Result<()> {
        self.record(GatewayCall::Answer {
            callback_id: callback_id.to_string(),
            alert: alert.map(str::to_string),
        });
        Ok(())
    }
}

/// Seed document: two waiters (Анна with a photo, Борис without) and one
/// bartender, workshops empty
fn write_seed_document(path: &Path) {
    let raw = r#"{
        "waiters": {
            "anna": {"name": "Анна", "phone": "+7 900 111-22-33", "rating": 0, "reviews": [], "photo": "anna.jpg"},
            "boris": {"name": "Борис", "phone": "+7 900 444-55-66", "rating": 0, "reviews": []}
        },
        "bartenders": {
            "gleb": {"name": "Глеб", "phone": "+7 900 777-88-99", "rating": 0, "reviews": []}
        },
        "cold_kitchen": {"rating": 0, "reviews": []},
        "hot_kitchen": {"rating": 0, "reviews": []},
        "pastry_kitchen": {"rating": 0, "reviews": []}
    }"#;
    std::fs::write(path, raw).unwrap();
}

/// Dispatcher over a mock gateway and the seeded document in `dir`
pub fn dispatcher(dir: &TempDir) -> Dispatcher<MockGateway> {
    let data_file = dir.path().join("staff_data.json");
    write_seed_document(&data_file);

    let photos_dir = dir.path().join("photos");
    std::fs::create_dir_all(&photos_dir).unwrap();
    std::fs::write(photos_dir.join("anna.jpg"), b"jpeg").unwrap();

    let config = BotConfig {
        data_file: data_file.clone(),
        photos_dir,
        min_reviews: 3,
        top_limit: 10,
    };
    let store = StaffStore::load(data_file).unwrap();

    Dispatcher::new(MockGateway::new(), store, config)
}

pub fn guest(id: i64, name: &str) -> UserRef {
    UserRef {
        id,
        display_name: name.to_string(),
    }
}

/// Button press on a text-only message
pub fn press(user: &UserRef, message_id: MessageId, token: &str) -> UserEvent {
    UserEvent::ButtonPress {
        user: user.clone(),
        chat_id: CHAT,
        message_id,
        callback_id: format!("cb-{token}"),
        token: token.to_string(),
        has_photo: false,
    }
}

/// Button press on a message that displays a photo
pub fn press_on_photo(user: &UserRef, message_id: MessageId, token: &str) -> UserEvent {
    UserEvent::ButtonPress {
        user: user.clone(),
        chat_id: CHAT,
        message_id,
        callback_id: format!("cb-{token}"),
        token: token.to_string(),
        has_photo: true,
    }
}

pub fn message(user: &UserRef, body: &str) -> UserEvent {
    UserEvent::Text {
        user: user.clone(),
        chat_id: CHAT,
        text: Some(body.to_string()),
    }
}

/// Non-text payload (sticker, photo, voice message)
pub fn non_text(user: &UserRef) -> UserEvent {
    UserEvent::Text {
        user: user.clone(),
        chat_id: CHAT,
        text: None,
    }
}
