//! Long-polling update source

use tracing::{debug, trace};

use crate::error::Result;
use crate::events::{UserEvent, UserRef};
use crate::telegram::client::ApiClient;
use crate::telegram::types::Update;

/// Long-poll wait, seconds
const POLL_TIMEOUT_SECS: u64 = 30;

/// Pulls updates from the Bot API and converts them to dispatcher events
pub struct UpdatePoller {
    api: ApiClient,
    offset: i64,
}

impl UpdatePoller {
    pub fn new(api: ApiClient) -> Self {
        Self { api, offset: 0 }
    }

    /// Switch to polling mode and discard updates accumulated while the
    /// bot was down
    pub async fn drop_pending(&self) -> Result<()> {
        self.api.delete_webhook(true).await?;
        debug!("Webhook cleared, pending updates dropped");
        Ok(())
    }

    /// Wait for the next batch of updates and convert them to user events
    pub async fn next_batch(&mut self) -> Result<Vec<UserEvent>> {
        let updates = self.api.get_updates(self.offset, POLL_TIMEOUT_SECS).await?;
        trace!(count = updates.len(), "Received update batch");

        let mut events = Vec::with_capacity(updates.len());
        for update in updates {
            self.offset = self.offset.max(update.update_id + 1);
            if let Some(event) = event_from_update(update) {
                events.push(event);
            }
        }
        Ok(events)
    }
}

/// Reduce a platform update to a dispatcher event, if it carries one
pub fn event_from_update(update: Update) -> Option<UserEvent> {
    if let Some(callback) = update.callback_query {
        let message = callback.message?;
        let token = callback.data?;
        return Some(UserEvent::ButtonPress {
            user: UserRef {
                id: callback.from.id,
                display_name: callback.from.full_name(),
            },
            chat_id: message.chat.id,
            message_id: message.message_id,
            callback_id: callback.id,
            token,
            has_photo: message.photo.as_ref().is_some_and(|sizes| !sizes.is_empty()),
        });
    }

    if let Some(message) = update.message {
        let from = message.from?;
        return Some(UserEvent::Text {
            user: UserRef {
                id: from.id,
                display_name: from.full_name(),
            },
            chat_id: message.chat.id,
            text: message.text,
        });
    }

    None
}
