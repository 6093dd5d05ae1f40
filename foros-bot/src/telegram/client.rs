//! Bot API client and gateway implementation

use std::path::Path;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::gateway::{ChatId, Keyboard, MessageId, MessagingGateway};
use crate::telegram::types::{
    AnswerCallbackQuery, ApiResponse, DeleteMessage, DeleteWebhook, EditMessageText, GetUpdates,
    Message, ReplyMarkup, SendMessage, Update,
};

const API_BASE: &str = "https://api.telegram.org";

/// Thin typed client over the Bot API JSON surface
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: String,
}

impl ApiClient {
    pub fn new(token: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: format!("{API_BASE}/bot{token}"),
        }
    }

    /// POST one method and unwrap the response envelope
    async fn call<T, P>(&self, method: &str, payload: &P) -> Result<T>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        let response: ApiResponse<T> = self
            .http
            .post(format!("{}/{method}", self.base))
            .json(payload)
            .send()
            .await?
            .json()
            .await?;
        unwrap_response(method, response)
    }

    /// POST one method as a multipart form (file uploads)
    async fn call_multipart<T>(&self, method: &str, form: reqwest::multipart::Form) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let response: ApiResponse<T> = self
            .http
            .post(format!("{}/{method}", self.base))
            .multipart(form)
            .send()
            .await?
            .json()
            .await?;
        unwrap_response(method, response)
    }

    /// Long-poll for updates newer than `offset`
    pub async fn get_updates(&self, offset: i64, timeout_secs: u64) -> Result<Vec<Update>> {
        self.call(
            "getUpdates",
            &GetUpdates {
                offset,
                timeout: timeout_secs,
            },
        )
        .await
    }

    /// Switch the bot to polling mode, optionally discarding backlog
    pub async fn delete_webhook(&self, drop_pending_updates: bool) -> Result<bool> {
        self.call("deleteWebhook", &DeleteWebhook { drop_pending_updates })
            .await
    }
}

fn unwrap_response<T>(method: &str, response: ApiResponse<T>) -> Result<T> {
    if response.ok {
        if let Some(result) = response.result {
            return Ok(result);
        }
    }
    Err(Error::Gateway(format!(
        "{method}: {}",
        response
            .description
            .unwrap_or_else(|| "no error description".to_string())
    )))
}

/// Telegram-backed messaging gateway
///
/// All texts go out with HTML parse mode; screens use `<b>` markup.
pub struct TelegramGateway {
    api: ApiClient,
}

impl TelegramGateway {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl MessagingGateway for TelegramGateway {
    async fn send_message(&self, chat: ChatId, text: &str, keyboard: Keyboard) -> Result<MessageId> {
        let message: Message = self
            .api
            .call(
                "sendMessage",
                &SendMessage {
                    chat_id: chat,
                    text,
                    parse_mode: "HTML",
                    reply_markup: ReplyMarkup::from_keyboard(keyboard),
                },
            )
            .await?;
        Ok(message.message_id)
    }

    async fn edit_message(
        &self,
        chat: ChatId,
        message: MessageId,
        text: &str,
        keyboard: Keyboard,
    ) -> Result<()> {
        let _: Message = self
            .api
            .call(
                "editMessageText",
                &EditMessageText {
                    chat_id: chat,
                    message_id: message,
                    text,
                    parse_mode: "HTML",
                    reply_markup: ReplyMarkup::from_keyboard(keyboard),
                },
            )
            .await?;
        Ok(())
    }

    async fn delete_message(&self, chat: ChatId, message: MessageId) -> Result<()> {
        let _: bool = self
            .api
            .call(
                "deleteMessage",
                &DeleteMessage {
                    chat_id: chat,
                    message_id: message,
                },
            )
            .await?;
        Ok(())
    }

    async fn send_photo(
        &self,
        chat: ChatId,
        photo: &Path,
        caption: &str,
        keyboard: Keyboard,
    ) -> Result<MessageId> {
        let bytes = tokio::fs::read(photo).await?;
        let file_name = photo
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "photo.jpg".to_string());
        debug!(photo = %photo.display(), size = bytes.len(), "Uploading staff photo");

        let mut form = reqwest::multipart::Form::new()
            .text("chat_id", chat.to_string())
            .text("caption", caption.to_string())
            .text("parse_mode", "HTML")
            .part(
                "photo",
                reqwest::multipart::Part::bytes(bytes).file_name(file_name),
            );
        if let Some(markup) = ReplyMarkup::from_keyboard(keyboard) {
            form = form.text("reply_markup", serde_json::to_string(&markup)?);
        }

        let message: Message = self.api.call_multipart("sendPhoto", form).await?;
        Ok(message.message_id)
    }

    async fn answer_callback(&self, callback_id: &str, alert: Option<&str>) -> Result<()> {
        let _: bool = self
            .api
            .call(
                "answerCallbackQuery",
                &AnswerCallbackQuery {
                    callback_query_id: callback_id,
                    text: alert,
                    show_alert: alert.is_some(),
                },
            )
            .await?;
        Ok(())
    }
}
