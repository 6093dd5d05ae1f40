//! Telegram Bot API transport
//!
//! Concrete [`crate::gateway::MessagingGateway`] implementation plus the
//! long-polling update source. Only the handful of methods the bot uses are
//! modeled.

pub mod client;
pub mod poller;
pub mod types;

pub use client::{ApiClient, TelegramGateway};
pub use poller::UpdatePoller;
