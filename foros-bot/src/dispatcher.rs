//! Event dispatcher
//!
//! Routes inbound user events through the navigation menu tree and the
//! two-step review dialogue. One dispatcher instance owns the staff store
//! and the session map and processes events one at a time, so every
//! read-modify-write of the shared document is serialized here.

use chrono::Utc;
use tracing::{debug, info, warn};

use foros_common::config::{resolve_photo, BotConfig};
use foros_common::eligibility::can_review;
use foros_common::ranking::top_staff;
use foros_common::store::{Review, StaffStore, TargetRef};
use foros_common::Category;

use crate::error::Result;
use crate::events::{UserEvent, UserRef};
use crate::gateway::{ChatId, Keyboard, MessageId, MessagingGateway};
use crate::intent::Intent;
use crate::render;
use crate::session::{ReviewDialogue, SessionStore};

/// Single-owner event dispatcher over a messaging gateway
pub struct Dispatcher<G> {
    gateway: G,
    store: StaffStore,
    sessions: SessionStore,
    config: BotConfig,
}

impl<G: MessagingGateway> Dispatcher<G> {
    pub fn new(gateway: G, store: StaffStore, config: BotConfig) -> Self {
        Self {
            gateway,
            store,
            sessions: SessionStore::new(),
            config,
        }
    }

    /// The gateway screens are rendered through
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// The staff store owned by this dispatcher
    pub fn store(&self) -> &StaffStore {
        &self.store
    }

    /// Current dialogue of a user, if any
    pub fn session(&self, user_id: i64) -> Option<&ReviewDialogue> {
        self.sessions.get(user_id)
    }

    /// Route one inbound event to its handler
    pub async fn dispatch(&mut self, event: UserEvent) -> Result<()> {
        match event {
            UserEvent::ButtonPress {
                user,
                chat_id,
                message_id,
                callback_id,
                token,
                has_photo,
            } => {
                self.handle_button(&user, chat_id, message_id, &callback_id, &token, has_photo)
                    .await
            }
            UserEvent::Text { user, chat_id, text } => {
                self.handle_text(&user, chat_id, text.as_deref()).await
            }
        }
    }

    async fn handle_button(
        &mut self,
        user: &UserRef,
        chat: ChatId,
        message: MessageId,
        callback_id: &str,
        token: &str,
        has_photo: bool,
    ) -> Result<()> {
        let Some(intent) = Intent::parse(token) else {
            warn!(user = user.id, token, "Dropping unrecognized callback token");
            return self.gateway.answer_callback(callback_id, None).await;
        };
        debug!(user = user.id, ?intent, "Button press");

        match intent {
            Intent::MainMenu => {
                self.replace(chat, message, render::MAIN_MENU_SHORT, render::main_menu_keyboard())
                    .await?;
            }
            Intent::SelectCategory => {
                self.replace(chat, message, render::SELECT_CATEGORY, render::category_keyboard())
                    .await?;
            }
            Intent::SelectKitchen => {
                self.replace(chat, message, render::SELECT_KITCHEN, render::kitchen_keyboard())
                    .await?;
            }
            Intent::TopStaff => {
                let top = top_staff(
                    self.store.document(),
                    self.config.min_reviews,
                    self.config.top_limit,
                );
                self.smart_edit(
                    chat,
                    message,
                    has_photo,
                    &render::top_staff_list(&top),
                    render::back_keyboard(Intent::SelectCategory),
                )
                .await?;
            }
            Intent::ShowCategory(category) => {
                self.show_category(chat, message, has_photo, category).await?;
            }
            Intent::ShowStaff(category, staff_id) => {
                self.show_staff_card(chat, message, category, &staff_id).await?;
            }
            Intent::ShowReviews(target) => {
                let text = render::reviews_list(self.store.reviews(&target)?, target.is_workshop());
                let keyboard = match &target.staff_id {
                    None => render::workshop_keyboard(target.category),
                    Some(id) => {
                        render::back_keyboard(Intent::ShowStaff(target.category, id.clone()))
                    }
                };
                self.smart_edit(chat, message, has_photo, &text, keyboard).await?;
            }
            Intent::StartReview(target) => {
                return self
                    .start_review(user, chat, message, callback_id, has_photo, target)
                    .await;
            }
            Intent::Rate(rating) => {
                return self
                    .handle_rating(user, chat, message, callback_id, has_photo, rating)
                    .await;
            }
        }

        self.gateway.answer_callback(callback_id, None).await
    }

    async fn handle_text(&mut self, user: &UserRef, chat: ChatId, text: Option<&str>) -> Result<()> {
        // Command and START button are live in any dialogue phase
        if text == Some("/start") {
            return self
                .send(chat, render::WELCOME, render::start_keyboard())
                .await;
        }
        if text == Some(render::START_BUTTON) {
            return self
                .send(chat, render::MAIN_MENU, render::main_menu_keyboard())
                .await;
        }

        match self.sessions.get(user.id).cloned() {
            Some(ReviewDialogue::AwaitingText { target, rating }) => match text {
                Some(body) => self.submit_review(user, chat, &target, rating, body).await,
                // Stickers, photos and the like are not review bodies
                None => {
                    self.send(chat, render::WRITE_REVIEW, Keyboard::None).await
                }
            },
            Some(ReviewDialogue::AwaitingRating { .. }) => {
                debug!(user = user.id, "Ignoring message while the star picker is open");
                Ok(())
            }
            None => {
                self.send(chat, render::PRESS_START, render::start_keyboard())
                    .await
            }
        }
    }

    async fn show_category(
        &mut self,
        chat: ChatId,
        message: MessageId,
        has_photo: bool,
        category: Category,
    ) -> Result<()> {
        if category.is_workshop() {
            let text = render::workshop_card(category, self.store.workshop(category)?);
            self.smart_edit(chat, message, has_photo, &text, render::workshop_keyboard(category))
                .await
        } else {
            let keyboard = render::staff_list_keyboard(category, self.store.staff_table(category)?);
            self.smart_edit(chat, message, has_photo, render::SELECT_STAFF, keyboard)
                .await
        }
    }

    /// The staff card always re-renders as a fresh message: the previous
    /// message may be text-only while the new one carries a photo (or the
    /// other way around), and the platform cannot edit between the two.
    async fn show_staff_card(
        &self,
        chat: ChatId,
        message: MessageId,
        category: Category,
        staff_id: &str,
    ) -> Result<()> {
        let staff = self.store.staff(category, staff_id)?;
        let text = render::staff_card(staff);
        let photo = resolve_photo(&self.config.photos_dir, staff.photo.as_deref());
        let keyboard = render::staff_actions_keyboard(category, staff_id);

        self.gateway.delete_message(chat, message).await?;
        match photo {
            Some(path) => {
                self.gateway.send_photo(chat, &path, &text, keyboard).await?;
            }
            None => {
                self.gateway.send_message(chat, &text, keyboard).await?;
            }
        }
        Ok(())
    }

    async fn start_review(
        &mut self,
        user: &UserRef,
        chat: ChatId,
        message: MessageId,
        callback_id: &str,
        has_photo: bool,
        target: TargetRef,
    ) -> Result<()> {
        if !can_review(self.store.reviews(&target)?, user.id, Utc::now()) {
            debug!(user = user.id, "Review rejected by cooldown");
            return self
                .gateway
                .answer_callback(callback_id, Some(render::cooldown_alert(&target)))
                .await;
        }

        self.sessions.set(
            user.id,
            ReviewDialogue::AwaitingRating { target: target.clone() },
        );
        self.smart_edit(
            chat,
            message,
            has_photo,
            render::rate_prompt(&target),
            render::rating_keyboard(),
        )
        .await?;
        self.gateway.answer_callback(callback_id, None).await
    }

    async fn handle_rating(
        &mut self,
        user: &UserRef,
        chat: ChatId,
        message: MessageId,
        callback_id: &str,
        has_photo: bool,
        rating: u8,
    ) -> Result<()> {
        if let Some(ReviewDialogue::AwaitingRating { target }) = self.sessions.get(user.id).cloned()
        {
            self.sessions
                .set(user.id, ReviewDialogue::AwaitingText { target, rating });
            self.smart_edit(chat, message, has_photo, render::WRITE_REVIEW, Keyboard::None)
                .await?;
        } else {
            debug!(user = user.id, "Ignoring star press outside a review dialogue");
        }
        self.gateway.answer_callback(callback_id, None).await
    }

    async fn submit_review(
        &mut self,
        user: &UserRef,
        chat: ChatId,
        target: &TargetRef,
        rating: u8,
        body: &str,
    ) -> Result<()> {
        let review = Review::new(user.id, user.display_name.clone(), rating, body, Utc::now());
        let new_rating = self.store.append_review(target, review)?;
        self.store.save()?;
        self.sessions.clear(user.id);
        info!(user = user.id, rating, new_rating, "Review saved");

        self.send(chat, render::REVIEW_SAVED, render::start_keyboard())
            .await
    }

    /// Edit a text-only message in place; a message showing a photo cannot
    /// be edited into text, so it is deleted and resent instead
    async fn smart_edit(
        &self,
        chat: ChatId,
        message: MessageId,
        has_photo: bool,
        text: &str,
        keyboard: Keyboard,
    ) -> Result<()> {
        if has_photo {
            self.replace(chat, message, text, keyboard).await
        } else {
            self.gateway.edit_message(chat, message, text, keyboard).await
        }
    }

    /// Delete the hosting message and send the screen as a fresh one
    async fn replace(
        &self,
        chat: ChatId,
        message: MessageId,
        text: &str,
        keyboard: Keyboard,
    ) -> Result<()> {
        self.gateway.delete_message(chat, message).await?;
        self.gateway.send_message(chat, text, keyboard).await?;
        Ok(())
    }

    async fn send(&self, chat: ChatId, text: &str, keyboard: Keyboard) -> Result<()> {
        self.gateway.send_message(chat, text, keyboard).await?;
        Ok(())
    }
}
