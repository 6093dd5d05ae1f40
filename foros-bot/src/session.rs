//! Per-user dialogue sessions
//!
//! Ephemeral state of an in-progress review submission, keyed by platform
//! user id. Sessions are created when a review is started and cleared on
//! completion; an abandoned session lingers until the user's next
//! interaction resumes or overwrites it.

use std::collections::HashMap;

use foros_common::store::TargetRef;

/// Phase of the two-step review dialogue
#[derive(Debug, Clone, PartialEq)]
pub enum ReviewDialogue {
    /// Star picker shown, waiting for a rating
    AwaitingRating { target: TargetRef },

    /// Rating chosen, the next text message is the review body
    AwaitingText { target: TargetRef, rating: u8 },
}

/// Dialogue state container, owned by the dispatcher
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: HashMap<i64, ReviewDialogue>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current dialogue of a user, if any
    pub fn get(&self, user_id: i64) -> Option<&ReviewDialogue> {
        self.sessions.get(&user_id)
    }

    /// Enter or replace a user's dialogue
    pub fn set(&mut self, user_id: i64, dialogue: ReviewDialogue) {
        self.sessions.insert(user_id, dialogue);
    }

    /// Drop a user's dialogue
    pub fn clear(&mut self, user_id: i64) {
        self.sessions.remove(&user_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use foros_common::Category;

    #[test]
    fn set_get_clear() {
        let mut sessions = SessionStore::new();
        let target = TargetRef::workshop(Category::ColdKitchen);

        assert!(sessions.get(1).is_none());

        sessions.set(1, ReviewDialogue::AwaitingRating { target: target.clone() });
        assert_eq!(
            sessions.get(1),
            Some(&ReviewDialogue::AwaitingRating { target: target.clone() })
        );

        // Advancing the phase replaces the entry
        sessions.set(1, ReviewDialogue::AwaitingText { target: target.clone(), rating: 4 });
        assert_eq!(
            sessions.get(1),
            Some(&ReviewDialogue::AwaitingText { target, rating: 4 })
        );

        sessions.clear(1);
        assert!(sessions.get(1).is_none());
    }

    #[test]
    fn sessions_are_per_user() {
        let mut sessions = SessionStore::new();
        sessions.set(
            1,
            ReviewDialogue::AwaitingRating {
                target: TargetRef::staff(Category::Waiters, "anna"),
            },
        );

        assert!(sessions.get(2).is_none());
    }
}
