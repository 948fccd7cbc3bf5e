//! Chat-buddy resolution.

use crate::models::{MessageEvent, User};

use super::SocialApi;

/// Find the profile of the most recent correspondent who is not `account`.
///
/// Scans `messages` in order and looks up only the first foreign sender.
/// Best effort: a failed lookup is logged and yields `None`.
pub async fn resolve_chat_buddy<A>(api: &A, account: &User, messages: &[MessageEvent]) -> Option<User>
where
    A: SocialApi + ?Sized,
{
    let sender = messages
        .iter()
        .map(MessageEvent::sender_id)
        .find(|id| **id != account.id)?;

    match api.lookup_users(std::slice::from_ref(sender)).await {
        Ok(users) => users.into_iter().next(),
        Err(e) => {
            log::warn!("Chat buddy lookup for user {} failed: {}", sender, e);
            None
        }
    }
}
