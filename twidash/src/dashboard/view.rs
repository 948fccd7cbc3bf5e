//! The aggregate view and its display settings.

use serde::{Deserialize, Serialize};

use crate::models::{MessageEvent, Tweet, User};

/// Default number of friends, posts and messages fetched per pass.
pub const DEFAULT_DISPLAY_COUNT: u32 = 5;

/// Everything one aggregation pass produces.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewModel {
    /// The authenticated account.
    pub account: User,
    /// Followed users.
    pub friends: Vec<User>,
    /// The account's recent statuses, most recent first.
    pub tweets: Vec<Tweet>,
    /// Recent direct-message events, most recent first.
    pub messages: Vec<MessageEvent>,
    /// Most recent correspondent other than the account itself.
    pub chat_buddy: Option<User>,
}

/// Display counts and cache policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Friends requested per pass.
    pub friends_count: u32,
    /// Statuses requested per pass.
    pub posts_count: u32,
    /// Message events requested per pass.
    pub messages_count: u32,
    /// Longest the cached status list may grow after posting.
    /// `None` lets it grow without bound.
    pub post_cap: Option<usize>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            friends_count: DEFAULT_DISPLAY_COUNT,
            posts_count: DEFAULT_DISPLAY_COUNT,
            messages_count: DEFAULT_DISPLAY_COUNT,
            post_cap: Some(DEFAULT_DISPLAY_COUNT as usize),
        }
    }
}
