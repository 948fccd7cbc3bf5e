//! Status update models.

use serde::{Deserialize, Serialize};

use super::{CreatedAt, TweetId, User};

/// A status update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tweet {
    /// Tweet ID.
    #[serde(rename = "id_str")]
    pub id: TweetId,
    /// Body text, HTML-escaped by the platform.
    #[serde(default)]
    pub text: String,
    /// Creation time.
    pub created_at: CreatedAt,
    /// Author.
    #[serde(default)]
    pub user: Option<User>,
    /// Retweet count.
    #[serde(default)]
    pub retweet_count: u64,
    /// Like count.
    #[serde(default)]
    pub favorite_count: u64,
}

impl Tweet {
    /// Body text with HTML entities decoded.
    pub fn display_text(&self) -> String {
        html_escape::decode_html_entities(&self.text).into_owned()
    }
}
