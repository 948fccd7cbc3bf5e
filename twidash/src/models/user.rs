//! User models.

use serde::{Deserialize, Serialize};

use super::UserId;

/// A user profile: the account owner, a friend, or a chat buddy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// User ID.
    #[serde(rename = "id_str")]
    pub id: UserId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Handle, without the leading `@`.
    #[serde(default)]
    pub screen_name: String,
    /// Profile bio.
    #[serde(default)]
    pub description: Option<String>,
    /// Avatar URL.
    #[serde(default, rename = "profile_image_url_https")]
    pub avatar_url: Option<String>,
    /// Banner URL.
    #[serde(default, rename = "profile_banner_url")]
    pub banner_url: Option<String>,
    /// Follower count.
    #[serde(default)]
    pub followers_count: u64,
    /// Following count.
    #[serde(default, rename = "friends_count")]
    pub following_count: u64,
    /// Whether the account is protected.
    #[serde(default)]
    pub protected: bool,
    /// Whether the account is verified.
    #[serde(default)]
    pub verified: bool,
}

impl User {
    /// Get the `@handle` form of the screen name.
    pub fn handle(&self) -> String {
        format!("@{}", self.screen_name)
    }

    /// Get the name to show, falling back to the handle.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.screen_name
        } else {
            &self.name
        }
    }
}

/// Response of the friends list endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FriendsPage {
    /// Friends, in the order the platform returns them.
    #[serde(default)]
    pub users: Vec<User>,
    /// Cursor for the next page.
    #[serde(default)]
    pub next_cursor_str: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_deserialize() {
        let json = r#"{
            "id": 6253282,
            "id_str": "6253282",
            "name": "Twitter API",
            "screen_name": "TwitterAPI",
            "profile_image_url_https": "https://pbs.twimg.com/profile_images/1.png",
            "followers_count": 6133636,
            "friends_count": 12,
            "verified": true
        }"#;

        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, "6253282");
        assert_eq!(user.handle(), "@TwitterAPI");
        assert_eq!(user.following_count, 12);
        assert!(user.verified);
        assert!(!user.protected);
        assert_eq!(user.description, None);
    }

    #[test]
    fn test_display_name_fallback() {
        let user = User {
            id: "1".into(),
            screen_name: "nobody".into(),
            ..Default::default()
        };
        assert_eq!(user.display_name(), "nobody");
    }

    #[test]
    fn test_friends_page() {
        let json = r#"{"users":[{"id_str":"1","screen_name":"a"},{"id_str":"2","screen_name":"b"}],"next_cursor_str":"0"}"#;
        let page: FriendsPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.users.len(), 2);
        assert_eq!(page.users[1].id, "2");
    }
}
