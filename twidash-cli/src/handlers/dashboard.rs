//! Dashboard handlers.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use twidash::{Dashboard, MessageEvent, SocialApi, Tweet, User, ViewModel};

use crate::output::{truncate, PlainPrint, TableRow};

/// Profile summary.
#[derive(Debug, Clone, Serialize)]
pub struct UserInfo {
    pub id: String,
    pub name: String,
    pub handle: String,
    pub followers: u64,
    pub following: u64,
}

impl From<&User> for UserInfo {
    fn from(u: &User) -> Self {
        Self {
            id: u.id.to_string(),
            name: u.display_name().to_string(),
            handle: u.handle(),
            followers: u.followers_count,
            following: u.following_count,
        }
    }
}

impl TableRow for UserInfo {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "Name", "Handle", "Followers", "Following"]
    }
    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.handle.clone(),
            self.followers.to_string(),
            self.following.to_string(),
        ]
    }
}

impl PlainPrint for UserInfo {
    fn plain_print(&self) {
        println!(
            "{} {} {}",
            self.name.bold(),
            self.handle.cyan(),
            format!("[UID: {}]", self.id).dimmed()
        );
    }
}

/// Status summary.
#[derive(Debug, Clone, Serialize)]
pub struct TweetInfo {
    pub id: String,
    pub text: String,
    pub time: String,
    pub retweets: u64,
    pub likes: u64,
}

impl From<&Tweet> for TweetInfo {
    fn from(t: &Tweet) -> Self {
        Self {
            id: t.id.to_string(),
            text: t.display_text(),
            time: t.created_at.to_string(),
            retweets: t.retweet_count,
            likes: t.favorite_count,
        }
    }
}

impl TableRow for TweetInfo {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "Text", "Time", "RT", "Likes"]
    }
    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            truncate(&self.text, 60),
            self.time.clone(),
            self.retweets.to_string(),
            self.likes.to_string(),
        ]
    }
}

impl PlainPrint for TweetInfo {
    fn plain_print(&self) {
        println!(
            "{} {}",
            self.time.dimmed(),
            format!("♻ {}  ♥ {}", self.retweets, self.likes).dimmed()
        );
        for line in self.text.lines() {
            if !line.trim().is_empty() {
                println!("   {}", line);
            }
        }
    }
}

/// Direct message summary.
#[derive(Debug, Clone, Serialize)]
pub struct MessageInfo {
    pub id: String,
    pub sender_id: String,
    pub is_mine: bool,
    pub text: String,
    pub time: String,
}

impl MessageInfo {
    fn new(m: &MessageEvent, account: &User) -> Self {
        Self {
            id: m.id.to_string(),
            sender_id: m.sender_id().to_string(),
            is_mine: m.is_from(&account.id),
            text: m.text().to_string(),
            time: m.created_timestamp.to_string(),
        }
    }
}

impl TableRow for MessageInfo {
    fn headers() -> Vec<&'static str> {
        vec!["From", "Message", "Time"]
    }
    fn row(&self) -> Vec<String> {
        vec![
            if self.is_mine {
                "You".to_string()
            } else {
                self.sender_id.clone()
            },
            truncate(&self.text, 60),
            self.time.clone(),
        ]
    }
}

impl PlainPrint for MessageInfo {
    fn plain_print(&self) {
        let from = if self.is_mine {
            "You".green().to_string()
        } else {
            format!("[UID: {}]", self.sender_id).yellow().to_string()
        };
        println!("{} {}", from, self.time.dimmed());
        println!("   {}", self.text);
    }
}

/// Everything one dashboard render shows.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardInfo {
    pub account: UserInfo,
    pub friends: Vec<UserInfo>,
    pub tweets: Vec<TweetInfo>,
    pub messages: Vec<MessageInfo>,
    pub chat_buddy: Option<UserInfo>,
}

impl From<&ViewModel> for DashboardInfo {
    fn from(v: &ViewModel) -> Self {
        Self {
            account: (&v.account).into(),
            friends: v.friends.iter().map(UserInfo::from).collect(),
            tweets: v.tweets.iter().map(TweetInfo::from).collect(),
            messages: v
                .messages
                .iter()
                .map(|m| MessageInfo::new(m, &v.account))
                .collect(),
            chat_buddy: v.chat_buddy.as_ref().map(UserInfo::from),
        }
    }
}

/// Post result.
#[derive(Debug, Clone, Serialize)]
pub struct PostInfo {
    pub tweet: TweetInfo,
    pub dashboard: Option<DashboardInfo>,
}

/// Run an aggregation pass.
pub async fn refresh<A: SocialApi + ?Sized>(dashboard: &Dashboard<A>) -> Result<DashboardInfo> {
    let view = dashboard.refresh().await?;
    Ok(DashboardInfo::from(&*view))
}

/// The cached view, fetching it first if nothing is cached.
pub async fn cached<A: SocialApi + ?Sized>(dashboard: &Dashboard<A>) -> Result<DashboardInfo> {
    let view = dashboard.current_or_refresh().await?;
    Ok(DashboardInfo::from(&*view))
}

/// Post a status.
pub async fn post_status<A: SocialApi + ?Sized>(
    dashboard: &Dashboard<A>,
    text: &str,
) -> Result<PostInfo> {
    let outcome = dashboard.post_status(text).await?;
    Ok(PostInfo {
        tweet: (&outcome.tweet).into(),
        dashboard: outcome.view.as_deref().map(DashboardInfo::from),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use twidash::{CreatedAt, TweetId};

    #[test]
    fn test_dashboard_info() {
        let me = User {
            id: "42".into(),
            screen_name: "owner".into(),
            ..Default::default()
        };
        let view = ViewModel {
            account: me.clone(),
            tweets: vec![Tweet {
                id: TweetId::new("1"),
                text: "tea &amp; cake".into(),
                created_at: CreatedAt::Display("Oct 10, 2018 20:19".into()),
                ..Default::default()
            }],
            messages: vec![MessageEvent {
                message_create: twidash::models::MessageCreate {
                    sender_id: "42".into(),
                    ..Default::default()
                },
                ..Default::default()
            }],
            ..Default::default()
        };

        let info = DashboardInfo::from(&view);
        assert_eq!(info.account.handle, "@owner");
        assert_eq!(info.account.name, "owner");
        assert_eq!(info.tweets[0].text, "tea & cake");
        assert_eq!(info.tweets[0].time, "Oct 10, 2018 20:19");
        assert!(info.messages[0].is_mine);
        assert!(info.chat_buddy.is_none());
    }
}
