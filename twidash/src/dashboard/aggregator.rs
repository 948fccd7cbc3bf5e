//! One aggregation pass: fan out, merge, resolve, normalize.

use crate::error::{Error, Result};
use crate::models::TimeFormatter;

use super::{normalize, resolve_chat_buddy, DashboardConfig, SocialApi, ViewModel};

/// Fetch account, friends, statuses and messages concurrently and build the view.
///
/// All four reads must succeed; the first failure aborts the pass and is
/// returned as [`Error::Fetch`]. The chat buddy is resolved best effort
/// afterwards, then timestamps are formatted.
pub async fn aggregate<A>(
    api: &A,
    config: &DashboardConfig,
    formatter: &TimeFormatter,
) -> Result<ViewModel>
where
    A: SocialApi + ?Sized,
{
    let (account, friends, tweets, messages) = tokio::try_join!(
        async {
            api.verify_credentials()
                .await
                .map_err(|e| Error::fetch("account", e))
        },
        async {
            api.friends(config.friends_count)
                .await
                .map_err(|e| Error::fetch("friends", e))
        },
        async {
            api.user_timeline(config.posts_count)
                .await
                .map_err(|e| Error::fetch("statuses", e))
        },
        async {
            api.message_events(config.messages_count)
                .await
                .map_err(|e| Error::fetch("messages", e))
        },
    )?;

    log::debug!(
        "Fetched account {} with {} friends, {} statuses, {} messages",
        account.id,
        friends.len(),
        tweets.len(),
        messages.len()
    );

    let chat_buddy = resolve_chat_buddy(api, &account, &messages).await;

    let mut view = ViewModel {
        account,
        friends,
        tweets,
        messages,
        chat_buddy,
    };
    normalize(&mut view, formatter)?;

    Ok(view)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::testing::{event_at, tweet, user, FakeApi};
    use crate::models::{CreatedAt, UserId};
    use pretty_assertions::assert_eq;

    fn populated() -> FakeApi {
        let api = FakeApi {
            account: user("42", "owner"),
            friends: vec![user("100", "alice"), user("101", "bob")],
            timeline: vec![
                tweet("3", "Thu Oct 11 09:00:00 +0000 2018"),
                tweet("2", "Wed Oct 10 20:19:24 +0000 2018"),
                tweet("1", "Tue Oct 09 07:05:00 +0000 2018"),
            ],
            events: vec![
                event_at("e2", "42", "1539203964000"),
                event_at("e1", "77", "1546300800000"),
            ],
            ..Default::default()
        };
        api.add_profile(user("77", "buddy"));
        api
    }

    #[tokio::test]
    async fn test_end_to_end() {
        let api = populated();

        let view = aggregate(&api, &DashboardConfig::default(), &TimeFormatter::default())
            .await
            .unwrap();

        assert_eq!(view.account.id, "42");
        assert_eq!(view.friends.len(), 2);
        assert_eq!(view.tweets.len(), 3);
        assert_eq!(view.messages.len(), 2);

        let tweet_times: Vec<&CreatedAt> = view.tweets.iter().map(|t| &t.created_at).collect();
        assert_eq!(
            tweet_times,
            vec![
                &CreatedAt::Display("Oct 11, 2018 09:00".into()),
                &CreatedAt::Display("Oct 10, 2018 20:19".into()),
                &CreatedAt::Display("Oct 9, 2018 07:05".into()),
            ]
        );
        assert_eq!(
            view.messages[1].created_timestamp,
            CreatedAt::Display("Jan 1, 2019 00:00".into())
        );
        assert!(view.messages.iter().all(|m| m.created_timestamp.is_display()));

        assert_eq!(view.chat_buddy.map(|u| u.id), Some(UserId::new("77")));
        assert_eq!(api.lookups(), vec![vec![UserId::new("77")]]);
    }

    #[tokio::test]
    async fn test_any_read_failure_fails_the_pass() {
        for (endpoint, resource) in [
            ("account", "account"),
            ("friends", "friends"),
            ("timeline", "statuses"),
            ("events", "messages"),
        ] {
            let api = populated().failing(endpoint);
            let err = aggregate(&api, &DashboardConfig::default(), &TimeFormatter::default())
                .await
                .unwrap_err();

            match err {
                Error::Fetch { resource: r, .. } => assert_eq!(r, resource),
                other => panic!("Expected fetch error for {}, got {:?}", endpoint, other),
            }
        }
    }

    #[tokio::test]
    async fn test_lookup_failure_does_not_fail_the_pass() {
        let api = populated().failing("lookup");

        let view = aggregate(&api, &DashboardConfig::default(), &TimeFormatter::default())
            .await
            .unwrap();

        assert_eq!(view.chat_buddy, None);
        assert_eq!(view.tweets.len(), 3);
    }

    #[tokio::test]
    async fn test_counts_are_passed_through() {
        let api = populated();
        let config = DashboardConfig {
            friends_count: 1,
            posts_count: 2,
            messages_count: 1,
            ..Default::default()
        };

        let view = aggregate(&api, &config, &TimeFormatter::default()).await.unwrap();

        assert_eq!(view.friends.len(), 1);
        assert_eq!(view.tweets.len(), 2);
        assert_eq!(view.messages.len(), 1);
        // Only the owner's own message is left, so nobody is looked up.
        assert_eq!(view.chat_buddy, None);
        assert!(api.lookups().is_empty());
    }
}
