//! The dashboard service: aggregation passes and posting against one cache.

use std::sync::Arc;

use crate::api::validate_status;
use crate::cache::ViewCache;
use crate::error::Result;
use crate::models::{TimeFormatter, Tweet};

use super::{aggregate, normalize_tweet, DashboardConfig, SocialApi, ViewModel};

/// Result of posting a status.
#[derive(Debug, Clone)]
pub struct PostOutcome {
    /// The status as created, with its display timestamp.
    pub tweet: Tweet,
    /// The cached view after the post, if one was cached.
    pub view: Option<Arc<ViewModel>>,
}

/// Owns the remote API handle and the view cache shared by every request.
pub struct Dashboard<A: ?Sized> {
    config: DashboardConfig,
    formatter: TimeFormatter,
    cache: ViewCache,
    api: Arc<A>,
}

impl<A: SocialApi + ?Sized> Dashboard<A> {
    /// Create a dashboard with the default time format.
    pub fn new(api: Arc<A>, config: DashboardConfig) -> Self {
        Self::with_formatter(api, config, TimeFormatter::default())
    }

    /// Create a dashboard with a custom time format.
    pub fn with_formatter(api: Arc<A>, config: DashboardConfig, formatter: TimeFormatter) -> Self {
        let cache = ViewCache::new(config.post_cap);
        Self {
            config,
            formatter,
            cache,
            api,
        }
    }

    /// Run an aggregation pass and cache its result.
    ///
    /// On failure the cached view is left as it was.
    pub async fn refresh(&self) -> Result<Arc<ViewModel>> {
        let ticket = self.cache.begin_refresh();

        match aggregate(self.api.as_ref(), &self.config, &self.formatter).await {
            Ok(view) => Ok(self.cache.commit_full(ticket, view)),
            Err(e) => {
                log::warn!("Aggregation failed: {}", e);
                self.cache.abandon(ticket);
                Err(e)
            }
        }
    }

    /// Post a status and put it at the front of the cached view.
    ///
    /// On failure the cached view is left as it was. Once the platform has
    /// accepted the status this succeeds; a timestamp that cannot be
    /// formatted is kept as delivered.
    pub async fn post_status(&self, status: &str) -> Result<PostOutcome> {
        validate_status(status)?;

        let mut tweet = self.api.update_status(status).await?;
        if let Err(e) = normalize_tweet(&mut tweet, &self.formatter) {
            log::warn!("Keeping raw timestamp of {}: {}", tweet.id, e);
        }

        let view = self.cache.commit_post(tweet.clone());
        if view.is_none() {
            log::debug!("Posted {} with nothing cached yet", tweet.id);
        }

        Ok(PostOutcome { tweet, view })
    }

    /// The cached view, if any pass has completed.
    pub fn current(&self) -> Option<Arc<ViewModel>> {
        self.cache.snapshot()
    }

    /// The cached view, running a pass first when nothing is cached.
    pub async fn current_or_refresh(&self) -> Result<Arc<ViewModel>> {
        match self.current() {
            Some(view) => Ok(view),
            None => self.refresh().await,
        }
    }

    /// The view cache.
    pub fn cache(&self) -> &ViewCache {
        &self.cache
    }

    /// The remote API handle.
    pub fn api(&self) -> &Arc<A> {
        &self.api
    }

    /// Display counts and cache policy.
    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::testing::{event, tweet, user, FakeApi};
    use crate::error::Error;
    use crate::models::CreatedAt;
    use pretty_assertions::assert_eq;

    fn api() -> FakeApi {
        FakeApi {
            account: user("42", "owner"),
            friends: vec![user("100", "alice")],
            timeline: (1..=5)
                .map(|i| tweet(&format!("t{}", i), "Wed Oct 10 20:19:24 +0000 2018"))
                .collect(),
            events: vec![event("e1", "42")],
            ..Default::default()
        }
    }

    fn tweet_ids(view: &ViewModel) -> Vec<String> {
        view.tweets.iter().map(|t| t.id.to_string()).collect()
    }

    #[tokio::test]
    async fn test_refresh_caches_view() {
        let dash = Dashboard::new(Arc::new(api()), DashboardConfig::default());
        assert!(dash.current().is_none());

        let view = dash.refresh().await.unwrap();
        assert_eq!(dash.current(), Some(view));
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_cache() {
        let dash = Dashboard::new(Arc::new(api().failing("friends")), DashboardConfig::default());

        let err = dash.refresh().await.unwrap_err();
        assert!(matches!(err, Error::Fetch { resource: "friends", .. }));
        assert!(dash.current().is_none());
        assert_eq!(dash.cache().version(), 0);
    }

    #[tokio::test]
    async fn test_post_prepends_with_display_time() {
        let dash = Dashboard::new(Arc::new(api()), DashboardConfig::default());
        dash.refresh().await.unwrap();

        let outcome = dash.post_status("hello world").await.unwrap();
        assert_eq!(outcome.tweet.created_at, CreatedAt::Display("Oct 11, 2018 08:00".into()));

        let view = outcome.view.unwrap();
        assert_eq!(view.tweets.len(), 5);
        assert_eq!(view.tweets[0].text, "hello world");
        assert_eq!(dash.api().posted(), vec!["hello world".to_string()]);
    }

    #[tokio::test]
    async fn test_uncapped_config() {
        let config = DashboardConfig {
            post_cap: None,
            ..Default::default()
        };
        let dash = Dashboard::new(Arc::new(api()), config);
        dash.refresh().await.unwrap();

        for text in ["one", "two", "three"] {
            dash.post_status(text).await.unwrap();
        }

        let view = dash.current().unwrap();
        assert_eq!(
            tweet_ids(&view),
            vec!["new-3", "new-2", "new-1", "t1", "t2", "t3", "t4", "t5"]
        );
    }

    #[tokio::test]
    async fn test_post_without_cache() {
        let dash = Dashboard::new(Arc::new(api()), DashboardConfig::default());

        let outcome = dash.post_status("first").await.unwrap();
        assert!(outcome.view.is_none());
        assert!(dash.current().is_none());
    }

    #[tokio::test]
    async fn test_failed_post_keeps_cache() {
        let dash = Dashboard::new(Arc::new(api().failing("update")), DashboardConfig::default());
        let before = dash.refresh().await.unwrap();

        assert!(dash.post_status("nope").await.is_err());
        assert_eq!(dash.current(), Some(before));
    }

    #[tokio::test]
    async fn test_empty_status_is_rejected_locally() {
        let dash = Dashboard::new(Arc::new(api()), DashboardConfig::default());

        let err = dash.post_status("   ").await.unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert!(dash.api().posted().is_empty());
    }

    #[tokio::test]
    async fn test_post_racing_refresh_is_kept() {
        let dash = Dashboard::new(Arc::new(api()), DashboardConfig::default());
        dash.refresh().await.unwrap();

        let gate = dash.api().gate_timeline();
        let (refreshed, posted) = tokio::join!(dash.refresh(), async {
            let outcome = dash.post_status("mid-flight").await;
            gate.notify_one();
            outcome
        });

        let refreshed = refreshed.unwrap();
        posted.unwrap();

        assert_eq!(refreshed.tweets[0].text, "mid-flight");
        assert_eq!(refreshed.tweets.len(), 5);
        assert_eq!(dash.current(), Some(refreshed));
    }

    #[tokio::test]
    async fn test_post_racing_first_refresh_is_kept() {
        let dash = Dashboard::new(Arc::new(api()), DashboardConfig::default());

        let gate = dash.api().gate_timeline();
        let (refreshed, posted) = tokio::join!(dash.refresh(), async {
            let outcome = dash.post_status("mid-flight").await;
            gate.notify_one();
            outcome
        });

        assert!(posted.unwrap().view.is_none());
        let refreshed = refreshed.unwrap();
        assert_eq!(tweet_ids(&refreshed), vec!["new-1", "t1", "t2", "t3", "t4"]);
        assert_eq!(dash.current(), Some(refreshed));
    }

    #[tokio::test]
    async fn test_cancelled_refresh_is_released() {
        let dash = Dashboard::new(Arc::new(api()), DashboardConfig::default());
        dash.refresh().await.unwrap();

        let _gate = dash.api().gate_timeline();
        tokio::select! {
            biased;
            _ = dash.refresh() => panic!("Gated refresh should not finish"),
            _ = async {} => {}
        }
        assert_eq!(dash.cache().in_flight(), 0);

        for text in ["one", "two", "three"] {
            dash.post_status(text).await.unwrap();
        }
        let view = dash.refresh().await.unwrap();
        assert_eq!(tweet_ids(&view), vec!["t1", "t2", "t3", "t4", "t5"]);
        assert_eq!(dash.cache().in_flight(), 0);
    }

    #[tokio::test]
    async fn test_post_keeps_raw_time_it_cannot_format() {
        let api = FakeApi {
            post_created_at: Some("not a date"),
            ..api()
        };
        let dash = Dashboard::new(Arc::new(api), DashboardConfig::default());
        dash.refresh().await.unwrap();

        let outcome = dash.post_status("odd clock").await.unwrap();
        assert_eq!(outcome.tweet.created_at, CreatedAt::Raw("not a date".into()));
        assert_eq!(outcome.view.unwrap().tweets[0].text, "odd clock");
        assert_eq!(dash.api().posted(), vec!["odd clock".to_string()]);
    }

    #[tokio::test]
    async fn test_current_or_refresh() {
        let dash = Dashboard::new(Arc::new(api()), DashboardConfig::default());
        let first = dash.current_or_refresh().await.unwrap();
        let version = dash.cache().version();

        let second = dash.current_or_refresh().await.unwrap();
        assert_eq!(first, second);
        assert_eq!(dash.cache().version(), version);
    }
}
