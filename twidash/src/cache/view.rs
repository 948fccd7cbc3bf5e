//! Process-wide cache of the latest view.

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::dashboard::ViewModel;
use crate::models::Tweet;

/// Issued when an aggregation pass starts; hand it back to
/// [`ViewCache::commit_full`] or [`ViewCache::abandon`].
///
/// Dropping an unused ticket releases it, so a pass whose future is
/// cancelled does not stay in flight.
#[derive(Debug)]
#[must_use = "a refresh ticket must be committed or abandoned"]
pub struct RefreshTicket<'a> {
    cache: &'a ViewCache,
    version: u64,
    armed: bool,
}

impl RefreshTicket<'_> {
    /// Cache version when the pass started.
    pub fn version(&self) -> u64 {
        self.version
    }
}

impl Drop for RefreshTicket<'_> {
    fn drop(&mut self) {
        if self.armed {
            log::debug!("Refresh from version {} dropped unfinished", self.version);
            self.cache.write().release(self.version);
        }
    }
}

#[derive(Debug, Default)]
struct CacheState {
    /// Bumped on every successful mutation.
    version: u64,
    /// Version of the last full replacement.
    full_version: u64,
    view: Option<Arc<ViewModel>>,
    /// Start versions of passes still in flight, with a count per version.
    pending: BTreeMap<u64, usize>,
    /// Posts committed while a pass was in flight, oldest first.
    posted: Vec<(u64, Tweet)>,
}

impl CacheState {
    fn release(&mut self, version: u64) {
        if let Some(count) = self.pending.get_mut(&version) {
            *count -= 1;
            if *count == 0 {
                self.pending.remove(&version);
            }
        }

        match self.pending.keys().next().copied() {
            Some(oldest) => self.posted.retain(|(v, _)| *v > oldest),
            None => self.posted.clear(),
        }
    }
}

/// Holds the most recent [`ViewModel`].
///
/// Readers get immutable snapshots. A full replacement started before a
/// post landed keeps that post: posts committed after the pass began and
/// missing from the fetched statuses are put back on top. A pass that
/// started before the last full replacement is discarded.
#[derive(Debug, Default)]
pub struct ViewCache {
    state: RwLock<CacheState>,
    post_cap: Option<usize>,
}

impl ViewCache {
    /// Create an empty cache. `post_cap` bounds the status list after posts.
    pub fn new(post_cap: Option<usize>) -> Self {
        Self {
            state: RwLock::default(),
            post_cap,
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, CacheState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, CacheState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// The current view, if any pass has completed.
    pub fn snapshot(&self) -> Option<Arc<ViewModel>> {
        self.read().view.clone()
    }

    /// Check if nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.read().view.is_none()
    }

    /// Current version, bumped by every commit.
    pub fn version(&self) -> u64 {
        self.read().version
    }

    /// The configured status list bound.
    pub fn post_cap(&self) -> Option<usize> {
        self.post_cap
    }

    /// Number of aggregation passes holding a ticket.
    pub fn in_flight(&self) -> usize {
        self.read().pending.values().sum()
    }

    /// Mark the start of an aggregation pass.
    pub fn begin_refresh(&self) -> RefreshTicket<'_> {
        let mut state = self.write();
        let version = state.version;
        *state.pending.entry(version).or_insert(0) += 1;
        RefreshTicket {
            cache: self,
            version,
            armed: true,
        }
    }

    /// Give up on a pass that failed, leaving the cached view untouched.
    pub fn abandon(&self, mut ticket: RefreshTicket<'_>) {
        debug_assert!(std::ptr::eq(ticket.cache, self));
        ticket.armed = false;
        self.write().release(ticket.version);
    }

    /// Replace the whole view with the result of a finished pass.
    ///
    /// Returns the view now cached, which is the existing one when a newer
    /// pass already committed.
    pub fn commit_full(&self, mut ticket: RefreshTicket<'_>, mut view: ViewModel) -> Arc<ViewModel> {
        debug_assert!(std::ptr::eq(ticket.cache, self));
        ticket.armed = false;
        let mut state = self.write();

        if state.full_version > ticket.version {
            if let Some(current) = state.view.clone() {
                log::debug!(
                    "Discarding pass started at version {}, cache replaced at {}",
                    ticket.version,
                    state.full_version
                );
                state.release(ticket.version);
                return current;
            }
        }

        let mut replayed = 0;
        for (version, post) in &state.posted {
            if *version > ticket.version && !view.tweets.iter().any(|t| t.id == post.id) {
                view.tweets.insert(0, post.clone());
                replayed += 1;
            }
        }
        if replayed > 0 {
            if let Some(cap) = self.post_cap {
                view.tweets.truncate(cap);
            }
        }

        let view = Arc::new(view);
        state.version += 1;
        state.full_version = state.version;
        state.view = Some(view.clone());
        state.release(ticket.version);

        log::info!(
            "Cached view for {} at version {} ({} posts replayed)",
            view.account.id,
            state.version,
            replayed
        );
        view
    }

    /// Put a freshly posted status at the front of the cached list.
    ///
    /// Returns `None` when no view is cached yet. A post made while a pass
    /// is in flight is still remembered and lands in that pass's view.
    pub fn commit_post(&self, post: Tweet) -> Option<Arc<ViewModel>> {
        let mut state = self.write();
        let state = &mut *state;

        if state.view.is_none() && state.pending.is_empty() {
            return None;
        }

        state.version += 1;
        if !state.pending.is_empty() {
            state.posted.push((state.version, post.clone()));
        }

        let view = Arc::make_mut(state.view.as_mut()?);
        view.tweets.insert(0, post);
        if let Some(cap) = self.post_cap {
            view.tweets.truncate(cap);
        }

        log::info!("Cached new post at version {}", state.version);
        state.view.clone()
    }
}
