// crates/client/src/cache.rs
//! Per-query caching with stale and garbage-collection times.
//!
//! A fresh entry (younger than `stale_time`) is served without a request. A
//! stale one is refetched on the next read. Entries unread for longer than
//! `gc_time` are evicted.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::Mutex;
use std::time::Duration;

use outreach_stats_core::{DailyStats, Project, StatsFilters, StatsResponse};
use tokio::time::Instant;

use crate::client::StatsClient;
use crate::error::ClientResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    pub stale_time: Duration,
    pub gc_time: Duration,
}

impl CachePolicy {
    /// Period and daily stats: stale after 5 minutes, dropped after 10.
    pub const STATS: CachePolicy = CachePolicy {
        stale_time: Duration::from_secs(5 * 60),
        gc_time: Duration::from_secs(10 * 60),
    };

    /// Project list: stale after 10 minutes, dropped after 30.
    pub const PROJECTS: CachePolicy = CachePolicy {
        stale_time: Duration::from_secs(10 * 60),
        gc_time: Duration::from_secs(30 * 60),
    };
}

#[derive(Debug)]
struct Entry<V> {
    value: V,
    fetched_at: Instant,
    last_read: Instant,
}

#[derive(Debug)]
pub struct QueryCache<K, V> {
    policy: CachePolicy,
    entries: Mutex<HashMap<K, Entry<V>>>,
}

impl<K, V> QueryCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new(policy: CachePolicy) -> Self {
        Self {
            policy,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<K, Entry<V>>> {
        // A poisoned map only holds cached copies; keep using it.
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// The cached value if it is still fresh.
    pub fn get_fresh(&self, key: &K) -> Option<V> {
        let now = Instant::now();
        let mut entries = self.lock();
        let entry = entries.get_mut(key)?;
        entry.last_read = now;
        (now.duration_since(entry.fetched_at) < self.policy.stale_time).then(|| entry.value.clone())
    }

    pub fn insert(&self, key: K, value: V) {
        let now = Instant::now();
        self.lock().insert(
            key,
            Entry {
                value,
                fetched_at: now,
                last_read: now,
            },
        );
    }

    /// Drop entries unread for longer than the GC time. Returns how many went.
    pub fn collect_garbage(&self) -> usize {
        let now = Instant::now();
        let gc_time = self.policy.gc_time;
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|_, entry| now.duration_since(entry.last_read) < gc_time);
        before - entries.len()
    }

    pub fn invalidate(&self, key: &K) {
        self.lock().remove(key);
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Serve a fresh cached value or run `fetch` and cache its result.
    ///
    /// Failed fetches are not cached. The lock is never held across `fetch`.
    pub async fn get_or_fetch<E, F, Fut>(&self, key: K, fetch: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        self.collect_garbage();
        if let Some(value) = self.get_fresh(&key) {
            return Ok(value);
        }
        let value = fetch().await?;
        self.insert(key, value.clone());
        Ok(value)
    }
}

/// [`StatsClient`] with one cache per endpoint.
#[derive(Debug)]
pub struct CachedStatsClient {
    client: StatsClient,
    stats: QueryCache<(StatsFilters, bool), StatsResponse>,
    daily: QueryCache<StatsFilters, Vec<DailyStats>>,
    projects: QueryCache<String, Vec<Project>>,
}

impl CachedStatsClient {
    pub fn new(client: StatsClient) -> Self {
        Self {
            client,
            stats: QueryCache::new(CachePolicy::STATS),
            daily: QueryCache::new(CachePolicy::STATS),
            projects: QueryCache::new(CachePolicy::PROJECTS),
        }
    }

    pub fn client(&self) -> &StatsClient {
        &self.client
    }

    pub async fn fetch_stats(
        &self,
        filters: &StatsFilters,
        include_comparison: bool,
    ) -> ClientResult<StatsResponse> {
        self.stats
            .get_or_fetch((filters.clone(), include_comparison), || {
                self.client.fetch_stats(filters, include_comparison)
            })
            .await
    }

    pub async fn fetch_daily_stats(&self, filters: &StatsFilters) -> ClientResult<Vec<DailyStats>> {
        self.daily
            .get_or_fetch(filters.clone(), || self.client.fetch_daily_stats(filters))
            .await
    }

    pub async fn fetch_projects(&self, user_id: &str) -> ClientResult<Vec<Project>> {
        self.projects
            .get_or_fetch(user_id.to_string(), || self.client.fetch_projects(user_id))
            .await
    }

    /// Forget everything, e.g. after new outreach was recorded.
    pub fn invalidate_all(&self) {
        self.stats.clear();
        self.daily.clear();
        self.projects.clear();
    }
}
