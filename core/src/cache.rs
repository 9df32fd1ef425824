//! Explicit read cache for query results.
//!
//! # Design
//! Each key maps to the last successful result plus a stale flag.
//! `invalidate` only marks an entry stale; the old snapshot stays readable
//! until `refetch` replaces it, so a list can keep rendering while the next
//! fetch is in flight or after it fails. There is no expiry and no
//! background refresh: an entry goes stale only when a writer says so.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;

use crate::error::ApiError;

/// Cached queries of the product view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Products,
}

#[derive(Debug)]
struct Entry<V> {
    data: Option<V>,
    stale: bool,
    error: Option<String>,
}

impl<V> Default for Entry<V> {
    fn default() -> Self {
        Self {
            data: None,
            stale: true,
            error: None,
        }
    }
}

#[derive(Debug)]
pub struct QueryCache<K, V> {
    entries: HashMap<K, Entry<V>>,
}

impl<K, V> Default for QueryCache<K, V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash + Copy, V> QueryCache<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last successful result, stale or not.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key).and_then(|entry| entry.data.as_ref())
    }

    /// A key never fetched counts as stale.
    pub fn is_stale(&self, key: &K) -> bool {
        self.entries.get(key).map_or(true, |entry| entry.stale)
    }

    /// Message of the most recent failed fetch, cleared by the next success.
    pub fn error(&self, key: &K) -> Option<&str> {
        self.entries.get(key).and_then(|entry| entry.error.as_deref())
    }

    pub fn invalidate(&mut self, key: &K) {
        if let Some(entry) = self.entries.get_mut(key) {
            entry.stale = true;
        }
    }

    /// Run `fetch` and store its result under `key`.
    ///
    /// On failure the previous data is kept and the entry stays stale.
    pub async fn refetch<F>(&mut self, key: K, fetch: F) -> Result<&V, ApiError>
    where
        F: Future<Output = Result<V, ApiError>>,
    {
        let result = fetch.await;
        let entry = self.entries.entry(key).or_default();
        match result {
            Ok(data) => {
                entry.stale = false;
                entry.error = None;
                Ok(entry.data.insert(data))
            }
            Err(e) => {
                entry.stale = true;
                entry.error = Some(e.user_message());
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_key_is_stale_and_empty() {
        let cache: QueryCache<QueryKey, Vec<u32>> = QueryCache::new();
        assert!(cache.is_stale(&QueryKey::Products));
        assert!(cache.get(&QueryKey::Products).is_none());
        assert!(cache.error(&QueryKey::Products).is_none());
    }

    #[tokio::test]
    async fn refetch_stores_fresh_data() {
        let mut cache = QueryCache::new();
        let data = cache
            .refetch(QueryKey::Products, async { Ok(vec![1, 2]) })
            .await
            .unwrap();
        assert_eq!(data, &vec![1, 2]);
        assert!(!cache.is_stale(&QueryKey::Products));
    }

    #[tokio::test]
    async fn invalidate_keeps_snapshot_but_marks_stale() {
        let mut cache = QueryCache::new();
        cache
            .refetch(QueryKey::Products, async { Ok(vec![1]) })
            .await
            .unwrap();
        cache.invalidate(&QueryKey::Products);
        assert!(cache.is_stale(&QueryKey::Products));
        assert_eq!(cache.get(&QueryKey::Products), Some(&vec![1]));
    }

    #[tokio::test]
    async fn failed_refetch_keeps_previous_data() {
        let mut cache = QueryCache::new();
        cache
            .refetch(QueryKey::Products, async { Ok(vec![1]) })
            .await
            .unwrap();
        let err = cache
            .refetch(QueryKey::Products, async {
                Err(ApiError::Transport("timed out".to_string()))
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
        assert_eq!(cache.get(&QueryKey::Products), Some(&vec![1]));
        assert!(cache.is_stale(&QueryKey::Products));
        assert_eq!(
            cache.error(&QueryKey::Products),
            Some("Network Error: timed out")
        );

        cache
            .refetch(QueryKey::Products, async { Ok(vec![2]) })
            .await
            .unwrap();
        assert!(cache.error(&QueryKey::Products).is_none());
    }
}
