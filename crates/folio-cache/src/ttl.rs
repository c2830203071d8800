//! Time-to-live cache over type-erased values.
//!
//! Expired entries are swept whenever a value is stored, so the map holds at
//! most the keys written within the longest live TTL. Keys that embed the
//! current day roll over without piling up.

use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

use crate::clock::{Clock, SystemClock};

struct Entry {
    value: Arc<dyn Any + Send + Sync>,
    expires_at: DateTime<Utc>,
}

/// Keyed cache whose entries expire after a per-call time-to-live.
///
/// Values of any `Clone + Send + Sync + 'static` type can share one cache;
/// a key read back as a different type is treated as a miss. The map lock is
/// held only for the lookup or the store, never while a computation runs.
pub struct TtlCache<C = SystemClock> {
    clock: C,
    entries: Mutex<HashMap<String, Entry>>,
}

impl Default for TtlCache<SystemClock> {
    fn default() -> Self {
        Self::new(SystemClock)
    }
}

impl<C: Clock> TtlCache<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// Return the fresh value stored under `key`, if any.
    pub fn get<T>(&self, key: &str) -> Option<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        let now = self.clock.now();
        let entries = self.lock();
        let entry = entries.get(key)?;
        if entry.expires_at <= now {
            return None;
        }
        entry.value.downcast_ref::<T>().cloned()
    }

    /// Store `value` under `key` for `ttl`, replacing any previous entry and
    /// dropping every entry that has already expired.
    pub fn insert<T>(&self, key: impl Into<String>, value: T, ttl: Duration)
    where
        T: Send + Sync + 'static,
    {
        let now = self.clock.now();
        let expires_at = TimeDelta::from_std(ttl)
            .ok()
            .and_then(|delta| now.checked_add_signed(delta))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        let mut entries = self.lock();
        let swept = sweep(&mut entries, now);
        if swept > 0 {
            tracing::debug!(swept, remaining = entries.len(), "evicted expired cache entries");
        }
        entries.insert(
            key.into(),
            Entry {
                value: Arc::new(value),
                expires_at,
            },
        );
    }

    /// Return the cached value for `key`, or run `compute` and cache its result.
    ///
    /// Errors from `compute` are returned as-is and never cached, so the next
    /// call retries.
    ///
    /// # Errors
    ///
    /// Whatever `compute` returns.
    pub async fn get_or_compute<T, E, F, Fut>(
        &self,
        key: &str,
        ttl: Duration,
        compute: F,
    ) -> Result<T, E>
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(hit) = self.get::<T>(key) {
            tracing::debug!(key, outcome = "hit", "cache lookup");
            return Ok(hit);
        }
        tracing::debug!(key, outcome = "miss", "cache lookup");

        let value = compute().await?;
        self.insert(key, value.clone(), ttl);
        Ok(value)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn sweep(entries: &mut HashMap<String, Entry>, now: DateTime<Utc>) -> usize {
    let before = entries.len();
    entries.retain(|_, entry| entry.expires_at > now);
    before - entries.len()
}
