//! Memoised congestion routes.
//!
//! A `RouteCache` is an ordinary value owned by the caller and passed into
//! [`CongestionModel::shortest_time_cached`](crate::CongestionModel::shortest_time_cached).
//! It never evicts; call [`clear`](RouteCache::clear) when the graph changes.
//!
//! # Concurrency
//!
//! The map sits behind an `RwLock`, so a cache can be shared through an
//! `Arc` by concurrent queries.  Two threads missing on the same key both
//! compute the route and the second insert wins; the results are identical.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};

use log::debug;
use rustc_hash::FxHashMap;

use tp_core::{CacheConfig, NodeId, SnapshotKey, TimeOfDay};

use crate::congestion::{TimedRoute, TrafficSnapshot};

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub(crate) struct RouteKey {
    start:       NodeId,
    goal:        NodeId,
    time_of_day: TimeOfDay,
    traffic:     TrafficSnapshot,
}

impl RouteKey {
    pub(crate) fn new(start: NodeId, goal: NodeId, time_of_day: TimeOfDay, traffic: TrafficSnapshot) -> Self {
        Self { start, goal, time_of_day, traffic }
    }
}

/// Hit/miss counters and current size.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits:    u64,
    pub misses:  u64,
    pub entries: usize,
}

#[derive(Debug, Default)]
pub struct RouteCache {
    key_mode: SnapshotKey,
    entries:  RwLock<FxHashMap<RouteKey, TimedRoute>>,
    hits:     AtomicU64,
    misses:   AtomicU64,
}

impl RouteCache {
    /// Cache keyed on full traffic contents.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &CacheConfig) -> Self {
        Self { key_mode: config.key, ..Self::default() }
    }

    pub fn key_mode(&self) -> SnapshotKey {
        self.key_mode
    }

    pub(crate) fn lookup(&self, key: &RouteKey) -> Option<TimedRoute> {
        let found = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned();
        match found {
            Some(route) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                debug!("route cache hit: {} -> {} ({})", key.start, key.goal, key.time_of_day);
                Some(route)
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    pub(crate) fn store(&self, key: RouteKey, route: TimedRoute) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, route);
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries.write().unwrap_or_else(PoisonError::into_inner).clear();
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits:    self.hits.load(Ordering::Relaxed),
            misses:  self.misses.load(Ordering::Relaxed),
            entries: self.len(),
        }
    }
}
