//! Single-slot report table cache

use parking_lot::RwLock;
use remito_core::report::ReportTemplateTable;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime};

/// Cached table with the time it was stored
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Cached template table
    pub table: ReportTemplateTable,
    /// When the entry was stored
    pub stored_at: SystemTime,
}

impl CacheEntry {
    pub fn new(table: ReportTemplateTable) -> Self {
        Self {
            table,
            stored_at: SystemTime::now(),
        }
    }

    /// Get age of cache entry
    pub fn age(&self) -> Option<Duration> {
        self.stored_at.elapsed().ok()
    }
}

/// Process-wide report table cache
///
/// Starts empty and is filled by the first successful fetch. Entries never
/// expire. Only the slot itself is locked: two callers missing at the same
/// time both fetch and both store, and the last store wins.
#[derive(Debug, Default)]
pub struct ReportCache {
    slot: RwLock<Option<CacheEntry>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ReportCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the cached table, if any
    pub fn get(&self) -> Option<ReportTemplateTable> {
        let table = self.slot.read().as_ref().map(|entry| entry.table.clone());
        let counter = if table.is_some() { &self.hits } else { &self.misses };
        counter.fetch_add(1, Ordering::Relaxed);
        table
    }

    /// Store a freshly fetched table
    pub fn store(&self, table: ReportTemplateTable) {
        *self.slot.write() = Some(CacheEntry::new(table));
    }

    pub fn is_populated(&self) -> bool {
        self.slot.read().is_some()
    }

    /// Snapshot of the current entry
    pub fn entry(&self) -> Option<CacheEntry> {
        self.slot.read().clone()
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            populated: self.is_populated(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Whether a table has been stored
    pub populated: bool,
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that found the slot empty
    pub misses: u64,
}

#[cfg(test)]
mod tests;
