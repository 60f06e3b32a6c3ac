//! Unit tests for the report cache

use super::*;
use std::sync::Arc;

fn create_test_table() -> ReportTemplateTable {
    [("remito", "T1"), ("remito.ACME", "T2")].into_iter().collect()
}

#[test]
fn test_cache_starts_empty() {
    let cache = ReportCache::new();

    assert!(!cache.is_populated());
    assert!(cache.get().is_none());
    assert!(cache.entry().is_none());
}

#[test]
fn test_store_and_get() {
    let cache = ReportCache::new();
    cache.store(create_test_table());

    assert!(cache.is_populated());
    assert_eq!(cache.get().unwrap(), create_test_table());
}

#[test]
fn test_last_store_wins() {
    let cache = ReportCache::new();
    cache.store(create_test_table());
    cache.store(ReportTemplateTable::fallback());

    assert_eq!(cache.get().unwrap(), ReportTemplateTable::fallback());
}

#[test]
fn test_entry_age() {
    let cache = ReportCache::new();
    cache.store(create_test_table());

    let age = cache.entry().unwrap().age();
    assert!(age.is_some());
    assert!(age.unwrap() < Duration::from_secs(5));
}

#[test]
fn test_cache_stats() {
    let cache = ReportCache::new();
    assert_eq!(
        cache.stats(),
        CacheStats { populated: false, hits: 0, misses: 0 }
    );

    cache.get();
    cache.store(create_test_table());
    cache.get();
    cache.get();

    assert_eq!(
        cache.stats(),
        CacheStats { populated: true, hits: 2, misses: 1 }
    );
}

#[test]
fn test_shared_between_threads() {
    let cache = Arc::new(ReportCache::new());

    let writer = {
        let cache = Arc::clone(&cache);
        std::thread::spawn(move || cache.store(create_test_table()))
    };
    writer.join().unwrap();

    assert_eq!(cache.get().unwrap().get("remito.ACME"), Some("T2"));
}
