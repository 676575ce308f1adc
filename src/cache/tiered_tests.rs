use std::time::Duration;

use serde_json::json;

use super::memory::BoundedMemoryTier;
use super::mock::MockSharedTier;
use super::tier::CacheTier;
use super::tiered::TieredCache;
use crate::hashing::{KeyArgs, make_key};

fn query_args(q: &str) -> KeyArgs {
    KeyArgs::new().named("q", q)
}

fn two_tier_cache() -> (TieredCache, MockSharedTier) {
    let shared = MockSharedTier::new();
    let cache = TieredCache::new(vec![
        Box::new(BoundedMemoryTier::new(16, Duration::from_secs(60))),
        Box::new(shared.clone()),
    ]);
    (cache, shared)
}

#[tokio::test]
async fn test_tiered_get_miss() {
    let (cache, _shared) = two_tier_cache();

    let value = cache
        .get("llm_response", &query_args("unknown"))
        .await
        .expect("get");

    assert!(value.is_none());

    let stats = cache.stats();
    assert_eq!(stats.hits, 0);
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.total_requests, 1);
    assert_eq!(stats.hit_rate, 0.0);
}

#[tokio::test]
async fn test_tiered_set_then_get_hits_fastest_tier() {
    let (cache, _shared) = two_tier_cache();
    let args = query_args("a");

    cache
        .set("retrieval", &json!(42), Duration::from_secs(10), &args)
        .await
        .expect("set");

    let value = cache.get("retrieval", &args).await.expect("get");
    assert_eq!(value, Some(json!(42)));

    let stats = cache.stats();
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.hits_per_tier, vec![1, 0]);
}

#[tokio::test]
async fn test_tiered_fan_out_writes_every_tier() {
    let (cache, shared) = two_tier_cache();
    let args = query_args("a");

    cache
        .set("retrieval", &json!({"docs": [1, 2]}), Duration::from_secs(10), &args)
        .await
        .expect("set");

    // Each tier independently round-trips the value.
    let key = make_key("retrieval", &args).expect("key");
    assert!(shared.contains(&key));
    assert_eq!(
        shared.get(&key).await.expect("shared get"),
        Some(json!({"docs": [1, 2]}))
    );
}

#[tokio::test]
async fn test_tiered_promotion_from_slower_tier() {
    let (cache, shared) = two_tier_cache();
    let args = query_args("promoted");
    let key = make_key("llm_response", &args).expect("key");

    // Seed only the slow tier, as if another instance had written it.
    shared
        .set(&key, &json!("answer"), Duration::from_secs(60))
        .await
        .expect("seed shared");

    let value = cache.get("llm_response", &args).await.expect("get");
    assert_eq!(value, Some(json!("answer")));
    assert_eq!(cache.stats().hits_per_tier, vec![0, 1]);

    // The hit was promoted: the next lookup lands in the memory tier.
    let value = cache.get("llm_response", &args).await.expect("get");
    assert_eq!(value, Some(json!("answer")));
    assert_eq!(cache.stats().hits_per_tier, vec![1, 1]);
}

#[tokio::test]
async fn test_tiered_unreachable_tier_reads_as_miss() {
    let shared = MockSharedTier::new();
    let backing = MockSharedTier::new();
    let cache = TieredCache::new(vec![Box::new(shared.clone()), Box::new(backing.clone())]);

    let args = query_args("degraded");
    let key = make_key("retrieval", &args).expect("key");
    backing
        .set(&key, &json!("still here"), Duration::from_secs(60))
        .await
        .expect("seed");

    shared.set_down(true);

    // The dead first tier is skipped; the promotion write into it fails
    // without affecting the returned value.
    let value = cache.get("retrieval", &args).await.expect("get");
    assert_eq!(value, Some(json!("still here")));
    assert_eq!(cache.stats().hits_per_tier, vec![0, 1]);
}

#[tokio::test]
async fn test_tiered_partial_write_failure_is_silent() {
    let (cache, shared) = two_tier_cache();
    shared.set_down(true);

    let args = query_args("partial");
    cache
        .set("retrieval", &json!("v"), Duration::from_secs(10), &args)
        .await
        .expect("set never raises on tier failure");

    // The healthy memory tier still serves the key.
    let value = cache.get("retrieval", &args).await.expect("get");
    assert_eq!(value, Some(json!("v")));
    assert_eq!(cache.stats().hits_per_tier, vec![1, 0]);
}

#[tokio::test]
async fn test_tiered_delete_removes_from_all_tiers() {
    let (cache, shared) = two_tier_cache();
    let args = query_args("gone");

    cache
        .set("retrieval", &json!("v"), Duration::from_secs(10), &args)
        .await
        .expect("set");
    cache.delete("retrieval", &args).await.expect("delete");

    assert!(cache.get("retrieval", &args).await.expect("get").is_none());
    assert!(shared.is_empty());
}

#[tokio::test]
async fn test_tiered_stats_invariants() {
    let (cache, _shared) = two_tier_cache();
    let hit_args = query_args("hit");

    cache
        .set("retrieval", &json!(1), Duration::from_secs(10), &hit_args)
        .await
        .expect("set");

    for _ in 0..3 {
        cache.get("retrieval", &hit_args).await.expect("get");
    }
    for i in 0..2 {
        cache
            .get("retrieval", &query_args(&format!("miss-{i}")))
            .await
            .expect("get");
    }

    let stats = cache.stats();
    assert_eq!(stats.hits + stats.misses, 5);
    assert_eq!(stats.total_requests, 5);
    assert_eq!(stats.hits_per_tier.iter().sum::<u64>(), stats.hits);
    assert!((stats.hit_rate - 0.6).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_tiered_reset_stats() {
    let (cache, _shared) = two_tier_cache();

    cache
        .get("retrieval", &query_args("x"))
        .await
        .expect("get");
    assert_eq!(cache.stats().misses, 1);

    cache.reset_stats();

    let stats = cache.stats();
    assert_eq!(stats.hits, 0);
    assert_eq!(stats.misses, 0);
    assert_eq!(stats.hits_per_tier, vec![0, 0]);
    assert_eq!(stats.hit_rate, 0.0);
}

#[tokio::test]
async fn test_tiered_no_tiers_still_functions() {
    let cache = TieredCache::new(Vec::new());
    let args = query_args("x");

    cache
        .set("retrieval", &json!(1), Duration::from_secs(10), &args)
        .await
        .expect("set");
    assert!(cache.get("retrieval", &args).await.expect("get").is_none());
    assert_eq!(cache.stats().misses, 1);
}

#[tokio::test]
async fn test_tiered_key_error_propagates() {
    let (cache, _shared) = two_tier_cache();

    let mut bad = std::collections::BTreeMap::new();
    bad.insert((1u8, 2u8), "v");
    let args = KeyArgs::new().arg(bad);

    assert!(cache.get("retrieval", &args).await.is_err());
    assert!(
        cache
            .set("retrieval", &json!(1), Duration::from_secs(1), &args)
            .await
            .is_err()
    );
    assert!(cache.delete("retrieval", &args).await.is_err());

    // A failed key derivation never reaches the counters.
    assert_eq!(cache.stats().total_requests, 0);
}

#[tokio::test]
async fn test_tiered_tier_names_in_probe_order() {
    let (cache, _shared) = two_tier_cache();
    assert_eq!(cache.tier_names(), vec!["memory", "shared"]);
    assert_eq!(cache.tier_count(), 2);
}
