use super::{AdaptiveReranker, RerankPolicy};
use crate::classifier::QueryComplexity;
use crate::constants::{MODERATE_RERANK_DEPTH, MODERATE_TIME_SAVED_SECS, SIMPLE_TIME_SAVED_SECS};
use crate::engine::MockQueryEngine;

const SIMPLE_QUERY: &str = "price of item X?";
const MODERATE_QUERY: &str = "health coverage versus dental coverage";
const COMPLEX_QUERY: &str = "compare the basic plan against the best alternative";

#[test]
fn test_policy_table_simple() {
    let policy = RerankPolicy::for_complexity(QueryComplexity::Simple, 60);

    assert!(!policy.use_reranker);
    assert_eq!(policy.rerank_depth, 0);
    assert_eq!(policy.estimated_time_saved, SIMPLE_TIME_SAVED_SECS);
}

#[test]
fn test_policy_table_moderate() {
    let policy = RerankPolicy::for_complexity(QueryComplexity::Moderate, 60);

    assert!(policy.use_reranker);
    assert_eq!(policy.rerank_depth, MODERATE_RERANK_DEPTH);
    assert_eq!(policy.estimated_time_saved, MODERATE_TIME_SAVED_SECS);
}

#[test]
fn test_policy_table_moderate_clamps_to_top_k() {
    let policy = RerankPolicy::for_complexity(QueryComplexity::Moderate, 10);
    assert_eq!(policy.rerank_depth, 10);
}

#[test]
fn test_policy_table_complex_uses_full_depth() {
    let policy = RerankPolicy::for_complexity(QueryComplexity::Complex, 60);

    assert!(policy.use_reranker);
    assert_eq!(policy.rerank_depth, 60);
    assert_eq!(policy.estimated_time_saved, 0.0);
}

#[tokio::test]
async fn test_query_passes_policy_to_engine() {
    let engine = MockQueryEngine::new();
    let reranker = AdaptiveReranker::new(engine.clone());

    reranker
        .query(SIMPLE_QUERY, "mix", 60)
        .await
        .expect("query");

    let request = engine.last_request().expect("engine was called");
    assert_eq!(request.query, SIMPLE_QUERY);
    assert_eq!(request.mode, "mix");
    assert_eq!(request.top_k, 60);
    assert_eq!(request.rerank_depth, 0);
    assert!(!request.use_reranker);
}

#[tokio::test]
async fn test_query_metadata_reflects_policy() {
    let engine = MockQueryEngine::new();
    engine.respond_to(COMPLEX_QUERY, "full answer");
    let reranker = AdaptiveReranker::new(engine);

    let result = reranker
        .query(COMPLEX_QUERY, "mix", 40)
        .await
        .expect("query");

    assert_eq!(result.response, "full answer");
    assert_eq!(result.metadata.complexity, QueryComplexity::Complex);
    assert!(result.metadata.use_reranker);
    assert_eq!(result.metadata.rerank_depth, 40);
    assert_eq!(result.metadata.estimated_time_saved, 0.0);
}

#[tokio::test]
async fn test_stats_accumulate_per_complexity() {
    let reranker = AdaptiveReranker::new(MockQueryEngine::new());

    reranker
        .query(SIMPLE_QUERY, "mix", 60)
        .await
        .expect("query");
    reranker
        .query(SIMPLE_QUERY, "mix", 60)
        .await
        .expect("query");
    reranker
        .query(MODERATE_QUERY, "mix", 60)
        .await
        .expect("query");
    reranker
        .query(COMPLEX_QUERY, "mix", 60)
        .await
        .expect("query");

    let stats = reranker.stats();
    assert_eq!(stats.simple_queries, 2);
    assert_eq!(stats.moderate_queries, 1);
    assert_eq!(stats.complex_queries, 1);
    assert_eq!(stats.total_queries, 4);

    let expected_saved = 2.0 * SIMPLE_TIME_SAVED_SECS + MODERATE_TIME_SAVED_SECS;
    assert!((stats.total_time_saved - expected_saved).abs() < f64::EPSILON);
    assert_eq!(stats.simple_pct, Some(50.0));
    assert_eq!(stats.moderate_pct, Some(25.0));
    assert_eq!(stats.complex_pct, Some(25.0));

    let avg = stats.avg_time_saved.expect("average after queries");
    assert!((avg - expected_saved / 4.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_stats_recorded_before_engine_failure() {
    let engine = MockQueryEngine::new();
    engine.set_failing(true);
    let reranker = AdaptiveReranker::new(engine);

    let result = reranker.query(SIMPLE_QUERY, "mix", 60).await;
    assert!(result.is_err());

    // The policy decision was made, so it counts.
    let stats = reranker.stats();
    assert_eq!(stats.simple_queries, 1);
    assert!((stats.total_time_saved - SIMPLE_TIME_SAVED_SECS).abs() < f64::EPSILON);
}

#[test]
fn test_stats_zero_division_guard() {
    let reranker = AdaptiveReranker::new(MockQueryEngine::new());
    let stats = reranker.stats();

    assert_eq!(stats.total_queries, 0);
    assert_eq!(stats.simple_pct, None);
    assert_eq!(stats.moderate_pct, None);
    assert_eq!(stats.complex_pct, None);
    assert_eq!(stats.avg_time_saved, None);
}

#[tokio::test]
async fn test_reset_stats() {
    let reranker = AdaptiveReranker::new(MockQueryEngine::new());

    reranker
        .query(SIMPLE_QUERY, "mix", 60)
        .await
        .expect("query");
    reranker.reset_stats();

    let stats = reranker.stats();
    assert_eq!(stats.total_queries, 0);
    assert_eq!(stats.total_time_saved, 0.0);
}
