//! Query fan-out: variants, per-query outcomes, pool accumulation.
//!
//! For one concept the engine runs a fixed set of differently-phrased
//! queries against the backend and folds the outcomes into a single
//! deduplicated candidate pool. Each query is an independent failure
//! domain: a failed variant is logged and skipped, and a concept where
//! every variant fails simply produces an empty pool.

use std::collections::HashSet;
use std::time::Duration;

use tokio::time::{sleep, timeout};

use crate::backend::SearchBackend;
use crate::cache::QueryCache;
use crate::config::DiscoveryConfig;
use crate::error::SearchError;
use crate::types::RawHit;
use crate::url_normalize::normalize_url;

/// Build the fixed query variants for a concept, in execution order.
pub fn query_variants(concept_name: &str) -> [String; 5] {
    [
        format!("{concept_name} tutorial"),
        format!("learn {concept_name}"),
        format!("{concept_name} documentation"),
        format!("{concept_name} course"),
        format!("{concept_name} getting started guide"),
    ]
}

/// The outcome of a single query variant.
///
/// The fold over outcomes decides what survives; nothing upstream of the
/// fold aborts on a failed variant.
#[derive(Debug)]
pub struct QueryOutcome {
    /// The query string that was executed.
    pub query: String,
    /// Hits on success, or the reason this variant was skipped.
    pub outcome: Result<Vec<RawHit>, SearchError>,
}

/// Statistics from pool accumulation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Variants that failed and were skipped.
    pub queries_failed: usize,
    /// Raw hits seen across all successful variants.
    pub hits_seen: usize,
    /// Hits dropped for an empty URL or title.
    pub invalid: usize,
    /// Hits dropped as duplicates (first occurrence wins).
    pub duplicate: usize,
}

/// Run every variant for one concept and fold the outcomes into a pool.
///
/// Successful results are cached; cache hits skip both the network call
/// and the courtesy delay. Every networked call is bounded by the
/// configured timeout so a hanging backend cannot stall the pipeline.
pub async fn gather_pool<B: SearchBackend>(
    backend: &B,
    cache: &QueryCache,
    concept_name: &str,
    config: &DiscoveryConfig,
) -> (Vec<RawHit>, PoolStats) {
    let mut outcomes = Vec::new();

    for query in query_variants(concept_name) {
        if let Some(hits) = cache.get(&query).await {
            tracing::trace!(%query, count = hits.len(), "query served from cache");
            outcomes.push(QueryOutcome {
                query,
                outcome: Ok(hits),
            });
            continue;
        }

        let outcome = run_query(backend, &query, config).await;
        if let Ok(ref hits) = outcome {
            cache.insert(&query, hits.clone()).await;
        }
        outcomes.push(QueryOutcome { query, outcome });

        if config.query_delay_ms > 0 {
            sleep(Duration::from_millis(config.query_delay_ms)).await;
        }
    }

    fold_outcomes(outcomes)
}

/// Execute one query with the per-call timeout applied.
async fn run_query<B: SearchBackend>(
    backend: &B,
    query: &str,
    config: &DiscoveryConfig,
) -> Result<Vec<RawHit>, SearchError> {
    let limit = Duration::from_secs(config.timeout_seconds);
    match timeout(limit, backend.search(query, config.results_per_query, config)).await {
        Ok(result) => result,
        Err(_) => Err(SearchError::Timeout(format!(
            "query exceeded {}s",
            config.timeout_seconds
        ))),
    }
}

/// Fold per-query outcomes into one candidate pool.
///
/// Failed variants are logged and skipped. Hits with an empty URL or
/// title are dropped; duplicates (by normalised URL) keep the first
/// occurrence.
pub fn fold_outcomes(outcomes: Vec<QueryOutcome>) -> (Vec<RawHit>, PoolStats) {
    let mut stats = PoolStats::default();
    let mut seen: HashSet<String> = HashSet::new();
    let mut pool = Vec::new();

    for QueryOutcome { query, outcome } in outcomes {
        let hits = match outcome {
            Ok(hits) => hits,
            Err(err) => {
                stats.queries_failed += 1;
                tracing::warn!(%query, error = %err, "search query failed; continuing");
                continue;
            }
        };

        tracing::debug!(%query, count = hits.len(), "query returned hits");

        for hit in hits {
            stats.hits_seen += 1;
            if hit.url.is_empty() || hit.title.is_empty() {
                stats.invalid += 1;
                continue;
            }
            if !seen.insert(normalize_url(&hit.url)) {
                stats.duplicate += 1;
                continue;
            }
            pool.push(hit);
        }
    }

    (pool, stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(title: &str, url: &str) -> RawHit {
        RawHit {
            title: title.to_string(),
            url: url.to_string(),
            snippet: String::new(),
        }
    }

    fn ok(query: &str, hits: Vec<RawHit>) -> QueryOutcome {
        QueryOutcome {
            query: query.to_string(),
            outcome: Ok(hits),
        }
    }

    fn failed(query: &str) -> QueryOutcome {
        QueryOutcome {
            query: query.to_string(),
            outcome: Err(SearchError::Http("simulated network error".into())),
        }
    }

    #[test]
    fn variants_are_fixed_and_ordered() {
        let variants = query_variants("Kubernetes");
        assert_eq!(
            variants,
            [
                "Kubernetes tutorial".to_string(),
                "learn Kubernetes".to_string(),
                "Kubernetes documentation".to_string(),
                "Kubernetes course".to_string(),
                "Kubernetes getting started guide".to_string(),
            ]
        );
    }

    #[test]
    fn fold_keeps_first_occurrence_of_duplicate_url() {
        let outcomes = vec![
            ok("q1", vec![hit("First title", "https://example.com/page")]),
            ok("q2", vec![hit("Second title", "https://example.com/page")]),
        ];
        let (pool, stats) = fold_outcomes(outcomes);
        assert_eq!(pool.len(), 1);
        assert_eq!(pool[0].title, "First title");
        assert_eq!(stats.duplicate, 1);
        assert_eq!(stats.hits_seen, 2);
    }

    #[test]
    fn fold_merges_cosmetically_different_urls() {
        let outcomes = vec![
            ok("q1", vec![hit("A", "https://Example.com/page/")]),
            ok("q2", vec![hit("B", "https://example.com/page?utm_source=x")]),
        ];
        let (pool, stats) = fold_outcomes(outcomes);
        assert_eq!(pool.len(), 1);
        assert_eq!(pool[0].title, "A");
        assert_eq!(stats.duplicate, 1);
    }

    #[test]
    fn fold_drops_invalid_hits() {
        let outcomes = vec![ok(
            "q1",
            vec![
                hit("", "https://example.com/a"),
                hit("No URL", ""),
                hit("Fine", "https://example.com/b"),
            ],
        )];
        let (pool, stats) = fold_outcomes(outcomes);
        assert_eq!(pool.len(), 1);
        assert_eq!(pool[0].title, "Fine");
        assert_eq!(stats.invalid, 2);
    }

    #[test]
    fn fold_skips_failed_variants() {
        let outcomes = vec![
            failed("q1"),
            ok("q2", vec![hit("Hit", "https://example.com/x")]),
            failed("q3"),
        ];
        let (pool, stats) = fold_outcomes(outcomes);
        assert_eq!(pool.len(), 1);
        assert_eq!(stats.queries_failed, 2);
    }

    #[test]
    fn fold_with_all_failures_yields_empty_pool() {
        let outcomes = vec![failed("q1"), failed("q2"), failed("q3"), failed("q4"), failed("q5")];
        let (pool, stats) = fold_outcomes(outcomes);
        assert!(pool.is_empty());
        assert_eq!(stats.queries_failed, 5);
    }

    // ── gather_pool against scripted backends ───────────────────────────

    struct AlwaysFails;

    impl SearchBackend for AlwaysFails {
        async fn search(
            &self,
            _query: &str,
            _max_results: usize,
            _config: &DiscoveryConfig,
        ) -> Result<Vec<RawHit>, SearchError> {
            Err(SearchError::Http("simulated network error".into()))
        }
    }

    struct EchoesQuery;

    impl SearchBackend for EchoesQuery {
        async fn search(
            &self,
            query: &str,
            _max_results: usize,
            _config: &DiscoveryConfig,
        ) -> Result<Vec<RawHit>, SearchError> {
            Ok(vec![RawHit {
                title: query.to_string(),
                url: format!("https://example.com/{}", query.replace(' ', "-")),
                snippet: String::new(),
            }])
        }
    }

    fn fast_config() -> DiscoveryConfig {
        DiscoveryConfig {
            query_delay_ms: 0,
            concept_delay_ms: 0,
            cache_ttl_seconds: 0,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn all_variants_failing_yields_empty_pool_without_error() {
        let cache = QueryCache::new(0);
        let (pool, stats) = gather_pool(&AlwaysFails, &cache, "Kubernetes", &fast_config()).await;
        assert!(pool.is_empty());
        assert_eq!(stats.queries_failed, 5);
    }

    #[tokio::test]
    async fn each_variant_contributes_to_the_pool() {
        let cache = QueryCache::new(0);
        let (pool, stats) = gather_pool(&EchoesQuery, &cache, "Rust", &fast_config()).await;
        assert_eq!(pool.len(), 5);
        assert_eq!(stats.hits_seen, 5);
        assert_eq!(stats.duplicate, 0);
    }

    #[tokio::test]
    async fn cached_variants_skip_the_backend() {
        struct CountingBackend(std::sync::atomic::AtomicUsize);

        impl SearchBackend for CountingBackend {
            async fn search(
                &self,
                query: &str,
                _max_results: usize,
                _config: &DiscoveryConfig,
            ) -> Result<Vec<RawHit>, SearchError> {
                self.0.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
                Ok(vec![RawHit {
                    title: query.to_string(),
                    url: format!("https://example.com/{}", query.replace(' ', "-")),
                    snippet: String::new(),
                }])
            }
        }

        let backend = CountingBackend(std::sync::atomic::AtomicUsize::new(0));
        let cache = QueryCache::new(60);
        let config = DiscoveryConfig {
            query_delay_ms: 0,
            ..Default::default()
        };

        let (first, _) = gather_pool(&backend, &cache, "Rust", &config).await;
        let (second, _) = gather_pool(&backend, &cache, "Rust", &config).await;

        assert_eq!(first.len(), second.len());
        assert_eq!(backend.0.load(std::sync::atomic::Ordering::SeqCst), 5);
    }
}
