//! Discovery entry points: per-concept pipeline and priority-capped batches.
//!
//! [`ResourceFinder`] ties the fan-out engine and the filter/ranker
//! together around an injected backend. Discovery never fails once a
//! finder is constructed: every failure mode degrades to fewer or no
//! resources, so availability wins over completeness.

use std::time::Duration;

use tokio::time::sleep;

use crate::backend::SearchBackend;
use crate::cache::QueryCache;
use crate::config::DiscoveryConfig;
use crate::error::SearchError;
use crate::keywords::ConceptKeywords;
use crate::query;
use crate::ranker;
use crate::types::{Concept, ConceptResources, LearningResource};

/// Concept-driven resource discovery over an injected search backend.
///
/// The backend and the query cache are reused across queries, concepts,
/// and calls; neither holds caller-specific mutable state.
pub struct ResourceFinder<B: SearchBackend> {
    backend: B,
    cache: QueryCache,
    config: DiscoveryConfig,
}

impl<B: SearchBackend> ResourceFinder<B> {
    /// Build a finder, validating the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] when the configuration is invalid.
    pub fn new(backend: B, config: DiscoveryConfig) -> Result<Self, SearchError> {
        config.validate()?;
        let cache = QueryCache::new(config.cache_ttl_seconds);
        Ok(Self {
            backend,
            cache,
            config,
        })
    }

    /// The active discovery configuration.
    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    /// Find ranked learning resources for one concept.
    ///
    /// An empty or whitespace-only concept name yields an empty list, as
    /// does a concept where every query variant failed or every candidate
    /// was filtered out. None of these are errors.
    pub async fn find_resources(&self, concept: &Concept) -> Vec<LearningResource> {
        let name = concept.name.trim();
        if name.is_empty() {
            tracing::debug!("skipping concept with empty name");
            return Vec::new();
        }

        tracing::debug!(concept = name, "searching for resources");

        let keywords = ConceptKeywords::extract(name);
        let (pool, pool_stats) =
            query::gather_pool(&self.backend, &self.cache, name, &self.config).await;
        let (resources, gate_counts) =
            ranker::rank(pool, &keywords, self.config.limit_per_concept);

        if resources.is_empty() {
            tracing::warn!(
                concept = name,
                ?pool_stats,
                ?gate_counts,
                "no resources found"
            );
        } else {
            tracing::debug!(
                concept = name,
                count = resources.len(),
                ?gate_counts,
                "resources found"
            );
        }

        resources
    }

    /// Find resources for a batch of prioritized concepts.
    ///
    /// Concepts are stable-sorted by priority (0 first) and capped at the
    /// configured `max_concepts`; each processed concept gets exactly one
    /// entry in the result, possibly with an empty resource list. A short
    /// delay separates concepts to stay polite to the backend.
    pub async fn find_resources_batch(&self, concepts: &[Concept]) -> Vec<ConceptResources> {
        let mut ordered: Vec<&Concept> = concepts.iter().collect();
        ordered.sort_by_key(|c| c.priority);
        ordered.truncate(self.config.max_concepts);

        let mut results = Vec::with_capacity(ordered.len());
        for (index, concept) in ordered.iter().enumerate() {
            if index > 0 && self.config.concept_delay_ms > 0 {
                sleep(Duration::from_millis(self.config.concept_delay_ms)).await;
            }
            let resources = self.find_resources(concept).await;
            results.push(ConceptResources {
                concept: concept.name.clone(),
                resources,
            });
        }
        results
    }
}
