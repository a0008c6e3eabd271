//! # mentor-search
//!
//! Embedded learning-resource discovery for Mentor.
//!
//! Given a prioritized list of concepts, this crate fans each concept out
//! into several differently-phrased web searches, merges the raw hits into
//! a deduplicated candidate pool, filters the pool through a chain of
//! credibility gates, scores the survivors, and returns the ranked top-N
//! resources per concept.
//!
//! ## Design
//!
//! - The search backend is an injected collaborator ([`SearchBackend`]);
//!   the crate holds no process-global clients.
//! - Query variants are independent failure domains: a failed variant is
//!   logged and skipped, never fatal. A concept with zero surviving
//!   resources is a normal, reportable outcome.
//! - All filtering heuristics (deny lists, language markers, domain value
//!   lists, keyword lists) live in [`curated`] as plain data.
//! - Execution is sequential and throttled by courtesy delays; per-query
//!   timeouts bound a hanging backend.
//!
//! ## Security
//!
//! - No API keys: the bundled backend scrapes a public HTML endpoint.
//! - Queries are logged at trace level only.

pub mod backend;
pub mod backends;
pub mod cache;
pub mod config;
pub mod curated;
pub mod error;
pub mod filter;
pub mod finder;
pub mod http;
pub mod keywords;
pub mod query;
pub mod ranker;
pub mod score;
pub mod types;
pub mod url_normalize;

pub use backend::SearchBackend;
pub use backends::DuckDuckGoBackend;
pub use config::DiscoveryConfig;
pub use error::{Result, SearchError};
pub use finder::ResourceFinder;
pub use types::{Concept, ConceptResources, LearningResource, RawHit};

/// Find ranked learning resources for a single concept using the default
/// web backend.
///
/// # Errors
///
/// Returns [`SearchError::Config`] when `config` is invalid. Backend
/// failures never surface here; they degrade to fewer or no resources.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> mentor_search::Result<()> {
/// let concept = mentor_search::Concept::new("React hooks", 0);
/// let config = mentor_search::DiscoveryConfig::default();
/// let resources = mentor_search::find_resources(&concept, &config).await?;
/// for resource in &resources {
///     println!("{}: {}", resource.title, resource.url);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn find_resources(
    concept: &Concept,
    config: &DiscoveryConfig,
) -> Result<Vec<LearningResource>> {
    let finder = ResourceFinder::new(DuckDuckGoBackend, config.clone())?;
    Ok(finder.find_resources(concept).await)
}

/// Find resources for a prioritized batch of concepts (highest-priority
/// `max_concepts` only) using the default web backend.
///
/// # Errors
///
/// Same as [`find_resources`].
pub async fn find_resources_batch(
    concepts: &[Concept],
    config: &DiscoveryConfig,
) -> Result<Vec<ConceptResources>> {
    let finder = ResourceFinder::new(DuckDuckGoBackend, config.clone())?;
    Ok(finder.find_resources_batch(concepts).await)
}
