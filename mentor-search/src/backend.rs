//! Trait seam for pluggable web-search backends.
//!
//! The discovery pipeline owns no process-global client: a backend is
//! injected into [`crate::finder::ResourceFinder`] and reused across
//! queries and concepts. The backend holds no caller-specific mutable
//! state, so sharing it between discovery calls needs no locking here.

use crate::config::DiscoveryConfig;
use crate::error::SearchError;
use crate::types::RawHit;

/// A text-search collaborator.
///
/// Implementations take a query string and a result bound and return raw
/// hits with at least URL/title/snippet populated. They may fail on
/// network or parse errors; the fan-out engine treats each failure as
/// "skip this query", never as a fatal condition.
///
/// All implementations must be `Send + Sync` so a finder can be shared
/// across tasks.
pub trait SearchBackend: Send + Sync {
    /// Perform one search and return parsed hits, best-first.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if the request fails or the response cannot
    /// be parsed.
    fn search(
        &self,
        query: &str,
        max_results: usize,
        config: &DiscoveryConfig,
    ) -> impl std::future::Future<Output = Result<Vec<RawHit>, SearchError>> + Send;
}
