//! Discovery configuration with sensible defaults.
//!
//! [`DiscoveryConfig`] controls result limits, per-query timeouts, caching,
//! and the courtesy delays that keep the search backend from throttling us.
//! Serde derives let the host application embed this as a TOML config
//! section.

use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// Configuration for a resource-discovery session.
///
/// Use [`Default::default()`] for sensible defaults, or construct with
/// field overrides for custom behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Maximum resources returned per concept after filtering and ranking.
    pub limit_per_concept: usize,
    /// Maximum concepts processed per batch call, taken by priority.
    pub max_concepts: usize,
    /// Results requested from the backend per query variant.
    pub results_per_query: usize,
    /// Courtesy delay in milliseconds after each networked query variant.
    pub query_delay_ms: u64,
    /// Courtesy delay in milliseconds between concepts in a batch.
    pub concept_delay_ms: u64,
    /// Per-query timeout in seconds; an elapsed query is skipped, not fatal.
    pub timeout_seconds: u64,
    /// How long successful query results are cached. 0 disables caching.
    pub cache_ttl_seconds: u64,
    /// Custom User-Agent. `None` rotates through a built-in browser list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            limit_per_concept: 5,
            max_concepts: 10,
            results_per_query: 5,
            query_delay_ms: 500,
            concept_delay_ms: 300,
            timeout_seconds: 8,
            cache_ttl_seconds: 600,
            user_agent: None,
        }
    }
}

impl DiscoveryConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.limit_per_concept == 0 {
            return Err(SearchError::Config(
                "limit_per_concept must be greater than 0".into(),
            ));
        }
        if self.max_concepts == 0 {
            return Err(SearchError::Config(
                "max_concepts must be greater than 0".into(),
            ));
        }
        if self.results_per_query == 0 {
            return Err(SearchError::Config(
                "results_per_query must be greater than 0".into(),
            ));
        }
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_sensible_values() {
        let config = DiscoveryConfig::default();
        assert_eq!(config.limit_per_concept, 5);
        assert_eq!(config.max_concepts, 10);
        assert_eq!(config.results_per_query, 5);
        assert_eq!(config.query_delay_ms, 500);
        assert_eq!(config.concept_delay_ms, 300);
        assert_eq!(config.timeout_seconds, 8);
        assert_eq!(config.cache_ttl_seconds, 600);
        assert!(config.user_agent.is_none());
    }

    #[test]
    fn valid_config_passes_validation() {
        assert!(DiscoveryConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_limit_rejected() {
        let config = DiscoveryConfig {
            limit_per_concept: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("limit_per_concept"));
    }

    #[test]
    fn zero_max_concepts_rejected() {
        let config = DiscoveryConfig {
            max_concepts: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("max_concepts"));
    }

    #[test]
    fn zero_results_per_query_rejected() {
        let config = DiscoveryConfig {
            results_per_query: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("results_per_query"));
    }

    #[test]
    fn zero_timeout_rejected() {
        let config = DiscoveryConfig {
            timeout_seconds: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("timeout_seconds"));
    }

    #[test]
    fn zero_delays_are_valid() {
        let config = DiscoveryConfig {
            query_delay_ms: 0,
            concept_delay_ms: 0,
            cache_ttl_seconds: 0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn deserializes_from_partial_toml() {
        let config: DiscoveryConfig =
            toml::from_str("limit_per_concept = 3\nquery_delay_ms = 0\n").expect("parse");
        assert_eq!(config.limit_per_concept, 3);
        assert_eq!(config.query_delay_ms, 0);
        assert_eq!(config.max_concepts, 10);
    }
}
