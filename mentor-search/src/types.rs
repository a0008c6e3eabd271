//! Core data types for concept-driven resource discovery.

use serde::{Deserialize, Serialize};

/// Maximum description length in characters before truncation.
const MAX_DESCRIPTION_CHARS: usize = 200;

/// Source tag for resources found via web search. Reserved for future
/// non-web sources (books, local notes).
pub const SOURCE_WEB: &str = "web";

/// A prerequisite concept to find learning resources for.
///
/// Produced upstream by task analysis and consumed read-only by discovery.
/// `priority` 0 is the most important; lower values sort first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Concept {
    /// Concept or technology name; doubles as the search seed.
    pub name: String,
    /// Classification such as "concept", "technology", "skill", "tool".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Why this prerequisite matters for the task.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Sort key: 0 = must learn first.
    #[serde(default)]
    pub priority: i32,
}

impl Concept {
    /// A bare named concept with no category or description.
    pub fn new(name: impl Into<String>, priority: i32) -> Self {
        Self {
            name: name.into(),
            category: None,
            description: None,
            priority,
        }
    }
}

/// One raw search-backend hit.
///
/// Ephemeral: exists only for the duration of a single discovery call and
/// is never persisted or serialized.
#[derive(Debug, Clone)]
pub struct RawHit {
    /// Result page title.
    pub title: String,
    /// Result URL.
    pub url: String,
    /// Snippet or body text summarising the page.
    pub snippet: String,
}

/// A filtered, scored learning resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningResource {
    /// Page title as returned by the backend.
    pub title: String,
    /// Unique within one concept's result list.
    pub url: String,
    /// Snippet truncated to 200 characters, with an ellipsis marker when cut.
    pub description: String,
    /// Always [`SOURCE_WEB`] for this pipeline.
    pub source: String,
}

impl LearningResource {
    /// Build a resource from an accepted hit, truncating the description.
    pub fn from_hit(hit: RawHit) -> Self {
        Self {
            title: hit.title,
            url: hit.url,
            description: truncate_description(&hit.snippet),
            source: SOURCE_WEB.to_string(),
        }
    }
}

/// The ranked resources found for one concept.
///
/// A batch result is an ordered sequence of these, following the
/// caller-supplied concept priority order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConceptResources {
    /// The concept name the resources were found for.
    pub concept: String,
    /// Best-first resource list, capped at the configured limit.
    pub resources: Vec<LearningResource>,
}

/// Truncate on a character boundary, never inside a code point.
fn truncate_description(snippet: &str) -> String {
    if snippet.chars().count() <= MAX_DESCRIPTION_CHARS {
        return snippet.to_string();
    }
    let mut out: String = snippet.chars().take(MAX_DESCRIPTION_CHARS).collect();
    out.push_str("...");
    out
}
