//! Credibility scoring for hits that survived every gate.
//!
//! The score ranks accepted resources; it never decides inclusion. All
//! bonuses are non-cumulative within their list (first match wins), the
//! two concept-keyword bonuses are independently additive, and the final
//! score is floored at zero.

use crate::curated::{
    HIGH_VALUE_MARKERS, LOW_QUALITY_INDICATORS, MEDIUM_VALUE_MARKERS, SCORING_KEYWORDS,
};
use crate::keywords::ConceptKeywords;

/// Score one accepted hit. Expects lowercased URL and title.
pub fn score_hit(url: &str, title: &str, keywords: &ConceptKeywords) -> i32 {
    let mut score = 1;

    if HIGH_VALUE_MARKERS
        .iter()
        .copied()
        .any(|m| url.contains(m) || title.contains(m))
    {
        score += 10;
    }

    if MEDIUM_VALUE_MARKERS
        .iter()
        .copied()
        .any(|m| url.contains(m) || title.contains(m))
    {
        score += 5;
    }

    if SCORING_KEYWORDS.iter().copied().any(|k| title.contains(k)) {
        score += 3;
    }

    if keywords
        .primary
        .iter()
        .take(3)
        .any(|w| title.contains(w.as_str()))
    {
        score += 2;
    }

    if keywords
        .parenthetical
        .iter()
        .take(2)
        .any(|w| title.contains(w.as_str()))
    {
        score += 2;
    }

    if LOW_QUALITY_INDICATORS
        .iter()
        .copied()
        .any(|i| title.contains(i))
    {
        score -= 2;
    }

    score.max(0)
}
