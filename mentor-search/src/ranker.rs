//! Filter, score, rank: the reduction from candidate pool to result list.
//!
//! A pure, stateless pass over one concept's deduplicated hit pool. Gates
//! run cheapest-first and short-circuit; survivors are scored, stably
//! sorted best-first (ties keep first-accepted order), and truncated to
//! the per-concept limit. Per-gate rejection counts are collected for
//! diagnostics; an empty result is a reportable outcome, not an error.

use crate::filter;
use crate::keywords::ConceptKeywords;
use crate::score::score_hit;
use crate::types::{LearningResource, RawHit};

/// Per-concept filtering diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GateCounts {
    /// Hits entering the gate pipeline.
    pub considered: usize,
    /// Rejected by the domain deny set.
    pub denylisted: usize,
    /// Rejected by the non-English heuristic.
    pub non_english: usize,
    /// Rejected by the relevance check.
    pub irrelevant: usize,
    /// Rejected by the quality/credibility gate.
    pub unqualified: usize,
    /// Rejected by the TLD allowlist.
    pub bad_tld: usize,
    /// Survived every gate.
    pub accepted: usize,
}

/// Reduce a deduplicated pool to the ranked top-`limit` resources.
pub fn rank(
    pool: Vec<RawHit>,
    keywords: &ConceptKeywords,
    limit: usize,
) -> (Vec<LearningResource>, GateCounts) {
    let mut counts = GateCounts::default();
    let mut scored: Vec<(i32, LearningResource)> = Vec::new();

    for hit in pool {
        counts.considered += 1;

        let url = hit.url.to_lowercase();
        let title = hit.title.to_lowercase();

        if filter::is_denylisted(&url) {
            counts.denylisted += 1;
            continue;
        }
        if filter::looks_non_english(&url, &title) {
            counts.non_english += 1;
            continue;
        }
        if !filter::is_relevant(&url, &title, keywords) {
            counts.irrelevant += 1;
            continue;
        }
        if !filter::passes_quality_gate(&url, &title, keywords) {
            counts.unqualified += 1;
            continue;
        }
        if !filter::has_allowed_tld(&url) {
            counts.bad_tld += 1;
            continue;
        }

        let score = score_hit(&url, &title, keywords);
        counts.accepted += 1;
        scored.push((score, LearningResource::from_hit(hit)));
    }

    // Stable sort: equal scores keep first-accepted order.
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.truncate(limit);

    (scored.into_iter().map(|(_, r)| r).collect(), counts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kw(name: &str) -> ConceptKeywords {
        ConceptKeywords::extract(name)
    }

    fn hit(title: &str, url: &str) -> RawHit {
        RawHit {
            title: title.to_string(),
            url: url.to_string(),
            snippet: format!("snippet for {title}"),
        }
    }

    #[test]
    fn freecodecamp_hit_accepted_and_well_scored() {
        let pool = vec![hit(
            "React Hooks Tutorial - freeCodeCamp",
            "https://www.freecodecamp.org/news/react-hooks/",
        )];
        let (resources, counts) = rank(pool, &kw("React hooks tutorial"), 5);
        assert_eq!(resources.len(), 1);
        assert_eq!(counts.accepted, 1);
        assert_eq!(resources[0].url, "https://www.freecodecamp.org/news/react-hooks/");
    }

    #[test]
    fn denylisted_host_never_returned_regardless_of_title() {
        let pool = vec![hit(
            "The Perfect React Hooks Tutorial Guide",
            "https://stackoverflow.com/questions/53219113/react-hooks",
        )];
        let (resources, counts) = rank(pool, &kw("React hooks"), 5);
        assert!(resources.is_empty());
        assert_eq!(counts.denylisted, 1);
    }

    #[test]
    fn disallowed_tld_never_returned_even_when_every_other_gate_passes() {
        let pool = vec![hit(
            "Django Tutorial",
            "https://djangotutorial.xyz/getting-started",
        )];
        let (resources, counts) = rank(pool, &kw("Django"), 5);
        assert!(resources.is_empty());
        assert_eq!(counts.bad_tld, 1);
    }

    #[test]
    fn qa_shaped_hit_without_quality_signal_rejected() {
        // Relevant through the URL, but the title carries no educational
        // keyword, no concept keyword, and the host matches no value list.
        let pool = vec![hit("Forum thread 9481", "https://example.com/django/thread/9")];
        let (resources, counts) = rank(pool, &kw("Django"), 5);
        assert!(resources.is_empty());
        assert_eq!(counts.unqualified, 1);
    }

    #[test]
    fn low_quality_title_survives_but_ranks_last() {
        let pool = vec![
            hit("Question about Django views", "https://example.com/q/123"),
            hit(
                "Django documentation",
                "https://docs.djangoproject.com/en/stable/",
            ),
        ];
        let (resources, _) = rank(pool, &kw("Django"), 5);
        assert_eq!(resources.len(), 2);
        assert_eq!(resources[0].url, "https://docs.djangoproject.com/en/stable/");
        assert_eq!(resources[1].url, "https://example.com/q/123");
    }

    #[test]
    fn results_sorted_by_score_descending() {
        let pool = vec![
            hit("some page mentioning rust", "https://example.com/rust-notes"),
            hit("Rust Tutorial - W3Schools", "https://www.w3schools.com/rust/"),
            hit("rust article", "https://medium.com/@x/rust-article"),
        ];
        let (resources, _) = rank(pool, &kw("Rust"), 5);
        assert_eq!(resources[0].url, "https://www.w3schools.com/rust/");
        assert_eq!(resources[1].url, "https://medium.com/@x/rust-article");
        assert_eq!(resources[2].url, "https://example.com/rust-notes");
    }

    #[test]
    fn ties_preserve_first_seen_order() {
        let pool = vec![
            hit("python tutorial one", "https://example.com/first"),
            hit("python tutorial two", "https://example.net/second"),
            hit("python tutorial three", "https://example.org/third"),
        ];
        let (resources, _) = rank(pool, &kw("Python"), 5);
        assert_eq!(resources.len(), 3);
        assert_eq!(resources[0].url, "https://example.com/first");
        assert_eq!(resources[1].url, "https://example.net/second");
        assert_eq!(resources[2].url, "https://example.org/third");
    }

    #[test]
    fn cap_applied_after_ranking() {
        let pool: Vec<RawHit> = (0..8)
            .map(|i| {
                hit(
                    &format!("python tutorial {i}"),
                    &format!("https://example.com/py/{i}"),
                )
            })
            .collect();
        let (resources, counts) = rank(pool, &kw("Python"), 5);
        assert_eq!(resources.len(), 5);
        assert_eq!(counts.accepted, 8);
    }

    #[test]
    fn non_english_hit_rejected() {
        let pool = vec![hit("Python 教程 完全指南 入門", "https://example.com/py")];
        let (resources, counts) = rank(pool, &kw("Python"), 5);
        assert!(resources.is_empty());
        assert_eq!(counts.non_english, 1);
    }

    #[test]
    fn empty_pool_is_a_valid_outcome() {
        let (resources, counts) = rank(Vec::new(), &kw("Python"), 5);
        assert!(resources.is_empty());
        assert_eq!(counts, GateCounts::default());
    }

    #[test]
    fn descriptions_truncated_on_acceptance() {
        let mut long_hit = hit("python tutorial", "https://example.com/py");
        long_hit.snippet = "s".repeat(300);
        let (resources, _) = rank(vec![long_hit], &kw("Python"), 5);
        assert!(resources[0].description.ends_with("..."));
        assert_eq!(resources[0].description.chars().count(), 203);
    }
}
