//! Filtering gates for candidate hits.
//!
//! Each gate is a pure function over the lowercased URL/title and the
//! concept keywords, so every rule is testable in isolation. The gate
//! ordering (cheapest first, short-circuit on the first failure) lives in
//! [`crate::ranker`]. Gates never error: a hit that cannot be evaluated
//! fails the gate and is dropped.

use url::Url;

use crate::curated::{
    ALLOWED_TLDS, DENYLIST_MARKERS, HIGH_VALUE_MARKERS, LMS_PATH_MARKERS, MEDIUM_VALUE_MARKERS,
    NON_ENGLISH_MARKERS, QUALITY_GATE_KEYWORDS, TRUSTED_EDUCATIONAL_TLDS,
};
use crate::keywords::ConceptKeywords;

/// Gate 1: curated deny set. Any marker match rejects the hit.
pub fn is_denylisted(url: &str) -> bool {
    DENYLIST_MARKERS.iter().copied().any(|m| url.contains(m))
}

/// Gate 2: non-English heuristic.
///
/// Rejects on known non-English hosts/ccTLD path markers, or when more
/// than 30% of the title's characters fall outside ASCII.
pub fn looks_non_english(url: &str, title: &str) -> bool {
    if NON_ENGLISH_MARKERS.iter().copied().any(|m| url.contains(m)) {
        return true;
    }
    let total = title.chars().count();
    if total == 0 {
        return false;
    }
    let non_ascii = title.chars().filter(|c| !c.is_ascii()).count();
    non_ascii * 10 > total * 3
}

/// Gate 3: lexical relevance to the concept.
///
/// Any of the first 5 primary keywords or first 2 parenthetical keywords
/// as a substring of title or URL, or a trusted educational host suffix.
/// When extraction produced nothing, falls back to the concept-name prefix.
pub fn is_relevant(url: &str, title: &str, keywords: &ConceptKeywords) -> bool {
    if keywords.is_empty() {
        let prefix = keywords.fallback.as_str();
        return !prefix.is_empty() && (title.contains(prefix) || url.contains(prefix));
    }

    let primary_hit = keywords
        .primary
        .iter()
        .take(5)
        .any(|w| title.contains(w.as_str()) || url.contains(w.as_str()));
    let paren_hit = keywords
        .parenthetical
        .iter()
        .take(2)
        .any(|w| title.contains(w.as_str()) || url.contains(w.as_str()));

    primary_hit || paren_hit || host_has_suffix(url, TRUSTED_EDUCATIONAL_TLDS)
}

/// Gate 4: quality/credibility.
///
/// Requires a high/medium-value domain match, an educational keyword in
/// the title, or a primary concept keyword in the title, and rejects LMS
/// login/enrollment pages regardless.
pub fn passes_quality_gate(url: &str, title: &str, keywords: &ConceptKeywords) -> bool {
    if has_lms_markers(url, title) {
        return false;
    }

    let domain_match = HIGH_VALUE_MARKERS
        .iter()
        .chain(MEDIUM_VALUE_MARKERS)
        .copied()
        .any(|m| url.contains(m) || title.contains(m));
    let keyword_match = QUALITY_GATE_KEYWORDS
        .iter()
        .copied()
        .any(|k| title.contains(k));
    let concept_match = keywords
        .primary
        .iter()
        .take(3)
        .any(|w| title.contains(w.as_str()));

    domain_match || keyword_match || concept_match
}

/// Gate 5: the permissive TLD allowlist.
pub fn has_allowed_tld(url: &str) -> bool {
    host_has_suffix(url, ALLOWED_TLDS)
}

/// LMS markers in the URL path or the title.
fn has_lms_markers(url: &str, title: &str) -> bool {
    let path = url_path(url);
    LMS_PATH_MARKERS
        .iter()
        .copied()
        .any(|m| path.contains(m) || title.contains(m))
}

/// The portion of the URL after the host. Malformed URLs degrade to
/// whatever follows the third slash, or nothing.
fn url_path(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => url.splitn(4, '/').nth(3).unwrap_or("").to_string(),
    }
}

/// True when the URL parses and its host ends in one of the suffixes.
fn host_has_suffix(url: &str, suffixes: &[&str]) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };
    let Some(host) = parsed.host_str() else {
        return false;
    };
    suffixes.iter().copied().any(|s| host.ends_with(s))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kw(name: &str) -> ConceptKeywords {
        ConceptKeywords::extract(name)
    }

    // ── Gate 1: denylist ────────────────────────────────────────────────

    #[test]
    fn stackoverflow_always_denied() {
        assert!(is_denylisted(
            "https://stackoverflow.com/questions/123/how-to-center-a-div"
        ));
    }

    #[test]
    fn social_networks_denied() {
        assert!(is_denylisted("https://twitter.com/someone/status/1"));
        assert!(is_denylisted("https://www.reddit.com/r/learnprogramming"));
    }

    #[test]
    fn youtube_watch_pages_denied_but_channels_allowed() {
        assert!(is_denylisted("https://www.youtube.com/watch?v=abc"));
        assert!(!is_denylisted("https://www.youtube.com/c/somechannel"));
    }

    #[test]
    fn support_and_help_subdomains_denied() {
        assert!(is_denylisted("https://support.google.com/docs/answer/1"));
        assert!(is_denylisted("https://help.github.com/articles/x"));
    }

    #[test]
    fn regular_hosts_pass_denylist() {
        assert!(!is_denylisted("https://www.freecodecamp.org/news/react-hooks/"));
    }

    // ── Gate 2: non-English heuristic ───────────────────────────────────

    #[test]
    fn known_non_english_hosts_rejected() {
        assert!(looks_non_english("https://zhihu.com/question/1", "any title"));
        assert!(looks_non_english("https://docs.example.cn/intro", "any title"));
    }

    #[test]
    fn mostly_non_ascii_title_rejected() {
        assert!(looks_non_english(
            "https://example.com/guide",
            "программирование на питоне"
        ));
    }

    #[test]
    fn ascii_title_passes() {
        assert!(!looks_non_english(
            "https://example.com/guide",
            "python tutorial"
        ));
    }

    #[test]
    fn sparse_accents_tolerated() {
        // One accented char in a long ASCII title stays under the 30% bound.
        assert!(!looks_non_english(
            "https://example.com",
            "a tutorial on café apps in python"
        ));
    }

    #[test]
    fn empty_title_not_flagged_non_english() {
        assert!(!looks_non_english("https://example.com", ""));
    }

    // ── Gate 3: relevance ───────────────────────────────────────────────

    #[test]
    fn keyword_in_title_is_relevant() {
        assert!(is_relevant(
            "https://example.com/post/1",
            "question about django views",
            &kw("Django")
        ));
    }

    #[test]
    fn keyword_in_url_is_relevant() {
        assert!(is_relevant(
            "https://example.com/django/intro",
            "a web framework walkthrough",
            &kw("Django")
        ));
    }

    #[test]
    fn parenthetical_keyword_counts() {
        assert!(is_relevant(
            "https://numpy.org/doc/stable",
            "numpy reference",
            &kw("Python ML ecosystem (NumPy, Matplotlib)")
        ));
    }

    #[test]
    fn only_first_five_primary_keywords_considered() {
        let keywords = ConceptKeywords {
            primary: vec![
                "alpha".into(),
                "beta".into(),
                "gamma".into(),
                "delta".into(),
                "epsilon".into(),
                "zeta".into(),
            ],
            parenthetical: vec![],
            fallback: String::new(),
        };
        assert!(!is_relevant(
            "https://example.com/zeta",
            "zeta only",
            &keywords
        ));
    }

    #[test]
    fn unrelated_hit_is_irrelevant() {
        assert!(!is_relevant(
            "https://example.com/cooking",
            "sourdough for beginners",
            &kw("Kubernetes")
        ));
    }

    #[test]
    fn trusted_educational_host_is_relevant() {
        assert!(is_relevant(
            "https://cs.stanford.edu/syllabus",
            "course syllabus",
            &kw("Kubernetes")
        ));
    }

    #[test]
    fn fallback_prefix_used_when_no_keywords() {
        let keywords = kw("the and");
        assert!(keywords.is_empty());
        assert!(is_relevant(
            "https://example.com/x",
            "all about the and keyword",
            &keywords
        ));
    }

    // ── Gate 4: quality ─────────────────────────────────────────────────

    #[test]
    fn high_value_domain_passes() {
        assert!(passes_quality_gate(
            "https://www.freecodecamp.org/news/react-hooks/",
            "react hooks explained",
            &kw("React")
        ));
    }

    #[test]
    fn educational_keyword_in_title_passes() {
        assert!(passes_quality_gate(
            "https://someblog.example.com/post",
            "an introduction to containers",
            &kw("Kubernetes")
        ));
    }

    #[test]
    fn concept_keyword_in_title_passes() {
        assert!(passes_quality_gate(
            "https://example.com/q/123",
            "question about django views",
            &kw("Django")
        ));
    }

    #[test]
    fn nothing_educational_fails() {
        assert!(!passes_quality_gate(
            "https://example.com/django/thread/9",
            "forum thread 9481",
            &kw("Django")
        ));
    }

    #[test]
    fn lms_path_rejected_even_on_allowed_domain() {
        assert!(!passes_quality_gate(
            "https://university.example.com/moodle/view.php",
            "python tutorial",
            &kw("Python")
        ));
        assert!(!passes_quality_gate(
            "https://courses.example.com/course/index.php?id=7",
            "python tutorial",
            &kw("Python")
        ));
    }

    #[test]
    fn login_marker_in_title_rejected() {
        assert!(!passes_quality_gate(
            "https://example.com/portal",
            "login to view your python course",
            &kw("Python")
        ));
    }

    // ── Gate 5: TLD allowlist ───────────────────────────────────────────

    #[test]
    fn common_tlds_allowed() {
        assert!(has_allowed_tld("https://example.com/a"));
        assert!(has_allowed_tld("https://example.org/b"));
        assert!(has_allowed_tld("https://example.io/c"));
        assert!(has_allowed_tld("https://react.dev/learn"));
        assert!(has_allowed_tld("https://www.bbc.co.uk/guides"));
    }

    #[test]
    fn other_tlds_rejected() {
        assert!(!has_allowed_tld("https://example.xyz/a"));
        assert!(!has_allowed_tld("https://example.de/b"));
    }

    #[test]
    fn unparseable_url_fails_tld_gate() {
        assert!(!has_allowed_tld("not a url"));
    }

    #[test]
    fn tld_must_be_host_suffix_not_substring() {
        // ".com" appears in the path, but the host TLD is .de.
        assert!(!has_allowed_tld("https://example.de/download.com.html"));
    }
}
