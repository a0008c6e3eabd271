//! Keyword extraction from concept names.
//!
//! Concept names arrive in free form, often with parenthetical detail:
//! "Python ML ecosystem (NumPy, Matplotlib, PIL/OpenCV)". The relevance
//! gate and the scorer both need the significant words out of that, split
//! into the main phrase and the parenthetical additions.

use crate::curated::STOP_WORDS;

/// How many characters of the raw name to fall back to when no keywords
/// could be extracted.
const FALLBACK_PREFIX_CHARS: usize = 20;

/// Lowercased keywords extracted from one concept name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConceptKeywords {
    /// Significant words outside parentheses, in original order.
    pub primary: Vec<String>,
    /// Words from the first parenthetical group; `/` and `,` also separate,
    /// tokens of length ≤ 2 are dropped.
    pub parenthetical: Vec<String>,
    /// First characters of the lowercased name, for matching when both
    /// keyword lists come up empty.
    pub fallback: String,
}

impl ConceptKeywords {
    /// Extract keywords from a concept name.
    pub fn extract(concept_name: &str) -> Self {
        let lower = concept_name.to_lowercase();

        let primary = strip_parentheticals(&lower)
            .split_whitespace()
            .filter(|word| !STOP_WORDS.contains(word))
            .map(str::to_string)
            .collect();

        let parenthetical = first_parenthetical(&lower)
            .map(|content| {
                content
                    .replace(['/', ','], " ")
                    .split_whitespace()
                    .filter(|word| word.len() > 2)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let fallback = lower.chars().take(FALLBACK_PREFIX_CHARS).collect::<String>();
        let fallback = fallback.trim().to_string();

        Self {
            primary,
            parenthetical,
            fallback,
        }
    }

    /// True when extraction produced no usable keywords at all.
    pub fn is_empty(&self) -> bool {
        self.primary.is_empty() && self.parenthetical.is_empty()
    }
}

/// Remove every `(…)` span from the text.
fn strip_parentheticals(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut depth = 0usize;
    for c in text.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }
    out
}

/// Content of the first `(…)` group, if any.
fn first_parenthetical(text: &str) -> Option<&str> {
    let open = text.find('(')?;
    let close = text[open + 1..].find(')')?;
    let content = &text[open + 1..open + 1 + close];
    (!content.is_empty()).then_some(content)
}
