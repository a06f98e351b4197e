//! Deterministic profile builder: contact extraction by pattern, summary
//! heuristics, skill extraction, and per-category proficiency scores.
//!
//! Never fails on malformed input. Absence of any signal yields empty or
//! default fields, not errors.

use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;

use crate::matching::extract::{extract_skills, normalize};
use crate::matching::lexicon::{SkillLexicon, SENIORITY_HINTS};
use crate::models::profile::{Contact, Profile, ProfileScores, ScoreEntry, Summary};
use crate::models::skills::SkillCategory;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}").unwrap());
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\+?\d[\d\s().-]{7,}\d").unwrap());
static LINKEDIN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)https?://(www\.)?linkedin\.com/[^\s]+").unwrap());

/// Literal headers that disqualify a line from being the candidate name.
const NAME_HEADERS: &[&str] = &["resume", "curriculum vitae", "cv"];

const DEFAULT_DOMAIN: &str = "technology";
const OVERVIEW: &str =
    "Structured candidate profile created from resume text (deterministic extraction).";

/// Builds a complete profile from extracted resume text.
pub fn build_profile_from_text(raw_text: &str, lexicon: &SkillLexicon) -> Profile {
    let lines: Vec<&str> = raw_text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let mut contact = Contact {
        full_name: pick_name(&lines),
        ..Default::default()
    };
    if let Some(m) = EMAIL_RE.find(raw_text) {
        contact.email = m.as_str().to_string();
    }
    if let Some(m) = PHONE_RE.find(raw_text) {
        contact.phone = m.as_str().trim().to_string();
    }
    if let Some(m) = LINKEDIN_RE.find(raw_text) {
        contact.linkedin = m.as_str().to_string();
    }

    let headline: String = lines.get(1).copied().unwrap_or("").chars().take(120).collect();

    let skills = extract_skills(raw_text, lexicon);

    let haystack = normalize(raw_text);
    let seniority_hits = SENIORITY_HINTS
        .iter()
        .filter(|hint| haystack.contains(*hint))
        .count();

    let score_bucket = |category: SkillCategory| -> ScoreEntry {
        let matched = skills.get(category).len();
        let mut score = (2 + matched).min(10) as f64;
        if seniority_hits >= 2 {
            score = (score + 1.0).min(10.0);
        }
        ScoreEntry {
            score,
            rationale: format!(
                "Matched {matched} keywords in {category}. Seniority hints: {seniority_hits}."
            ),
        }
    };

    let backend = score_bucket(SkillCategory::Backend);
    let frontend = score_bucket(SkillCategory::Frontend);
    let cloud_devops = score_bucket(SkillCategory::CloudDevops);
    let data = score_bucket(SkillCategory::Data);
    let testing = score_bucket(SkillCategory::Testing);

    let overall = crate::matching::engine::round1(
        ((backend.score + frontend.score + cloud_devops.score + data.score + testing.score) / 5.0)
            .min(10.0),
    );

    Profile {
        profile_id: Uuid::new_v4(),
        domain: DEFAULT_DOMAIN.to_string(),
        created_at: Utc::now(),
        contact,
        summary: Summary {
            headline,
            overview: OVERVIEW.to_string(),
        },
        skills,
        experience: Vec::new(),
        education: Vec::new(),
        scores: ProfileScores {
            overall_technical: ScoreEntry {
                score: overall,
                rationale: "Deterministic roll-up of skill buckets.".to_string(),
            },
            backend,
            frontend,
            cloud_devops,
            data,
            testing,
            business: ScoreEntry::default(),
            functional: ScoreEntry::default(),
        },
    }
}

/// The first of the first 12 non-empty lines that is not an email line,
/// not longer than 80 characters, and not a literal resume header.
/// Falls back to "Candidate".
fn pick_name(lines: &[&str]) -> String {
    lines
        .iter()
        .take(12)
        .find(|line| {
            !line.contains('@')
                && line.chars().count() <= 80
                && !NAME_HEADERS.contains(&line.to_lowercase().as_str())
        })
        .map(|line| line.to_string())
        .unwrap_or_else(|| "Candidate".to_string())
}
