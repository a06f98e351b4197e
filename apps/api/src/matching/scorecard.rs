//! Scorecard and insight builder: business/functional signal scores,
//! industry-vertical inference, and narrative pros/cons/differentiators
//! derived from a profile and a match breakdown.
//!
//! No failure modes: absent breakdown data yields empty lists.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::matching::engine::{round1, top_matches, MatchBreakdown, CATEGORY_WEIGHTS};
use crate::models::jd::JobDescription;
use crate::models::profile::{Profile, ScoreEntry};
use crate::models::skills::SkillCategory;

// Signal terms are matched as substrings of the lowercased profile text.
// Lists are kept verbatim from the scoring table they were calibrated
// against, including the two upper-cased terms that can never hit;
// lowercasing those would change functional scores ("sit" occurs inside
// "position").
const BUSINESS_SIGNALS: &[&str] = &[
    "stakeholder",
    "client",
    "lead",
    "leadership",
    "roadmap",
    "strategy",
    "governance",
    "budget",
    "pmo",
    "presentation",
    "mentored",
    "managed",
];

const FUNCTIONAL_SIGNALS: &[&str] = &[
    "requirements",
    "process",
    "workshop",
    "fit-to-standard",
    "fts",
    "user story",
    "backlog",
    "functional",
    "business process",
    "acceptance",
    "uAT",
    "SIT",
];

/// Industry keyword groups in priority order. The scan keeps the first
/// maximum, so declaration order is the deterministic tie-break.
const VERTICAL_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "SAP / ERP",
        &[
            "sap", "s/4", "s4hana", "s/4hana", "abap", "fiori", "bw", "hana", "idoc", "mm", "fi",
            "co", "sd", "pp",
        ],
    ),
    (
        "FinTech / Banking",
        &[
            "bank", "banking", "fintech", "trading", "broker", "payment", "pci", "swift", "aml",
            "kyc",
        ],
    ),
    (
        "Healthcare",
        &[
            "health", "clinical", "ehr", "emr", "hipaa", "hospital", "patient", "pharma",
        ],
    ),
    (
        "Retail / eCommerce",
        &[
            "retail",
            "ecommerce",
            "shopify",
            "cart",
            "checkout",
            "order",
            "fulfillment",
        ],
    ),
    (
        "Telecom / ISP",
        &["telecom", "isp", "network", "carrier", "routing", "fiber"],
    ),
    (
        "Construction",
        &[
            "construction",
            "jobsite",
            "project controls",
            "cost codes",
            "subcontractor",
            "bid",
        ],
    ),
    (
        "SaaS / Product",
        &["saas", "multi-tenant", "subscription", "product", "roadmap"],
    ),
];

const PROS_ORDER: &[SkillCategory] = &[
    SkillCategory::Languages,
    SkillCategory::Backend,
    SkillCategory::Frontend,
    SkillCategory::CloudDevops,
    SkillCategory::Data,
    SkillCategory::Testing,
];

const GAPS_ORDER: &[SkillCategory] = &[
    SkillCategory::Backend,
    SkillCategory::Frontend,
    SkillCategory::CloudDevops,
    SkillCategory::Data,
    SkillCategory::Testing,
    SkillCategory::Languages,
];

const DIFFERENTIATOR_ORDER: &[SkillCategory] = &[
    SkillCategory::CloudDevops,
    SkillCategory::Testing,
    SkillCategory::Security,
    SkillCategory::Data,
    SkillCategory::Backend,
    SkillCategory::Frontend,
    SkillCategory::Languages,
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateRef {
    pub full_name: String,
    pub email: String,
    pub location: String,
    pub headline: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JdRef {
    pub jd_id: Uuid,
    pub company: String,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScorecardScores {
    pub technical: ScoreEntry,
    pub business: ScoreEntry,
    pub functional: ScoreEntry,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerticalInference {
    pub primary: String,
    pub signals: Vec<String>,
}

/// Human-facing synthesis of a (profile, JD, breakdown) triple. Derived
/// on demand, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scorecard {
    pub profile_id: Uuid,
    pub candidate: CandidateRef,
    pub jd: JdRef,
    pub scores_out_of_10: ScorecardScores,
    pub vertical: VerticalInference,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub differentiators: Vec<String>,
    pub gaps: Vec<String>,
    pub match_score: f64,
    pub top_matches: Vec<String>,
}

/// Narrative rollup of one match: alignment lines, gap lines, and a
/// drafted client recommendation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchExplanation {
    pub match_score: f64,
    pub top_matches: Vec<String>,
    pub notable_gaps: Vec<String>,
    pub client_excerpt: String,
    pub draft_client_email: String,
}

pub fn build_scorecard(
    profile: &Profile,
    jd: &JobDescription,
    match_score: f64,
    breakdown: &MatchBreakdown,
) -> Scorecard {
    let technical = ScoreEntry {
        score: round1(match_score / 10.0).min(10.0),
        rationale: "Derived from JD coverage match score.".to_string(),
    };
    let (business, functional) = score_business_functional(profile);
    let vertical = infer_vertical(profile);

    let mut pros = Vec::new();
    for &category in PROS_ORDER {
        if let Some(part) = breakdown.get(&category) {
            if !part.matched.is_empty() {
                pros.push(skill_line(category, &part.matched, 8));
            }
        }
    }
    pros.truncate(5);

    let mut gaps = Vec::new();
    for &category in GAPS_ORDER {
        if let Some(part) = breakdown.get(&category) {
            if !part.missing.is_empty() {
                gaps.push(skill_line(category, &part.missing, 8));
            }
        }
    }
    gaps.truncate(5);

    let mut differentiators = Vec::new();
    for &category in DIFFERENTIATOR_ORDER {
        let ps: BTreeSet<&str> = profile.skills.get(category).iter().map(String::as_str).collect();
        let js: BTreeSet<&str> = jd.skills.get(category).iter().map(String::as_str).collect();
        let extra: Vec<String> = ps.difference(&js).map(|s| s.to_string()).collect();
        if !extra.is_empty() {
            differentiators.push(skill_line(category, &extra, 8));
        }
    }
    differentiators.truncate(4);

    let cons: Vec<String> = gaps
        .iter()
        .take(3)
        .map(|line| format!("Missing/unclear: {line}"))
        .collect();

    Scorecard {
        profile_id: profile.profile_id,
        candidate: CandidateRef {
            full_name: profile.contact.full_name.clone(),
            email: profile.contact.email.clone(),
            location: profile.contact.location.clone(),
            headline: profile.summary.headline.clone(),
        },
        jd: JdRef {
            jd_id: jd.jd_id,
            company: jd.company.clone(),
            title: jd.title.clone(),
        },
        scores_out_of_10: ScorecardScores {
            technical,
            business,
            functional,
        },
        vertical,
        pros,
        cons,
        differentiators,
        gaps,
        match_score,
        top_matches: top_matches(breakdown, 10),
    }
}

/// Counts occurrences (not just presence) of each group's keywords in
/// the flattened profile text; the winning group names the vertical.
/// A winning count of zero reports "General Technology" with no signals.
pub fn infer_vertical(profile: &Profile) -> VerticalInference {
    let text = flatten_profile_text(profile);

    let mut best: (&str, usize) = ("General", 0);
    for (vertical, keywords) in VERTICAL_KEYWORDS {
        let count: usize = keywords.iter().map(|k| text.matches(k).count()).sum();
        if count > best.1 {
            best = (vertical, count);
        }
    }

    if best.1 == 0 {
        return VerticalInference {
            primary: "General Technology".to_string(),
            signals: Vec::new(),
        };
    }

    let keywords = VERTICAL_KEYWORDS
        .iter()
        .find(|(v, _)| *v == best.0)
        .map(|(_, k)| *k)
        .unwrap_or_default();
    let mut signals = Vec::new();
    for keyword in keywords {
        if text.contains(keyword) {
            signals.push(keyword.to_string());
        }
        if signals.len() >= 6 {
            break;
        }
    }

    VerticalInference {
        primary: best.0.to_string(),
        signals,
    }
}

/// Maps signal-term presence counts to 0-10 scores with a soft cap.
pub fn score_business_functional(profile: &Profile) -> (ScoreEntry, ScoreEntry) {
    let text = flatten_profile_text(profile);
    let business = signal_score(&text, BUSINESS_SIGNALS);
    let functional = signal_score(&text, FUNCTIONAL_SIGNALS);
    (business, functional)
}

fn signal_score(text: &str, signals: &[&str]) -> ScoreEntry {
    let present: Vec<&str> = signals.iter().filter(|s| text.contains(**s)).copied().collect();
    let score = (3.0 + present.len() as f64 * 1.2).round().min(10.0);
    ScoreEntry {
        score,
        rationale: format!(
            "Signals found: {}",
            present.iter().take(6).copied().collect::<Vec<_>>().join(", ")
        ),
    }
}

pub fn build_explanation(
    profile: &Profile,
    jd: &JobDescription,
    match_score: f64,
    breakdown: &MatchBreakdown,
) -> MatchExplanation {
    let mut matched_lines = Vec::new();
    let mut gap_lines = Vec::new();
    for &(category, _) in CATEGORY_WEIGHTS {
        if let Some(part) = breakdown.get(&category) {
            if !part.matched.is_empty() {
                matched_lines.push(skill_line(category, &part.matched, 8));
            }
            if !part.missing.is_empty() {
                gap_lines.push(skill_line(category, &part.missing, 6));
            }
        }
    }

    let name = &profile.contact.full_name;
    let overlap_summary = if matched_lines.is_empty() {
        "core skill alignment".to_string()
    } else {
        matched_lines
            .iter()
            .take(4)
            .cloned()
            .collect::<Vec<_>>()
            .join("; ")
    };
    let client_excerpt = format!(
        "{name} is a strong match for the role based on aligned technical stack. \
         Top overlaps include: {overlap_summary}."
    );

    let alignment = if matched_lines.is_empty() {
        "Aligned with core requirements".to_string()
    } else {
        matched_lines.iter().take(5).cloned().collect::<Vec<_>>().join("\n- ")
    };
    let gap_summary = if gap_lines.is_empty() {
        "None identified from keyword matching".to_string()
    } else {
        gap_lines.iter().take(3).cloned().collect::<Vec<_>>().join("\n- ")
    };
    let draft_client_email = format!(
        "Subject: Candidate Recommendation - {name}\n\n\
         Hi,\n\n\
         Based on the job description '{title}' at {company}, we recommend {name} for \
         interview consideration. Match score: {match_score}/100.\n\n\
         Key alignment:\n- {alignment}\n\n\
         Potential gaps to validate:\n- {gap_summary}\n\n\
         Contact: {email}\n\nBest,\nThe VetStack Team",
        title = jd.title,
        company = jd.company,
        email = profile.contact.email,
    );

    matched_lines.truncate(6);
    gap_lines.truncate(4);

    MatchExplanation {
        match_score,
        top_matches: matched_lines,
        notable_gaps: gap_lines,
        client_excerpt,
        draft_client_email,
    }
}

/// Lowercased concatenation of headline, overview, and the experience and
/// education text fields, in document order.
fn flatten_profile_text(profile: &Profile) -> String {
    let mut parts: Vec<&str> = vec![&profile.summary.headline, &profile.summary.overview];
    for exp in &profile.experience {
        parts.push(&exp.company);
        parts.push(&exp.title);
        parts.push(&exp.summary);
        for bullet in &exp.bullets {
            parts.push(bullet);
        }
    }
    for edu in &profile.education {
        parts.push(&edu.school);
        parts.push(&edu.degree);
    }
    parts
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" \n")
        .to_lowercase()
}

fn skill_line(category: SkillCategory, skills: &[String], cap: usize) -> String {
    format!(
        "{category}: {}",
        skills.iter().take(cap).cloned().collect::<Vec<_>>().join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::engine::match_skills;
    use crate::matching::extract::extract_skills;
    use crate::matching::lexicon::SkillLexicon;
    use crate::models::profile::ExperienceEntry;
    use crate::models::skills::SkillSet;
    use crate::profile::builder::build_profile_from_text;
    use chrono::Utc;

    fn profile_from(text: &str) -> Profile {
        build_profile_from_text(text, SkillLexicon::builtin())
    }

    fn jd_from(text: &str) -> JobDescription {
        JobDescription {
            jd_id: Uuid::new_v4(),
            domain: "technology".to_string(),
            company: "Acme".to_string(),
            title: "Backend Engineer".to_string(),
            created_at: Utc::now(),
            jd_text: text.to_string(),
            skills: extract_skills(text, SkillLexicon::builtin()),
        }
    }

    #[test]
    fn test_vertical_with_no_signals_is_general_technology() {
        let mut profile = profile_from("Jane Doe\nEngineer\nI write software.");
        // The stock overview mentions "profile", and "fi" (an SAP term)
        // occurs inside it; blank it to get a keyword-free text.
        profile.summary.overview = String::new();
        let vertical = infer_vertical(&profile);
        assert_eq!(vertical.primary, "General Technology");
        assert!(vertical.signals.is_empty());
    }

    #[test]
    fn test_vertical_counts_occurrences_not_presence() {
        let mut profile = profile_from("Jane Doe\nEngineer");
        profile.experience.push(ExperienceEntry {
            company: "RetailCo".to_string(),
            title: "Engineer".to_string(),
            summary: "retail retail retail checkout".to_string(),
            bullets: vec!["one fintech project".to_string()],
        });
        let vertical = infer_vertical(&profile);
        assert_eq!(vertical.primary, "Retail / eCommerce");
        assert_eq!(vertical.signals, ["retail", "checkout"]);
    }

    #[test]
    fn test_vertical_tie_breaks_by_declaration_order() {
        // One "trading" occurrence and one "clinical" occurrence tie;
        // FinTech / Banking is declared before Healthcare and wins.
        let mut profile = profile_from("Jane Doe\nEngineer");
        profile.summary.overview = String::new();
        profile.experience.push(ExperienceEntry {
            summary: "trading clinical".to_string(),
            ..Default::default()
        });
        assert_eq!(infer_vertical(&profile).primary, "FinTech / Banking");
    }

    #[test]
    fn test_business_functional_floor_is_three() {
        let profile = profile_from("Jane Doe\nEngineer\nquiet text");
        let (business, functional) = score_business_functional(&profile);
        assert_eq!(business.score, 3.0);
        assert_eq!(functional.score, 3.0);
    }

    #[test]
    fn test_business_signals_raise_score() {
        let mut profile = profile_from("Jane Doe\nEngineer");
        profile.experience.push(ExperienceEntry {
            summary: "Presented roadmap to stakeholder groups, managed budget".to_string(),
            ..Default::default()
        });
        let (business, _) = score_business_functional(&profile);
        // 4 signals: 3 + 4 * 1.2 = 7.8 -> 8
        assert_eq!(business.score, 8.0);
        assert!(business.rationale.contains("stakeholder"));
    }

    #[test]
    fn test_uppercase_signal_terms_never_match() {
        let mut profile = profile_from("Jane Doe\nEngineer");
        profile.experience.push(ExperienceEntry {
            summary: "ran UAT and SIT cycles".to_string(),
            ..Default::default()
        });
        let (_, functional) = score_business_functional(&profile);
        assert!(!functional.rationale.contains("uAT"));
        assert!(!functional.rationale.contains("SIT"));
    }

    #[test]
    fn test_scorecard_technical_is_tenth_of_match_score() {
        let profile = profile_from("Jane Doe\nEngineer\nfastapi");
        let jd = jd_from("Need fastapi and django.");
        let (score, breakdown) = match_skills(&profile.skills, &jd.skills);
        let card = build_scorecard(&profile, &jd, score, &breakdown);
        assert_eq!(card.scores_out_of_10.technical.score, round1(score / 10.0));
        assert_eq!(card.match_score, score);
    }

    #[test]
    fn test_scorecard_gaps_and_cons() {
        let profile = profile_from("Jane Doe\nEngineer\nfastapi");
        let jd = jd_from("Need fastapi, django, react, aws, pytest.");
        let (score, breakdown) = match_skills(&profile.skills, &jd.skills);
        let card = build_scorecard(&profile, &jd, score, &breakdown);
        assert!(card.gaps.iter().any(|g| g.starts_with("backend: ")));
        assert!(card.gaps.len() <= 5);
        assert_eq!(card.cons.len(), card.gaps.len().min(3));
        for con in &card.cons {
            assert!(con.starts_with("Missing/unclear: "));
        }
    }

    #[test]
    fn test_scorecard_differentiators_are_profile_extras() {
        let profile = profile_from("Jane Doe\nEngineer\nterraform, oauth, fastapi");
        let jd = jd_from("Need fastapi.");
        let (score, breakdown) = match_skills(&profile.skills, &jd.skills);
        let card = build_scorecard(&profile, &jd, score, &breakdown);
        assert!(card
            .differentiators
            .iter()
            .any(|d| d.starts_with("cloud_devops: ") && d.contains("terraform")));
        assert!(card.differentiators.iter().any(|d| d.starts_with("security: ")));
        assert!(card.differentiators.len() <= 4);
    }

    #[test]
    fn test_scorecard_empty_breakdown_yields_empty_lists() {
        let profile = profile_from("Jane Doe\nEngineer");
        let jd = jd_from("No recognizable terms here.");
        let (score, breakdown) = match_skills(&profile.skills, &jd.skills);
        let card = build_scorecard(&profile, &jd, score, &breakdown);
        assert!(card.pros.is_empty());
        assert!(card.gaps.is_empty());
        assert!(card.cons.is_empty());
    }

    #[test]
    fn test_explanation_embeds_score_and_lines() {
        let profile = profile_from("Jane Doe\nEngineer\nfastapi and python");
        let jd = jd_from("Need fastapi, django, python.");
        let (score, breakdown) = match_skills(&profile.skills, &jd.skills);
        let explanation = build_explanation(&profile, &jd, score, &breakdown);
        assert_eq!(explanation.match_score, score);
        assert!(explanation
            .draft_client_email
            .contains(&format!("Match score: {score}/100")));
        assert!(explanation.top_matches.iter().any(|l| l.contains("fastapi")));
        assert!(explanation.notable_gaps.iter().any(|l| l.contains("django")));
        assert!(explanation.client_excerpt.contains("Jane Doe"));
        assert!(explanation.top_matches.len() <= 6);
        assert!(explanation.notable_gaps.len() <= 4);
    }

    #[test]
    fn test_explanation_with_no_matches_uses_fallback_copy() {
        let profile = profile_from("Jane Doe\nEngineer");
        let jd = jd_from("nothing recognizable");
        let (score, breakdown) = match_skills(&SkillSet::empty(), &jd.skills);
        let explanation = build_explanation(&profile, &jd, score, &breakdown);
        assert!(explanation.client_excerpt.contains("core skill alignment"));
        assert!(explanation
            .draft_client_email
            .contains("Aligned with core requirements"));
    }
}
