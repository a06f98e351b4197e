//! Match engine: weighted JD-coverage scoring between a profile's skills
//! and a JD's required skills.
//!
//! Scoring philosophy: use JD coverage (matched / required) rather than
//! Jaccard, so a candidate with more skills than the JD asks for is not
//! penalized. Jaccard is still computed as a diagnostic. A category the
//! JD requires nothing in contributes 0 regardless of weight: an empty
//! requirement is not treated as automatically satisfied.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::skills::{SkillCategory, SkillSet};

/// Fixed per-category weights; they sum to 1.0. Declaration order is the
/// order breakdown lines are reported in.
pub const CATEGORY_WEIGHTS: &[(SkillCategory, f64)] = &[
    (SkillCategory::Languages, 0.22),
    (SkillCategory::Backend, 0.22),
    (SkillCategory::Frontend, 0.18),
    (SkillCategory::CloudDevops, 0.18),
    (SkillCategory::Data, 0.12),
    (SkillCategory::Testing, 0.08),
    (SkillCategory::Security, 0.0),
];

/// Category order for surfacing top matched skills to callers.
const TOP_MATCH_ORDER: &[SkillCategory] = &[
    SkillCategory::Languages,
    SkillCategory::Backend,
    SkillCategory::Frontend,
    SkillCategory::CloudDevops,
    SkillCategory::Data,
    SkillCategory::Testing,
    SkillCategory::Security,
];

/// Per-category diagnostics for one match run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub weight: f64,
    /// matched / required, in [0, 1]; 0.0 when the JD requires nothing.
    pub coverage: f64,
    /// Intersection over union, diagnostic only.
    pub jaccard: f64,
    pub matched: Vec<String>,
    pub missing: Vec<String>,
}

pub type MatchBreakdown = BTreeMap<SkillCategory, CategoryBreakdown>;

/// Scores a profile's skills against a JD's required skills.
///
/// Pure and total: empty inputs degenerate to a score of 0.0. The score
/// is `round(100 * sum(weight * coverage), 1)`, bounded to [0, 100].
pub fn match_skills(profile_skills: &SkillSet, jd_skills: &SkillSet) -> (f64, MatchBreakdown) {
    let mut parts = MatchBreakdown::new();
    let mut total = 0.0;

    for &(category, weight) in CATEGORY_WEIGHTS {
        let ps: BTreeSet<&str> = profile_skills
            .get(category)
            .iter()
            .map(String::as_str)
            .collect();
        let js: BTreeSet<&str> = jd_skills.get(category).iter().map(String::as_str).collect();

        let matched: Vec<String> = ps.intersection(&js).map(|s| s.to_string()).collect();
        let missing: Vec<String> = js.difference(&ps).map(|s| s.to_string()).collect();

        let coverage = if js.is_empty() {
            0.0
        } else {
            matched.len() as f64 / js.len() as f64
        };
        total += weight * coverage;

        parts.insert(
            category,
            CategoryBreakdown {
                weight,
                coverage: round3(coverage),
                jaccard: round3(jaccard(&ps, &js)),
                matched,
                missing,
            },
        );
    }

    (round1(total * 100.0), parts)
}

/// Brings the most relevant matched skills to the surface, ordered by
/// category weight, deduplicated across categories, capped at `limit`.
pub fn top_matches(parts: &MatchBreakdown, limit: usize) -> Vec<String> {
    let mut out = Vec::new();
    let mut seen = BTreeSet::new();
    for category in TOP_MATCH_ORDER {
        if let Some(part) = parts.get(category) {
            for skill in &part.matched {
                if seen.insert(skill.as_str()) {
                    out.push(skill.clone());
                }
                if out.len() >= limit {
                    return out;
                }
            }
        }
    }
    out
}

fn jaccard(a: &BTreeSet<&str>, b: &BTreeSet<&str>) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 0.0;
    }
    let inter = a.intersection(b).count();
    let union = a.union(b).count().max(1);
    inter as f64 / union as f64
}

pub(crate) fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(pairs: &[(SkillCategory, &[&str])]) -> SkillSet {
        let mut set = SkillSet::empty();
        for (category, terms) in pairs {
            set.set(*category, terms.iter().map(|s| s.to_string()).collect());
        }
        set
    }

    #[test]
    fn test_weights_sum_to_one() {
        let sum: f64 = CATEGORY_WEIGHTS.iter().map(|(_, w)| w).sum();
        assert!((sum - 1.0).abs() < 1e-9, "weights sum to {sum}");
    }

    #[test]
    fn test_half_covered_backend_scores_eleven() {
        let profile = skills(&[(SkillCategory::Backend, &["fastapi"])]);
        let jd = skills(&[(SkillCategory::Backend, &["fastapi", "django"])]);
        let (score, parts) = match_skills(&profile, &jd);
        assert_eq!(score, 11.0);
        let backend = &parts[&SkillCategory::Backend];
        assert_eq!(backend.coverage, 0.5);
        assert_eq!(backend.matched, ["fastapi"]);
        assert_eq!(backend.missing, ["django"]);
    }

    #[test]
    fn test_empty_jd_scores_zero() {
        let profile = skills(&[
            (SkillCategory::Backend, &["fastapi", "django"]),
            (SkillCategory::Languages, &["python", "rust"]),
        ]);
        let (score, parts) = match_skills(&profile, &SkillSet::empty());
        assert_eq!(score, 0.0);
        for (_, part) in &parts {
            assert_eq!(part.coverage, 0.0);
            assert!(part.missing.is_empty());
        }
    }

    #[test]
    fn test_full_coverage_scores_hundred() {
        let both = skills(&[
            (SkillCategory::Languages, &["python"]),
            (SkillCategory::Backend, &["fastapi"]),
            (SkillCategory::Frontend, &["react"]),
            (SkillCategory::CloudDevops, &["aws"]),
            (SkillCategory::Data, &["postgres"]),
            (SkillCategory::Testing, &["pytest"]),
            (SkillCategory::Security, &["oauth"]),
        ]);
        let (score, _) = match_skills(&both, &both);
        assert_eq!(score, 100.0);
    }

    #[test]
    fn test_score_is_bounded() {
        let profile = skills(&[(SkillCategory::Backend, &["fastapi", "flask", "django"])]);
        let jd = skills(&[(SkillCategory::Backend, &["fastapi"])]);
        let (score, _) = match_skills(&profile, &jd);
        assert!((0.0..=100.0).contains(&score));
    }

    #[test]
    fn test_security_weight_contributes_nothing() {
        let profile = skills(&[(SkillCategory::Security, &["oauth", "jwt"])]);
        let jd = skills(&[(SkillCategory::Security, &["oauth", "jwt"])]);
        let (score, parts) = match_skills(&profile, &jd);
        assert_eq!(score, 0.0);
        assert_eq!(parts[&SkillCategory::Security].coverage, 1.0);
    }

    #[test]
    fn test_jaccard_is_diagnostic_only() {
        // Profile has extras; jaccard drops but coverage (and score) do not.
        let profile = skills(&[(SkillCategory::Backend, &["fastapi", "flask", "grpc"])]);
        let jd = skills(&[(SkillCategory::Backend, &["fastapi"])]);
        let (score, parts) = match_skills(&profile, &jd);
        assert_eq!(score, 22.0);
        let backend = &parts[&SkillCategory::Backend];
        assert_eq!(backend.coverage, 1.0);
        assert!((backend.jaccard - 0.333).abs() < 1e-9);
    }

    #[test]
    fn test_matched_and_missing_are_sorted() {
        let profile = skills(&[(SkillCategory::Data, &["redis", "kafka"])]);
        let jd = skills(&[(SkillCategory::Data, &["spark", "kafka", "redis", "mysql"])]);
        let (_, parts) = match_skills(&profile, &jd);
        let data = &parts[&SkillCategory::Data];
        assert_eq!(data.matched, ["kafka", "redis"]);
        assert_eq!(data.missing, ["mysql", "spark"]);
    }

    #[test]
    fn test_top_matches_order_dedup_and_cap() {
        let profile = skills(&[
            (SkillCategory::Languages, &["python", "sql"]),
            (SkillCategory::Backend, &["fastapi", "rest"]),
            (SkillCategory::CloudDevops, &["aws", "docker"]),
        ]);
        let jd = profile.clone();
        let (_, parts) = match_skills(&profile, &jd);
        let top = top_matches(&parts, 3);
        // Languages first, then backend; capped before cloud_devops.
        assert_eq!(top, ["python", "sql", "fastapi"]);
    }

    #[test]
    fn test_rounding_to_one_decimal() {
        // languages 1/3 covered: 0.22 * (1/3) * 100 = 7.333... -> 7.3
        let profile = skills(&[(SkillCategory::Languages, &["python"])]);
        let jd = skills(&[(SkillCategory::Languages, &["python", "java", "go"])]);
        let (score, parts) = match_skills(&profile, &jd);
        assert_eq!(score, 7.3);
        assert_eq!(parts[&SkillCategory::Languages].coverage, 0.333);
    }
}
