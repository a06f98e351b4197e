//! Interview question synthesis: three templated follow-ups derived from
//! the first strong category and the first gap category of a breakdown.

use crate::matching::engine::MatchBreakdown;
use crate::models::jd::JobDescription;
use crate::models::profile::Profile;
use crate::models::skills::SkillCategory;

/// Scan order for both the strong area and the gap area.
const SCAN_ORDER: &[SkillCategory] = &[
    SkillCategory::Backend,
    SkillCategory::Frontend,
    SkillCategory::CloudDevops,
    SkillCategory::Data,
    SkillCategory::Testing,
    SkillCategory::Languages,
];

/// Produces exactly three questions. A missing strong or gap area is
/// replaced by a generic placeholder phrase, never an error.
pub fn build_interview_questions(
    profile: &Profile,
    jd: &JobDescription,
    breakdown: &MatchBreakdown,
) -> [String; 3] {
    let name = &profile.contact.full_name;
    let jd_title = &jd.title;

    // First category with at least two matched skills.
    let strong = SCAN_ORDER.iter().find_map(|category| {
        let matched = &breakdown.get(category)?.matched;
        (matched.len() >= 2).then(|| matched.iter().take(3).cloned().collect::<Vec<_>>())
    });

    // First category with any missing skill.
    let gap = SCAN_ORDER.iter().find_map(|category| {
        let missing = &breakdown.get(category)?.missing;
        (!missing.is_empty()).then(|| missing.iter().take(3).cloned().collect::<Vec<_>>())
    });

    let strong_skills = strong
        .map(|s| s.join(", "))
        .unwrap_or_else(|| "a key technology".to_string());
    let gap_skills = gap
        .map(|s| s.join(", "))
        .unwrap_or_else(|| "a requirement area".to_string());

    [
        format!(
            "Deep dive: For {jd_title}, walk me through a recent project where {name} used \
             {strong_skills}. What design trade-offs did you make and why?"
        ),
        format!(
            "Gap check: The JD mentions {gap_skills}. What is your experience with this, and \
             how would you ramp up quickly if needed?"
        ),
        "Collaboration: Describe a time you translated ambiguous requirements into an \
         executable plan (stories, acceptance criteria, risks). How did you align \
         stakeholders and measure success?"
            .to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::engine::match_skills;
    use crate::matching::extract::extract_skills;
    use crate::matching::lexicon::SkillLexicon;
    use crate::models::skills::SkillSet;
    use crate::profile::builder::build_profile_from_text;
    use chrono::Utc;
    use uuid::Uuid;

    fn jd_from(title: &str, text: &str) -> JobDescription {
        JobDescription {
            jd_id: Uuid::new_v4(),
            domain: "technology".to_string(),
            company: "Acme".to_string(),
            title: title.to_string(),
            created_at: Utc::now(),
            jd_text: text.to_string(),
            skills: extract_skills(text, SkillLexicon::builtin()),
        }
    }

    #[test]
    fn test_always_three_questions_even_when_empty() {
        let profile = build_profile_from_text("Jane Doe\nEngineer", SkillLexicon::builtin());
        let jd = jd_from("Platform Engineer", "nothing recognizable");
        let (_, breakdown) = match_skills(&SkillSet::empty(), &jd.skills);
        let questions = build_interview_questions(&profile, &jd, &breakdown);
        assert_eq!(questions.len(), 3);
        assert!(questions[0].contains("a key technology"));
        assert!(questions[1].contains("a requirement area"));
        assert!(questions[2].starts_with("Collaboration:"));
    }

    #[test]
    fn test_strong_area_picks_first_category_with_two_matches() {
        let profile = build_profile_from_text(
            "Jane Doe\nEngineer\nfastapi, django, react",
            SkillLexicon::builtin(),
        );
        let jd = jd_from("Backend Engineer", "fastapi, django, react required");
        let (_, breakdown) = match_skills(&profile.skills, &jd.skills);
        let questions = build_interview_questions(&profile, &jd, &breakdown);
        // Backend precedes frontend in the scan order.
        assert!(questions[0].contains("django"));
        assert!(questions[0].contains("fastapi"));
        assert!(questions[0].contains("Jane Doe"));
        assert!(questions[0].contains("Backend Engineer"));
    }

    #[test]
    fn test_gap_area_picks_first_category_with_missing() {
        let profile =
            build_profile_from_text("Jane Doe\nEngineer\nreact", SkillLexicon::builtin());
        let jd = jd_from("Fullstack", "react and vue, plus kubernetes");
        let (_, breakdown) = match_skills(&profile.skills, &jd.skills);
        let questions = build_interview_questions(&profile, &jd, &breakdown);
        // Frontend (vue missing) precedes cloud_devops (kubernetes).
        assert!(questions[1].contains("vue"));
        assert!(!questions[1].contains("kubernetes"));
    }

    #[test]
    fn test_strong_skill_mentions_cap_at_three() {
        let text = "Jane Doe\nEngineer\nfastapi django flask grpc rest";
        let profile = build_profile_from_text(text, SkillLexicon::builtin());
        let jd = jd_from("Backend", text);
        let (_, breakdown) = match_skills(&profile.skills, &jd.skills);
        let questions = build_interview_questions(&profile, &jd, &breakdown);
        let mentioned = ["api", "django", "fastapi", "flask", "grpc", "rest"]
            .iter()
            .filter(|s| questions[0].contains(**s))
            .count();
        assert!(mentioned <= 3, "question mentions too many skills: {}", questions[0]);
    }
}
