//! HTML presentation of profiles, job descriptions and match reports.
//! Plain string building; the documents are self-contained and printable.

use crate::matching::scorecard::{MatchExplanation, Scorecard};
use crate::models::jd::JobDescription;
use crate::models::profile::Profile;
use crate::models::skills::SkillSet;

const STYLE: &str = "body{font-family:Georgia,serif;max-width:860px;margin:2rem auto;color:#1a1a1a}\
h1{border-bottom:2px solid #1a1a1a;padding-bottom:.3rem}\
h2{margin-top:1.6rem}\
table{border-collapse:collapse;width:100%}\
td,th{border:1px solid #bbb;padding:.35rem .6rem;text-align:left;vertical-align:top}\
.muted{color:#666}\
pre{background:#f5f5f2;padding:1rem;white-space:pre-wrap}";

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!doctype html><html><head><meta charset=\"utf-8\">\
         <title>{title}</title><style>{STYLE}</style></head>\
         <body>{body}</body></html>",
        title = escape(title),
    )
}

fn skills_table(skills: &SkillSet) -> String {
    let mut rows = String::new();
    for (category, terms) in skills.iter() {
        if terms.is_empty() {
            continue;
        }
        rows.push_str(&format!(
            "<tr><th>{category}</th><td>{}</td></tr>",
            escape(&terms.join(", "))
        ));
    }
    if rows.is_empty() {
        return "<p class=\"muted\">No skills extracted.</p>".to_string();
    }
    format!("<table>{rows}</table>")
}

fn bullet_list(items: &[String]) -> String {
    if items.is_empty() {
        return "<p class=\"muted\">None.</p>".to_string();
    }
    let lis: String = items
        .iter()
        .map(|item| format!("<li>{}</li>", escape(item)))
        .collect();
    format!("<ul>{lis}</ul>")
}

pub fn profile_to_html(profile: &Profile) -> String {
    let mut body = String::new();
    body.push_str(&format!("<h1>{}</h1>", escape(&profile.contact.full_name)));
    body.push_str(&format!(
        "<p class=\"muted\">{}</p>",
        escape(&profile.summary.headline)
    ));

    let contact: Vec<String> = [
        &profile.contact.email,
        &profile.contact.phone,
        &profile.contact.location,
        &profile.contact.linkedin,
    ]
    .into_iter()
    .filter(|f| !f.is_empty())
    .map(|f| escape(f))
    .collect();
    if !contact.is_empty() {
        body.push_str(&format!("<p>{}</p>", contact.join(" &middot; ")));
    }

    body.push_str(&format!("<p>{}</p>", escape(&profile.summary.overview)));

    body.push_str("<h2>Skills</h2>");
    body.push_str(&skills_table(&profile.skills));

    body.push_str("<h2>Scores</h2><table>");
    for (label, entry) in [
        ("Overall technical", &profile.scores.overall_technical),
        ("Backend", &profile.scores.backend),
        ("Frontend", &profile.scores.frontend),
        ("Cloud / DevOps", &profile.scores.cloud_devops),
        ("Data", &profile.scores.data),
        ("Testing", &profile.scores.testing),
    ] {
        body.push_str(&format!(
            "<tr><th>{label}</th><td>{}/10</td><td class=\"muted\">{}</td></tr>",
            entry.score,
            escape(&entry.rationale)
        ));
    }
    body.push_str("</table>");

    if !profile.experience.is_empty() {
        body.push_str("<h2>Experience</h2>");
        for exp in &profile.experience {
            body.push_str(&format!(
                "<h3>{} &mdash; {}</h3><p>{}</p>{}",
                escape(&exp.title),
                escape(&exp.company),
                escape(&exp.summary),
                bullet_list(&exp.bullets)
            ));
        }
    }
    if !profile.education.is_empty() {
        body.push_str("<h2>Education</h2>");
        for edu in &profile.education {
            body.push_str(&format!(
                "<p>{}, {}</p>",
                escape(&edu.degree),
                escape(&edu.school)
            ));
        }
    }

    page(&profile.contact.full_name, &body)
}

pub fn jd_to_html(jd: &JobDescription) -> String {
    let mut body = String::new();
    body.push_str(&format!("<h1>{}</h1>", escape(&jd.title)));
    body.push_str(&format!(
        "<p class=\"muted\">{} &middot; {}</p>",
        escape(&jd.company),
        escape(&jd.domain)
    ));
    body.push_str("<h2>Required skills</h2>");
    body.push_str(&skills_table(&jd.skills));
    body.push_str("<h2>Full text</h2>");
    body.push_str(&format!("<pre>{}</pre>", escape(&jd.jd_text)));
    page(&jd.title, &body)
}

pub fn match_report_to_html(
    profile: &Profile,
    jd: &JobDescription,
    scorecard: &Scorecard,
    questions: &[String; 3],
    explanation: &MatchExplanation,
) -> String {
    let mut body = String::new();
    body.push_str(&format!(
        "<h1>Match report: {} &rarr; {}</h1>",
        escape(&profile.contact.full_name),
        escape(&jd.title)
    ));
    body.push_str(&format!(
        "<p><strong>Match score: {}/100</strong></p>",
        scorecard.match_score
    ));

    body.push_str("<h2>Scores</h2><table>");
    for (label, entry) in [
        ("Technical", &scorecard.scores_out_of_10.technical),
        ("Business", &scorecard.scores_out_of_10.business),
        ("Functional", &scorecard.scores_out_of_10.functional),
    ] {
        body.push_str(&format!(
            "<tr><th>{label}</th><td>{}/10</td><td class=\"muted\">{}</td></tr>",
            entry.score,
            escape(&entry.rationale)
        ));
    }
    body.push_str("</table>");

    body.push_str(&format!(
        "<h2>Vertical</h2><p>{}{}</p>",
        escape(&scorecard.vertical.primary),
        if scorecard.vertical.signals.is_empty() {
            String::new()
        } else {
            format!(
                " <span class=\"muted\">({})</span>",
                escape(&scorecard.vertical.signals.join(", "))
            )
        }
    ));

    body.push_str("<h2>Pros</h2>");
    body.push_str(&bullet_list(&scorecard.pros));
    body.push_str("<h2>Cons</h2>");
    body.push_str(&bullet_list(&scorecard.cons));
    body.push_str("<h2>Gaps</h2>");
    body.push_str(&bullet_list(&scorecard.gaps));
    body.push_str("<h2>Differentiators</h2>");
    body.push_str(&bullet_list(&scorecard.differentiators));

    body.push_str("<h2>Interview questions</h2>");
    body.push_str(&bullet_list(questions.as_slice()));

    body.push_str("<h2>Client summary</h2>");
    body.push_str(&format!("<p>{}</p>", escape(&explanation.client_excerpt)));
    body.push_str(&format!(
        "<pre>{}</pre>",
        escape(&explanation.draft_client_email)
    ));

    page("Match report", &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::engine::match_skills;
    use crate::matching::extract::extract_skills;
    use crate::matching::interview::build_interview_questions;
    use crate::matching::lexicon::SkillLexicon;
    use crate::matching::scorecard::{build_explanation, build_scorecard};
    use crate::profile::builder::build_profile_from_text;
    use chrono::Utc;
    use uuid::Uuid;

    fn fixture() -> (Profile, JobDescription) {
        let profile = build_profile_from_text(
            "Jane <Doe>\nSenior Engineer\nfastapi, kubernetes, postgres",
            SkillLexicon::builtin(),
        );
        let jd = JobDescription {
            jd_id: Uuid::new_v4(),
            domain: "technology".to_string(),
            company: "Acme & Co".to_string(),
            title: "Backend Engineer".to_string(),
            created_at: Utc::now(),
            jd_text: "fastapi and django".to_string(),
            skills: extract_skills("fastapi and django", SkillLexicon::builtin()),
        };
        (profile, jd)
    }

    #[test]
    fn test_profile_html_escapes_and_includes_name() {
        let (profile, _) = fixture();
        let html = profile_to_html(&profile);
        assert!(html.contains("Jane &lt;Doe&gt;"));
        assert!(!html.contains("Jane <Doe>"));
        assert!(html.contains("fastapi"));
    }

    #[test]
    fn test_jd_html_includes_company_and_text() {
        let (_, jd) = fixture();
        let html = jd_to_html(&jd);
        assert!(html.contains("Acme &amp; Co"));
        assert!(html.contains("fastapi and django"));
    }

    #[test]
    fn test_match_report_contains_all_sections() {
        let (profile, jd) = fixture();
        let (score, breakdown) = match_skills(&profile.skills, &jd.skills);
        let scorecard = build_scorecard(&profile, &jd, score, &breakdown);
        let questions = build_interview_questions(&profile, &jd, &breakdown);
        let explanation = build_explanation(&profile, &jd, score, &breakdown);
        let html = match_report_to_html(&profile, &jd, &scorecard, &questions, &explanation);
        for section in [
            "Match score",
            "<h2>Scores</h2>",
            "<h2>Vertical</h2>",
            "<h2>Pros</h2>",
            "<h2>Cons</h2>",
            "<h2>Interview questions</h2>",
            "<h2>Client summary</h2>",
        ] {
            assert!(html.contains(section), "missing section {section}");
        }
    }
}
