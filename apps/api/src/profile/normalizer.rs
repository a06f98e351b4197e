//! Pluggable profile normalization: a trait with a deterministic default
//! and an LLM-enriched alternative, swapped at startup via config.
//!
//! `AppState` holds an `Arc<dyn ProfileNormalizer>`. Whatever the backend,
//! skills and scores always come from the deterministic extractor so
//! match results stay reproducible.

use async_trait::async_trait;
use serde::Deserialize;

use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::matching::lexicon::SkillLexicon;
use crate::models::profile::{Contact, EducationEntry, ExperienceEntry, Profile, Summary};
use crate::profile::builder::build_profile_from_text;
use crate::profile::prompts::{PROFILE_ENRICH_PROMPT, PROFILE_ENRICH_SYSTEM};

#[async_trait]
pub trait ProfileNormalizer: Send + Sync {
    async fn normalize(&self, raw_text: &str) -> Result<Profile, AppError>;
}

/// Pure-Rust deterministic normalizer. Fast, reproducible, no model call.
pub struct DeterministicNormalizer;

#[async_trait]
impl ProfileNormalizer for DeterministicNormalizer {
    async fn normalize(&self, raw_text: &str) -> Result<Profile, AppError> {
        Ok(build_profile_from_text(raw_text, SkillLexicon::builtin()))
    }
}

/// What the model is allowed to contribute. Skills and scores are absent
/// on purpose.
#[derive(Debug, Deserialize)]
struct Enrichment {
    #[serde(default)]
    contact: Contact,
    #[serde(default)]
    summary: Summary,
    #[serde(default)]
    experience: Vec<ExperienceEntry>,
    #[serde(default)]
    education: Vec<EducationEntry>,
}

/// LLM-backed normalizer: deterministic base profile, with model-extracted
/// contact, summary, experience and education merged over it.
pub struct LlmNormalizer {
    llm: LlmClient,
}

impl LlmNormalizer {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl ProfileNormalizer for LlmNormalizer {
    async fn normalize(&self, raw_text: &str) -> Result<Profile, AppError> {
        let mut profile = build_profile_from_text(raw_text, SkillLexicon::builtin());

        let prompt = PROFILE_ENRICH_PROMPT.replace("{resume_text}", raw_text);
        let enrichment: Enrichment = self
            .llm
            .call_json(&prompt, PROFILE_ENRICH_SYSTEM)
            .await
            .map_err(|e| AppError::Llm(format!("Profile enrichment failed: {e}")))?;

        merge_enrichment(&mut profile, enrichment);
        Ok(profile)
    }
}

/// Non-empty model output wins field by field; anything the model left
/// blank keeps the deterministic value.
fn merge_enrichment(profile: &mut Profile, enrichment: Enrichment) {
    let contact = &mut profile.contact;
    override_field(&mut contact.full_name, enrichment.contact.full_name);
    override_field(&mut contact.email, enrichment.contact.email);
    override_field(&mut contact.phone, enrichment.contact.phone);
    override_field(&mut contact.location, enrichment.contact.location);
    override_field(&mut contact.linkedin, enrichment.contact.linkedin);

    override_field(&mut profile.summary.headline, enrichment.summary.headline);
    override_field(&mut profile.summary.overview, enrichment.summary.overview);

    if !enrichment.experience.is_empty() {
        profile.experience = enrichment.experience;
    }
    if !enrichment.education.is_empty() {
        profile.education = enrichment.education;
    }
}

fn override_field(target: &mut String, candidate: String) {
    if !candidate.trim().is_empty() {
        *target = candidate;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_deterministic_normalizer_matches_builder() {
        let text = "Jane Doe\nSenior Backend Engineer\nfastapi and postgres";
        let normalized = DeterministicNormalizer.normalize(text).await.unwrap();
        let built = build_profile_from_text(text, SkillLexicon::builtin());
        assert_eq!(normalized.contact.full_name, built.contact.full_name);
        assert_eq!(normalized.skills, built.skills);
        assert_eq!(
            normalized.scores.overall_technical.score,
            built.scores.overall_technical.score
        );
    }

    #[test]
    fn test_merge_keeps_deterministic_values_for_blank_fields() {
        let mut profile = build_profile_from_text(
            "Jane Doe\nEngineer\njane@x.com",
            SkillLexicon::builtin(),
        );
        merge_enrichment(
            &mut profile,
            Enrichment {
                contact: Contact {
                    full_name: "Jane A. Doe".to_string(),
                    ..Default::default()
                },
                summary: Summary::default(),
                experience: Vec::new(),
                education: Vec::new(),
            },
        );
        assert_eq!(profile.contact.full_name, "Jane A. Doe");
        // Blank model fields do not clobber extracted ones.
        assert_eq!(profile.contact.email, "jane@x.com");
        assert_eq!(profile.summary.headline, "Engineer");
    }

    #[test]
    fn test_merge_never_touches_skills_or_scores() {
        let mut profile = build_profile_from_text(
            "Jane Doe\nEngineer\nfastapi kubernetes",
            SkillLexicon::builtin(),
        );
        let skills_before = profile.skills.clone();
        let backend_before = profile.scores.backend.score;
        merge_enrichment(
            &mut profile,
            Enrichment {
                contact: Contact::default(),
                summary: Summary {
                    headline: "Totally different headline".to_string(),
                    overview: String::new(),
                },
                experience: vec![ExperienceEntry {
                    company: "Acme".to_string(),
                    ..Default::default()
                }],
                education: Vec::new(),
            },
        );
        assert_eq!(profile.skills, skills_before);
        assert_eq!(profile.scores.backend.score, backend_before);
        assert_eq!(profile.experience.len(), 1);
    }
}
