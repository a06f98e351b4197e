use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::skills::SkillSet;

/// Contact fields extracted from a resume. Each field is independently
/// extracted; absence renders as an empty string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub linkedin: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Summary {
    #[serde(default)]
    pub headline: String,
    #[serde(default)]
    pub overview: String,
}

/// A single position. The deterministic builder leaves these empty; the
/// LLM normalizer may populate them from the resume body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExperienceEntry {
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EducationEntry {
    #[serde(default)]
    pub school: String,
    #[serde(default)]
    pub degree: String,
}

/// A 0-10 score with its human-readable rationale.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreEntry {
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub rationale: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileScores {
    #[serde(default)]
    pub overall_technical: ScoreEntry,
    #[serde(default)]
    pub backend: ScoreEntry,
    #[serde(default)]
    pub frontend: ScoreEntry,
    #[serde(default)]
    pub cloud_devops: ScoreEntry,
    #[serde(default)]
    pub data: ScoreEntry,
    #[serde(default)]
    pub testing: ScoreEntry,
    #[serde(default)]
    pub business: ScoreEntry,
    #[serde(default)]
    pub functional: ScoreEntry,
}

/// A candidate profile. Immutable once built; downstream consumers treat
/// it as a value re-fetched from storage per request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub profile_id: Uuid,
    pub domain: String,
    pub created_at: DateTime<Utc>,
    pub contact: Contact,
    pub summary: Summary,
    pub skills: SkillSet,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    pub scores: ProfileScores,
}

/// Listing row for profiles; the full record lives in the JSONB column.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProfileSummaryRow {
    pub profile_id: Uuid,
    pub domain: String,
    pub full_name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
