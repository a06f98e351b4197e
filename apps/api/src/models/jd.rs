use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::skills::SkillSet;

/// A normalized job description: raw text plus the required skills per
/// category. Immutable once created, same contract as `Profile`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobDescription {
    pub jd_id: Uuid,
    pub domain: String,
    pub company: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub jd_text: String,
    pub skills: SkillSet,
}

/// Listing row for job descriptions.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JdSummaryRow {
    pub jd_id: Uuid,
    pub domain: String,
    pub company: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
