//! Job description persistence: denormalized columns plus the required
//! skill set as JSONB.

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::models::jd::{JdSummaryRow, JobDescription};
use crate::models::skills::SkillSet;

#[derive(FromRow)]
struct JdRow {
    jd_id: Uuid,
    domain: String,
    company: String,
    title: String,
    created_at: DateTime<Utc>,
    jd_text: String,
    skills: Json<SkillSet>,
}

impl From<JdRow> for JobDescription {
    fn from(row: JdRow) -> Self {
        JobDescription {
            jd_id: row.jd_id,
            domain: row.domain,
            company: row.company,
            title: row.title,
            created_at: row.created_at,
            jd_text: row.jd_text,
            skills: row.skills.0,
        }
    }
}

const JD_COLUMNS: &str = "jd_id, domain, company, title, created_at, jd_text, skills";

pub async fn save_jd(pool: &PgPool, jd: &JobDescription) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO job_descriptions
            (jd_id, domain, company, title, created_at, updated_at, jd_text, skills)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        ON CONFLICT (jd_id) DO UPDATE
        SET domain = EXCLUDED.domain,
            company = EXCLUDED.company,
            title = EXCLUDED.title,
            updated_at = EXCLUDED.updated_at,
            jd_text = EXCLUDED.jd_text,
            skills = EXCLUDED.skills
        "#,
    )
    .bind(jd.jd_id)
    .bind(&jd.domain)
    .bind(&jd.company)
    .bind(&jd.title)
    .bind(jd.created_at)
    .bind(Utc::now())
    .bind(&jd.jd_text)
    .bind(Json(&jd.skills))
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn get_jd(pool: &PgPool, jd_id: Uuid) -> Result<Option<JobDescription>> {
    let row: Option<JdRow> = sqlx::query_as(&format!(
        "SELECT {JD_COLUMNS} FROM job_descriptions WHERE jd_id = $1"
    ))
    .bind(jd_id)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(JobDescription::from))
}

/// Most recently updated JD, preferring the requested domain and falling
/// back to any JD. `None` only when the store holds no JDs at all.
pub async fn latest_jd(pool: &PgPool, domain: &str) -> Result<Option<JobDescription>> {
    let row: Option<JdRow> = sqlx::query_as(&format!(
        "SELECT {JD_COLUMNS} FROM job_descriptions WHERE domain = $1 \
         ORDER BY updated_at DESC LIMIT 1"
    ))
    .bind(domain)
    .fetch_optional(pool)
    .await?;

    if let Some(row) = row {
        return Ok(Some(row.into()));
    }

    let row: Option<JdRow> = sqlx::query_as(&format!(
        "SELECT {JD_COLUMNS} FROM job_descriptions ORDER BY updated_at DESC LIMIT 1"
    ))
    .fetch_optional(pool)
    .await?;
    Ok(row.map(JobDescription::from))
}

/// Lists JD summaries, newest first, with the same empty-filter fallback
/// as the profile listing.
pub async fn list_jds(pool: &PgPool, domain: Option<&str>) -> Result<Vec<JdSummaryRow>> {
    let all = || {
        sqlx::query_as::<_, JdSummaryRow>(
            "SELECT jd_id, domain, company, title, created_at, updated_at \
             FROM job_descriptions ORDER BY updated_at DESC",
        )
        .fetch_all(pool)
    };

    let Some(domain) = domain else {
        return Ok(all().await?);
    };

    let rows = sqlx::query_as::<_, JdSummaryRow>(
        "SELECT jd_id, domain, company, title, created_at, updated_at \
         FROM job_descriptions WHERE domain = $1 ORDER BY updated_at DESC",
    )
    .bind(domain)
    .fetch_all(pool)
    .await?;

    if rows.is_empty() {
        return Ok(all().await?);
    }
    Ok(rows)
}
