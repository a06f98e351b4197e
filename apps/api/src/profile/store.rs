//! Profile persistence. Full records round-trip through a JSONB column;
//! listings read the denormalized columns.

use anyhow::Result;
use chrono::Utc;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::profile::{Profile, ProfileSummaryRow};

/// Upserts a profile keyed by its identity.
pub async fn save_profile(pool: &PgPool, profile: &Profile) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO profiles (profile_id, domain, full_name, email, created_at, updated_at, data)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        ON CONFLICT (profile_id) DO UPDATE
        SET domain = EXCLUDED.domain,
            full_name = EXCLUDED.full_name,
            email = EXCLUDED.email,
            updated_at = EXCLUDED.updated_at,
            data = EXCLUDED.data
        "#,
    )
    .bind(profile.profile_id)
    .bind(&profile.domain)
    .bind(&profile.contact.full_name)
    .bind(&profile.contact.email)
    .bind(profile.created_at)
    .bind(Utc::now())
    .bind(Json(profile))
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn get_profile(pool: &PgPool, profile_id: Uuid) -> Result<Option<Profile>> {
    let row: Option<(Json<Profile>,)> =
        sqlx::query_as("SELECT data FROM profiles WHERE profile_id = $1")
            .bind(profile_id)
            .fetch_optional(pool)
            .await?;
    Ok(row.map(|(Json(profile),)| profile))
}

/// Lists profile summaries, newest first. A domain filter that matches
/// nothing falls back to the unfiltered list so callers never lose data
/// to a domain mismatch; `None` disables filtering.
pub async fn list_profiles(pool: &PgPool, domain: Option<&str>) -> Result<Vec<ProfileSummaryRow>> {
    let all = || {
        sqlx::query_as::<_, ProfileSummaryRow>(
            "SELECT profile_id, domain, full_name, email, created_at, updated_at \
             FROM profiles ORDER BY updated_at DESC",
        )
        .fetch_all(pool)
    };

    let Some(domain) = domain else {
        return Ok(all().await?);
    };

    let rows = sqlx::query_as::<_, ProfileSummaryRow>(
        "SELECT profile_id, domain, full_name, email, created_at, updated_at \
         FROM profiles WHERE domain = $1 ORDER BY updated_at DESC",
    )
    .bind(domain)
    .fetch_all(pool)
    .await?;

    if rows.is_empty() {
        return Ok(all().await?);
    }
    Ok(rows)
}
