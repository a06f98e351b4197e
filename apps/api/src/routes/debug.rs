use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::state::AppState;

/// GET /api/v1/debug/dbinfo
/// Row counts and distinct domains, for support diagnostics.
pub async fn handle_dbinfo(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let profiles: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM profiles")
        .fetch_one(&state.db)
        .await?;
    let jds: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM job_descriptions")
        .fetch_one(&state.db)
        .await?;
    let profile_domains: Vec<String> =
        sqlx::query_scalar("SELECT DISTINCT domain FROM profiles ORDER BY domain")
            .fetch_all(&state.db)
            .await?;
    let jd_domains: Vec<String> =
        sqlx::query_scalar("SELECT DISTINCT domain FROM job_descriptions ORDER BY domain")
            .fetch_all(&state.db)
            .await?;

    Ok(Json(json!({
        "profiles": profiles,
        "job_descriptions": jds,
        "profile_domains": profile_domains,
        "jd_domains": jd_domains,
    })))
}
