use axum::extract::{Multipart, Path, Query, State};
use axum::response::Html;
use axum::Json;
use bytes::Bytes;
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::ingest;
use crate::jd::store;
use crate::matching::extract::normalize_jd;
use crate::matching::lexicon::SkillLexicon;
use crate::models::jd::{JdSummaryRow, JobDescription};
use crate::profile::handlers::{domain_filter, multipart_err, DomainQuery, DEFAULT_DOMAIN};
use crate::render;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct NormalizeJdRequest {
    pub company: String,
    pub title: String,
    pub jd_text: String,
    #[serde(default = "default_domain")]
    pub domain: String,
}

fn default_domain() -> String {
    DEFAULT_DOMAIN.to_string()
}

/// POST /api/v1/jds
///
/// Normalizes pasted JD text into a required skill set and persists it.
pub async fn handle_normalize_jd(
    State(state): State<AppState>,
    Json(req): Json<NormalizeJdRequest>,
) -> Result<Json<JobDescription>, AppError> {
    let jd = JobDescription {
        jd_id: Uuid::new_v4(),
        domain: req.domain,
        company: req.company,
        title: req.title,
        created_at: Utc::now(),
        skills: normalize_jd(&req.jd_text, SkillLexicon::builtin()),
        jd_text: req.jd_text,
    };
    store::save_jd(&state.db, &jd).await?;
    tracing::info!("Normalized JD {} ({} / {})", jd.jd_id, jd.company, jd.title);
    Ok(Json(jd))
}

/// POST /api/v1/jds/upload
///
/// Multipart JD upload (`file`, optional `company`/`title`/`domain`).
/// The document is ingested to text and then normalized as above.
pub async fn handle_upload_jd(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<JobDescription>, AppError> {
    let mut company = String::new();
    let mut title = String::new();
    let mut domain = DEFAULT_DOMAIN.to_string();
    let mut upload: Option<(String, Bytes)> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_err)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("company") => company = field.text().await.map_err(multipart_err)?,
            Some("title") => title = field.text().await.map_err(multipart_err)?,
            Some("domain") => {
                let value = field.text().await.map_err(multipart_err)?;
                if !value.trim().is_empty() {
                    domain = value;
                }
            }
            Some("file") => {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let data = field.bytes().await.map_err(multipart_err)?;
                upload = Some((filename, data));
            }
            _ => {}
        }
    }

    let (filename, data) =
        upload.ok_or_else(|| AppError::Validation("No file received.".to_string()))?;
    let jd_text = ingest::extract_text(&filename, &data)?;

    let jd = JobDescription {
        jd_id: Uuid::new_v4(),
        domain,
        company,
        title,
        created_at: Utc::now(),
        skills: normalize_jd(&jd_text, SkillLexicon::builtin()),
        jd_text,
    };
    store::save_jd(&state.db, &jd).await?;
    Ok(Json(jd))
}

/// GET /api/v1/jds
pub async fn handle_list_jds(
    State(state): State<AppState>,
    Query(params): Query<DomainQuery>,
) -> Result<Json<Vec<JdSummaryRow>>, AppError> {
    let rows = store::list_jds(&state.db, domain_filter(&params.domain)).await?;
    Ok(Json(rows))
}

#[derive(Deserialize)]
pub struct LatestJdQuery {
    pub domain: Option<String>,
    pub jd_id: Option<Uuid>,
}

/// GET /api/v1/jds/latest
pub async fn handle_latest_jd(
    State(state): State<AppState>,
    Query(params): Query<LatestJdQuery>,
) -> Result<Json<JobDescription>, AppError> {
    let jd = match params.jd_id {
        Some(id) => store::get_jd(&state.db, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("JD {id} not found")))?,
        None => {
            let domain = params.domain.as_deref().unwrap_or(DEFAULT_DOMAIN);
            store::latest_jd(&state.db, domain)
                .await?
                .ok_or_else(|| AppError::NotFound("No job descriptions stored yet".to_string()))?
        }
    };
    Ok(Json(jd))
}

/// GET /api/v1/jds/:id
pub async fn handle_get_jd(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<JobDescription>, AppError> {
    let jd = store::get_jd(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("JD {id} not found")))?;
    Ok(Json(jd))
}

/// GET /api/v1/jds/:id/html
pub async fn handle_jd_html(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, AppError> {
    let jd = store::get_jd(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("JD {id} not found")))?;
    Ok(Html(render::jd_to_html(&jd)))
}
