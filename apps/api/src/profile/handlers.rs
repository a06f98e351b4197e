use axum::extract::{Multipart, Path, Query, State};
use axum::response::Html;
use axum::Json;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::ingest;
use crate::models::profile::{Profile, ProfileSummaryRow};
use crate::profile::store;
use crate::render;
use crate::state::AppState;

pub const DEFAULT_DOMAIN: &str = "technology";

#[derive(Deserialize)]
pub struct DomainQuery {
    pub domain: Option<String>,
}

/// Maps the `domain` query parameter to a store filter. Absent means the
/// default domain; `all`, `*` or empty disables filtering.
pub(crate) fn domain_filter(domain: &Option<String>) -> Option<&str> {
    match domain.as_deref() {
        None => Some(DEFAULT_DOMAIN),
        Some("all") | Some("*") | Some("") => None,
        Some(d) => Some(d),
    }
}

pub(crate) fn multipart_err(e: axum::extract::multipart::MultipartError) -> AppError {
    AppError::Validation(format!("Malformed multipart request: {e}"))
}

#[derive(Serialize)]
pub struct UploadResumeResponse {
    pub profile_id: Uuid,
    pub profile: Profile,
}

/// POST /api/v1/resumes
///
/// Multipart upload of one resume (`file`, optional `domain`). The file is
/// ingested to plain text, normalized into a profile, and persisted.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResumeResponse>, AppError> {
    let mut domain = DEFAULT_DOMAIN.to_string();
    let mut upload: Option<(String, Bytes)> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_err)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
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

    let raw_text = ingest::extract_text(&filename, &data)?;
    let mut profile = state.normalizer.normalize(&raw_text).await?;
    profile.domain = domain;

    store::save_profile(&state.db, &profile).await?;
    tracing::info!("Created profile {} from {filename}", profile.profile_id);

    Ok(Json(UploadResumeResponse {
        profile_id: profile.profile_id,
        profile,
    }))
}

#[derive(Serialize)]
pub struct BulkCreatedEntry {
    pub profile_id: Uuid,
    pub full_name: String,
    pub email: String,
    pub filename: String,
}

#[derive(Serialize)]
pub struct BulkFailedEntry {
    pub filename: String,
    pub error: String,
}

#[derive(Serialize)]
pub struct BulkUploadResponse {
    pub created: Vec<BulkCreatedEntry>,
    pub failed: Vec<BulkFailedEntry>,
    pub created_count: usize,
    pub failed_count: usize,
}

/// POST /api/v1/resumes/bulk
///
/// Multipart upload of several resumes. Each file is handled
/// independently; one unreadable document fails that entry, not the batch.
pub async fn handle_bulk_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<BulkUploadResponse>, AppError> {
    let mut domain = DEFAULT_DOMAIN.to_string();
    let mut files: Vec<(String, Bytes)> = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(multipart_err)? {
        let name = field.name().map(str::to_string);
        if name.as_deref() == Some("domain") {
            let value = field.text().await.map_err(multipart_err)?;
            if !value.trim().is_empty() {
                domain = value;
            }
            continue;
        }
        let filename = field.file_name().map(str::to_string);
        if let Some(filename) = filename {
            let data = field.bytes().await.map_err(multipart_err)?;
            files.push((filename, data));
        }
    }

    if files.is_empty() {
        return Err(AppError::Validation("No files received.".to_string()));
    }

    let mut created = Vec::new();
    let mut failed = Vec::new();
    for (filename, data) in files {
        match ingest_one(&state, &filename, &data, &domain).await {
            Ok(profile) => created.push(BulkCreatedEntry {
                profile_id: profile.profile_id,
                full_name: profile.contact.full_name,
                email: profile.contact.email,
                filename,
            }),
            Err(e) => failed.push(BulkFailedEntry {
                filename,
                error: e.to_string(),
            }),
        }
    }

    Ok(Json(BulkUploadResponse {
        created_count: created.len(),
        failed_count: failed.len(),
        created,
        failed,
    }))
}

async fn ingest_one(
    state: &AppState,
    filename: &str,
    data: &[u8],
    domain: &str,
) -> Result<Profile, AppError> {
    let raw_text = ingest::extract_text(filename, data)?;
    let mut profile = state.normalizer.normalize(&raw_text).await?;
    profile.domain = domain.to_string();
    store::save_profile(&state.db, &profile).await?;
    Ok(profile)
}

/// GET /api/v1/profiles
pub async fn handle_list_profiles(
    State(state): State<AppState>,
    Query(params): Query<DomainQuery>,
) -> Result<Json<Vec<ProfileSummaryRow>>, AppError> {
    let rows = store::list_profiles(&state.db, domain_filter(&params.domain)).await?;
    Ok(Json(rows))
}

/// GET /api/v1/profiles/:id
pub async fn handle_get_profile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Profile>, AppError> {
    let profile = store::get_profile(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Profile {id} not found")))?;
    Ok(Json(profile))
}

/// GET /api/v1/profiles/:id/html
pub async fn handle_profile_html(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, AppError> {
    let profile = store::get_profile(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Profile {id} not found")))?;
    Ok(Html(render::profile_to_html(&profile)))
}
