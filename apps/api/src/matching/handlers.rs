use axum::extract::{Query, State};
use axum::response::Html;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::jd::store as jd_store;
use crate::matching::engine::{match_skills, top_matches, MatchBreakdown};
use crate::matching::interview::build_interview_questions;
use crate::matching::scorecard::{
    build_explanation, build_scorecard, JdRef, MatchExplanation, Scorecard,
};
use crate::models::jd::JobDescription;
use crate::profile::handlers::DEFAULT_DOMAIN;
use crate::profile::store as profile_store;
use crate::render;
use crate::state::AppState;

fn default_domain() -> String {
    DEFAULT_DOMAIN.to_string()
}

fn default_top_k() -> usize {
    30
}

/// Resolves the JD to match against: the requested one, or the latest in
/// the domain. A JD with no extractable requirements cannot be matched.
async fn resolve_jd(
    state: &AppState,
    jd_id: Option<Uuid>,
    domain: &str,
) -> Result<JobDescription, AppError> {
    let jd = match jd_id {
        Some(id) => jd_store::get_jd(&state.db, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("JD {id} not found")))?,
        None => jd_store::latest_jd(&state.db, domain).await?.ok_or_else(|| {
            AppError::Validation("No job description loaded yet. Normalize a JD first.".to_string())
        })?,
    };
    if jd.skills.is_empty() {
        return Err(AppError::Validation(
            "No job description loaded yet. Normalize a JD first.".to_string(),
        ));
    }
    Ok(jd)
}

#[derive(Deserialize)]
pub struct MatchRunRequest {
    #[serde(default = "default_domain")]
    pub domain: String,
    #[serde(default)]
    pub jd_id: Option<Uuid>,
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

#[derive(Serialize)]
pub struct RankedCandidate {
    pub profile_id: Uuid,
    pub name: String,
    pub email: String,
    pub score: f64,
    pub top_matches: Vec<String>,
    pub breakdown: MatchBreakdown,
}

#[derive(Serialize)]
pub struct MatchRunResponse {
    pub jd: JdRef,
    pub results: Vec<RankedCandidate>,
}

/// POST /api/v1/match/run
///
/// Scores every profile in the domain against the JD and returns the
/// ranked list, highest score first.
pub async fn handle_match_run(
    State(state): State<AppState>,
    Json(req): Json<MatchRunRequest>,
) -> Result<Json<MatchRunResponse>, AppError> {
    let jd = resolve_jd(&state, req.jd_id, &req.domain).await?;

    let rows = profile_store::list_profiles(&state.db, Some(&req.domain)).await?;
    let mut results = Vec::with_capacity(rows.len());
    for row in rows {
        let Some(profile) = profile_store::get_profile(&state.db, row.profile_id).await? else {
            continue;
        };
        let (score, breakdown) = match_skills(&profile.skills, &jd.skills);
        results.push(RankedCandidate {
            profile_id: row.profile_id,
            name: row.full_name,
            email: row.email,
            score,
            top_matches: top_matches(&breakdown, 8),
            breakdown,
        });
    }

    results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    results.truncate(req.top_k);

    Ok(Json(MatchRunResponse {
        jd: JdRef {
            jd_id: jd.jd_id,
            company: jd.company,
            title: jd.title,
        },
        results,
    }))
}

#[derive(Deserialize)]
pub struct MatchTargetRequest {
    pub profile_id: Uuid,
    #[serde(default)]
    pub jd_id: Option<Uuid>,
    #[serde(default = "default_domain")]
    pub domain: String,
}

/// POST /api/v1/match/scorecard
pub async fn handle_scorecard(
    State(state): State<AppState>,
    Json(req): Json<MatchTargetRequest>,
) -> Result<Json<Scorecard>, AppError> {
    let jd = resolve_jd(&state, req.jd_id, &req.domain).await?;
    let profile = profile_store::get_profile(&state.db, req.profile_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Profile {} not found", req.profile_id)))?;

    let (score, breakdown) = match_skills(&profile.skills, &jd.skills);
    Ok(Json(build_scorecard(&profile, &jd, score, &breakdown)))
}

#[derive(Serialize)]
pub struct InterviewQuestionsResponse {
    pub profile_id: Uuid,
    pub jd_id: Uuid,
    pub questions: [String; 3],
}

/// POST /api/v1/match/questions
pub async fn handle_interview_questions(
    State(state): State<AppState>,
    Json(req): Json<MatchTargetRequest>,
) -> Result<Json<InterviewQuestionsResponse>, AppError> {
    let jd = resolve_jd(&state, req.jd_id, &req.domain).await?;
    let profile = profile_store::get_profile(&state.db, req.profile_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Profile {} not found", req.profile_id)))?;

    let (_, breakdown) = match_skills(&profile.skills, &jd.skills);
    Ok(Json(InterviewQuestionsResponse {
        profile_id: profile.profile_id,
        jd_id: jd.jd_id,
        questions: build_interview_questions(&profile, &jd, &breakdown),
    }))
}

/// POST /api/v1/match/explain
pub async fn handle_explain(
    State(state): State<AppState>,
    Json(req): Json<MatchTargetRequest>,
) -> Result<Json<MatchExplanation>, AppError> {
    let jd = resolve_jd(&state, req.jd_id, &req.domain).await?;
    let profile = profile_store::get_profile(&state.db, req.profile_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Profile {} not found", req.profile_id)))?;

    let (score, breakdown) = match_skills(&profile.skills, &jd.skills);
    Ok(Json(build_explanation(&profile, &jd, score, &breakdown)))
}

#[derive(Deserialize)]
pub struct MatchReportQuery {
    pub profile_id: Uuid,
    pub jd_id: Option<Uuid>,
    pub domain: Option<String>,
}

/// GET /api/v1/match/report/html
///
/// Scorecard, interview questions and explanation rendered as one
/// shareable document.
pub async fn handle_match_report_html(
    State(state): State<AppState>,
    Query(params): Query<MatchReportQuery>,
) -> Result<Html<String>, AppError> {
    let domain = params.domain.as_deref().unwrap_or(DEFAULT_DOMAIN);
    let jd = resolve_jd(&state, params.jd_id, domain).await?;
    let profile = profile_store::get_profile(&state.db, params.profile_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Profile {} not found", params.profile_id)))?;

    let (score, breakdown) = match_skills(&profile.skills, &jd.skills);
    let scorecard = build_scorecard(&profile, &jd, score, &breakdown);
    let questions = build_interview_questions(&profile, &jd, &breakdown);
    let explanation = build_explanation(&profile, &jd, score, &breakdown);

    Ok(Html(render::match_report_to_html(
        &profile,
        &jd,
        &scorecard,
        &questions,
        &explanation,
    )))
}
