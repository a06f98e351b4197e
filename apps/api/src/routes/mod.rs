pub mod debug;
pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::jd::handlers as jd_handlers;
use crate::matching::handlers as match_handlers;
use crate::profile::handlers as profile_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume / profile API
        .route("/api/v1/resumes", post(profile_handlers::handle_upload_resume))
        .route("/api/v1/resumes/bulk", post(profile_handlers::handle_bulk_upload))
        .route("/api/v1/profiles", get(profile_handlers::handle_list_profiles))
        .route("/api/v1/profiles/:id", get(profile_handlers::handle_get_profile))
        .route(
            "/api/v1/profiles/:id/html",
            get(profile_handlers::handle_profile_html),
        )
        // Job description API
        .route("/api/v1/jds", post(jd_handlers::handle_normalize_jd).get(jd_handlers::handle_list_jds))
        .route("/api/v1/jds/upload", post(jd_handlers::handle_upload_jd))
        .route("/api/v1/jds/latest", get(jd_handlers::handle_latest_jd))
        .route("/api/v1/jds/:id", get(jd_handlers::handle_get_jd))
        .route("/api/v1/jds/:id/html", get(jd_handlers::handle_jd_html))
        // Match API
        .route("/api/v1/match/run", post(match_handlers::handle_match_run))
        .route("/api/v1/match/scorecard", post(match_handlers::handle_scorecard))
        .route(
            "/api/v1/match/questions",
            post(match_handlers::handle_interview_questions),
        )
        .route("/api/v1/match/explain", post(match_handlers::handle_explain))
        .route(
            "/api/v1/match/report/html",
            get(match_handlers::handle_match_report_html),
        )
        // Diagnostics
        .route("/api/v1/debug/dbinfo", get(debug::handle_dbinfo))
        .with_state(state)
}
