use axum::{
    extract::{Extension, Json, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

use super::model::{CandidateProfile, UpdateCandidateProfileRequest};
use crate::{
    AppState,
    session::Session,
    utils::{error_codes, error_to_api_response, success_to_api_response},
};

#[axum::debug_handler]
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> impl IntoResponse {
    let Ok(user_id) = Uuid::parse_str(&session.subject) else {
        return (
            StatusCode::OK,
            error_to_api_response(error_codes::NOT_FOUND, "profile not found".to_string()),
        );
    };

    match CandidateProfile::find(&state.pool, user_id).await {
        Ok(Some(profile)) => (StatusCode::OK, success_to_api_response(profile)),
        Ok(None) => (
            StatusCode::OK,
            error_to_api_response(error_codes::NOT_FOUND, "profile not found".to_string()),
        ),
        Err(e) => {
            tracing::error!("failed to load candidate profile: {}", e);
            (
                StatusCode::OK,
                error_to_api_response(error_codes::INTERNAL_ERROR, "database error".to_string()),
            )
        }
    }
}

#[axum::debug_handler]
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(req): Json<UpdateCandidateProfileRequest>,
) -> impl IntoResponse {
    let Ok(user_id) = Uuid::parse_str(&session.subject) else {
        return (
            StatusCode::OK,
            error_to_api_response(error_codes::NOT_FOUND, "profile not found".to_string()),
        );
    };
    if req.years_experience < 0 {
        return (
            StatusCode::OK,
            error_to_api_response(
                error_codes::VALIDATION_ERROR,
                "years of experience must not be negative".to_string(),
            ),
        );
    }

    match CandidateProfile::update(&state.pool, user_id, &req).await {
        Ok(Some(profile)) => (StatusCode::OK, success_to_api_response(profile)),
        Ok(None) => (
            StatusCode::OK,
            error_to_api_response(error_codes::NOT_FOUND, "profile not found".to_string()),
        ),
        Err(e) => {
            tracing::error!("failed to update candidate profile: {}", e);
            (
                StatusCode::OK,
                error_to_api_response(
                    error_codes::INTERNAL_ERROR,
                    "failed to update profile".to_string(),
                ),
            )
        }
    }
}
