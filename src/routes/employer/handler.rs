use axum::{
    extract::{Extension, Json, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

use super::model::{EmployerProfile, UpdateEmployerProfileRequest};
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
        // The bootstrap admin has no employer row.
        return (
            StatusCode::OK,
            error_to_api_response(error_codes::NOT_FOUND, "profile not found".to_string()),
        );
    };

    match EmployerProfile::find(&state.pool, user_id).await {
        Ok(Some(profile)) => (StatusCode::OK, success_to_api_response(profile)),
        Ok(None) => (
            StatusCode::OK,
            error_to_api_response(error_codes::NOT_FOUND, "profile not found".to_string()),
        ),
        Err(e) => {
            tracing::error!("failed to load employer profile: {}", e);
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
    Json(req): Json<UpdateEmployerProfileRequest>,
) -> impl IntoResponse {
    let Ok(user_id) = Uuid::parse_str(&session.subject) else {
        return (
            StatusCode::OK,
            error_to_api_response(error_codes::NOT_FOUND, "profile not found".to_string()),
        );
    };
    if let Some(msg) = req.validate() {
        return (
            StatusCode::OK,
            error_to_api_response(error_codes::VALIDATION_ERROR, msg.to_string()),
        );
    }

    match EmployerProfile::update(&state.pool, user_id, &req).await {
        Ok(Some(profile)) => (StatusCode::OK, success_to_api_response(profile)),
        Ok(None) => (
            StatusCode::OK,
            error_to_api_response(error_codes::NOT_FOUND, "profile not found".to_string()),
        ),
        Err(e) => {
            tracing::error!("failed to update employer profile: {}", e);
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
