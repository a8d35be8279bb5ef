use axum::{
    extract::{Extension, Json, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use super::model::{
    Application, ApplicationStatus, ApplyRequest, CandidateApplication, UpdateStatusRequest,
};
use crate::{
    AppState,
    routes::job::Job,
    session::Session,
    utils::{error_codes, error_to_api_response, success_to_api_response},
};

#[axum::debug_handler]
pub async fn apply(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(job_id): Path<Uuid>,
    Json(req): Json<ApplyRequest>,
) -> impl IntoResponse {
    // Applications belong to a candidate row; the bootstrap admin has none.
    let Ok(candidate_id) = Uuid::parse_str(&session.subject) else {
        return (
            StatusCode::OK,
            error_to_api_response(
                error_codes::VALIDATION_ERROR,
                "this account cannot apply to jobs".to_string(),
            ),
        );
    };

    // A closed posting is indistinguishable from a missing one.
    match Job::find_by_id(&state.pool, job_id).await {
        Ok(Some(job)) if job.is_open => {}
        Ok(_) => {
            return (
                StatusCode::OK,
                error_to_api_response(error_codes::NOT_FOUND, "job not found".to_string()),
            );
        }
        Err(e) => {
            tracing::error!("failed to load job {}: {}", job_id, e);
            return (
                StatusCode::OK,
                error_to_api_response(error_codes::INTERNAL_ERROR, "database error".to_string()),
            );
        }
    }

    match Application::create(&state.pool, job_id, candidate_id, &req.cover_letter).await {
        Ok(application) => (StatusCode::CREATED, success_to_api_response(application)),
        Err(e) if e.to_string().contains("unique constraint") => (
            StatusCode::OK,
            error_to_api_response(
                error_codes::ALREADY_APPLIED,
                "you have already applied to this job".to_string(),
            ),
        ),
        Err(e) => {
            tracing::error!("failed to create application: {}", e);
            (
                StatusCode::OK,
                error_to_api_response(
                    error_codes::INTERNAL_ERROR,
                    "failed to submit application".to_string(),
                ),
            )
        }
    }
}

#[axum::debug_handler]
pub async fn my_applications(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> impl IntoResponse {
    let Ok(candidate_id) = Uuid::parse_str(&session.subject) else {
        // Admin sentinel: no candidate rows can exist for it.
        return (
            StatusCode::OK,
            success_to_api_response(Vec::<CandidateApplication>::new()),
        );
    };

    match Application::list_for_candidate(&state.pool, candidate_id).await {
        Ok(applications) => (StatusCode::OK, success_to_api_response(applications)),
        Err(e) => {
            tracing::error!("failed to list applications: {}", e);
            (
                StatusCode::OK,
                error_to_api_response(error_codes::INTERNAL_ERROR, "database error".to_string()),
            )
        }
    }
}

#[axum::debug_handler]
pub async fn job_applications(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(job_id): Path<Uuid>,
) -> Response {
    let job = match Job::find_by_id(&state.pool, job_id).await {
        Ok(Some(job)) => job,
        Ok(None) => {
            return (
                StatusCode::OK,
                error_to_api_response::<()>(
                    error_codes::NOT_FOUND,
                    "job not found".to_string(),
                ),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!("failed to load job {}: {}", job_id, e);
            return (
                StatusCode::OK,
                error_to_api_response::<()>(
                    error_codes::INTERNAL_ERROR,
                    "database error".to_string(),
                ),
            )
                .into_response();
        }
    };

    // Foreign postings look like missing ones, their applicant lists leak
    // nothing.
    if !session.can_modify(&job.employer_id.to_string()) {
        return (
            StatusCode::OK,
            error_to_api_response::<()>(error_codes::NOT_FOUND, "job not found".to_string()),
        )
            .into_response();
    }

    match Application::list_for_job(&state.pool, job_id).await {
        Ok(applications) => {
            (StatusCode::OK, success_to_api_response(applications)).into_response()
        }
        Err(e) => {
            tracing::error!("failed to list applications for job {}: {}", job_id, e);
            (
                StatusCode::OK,
                error_to_api_response::<()>(
                    error_codes::INTERNAL_ERROR,
                    "database error".to_string(),
                ),
            )
                .into_response()
        }
    }
}

#[axum::debug_handler]
pub async fn update_status(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateStatusRequest>,
) -> impl IntoResponse {
    let Some(status) = ApplicationStatus::parse(&req.status) else {
        return (
            StatusCode::OK,
            error_to_api_response(
                error_codes::VALIDATION_ERROR,
                "unknown application status".to_string(),
            ),
        );
    };

    let owner = match Application::find_with_employer(&state.pool, id).await {
        Ok(Some(owner)) => owner,
        Ok(None) => {
            return (
                StatusCode::OK,
                error_to_api_response(
                    error_codes::NOT_FOUND,
                    "application not found".to_string(),
                ),
            );
        }
        Err(e) => {
            tracing::error!("failed to load application {}: {}", id, e);
            return (
                StatusCode::OK,
                error_to_api_response(error_codes::INTERNAL_ERROR, "database error".to_string()),
            );
        }
    };

    if !session.can_modify(&owner.employer_id.to_string()) {
        return (
            StatusCode::FORBIDDEN,
            error_to_api_response(
                error_codes::PERMISSION_DENIED,
                "you do not own the job for this application".to_string(),
            ),
        );
    }

    match Application::update_status(&state.pool, id, status).await {
        Ok(Some(application)) => (StatusCode::OK, success_to_api_response(application)),
        Ok(None) => (
            StatusCode::OK,
            error_to_api_response(error_codes::NOT_FOUND, "application not found".to_string()),
        ),
        Err(e) => {
            tracing::error!("failed to update application {}: {}", id, e);
            (
                StatusCode::OK,
                error_to_api_response(
                    error_codes::INTERNAL_ERROR,
                    "failed to update application".to_string(),
                ),
            )
        }
    }
}
