use axum::{
    extract::{Extension, Json, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use super::model::{Job, JobFilter, JobListResponse, JobPayload};
use crate::{
    AppState,
    session::{Role, Session},
    utils::{error_codes, error_to_api_response, success_to_api_response},
};

#[axum::debug_handler]
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(filter): Query<JobFilter>,
) -> impl IntoResponse {
    match Job::list_open(&state.pool, &filter).await {
        Ok((jobs, total)) => (
            StatusCode::OK,
            success_to_api_response(JobListResponse {
                jobs,
                page: filter.page(),
                per_page: filter.per_page(),
                total,
            }),
        ),
        Err(e) => {
            tracing::error!("failed to list jobs: {}", e);
            (
                StatusCode::OK,
                error_to_api_response(error_codes::INTERNAL_ERROR, "database error".to_string()),
            )
        }
    }
}

#[axum::debug_handler]
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match Job::find_by_id(&state.pool, id).await {
        // Closed postings disappear from the public site.
        Ok(Some(job)) if job.is_open => (StatusCode::OK, success_to_api_response(job)),
        Ok(_) => (
            StatusCode::OK,
            error_to_api_response(error_codes::NOT_FOUND, "job not found".to_string()),
        ),
        Err(e) => {
            tracing::error!("failed to load job {}: {}", id, e);
            (
                StatusCode::OK,
                error_to_api_response(error_codes::INTERNAL_ERROR, "database error".to_string()),
            )
        }
    }
}

#[axum::debug_handler]
pub async fn create_job(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(payload): Json<JobPayload>,
) -> impl IntoResponse {
    if let Some(msg) = payload.validate() {
        return (
            StatusCode::OK,
            error_to_api_response(error_codes::VALIDATION_ERROR, msg.to_string()),
        );
    }
    // Postings are owned by an employer row; the bootstrap admin has none.
    let Ok(employer_id) = Uuid::parse_str(&session.subject) else {
        return (
            StatusCode::OK,
            error_to_api_response(
                error_codes::VALIDATION_ERROR,
                "this account cannot own job postings".to_string(),
            ),
        );
    };

    match Job::create(&state.pool, employer_id, &payload).await {
        Ok(job) => (StatusCode::CREATED, success_to_api_response(job)),
        Err(e) => {
            tracing::error!("failed to create job: {}", e);
            (
                StatusCode::OK,
                error_to_api_response(error_codes::INTERNAL_ERROR, "failed to create job".to_string()),
            )
        }
    }
}

async fn load_owned_job(
    state: &AppState,
    session: &Session,
    id: Uuid,
) -> Result<Job, Response> {
    let job = match Job::find_by_id(&state.pool, id).await {
        Ok(Some(job)) => job,
        Ok(None) => {
            return Err((
                StatusCode::OK,
                error_to_api_response::<Job>(
                    error_codes::NOT_FOUND,
                    "job not found".to_string(),
                ),
            )
                .into_response());
        }
        Err(e) => {
            tracing::error!("failed to load job {}: {}", id, e);
            return Err((
                StatusCode::OK,
                error_to_api_response::<Job>(
                    error_codes::INTERNAL_ERROR,
                    "database error".to_string(),
                ),
            )
                .into_response());
        }
    };

    if !session.can_modify(&job.employer_id.to_string()) {
        return Err((
            StatusCode::FORBIDDEN,
            error_to_api_response::<Job>(
                error_codes::PERMISSION_DENIED,
                "you do not own this job posting".to_string(),
            ),
        )
            .into_response());
    }
    Ok(job)
}

#[axum::debug_handler]
pub async fn update_job(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<Uuid>,
    Json(payload): Json<JobPayload>,
) -> Response {
    if let Some(msg) = payload.validate() {
        return (
            StatusCode::OK,
            error_to_api_response::<Job>(error_codes::VALIDATION_ERROR, msg.to_string()),
        )
            .into_response();
    }
    if let Err(response) = load_owned_job(&state, &session, id).await {
        return response;
    }

    match Job::update(&state.pool, id, &payload).await {
        Ok(Some(job)) => (StatusCode::OK, success_to_api_response(job)).into_response(),
        Ok(None) => (
            StatusCode::OK,
            error_to_api_response::<Job>(error_codes::NOT_FOUND, "job not found".to_string()),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("failed to update job {}: {}", id, e);
            (
                StatusCode::OK,
                error_to_api_response::<Job>(
                    error_codes::INTERNAL_ERROR,
                    "failed to update job".to_string(),
                ),
            )
                .into_response()
        }
    }
}

#[axum::debug_handler]
pub async fn close_job(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<Uuid>,
) -> Response {
    if let Err(response) = load_owned_job(&state, &session, id).await {
        return response;
    }

    match Job::close(&state.pool, id).await {
        Ok(Some(job)) => (StatusCode::OK, success_to_api_response(job)).into_response(),
        Ok(None) => (
            StatusCode::OK,
            error_to_api_response::<Job>(error_codes::NOT_FOUND, "job not found".to_string()),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("failed to close job {}: {}", id, e);
            (
                StatusCode::OK,
                error_to_api_response::<Job>(
                    error_codes::INTERNAL_ERROR,
                    "failed to close job".to_string(),
                ),
            )
                .into_response()
        }
    }
}

#[axum::debug_handler]
pub async fn delete_job(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<Uuid>,
) -> Response {
    if let Err(response) = load_owned_job(&state, &session, id).await {
        return response;
    }

    match Job::delete(&state.pool, id).await {
        Ok(_) => (
            StatusCode::OK,
            success_to_api_response(serde_json::json!({ "deleted": id })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("failed to delete job {}: {}", id, e);
            (
                StatusCode::OK,
                error_to_api_response::<Job>(
                    error_codes::INTERNAL_ERROR,
                    "failed to delete job".to_string(),
                ),
            )
                .into_response()
        }
    }
}

#[axum::debug_handler]
pub async fn my_jobs(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> impl IntoResponse {
    // Admins see every posting; employers only their own.
    let employer_id = if session.role == Role::Admin {
        None
    } else {
        match Uuid::parse_str(&session.subject) {
            Ok(id) => Some(id),
            Err(_) => {
                return (
                    StatusCode::OK,
                    error_to_api_response(
                        error_codes::VALIDATION_ERROR,
                        "this account cannot own job postings".to_string(),
                    ),
                );
            }
        }
    };

    match Job::list_by_employer(&state.pool, employer_id).await {
        Ok(jobs) => (StatusCode::OK, success_to_api_response(jobs)),
        Err(e) => {
            tracing::error!("failed to list employer jobs: {}", e);
            (
                StatusCode::OK,
                error_to_api_response(error_codes::INTERNAL_ERROR, "database error".to_string()),
            )
        }
    }
}
