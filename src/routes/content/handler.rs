use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use uuid::Uuid;

use super::model::{
    AboutPage, BlogPost, BlogPostPayload, SiteSetting, UpdateAboutRequest,
    UpdateSettingsRequest, UserOverview,
};
use crate::{
    AppState,
    utils::{error_codes, error_to_api_response, success_to_api_response},
};

#[axum::debug_handler]
pub async fn get_about(State(state): State<AppState>) -> impl IntoResponse {
    match AboutPage::get(&state.pool).await {
        Ok(page) => (StatusCode::OK, success_to_api_response(page)),
        Err(e) => {
            tracing::error!("failed to load about page: {}", e);
            (
                StatusCode::OK,
                error_to_api_response(error_codes::INTERNAL_ERROR, "database error".to_string()),
            )
        }
    }
}

#[axum::debug_handler]
pub async fn update_about(
    State(state): State<AppState>,
    Json(req): Json<UpdateAboutRequest>,
) -> impl IntoResponse {
    match AboutPage::update(&state.pool, &req).await {
        Ok(page) => (StatusCode::OK, success_to_api_response(page)),
        Err(e) => {
            tracing::error!("failed to update about page: {}", e);
            (
                StatusCode::OK,
                error_to_api_response(
                    error_codes::INTERNAL_ERROR,
                    "failed to update about page".to_string(),
                ),
            )
        }
    }
}

#[axum::debug_handler]
pub async fn list_posts(State(state): State<AppState>) -> impl IntoResponse {
    match BlogPost::list_published(&state.pool).await {
        Ok(posts) => (StatusCode::OK, success_to_api_response(posts)),
        Err(e) => {
            tracing::error!("failed to list blog posts: {}", e);
            (
                StatusCode::OK,
                error_to_api_response(error_codes::INTERNAL_ERROR, "database error".to_string()),
            )
        }
    }
}

#[axum::debug_handler]
pub async fn get_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> impl IntoResponse {
    match BlogPost::find_published_by_slug(&state.pool, &slug).await {
        Ok(Some(post)) => (StatusCode::OK, success_to_api_response(post)),
        Ok(None) => (
            StatusCode::OK,
            error_to_api_response(error_codes::NOT_FOUND, "post not found".to_string()),
        ),
        Err(e) => {
            tracing::error!("failed to load blog post {}: {}", slug, e);
            (
                StatusCode::OK,
                error_to_api_response(error_codes::INTERNAL_ERROR, "database error".to_string()),
            )
        }
    }
}

#[axum::debug_handler]
pub async fn create_post(
    State(state): State<AppState>,
    Json(payload): Json<BlogPostPayload>,
) -> impl IntoResponse {
    if let Some(msg) = payload.validate() {
        return (
            StatusCode::OK,
            error_to_api_response(error_codes::VALIDATION_ERROR, msg.to_string()),
        );
    }

    match BlogPost::create(&state.pool, &payload).await {
        Ok(post) => (StatusCode::CREATED, success_to_api_response(post)),
        Err(e) if e.to_string().contains("unique constraint") => (
            StatusCode::OK,
            error_to_api_response(
                error_codes::SLUG_EXISTS,
                "a post with this slug already exists".to_string(),
            ),
        ),
        Err(e) => {
            tracing::error!("failed to create blog post: {}", e);
            (
                StatusCode::OK,
                error_to_api_response(
                    error_codes::INTERNAL_ERROR,
                    "failed to create post".to_string(),
                ),
            )
        }
    }
}

#[axum::debug_handler]
pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<BlogPostPayload>,
) -> impl IntoResponse {
    if let Some(msg) = payload.validate() {
        return (
            StatusCode::OK,
            error_to_api_response(error_codes::VALIDATION_ERROR, msg.to_string()),
        );
    }

    match BlogPost::update(&state.pool, id, &payload).await {
        Ok(Some(post)) => (StatusCode::OK, success_to_api_response(post)),
        Ok(None) => (
            StatusCode::OK,
            error_to_api_response(error_codes::NOT_FOUND, "post not found".to_string()),
        ),
        Err(e) if e.to_string().contains("unique constraint") => (
            StatusCode::OK,
            error_to_api_response(
                error_codes::SLUG_EXISTS,
                "a post with this slug already exists".to_string(),
            ),
        ),
        Err(e) => {
            tracing::error!("failed to update blog post {}: {}", id, e);
            (
                StatusCode::OK,
                error_to_api_response(
                    error_codes::INTERNAL_ERROR,
                    "failed to update post".to_string(),
                ),
            )
        }
    }
}

#[axum::debug_handler]
pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match BlogPost::delete(&state.pool, id).await {
        Ok(0) => (
            StatusCode::OK,
            error_to_api_response(error_codes::NOT_FOUND, "post not found".to_string()),
        ),
        Ok(_) => (
            StatusCode::OK,
            success_to_api_response(serde_json::json!({ "deleted": id })),
        ),
        Err(e) => {
            tracing::error!("failed to delete blog post {}: {}", id, e);
            (
                StatusCode::OK,
                error_to_api_response(
                    error_codes::INTERNAL_ERROR,
                    "failed to delete post".to_string(),
                ),
            )
        }
    }
}

#[axum::debug_handler]
pub async fn get_settings(State(state): State<AppState>) -> impl IntoResponse {
    match SiteSetting::get_all(&state.pool).await {
        Ok(settings) => (StatusCode::OK, success_to_api_response(settings)),
        Err(e) => {
            tracing::error!("failed to load settings: {}", e);
            (
                StatusCode::OK,
                error_to_api_response(error_codes::INTERNAL_ERROR, "database error".to_string()),
            )
        }
    }
}

#[axum::debug_handler]
pub async fn update_settings(
    State(state): State<AppState>,
    Json(req): Json<UpdateSettingsRequest>,
) -> impl IntoResponse {
    if req.settings.is_empty() {
        return (
            StatusCode::OK,
            error_to_api_response(
                error_codes::VALIDATION_ERROR,
                "no settings provided".to_string(),
            ),
        );
    }
    if req
        .settings
        .iter()
        .any(|setting| setting.setting_key.trim().is_empty())
    {
        return (
            StatusCode::OK,
            error_to_api_response(
                error_codes::VALIDATION_ERROR,
                "setting keys must not be empty".to_string(),
            ),
        );
    }

    match SiteSetting::upsert_many(&state.pool, &req.settings).await {
        Ok(()) => match SiteSetting::get_all(&state.pool).await {
            Ok(settings) => (StatusCode::OK, success_to_api_response(settings)),
            Err(e) => {
                tracing::error!("failed to reload settings: {}", e);
                (
                    StatusCode::OK,
                    error_to_api_response(
                        error_codes::INTERNAL_ERROR,
                        "database error".to_string(),
                    ),
                )
            }
        },
        Err(e) => {
            tracing::error!("failed to update settings: {}", e);
            (
                StatusCode::OK,
                error_to_api_response(
                    error_codes::INTERNAL_ERROR,
                    "failed to update settings".to_string(),
                ),
            )
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UserListQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[axum::debug_handler]
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<UserListQuery>,
) -> impl IntoResponse {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(50).clamp(1, 200);
    let offset = ((page - 1) * per_page) as i64;

    match UserOverview::list(&state.pool, per_page as i64, offset).await {
        Ok(users) => (StatusCode::OK, success_to_api_response(users)),
        Err(e) => {
            tracing::error!("failed to list users: {}", e);
            (
                StatusCode::OK,
                error_to_api_response(error_codes::INTERNAL_ERROR, "database error".to_string()),
            )
        }
    }
}
