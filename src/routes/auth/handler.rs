use axum::{
    extract::{Extension, Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;

use super::model::{
    AuthUserResponse, LoginRequest, RegisterCandidateRequest, RegisterEmployerRequest, User,
};
use crate::{
    AppState,
    config::Config,
    session::{Role, SITE_ADMIN_SUBJECT, Session, clear_session_cookie, issue_token, session_cookie},
    utils::{error_codes, error_to_api_response, success_to_api_response, verify_password},
};

fn validate_registration(email: &str, password: &str, display_name: &str) -> Option<&'static str> {
    if !email.contains('@') || email.len() < 5 {
        return Some("a valid email address is required");
    }
    if password.len() < 8 {
        return Some("password must be at least 8 characters");
    }
    if display_name.trim().is_empty() {
        return Some("display name is required");
    }
    None
}

/// Signs a session for the principal and attaches the cookie to the response.
fn issue_session(
    jar: CookieJar,
    subject: &str,
    role: Role,
    display_name: &str,
    email: &str,
    config: &Config,
) -> Response {
    match issue_token(subject, role, display_name, email, config) {
        Ok(token) => {
            let jar = jar.add(session_cookie(token, config));
            (
                jar,
                (
                    StatusCode::OK,
                    success_to_api_response(AuthUserResponse {
                        user_id: subject.to_string(),
                        email: email.to_string(),
                        display_name: display_name.to_string(),
                        role: role.as_str().to_string(),
                    }),
                ),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!("failed to sign session token: {}", e);
            (
                StatusCode::OK,
                error_to_api_response::<AuthUserResponse>(
                    error_codes::INTERNAL_ERROR,
                    "failed to create session".to_string(),
                ),
            )
                .into_response()
        }
    }
}

fn issue_user_session(jar: CookieJar, user: User, config: &Config) -> Response {
    let Some(role) = Role::parse(&user.role) else {
        tracing::error!("user {} has unknown role {}", user.id, user.role);
        return (
            StatusCode::OK,
            error_to_api_response::<AuthUserResponse>(
                error_codes::INTERNAL_ERROR,
                "account is misconfigured".to_string(),
            ),
        )
            .into_response();
    };
    issue_session(
        jar,
        &user.id.to_string(),
        role,
        &user.display_name,
        &user.email,
        config,
    )
}

#[axum::debug_handler]
pub async fn register_candidate(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<RegisterCandidateRequest>,
) -> Response {
    if let Some(msg) = validate_registration(&req.email, &req.password, &req.display_name) {
        return (
            StatusCode::OK,
            error_to_api_response::<AuthUserResponse>(
                error_codes::VALIDATION_ERROR,
                msg.to_string(),
            ),
        )
            .into_response();
    }

    match User::create_candidate(&state.pool, req).await {
        Ok(user) => issue_user_session(jar, user, &state.config),
        Err(e) if e.to_string().contains("unique constraint") => (
            StatusCode::OK,
            error_to_api_response::<AuthUserResponse>(
                error_codes::USER_EXISTS,
                "an account with this email already exists".to_string(),
            ),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("failed to create candidate: {}", e);
            (
                StatusCode::OK,
                error_to_api_response::<AuthUserResponse>(
                    error_codes::INTERNAL_ERROR,
                    "failed to create account".to_string(),
                ),
            )
                .into_response()
        }
    }
}

#[axum::debug_handler]
pub async fn register_employer(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<RegisterEmployerRequest>,
) -> Response {
    if let Some(msg) = validate_registration(&req.email, &req.password, &req.display_name) {
        return (
            StatusCode::OK,
            error_to_api_response::<AuthUserResponse>(
                error_codes::VALIDATION_ERROR,
                msg.to_string(),
            ),
        )
            .into_response();
    }
    if req.company_name.trim().is_empty() {
        return (
            StatusCode::OK,
            error_to_api_response::<AuthUserResponse>(
                error_codes::VALIDATION_ERROR,
                "company name is required".to_string(),
            ),
        )
            .into_response();
    }

    match User::create_employer(&state.pool, req).await {
        Ok(user) => issue_user_session(jar, user, &state.config),
        Err(e) if e.to_string().contains("unique constraint") => (
            StatusCode::OK,
            error_to_api_response::<AuthUserResponse>(
                error_codes::USER_EXISTS,
                "an account with this email already exists".to_string(),
            ),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("failed to create employer: {}", e);
            (
                StatusCode::OK,
                error_to_api_response::<AuthUserResponse>(
                    error_codes::INTERNAL_ERROR,
                    "failed to create account".to_string(),
                ),
            )
                .into_response()
        }
    }
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Response {
    // The one configured identity allowed to authenticate without a users row.
    if req.email == state.config.site_admin_email {
        if req.password == state.config.site_admin_password {
            let email = state.config.site_admin_email.clone();
            return issue_session(
                jar,
                SITE_ADMIN_SUBJECT,
                Role::Admin,
                "Administrator",
                &email,
                &state.config,
            );
        }
        return (
            StatusCode::OK,
            error_to_api_response::<AuthUserResponse>(
                error_codes::AUTH_FAILED,
                "invalid email or password".to_string(),
            ),
        )
            .into_response();
    }

    let user = match User::find_by_email(&state.pool, &req.email).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            // Same outcome as a wrong password, no account enumeration.
            return (
                StatusCode::OK,
                error_to_api_response::<AuthUserResponse>(
                    error_codes::AUTH_FAILED,
                    "invalid email or password".to_string(),
                ),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!("login lookup failed: {}", e);
            return (
                StatusCode::OK,
                error_to_api_response::<AuthUserResponse>(
                    error_codes::INTERNAL_ERROR,
                    "database error".to_string(),
                ),
            )
                .into_response();
        }
    };

    match verify_password(&req.password, &user.password_hash) {
        Ok(true) => issue_user_session(jar, user, &state.config),
        Ok(false) => (
            StatusCode::OK,
            error_to_api_response::<AuthUserResponse>(
                error_codes::AUTH_FAILED,
                "invalid email or password".to_string(),
            ),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("password verification failed: {}", e);
            (
                StatusCode::OK,
                error_to_api_response::<AuthUserResponse>(
                    error_codes::INTERNAL_ERROR,
                    "internal error".to_string(),
                ),
            )
                .into_response()
        }
    }
}

#[axum::debug_handler]
pub async fn logout(jar: CookieJar) -> Response {
    let jar = jar.add(clear_session_cookie());
    (
        jar,
        (
            StatusCode::OK,
            success_to_api_response(serde_json::json!({})),
        ),
    )
        .into_response()
}

#[axum::debug_handler]
pub async fn me(Extension(session): Extension<Session>) -> impl IntoResponse {
    (
        StatusCode::OK,
        success_to_api_response(AuthUserResponse {
            user_id: session.subject,
            email: session.email,
            display_name: session.display_name,
            role: session.role.as_str().to_string(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_registration() {
        assert!(validate_registration("a@x.com", "longenough", "Amr").is_none());
        assert!(validate_registration("not-an-email", "longenough", "Amr").is_some());
        assert!(validate_registration("a@x.com", "short", "Amr").is_some());
        assert!(validate_registration("a@x.com", "longenough", "  ").is_some());
    }
}
