use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::{
    AppState,
    config::Config,
    session::{Role, SESSION_COOKIE, Session, verify_token},
    utils::{error_codes, error_to_api_response},
};

/// Reads the session cookie and verifies it. A missing cookie never reaches
/// the codec; verification happens on every request, nothing is cached.
pub fn extract_session(jar: &CookieJar, config: &Config) -> Option<Session> {
    let cookie = jar.get(SESSION_COOKIE)?;
    verify_token(cookie.value(), config)
}

/// Pure authorization predicate: no session is never authorized, otherwise
/// the session role must be in the allowed set.
pub fn is_authorized(session: Option<&Session>, allowed: &[Role]) -> bool {
    match session {
        Some(session) => allowed.contains(&session.role),
        None => false,
    }
}

async fn require(
    allowed: &[Role],
    state: &AppState,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let session = extract_session(&jar, &state.config);
    if !is_authorized(session.as_ref(), allowed) {
        // 401 for no/invalid session, 403 for a valid session with the
        // wrong role, so clients can tell "log in" from "not allowed".
        return match session {
            None => (
                StatusCode::UNAUTHORIZED,
                error_to_api_response::<()>(
                    error_codes::AUTH_FAILED,
                    "authentication required".to_string(),
                ),
            )
                .into_response(),
            Some(_) => (
                StatusCode::FORBIDDEN,
                error_to_api_response::<()>(
                    error_codes::PERMISSION_DENIED,
                    "insufficient permissions".to_string(),
                ),
            )
                .into_response(),
        };
    }

    if let Some(session) = session {
        request.extensions_mut().insert(session);
    }
    next.run(request).await
}

pub async fn require_auth(
    State(state): State<AppState>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    require(
        &[Role::Admin, Role::Employer, Role::Candidate],
        &state,
        jar,
        request,
        next,
    )
    .await
}

pub async fn require_admin(
    State(state): State<AppState>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    require(&[Role::Admin], &state, jar, request, next).await
}

/// Admin passes every role-gated route, so the allowed sets always include it.
pub async fn require_employer(
    State(state): State<AppState>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    require(&[Role::Employer, Role::Admin], &state, jar, request, next).await
}

pub async fn require_candidate(
    State(state): State<AppState>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    require(&[Role::Candidate, Role::Admin], &state, jar, request, next).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Extension, Json, Router,
        body::Body,
        http::{Request, header},
        middleware::from_fn_with_state,
        routing::get,
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::session::issue_token;

    fn test_config() -> Config {
        Config {
            database_url: "postgres://localhost/tawzeef_test".to_string(),
            jwt_secret: "guard-test-secret".to_string(),
            jwt_expiration_secs: 3600,
            rate_limit_window_secs: 60,
            rate_limit_requests: 100,
            server_host: "127.0.0.1".to_string(),
            server_port: 3000,
            api_base_uri: "/api".to_string(),
            site_admin_email: "admin@example.com".to_string(),
            site_admin_password: "admin-password".to_string(),
        }
    }

    fn test_state() -> AppState {
        AppState {
            pool: sqlx::PgPool::connect_lazy("postgres://localhost/tawzeef_test")
                .expect("lazy pool"),
            config: test_config(),
        }
    }

    async fn whoami(Extension(session): Extension<Session>) -> Json<String> {
        Json(session.subject)
    }

    fn admin_app(state: AppState) -> Router {
        Router::new()
            .route("/admin/ping", get(whoami))
            .layer(from_fn_with_state(state.clone(), require_admin))
            .with_state(state)
    }

    fn employer_app(state: AppState) -> Router {
        Router::new()
            .route("/employer/ping", get(whoami))
            .layer(from_fn_with_state(state.clone(), require_employer))
            .with_state(state)
    }

    fn request_with_cookie(uri: &str, token: Option<&str>) -> Request<Body> {
        let builder = Request::builder().uri(uri);
        let builder = match token {
            Some(token) => builder.header(
                header::COOKIE,
                format!("{}={}", SESSION_COOKIE, token),
            ),
            None => builder,
        };
        builder.body(Body::empty()).unwrap()
    }

    fn session_with_role(role: Role) -> Session {
        Session {
            subject: "u1".to_string(),
            role,
            display_name: "Test".to_string(),
            email: "t@x.com".to_string(),
            expires_at: 0,
        }
    }

    #[test]
    fn test_is_authorized_matrix() {
        let admin = session_with_role(Role::Admin);
        let employer = session_with_role(Role::Employer);
        let candidate = session_with_role(Role::Candidate);

        assert!(!is_authorized(None, &[Role::Admin]));
        assert!(!is_authorized(
            None,
            &[Role::Admin, Role::Employer, Role::Candidate]
        ));

        assert!(is_authorized(Some(&admin), &[Role::Admin]));
        assert!(!is_authorized(Some(&employer), &[Role::Admin]));
        assert!(!is_authorized(Some(&candidate), &[Role::Admin]));

        assert!(is_authorized(Some(&admin), &[Role::Admin, Role::Employer]));
        assert!(is_authorized(Some(&employer), &[Role::Admin, Role::Employer]));
        assert!(!is_authorized(Some(&candidate), &[Role::Admin, Role::Employer]));
    }

    #[test]
    fn test_extract_session_absent_and_garbage() {
        let config = test_config();

        let empty_jar = CookieJar::new();
        assert!(extract_session(&empty_jar, &config).is_none());

        let garbage = empty_jar.add(axum_extra::extract::cookie::Cookie::new(
            SESSION_COOKIE,
            "not-a-token",
        ));
        assert!(extract_session(&garbage, &config).is_none());
    }

    #[tokio::test]
    async fn test_require_admin_absence_propagation() {
        let state = test_state();
        let config = state.config.clone();

        // (a) no cookie, (b) invalid token, (c) valid token with wrong role:
        // none of them may reach the handler.
        let candidate_token =
            issue_token("u1", Role::Candidate, "Amr", "a@x.com", &config).unwrap();
        let employer_token =
            issue_token("u2", Role::Employer, "Huda", "h@x.com", &config).unwrap();

        let cases = [
            (None, StatusCode::UNAUTHORIZED),
            (Some("garbage"), StatusCode::UNAUTHORIZED),
            (Some(candidate_token.as_str()), StatusCode::FORBIDDEN),
            (Some(employer_token.as_str()), StatusCode::FORBIDDEN),
        ];
        for (token, expected) in cases {
            let response = admin_app(state.clone())
                .oneshot(request_with_cookie("/admin/ping", token))
                .await
                .unwrap();
            assert_eq!(response.status(), expected);
        }
    }

    #[tokio::test]
    async fn test_require_admin_accepts_admin() {
        let state = test_state();
        let token = issue_token(
            "site-admin",
            Role::Admin,
            "Administrator",
            "admin@example.com",
            &state.config,
        )
        .unwrap();

        let response = admin_app(state)
            .oneshot(request_with_cookie("/admin/ping", Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_require_employer_admin_superset() {
        let state = test_state();
        let admin_token = issue_token(
            "site-admin",
            Role::Admin,
            "Administrator",
            "admin@example.com",
            &state.config,
        )
        .unwrap();
        let candidate_token =
            issue_token("u1", Role::Candidate, "Amr", "a@x.com", &state.config).unwrap();

        let response = employer_app(state.clone())
            .oneshot(request_with_cookie("/employer/ping", Some(&admin_token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = employer_app(state)
            .oneshot(request_with_cookie("/employer/ping", Some(&candidate_token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_guarded_handler_sees_session_subject() {
        let state = test_state();
        let token =
            issue_token("emp-42", Role::Employer, "Huda", "h@x.com", &state.config)
                .unwrap();

        let response = employer_app(state)
            .oneshot(request_with_cookie("/employer/ping", Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"\"emp-42\"");
    }
}
