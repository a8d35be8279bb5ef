//! Signed session tokens and the role model shared by every protected route.

use axum_extra::extract::cookie::{Cookie, SameSite};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::Config;

pub const SESSION_COOKIE: &str = "tawzeef_session";

/// Subject used for the single configured admin identity that has no users row.
pub const SITE_ADMIN_SUBJECT: &str = "site-admin";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Employer,
    Candidate,
}

impl Role {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ADMIN" => Some(Role::Admin),
            "EMPLOYER" => Some(Role::Employer),
            "CANDIDATE" => Some(Role::Candidate),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Employer => "EMPLOYER",
            Role::Candidate => "CANDIDATE",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wire payload of the session token. `role` stays a plain string here and is
/// narrowed into [`Role`] when the session is built, so a well-signed token
/// carrying an unknown role is rejected instead of partially trusted.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub name: String,
    pub email: String,
    pub exp: i64,
    pub iat: i64,
}

/// Verified identity of a request. Only ever produced by [`verify_token`].
#[derive(Debug, Clone)]
pub struct Session {
    pub subject: String,
    pub role: Role,
    pub display_name: String,
    pub email: String,
    pub expires_at: i64,
}

impl Session {
    fn from_claims(claims: Claims) -> Option<Self> {
        let role = Role::parse(&claims.role)?;
        Some(Session {
            subject: claims.sub,
            role,
            display_name: claims.name,
            email: claims.email,
            expires_at: claims.exp,
        })
    }

    /// Ownership rule shared by every mutable resource: admins may touch any
    /// row, everyone else only rows they own.
    pub fn can_modify(&self, owner_id: &str) -> bool {
        self.role == Role::Admin || self.subject == owner_id
    }
}

pub fn issue_token(
    subject: &str,
    role: Role,
    display_name: &str,
    email: &str,
    config: &Config,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let expiration = now
        .checked_add_signed(Duration::seconds(config.jwt_expiration().as_secs() as i64))
        .expect("valid timestamp")
        .timestamp();

    let claims = Claims {
        sub: subject.to_string(),
        role: role.as_str().to_string(),
        name: display_name.to_string(),
        email: email.to_string(),
        exp: expiration,
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
}

/// Every failure path collapses to `None`: bad signature, expired, missing or
/// malformed claims, unknown role. Callers cannot tell why a token failed.
pub fn verify_token(token: &str, config: &Config) -> Option<Session> {
    // Default leeway is 60s, which would accept freshly expired tokens.
    let mut validation = Validation::default();
    validation.leeway = 0;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &validation,
    )
    .ok()
    .and_then(|data| Session::from_claims(data.claims))
}

pub fn session_cookie(token: String, config: &Config) -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, token);
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie.set_secure(!cfg!(debug_assertions));
    cookie.set_path("/");
    cookie.set_max_age(time::Duration::seconds(
        config.jwt_expiration().as_secs() as i64
    ));
    cookie
}

pub fn clear_session_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, "");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie.set_secure(!cfg!(debug_assertions));
    cookie.set_path("/");
    cookie.set_max_age(time::Duration::ZERO);
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            database_url: "postgres://localhost/tawzeef_test".to_string(),
            jwt_secret: "test-secret-do-not-use".to_string(),
            jwt_expiration_secs: 7 * 24 * 3600,
            rate_limit_window_secs: 60,
            rate_limit_requests: 100,
            server_host: "127.0.0.1".to_string(),
            server_port: 3000,
            api_base_uri: "/api".to_string(),
            site_admin_email: "admin@example.com".to_string(),
            site_admin_password: "admin-password".to_string(),
        }
    }

    #[test]
    fn test_issue_verify_round_trip() {
        let config = test_config();
        let token =
            issue_token("u1", Role::Candidate, "Amr", "a@x.com", &config).unwrap();

        let session = verify_token(&token, &config).expect("fresh token must verify");
        assert_eq!(session.subject, "u1");
        assert_eq!(session.role, Role::Candidate);
        assert_eq!(session.display_name, "Amr");
        assert_eq!(session.email, "a@x.com");

        let expected_exp = Utc::now().timestamp() + 7 * 24 * 3600;
        assert!((session.expires_at - expected_exp).abs() <= 5);
    }

    #[test]
    fn test_tampered_token_rejected() {
        let config = test_config();
        let token =
            issue_token("u1", Role::Employer, "Huda", "h@x.com", &config).unwrap();

        for i in 0..token.len() {
            let mut bytes = token.clone().into_bytes();
            bytes[i] = if bytes[i] == b'a' { b'b' } else { b'a' };
            let Ok(tampered) = String::from_utf8(bytes) else {
                continue;
            };
            if tampered == token {
                continue;
            }
            assert!(
                verify_token(&tampered, &config).is_none(),
                "flipped byte {} still verified",
                i
            );
        }
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let config = test_config();
        let token = issue_token("u1", Role::Admin, "Root", "r@x.com", &config).unwrap();

        let mut other = test_config();
        other.jwt_secret = "another-secret".to_string();
        assert!(verify_token(&token, &other).is_none());
    }

    #[test]
    fn test_expired_token_rejected() {
        let config = test_config();
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "u1".to_string(),
            role: "CANDIDATE".to_string(),
            name: "Amr".to_string(),
            email: "a@x.com".to_string(),
            exp: now - 1,
            iat: now - 10,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
        )
        .unwrap();

        // Signature is valid; only the expiry is in the past.
        assert!(verify_token(&token, &config).is_none());
    }

    #[test]
    fn test_unknown_role_rejected() {
        let config = test_config();
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "u1".to_string(),
            role: "SUPERVISOR".to_string(),
            name: "Amr".to_string(),
            email: "a@x.com".to_string(),
            exp: now + 3600,
            iat: now,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
        )
        .unwrap();

        assert!(verify_token(&token, &config).is_none());
    }

    #[test]
    fn test_missing_claims_rejected() {
        let config = test_config();
        let now = Utc::now().timestamp();
        // Well-signed payload without a role claim.
        let payload = serde_json::json!({
            "sub": "u1",
            "name": "Amr",
            "email": "a@x.com",
            "exp": now + 3600,
            "iat": now,
        });
        let token = encode(
            &Header::default(),
            &payload,
            &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
        )
        .unwrap();

        assert!(verify_token(&token, &config).is_none());
    }

    #[test]
    fn test_role_parse() {
        assert_eq!(Role::parse("ADMIN"), Some(Role::Admin));
        assert_eq!(Role::parse("EMPLOYER"), Some(Role::Employer));
        assert_eq!(Role::parse("CANDIDATE"), Some(Role::Candidate));
        assert_eq!(Role::parse("admin"), None);
        assert_eq!(Role::parse(""), None);
        assert_eq!(Role::parse("SUPERVISOR"), None);
    }

    #[test]
    fn test_role_serde_uses_uppercase() {
        assert_eq!(serde_json::to_string(&Role::Employer).unwrap(), "\"EMPLOYER\"");
        let parsed: Role = serde_json::from_str("\"CANDIDATE\"").unwrap();
        assert_eq!(parsed, Role::Candidate);
    }

    #[test]
    fn test_can_modify() {
        let owner = Session {
            subject: "u1".to_string(),
            role: Role::Employer,
            display_name: "Huda".to_string(),
            email: "h@x.com".to_string(),
            expires_at: 0,
        };
        assert!(owner.can_modify("u1"));
        assert!(!owner.can_modify("u2"));

        let admin = Session {
            subject: SITE_ADMIN_SUBJECT.to_string(),
            role: Role::Admin,
            display_name: "Administrator".to_string(),
            email: "admin@example.com".to_string(),
            expires_at: 0,
        };
        assert!(admin.can_modify("u1"));
        assert!(admin.can_modify("u2"));
    }

    #[test]
    fn test_session_cookie_attributes() {
        let config = test_config();
        let cookie = session_cookie("token-value".to_string(), &config);

        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(
            cookie.max_age(),
            Some(time::Duration::seconds(7 * 24 * 3600))
        );
    }

    #[test]
    fn test_clear_cookie_expires_immediately() {
        let cookie = clear_session_cookie();
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
    }
}
