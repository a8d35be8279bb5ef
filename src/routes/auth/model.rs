use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::utils::hash_password;

#[derive(Debug, Serialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub role: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct RegisterCandidateRequest {
    pub email: String,
    pub password: String,
    pub display_name: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterEmployerRequest {
    pub email: String,
    pub password: String,
    pub display_name: String,
    pub company_name: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthUserResponse {
    pub user_id: String,
    pub email: String,
    pub display_name: String,
    pub role: String,
}

impl User {
    pub async fn create_candidate(
        pool: &PgPool,
        req: RegisterCandidateRequest,
    ) -> Result<Self, sqlx::Error> {
        let password_hash = hash_password(&req.password)
            .map_err(|e| sqlx::Error::Protocol(format!("failed to hash password: {}", e)))?;

        let mut tx = pool.begin().await?;
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, display_name, role, password_hash)
            VALUES ($1, $2, 'CANDIDATE', $3)
            RETURNING id, email, display_name, role, password_hash, created_at
            "#,
        )
        .bind(&req.email)
        .bind(&req.display_name)
        .bind(&password_hash)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO candidate_profiles (user_id) VALUES ($1)")
            .bind(user.id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(user)
    }

    pub async fn create_employer(
        pool: &PgPool,
        req: RegisterEmployerRequest,
    ) -> Result<Self, sqlx::Error> {
        let password_hash = hash_password(&req.password)
            .map_err(|e| sqlx::Error::Protocol(format!("failed to hash password: {}", e)))?;

        let mut tx = pool.begin().await?;
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, display_name, role, password_hash)
            VALUES ($1, $2, 'EMPLOYER', $3)
            RETURNING id, email, display_name, role, password_hash, created_at
            "#,
        )
        .bind(&req.email)
        .bind(&req.display_name)
        .bind(&password_hash)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            "INSERT INTO employer_profiles (user_id, company_name_en) VALUES ($1, $2)",
        )
        .bind(user.id)
        .bind(&req.company_name)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        Ok(user)
    }

    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, display_name, role, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(pool)
        .await
    }
}
