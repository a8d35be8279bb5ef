use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

#[derive(Debug, Serialize, FromRow)]
pub struct CandidateProfile {
    pub user_id: Uuid,
    pub headline: String,
    pub bio: String,
    pub phone: String,
    pub city: String,
    pub years_experience: i32,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCandidateProfileRequest {
    pub headline: String,
    pub bio: String,
    pub phone: String,
    pub city: String,
    pub years_experience: i32,
}

impl CandidateProfile {
    pub async fn find(pool: &PgPool, user_id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, CandidateProfile>(
            "SELECT * FROM candidate_profiles WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await
    }

    pub async fn update(
        pool: &PgPool,
        user_id: Uuid,
        req: &UpdateCandidateProfileRequest,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, CandidateProfile>(
            r#"
            UPDATE candidate_profiles
            SET headline = $2, bio = $3, phone = $4, city = $5,
                years_experience = $6, updated_at = NOW()
            WHERE user_id = $1
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(&req.headline)
        .bind(&req.bio)
        .bind(&req.phone)
        .bind(&req.city)
        .bind(req.years_experience)
        .fetch_optional(pool)
        .await
    }
}
