use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

#[derive(Debug, Serialize, FromRow)]
pub struct EmployerProfile {
    pub user_id: Uuid,
    pub company_name_en: String,
    pub company_name_ar: String,
    pub website: String,
    pub about_en: String,
    pub about_ar: String,
    pub city: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateEmployerProfileRequest {
    pub company_name_en: String,
    pub company_name_ar: String,
    pub website: String,
    pub about_en: String,
    pub about_ar: String,
    pub city: String,
}

impl UpdateEmployerProfileRequest {
    pub fn validate(&self) -> Option<&'static str> {
        if self.company_name_en.trim().is_empty() && self.company_name_ar.trim().is_empty() {
            return Some("a company name is required in at least one language");
        }
        None
    }
}

impl EmployerProfile {
    pub async fn find(pool: &PgPool, user_id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, EmployerProfile>(
            "SELECT * FROM employer_profiles WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await
    }

    pub async fn update(
        pool: &PgPool,
        user_id: Uuid,
        req: &UpdateEmployerProfileRequest,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, EmployerProfile>(
            r#"
            UPDATE employer_profiles
            SET company_name_en = $2, company_name_ar = $3, website = $4,
                about_en = $5, about_ar = $6, city = $7, updated_at = NOW()
            WHERE user_id = $1
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(&req.company_name_en)
        .bind(&req.company_name_ar)
        .bind(&req.website)
        .bind(&req.about_en)
        .bind(&req.about_ar)
        .bind(&req.city)
        .fetch_optional(pool)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_company_name_required_in_one_language() {
        let mut req = UpdateEmployerProfileRequest {
            company_name_en: "Acme".to_string(),
            company_name_ar: String::new(),
            website: String::new(),
            about_en: String::new(),
            about_ar: String::new(),
            city: String::new(),
        };
        assert!(req.validate().is_none());

        req.company_name_en.clear();
        assert!(req.validate().is_some());

        req.company_name_ar = "أكمي".to_string();
        assert!(req.validate().is_none());
    }
}
