use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::routes::lookup::{CITIES, JOB_CATEGORIES, JOB_TYPES, is_known};

#[derive(Debug, Serialize, FromRow)]
pub struct Job {
    pub id: Uuid,
    pub employer_id: Uuid,
    pub title_en: String,
    pub title_ar: String,
    pub description_en: String,
    pub description_ar: String,
    pub category: String,
    pub job_type: String,
    pub city: String,
    pub salary_min: Option<i32>,
    pub salary_max: Option<i32>,
    pub is_open: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct JobPayload {
    pub title_en: String,
    pub title_ar: String,
    pub description_en: String,
    pub description_ar: String,
    pub category: String,
    pub job_type: String,
    pub city: String,
    pub salary_min: Option<i32>,
    pub salary_max: Option<i32>,
}

impl JobPayload {
    pub fn validate(&self) -> Option<&'static str> {
        if self.title_en.trim().is_empty() && self.title_ar.trim().is_empty() {
            return Some("a job title is required in at least one language");
        }
        if self.description_en.trim().is_empty() && self.description_ar.trim().is_empty() {
            return Some("a job description is required in at least one language");
        }
        if !is_known(JOB_CATEGORIES, &self.category) {
            return Some("unknown job category");
        }
        if !is_known(JOB_TYPES, &self.job_type) {
            return Some("unknown job type");
        }
        if !is_known(CITIES, &self.city) {
            return Some("unknown city");
        }
        if let (Some(min), Some(max)) = (self.salary_min, self.salary_max) {
            if min > max {
                return Some("salary range is inverted");
            }
        }
        if self.salary_min.is_some_and(|v| v < 0) || self.salary_max.is_some_and(|v| v < 0) {
            return Some("salary must not be negative");
        }
        None
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct JobFilter {
    pub category: Option<String>,
    pub job_type: Option<String>,
    pub city: Option<String>,
    pub q: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl JobFilter {
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn per_page(&self) -> u32 {
        self.per_page.unwrap_or(20).clamp(1, 100)
    }

    pub fn offset(&self) -> i64 {
        ((self.page() - 1) * self.per_page()) as i64
    }
}

#[derive(Debug, Serialize)]
pub struct JobListResponse {
    pub jobs: Vec<Job>,
    pub page: u32,
    pub per_page: u32,
    pub total: i64,
}

impl Job {
    pub async fn create(
        pool: &PgPool,
        employer_id: Uuid,
        payload: &JobPayload,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Job>(
            r#"
            INSERT INTO jobs
                (employer_id, title_en, title_ar, description_en, description_ar,
                 category, job_type, city, salary_min, salary_max)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(employer_id)
        .bind(&payload.title_en)
        .bind(&payload.title_ar)
        .bind(&payload.description_en)
        .bind(&payload.description_ar)
        .bind(&payload.category)
        .bind(&payload.job_type)
        .bind(&payload.city)
        .bind(payload.salary_min)
        .bind(payload.salary_max)
        .fetch_one(pool)
        .await
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Job>("SELECT * FROM jobs WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Open jobs only, newest first. Every filter is optional.
    pub async fn list_open(
        pool: &PgPool,
        filter: &JobFilter,
    ) -> Result<(Vec<Self>, i64), sqlx::Error> {
        let pattern = filter.q.as_ref().map(|q| format!("%{}%", q.trim()));

        let jobs = sqlx::query_as::<_, Job>(
            r#"
            SELECT * FROM jobs
            WHERE is_open = TRUE
              AND ($1::text IS NULL OR category = $1)
              AND ($2::text IS NULL OR job_type = $2)
              AND ($3::text IS NULL OR city = $3)
              AND ($4::text IS NULL OR title_en ILIKE $4 OR title_ar ILIKE $4
                   OR description_en ILIKE $4 OR description_ar ILIKE $4)
            ORDER BY created_at DESC
            LIMIT $5 OFFSET $6
            "#,
        )
        .bind(&filter.category)
        .bind(&filter.job_type)
        .bind(&filter.city)
        .bind(&pattern)
        .bind(filter.per_page() as i64)
        .bind(filter.offset())
        .fetch_all(pool)
        .await?;

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM jobs
            WHERE is_open = TRUE
              AND ($1::text IS NULL OR category = $1)
              AND ($2::text IS NULL OR job_type = $2)
              AND ($3::text IS NULL OR city = $3)
              AND ($4::text IS NULL OR title_en ILIKE $4 OR title_ar ILIKE $4
                   OR description_en ILIKE $4 OR description_ar ILIKE $4)
            "#,
        )
        .bind(&filter.category)
        .bind(&filter.job_type)
        .bind(&filter.city)
        .bind(&pattern)
        .fetch_one(pool)
        .await?;

        Ok((jobs, total))
    }

    /// All postings of one employer, or every posting when `employer_id` is
    /// `None` (admin view). Closed jobs included.
    pub async fn list_by_employer(
        pool: &PgPool,
        employer_id: Option<Uuid>,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Job>(
            r#"
            SELECT * FROM jobs
            WHERE ($1::uuid IS NULL OR employer_id = $1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(employer_id)
        .fetch_all(pool)
        .await
    }

    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        payload: &JobPayload,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Job>(
            r#"
            UPDATE jobs
            SET title_en = $2, title_ar = $3, description_en = $4, description_ar = $5,
                category = $6, job_type = $7, city = $8, salary_min = $9,
                salary_max = $10, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&payload.title_en)
        .bind(&payload.title_ar)
        .bind(&payload.description_en)
        .bind(&payload.description_ar)
        .bind(&payload.category)
        .bind(&payload.job_type)
        .bind(&payload.city)
        .bind(payload.salary_min)
        .bind(payload.salary_max)
        .fetch_optional(pool)
        .await
    }

    pub async fn close(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Job>(
            "UPDATE jobs SET is_open = FALSE, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> JobPayload {
        JobPayload {
            title_en: "Backend Engineer".to_string(),
            title_ar: "مهندس برمجيات".to_string(),
            description_en: "Build services".to_string(),
            description_ar: "بناء الخدمات".to_string(),
            category: "engineering".to_string(),
            job_type: "full-time".to_string(),
            city: "riyadh".to_string(),
            salary_min: Some(10_000),
            salary_max: Some(18_000),
        }
    }

    #[test]
    fn test_payload_validation() {
        assert!(payload().validate().is_none());

        let mut p = payload();
        p.title_en.clear();
        p.title_ar.clear();
        assert!(p.validate().is_some());

        let mut p = payload();
        p.category = "astrology".to_string();
        assert!(p.validate().is_some());

        let mut p = payload();
        p.salary_min = Some(20_000);
        assert!(p.validate().is_some());

        let mut p = payload();
        p.salary_min = Some(-1);
        p.salary_max = None;
        assert!(p.validate().is_some());
    }

    #[test]
    fn test_single_language_payload_is_valid() {
        let mut p = payload();
        p.title_en.clear();
        p.description_en.clear();
        assert!(p.validate().is_none());
    }

    #[test]
    fn test_filter_pagination_bounds() {
        let filter = JobFilter::default();
        assert_eq!(filter.page(), 1);
        assert_eq!(filter.per_page(), 20);
        assert_eq!(filter.offset(), 0);

        let filter = JobFilter {
            page: Some(3),
            per_page: Some(500),
            ..Default::default()
        };
        assert_eq!(filter.per_page(), 100);
        assert_eq!(filter.offset(), 200);

        let filter = JobFilter {
            page: Some(0),
            ..Default::default()
        };
        assert_eq!(filter.page(), 1);
    }
}
