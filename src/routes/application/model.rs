use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ApplicationStatus {
    Pending,
    Reviewed,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "PENDING" => Some(ApplicationStatus::Pending),
            "REVIEWED" => Some(ApplicationStatus::Reviewed),
            "ACCEPTED" => Some(ApplicationStatus::Accepted),
            "REJECTED" => Some(ApplicationStatus::Rejected),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "PENDING",
            ApplicationStatus::Reviewed => "REVIEWED",
            ApplicationStatus::Accepted => "ACCEPTED",
            ApplicationStatus::Rejected => "REJECTED",
        }
    }
}

#[derive(Debug, Serialize, FromRow)]
pub struct Application {
    pub id: Uuid,
    pub job_id: Uuid,
    pub candidate_id: Uuid,
    pub cover_letter: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An application joined with the employer owning its job, for ownership
/// checks on status updates.
#[derive(Debug, FromRow)]
pub struct ApplicationWithEmployer {
    pub id: Uuid,
    pub employer_id: Uuid,
}

/// Candidate-facing listing row: the application plus a summary of its job.
#[derive(Debug, Serialize, FromRow)]
pub struct CandidateApplication {
    pub id: Uuid,
    pub job_id: Uuid,
    pub cover_letter: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub job_title_en: String,
    pub job_title_ar: String,
    pub job_city: String,
    pub job_is_open: bool,
}

/// Employer-facing listing row: the application plus the candidate identity.
#[derive(Debug, Serialize, FromRow)]
pub struct EmployerApplication {
    pub id: Uuid,
    pub job_id: Uuid,
    pub candidate_id: Uuid,
    pub cover_letter: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub candidate_name: String,
    pub candidate_email: String,
    pub candidate_headline: String,
}

#[derive(Debug, Deserialize)]
pub struct ApplyRequest {
    pub cover_letter: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

impl Application {
    pub async fn create(
        pool: &PgPool,
        job_id: Uuid,
        candidate_id: Uuid,
        cover_letter: &str,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Application>(
            r#"
            INSERT INTO applications (job_id, candidate_id, cover_letter, status)
            VALUES ($1, $2, $3, 'PENDING')
            RETURNING *
            "#,
        )
        .bind(job_id)
        .bind(candidate_id)
        .bind(cover_letter)
        .fetch_one(pool)
        .await
    }

    pub async fn list_for_candidate(
        pool: &PgPool,
        candidate_id: Uuid,
    ) -> Result<Vec<CandidateApplication>, sqlx::Error> {
        sqlx::query_as::<_, CandidateApplication>(
            r#"
            SELECT a.id, a.job_id, a.cover_letter, a.status, a.created_at,
                   j.title_en AS job_title_en, j.title_ar AS job_title_ar,
                   j.city AS job_city, j.is_open AS job_is_open
            FROM applications a
            JOIN jobs j ON j.id = a.job_id
            WHERE a.candidate_id = $1
            ORDER BY a.created_at DESC
            "#,
        )
        .bind(candidate_id)
        .fetch_all(pool)
        .await
    }

    pub async fn list_for_job(
        pool: &PgPool,
        job_id: Uuid,
    ) -> Result<Vec<EmployerApplication>, sqlx::Error> {
        sqlx::query_as::<_, EmployerApplication>(
            r#"
            SELECT a.id, a.job_id, a.candidate_id, a.cover_letter, a.status,
                   a.created_at,
                   u.display_name AS candidate_name, u.email AS candidate_email,
                   COALESCE(p.headline, '') AS candidate_headline
            FROM applications a
            JOIN users u ON u.id = a.candidate_id
            LEFT JOIN candidate_profiles p ON p.user_id = a.candidate_id
            WHERE a.job_id = $1
            ORDER BY a.created_at DESC
            "#,
        )
        .bind(job_id)
        .fetch_all(pool)
        .await
    }

    pub async fn find_with_employer(
        pool: &PgPool,
        id: Uuid,
    ) -> Result<Option<ApplicationWithEmployer>, sqlx::Error> {
        sqlx::query_as::<_, ApplicationWithEmployer>(
            r#"
            SELECT a.id, j.employer_id
            FROM applications a
            JOIN jobs j ON j.id = a.job_id
            WHERE a.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    pub async fn update_status(
        pool: &PgPool,
        id: Uuid,
        status: ApplicationStatus,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Application>(
            r#"
            UPDATE applications
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(pool)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_round_trip() {
        for status in [
            ApplicationStatus::Pending,
            ApplicationStatus::Reviewed,
            ApplicationStatus::Accepted,
            ApplicationStatus::Rejected,
        ] {
            assert_eq!(ApplicationStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn test_status_parse_rejects_unknown() {
        assert_eq!(ApplicationStatus::parse("pending"), None);
        assert_eq!(ApplicationStatus::parse("WITHDRAWN"), None);
        assert_eq!(ApplicationStatus::parse(""), None);
    }
}
