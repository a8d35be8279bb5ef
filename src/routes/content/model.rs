use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

#[derive(Debug, Serialize, FromRow)]
pub struct AboutPage {
    pub body_en: String,
    pub body_ar: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateAboutRequest {
    pub body_en: String,
    pub body_ar: String,
}

#[derive(Debug, Serialize, FromRow)]
pub struct BlogPost {
    pub id: Uuid,
    pub slug: String,
    pub title_en: String,
    pub title_ar: String,
    pub body_en: String,
    pub body_ar: String,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct BlogPostPayload {
    pub slug: String,
    pub title_en: String,
    pub title_ar: String,
    pub body_en: String,
    pub body_ar: String,
    pub published: bool,
}

impl BlogPostPayload {
    pub fn validate(&self) -> Option<&'static str> {
        if !is_valid_slug(&self.slug) {
            return Some("slug must be lowercase letters, digits and hyphens");
        }
        if self.title_en.trim().is_empty() && self.title_ar.trim().is_empty() {
            return Some("a title is required in at least one language");
        }
        None
    }
}

pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

#[derive(Debug, Serialize, FromRow)]
pub struct SiteSetting {
    pub setting_key: String,
    pub value_en: String,
    pub value_ar: String,
}

#[derive(Debug, Deserialize)]
pub struct SettingPayload {
    pub setting_key: String,
    pub value_en: String,
    pub value_ar: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSettingsRequest {
    pub settings: Vec<SettingPayload>,
}

/// Admin listing row; no password material leaves the database layer.
#[derive(Debug, Serialize, FromRow)]
pub struct UserOverview {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl AboutPage {
    pub async fn get(pool: &PgPool) -> Result<Self, sqlx::Error> {
        // Row 1 is seeded by the migrations.
        sqlx::query_as::<_, AboutPage>(
            "SELECT body_en, body_ar, updated_at FROM about_page WHERE id = 1",
        )
        .fetch_one(pool)
        .await
    }

    pub async fn update(pool: &PgPool, req: &UpdateAboutRequest) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, AboutPage>(
            r#"
            UPDATE about_page
            SET body_en = $1, body_ar = $2, updated_at = NOW()
            WHERE id = 1
            RETURNING body_en, body_ar, updated_at
            "#,
        )
        .bind(&req.body_en)
        .bind(&req.body_ar)
        .fetch_one(pool)
        .await
    }
}

impl BlogPost {
    pub async fn list_published(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, BlogPost>(
            "SELECT * FROM blog_posts WHERE published = TRUE ORDER BY created_at DESC",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn find_published_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, BlogPost>(
            "SELECT * FROM blog_posts WHERE slug = $1 AND published = TRUE",
        )
        .bind(slug)
        .fetch_optional(pool)
        .await
    }

    pub async fn create(pool: &PgPool, payload: &BlogPostPayload) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, BlogPost>(
            r#"
            INSERT INTO blog_posts (slug, title_en, title_ar, body_en, body_ar, published)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&payload.slug)
        .bind(&payload.title_en)
        .bind(&payload.title_ar)
        .bind(&payload.body_en)
        .bind(&payload.body_ar)
        .bind(payload.published)
        .fetch_one(pool)
        .await
    }

    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        payload: &BlogPostPayload,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, BlogPost>(
            r#"
            UPDATE blog_posts
            SET slug = $2, title_en = $3, title_ar = $4, body_en = $5, body_ar = $6,
                published = $7, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&payload.slug)
        .bind(&payload.title_en)
        .bind(&payload.title_ar)
        .bind(&payload.body_en)
        .bind(&payload.body_ar)
        .bind(payload.published)
        .fetch_optional(pool)
        .await
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM blog_posts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}

impl SiteSetting {
    pub async fn get_all(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, SiteSetting>(
            "SELECT setting_key, value_en, value_ar FROM site_settings ORDER BY setting_key",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn upsert_many(
        pool: &PgPool,
        settings: &[SettingPayload],
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;
        for setting in settings {
            sqlx::query(
                r#"
                INSERT INTO site_settings (setting_key, value_en, value_ar)
                VALUES ($1, $2, $3)
                ON CONFLICT (setting_key)
                DO UPDATE SET value_en = $2, value_ar = $3, updated_at = NOW()
                "#,
            )
            .bind(&setting.setting_key)
            .bind(&setting.value_en)
            .bind(&setting.value_ar)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await
    }
}

impl UserOverview {
    pub async fn list(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, UserOverview>(
            r#"
            SELECT id, email, display_name, role, created_at
            FROM users
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_validation() {
        assert!(is_valid_slug("hiring-trends-2026"));
        assert!(is_valid_slug("a"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("-leading"));
        assert!(!is_valid_slug("trailing-"));
        assert!(!is_valid_slug("With-Caps"));
        assert!(!is_valid_slug("has spaces"));
        assert!(!is_valid_slug("under_score"));
    }

    #[test]
    fn test_blog_payload_needs_one_title() {
        let mut payload = BlogPostPayload {
            slug: "first-post".to_string(),
            title_en: String::new(),
            title_ar: "أول تدوينة".to_string(),
            body_en: String::new(),
            body_ar: String::new(),
            published: false,
        };
        assert!(payload.validate().is_none());

        payload.title_ar.clear();
        assert!(payload.validate().is_some());
    }
}
