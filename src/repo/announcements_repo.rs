use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct Announcement {
    pub announcement_id: Uuid,
    pub title: String,
    pub body: String,
    pub published_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct AnnouncementsRepo {
    pub pool: PgPool,
}

impl AnnouncementsRepo {
    pub async fn create(&self, title: &str, body: &str) -> anyhow::Result<Uuid> {
        let announcement_id = Uuid::new_v4();
        sqlx::query("INSERT INTO announcements (announcement_id, title, body) VALUES ($1, $2, $3)")
            .bind(announcement_id)
            .bind(title)
            .bind(body)
            .execute(&self.pool)
            .await?;

        Ok(announcement_id)
    }

    pub async fn list_recent(&self, limit: i64) -> anyhow::Result<Vec<Announcement>> {
        let rows = sqlx::query(
            "SELECT announcement_id, title, body, published_at FROM announcements ORDER BY published_at DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| Announcement {
                announcement_id: r.get("announcement_id"),
                title: r.get("title"),
                body: r.get("body"),
                published_at: r.get("published_at"),
            })
            .collect())
    }
}
