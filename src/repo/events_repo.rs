use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct Event {
    pub event_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub venue: Option<String>,
    pub starts_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct EventsRepo {
    pub pool: PgPool,
}

impl EventsRepo {
    pub async fn create(
        &self,
        title: &str,
        description: Option<&str>,
        venue: Option<&str>,
        starts_at: DateTime<Utc>,
    ) -> anyhow::Result<Uuid> {
        let event_id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO events (event_id, title, description, venue, starts_at) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(event_id)
        .bind(title)
        .bind(description)
        .bind(venue)
        .bind(starts_at)
        .execute(&self.pool)
        .await?;

        Ok(event_id)
    }

    pub async fn list_upcoming(&self) -> anyhow::Result<Vec<Event>> {
        let rows = sqlx::query(
            "SELECT event_id, title, description, venue, starts_at FROM events WHERE starts_at >= now() ORDER BY starts_at ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| Event {
                event_id: r.get("event_id"),
                title: r.get("title"),
                description: r.get("description"),
                venue: r.get("venue"),
                starts_at: r.get("starts_at"),
            })
            .collect())
    }
}
