use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct StatusMethodTotal {
    pub status: String,
    pub method: String,
    pub count: i64,
    pub total_minor: i64,
}

#[derive(Debug, Clone)]
pub struct CampaignTotal {
    pub campaign_id: Uuid,
    pub slug: String,
    pub title: String,
    pub target_amount_minor: i64,
    pub raised_amount_minor: i64,
}

#[derive(Clone)]
pub struct ReportsRepo {
    pub pool: PgPool,
}

// SUM over bigint widens to NUMERIC in Postgres; the cast back to bigint
// keeps the column decodable as i64.
pub const STATUS_METHOD_TOTALS_SQL: &str = r#"
    SELECT status, method, COUNT(*) AS count,
           COALESCE(SUM(amount_minor), 0)::bigint AS total_minor
    FROM payments
    WHERE created_at >= $1 AND created_at < $2
    GROUP BY status, method
    ORDER BY status, method
"#;

impl ReportsRepo {
    pub async fn totals_by_status_and_method(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> anyhow::Result<Vec<StatusMethodTotal>> {
        let rows = sqlx::query(STATUS_METHOD_TOTALS_SQL)
            .bind(from)
            .bind(to)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|r| StatusMethodTotal {
                status: r.get("status"),
                method: r.get("method"),
                count: r.get("count"),
                total_minor: r.get("total_minor"),
            })
            .collect())
    }

    pub async fn campaign_totals(&self) -> anyhow::Result<Vec<CampaignTotal>> {
        let rows = sqlx::query(
            r#"
            SELECT campaign_id, slug, title, target_amount_minor, raised_amount_minor
            FROM campaigns
            ORDER BY raised_amount_minor DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| CampaignTotal {
                campaign_id: r.get("campaign_id"),
                slug: r.get("slug"),
                title: r.get("title"),
                target_amount_minor: r.get("target_amount_minor"),
                raised_amount_minor: r.get("raised_amount_minor"),
            })
            .collect())
    }
}
