use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Row, Transaction};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct Campaign {
    pub campaign_id: Uuid,
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub target_amount_minor: i64,
    pub raised_amount_minor: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct CampaignsRepo {
    pub pool: PgPool,
}

const SELECT_COLS: &str =
    "campaign_id, slug, title, description, target_amount_minor, raised_amount_minor, created_at";

impl CampaignsRepo {
    pub async fn create(
        &self,
        slug: &str,
        title: &str,
        description: Option<&str>,
        target_amount_minor: i64,
    ) -> anyhow::Result<Uuid> {
        let campaign_id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO campaigns (campaign_id, slug, title, description, target_amount_minor)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(campaign_id)
        .bind(slug)
        .bind(title)
        .bind(description)
        .bind(target_amount_minor)
        .execute(&self.pool)
        .await?;

        Ok(campaign_id)
    }

    pub async fn list(&self) -> anyhow::Result<Vec<Campaign>> {
        let rows = sqlx::query(&format!(
            "SELECT {SELECT_COLS} FROM campaigns ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(to_campaign).collect())
    }

    pub async fn find_by_slug(&self, slug: &str) -> anyhow::Result<Option<Campaign>> {
        let row = sqlx::query(&format!("SELECT {SELECT_COLS} FROM campaigns WHERE slug = $1"))
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(to_campaign))
    }

    /// Atomic increment of the running total; shares the caller's transaction
    /// with the status transition so a credit is never applied twice.
    pub async fn increment_raised_tx(
        tx: &mut Transaction<'_, Postgres>,
        campaign_id: Uuid,
        amount_minor: i64,
    ) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE campaigns
            SET raised_amount_minor = raised_amount_minor + $2, updated_at = now()
            WHERE campaign_id = $1
            "#,
        )
        .bind(campaign_id)
        .bind(amount_minor)
        .execute(tx.as_mut())
        .await?;

        Ok(())
    }
}

fn to_campaign(r: sqlx::postgres::PgRow) -> Campaign {
    Campaign {
        campaign_id: r.get("campaign_id"),
        slug: r.get("slug"),
        title: r.get("title"),
        description: r.get("description"),
        target_amount_minor: r.get("target_amount_minor"),
        raised_amount_minor: r.get("raised_amount_minor"),
        created_at: r.get("created_at"),
    }
}
