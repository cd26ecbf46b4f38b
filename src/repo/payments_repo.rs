use crate::domain::payment::{PaymentKind, PaymentMethod, PaymentStatus};
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{PgPool, Postgres, Row, Transaction};
use uuid::Uuid;

pub struct NewPayment {
    pub payment_id: Uuid,
    pub tran_ref: String,
    pub kind: PaymentKind,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub amount_minor: i64,
    pub currency: String,
    pub payer_id: Uuid,
    pub campaign_id: Option<Uuid>,
    pub fee_month: Option<i32>,
    pub fee_year: Option<i32>,
    pub note: Option<String>,
    pub metadata: Value,
}

#[derive(Debug, Clone)]
pub struct StoredPayment {
    pub payment_id: Uuid,
    pub tran_ref: String,
    pub kind: String,
    pub method: String,
    pub status: String,
    pub amount_minor: i64,
    pub currency: String,
    pub payer_id: Uuid,
    pub campaign_id: Option<Uuid>,
    pub fee_month: Option<i32>,
    pub fee_year: Option<i32>,
    pub note: Option<String>,
    pub metadata: Value,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct PaymentsRepo {
    pub pool: PgPool,
}

const SELECT_COLS: &str = "payment_id, tran_ref, kind, method, status, amount_minor, currency, payer_id, campaign_id, fee_month, fee_year, note, metadata, created_at";

impl PaymentsRepo {
    pub async fn insert(&self, data: &NewPayment) -> anyhow::Result<()> {
        let mut tx = self.pool.begin().await?;
        Self::insert_tx(&mut tx, data).await?;
        tx.commit().await?;
        Ok(())
    }

    pub async fn insert_tx(
        tx: &mut Transaction<'_, Postgres>,
        data: &NewPayment,
    ) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO payments (
                payment_id, tran_ref, kind, method, status, amount_minor, currency,
                payer_id, campaign_id, fee_month, fee_year, note, metadata
            ) VALUES (
                $1, $2, $3, $4, $5, $6, $7,
                $8, $9, $10, $11, $12, $13
            )
            "#,
        )
        .bind(data.payment_id)
        .bind(data.tran_ref.clone())
        .bind(data.kind.as_db_str())
        .bind(data.method.as_db_str())
        .bind(data.status.as_db_str())
        .bind(data.amount_minor)
        .bind(data.currency.clone())
        .bind(data.payer_id)
        .bind(data.campaign_id)
        .bind(data.fee_month)
        .bind(data.fee_year)
        .bind(data.note.clone())
        .bind(data.metadata.clone())
        .execute(tx.as_mut())
        .await?;

        Ok(())
    }

    pub async fn find_by_id(&self, payment_id: Uuid) -> anyhow::Result<Option<StoredPayment>> {
        let row = sqlx::query(&format!(
            "SELECT {SELECT_COLS} FROM payments WHERE payment_id = $1"
        ))
        .bind(payment_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(to_stored))
    }

    /// Conditional transition: only an `INITIATED` record is updated, so two
    /// concurrent callback deliveries cannot both win. Returns whether this
    /// caller performed the transition.
    pub async fn settle_if_initiated_tx(
        tx: &mut Transaction<'_, Postgres>,
        payment_id: Uuid,
        to: PaymentStatus,
        metadata_patch: Value,
    ) -> anyhow::Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE payments
            SET status = $2, metadata = metadata || $3, updated_at = now()
            WHERE payment_id = $1 AND status = 'INITIATED'
            "#,
        )
        .bind(payment_id)
        .bind(to.as_db_str())
        .bind(metadata_patch)
        .execute(tx.as_mut())
        .await?;

        Ok(result.rows_affected() == 1)
    }

    pub async fn fail_if_initiated(
        &self,
        payment_id: Uuid,
        metadata_patch: Value,
    ) -> anyhow::Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE payments
            SET status = 'FAILED', metadata = metadata || $2, updated_at = now()
            WHERE payment_id = $1 AND status = 'INITIATED'
            "#,
        )
        .bind(payment_id)
        .bind(metadata_patch)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    pub async fn merge_metadata(
        &self,
        payment_id: Uuid,
        metadata_patch: Value,
    ) -> anyhow::Result<()> {
        sqlx::query(
            "UPDATE payments SET metadata = metadata || $2, updated_at = now() WHERE payment_id = $1",
        )
        .bind(payment_id)
        .bind(metadata_patch)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn list_by_payer(&self, payer_id: Uuid) -> anyhow::Result<Vec<StoredPayment>> {
        let rows = sqlx::query(&format!(
            "SELECT {SELECT_COLS} FROM payments WHERE payer_id = $1 ORDER BY created_at DESC"
        ))
        .bind(payer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(to_stored).collect())
    }

    pub async fn paid_fee_months(
        &self,
        payer_id: Uuid,
        year: i32,
    ) -> anyhow::Result<Vec<(i32, i64)>> {
        let rows = sqlx::query(
            r#"
            SELECT fee_month, amount_minor
            FROM payments
            WHERE payer_id = $1 AND fee_year = $2 AND kind = 'MONTHLY_FEE' AND status = 'PAID'
            ORDER BY fee_month ASC
            "#,
        )
        .bind(payer_id)
        .bind(year)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| (r.get::<i32, _>("fee_month"), r.get::<i64, _>("amount_minor")))
            .collect())
    }
}

fn to_stored(r: sqlx::postgres::PgRow) -> StoredPayment {
    StoredPayment {
        payment_id: r.get("payment_id"),
        tran_ref: r.get("tran_ref"),
        kind: r.get("kind"),
        method: r.get("method"),
        status: r.get("status"),
        amount_minor: r.get("amount_minor"),
        currency: r.get("currency"),
        payer_id: r.get("payer_id"),
        campaign_id: r.get("campaign_id"),
        fee_month: r.get("fee_month"),
        fee_year: r.get("fee_year"),
        note: r.get("note"),
        metadata: r.get("metadata"),
        created_at: r.get("created_at"),
    }
}
