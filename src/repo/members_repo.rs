use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct Member {
    pub member_id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub status: String,
    pub applied_at: DateTime<Utc>,
}

impl Member {
    pub fn is_approved(&self) -> bool {
        self.status == "APPROVED"
    }
}

#[derive(Clone)]
pub struct MembersRepo {
    pub pool: PgPool,
}

const SELECT_COLS: &str = "member_id, full_name, email, phone, status, applied_at";

impl MembersRepo {
    pub async fn apply(
        &self,
        full_name: &str,
        email: &str,
        phone: Option<&str>,
    ) -> anyhow::Result<Uuid> {
        let member_id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO members (member_id, full_name, email, phone) VALUES ($1, $2, $3, $4)",
        )
        .bind(member_id)
        .bind(full_name)
        .bind(email)
        .bind(phone)
        .execute(&self.pool)
        .await?;

        Ok(member_id)
    }

    pub async fn find_by_id(&self, member_id: Uuid) -> anyhow::Result<Option<Member>> {
        let row = sqlx::query(&format!("SELECT {SELECT_COLS} FROM members WHERE member_id = $1"))
            .bind(member_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(to_member))
    }

    pub async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<Member>> {
        let row = sqlx::query(&format!("SELECT {SELECT_COLS} FROM members WHERE email = $1"))
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(to_member))
    }

    pub async fn list_by_status(&self, status: &str) -> anyhow::Result<Vec<Member>> {
        let rows = sqlx::query(&format!(
            "SELECT {SELECT_COLS} FROM members WHERE status = $1 ORDER BY applied_at ASC"
        ))
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(to_member).collect())
    }

    pub async fn decide(&self, member_id: Uuid, status: &str) -> anyhow::Result<bool> {
        let result = sqlx::query(
            "UPDATE members SET status = $2, decided_at = now() WHERE member_id = $1 AND status = 'PENDING'",
        )
        .bind(member_id)
        .bind(status)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}

fn to_member(r: sqlx::postgres::PgRow) -> Member {
    Member {
        member_id: r.get("member_id"),
        full_name: r.get("full_name"),
        email: r.get("email"),
        phone: r.get("phone"),
        status: r.get("status"),
        applied_at: r.get("applied_at"),
    }
}
