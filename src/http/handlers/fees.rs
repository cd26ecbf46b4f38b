use crate::AppState;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct FeeQuery {
    pub year: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct PaidMonth {
    pub month: i32,
    pub amount_minor: i64,
}

pub async fn list_paid_months(
    State(state): State<AppState>,
    Path(member_id): Path<Uuid>,
    Query(query): Query<FeeQuery>,
) -> impl IntoResponse {
    let year = query
        .year
        .unwrap_or_else(|| chrono::Datelike::year(&chrono::Utc::now()));

    match state.payments_repo.paid_fee_months(member_id, year).await {
        Ok(months) => {
            let resp: Vec<PaidMonth> = months
                .into_iter()
                .map(|(month, amount_minor)| PaidMonth { month, amount_minor })
                .collect();
            (
                axum::http::StatusCode::OK,
                Json(serde_json::json!({"year": year, "paid": resp})),
            )
                .into_response()
        }
        Err(e) => (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({"error": e.to_string()})),
        )
            .into_response(),
    }
}
