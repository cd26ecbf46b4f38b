use crate::AppState;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

pub async fn finance_summary(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> impl IntoResponse {
    let to = query.to.unwrap_or_else(Utc::now);
    let from = query.from.unwrap_or(to - chrono::Duration::days(30));

    let totals = match state.reports_repo.totals_by_status_and_method(from, to).await {
        Ok(t) => t,
        Err(e) => return internal(e),
    };
    let campaigns = match state.reports_repo.campaign_totals().await {
        Ok(c) => c,
        Err(e) => return internal(e),
    };

    let totals: Vec<serde_json::Value> = totals
        .into_iter()
        .map(|t| {
            serde_json::json!({
                "status": t.status,
                "method": t.method,
                "count": t.count,
                "total_minor": t.total_minor,
            })
        })
        .collect();
    let campaigns: Vec<serde_json::Value> = campaigns
        .into_iter()
        .map(|c| {
            serde_json::json!({
                "campaign_id": c.campaign_id,
                "slug": c.slug,
                "title": c.title,
                "target_amount_minor": c.target_amount_minor,
                "raised_amount_minor": c.raised_amount_minor,
            })
        })
        .collect();

    (
        axum::http::StatusCode::OK,
        Json(serde_json::json!({
            "from": from,
            "to": to,
            "totals": totals,
            "campaigns": campaigns,
        })),
    )
        .into_response()
}

fn internal(e: anyhow::Error) -> axum::response::Response {
    (
        axum::http::StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({"error": e.to_string()})),
    )
        .into_response()
}
