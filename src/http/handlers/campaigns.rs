use crate::AppState;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct CampaignView {
    pub campaign_id: Uuid,
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub target_amount_minor: i64,
    pub raised_amount_minor: i64,
}

#[derive(Debug, Deserialize)]
pub struct CreateCampaignRequest {
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub target_amount_minor: i64,
}

pub async fn list_campaigns(State(state): State<AppState>) -> impl IntoResponse {
    match state.campaigns_repo.list().await {
        Ok(items) => {
            let resp: Vec<CampaignView> = items.into_iter().map(to_view).collect();
            (axum::http::StatusCode::OK, Json(resp)).into_response()
        }
        Err(e) => internal(e),
    }
}

pub async fn get_campaign(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> impl IntoResponse {
    match state.campaigns_repo.find_by_slug(&slug).await {
        Ok(Some(campaign)) => {
            (axum::http::StatusCode::OK, Json(to_view(campaign))).into_response()
        }
        Ok(None) => (
            axum::http::StatusCode::NOT_FOUND,
            Json(serde_json::json!({"error": "campaign not found"})),
        )
            .into_response(),
        Err(e) => internal(e),
    }
}

pub async fn create_campaign(
    State(state): State<AppState>,
    Json(req): Json<CreateCampaignRequest>,
) -> impl IntoResponse {
    if req.target_amount_minor <= 0 {
        return (
            axum::http::StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "target_amount_minor must be > 0"})),
        )
            .into_response();
    }

    match state
        .campaigns_repo
        .create(
            &req.slug,
            &req.title,
            req.description.as_deref(),
            req.target_amount_minor,
        )
        .await
    {
        Ok(campaign_id) => (
            axum::http::StatusCode::CREATED,
            Json(serde_json::json!({"campaign_id": campaign_id})),
        )
            .into_response(),
        Err(e) => internal(e),
    }
}

fn to_view(c: crate::repo::campaigns_repo::Campaign) -> CampaignView {
    CampaignView {
        campaign_id: c.campaign_id,
        slug: c.slug,
        title: c.title,
        description: c.description,
        target_amount_minor: c.target_amount_minor,
        raised_amount_minor: c.raised_amount_minor,
    }
}

fn internal(e: anyhow::Error) -> axum::response::Response {
    (
        axum::http::StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({"error": e.to_string()})),
    )
        .into_response()
}
