use crate::AppState;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct ApplyRequest {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MemberView {
    pub member_id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub status: String,
}

pub async fn apply(
    State(state): State<AppState>,
    Json(req): Json<ApplyRequest>,
) -> impl IntoResponse {
    if req.full_name.trim().is_empty() || req.email.trim().is_empty() {
        return (
            axum::http::StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "full_name and email are required"})),
        )
            .into_response();
    }

    match state
        .members_repo
        .apply(&req.full_name, &req.email, req.phone.as_deref())
        .await
    {
        Ok(member_id) => (
            axum::http::StatusCode::CREATED,
            Json(serde_json::json!({"member_id": member_id, "status": "PENDING"})),
        )
            .into_response(),
        Err(e) => internal(e),
    }
}

pub async fn list_members(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    let status = query.status.unwrap_or_else(|| "PENDING".to_string());
    match state.members_repo.list_by_status(&status).await {
        Ok(items) => {
            let resp: Vec<MemberView> = items
                .into_iter()
                .map(|m| MemberView {
                    member_id: m.member_id,
                    full_name: m.full_name,
                    email: m.email,
                    phone: m.phone,
                    status: m.status,
                })
                .collect();
            (axum::http::StatusCode::OK, Json(resp)).into_response()
        }
        Err(e) => internal(e),
    }
}

pub async fn approve(
    State(state): State<AppState>,
    Path(member_id): Path<Uuid>,
) -> impl IntoResponse {
    decide(state, member_id, "APPROVED").await
}

pub async fn reject(
    State(state): State<AppState>,
    Path(member_id): Path<Uuid>,
) -> impl IntoResponse {
    decide(state, member_id, "REJECTED").await
}

async fn decide(state: AppState, member_id: Uuid, status: &str) -> axum::response::Response {
    match state.members_repo.decide(member_id, status).await {
        Ok(true) => (
            axum::http::StatusCode::OK,
            Json(serde_json::json!({"member_id": member_id, "status": status})),
        )
            .into_response(),
        Ok(false) => (
            axum::http::StatusCode::CONFLICT,
            Json(serde_json::json!({"error": "application is not pending"})),
        )
            .into_response(),
        Err(e) => internal(e),
    }
}

fn internal(e: anyhow::Error) -> axum::response::Response {
    (
        axum::http::StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({"error": e.to_string()})),
    )
        .into_response()
}
