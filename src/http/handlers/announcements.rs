use crate::AppState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CreateAnnouncementRequest {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Serialize)]
pub struct AnnouncementView {
    pub announcement_id: Uuid,
    pub title: String,
    pub body: String,
    pub published_at: chrono::DateTime<chrono::Utc>,
}

pub async fn list_announcements(State(state): State<AppState>) -> impl IntoResponse {
    match state.announcements_repo.list_recent(50).await {
        Ok(items) => {
            let resp: Vec<AnnouncementView> = items
                .into_iter()
                .map(|a| AnnouncementView {
                    announcement_id: a.announcement_id,
                    title: a.title,
                    body: a.body,
                    published_at: a.published_at,
                })
                .collect();
            (axum::http::StatusCode::OK, Json(resp)).into_response()
        }
        Err(e) => (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({"error": e.to_string()})),
        )
            .into_response(),
    }
}

pub async fn create_announcement(
    State(state): State<AppState>,
    Json(req): Json<CreateAnnouncementRequest>,
) -> impl IntoResponse {
    if req.title.trim().is_empty() {
        return (
            axum::http::StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "title is required"})),
        )
            .into_response();
    }

    match state.announcements_repo.create(&req.title, &req.body).await {
        Ok(announcement_id) => (
            axum::http::StatusCode::CREATED,
            Json(serde_json::json!({"announcement_id": announcement_id})),
        )
            .into_response(),
        Err(e) => (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({"error": e.to_string()})),
        )
            .into_response(),
    }
}
