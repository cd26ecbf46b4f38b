use crate::AppState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub description: Option<String>,
    pub venue: Option<String>,
    pub starts_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize)]
pub struct EventView {
    pub event_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub venue: Option<String>,
    pub starts_at: chrono::DateTime<chrono::Utc>,
}

pub async fn list_events(State(state): State<AppState>) -> impl IntoResponse {
    match state.events_repo.list_upcoming().await {
        Ok(items) => {
            let resp: Vec<EventView> = items
                .into_iter()
                .map(|e| EventView {
                    event_id: e.event_id,
                    title: e.title,
                    description: e.description,
                    venue: e.venue,
                    starts_at: e.starts_at,
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

pub async fn create_event(
    State(state): State<AppState>,
    Json(req): Json<CreateEventRequest>,
) -> impl IntoResponse {
    if req.title.trim().is_empty() {
        return (
            axum::http::StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "title is required"})),
        )
            .into_response();
    }

    match state
        .events_repo
        .create(
            &req.title,
            req.description.as_deref(),
            req.venue.as_deref(),
            req.starts_at,
        )
        .await
    {
        Ok(event_id) => (
            axum::http::StatusCode::CREATED,
            Json(serde_json::json!({"event_id": event_id})),
        )
            .into_response(),
        Err(e) => (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({"error": e.to_string()})),
        )
            .into_response(),
    }
}
