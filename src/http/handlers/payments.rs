use crate::domain::payment::{
    InitiateDonationRequest, InitiateFeeRequest, OfflineDonationRequest, PaymentStatus,
};
use crate::domain::principal::Principal;
use crate::AppState;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use uuid::Uuid;

pub async fn initiate_donation(
    State(state): State<AppState>,
    principal: Principal,
    Json(req): Json<InitiateDonationRequest>,
) -> impl IntoResponse {
    match state.payment_service.initiate_donation(principal, req).await {
        Ok(resp) => (axum::http::StatusCode::OK, Json(resp)).into_response(),
        Err((status, body)) => (status, Json(body)).into_response(),
    }
}

pub async fn initiate_fee(
    State(state): State<AppState>,
    principal: Principal,
    Json(req): Json<InitiateFeeRequest>,
) -> impl IntoResponse {
    match state.payment_service.initiate_fee(principal, req).await {
        Ok(resp) => (axum::http::StatusCode::OK, Json(resp)).into_response(),
        Err((status, body)) => (status, Json(body)).into_response(),
    }
}

pub async fn get_payment(
    State(state): State<AppState>,
    Path(payment_id): Path<Uuid>,
) -> impl IntoResponse {
    match state.payment_service.get_payment(payment_id).await {
        Ok(view) => {
            // A record still INITIATED is presented as pending, never as an
            // ambiguous in-between state.
            let display_status = if view.status == PaymentStatus::Initiated {
                "PENDING"
            } else {
                view.status.as_db_str()
            };
            (
                axum::http::StatusCode::OK,
                Json(serde_json::json!({
                    "payment": view,
                    "display_status": display_status,
                })),
            )
                .into_response()
        }
        Err((status, body)) => (status, Json(body)).into_response(),
    }
}

pub async fn list_my_payments(
    State(state): State<AppState>,
    principal: Principal,
) -> impl IntoResponse {
    match state
        .payment_service
        .list_payer_payments(principal.id)
        .await
    {
        Ok(views) => (axum::http::StatusCode::OK, Json(views)).into_response(),
        Err((status, body)) => (status, Json(body)).into_response(),
    }
}

pub async fn record_offline_donation(
    State(state): State<AppState>,
    Json(req): Json<OfflineDonationRequest>,
) -> impl IntoResponse {
    match state.payment_service.record_offline(req).await {
        Ok(view) => (axum::http::StatusCode::CREATED, Json(view)).into_response(),
        Err((status, body)) => (status, Json(body)).into_response(),
    }
}

pub async fn health() -> impl IntoResponse {
    (axum::http::StatusCode::OK, "ok")
}
