use crate::service::payment_service::{CallbackChannel, CallbackOutcome, CallbackPayload};
use crate::AppState;
use axum::extract::State;
use axum::response::{IntoResponse, Redirect};
use axum::{Form, Json};

pub async fn success(
    State(state): State<AppState>,
    Form(payload): Form<CallbackPayload>,
) -> impl IntoResponse {
    browser_callback(state, CallbackChannel::SuccessRedirect, payload).await
}

pub async fn fail(
    State(state): State<AppState>,
    Form(payload): Form<CallbackPayload>,
) -> impl IntoResponse {
    browser_callback(state, CallbackChannel::FailRedirect, payload).await
}

pub async fn cancel(
    State(state): State<AppState>,
    Form(payload): Form<CallbackPayload>,
) -> impl IntoResponse {
    browser_callback(state, CallbackChannel::CancelRedirect, payload).await
}

pub async fn ipn(
    State(state): State<AppState>,
    Form(payload): Form<CallbackPayload>,
) -> impl IntoResponse {
    match state
        .payment_service
        .handle_callback(CallbackChannel::Ipn, payload)
        .await
    {
        Ok(CallbackOutcome::Settled { payment_id, to, .. }) => (
            axum::http::StatusCode::OK,
            Json(serde_json::json!({
                "status": "processed",
                "payment_id": payment_id,
                "payment_status": to.as_db_str(),
            })),
        )
            .into_response(),
        Ok(CallbackOutcome::Failed { payment_id, reason, .. }) => (
            axum::http::StatusCode::OK,
            Json(serde_json::json!({
                "status": "processed",
                "payment_id": payment_id,
                "payment_status": "FAILED",
                "reason": reason,
            })),
        )
            .into_response(),
        Ok(CallbackOutcome::Duplicate { payment_id, .. }) => (
            axum::http::StatusCode::OK,
            Json(serde_json::json!({ "status": "ignored", "payment_id": payment_id })),
        )
            .into_response(),
        Ok(CallbackOutcome::Unknown) => (
            axum::http::StatusCode::OK,
            Json(serde_json::json!({ "status": "unknown" })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "ipn processing failed");
            (
                axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "status": "error" })),
            )
                .into_response()
        }
    }
}

async fn browser_callback(
    state: AppState,
    channel: CallbackChannel,
    payload: CallbackPayload,
) -> axum::response::Response {
    match state.payment_service.handle_callback(channel, payload).await {
        Ok(CallbackOutcome::Settled {
            payment_id,
            tran_ref,
            ..
        }) => Redirect::to(&format!("/payments/{payment_id}/success?tran_ref={tran_ref}"))
            .into_response(),
        Ok(CallbackOutcome::Failed {
            payment_id,
            tran_ref,
            ..
        }) => {
            let page = if channel == CallbackChannel::CancelRedirect {
                "cancelled"
            } else {
                "failed"
            };
            Redirect::to(&format!("/payments/{payment_id}/{page}?tran_ref={tran_ref}"))
                .into_response()
        }
        // Already terminal: send the payer to the status page rather than
        // re-announcing an outcome this delivery did not produce.
        Ok(CallbackOutcome::Duplicate { payment_id, .. }) => {
            Redirect::to(&format!("/payments/{payment_id}")).into_response()
        }
        Ok(CallbackOutcome::Unknown) => Redirect::to("/payments/failed").into_response(),
        Err(e) => {
            tracing::error!(error = %e, "callback processing failed");
            Redirect::to("/payments/failed").into_response()
        }
    }
}
