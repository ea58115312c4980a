use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::sms_dto::{ListMessagesQuery, SendSmsRequest},
    error::{Error, Result},
    services::dispatch_service::Bookkeeping,
    AppState,
};

pub async fn send_sms(
    State(state): State<AppState>,
    Json(payload): Json<SendSmsRequest>,
) -> Result<impl IntoResponse> {
    payload.validate()?;

    let outcome = state.dispatch_service.send(payload).await?;

    let body = match outcome.bookkeeping {
        Bookkeeping::Saved(message) => json!({
            "provider_message_id": outcome.provider_message_id,
            "stored": true,
            "id": message.id,
            "confirmation_state": message.confirmation_state,
        }),
        // The customer already has the SMS; report the send as successful
        // and flag the missing local record.
        Bookkeeping::WriteFailed(reason) => json!({
            "provider_message_id": outcome.provider_message_id,
            "stored": false,
            "store_error": reason,
        }),
    };

    Ok((StatusCode::OK, Json(body)))
}

pub async fn get_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let message = state
        .message_service
        .get(id)
        .await?
        .ok_or_else(|| Error::NotFound("Outbound message not found".to_string()))?;

    Ok((StatusCode::OK, Json(message)))
}

pub async fn list_messages(
    State(state): State<AppState>,
    Query(query): Query<ListMessagesQuery>,
) -> Result<impl IntoResponse> {
    let limit = query.limit.unwrap_or(50).clamp(1, 200);
    let messages = state
        .message_service
        .list_recent(query.recipient, limit)
        .await?;

    Ok((StatusCode::OK, Json(messages)))
}
