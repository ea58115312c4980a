use axum::{body::Bytes, extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::{
    dto::justcall_dto::{Direction, JustCallPayload},
    error::Result,
    services::reply_service,
    AppState,
};

/// Ingress for JustCall SMS webhooks.
///
/// Every business outcome, including malformed payloads, outbound echoes
/// and replies with nothing to correlate against, is acknowledged with
/// 200: the provider retries non-2xx deliveries and there is no caller to
/// surface a business failure to. Only store failures escape as 500.
pub async fn handle_justcall(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse> {
    let raw: Value = match serde_json::from_slice(&body) {
        Ok(value) => value,
        Err(e) => {
            warn!("Unparseable webhook body, acknowledging anyway: {}", e);
            return Ok(ack("ignored"));
        }
    };

    let (direction, reply) = match JustCallPayload::classify(&raw) {
        JustCallPayload::Handshake => {
            info!("Webhook validation handshake acknowledged");
            return Ok(ack("handshake"));
        }
        JustCallPayload::Unrecognized => {
            warn!("Unrecognized webhook payload shape: {}", raw);
            return Ok(ack("ignored"));
        }
        JustCallPayload::Structured(sms) => sms.into_inbound(),
        JustCallPayload::Legacy(sms) => sms.into_inbound(),
    };

    // Echo of our own send; correlating it against itself would be wrong.
    if direction == Direction::Outbound {
        return Ok(ack("outbound_echo"));
    }

    let affirmative = reply_service::is_affirmative(&reply.body);

    let candidate = state
        .correlation_service
        .find_candidate(&reply.sender_address, reply.received_at)
        .await?;

    let outcome = state
        .confirmation_service
        .apply(candidate.as_ref(), &reply, affirmative)
        .await?;

    Ok(ack(outcome.as_str()))
}

fn ack(status: &str) -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": status })))
}
