use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Confirmation lifecycle: `sent` on creation, `confirmed` once an
/// affirmative reply has been correlated back. No other transitions.
pub const STATE_SENT: &str = "sent";
pub const STATE_CONFIRMED: &str = "confirmed";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OutboundMessage {
    pub id: Uuid,
    pub provider_message_id: String,
    pub recipient_address: String,
    pub sender_address: String,
    pub template_body: String,
    pub rendered_body: String,
    pub user_id: Option<Uuid>,
    pub confirmation_state: String,
    pub confirmed_at: Option<DateTime<Utc>>,
    pub confirmation_reply_body: Option<String>,
    pub confirmation_reply_provider_id: Option<String>,
    pub sent_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateOutboundMessage {
    pub provider_message_id: String,
    pub recipient_address: String,
    pub sender_address: String,
    pub template_body: String,
    pub rendered_body: String,
    pub user_id: Option<Uuid>,
}
