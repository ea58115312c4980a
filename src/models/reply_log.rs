use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Audit-only record for inbound replies that did not produce a
/// confirmation: affirmative replies with no correlated send, and
/// non-affirmative replies (with the candidate noted when one was found).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ReplyLog {
    pub id: Uuid,
    pub kind: String,
    pub sender_address: String,
    pub body: String,
    pub provider_event_id: String,
    pub candidate_message_id: Option<Uuid>,
    pub received_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

pub const KIND_ORPHAN_AFFIRMATIVE: &str = "orphan_affirmative";
pub const KIND_NON_AFFIRMATIVE: &str = "non_affirmative";
