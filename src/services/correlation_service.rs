use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;
use tracing::info;

use crate::error::Result;
use crate::models::outbound_message::OutboundMessage;

/// How far back an inbound reply may be attributed to a prior send.
const CORRELATION_WINDOW_DAYS: i64 = 7;

#[derive(Clone)]
pub struct CorrelationService {
    pool: PgPool,
}

impl CorrelationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Finds the outbound message an inbound reply most plausibly answers.
    ///
    /// The provider supplies no conversation id, so this is a heuristic:
    /// among messages sent to the replying number within the lookback
    /// window, the most recent send wins. The window is never widened and
    /// numbers are never cross-matched. If several sends to the same
    /// number are outstanding at once, the older ones stay unconfirmed
    /// until a human follows up.
    pub async fn find_candidate(
        &self,
        sender_address: &str,
        received_at: DateTime<Utc>,
    ) -> Result<Option<OutboundMessage>> {
        let (window_start, window_end) = correlation_window(received_at);

        let rows = sqlx::query_as::<_, OutboundMessage>(
            r#"
            SELECT * FROM outbound_messages
            WHERE recipient_address = $1
              AND sent_at >= $2
              AND sent_at <= $3
            "#,
        )
        .bind(sender_address)
        .bind(window_start)
        .bind(window_end)
        .fetch_all(&self.pool)
        .await?;

        let candidate = most_recent(rows);
        if candidate.is_none() {
            info!(
                "No outbound message to {} within {} days of reply",
                sender_address, CORRELATION_WINDOW_DAYS
            );
        }

        Ok(candidate)
    }
}

/// Window bounds for a reply received at `received_at`: the preceding
/// seven days, inclusive on both ends.
pub fn correlation_window(received_at: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    (
        received_at - Duration::days(CORRELATION_WINDOW_DAYS),
        received_at,
    )
}

/// Tie-break: most recent `sent_at` wins among in-window matches.
pub fn most_recent(rows: Vec<OutboundMessage>) -> Option<OutboundMessage> {
    rows.into_iter().max_by_key(|m| m.sent_at)
}
