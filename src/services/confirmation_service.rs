use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::dto::justcall_dto::InboundReplyEvent;
use crate::error::Result;
use crate::models::outbound_message::OutboundMessage;
use crate::models::reply_log::{ReplyLog, KIND_NON_AFFIRMATIVE, KIND_ORPHAN_AFFIRMATIVE};

/// What processing one inbound reply amounted to. Every variant is a
/// successfully acknowledged terminal state of the webhook pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationOutcome {
    Confirmed,
    AlreadyConfirmed,
    OrphanLogged,
    ReplyLogged,
}

impl ConfirmationOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfirmationOutcome::Confirmed => "confirmed",
            ConfirmationOutcome::AlreadyConfirmed => "already_confirmed",
            ConfirmationOutcome::OrphanLogged => "orphan_logged",
            ConfirmationOutcome::ReplyLogged => "reply_logged",
        }
    }
}

#[derive(Clone)]
pub struct ConfirmationService {
    pool: PgPool,
}

impl ConfirmationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Applies a classified, correlated reply to the store.
    ///
    /// Affirmative + candidate: conditional sent -> confirmed transition.
    /// The update is guarded on `confirmation_state = 'sent'`, so a racing
    /// or duplicate confirmation is a detected no-op, never an overwrite
    /// of the first recorded reply. Affirmative without a candidate is
    /// logged as an orphan; non-affirmative replies are logged with the
    /// candidate referenced when one was found. Nothing is ever deleted
    /// and no record is fabricated.
    pub async fn apply(
        &self,
        candidate: Option<&OutboundMessage>,
        reply: &InboundReplyEvent,
        affirmative: bool,
    ) -> Result<ConfirmationOutcome> {
        if !affirmative {
            let candidate_id = candidate.map(|m| m.id);
            self.log_reply(KIND_NON_AFFIRMATIVE, reply, candidate_id)
                .await?;
            info!(
                "Non-affirmative reply from {} logged (candidate: {:?})",
                reply.sender_address, candidate_id
            );
            return Ok(ConfirmationOutcome::ReplyLogged);
        }

        let Some(message) = candidate else {
            self.log_reply(KIND_ORPHAN_AFFIRMATIVE, reply, None).await?;
            warn!(
                "Affirmative reply from {} with no outbound message to attribute it to",
                reply.sender_address
            );
            return Ok(ConfirmationOutcome::OrphanLogged);
        };

        let result = sqlx::query(
            r#"
            UPDATE outbound_messages
            SET confirmation_state = 'confirmed',
                confirmed_at = $2,
                confirmation_reply_body = $3,
                confirmation_reply_provider_id = $4
            WHERE id = $1 AND confirmation_state = 'sent'
            "#,
        )
        .bind(message.id)
        .bind(reply.received_at)
        .bind(&reply.body)
        .bind(&reply.provider_event_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            info!(
                "Outbound message {} was already confirmed, reply {} ignored",
                message.id, reply.provider_event_id
            );
            Ok(ConfirmationOutcome::AlreadyConfirmed)
        } else {
            info!(
                "Outbound message {} confirmed by reply from {}",
                message.id, reply.sender_address
            );
            Ok(ConfirmationOutcome::Confirmed)
        }
    }

    async fn log_reply(
        &self,
        kind: &str,
        reply: &InboundReplyEvent,
        candidate_message_id: Option<Uuid>,
    ) -> Result<ReplyLog> {
        let log = sqlx::query_as::<_, ReplyLog>(
            r#"
            INSERT INTO reply_logs
                (kind, sender_address, body, provider_event_id,
                 candidate_message_id, received_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(kind)
        .bind(&reply.sender_address)
        .bind(&reply.body)
        .bind(&reply.provider_event_id)
        .bind(candidate_message_id)
        .bind(reply.received_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(log)
    }
}
