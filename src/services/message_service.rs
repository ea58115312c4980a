use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::models::outbound_message::{CreateOutboundMessage, OutboundMessage};

#[derive(Clone)]
pub struct MessageService {
    pool: PgPool,
}

impl MessageService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, msg: CreateOutboundMessage) -> Result<OutboundMessage> {
        let message = sqlx::query_as::<_, OutboundMessage>(
            r#"
            INSERT INTO outbound_messages
                (provider_message_id, recipient_address, sender_address,
                 template_body, rendered_body, user_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&msg.provider_message_id)
        .bind(&msg.recipient_address)
        .bind(&msg.sender_address)
        .bind(&msg.template_body)
        .bind(&msg.rendered_body)
        .bind(msg.user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(message)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<OutboundMessage>> {
        let message = sqlx::query_as::<_, OutboundMessage>(
            r#"
            SELECT * FROM outbound_messages WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(message)
    }

    pub async fn list_recent(
        &self,
        recipient: Option<String>,
        limit: i64,
    ) -> Result<Vec<OutboundMessage>> {
        let messages = sqlx::query_as::<_, OutboundMessage>(
            r#"
            SELECT * FROM outbound_messages
            WHERE ($1::text IS NULL OR recipient_address = $1)
            ORDER BY sent_at DESC
            LIMIT $2
            "#,
        )
        .bind(recipient)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(messages)
    }
}
