use tracing::error;

use crate::dto::sms_dto::SendSmsRequest;
use crate::error::{Error, Result};
use crate::models::outbound_message::{CreateOutboundMessage, OutboundMessage};
use crate::services::justcall_service::JustCallClient;
use crate::services::message_service::MessageService;
use crate::services::template;
use crate::utils::phone;

/// Result of the local record write after a successful provider send.
///
/// Once the provider has accepted the message the customer has it, so a
/// failed bookkeeping write must not turn the whole send into a reported
/// failure. It is surfaced here for the caller to inspect instead of
/// being swallowed.
#[derive(Debug)]
pub enum Bookkeeping {
    Saved(OutboundMessage),
    WriteFailed(String),
}

#[derive(Debug)]
pub struct SendOutcome {
    pub provider_message_id: String,
    pub bookkeeping: Bookkeeping,
}

#[derive(Clone)]
pub struct DispatchService {
    messages: MessageService,
    justcall: JustCallClient,
    default_sender: Option<String>,
}

impl DispatchService {
    /// `default_sender` is injected at construction rather than read from
    /// the environment at call time, so tests can pin it.
    pub fn new(
        messages: MessageService,
        justcall: JustCallClient,
        default_sender: Option<String>,
    ) -> Self {
        Self {
            messages,
            justcall,
            default_sender,
        }
    }

    pub async fn send(&self, req: SendSmsRequest) -> Result<SendOutcome> {
        let recipient = phone::canonicalize(&req.recipient)
            .ok_or_else(|| Error::BadRequest("Invalid recipient number".to_string()))?;

        let sender = match &req.sender {
            Some(raw) => phone::canonicalize(raw)
                .ok_or_else(|| Error::BadRequest("Invalid sender number".to_string()))?,
            None => self
                .default_sender
                .clone()
                .ok_or_else(|| Error::Config("sender number required".to_string()))?,
        };

        let rendered = match &req.template_values {
            Some(values) => template::render(&req.body, values),
            None => req.body.clone(),
        };

        let provider_message_id = self
            .justcall
            .send_text(&sender, &recipient, &rendered)
            .await?;

        let record = CreateOutboundMessage {
            provider_message_id: provider_message_id.clone(),
            recipient_address: recipient,
            sender_address: sender,
            template_body: req.body,
            rendered_body: rendered,
            user_id: req.user_id,
        };

        let bookkeeping = match self.messages.create(record).await {
            Ok(message) => Bookkeeping::Saved(message),
            Err(e) => {
                error!(
                    "SMS {} sent but local record write failed: {:?}",
                    provider_message_id, e
                );
                Bookkeeping::WriteFailed(e.to_string())
            }
        };

        Ok(SendOutcome {
            provider_message_id,
            bookkeeping,
        })
    }
}
