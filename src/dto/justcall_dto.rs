use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::utils::{phone, time};

/// One inbound JustCall webhook call, tagged by detected payload shape.
///
/// The provider delivers SMS events in two schemas: a structured
/// `{ type, data: {...} }` envelope and a flatter legacy object. It also
/// posts a validation handshake (type/url metadata, no data body) when a
/// webhook endpoint is registered. Everything else is unrecognized and
/// gets acknowledged without processing.
#[derive(Debug)]
pub enum JustCallPayload {
    Structured(StructuredSms),
    Legacy(LegacySms),
    Handshake,
    Unrecognized,
}

#[derive(Debug, Deserialize)]
struct StructuredEnvelope {
    #[serde(rename = "type")]
    #[allow(dead_code)]
    event_type: String,
    data: StructuredSms,
}

#[derive(Debug, Deserialize)]
pub struct StructuredSms {
    pub id: Option<Value>,
    pub contact_number: String,
    pub justcall_number: Option<String>,
    pub direction: String,
    pub sms_date: Option<String>,
    pub sms_time: Option<String>,
    pub sms_info: Option<SmsInfo>,
    pub delivery_status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SmsInfo {
    pub body: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LegacySms {
    pub id: Option<Value>,
    pub contact_number: String,
    pub justcall_number: Option<String>,
    pub body: Option<String>,
    pub direction: String,
    pub status: Option<String>,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Inbound,
    Outbound,
}

/// The normalized inbound reply handed to the classification and
/// correlation pipeline. Ephemeral: persisted only via reply_logs or the
/// confirmation fields of the outbound record it answers.
#[derive(Debug, Clone)]
pub struct InboundReplyEvent {
    pub provider_event_id: String,
    pub sender_address: String,
    pub body: String,
    pub received_at: DateTime<Utc>,
}

impl JustCallPayload {
    pub fn classify(raw: &Value) -> Self {
        let Some(obj) = raw.as_object() else {
            return JustCallPayload::Unrecognized;
        };

        if obj.contains_key("type") {
            return match obj.get("data") {
                Some(Value::Object(_)) => {
                    match serde_json::from_value::<StructuredEnvelope>(raw.clone()) {
                        Ok(envelope) => JustCallPayload::Structured(envelope.data),
                        Err(_) => JustCallPayload::Unrecognized,
                    }
                }
                // Endpoint-validation handshake: type/url metadata only.
                _ => JustCallPayload::Handshake,
            };
        }

        if obj.contains_key("direction") && obj.contains_key("contact_number") {
            return match serde_json::from_value::<LegacySms>(raw.clone()) {
                Ok(sms) => JustCallPayload::Legacy(sms),
                Err(_) => JustCallPayload::Unrecognized,
            };
        }

        JustCallPayload::Unrecognized
    }
}

impl StructuredSms {
    pub fn into_inbound(self) -> (Direction, InboundReplyEvent) {
        let received_at = match (self.sms_date.as_deref(), self.sms_time.as_deref()) {
            (Some(date), Some(t)) => {
                time::parse_provider_date_time(date, t).unwrap_or_else(time::now)
            }
            _ => time::now(),
        };

        (
            parse_direction(&self.direction),
            InboundReplyEvent {
                provider_event_id: id_to_string(self.id.as_ref()),
                sender_address: canonical_sender(&self.contact_number),
                body: self.sms_info.and_then(|i| i.body).unwrap_or_default(),
                received_at,
            },
        )
    }
}

impl LegacySms {
    pub fn into_inbound(self) -> (Direction, InboundReplyEvent) {
        let received_at = self
            .created_at
            .as_deref()
            .and_then(time::parse_provider_timestamp)
            .unwrap_or_else(time::now);

        (
            parse_direction(&self.direction),
            InboundReplyEvent {
                provider_event_id: id_to_string(self.id.as_ref()),
                sender_address: canonical_sender(&self.contact_number),
                body: self.body.unwrap_or_default(),
                received_at,
            },
        )
    }
}

/// The provider reports inbound traffic as "Incoming" on the structured
/// shape and "inbound" on the legacy one. Anything else is an echo of our
/// own outbound send.
pub fn parse_direction(raw: &str) -> Direction {
    if raw.eq_ignore_ascii_case("incoming") || raw.eq_ignore_ascii_case("inbound") {
        Direction::Inbound
    } else {
        Direction::Outbound
    }
}

fn canonical_sender(contact_number: &str) -> String {
    phone::canonicalize(contact_number).unwrap_or_else(|| contact_number.to_string())
}

// Provider ids arrive as numbers in some payloads and strings in others.
fn id_to_string(id: Option<&Value>) -> String {
    match id {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}
