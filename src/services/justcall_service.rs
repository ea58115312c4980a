use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info};

use crate::error::{Error, Result};

const TEXTS_URL: &str = "https://api.justcall.io/v1/texts/new";
const PROVIDER_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Serialize)]
struct SendTextRequest<'a> {
    justcall_number: &'a str,
    contact_number: &'a str,
    body: &'a str,
    restrict_once: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    media_url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    schedule_at: Option<&'a str>,
}

#[derive(Clone)]
pub struct JustCallClient {
    client: Client,
    api_key: String,
    api_secret: String,
}

impl JustCallClient {
    pub fn new(api_key: String, api_secret: String) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(PROVIDER_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client for JustCall");

        Self {
            client,
            api_key,
            api_secret,
        }
    }

    /// Submits one outbound SMS and returns the provider's message id.
    pub async fn send_text(&self, sender: &str, recipient: &str, body: &str) -> Result<String> {
        let payload = SendTextRequest {
            justcall_number: sender,
            contact_number: recipient,
            body,
            restrict_once: "No",
            media_url: None,
            schedule_at: None,
        };

        info!("Sending SMS via JustCall: {} -> {}", sender, recipient);

        let response = self
            .client
            .post(TEXTS_URL)
            .header(
                "Authorization",
                format!("{}:{}", self.api_key, self.api_secret),
            )
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::ProviderTimeout(format!("JustCall send timed out: {}", e))
                } else {
                    Error::Provider(format!("JustCall request failed: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("JustCall send failed with status {}: {}", status, body);
            return Err(Error::Provider(format!(
                "JustCall send failed with status {}",
                status
            )));
        }

        let json: Value = response
            .json()
            .await
            .map_err(|e| Error::Provider(format!("Invalid JustCall response: {}", e)))?;

        extract_message_id(&json).ok_or_else(|| {
            error!("JustCall response carried no message id: {}", json);
            Error::Provider("No message id in provider response".to_string())
        })
    }
}

/// The provider's response schema is not consistent: the message id shows
/// up either as a top-level `id` or as `data[0].id`. Both are accepted.
fn extract_message_id(response: &Value) -> Option<String> {
    if let Some(id) = scalar_id(response.get("id")) {
        return Some(id);
    }
    scalar_id(
        response
            .get("data")
            .and_then(|d| d.as_array())
            .and_then(|arr| arr.first())
            .and_then(|first| first.get("id")),
    )
}

fn scalar_id(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_top_level_id() {
        let response = json!({ "id": 987654, "status": "sent" });
        assert_eq!(extract_message_id(&response).as_deref(), Some("987654"));
    }

    #[test]
    fn extracts_id_from_data_array() {
        let response = json!({ "data": [{ "id": "msg_42", "contact_number": "+4799999999" }] });
        assert_eq!(extract_message_id(&response).as_deref(), Some("msg_42"));
    }

    #[test]
    fn missing_id_in_both_shapes_is_none() {
        assert_eq!(extract_message_id(&json!({ "status": "queued" })), None);
        assert_eq!(extract_message_id(&json!({ "data": [] })), None);
        assert_eq!(extract_message_id(&json!({ "data": [{ "status": "ok" }] })), None);
    }
}
