use crate::utils::phone::validate_phone;
use serde::Deserialize;
use std::collections::HashMap;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SendSmsRequest {
    #[validate(custom(function = validate_phone))]
    pub recipient: String,
    /// Sending number. Falls back to the configured default when absent.
    pub sender: Option<String>,
    #[validate(length(min = 1, message = "message body required"))]
    pub body: String,
    /// When present, `body` is treated as a template and rendered before
    /// submission.
    pub template_values: Option<HashMap<String, String>>,
    /// Owning user, carried as an attribute on the stored record.
    pub user_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct ListMessagesQuery {
    pub recipient: Option<String>,
    pub limit: Option<i64>,
}
