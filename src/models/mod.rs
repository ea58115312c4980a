pub mod outbound_message;
pub mod reply_log;
