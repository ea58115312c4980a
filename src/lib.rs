pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::services::{
    confirmation_service::ConfirmationService, correlation_service::CorrelationService,
    dispatch_service::DispatchService, justcall_service::JustCallClient,
    message_service::MessageService,
};
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub message_service: MessageService,
    pub dispatch_service: DispatchService,
    pub correlation_service: CorrelationService,
    pub confirmation_service: ConfirmationService,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let config = crate::config::get_config();

        let justcall = JustCallClient::new(
            config.justcall_api_key.clone(),
            config.justcall_api_secret.clone(),
        );
        let message_service = MessageService::new(pool.clone());
        let dispatch_service = DispatchService::new(
            message_service.clone(),
            justcall,
            config.default_sender_number.clone(),
        );
        let correlation_service = CorrelationService::new(pool.clone());
        let confirmation_service = ConfirmationService::new(pool.clone());

        Self {
            pool,
            message_service,
            dispatch_service,
            correlation_service,
            confirmation_service,
        }
    }
}
