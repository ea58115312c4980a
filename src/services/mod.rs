pub mod confirmation_service;
pub mod correlation_service;
pub mod dispatch_service;
pub mod justcall_service;
pub mod message_service;
pub mod reply_service;
pub mod template;
