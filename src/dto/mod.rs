pub mod justcall_dto;
pub mod sms_dto;
