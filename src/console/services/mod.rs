pub mod alert_service;
pub mod command_service;
pub mod metrics_service;
