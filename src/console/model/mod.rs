pub mod events;
pub mod exposure;
pub mod infra;
pub mod strategy;
pub mod telemetry;
