pub mod config;
pub mod error;
pub mod observatory;
pub mod telemetry;
