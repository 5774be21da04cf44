pub mod check;
pub mod configuration;
pub mod errors;
pub mod harness;
pub mod telemetry;
