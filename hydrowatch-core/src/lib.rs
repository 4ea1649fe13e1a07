pub mod error;
pub mod logger;
pub mod monitor;
pub mod quality;
pub mod store;
pub mod synthetic;
pub mod telemetry;
