pub mod app_state;
pub mod config;
pub mod domain;
pub mod errors;
pub mod http;
pub mod store;
pub mod telemetry;
