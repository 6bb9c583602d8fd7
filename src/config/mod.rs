/// Configuration module
///
/// Loads configuration from TOML files and environment variables.
/// Priority: ENV > TOML > defaults
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub security: SecurityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    #[serde(default = "default_service_name")]
    pub name: String,
    #[serde(default = "default_service_version")]
    pub version: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_workers")]
    pub workers: u32,
    #[serde(default = "default_request_body_limit")]
    pub request_body_limit_bytes: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_format")]
    pub log_format: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_request_id_header")]
    pub request_id_header: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    /// "postgres" or "memory"
    #[serde(default = "default_store_backend")]
    pub backend: String,
    #[serde(default)]
    pub database_url: String,
    #[serde(default = "default_pg_max_connections")]
    pub pg_max_connections: u32,
    #[serde(default = "default_pg_connect_timeout_ms")]
    pub pg_connect_timeout_ms: u64,
    #[serde(default = "default_pg_idle_timeout_ms")]
    pub pg_idle_timeout_ms: u64,
    #[serde(default)]
    pub run_migrations: bool,
    /// Seed the fixed demo data set on startup.
    #[serde(default = "default_true")]
    pub seed_demo_data: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SecurityConfig {
    #[serde(default = "default_cors_allowed_origins")]
    pub cors_allowed_origins: Vec<String>,
    #[serde(default = "default_cors_allowed_methods")]
    pub cors_allowed_methods: Vec<String>,
    #[serde(default = "default_cors_allowed_headers")]
    pub cors_allowed_headers: Vec<String>,
}

// Defaults
fn default_service_name() -> String {
    "account-activity-api".to_string()
}

fn default_service_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_workers() -> u32 {
    2
}

fn default_request_body_limit() -> usize {
    64 * 1024
}

fn default_log_format() -> String {
    "compact".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_request_id_header() -> String {
    "x-request-id".to_string()
}

fn default_store_backend() -> String {
    "memory".to_string()
}

fn default_pg_max_connections() -> u32 {
    10
}

fn default_pg_connect_timeout_ms() -> u64 {
    5_000
}

fn default_pg_idle_timeout_ms() -> u64 {
    60_000
}

fn default_cors_allowed_origins() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_cors_allowed_methods() -> Vec<String> {
    vec!["GET".to_string(), "POST".to_string(), "OPTIONS".to_string()]
}

fn default_cors_allowed_headers() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_true() -> bool {
    true
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            version: default_service_version(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: default_workers(),
            request_body_limit_bytes: default_request_body_limit(),
        }
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_format: default_log_format(),
            log_level: default_log_level(),
            request_id_header: default_request_id_header(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: default_store_backend(),
            database_url: String::new(),
            pg_max_connections: default_pg_max_connections(),
            pg_connect_timeout_ms: default_pg_connect_timeout_ms(),
            pg_idle_timeout_ms: default_pg_idle_timeout_ms(),
            run_migrations: false,
            seed_demo_data: default_true(),
        }
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            cors_allowed_origins: default_cors_allowed_origins(),
            cors_allowed_methods: default_cors_allowed_methods(),
            cors_allowed_headers: default_cors_allowed_headers(),
        }
    }
}

pub fn load_config() -> Result<Config, config::ConfigError> {
    let env = env::var("APP__ENV").unwrap_or_else(|_| "dev".to_string());

    let mut builder = config::Config::builder();

    // Try to load TOML file, but don't fail if it doesn't exist
    let config_path = format!("configs/{}/default", env);
    if std::path::Path::new(&format!("{}.toml", config_path)).exists() {
        builder = builder.add_source(config::File::with_name(&config_path).required(false));
    }

    // Environment variables override with APP__ prefix
    builder = builder.add_source(
        config::Environment::with_prefix("APP")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    config.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_a_runnable_dev_service() {
        let config = Config {
            service: ServiceConfig::default(),
            server: ServerConfig::default(),
            telemetry: TelemetryConfig::default(),
            store: StoreConfig::default(),
            security: SecurityConfig::default(),
        };
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.store.backend, "memory");
        assert!(config.store.seed_demo_data);
        assert!(!config.store.run_migrations);
        assert_eq!(config.telemetry.request_id_header, "x-request-id");
    }

    #[test]
    fn store_section_deserializes_with_partial_fields() {
        let store: StoreConfig = toml::from_str(
            r#"
            backend = "postgres"
            database_url = "postgres://localhost/bank"
            run_migrations = true
            "#,
        )
        .unwrap();
        assert_eq!(store.backend, "postgres");
        assert_eq!(store.pg_max_connections, default_pg_max_connections());
        assert!(store.run_migrations);
    }
}
