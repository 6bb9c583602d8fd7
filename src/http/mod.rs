/// HTTP server module
pub mod middleware;
pub mod routes;

use actix_cors::Cors;
use actix_web::{http, web, App, HttpServer};
use std::io;

use crate::app_state::AppState;
use crate::config::{Config, SecurityConfig};
use middleware::{AccessLog, RequestId};

fn build_cors(security: &SecurityConfig) -> Cors {
    let mut cors = Cors::default();

    if security.cors_allowed_origins.iter().any(|o| o == "*") {
        cors = cors.allow_any_origin();
    } else {
        for origin in &security.cors_allowed_origins {
            cors = cors.allowed_origin(origin);
        }
    }

    let methods: Vec<http::Method> = security
        .cors_allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    cors = cors.allowed_methods(methods);

    if security.cors_allowed_headers.iter().any(|h| h == "*") {
        cors = cors.allow_any_header();
    } else {
        cors = cors.allowed_headers(
            security
                .cors_allowed_headers
                .iter()
                .filter_map(|h| h.parse::<http::header::HeaderName>().ok())
                .collect::<Vec<_>>(),
        );
    }

    cors
}

pub async fn start_server(config: Config, app_state: AppState) -> io::Result<()> {
    let bind_addr = format!("{}:{}", config.server.host, config.server.port);

    tracing::info!(
        service_name = %config.service.name,
        service_version = %config.service.version,
        bind_addr = %bind_addr,
        store_backend = %config.store.backend,
        log_level = %config.telemetry.log_level,
        log_format = %config.telemetry.log_format,
        "Starting HTTP server"
    );

    let app_state = web::Data::new(app_state);
    let request_id_header = config.telemetry.request_id_header.clone();
    let security = config.security.clone();
    let body_limit = config.server.request_body_limit_bytes;
    let workers = config.server.workers as usize;

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .app_data(web::PayloadConfig::new(body_limit))
            .wrap(build_cors(&security))
            .wrap(AccessLog)
            .wrap(RequestId::new(request_id_header.clone()))
            .configure(routes::configure)
    })
    .workers(workers)
    .bind(&bind_addr)?
    .run()
    .await
}
