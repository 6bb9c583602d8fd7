/// Liveness, readiness, and version routes
use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;

use crate::app_state::AppState;

#[derive(Serialize)]
struct HealthResponse {
    status: String,
}

#[derive(Serialize)]
struct ReadyResponse {
    ready: bool,
    store: CheckResult,
}

#[derive(Serialize)]
struct CheckResult {
    ok: bool,
    details: String,
}

#[derive(Serialize)]
struct VersionResponse {
    name: String,
    version: String,
}

pub async fn healthz() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
    })
}

pub async fn readyz(state: web::Data<AppState>) -> impl Responder {
    let store = match state.store.ping().await {
        Ok(()) => CheckResult {
            ok: true,
            details: "healthy".to_string(),
        },
        Err(e) => CheckResult {
            ok: false,
            details: e.to_string(),
        },
    };

    let ready = store.ok;
    let status = if ready {
        actix_web::http::StatusCode::OK
    } else {
        actix_web::http::StatusCode::SERVICE_UNAVAILABLE
    };

    HttpResponse::build(status).json(ReadyResponse { ready, store })
}

pub async fn version(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(VersionResponse {
        name: state.service_config.name.clone(),
        version: state.service_config.version.clone(),
    })
}
