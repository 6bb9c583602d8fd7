use account_activity_api::app_state::AppState;
use account_activity_api::config::load_config;
use account_activity_api::http;
use account_activity_api::store::create_store;
use account_activity_api::telemetry::init_telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if exists
    let _ = dotenvy::dotenv();

    let config = load_config().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::process::exit(1);
    });

    init_telemetry(&config.telemetry);

    let store = create_store(&config.store).await;
    let app_state = AppState::new(config.service.clone(), store);

    // Graceful shutdown on ctrl-c
    let (tx, rx) = tokio::sync::oneshot::channel::<()>();

    tokio::spawn(async move {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to listen for ctrl-c");
        tracing::info!("Shutdown signal received");
        let _ = tx.send(());
    });

    let server = http::start_server(config, app_state);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!(error = %e, "Server error");
                return Err(e);
            }
        }
        _ = rx => {
            tracing::info!("Shutting down gracefully");
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
