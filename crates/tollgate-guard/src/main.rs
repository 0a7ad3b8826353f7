//! Resource service binary guarded by the Delegated Verifier

use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;

use tollgate_guard::{create_resource_router, DelegatedVerifier, GuardConfig, HttpRemoteVerifier};

#[tokio::main]
async fn main() {
    let config = match GuardConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .with_target(true)
        .with_thread_ids(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    let remote = match HttpRemoteVerifier::new(&config.verify_url, config.timeout) {
        Ok(remote) => remote,
        Err(e) => {
            error!(error = %e, "Failed to build authority client");
            std::process::exit(1);
        }
    };

    info!(
        verify_url = %config.verify_url,
        timeout_ms = config.timeout.as_millis() as u64,
        "Remote verification fallback configured"
    );

    let verifier = Arc::new(DelegatedVerifier::new(&config.secret, Arc::new(remote)));
    let app = create_resource_router(verifier);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    info!(addr = %addr, "Resource service listening");

    axum::serve(listener, app)
        .await
        .expect("Server error");
}
