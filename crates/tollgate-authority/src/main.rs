//! Credential Authority server binary

use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;

use tollgate_authority::{create_router, AppState, Authority, AuthorityConfig, MemoryStore, UserStore};

#[tokio::main]
async fn main() {
    let config = match AuthorityConfig::from_env() {
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

    let store = match open_store(&config).await {
        Ok(store) => store,
        Err(e) => {
            error!(error = %e, "Failed to open user store");
            std::process::exit(1);
        }
    };

    let authority = Authority::new(store, &config.secret);
    let state = Arc::new(AppState { authority });
    let app = create_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    info!(addr = %addr, "Auth service listening");

    axum::serve(listener, app)
        .await
        .expect("Server error");
}

#[cfg(feature = "postgres")]
async fn open_store(
    config: &AuthorityConfig,
) -> Result<Arc<dyn UserStore>, tollgate_authority::StorageError> {
    match &config.database_url {
        Some(url) => {
            let store = tollgate_authority::PostgresStore::new(url).await?;
            Ok(Arc::new(store))
        }
        None => {
            info!("DATABASE_URL not set, using in-memory user store");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

#[cfg(not(feature = "postgres"))]
async fn open_store(
    config: &AuthorityConfig,
) -> Result<Arc<dyn UserStore>, tollgate_authority::StorageError> {
    if config.database_url.is_some() {
        tracing::warn!("DATABASE_URL ignored: built without the `postgres` feature");
    }
    info!("Using in-memory user store");
    Ok(Arc::new(MemoryStore::new()))
}
