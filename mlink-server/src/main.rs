use mlink_auth::{SessionService, TokenAuthority};
use mlink_config::Config;
use mlink_server::error::ServerError;
use mlink_server::mailer::{LogMailer, Mailer, SendGridMailer};
use mlink_server::state::AppState;
use mlink_server::{build_router, logger};
use mlink_store::UserStore;

use std::error::Error;
use std::sync::Arc;

use log::{error, info, warn};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();

    // Load and validate configuration
    let config = Config::load()?;
    config.validate()?;

    // Construct log file path if configured
    let log_file_path: Option<std::path::PathBuf> = if let Some(ref filename) = config.logging.file
    {
        let log_dir = Config::config_dir()?.join(&config.logging.dir);

        // Ensure log directory exists
        std::fs::create_dir_all(&log_dir)?;

        Some(log_dir.join(filename))
    } else {
        None
    };

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting mlink-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    // The public directory must hold the avatar and upload targets
    let public_dir = config.public_dir();
    for sub in ["avatars", "images"] {
        let dir = public_dir.join(sub);
        std::fs::create_dir_all(&dir).map_err(|e| ServerError::Io {
            path: dir.display().to_string(),
            source: e,
        })?;
    }

    // Load the user store (seeds a default user when the file is absent)
    let store_path = config.store_path()?;
    info!("User store: {}", store_path.display());
    let store = Arc::new(UserStore::load(store_path).await);

    let Some(ref secret) = config.auth.secret else {
        unreachable!("validate() ensures auth.secret is set")
    };
    let authority = TokenAuthority::new(secret, config.auth.token_ttl_minutes);
    let sessions = Arc::new(SessionService::new(authority, store.clone()));

    let mailer: Arc<dyn Mailer> = if config.email.delivery_enabled() {
        info!("Email delivery: SendGrid");
        Arc::new(SendGridMailer::new(config.email.clone()))
    } else {
        warn!("No email API key configured - magic links will only be logged");
        Arc::new(LogMailer)
    };

    let state = AppState {
        store,
        sessions,
        mailer,
        public_dir,
        public_url: config.server.public_url.trim_end_matches('/').to_string(),
        cookie_name: config.auth.cookie_name.clone(),
    };

    let app = build_router(state);

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Graceful shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received SIGINT (Ctrl+C), initiating graceful shutdown"),
        Err(e) => error!("Failed to listen for SIGINT: {}", e),
    }
}
