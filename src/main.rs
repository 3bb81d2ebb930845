use dotenv::dotenv;
use portfolio_backend::app::app::App;
use portfolio_backend::util::logger::Logger;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Load .env before the logger reads RUST_LOG / LOG_DIR
    let dotenv_result = dotenv();

    let _guards = match Logger::new() {
        Ok(logger) => logger.guards,
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
                .with_target(true)
                .init();
            warn!("⚠️ File logging unavailable, using console only: {}", e);
            Vec::new()
        }
    };

    info!("🚀 Starting Portfolio Backend");
    match dotenv_result {
        Ok(_) => info!("✅ Successfully loaded .env file"),
        Err(e) => warn!("⚠️ Failed to load .env file: {} (using system env vars)", e),
    }

    let app = match App::new().await {
        Ok(app) => app,
        Err(e) => {
            error!("Failed to initialize application: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = app.start().await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}
