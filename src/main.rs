use hrms_engine::api::{AppState, create_router};
use hrms_engine::config::ConfigLoader;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "hrms_engine=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_dir = std::env::var("HRMS_CONFIG_DIR").unwrap_or_else(|_| "./config/hrms".into());
    let addr = std::env::var("HRMS_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".into());

    let config = ConfigLoader::load(&config_dir)?;
    let app = create_router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, config_dir = %config_dir, "HRMS engine listening");
    axum::serve(listener, app).await?;

    Ok(())
}
