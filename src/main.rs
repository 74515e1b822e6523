use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use vitrine::config::Config;
use vitrine::db::{ContentStore, connect};
use vitrine::router::{VitrineState, vitrine_router};
use vitrine::{ContentService, ImageNormalizer};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = Config::load()?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        database_url = %cfg.database_url,
        uploads_dir = %cfg.uploads_dir.display(),
        loglevel = %cfg.loglevel,
        max_upload_bytes = cfg.max_upload_bytes
    );

    let pool = connect(&cfg.database_url).await?;
    let store = ContentStore::new(pool);
    store.init_schema().await?;

    let normalizer = ImageNormalizer::new(&cfg.uploads_dir);
    normalizer.ensure_dir()?;

    // Build axum router and serve
    let state = VitrineState::new(ContentService::new(store, normalizer));
    let app = vitrine_router(state, cfg.max_upload_bytes);

    let listener = TcpListener::bind(&cfg.listen_addr).await?;
    info!("HTTP server listening on {}", cfg.listen_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl-c; shutting down");
    }
}
