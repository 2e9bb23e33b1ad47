use chrono::Utc;
use feed_logging::{feed_info, LevelFilter, LogDestination};
use feed_server::{router, AppState, Collection, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    feed_logging::initialize(LogDestination::Terminal, LevelFilter::Info);

    let config = ServerConfig::from_env()?;
    let collection = Collection::generate(config.collection_size, Utc::now());
    let state = AppState::new(collection, &config.cache_control)?;

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    feed_info!(
        "Serving {} items on {}",
        state.collection().len(),
        listener.local_addr()?
    );
    axum::serve(listener, router(state)).await?;
    Ok(())
}
