use somoim_watch::{config::Config, init_logging, watcher::Watcher};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    // Load configuration
    let config = Config::load()?;
    tracing::info!(url = %config.url, interval = ?config.poll_interval, "Starting somoim watcher");

    let watcher = Watcher::from_config(&config)?;
    watcher.run().await;

    Ok(())
}
