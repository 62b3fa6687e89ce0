//! URL Timer - headless host
//! 
//! Runs the page timer against an in-memory document, reading host events
//! from stdin and settings from a JSON file.

use tracing::info;

use url_timer::{
    config::Config,
    lifecycle::{event_queue, LifecycleCoordinator, PageContext},
    overlay::HeadlessDocument,
    settings::{JsonFileStore, Settings},
    state::Size,
    tasks::{HostInput, IntervalTicker, ShutdownListener, StoreWatcher},
};

/// Rendered size of the overlay in the headless document
const WIDGET_SIZE: Size = Size { width: 180.0, height: 110.0 };

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("url_timer={}", config.log_level()))
        .init();

    info!("Starting url-timer v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: store={}, url={}, viewport={}x{}",
          config.store.display(), config.url, config.viewport.width, config.viewport.height);

    let store = JsonFileStore::new(&config.store);
    if let Err(e) = Settings::load(&store) {
        anyhow::bail!("Cannot read settings from {}: {}", store.path().display(), e);
    }

    let (events_tx, events_rx) = event_queue();
    let document = HeadlessDocument::new(config.viewport, WIDGET_SIZE);
    let page = PageContext::new(
        0,
        Box::new(IntervalTicker::new(events_tx.clone())),
        Box::new(document),
    );

    let mut coordinator = LifecycleCoordinator::new(page, Box::new(store), config.url.clone());
    coordinator.attach(StoreWatcher::new(&config.store, config.poll_interval()), events_tx.clone());
    coordinator.attach(HostInput::stdin(), events_tx.clone());
    coordinator.attach(ShutdownListener::new(), events_tx.clone());
    drop(events_tx);

    info!("Commands:");
    info!("  goto <url>          - Navigate within the page");
    info!("  hide | show         - Change tab visibility");
    info!("  grab/move <x> <y>   - Drag the overlay header");
    info!("  release             - Drop the overlay");
    info!("  reset | snooze      - Press the overlay buttons");
    info!("  status              - Print the page status");
    info!("  quit                - Unload the page (as does SIGINT/SIGTERM)");
    info!("End of input stops command reading; the page stays loaded.");

    coordinator.start();
    coordinator.run(events_rx).await;

    info!("Page unloaded");
    Ok(())
}
