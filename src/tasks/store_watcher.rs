//! Settings file change detection

use std::{path::PathBuf, time::{Duration, SystemTime}};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::{
    lifecycle::events::{EventSender, EventSource, PageEvent, Subscription},
    settings::StoreChange,
};

/// Polls the settings file and reports each modification as a sync-area change
#[derive(Debug, Clone)]
pub struct StoreWatcher {
    path: PathBuf,
    period: Duration,
}

impl StoreWatcher {
    pub fn new(path: impl Into<PathBuf>, period: Duration) -> Self {
        Self {
            path: path.into(),
            period,
        }
    }

    async fn modified(&self) -> Option<SystemTime> {
        match tokio::fs::metadata(&self.path).await {
            Ok(metadata) => metadata.modified().ok(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!("Failed to stat settings file {}: {}", self.path.display(), e);
                None
            }
        }
    }

    async fn watch(self, events: EventSender) {
        info!("Watching settings file {}", self.path.display());

        let mut last_seen = self.modified().await;
        let mut interval = interval(self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            interval.tick().await;

            let current = self.modified().await;
            if current == last_seen {
                continue;
            }
            last_seen = current;

            debug!("Settings file changed");
            if events.send(PageEvent::StoreChanged(StoreChange::sync_all())).is_err() {
                debug!("Event queue closed, settings watcher exiting");
                break;
            }
        }
    }
}

impl EventSource for StoreWatcher {
    fn name(&self) -> &'static str {
        "settings-store"
    }

    fn subscribe(self, events: EventSender) -> Subscription {
        Subscription::spawn(self.name(), self.watch(events))
    }
}
