//! Page lifecycle: reacts to page events and sequences timer/overlay transitions

use chrono::{DateTime, Utc};
use tracing::{debug, error, info, warn};

use super::{
    events::{EventReceiver, EventSender, EventSource, PageEvent, Subscription},
    page::PageContext,
    status::PageStatus,
};
use crate::{
    settings::{ConfigStore, Settings, StoreArea, StoreChange},
    watchlist::is_tracked,
};

/// Drives one page's [`PageContext`] from the page event queue
pub struct LifecycleCoordinator {
    page: PageContext,
    store: Box<dyn ConfigStore>,
    settings: Settings,
    url: String,
    tracked: bool,
    page_hidden: bool,
    subscriptions: Vec<Subscription>,
    torn_down: bool,
    last_action: Option<String>,
    last_action_time: Option<DateTime<Utc>>,
}

impl LifecycleCoordinator {
    /// Create a coordinator for a page currently at `url`
    pub fn new(page: PageContext, store: Box<dyn ConfigStore>, url: impl Into<String>) -> Self {
        Self {
            page,
            store,
            settings: Settings::default(),
            url: url.into(),
            tracked: false,
            page_hidden: false,
            subscriptions: Vec::new(),
            torn_down: false,
            last_action: None,
            last_action_time: None,
        }
    }

    pub fn page(&self) -> &PageContext {
        &self.page
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn is_tracked(&self) -> bool {
        self.tracked
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Attach an event source; it is detached on teardown
    pub fn attach<S: EventSource>(&mut self, source: S, events: EventSender) {
        info!("Attaching event source {}", source.name());
        self.subscriptions.push(source.subscribe(events));
    }

    /// Load settings and evaluate the initial URL
    pub fn start(&mut self) {
        info!("URL timer initialized for {}", self.url);
        self.reload_settings();
        self.evaluate_tracking();
    }

    /// Process events until the page unloads or the queue closes
    pub async fn run(&mut self, mut events: EventReceiver) {
        while let Some(event) = events.recv().await {
            if !self.handle(event) {
                return;
            }
        }

        debug!("Event queue closed");
        self.teardown();
    }

    /// Apply one event. Returns false once the page has been torn down.
    pub fn handle(&mut self, event: PageEvent) -> bool {
        if self.torn_down {
            debug!("Ignoring {:?} after teardown", event);
            return false;
        }

        match event {
            PageEvent::Tick { generation } => {
                self.page.tick(generation);
            }
            PageEvent::StoreChanged(change) => self.on_store_changed(change),
            PageEvent::VisibilityChanged { hidden } => self.on_visibility_changed(hidden),
            PageEvent::UrlMutation { href } => self.on_url_mutation(href),
            PageEvent::PointerDown { x, y, target } => self.page.overlay.pointer_down(x, y, target),
            PageEvent::PointerMove { x, y } => self.page.overlay.pointer_move(x, y),
            PageEvent::PointerUp => self.page.overlay.pointer_up(),
            PageEvent::ResetClicked => self.on_reset_clicked(false),
            PageEvent::SnoozeClicked => self.on_reset_clicked(true),
            PageEvent::StatusRequested => match serde_json::to_string(&self.status()) {
                Ok(status) => info!("Status: {}", status),
                Err(e) => warn!("Failed to serialize status: {}", e),
            },
            PageEvent::Unload => {
                self.teardown();
                return false;
            }
        }
        true
    }

    /// Reload settings on any sync-area change and re-evaluate tracking
    pub fn on_store_changed(&mut self, change: StoreChange) {
        if change.area != StoreArea::Sync {
            debug!("Ignoring {:?} store change", change.area);
            return;
        }
        debug!("Settings changed: {:?}", change.keys);
        self.reload_settings();
        self.evaluate_tracking();
    }

    pub fn on_visibility_changed(&mut self, hidden: bool) {
        self.page_hidden = hidden;
        if hidden {
            self.page.engine.pause();
        } else if self.page.overlay.is_visible() {
            self.page.engine.resume();
        }
    }

    /// Re-evaluate tracking when the document's location actually changed
    pub fn on_url_mutation(&mut self, href: String) {
        if href == self.url {
            return;
        }
        debug!("URL changed to {}", href);
        self.url = href;
        self.evaluate_tracking();
    }

    fn on_reset_clicked(&mut self, keep_elapsed: bool) {
        if !self.page.overlay.controls_visible() {
            debug!("Ignoring reset click while controls are hidden");
            return;
        }
        self.page.reset(keep_elapsed);
        self.record(if keep_elapsed { "snooze" } else { "reset" });
    }

    fn reload_settings(&mut self) {
        let settings = match Settings::load(self.store.as_ref()) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Failed to load settings, keeping previous: {}", e);
                return;
            }
        };

        let limit_changed = settings.limit_seconds != self.page.engine.state().limit_seconds;
        self.settings = settings;

        if limit_changed {
            info!("Time limit is now {}", self.settings.time_limit);
            self.page.configure(self.settings.limit_seconds);
        }
    }

    fn evaluate_tracking(&mut self) {
        let tracked = is_tracked(&self.url, &self.settings.watchlist, self.settings.enabled);

        if tracked {
            self.page.show_and_start();
            if !self.page_hidden {
                self.page.engine.resume();
            }
        } else {
            self.page.hide_and_reset();
        }

        if tracked != self.tracked {
            self.tracked = tracked;
            self.record(if tracked { "tracking-started" } else { "tracking-stopped" });
        }
    }

    /// Cancel the tick, detach every event source and remove the widget. Runs once.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        info!("Tearing down page");

        self.page.engine.cancel();

        for subscription in &mut self.subscriptions {
            subscription.detach();
        }
        self.subscriptions.clear();

        if let Err(e) = self.page.overlay.teardown() {
            error!("Error during cleanup: {}", e);
        }
        self.record("unload");
    }

    pub fn status(&self) -> PageStatus {
        let overlay = &self.page.overlay;
        PageStatus {
            url: self.url.clone(),
            tracked: self.tracked,
            enabled: self.settings.enabled,
            time_limit: self.settings.time_limit.clone(),
            timer: self.page.engine.state().clone(),
            timer_running: self.page.engine.is_running(),
            time_up: self.page.engine.is_time_up(),
            page_hidden: self.page_hidden,
            overlay_visible: overlay.is_visible(),
            overlay_position: overlay.widget().map(|w| w.position),
            last_action: self.last_action.clone(),
            last_action_time: self.last_action_time,
        }
    }

    fn record(&mut self, action: &str) {
        info!("Page action: {}", action);
        self.last_action = Some(action.to_string());
        self.last_action_time = Some(Utc::now());
    }
}

impl Drop for LifecycleCoordinator {
    fn drop(&mut self) {
        self.teardown();
    }
}
