//! End-to-end page lifecycle through the public API

use std::{
    io::{self, BufReader, Read},
    sync::mpsc,
    time::Duration,
};
use tokio::sync::oneshot;

use url_timer::{
    lifecycle::{
        event_queue, EventSender, EventSource, LifecycleCoordinator, PageContext, PageEvent,
        PointerTarget, Subscription,
    },
    overlay::{HeadlessDocument, HostDocument, WIDGET_CLASS},
    settings::{MemoryStore, StoreChange, StoredSettings},
    state::Size,
    tasks::{HostInput, IntervalTicker, ManualTicker, ShutdownListener},
};

fn store(url_list: &str, time_limit: &str) -> MemoryStore {
    MemoryStore::new(StoredSettings {
        url_list: Some(url_list.to_string()),
        time_limit: Some(time_limit.to_string()),
        is_enabled: Some(true),
    })
}

fn document() -> HeadlessDocument {
    HeadlessDocument::new(Size::new(1024.0, 768.0), Size::new(180.0, 110.0))
}

/// Replays a fixed script of events, as a host page would
struct Script(Vec<PageEvent>);

impl EventSource for Script {
    fn name(&self) -> &'static str {
        "script"
    }

    fn subscribe(self, events: EventSender) -> Subscription {
        Subscription::spawn(self.name(), async move {
            for event in self.0 {
                if events.send(event).is_err() {
                    break;
                }
            }
        })
    }
}

/// A terminal that stays open and never types: reads block until the
/// writer goes away
struct IdleTerminal(mpsc::Receiver<Vec<u8>>);

impl Read for IdleTerminal {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        let _ = self.0.recv();
        Ok(0)
    }
}

#[test]
fn single_page_app_session() {
    let store = store("example.com\nvideo.test", "00:00:03");
    let document = document();
    let page = PageContext::new(0, Box::new(ManualTicker::new()), Box::new(document.clone()));
    let mut coordinator =
        LifecycleCoordinator::new(page, Box::new(store.clone()), "https://news.site/");
    coordinator.start();
    assert!(!document.contains(WIDGET_CLASS));

    coordinator.handle(PageEvent::UrlMutation {
        href: "https://Example.com/home".to_string(),
    });
    assert!(coordinator.is_tracked());

    for _ in 0..3 {
        let generation = coordinator.page().engine.generation();
        coordinator.handle(PageEvent::Tick { generation });
    }
    let painted = document.painted(WIDGET_CLASS).expect("overlay painted");
    assert_eq!(painted.elapsed_text, "00:00:03");
    assert_eq!(painted.remaining_text, "00:00:00");
    assert_eq!(painted.warning.as_deref(), Some("Time limit reached!"));

    coordinator.handle(PageEvent::SnoozeClicked);
    let status = coordinator.status();
    assert_eq!(status.timer.elapsed_seconds, 3);
    assert_eq!(status.timer.remaining_seconds, 3);
    assert!(!status.time_up);

    store.set(StoredSettings {
        url_list: Some("video.test".to_string()),
        time_limit: Some("00:00:03".to_string()),
        is_enabled: Some(true),
    });
    coordinator.handle(PageEvent::StoreChanged(StoreChange::sync_all()));
    assert!(!coordinator.is_tracked());
    assert!(!document.painted(WIDGET_CLASS).unwrap().visible);

    assert!(!coordinator.handle(PageEvent::Unload));
    assert!(!document.contains(WIDGET_CLASS));
}

#[tokio::test]
async fn run_drains_queue_until_unload() {
    let (tx, rx) = event_queue();
    let document = document();
    let page = PageContext::new(0, Box::new(ManualTicker::new()), Box::new(document.clone()));
    let mut coordinator = LifecycleCoordinator::new(
        page,
        Box::new(store("example.com", "00:10:00")),
        "https://example.com/",
    );
    coordinator.start();

    coordinator.attach(
        Script(vec![
            PageEvent::PointerDown {
                x: 30.0,
                y: 30.0,
                target: PointerTarget::Header,
            },
            PageEvent::PointerMove { x: 5000.0, y: 5000.0 },
            PageEvent::PointerUp,
            PageEvent::StatusRequested,
            PageEvent::Unload,
        ]),
        tx.clone(),
    );

    tokio::time::timeout(Duration::from_secs(5), coordinator.run(rx))
        .await
        .expect("page unloaded");

    assert!(coordinator.is_torn_down());
    assert!(!document.contains(WIDGET_CLASS));
    let position = coordinator.status().overlay_position;
    assert!(position.is_none());
}

#[tokio::test(start_paused = true)]
async fn interval_ticks_advance_the_timer() {
    let (tx, rx) = event_queue();
    let document = document();
    let page = PageContext::new(
        0,
        Box::new(IntervalTicker::new(tx.clone())),
        Box::new(document.clone()),
    );
    let mut coordinator = LifecycleCoordinator::new(
        page,
        Box::new(store("example.com", "00:00:05")),
        "https://example.com/",
    );
    coordinator.start();

    let unload = tx.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(5500)).await;
        let _ = unload.send(PageEvent::Unload);
    });

    coordinator.run(rx).await;

    let status = coordinator.status();
    assert_eq!(status.timer.elapsed_seconds, 5);
    assert_eq!(status.timer.remaining_seconds, 0);
    assert!(status.time_up);
}

#[tokio::test]
async fn shutdown_signal_unloads_while_host_input_is_blocked() {
    let document = document();
    let page = PageContext::new(0, Box::new(ManualTicker::new()), Box::new(document.clone()));
    let mut coordinator = LifecycleCoordinator::new(
        page,
        Box::new(store("example.com", "00:10:00")),
        "https://example.com/",
    );

    let (events_tx, events_rx) = event_queue();
    let (_terminal, keyboard) = mpsc::channel();
    let (signal_tx, signal_rx) = oneshot::channel::<()>();
    coordinator.attach(
        HostInput::new(BufReader::new(IdleTerminal(keyboard))),
        events_tx.clone(),
    );
    coordinator.attach(
        ShutdownListener::with_trigger(async move {
            let _ = signal_rx.await;
        }),
        events_tx,
    );
    coordinator.start();
    assert!(document.contains(WIDGET_CLASS));

    signal_tx.send(()).unwrap();
    tokio::time::timeout(Duration::from_secs(5), coordinator.run(events_rx))
        .await
        .expect("page unloads while host input is still reading");

    assert!(coordinator.is_torn_down());
    assert!(!document.contains(WIDGET_CLASS));
    assert_eq!(coordinator.status().last_action.as_deref(), Some("unload"));
}
