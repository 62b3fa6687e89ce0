//! Line-based host input for the headless page
//!
//! Stands in for the browser: each stdin line is one user or document event.

use std::{
    io::{self, BufRead, BufReader},
    sync::atomic::Ordering,
};
use tracing::{debug, info, warn};

use crate::lifecycle::events::{
    DetachFlag, EventSender, EventSource, PageEvent, PointerTarget, Subscription,
};

/// Parse one command line into a page event.
///
/// Blank lines parse to `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<PageEvent>, String> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let event = match (command.to_lowercase().as_str(), args.as_slice()) {
        ("goto", [href]) => PageEvent::UrlMutation {
            href: href.to_string(),
        },
        ("hide", []) => PageEvent::VisibilityChanged { hidden: true },
        ("show", []) => PageEvent::VisibilityChanged { hidden: false },
        ("grab", [x, y]) => {
            let (x, y) = parse_point(x, y)?;
            PageEvent::PointerDown {
                x,
                y,
                target: PointerTarget::Header,
            }
        }
        ("move", [x, y]) => {
            let (x, y) = parse_point(x, y)?;
            PageEvent::PointerMove { x, y }
        }
        ("release", []) => PageEvent::PointerUp,
        ("reset", []) => PageEvent::ResetClicked,
        ("snooze", []) => PageEvent::SnoozeClicked,
        ("status", []) => PageEvent::StatusRequested,
        ("quit", []) => PageEvent::Unload,
        _ => return Err(format!("Unknown command: {}", line.trim())),
    };
    Ok(Some(event))
}

fn parse_point(x: &str, y: &str) -> Result<(f64, f64), String> {
    let x = x.parse().map_err(|_| format!("Invalid x coordinate: {}", x))?;
    let y = y.parse().map_err(|_| format!("Invalid y coordinate: {}", y))?;
    Ok((x, y))
}

/// Reads host commands line by line on a dedicated thread.
///
/// End of input only stops the reader; the page stays loaded until `quit`
/// or a shutdown signal.
pub struct HostInput {
    reader: Box<dyn BufRead + Send>,
}

impl HostInput {
    pub fn new(reader: impl BufRead + Send + 'static) -> Self {
        Self {
            reader: Box::new(reader),
        }
    }

    /// Read commands from the process's stdin
    pub fn stdin() -> Self {
        Self::new(BufReader::new(io::stdin()))
    }

    fn read(self, events: EventSender, detached: DetachFlag) {
        for line in self.reader.lines() {
            if detached.load(Ordering::SeqCst) {
                return;
            }
            match line {
                Ok(line) => match parse_command(&line) {
                    Ok(Some(event)) => {
                        debug!("Host event: {:?}", event);
                        if events.send(event).is_err() {
                            return;
                        }
                    }
                    Ok(None) => {}
                    Err(e) => warn!("{}", e),
                },
                Err(e) => {
                    warn!("Failed to read host input: {}", e);
                    return;
                }
            }
        }
        info!("Host input closed");
    }
}

impl Default for HostInput {
    fn default() -> Self {
        Self::stdin()
    }
}

impl std::fmt::Debug for HostInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostInput").finish_non_exhaustive()
    }
}

impl EventSource for HostInput {
    fn name(&self) -> &'static str {
        "host-input"
    }

    fn subscribe(self, events: EventSender) -> Subscription {
        Subscription::spawn_thread(self.name(), move |detached| self.read(events, detached))
    }
}
