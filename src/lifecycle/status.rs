//! Page status snapshot

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::state::{Position, TimerState};

/// Point-in-time view of the page, serialized for host diagnostics
#[derive(Debug, Clone, Serialize)]
pub struct PageStatus {
    pub url: String,
    pub tracked: bool,
    pub enabled: bool,
    pub time_limit: String,
    pub timer: TimerState,
    pub timer_running: bool,
    pub time_up: bool,
    pub page_hidden: bool,
    pub overlay_visible: bool,
    pub overlay_position: Option<Position>,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}
