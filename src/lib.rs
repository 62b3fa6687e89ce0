//! URL Timer - a per-page overlay timer for watchlisted URLs
//! 
//! While the page's URL matches the configured watchlist, an on-page widget
//! counts elapsed time and a countdown towards the configured limit, warns
//! when the limit is reached and offers reset and snooze. The widget can be
//! dragged anywhere inside the viewport.

pub mod config;
pub mod errors;
pub mod lifecycle;
pub mod overlay;
pub mod settings;
pub mod state;
pub mod tasks;
pub mod timer;
pub mod utils;
pub mod watchlist;

// Re-export commonly used types
pub use config::Config;
pub use lifecycle::{LifecycleCoordinator, PageContext, PageEvent};
pub use settings::Settings;
pub use timer::TimerEngine;
pub use utils::{format_time, parse_time_limit};
pub use watchlist::is_tracked;
