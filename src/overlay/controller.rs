//! Overlay widget lifecycle and painting

use tracing::{debug, error, info, warn};

use super::{
    document::{HostDocument, WIDGET_CLASS},
    drag::{DragController, DRAG_OPACITY},
};
use crate::{
    errors::HostError,
    lifecycle::events::PointerTarget,
    state::{widget_state::TIME_UP_MESSAGE, OverlayWidget, TimerState},
    timer::TimerEngine,
};

/// Owns the single on-page overlay widget.
///
/// Every method is a no-op when the widget has not been created yet.
pub struct OverlayController {
    document: Box<dyn HostDocument>,
    widget: Option<OverlayWidget>,
    drag: DragController,
}

impl OverlayController {
    pub fn new(document: Box<dyn HostDocument>) -> Self {
        Self {
            document,
            widget: None,
            drag: DragController::new(),
        }
    }

    pub fn widget(&self) -> Option<&OverlayWidget> {
        self.widget.as_ref()
    }

    /// Whether the widget has been created on this page
    pub fn exists(&self) -> bool {
        self.widget.is_some()
    }

    pub fn is_visible(&self) -> bool {
        self.widget.as_ref().is_some_and(|w| w.visible)
    }

    /// Whether the reset and snooze buttons are currently offered
    pub fn controls_visible(&self) -> bool {
        self.widget.as_ref().is_some_and(|w| w.controls_visible)
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Create the widget if absent, otherwise reveal it, then start the timer
    pub fn show_and_start(&mut self, engine: &mut TimerEngine) {
        let state = engine.state();
        match self.widget.as_mut() {
            Some(widget) => {
                if !widget.visible {
                    info!("Showing overlay");
                }
                widget.visible = true;
                widget.set_counters(state.elapsed_seconds, state.remaining_seconds);
            }
            None => {
                if self.document.contains(WIDGET_CLASS) {
                    debug!("Adopting existing .{} element", WIDGET_CLASS);
                } else if let Err(e) = self.document.mount(WIDGET_CLASS) {
                    error!("Failed to create overlay: {}", e);
                    return;
                }
                info!("Overlay created");
                self.widget = Some(OverlayWidget::new(
                    state.elapsed_seconds,
                    state.remaining_seconds,
                ));
            }
        }

        self.paint();
        engine.start();
    }

    /// Stop the timer and hide the widget, keeping it (and its position) on the page
    pub fn hide_and_reset(&mut self, engine: &mut TimerEngine) {
        engine.stop();
        engine.reset(false);

        let state = engine.state();
        let Some(widget) = self.widget.as_mut() else {
            return;
        };
        if widget.visible {
            info!("Hiding overlay");
        }
        widget.warning = None;
        widget.controls_visible = false;
        widget.set_counters(state.elapsed_seconds, state.remaining_seconds);
        widget.visible = false;

        if self.drag.end() {
            widget.opacity = 1.0;
        }
        self.paint();
    }

    /// Repaint the counters after a tick
    pub fn on_tick(&mut self, state: &TimerState) {
        if let Some(widget) = self.widget.as_mut() {
            widget.set_counters(state.elapsed_seconds, state.remaining_seconds);
            self.paint();
        }
    }

    /// Show the warning and the reset/snooze controls
    pub fn on_time_up(&mut self) {
        let Some(widget) = self.widget.as_mut() else {
            return;
        };
        if widget.has_warning() {
            return;
        }
        widget.warning = Some(TIME_UP_MESSAGE.to_string());
        widget.controls_visible = true;
        self.paint();
    }

    /// Remove the warning and hide the reset/snooze controls
    pub fn clear_warning(&mut self) {
        let Some(widget) = self.widget.as_mut() else {
            return;
        };
        if !widget.has_warning() && !widget.controls_visible {
            return;
        }
        widget.warning = None;
        widget.controls_visible = false;
        self.paint();
    }

    pub fn pointer_down(&mut self, x: f64, y: f64, target: PointerTarget) {
        if target != PointerTarget::Header {
            return;
        }
        let Some(widget) = self.widget.as_mut().filter(|w| w.visible) else {
            return;
        };
        self.drag.begin(x, y, widget.position);
        widget.opacity = DRAG_OPACITY;
        self.paint();
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        if !self.drag.is_dragging() {
            return;
        }
        let Some(size) = self.document.measure(WIDGET_CLASS) else {
            warn!("Overlay element missing while dragging");
            return;
        };
        let viewport = self.document.viewport();
        let (Some(widget), Some(position)) = (
            self.widget.as_mut(),
            self.drag.drag_to(x, y, size, viewport),
        ) else {
            return;
        };
        widget.position = position;
        self.paint();
    }

    pub fn pointer_up(&mut self) {
        if !self.drag.end() {
            return;
        }
        if let Some(widget) = self.widget.as_mut() {
            widget.opacity = 1.0;
            self.paint();
        }
    }

    /// Remove the widget from the page. Succeeds if it was never created.
    pub fn teardown(&mut self) -> Result<(), HostError> {
        self.drag.end();
        if self.widget.take().is_none() {
            return Ok(());
        }
        self.document.unmount(WIDGET_CLASS)
    }

    fn paint(&mut self) {
        let Some(widget) = self.widget.as_ref() else {
            return;
        };
        if let Err(e) = self.document.paint(WIDGET_CLASS, widget) {
            warn!("Failed to paint overlay: {}", e);
        }
    }
}

impl std::fmt::Debug for OverlayController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverlayController")
            .field("widget", &self.widget)
            .field("drag", &self.drag)
            .finish()
    }
}
