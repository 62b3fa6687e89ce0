//! Host document abstraction and a headless implementation

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};
use tracing::{debug, info};

use crate::{
    errors::HostError,
    state::{OverlayWidget, Size},
};

/// Reserved class identifying the overlay element on the page
pub const WIDGET_CLASS: &str = "url-timer-container";

/// What the overlay needs from the page it lives on
pub trait HostDocument: Send {
    /// Size of the visible viewport
    fn viewport(&self) -> Size;

    /// Whether an element with `class` is attached to the page
    fn contains(&self, class: &str) -> bool;

    /// Attach a new element with `class`
    fn mount(&mut self, class: &str) -> Result<(), HostError>;

    /// Render `widget` into the element with `class`
    fn paint(&mut self, class: &str, widget: &OverlayWidget) -> Result<(), HostError>;

    /// Rendered size of the element with `class`
    fn measure(&self, class: &str) -> Option<Size>;

    /// Detach the element with `class`
    fn unmount(&mut self, class: &str) -> Result<(), HostError>;
}

#[derive(Debug)]
struct HeadlessPage {
    viewport: Size,
    widget_size: Size,
    elements: HashMap<String, Option<OverlayWidget>>,
    paints: usize,
    reject_all: bool,
}

/// In-memory page used by the headless host and by tests.
///
/// Clones share the same page so a caller can inspect what was painted.
#[derive(Debug, Clone)]
pub struct HeadlessDocument {
    page: Arc<Mutex<HeadlessPage>>,
}

impl HeadlessDocument {
    pub fn new(viewport: Size, widget_size: Size) -> Self {
        Self {
            page: Arc::new(Mutex::new(HeadlessPage {
                viewport,
                widget_size,
                elements: HashMap::new(),
                paints: 0,
                reject_all: false,
            })),
        }
    }

    fn page(&self) -> MutexGuard<'_, HeadlessPage> {
        self.page.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn set_viewport(&self, viewport: Size) {
        self.page().viewport = viewport;
    }

    /// Make every mutating operation fail, simulating a torn-down document
    pub fn reject_all(&self, reject: bool) {
        self.page().reject_all = reject;
    }

    /// Last widget painted into the element with `class`
    pub fn painted(&self, class: &str) -> Option<OverlayWidget> {
        self.page().elements.get(class).cloned().flatten()
    }

    pub fn paint_count(&self) -> usize {
        self.page().paints
    }

    fn check(&self, operation: &str) -> Result<(), HostError> {
        if self.page().reject_all {
            return Err(HostError::Rejected(operation.to_string()));
        }
        Ok(())
    }
}

impl Default for HeadlessDocument {
    fn default() -> Self {
        Self::new(Size::new(1280.0, 720.0), Size::new(180.0, 110.0))
    }
}

impl HostDocument for HeadlessDocument {
    fn viewport(&self) -> Size {
        self.page().viewport
    }

    fn contains(&self, class: &str) -> bool {
        self.page().elements.contains_key(class)
    }

    fn mount(&mut self, class: &str) -> Result<(), HostError> {
        self.check("mount")?;
        self.page().elements.entry(class.to_string()).or_insert(None);
        info!("Mounted .{}", class);
        Ok(())
    }

    fn paint(&mut self, class: &str, widget: &OverlayWidget) -> Result<(), HostError> {
        self.check("paint")?;
        let mut page = self.page();
        let element = page
            .elements
            .get_mut(class)
            .ok_or_else(|| HostError::MissingElement(class.to_string()))?;
        *element = Some(widget.clone());
        page.paints += 1;

        debug!(
            "Painted .{}: visible={} total={} left={} at ({}, {}){}",
            class,
            widget.visible,
            widget.elapsed_text,
            widget.remaining_text,
            widget.position.left,
            widget.position.top,
            widget
                .warning
                .as_deref()
                .map(|w| format!(" [{}]", w))
                .unwrap_or_default()
        );
        Ok(())
    }

    fn measure(&self, class: &str) -> Option<Size> {
        let page = self.page();
        page.elements.contains_key(class).then_some(page.widget_size)
    }

    fn unmount(&mut self, class: &str) -> Result<(), HostError> {
        self.check("unmount")?;
        match self.page().elements.remove(class) {
            Some(_) => {
                info!("Removed .{}", class);
                Ok(())
            }
            None => Err(HostError::MissingElement(class.to_string())),
        }
    }
}
