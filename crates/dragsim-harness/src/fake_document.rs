#![forbid(unsafe_code)]

//! In-memory [`Document`] for tests.
//!
//! Elements are axis-aligned boxes in page coordinates, stacked in insertion
//! order (later elements render on top). An `<html>` root covers the whole
//! page and is what hit testing returns where no element is rendered.
//!
//! The native hit-test space is configurable so both engine behaviors the
//! simulator calibrates against can be reproduced: a viewport-relative
//! engine answers nothing outside the visible area, a document-relative one
//! takes page coordinates even while scrolled.

use dragsim_core::document::{Document, ElementId};
use dragsim_core::event::{Notification, PointerEventKind, SimulatedEvent};
use dragsim_core::geometry::{Rect, ScrollOffset, ViewportSize};
use dragsim_core::hit_test::HitTestSpace;

/// The document node.
pub const DOCUMENT: ElementId = ElementId(0);
/// The `<html>` root element.
pub const HTML: ElementId = ElementId(1);

const FIRST_ELEMENT: u64 = 2;

/// One entry of the dispatch log.
#[derive(Debug, Clone, PartialEq)]
pub enum Recorded {
    Event {
        target: ElementId,
        event: SimulatedEvent,
    },
    Notification {
        target: ElementId,
        notification: Notification,
    },
}

impl Recorded {
    /// Element the entry was fired on.
    #[must_use]
    pub const fn target(&self) -> ElementId {
        match self {
            Self::Event { target, .. } | Self::Notification { target, .. } => *target,
        }
    }

    /// Event type name (`mousedown`, `simulate-drag`, ...).
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Event { event, .. } => event.kind.name(),
            Self::Notification { notification, .. } => notification.name(),
        }
    }
}

#[derive(Debug, Clone)]
struct Element {
    id: ElementId,
    name: String,
    rect: Rect,
}

/// Scriptable document with a recorded dispatch log.
#[derive(Debug, Clone)]
pub struct FakeDocument {
    elements: Vec<Element>,
    scroll: ScrollOffset,
    viewport: ViewportSize,
    native_space: HitTestSpace,
    hit_testing: bool,
    log: Vec<Recorded>,
    next_id: u64,
}

impl Default for FakeDocument {
    fn default() -> Self {
        Self::new(ViewportSize::new(1024.0, 768.0))
    }
}

impl FakeDocument {
    /// Empty page with a viewport-relative engine.
    #[must_use]
    pub fn new(viewport: ViewportSize) -> Self {
        Self {
            elements: Vec::new(),
            scroll: ScrollOffset::default(),
            viewport,
            native_space: HitTestSpace::Viewport,
            hit_testing: true,
            log: Vec::new(),
            next_id: FIRST_ELEMENT,
        }
    }

    /// Add an element on top of every existing one.
    pub fn add_element(&mut self, name: impl Into<String>, rect: Rect) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        self.elements.push(Element {
            id,
            name: name.into(),
            rect,
        });
        id
    }

    /// Move or resize an element.
    pub fn set_rect(&mut self, id: ElementId, rect: Rect) {
        if let Some(element) = self.elements.iter_mut().find(|e| e.id == id) {
            element.rect = rect;
        }
    }

    /// Look up an element by name.
    #[must_use]
    pub fn element_named(&self, name: &str) -> Option<ElementId> {
        self.elements.iter().find(|e| e.name == name).map(|e| e.id)
    }

    /// Name of `id`: `document`, `html`, the element's name, or its id.
    #[must_use]
    pub fn name_of(&self, id: ElementId) -> String {
        match id {
            DOCUMENT => "document".to_owned(),
            HTML => "html".to_owned(),
            _ => self
                .elements
                .iter()
                .find(|e| e.id == id)
                .map_or_else(|| id.to_string(), |e| e.name.clone()),
        }
    }

    /// Scroll the page.
    pub fn scroll_to(&mut self, left: f64, top: f64) {
        self.scroll = ScrollOffset::new(left, top);
    }

    /// Coordinate space `element_from_point` expects.
    pub fn set_native_space(&mut self, space: HitTestSpace) {
        self.native_space = space;
    }

    /// Behave like an engine without `elementFromPoint`.
    pub fn disable_hit_testing(&mut self) {
        self.hit_testing = false;
    }

    /// Everything dispatched so far.
    #[must_use]
    pub fn log(&self) -> &[Recorded] {
        &self.log
    }

    /// Drain the dispatch log.
    pub fn take_log(&mut self) -> Vec<Recorded> {
        std::mem::take(&mut self.log)
    }

    /// Dispatched pointer events, in order.
    pub fn events(&self) -> impl Iterator<Item = (ElementId, &SimulatedEvent)> {
        self.log.iter().filter_map(|r| match r {
            Recorded::Event { target, event } => Some((*target, event)),
            Recorded::Notification { .. } => None,
        })
    }

    /// Dispatched pointer events of one kind.
    pub fn events_of(
        &self,
        kind: PointerEventKind,
    ) -> impl Iterator<Item = (ElementId, &SimulatedEvent)> {
        self.events().filter(move |(_, e)| e.kind == kind)
    }

    /// Page positions of every `mousemove`.
    #[must_use]
    pub fn move_positions(&self) -> Vec<(i32, i32)> {
        self.events_of(PointerEventKind::MouseMove)
            .map(|(_, e)| e.page())
            .collect()
    }

    /// Completion notifications, in order.
    #[must_use]
    pub fn notifications(&self) -> Vec<(ElementId, Notification)> {
        self.log
            .iter()
            .filter_map(|r| match r {
                Recorded::Notification {
                    target,
                    notification,
                } => Some((*target, *notification)),
                Recorded::Event { .. } => None,
            })
            .collect()
    }

    /// Event and notification names, in order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.log.iter().map(Recorded::name).collect()
    }

    fn topmost_at(&self, x: f64, y: f64) -> ElementId {
        self.elements
            .iter()
            .rev()
            .find(|e| e.rect.contains(x, y))
            .map_or(HTML, |e| e.id)
    }
}

impl Document for FakeDocument {
    fn root(&self) -> ElementId {
        DOCUMENT
    }

    fn is_root_element(&self, element: ElementId) -> bool {
        element == HTML
    }

    fn bounding_box(&self, element: ElementId) -> Option<Rect> {
        self.elements
            .iter()
            .find(|e| e.id == element)
            .map(|e| e.rect)
    }

    fn scroll_offset(&self) -> ScrollOffset {
        self.scroll
    }

    fn viewport_size(&self) -> ViewportSize {
        self.viewport
    }

    fn supports_element_from_point(&self) -> bool {
        self.hit_testing
    }

    fn element_from_point(&self, x: f64, y: f64) -> Option<ElementId> {
        if !self.hit_testing {
            return None;
        }
        match self.native_space {
            HitTestSpace::Viewport => {
                let visible = (0.0..self.viewport.width).contains(&x)
                    && (0.0..self.viewport.height).contains(&y);
                visible.then(|| self.topmost_at(x + self.scroll.left, y + self.scroll.top))
            }
            HitTestSpace::Document => Some(self.topmost_at(x, y)),
        }
    }

    fn dispatch(&mut self, target: ElementId, event: &SimulatedEvent) {
        tracing::trace!(
            target_element = %target,
            kind = event.kind.name(),
            page_x = event.page_x,
            page_y = event.page_y,
            "fake document received event"
        );
        self.log.push(Recorded::Event {
            target,
            event: event.clone(),
        });
    }

    fn notify(&mut self, target: ElementId, notification: Notification) {
        self.log.push(Recorded::Notification {
            target,
            notification,
        });
    }
}
