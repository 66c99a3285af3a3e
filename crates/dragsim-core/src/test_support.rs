//! Minimal in-crate document for unit tests.
//!
//! Integration tests use `dragsim-harness::FakeDocument`; this stub exists
//! because unit tests cannot link the harness (it depends on this crate).

use crate::document::{Document, ElementId};
use crate::event::{Notification, SimulatedEvent};
use crate::geometry::{Rect, ScrollOffset, ViewportSize};

pub(crate) const DOC: ElementId = ElementId(0);
pub(crate) const HTML: ElementId = ElementId(1);

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Seen {
    Event(ElementId, SimulatedEvent),
    Notify(ElementId, Notification),
}

/// Elements stacked in insertion order; hit testing is viewport-relative
/// unless `document_space` is set.
#[derive(Debug, Default)]
pub(crate) struct StubDocument {
    pub boxes: Vec<(ElementId, Rect)>,
    pub scroll: ScrollOffset,
    pub viewport: ViewportSize,
    pub document_space: bool,
    pub no_hit_testing: bool,
    pub seen: Vec<Seen>,
}

impl StubDocument {
    pub fn new() -> Self {
        Self {
            viewport: ViewportSize::new(800.0, 600.0),
            ..Self::default()
        }
    }

    pub fn with(mut self, id: u64, rect: Rect) -> Self {
        self.boxes.push((ElementId(id), rect));
        self
    }

    pub fn events(&self) -> Vec<(ElementId, &SimulatedEvent)> {
        self.seen
            .iter()
            .filter_map(|s| match s {
                Seen::Event(target, event) => Some((*target, event)),
                Seen::Notify(..) => None,
            })
            .collect()
    }
}

impl Document for StubDocument {
    fn root(&self) -> ElementId {
        DOC
    }

    fn is_root_element(&self, element: ElementId) -> bool {
        element == HTML
    }

    fn bounding_box(&self, element: ElementId) -> Option<Rect> {
        self.boxes
            .iter()
            .find(|(id, _)| *id == element)
            .map(|(_, rect)| *rect)
    }

    fn scroll_offset(&self) -> ScrollOffset {
        self.scroll
    }

    fn viewport_size(&self) -> ViewportSize {
        self.viewport
    }

    fn supports_element_from_point(&self) -> bool {
        !self.no_hit_testing
    }

    fn element_from_point(&self, x: f64, y: f64) -> Option<ElementId> {
        let (px, py) = if self.document_space {
            (x, y)
        } else {
            if x < 0.0 || y < 0.0 || x >= self.viewport.width || y >= self.viewport.height {
                return None;
            }
            (x + self.scroll.left, y + self.scroll.top)
        };
        self.boxes
            .iter()
            .rev()
            .find(|(_, rect)| rect.contains(px, py))
            .map(|(id, _)| *id)
            .or(Some(HTML))
    }

    fn dispatch(&mut self, target: ElementId, event: &SimulatedEvent) {
        self.seen.push(Seen::Event(target, event.clone()));
    }

    fn notify(&mut self, target: ElementId, notification: Notification) {
        self.seen.push(Seen::Notify(target, notification));
    }
}
