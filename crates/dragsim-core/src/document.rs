#![forbid(unsafe_code)]

//! The host document interface.
//!
//! Everything the simulator needs from the DOM goes through [`Document`]:
//! geometry queries, scroll state, hit testing and event dispatch. Elements
//! are identified by [`ElementId`] handles; the host owns the nodes.

use std::fmt;

use crate::event::{Notification, SimulatedEvent};
use crate::geometry::{Rect, ScrollOffset, ViewportSize};

/// Opaque handle to a node owned by the host document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A document the simulator can query and dispatch into.
pub trait Document {
    /// The document node itself.
    fn root(&self) -> ElementId;

    /// Whether `element` is a document node rather than an element.
    fn is_document(&self, element: ElementId) -> bool {
        element == self.root()
    }

    /// Whether `element` is the root element (`<html>`), which hit testing
    /// returns when nothing else occupies a position.
    fn is_root_element(&self, element: ElementId) -> bool;

    /// The element's outer box in page coordinates, if it is rendered.
    fn bounding_box(&self, element: ElementId) -> Option<Rect>;

    /// Current scroll offset.
    fn scroll_offset(&self) -> ScrollOffset;

    /// Visible viewport size.
    fn viewport_size(&self) -> ViewportSize;

    /// Whether [`element_from_point`](Self::element_from_point) is available.
    fn supports_element_from_point(&self) -> bool {
        true
    }

    /// The topmost element at a position, in the engine's native hit-test
    /// coordinate space (viewport- or document-relative depending on the
    /// engine).
    fn element_from_point(&self, x: f64, y: f64) -> Option<ElementId>;

    /// Build and fire a synthetic pointer event on `target`.
    fn dispatch(&mut self, target: ElementId, event: &SimulatedEvent);

    /// Fire a completion notification on `target`.
    fn notify(&mut self, target: ElementId, notification: Notification);
}
