#![forbid(unsafe_code)]

//! Coordinate resolution: element centers and page-to-viewport conversion.

use crate::document::{Document, ElementId};
use crate::geometry::{ClientPoint, PagePoint, ScrollOffset};

/// Page-relative center of an element's outer box.
///
/// Document nodes have no box and resolve to the document origin, as do
/// elements the host does not render.
#[must_use]
pub fn find_center(doc: &dyn Document, element: ElementId) -> PagePoint {
    if doc.is_document(element) {
        return PagePoint::ORIGIN;
    }
    doc.bounding_box(element)
        .map_or(PagePoint::ORIGIN, |rect| rect.center())
}

/// Page coordinates that can be converted to viewport coordinates.
///
/// Implemented for a bare `(x, y)` pair, which converts to a pair, and for
/// [`PagePoint`], which converts to a [`ClientPoint`].
pub trait PageCoords {
    /// The viewport-relative counterpart.
    type Client;

    /// Subtract `scroll` from both axes.
    fn to_client(self, scroll: ScrollOffset) -> Self::Client;
}

impl PageCoords for (f64, f64) {
    type Client = (f64, f64);

    fn to_client(self, scroll: ScrollOffset) -> (f64, f64) {
        (self.0 - scroll.left, self.1 - scroll.top)
    }
}

impl PageCoords for PagePoint {
    type Client = ClientPoint;

    fn to_client(self, scroll: ScrollOffset) -> ClientPoint {
        ClientPoint::new(self.x - scroll.left, self.y - scroll.top)
    }
}

/// Convert page coordinates to viewport coordinates using `doc`'s current
/// scroll offset.
#[must_use]
pub fn page_to_client<P: PageCoords>(point: P, doc: &dyn Document) -> P::Client {
    point.to_client(doc.scroll_offset())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::test_support::{DOC, StubDocument};

    #[test]
    fn center_of_element_box() {
        let doc = StubDocument::new().with(5, Rect::new(100.0, 40.0, 50.0, 21.0));
        assert_eq!(find_center(&doc, ElementId(5)), PagePoint::new(125.0, 50.5));
    }

    #[test]
    fn document_center_is_origin() {
        let doc = StubDocument::new().with(5, Rect::new(100.0, 40.0, 50.0, 20.0));
        assert_eq!(find_center(&doc, DOC), PagePoint::ORIGIN);
    }

    #[test]
    fn unrendered_element_center_is_origin() {
        let doc = StubDocument::new();
        assert_eq!(find_center(&doc, ElementId(99)), PagePoint::ORIGIN);
    }

    #[test]
    fn pair_converts_to_pair() {
        let mut doc = StubDocument::new();
        doc.scroll = ScrollOffset::new(10.0, 200.0);
        assert_eq!(page_to_client((50.0, 250.0), &doc), (40.0, 50.0));
    }

    #[test]
    fn page_point_converts_to_client_point() {
        let mut doc = StubDocument::new();
        doc.scroll = ScrollOffset::new(0.0, 75.0);
        assert_eq!(
            page_to_client(PagePoint::new(20.0, 100.0), &doc),
            ClientPoint::new(20.0, 25.0)
        );
    }

    #[test]
    fn unscrolled_conversion_is_identity() {
        let doc = StubDocument::new();
        assert_eq!(
            page_to_client(PagePoint::new(3.0, 4.0), &doc),
            ClientPoint::new(3.0, 4.0)
        );
    }
}
