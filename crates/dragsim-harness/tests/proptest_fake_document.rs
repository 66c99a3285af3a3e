//! Property checks for the fake document's hit testing.
//!
//! 1. **Engine equivalence**: a visible viewport position answered by the
//!    viewport-relative engine matches the document-relative engine queried
//!    at the same position plus the scroll offset.
//! 2. **Clipping**: the viewport-relative engine answers nothing outside the
//!    viewport.
//! 3. **Stacking**: the answer is always the last-added element containing
//!    the position, or `<html>`.

use dragsim_core::document::Document;
use dragsim_core::geometry::{Rect, ViewportSize};
use dragsim_core::hit_test::HitTestSpace;
use dragsim_harness::{FakeDocument, HTML};
use proptest::prelude::*;

fn rects() -> impl Strategy<Value = Vec<Rect>> {
    prop::collection::vec(
        (0u16..1500, 0u16..1500, 1u16..400, 1u16..400).prop_map(|(x, y, w, h)| {
            Rect::new(f64::from(x), f64::from(y), f64::from(w), f64::from(h))
        }),
        0..12,
    )
}

fn build(rects: &[Rect]) -> FakeDocument {
    let mut doc = FakeDocument::new(ViewportSize::new(640.0, 480.0));
    for (i, rect) in rects.iter().enumerate() {
        doc.add_element(format!("e{i}"), *rect);
    }
    doc
}

proptest! {
    #[test]
    fn engines_agree_once_scroll_is_accounted_for(
        rects in rects(),
        (left, top) in (0u16..800, 0u16..800),
        (x, y) in (0u16..640, 0u16..480),
    ) {
        let (left, top, x, y) = (f64::from(left), f64::from(top), f64::from(x), f64::from(y));
        let mut viewport = build(&rects);
        viewport.scroll_to(left, top);
        let mut document = build(&rects);
        document.scroll_to(left, top);
        document.set_native_space(HitTestSpace::Document);

        prop_assert_eq!(
            viewport.element_from_point(x, y),
            document.element_from_point(x + left, y + top)
        );
    }

    #[test]
    fn viewport_engine_clips_to_the_viewport(
        rects in rects(),
        x in 640u16..2000,
        y in 0u16..2000,
    ) {
        let doc = build(&rects);
        prop_assert_eq!(doc.element_from_point(f64::from(x), f64::from(y)), None);
    }

    #[test]
    fn topmost_containing_element_wins(
        rects in rects(),
        (x, y) in (0u16..640, 0u16..480),
    ) {
        let doc = build(&rects);
        let (x, y) = (f64::from(x), f64::from(y));
        let expected = rects
            .iter()
            .rposition(|r| r.contains(x, y))
            .map_or(HTML, |i| doc.element_named(&format!("e{i}")).unwrap_or(HTML));
        prop_assert_eq!(doc.element_from_point(x, y), Some(expected));
    }
}
