#![forbid(unsafe_code)]

//! Test fixtures for dragsim.
//!
//! - [`FakeDocument`]: an in-memory page with stacked boxes, scrolling, both
//!   hit-test engine behaviors and a recorded dispatch log.
//! - [`ManualClock`] and [`drive`]: deterministic time for paced drags.
//! - [`TraceLog`]: JSONL traces with blake3 checksums for golden tests.
//!
//! ```rust,ignore
//! let mut doc = FakeDocument::default();
//! let card = doc.add_element("card", Rect::new(0.0, 0.0, 100.0, 100.0));
//! let clock = ManualClock::new();
//! let mut sim = DragSimulator::default().with_clock(clock.clone());
//!
//! sim.drag(&mut doc, card, DragOptions::by(100.0, 0.0).with_interpolation(
//!     Interpolation::step_count(3).with_step_delay(Duration::from_millis(10)),
//! ));
//! drive(&mut sim, &mut doc, &clock, 100);
//! assert_eq!(doc.move_positions().len(), 4);
//! ```

pub mod clock;
pub mod fake_document;
pub mod trace;

pub use clock::{DriveReport, ManualClock, drive};
pub use fake_document::{DOCUMENT, FakeDocument, HTML, Recorded};
pub use trace::TraceLog;
