#![forbid(unsafe_code)]

//! Manual time for paced drags.

use std::cell::Cell;
use std::rc::Rc;

use dragsim_core::document::Document;
use dragsim_core::schedule::{Clock, Poll};
use dragsim_core::simulator::DragSimulator;
use web_time::{Duration, Instant};

/// Clock that only moves when told to.
///
/// Clones share one timeline, so a clone can be handed to
/// [`DragSimulator::with_clock`] while the test keeps advancing the original.
#[derive(Debug, Clone)]
pub struct ManualClock {
    base: Instant,
    offset: Rc<Cell<Duration>>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            base: Instant::now(),
            offset: Rc::new(Cell::new(Duration::ZERO)),
        }
    }

    /// Move time forward.
    pub fn advance(&self, by: Duration) {
        self.offset.set(self.offset.get() + by);
    }

    /// Move time forward by `ms` milliseconds.
    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }

    /// Time elapsed since creation.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.offset.get()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.base + self.offset.get()
    }
}

/// Outcome of [`drive`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriveReport {
    /// Polls performed.
    pub polls: usize,
    /// Manual time that passed.
    pub elapsed: Duration,
    /// Whether every paced drag finished within the poll budget.
    pub idle: bool,
}

/// Poll `sim` until idle, jumping the clock to each requested wake-up.
///
/// Stops after `max_polls` polls even if drags are still in flight.
pub fn drive(
    sim: &mut DragSimulator,
    doc: &mut dyn Document,
    clock: &ManualClock,
    max_polls: usize,
) -> DriveReport {
    let started = clock.elapsed();
    let mut polls = 0;
    let mut idle = false;

    while polls < max_polls {
        polls += 1;
        match sim.poll(doc, clock.now()) {
            Poll::Idle => {
                idle = true;
                break;
            }
            Poll::Pending(wait) => clock.advance(wait),
        }
    }

    tracing::debug!(polls, idle, "manual clock drive finished");
    DriveReport {
        polls,
        elapsed: clock.elapsed() - started,
        idle,
    }
}
