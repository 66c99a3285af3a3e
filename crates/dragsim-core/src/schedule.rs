#![forbid(unsafe_code)]

//! Step scheduling for paced drags.
//!
//! A paced drag is a chain of timer wake-ups. Instead of owning a timer, the
//! simulator exposes [`poll`](crate::simulator::DragSimulator::poll): the
//! driver passes the current time, the simulator advances whatever is due
//! and answers how long to wait before the next poll. Production code uses
//! [`run_until_idle`] with the [`SystemClock`]; tests drive a manual clock.
//!
//! The simulator arms each paced drag's timer from its own clock when the
//! drag is requested, so drivers must poll with times from that same clock.
//!
//! # Invariants
//!
//! 1. A [`StepTimer`] is due only once `delay` has elapsed since it was last
//!    armed. Early wake-ups are answered with the remaining time, never with
//!    a step.
//! 2. A due timer yields one step; the driver must poll again for the next.

use web_time::{Duration, Instant};

/// Source of the current time.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline]
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Result of polling a [`StepTimer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerPoll {
    /// The delay has elapsed.
    Due,
    /// Woken early; poll again after the remaining time.
    Wait(Duration),
}

/// Self-correcting repeating timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepTimer {
    delay: Duration,
    last: Instant,
}

impl StepTimer {
    /// Arm a timer at `now`.
    #[must_use]
    pub const fn start(delay: Duration, now: Instant) -> Self {
        Self { delay, last: now }
    }

    /// Check the timer against `now`.
    #[must_use]
    pub fn poll(&self, now: Instant) -> TimerPoll {
        let elapsed = now.saturating_duration_since(self.last);
        if elapsed >= self.delay {
            TimerPoll::Due
        } else {
            TimerPoll::Wait(self.delay - elapsed)
        }
    }

    /// Re-arm after a step fired at `now`.
    pub fn rearm(&mut self, now: Instant) {
        self.last = now;
    }

    /// Configured delay.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// When the timer next becomes due.
    #[must_use]
    pub fn deadline(&self) -> Instant {
        self.last + self.delay
    }
}

/// Outcome of [`DragSimulator::poll`](crate::simulator::DragSimulator::poll).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Poll {
    /// No paced drag is in flight.
    Idle,
    /// Poll again after this long.
    Pending(Duration),
}

/// Drive every in-flight paced drag to completion, sleeping between steps.
///
/// Returns the number of polls performed.
#[cfg(not(target_arch = "wasm32"))]
pub fn run_until_idle(
    sim: &mut crate::simulator::DragSimulator,
    doc: &mut dyn crate::document::Document,
    clock: &dyn Clock,
) -> usize {
    let mut polls = 0;
    loop {
        polls += 1;
        match sim.poll(doc, clock.now()) {
            Poll::Idle => return polls,
            Poll::Pending(wait) => {
                if !wait.is_zero() {
                    std::thread::sleep(wait);
                }
            }
        }
    }
}
