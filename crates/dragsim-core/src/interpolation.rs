#![forbid(unsafe_code)]

//! Interpolation planning: decomposing a drag into intermediate moves.
//!
//! An [`InterpolationPlan`] is a pure function of the start position, the
//! displacement and the [`Interpolation`] options. It fixes the number of
//! intermediate steps, the vector between them and, for paced drags, the
//! delay between steps.
//!
//! # Invariants
//!
//! 1. Intermediate waypoints are `start + step_vector * i` for
//!    `i in 1..=step_count`.
//! 2. [`destination`](InterpolationPlan::destination) is exactly
//!    `start + delta`, independent of any rounding in the waypoints.
//! 3. A plan is immediate (no pacing) when neither a step delay nor a total
//!    duration is set, or both are zero.
//!
//! # Failure Modes
//!
//! - A step width larger than the distance yields zero intermediate steps.
//! - A zero-length displacement yields a zero step vector.

use web_time::Duration;

use crate::geometry::{Delta, PagePoint};

/// How the drag is split into steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepSpec {
    /// Fixed distance (in pixels) between consecutive moves.
    Width(u32),
    /// Fixed number of intermediate moves.
    Count(u32),
}

/// Optional pacing of the steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pacing {
    /// Delay between consecutive moves.
    pub step_delay: Option<Duration>,
    /// Total duration of the drag, spread evenly across the moves. Ignored
    /// when `step_delay` is set.
    pub duration: Option<Duration>,
}

impl Pacing {
    /// No pacing: every move fires synchronously.
    pub const IMMEDIATE: Self = Self {
        step_delay: None,
        duration: None,
    };

    /// The delay between moves for a plan with `step_count` intermediate
    /// steps, or `None` when the drag is not paced.
    ///
    /// A duration is divided over `step_count + 1` moves (the intermediate
    /// ones plus the final one) and rounded up to whole milliseconds.
    #[must_use]
    pub fn step_delay_for(&self, step_count: u32) -> Option<Duration> {
        let explicit = self.step_delay.filter(|d| !d.is_zero());
        let total = self.duration.filter(|d| !d.is_zero());
        match (explicit, total) {
            (Some(delay), _) => Some(delay),
            (None, Some(total)) => {
                let total_ms = u64::try_from(total.as_millis()).unwrap_or(u64::MAX);
                let moves = u64::from(step_count) + 1;
                Some(Duration::from_millis(total_ms.div_ceil(moves)))
            }
            (None, None) => None,
        }
    }
}

/// Random positional perturbation of intermediate moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Jitter {
    #[default]
    Off,
    /// Offset each axis by a uniform integer in `[-amplitude, amplitude]`.
    Amplitude(u32),
}

impl Jitter {
    /// Effective amplitude, `None` when jitter is disabled.
    #[must_use]
    pub const fn amplitude(self) -> Option<u32> {
        match self {
            Self::Off | Self::Amplitude(0) => None,
            Self::Amplitude(a) => Some(a),
        }
    }
}

impl From<bool> for Jitter {
    /// `true` enables jitter with amplitude 1.
    fn from(enabled: bool) -> Self {
        if enabled { Self::Amplitude(1) } else { Self::Off }
    }
}

/// Interpolation options for a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interpolation {
    pub steps: StepSpec,
    pub pacing: Pacing,
    pub jitter: Jitter,
}

impl Interpolation {
    /// Steps spaced `width` pixels apart.
    #[must_use]
    pub const fn step_width(width: u32) -> Self {
        Self {
            steps: StepSpec::Width(width),
            pacing: Pacing::IMMEDIATE,
            jitter: Jitter::Off,
        }
    }

    /// `count` evenly spaced intermediate steps.
    #[must_use]
    pub const fn step_count(count: u32) -> Self {
        Self {
            steps: StepSpec::Count(count),
            pacing: Pacing::IMMEDIATE,
            jitter: Jitter::Off,
        }
    }

    /// Wait `delay` between moves (builder pattern).
    #[must_use]
    pub const fn with_step_delay(mut self, delay: Duration) -> Self {
        self.pacing.step_delay = Some(delay);
        self
    }

    /// Spread the moves over `duration` (builder pattern).
    #[must_use]
    pub const fn with_duration(mut self, duration: Duration) -> Self {
        self.pacing.duration = Some(duration);
        self
    }

    /// Perturb intermediate moves (builder pattern).
    #[must_use]
    pub const fn with_jitter(mut self, jitter: Jitter) -> Self {
        self.jitter = jitter;
        self
    }

    /// Whether these options ask for any interpolation at all.
    ///
    /// A zero width or count means "no interpolation": the drag becomes a
    /// single direct move.
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        !matches!(self.steps, StepSpec::Width(0) | StepSpec::Count(0))
    }
}

/// The derived schedule of one interpolated drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterpolationPlan {
    start: PagePoint,
    delta: Delta,
    distance: f64,
    step_count: u32,
    step_vector: Delta,
    step_width: f64,
    step_delay: Option<Duration>,
}

impl InterpolationPlan {
    /// Compute the plan for moving from `start` by `delta`.
    #[must_use]
    pub fn new(start: PagePoint, delta: Delta, interpolation: &Interpolation) -> Self {
        let distance = delta.length();
        let (step_count, step_vector, step_width) = match interpolation.steps {
            StepSpec::Width(width) if width > 0 && distance > 0.0 => {
                let width = f64::from(width);
                let count = ((distance / width).floor() - 1.0).max(0.0);
                (count as u32, delta.scale(width / distance), width)
            }
            StepSpec::Width(_) => (0, delta, distance),
            StepSpec::Count(count) => {
                let moves = f64::from(count) + 1.0;
                (count, delta.scale(1.0 / moves), distance / moves)
            }
        };
        let step_delay = interpolation.pacing.step_delay_for(step_count);

        Self {
            start,
            delta,
            distance,
            step_count,
            step_vector,
            step_width,
            step_delay,
        }
    }

    /// Where the drag starts.
    #[must_use]
    pub const fn start(&self) -> PagePoint {
        self.start
    }

    /// Total displacement.
    #[must_use]
    pub const fn delta(&self) -> Delta {
        self.delta
    }

    /// Euclidean length of the displacement.
    #[must_use]
    pub const fn distance(&self) -> f64 {
        self.distance
    }

    /// Number of intermediate moves (the final move is not counted).
    #[must_use]
    pub const fn step_count(&self) -> u32 {
        self.step_count
    }

    /// Displacement between consecutive intermediate moves.
    #[must_use]
    pub const fn step_vector(&self) -> Delta {
        self.step_vector
    }

    /// Length of [`step_vector`](Self::step_vector).
    #[must_use]
    pub const fn step_width(&self) -> f64 {
        self.step_width
    }

    /// Delay between moves, `None` for an immediate drag.
    #[must_use]
    pub const fn step_delay(&self) -> Option<Duration> {
        self.step_delay
    }

    /// Whether the moves are paced by a timer.
    #[must_use]
    pub const fn is_paced(&self) -> bool {
        self.step_delay.is_some()
    }

    /// Position of intermediate move `step` (1-based).
    #[must_use]
    pub fn waypoint(&self, step: u32) -> PagePoint {
        self.start + self.step_vector.scale(f64::from(step))
    }

    /// Position of the final move.
    #[must_use]
    pub fn destination(&self) -> PagePoint {
        self.start + self.delta
    }
}
