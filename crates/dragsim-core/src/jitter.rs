#![forbid(unsafe_code)]

//! Positional jitter ("shaky" drags).

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::geometry::PagePoint;
use crate::interpolation::Jitter;

/// Seedable source of per-step positional noise.
#[derive(Debug, Clone)]
pub struct Shaker {
    rng: SmallRng,
}

impl Shaker {
    /// Deterministic noise from `seed`.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Noise seeded from the operating system.
    #[must_use]
    pub fn from_os() -> Self {
        Self {
            rng: SmallRng::from_os_rng(),
        }
    }

    /// Offset each axis of `point` by an independent uniform integer in
    /// `[-amplitude, amplitude]`. Disabled jitter returns `point` unchanged.
    pub fn perturb(&mut self, point: PagePoint, jitter: Jitter) -> PagePoint {
        let Some(amplitude) = jitter.amplitude() else {
            return point;
        };
        let a = i64::from(amplitude);
        let dx = self.rng.random_range(-a..=a);
        let dy = self.rng.random_range(-a..=a);
        PagePoint::new(point.x + dx as f64, point.y + dy as f64)
    }
}
