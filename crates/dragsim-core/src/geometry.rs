#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! Two coordinate spaces exist side by side:
//!
//! - **Page** coordinates are measured from the top-left of the full
//!   scrollable document and do not change when the user scrolls.
//! - **Client** coordinates are measured from the top-left of the visible
//!   viewport.
//!
//! They are distinct types so a page position can never be passed where a
//! viewport position is expected.

use std::ops::{Add, AddAssign, Sub};

/// Round half toward positive infinity.
///
/// Event coordinates are integers; browsers (and every script that drives
/// them) round with this rule, which differs from [`f64::round`] for negative
/// halves.
#[inline]
#[must_use]
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// A position relative to the document origin.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PagePoint {
    pub x: f64,
    pub y: f64,
}

impl PagePoint {
    /// The document origin.
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    /// Create a new page point.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Both axes rounded with [`round_half_up`].
    #[inline]
    #[must_use]
    pub fn round(self) -> Self {
        Self::new(round_half_up(self.x), round_half_up(self.y))
    }

    /// Integer event coordinates for this point.
    #[inline]
    #[must_use]
    pub fn to_event_coords(self) -> (i32, i32) {
        let rounded = self.round();
        (rounded.x as i32, rounded.y as i32)
    }
}

impl Add<Delta> for PagePoint {
    type Output = PagePoint;

    #[inline]
    fn add(self, rhs: Delta) -> PagePoint {
        PagePoint::new(self.x + rhs.dx, self.y + rhs.dy)
    }
}

impl Sub for PagePoint {
    type Output = Delta;

    #[inline]
    fn sub(self, rhs: PagePoint) -> Delta {
        Delta::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A position relative to the visible viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClientPoint {
    pub x: f64,
    pub y: f64,
}

impl ClientPoint {
    /// Create a new client point.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A displacement vector.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Delta {
    pub dx: f64,
    pub dy: f64,
}

impl Delta {
    /// No movement.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Create a new displacement.
    #[inline]
    #[must_use]
    pub const fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    /// A displacement with non-finite components replaced by zero.
    #[must_use]
    pub fn sanitized(dx: f64, dy: f64) -> Self {
        let finite = |v: f64| if v.is_finite() { v } else { 0.0 };
        Self::new(finite(dx), finite(dy))
    }

    /// True when neither axis moves.
    #[inline]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.dx == 0.0 && self.dy == 0.0
    }

    /// Euclidean length.
    #[inline]
    #[must_use]
    pub fn length(&self) -> f64 {
        self.dx.hypot(self.dy)
    }

    /// Scale both axes by `factor`.
    #[inline]
    #[must_use]
    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.dx * factor, self.dy * factor)
    }

    /// Both axes rounded with [`round_half_up`].
    #[inline]
    #[must_use]
    pub fn round(self) -> Self {
        Self::new(round_half_up(self.dx), round_half_up(self.dy))
    }
}

impl Add for Delta {
    type Output = Delta;

    #[inline]
    fn add(self, rhs: Delta) -> Delta {
        Delta::new(self.dx + rhs.dx, self.dy + rhs.dy)
    }
}

impl AddAssign for Delta {
    #[inline]
    fn add_assign(&mut self, rhs: Delta) {
        self.dx += rhs.dx;
        self.dy += rhs.dy;
    }
}

/// An element's outer box in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: f64,
    /// Top edge (inclusive).
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (exclusive).
    #[inline]
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    #[inline]
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Center of the box.
    #[inline]
    #[must_use]
    pub fn center(&self) -> PagePoint {
        PagePoint::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Check if a page position lies inside the box.
    #[inline]
    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

/// Current scroll position of a document.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollOffset {
    pub left: f64,
    pub top: f64,
}

impl ScrollOffset {
    /// Create a new scroll offset.
    #[inline]
    #[must_use]
    pub const fn new(left: f64, top: f64) -> Self {
        Self { left, top }
    }
}

/// Visible viewport size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportSize {
    pub width: f64,
    pub height: f64,
}

impl ViewportSize {
    /// Create a new viewport size.
    #[inline]
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}
