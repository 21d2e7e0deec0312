//! Discrete grid coordinates and unit steps.
//!
//! The field is a square of `field_size × field_size` integer cells with the
//! origin in a corner; valid coordinates are `[0, field_size)` on both axes.
//! Agents move at most one cell per axis per step, so diagonal moves are
//! allowed.

use std::fmt;
use std::ops::Add;

/// A cell on the field.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// `true` if the cell lies inside a `field_size × field_size` grid.
    #[inline]
    pub fn in_bounds(self, field_size: i32) -> bool {
        (0..field_size).contains(&self.x) && (0..field_size).contains(&self.y)
    }

    /// Straight-line distance between cell centres.
    #[inline]
    pub fn euclidean(self, other: GridPos) -> f64 {
        let dx = f64::from(other.x - self.x);
        let dy = f64::from(other.y - self.y);
        dx.hypot(dy)
    }

    /// King-move distance: the number of unit (possibly diagonal) steps
    /// needed to reach `other` on an empty grid.
    #[inline]
    pub fn chebyshev(self, other: GridPos) -> i32 {
        (other.x - self.x).abs().max((other.y - self.y).abs())
    }

    /// The unit step from `self` toward `target`: each axis component is the
    /// sign of the remaining offset.  Zero when `self == target`.
    #[inline]
    pub fn step_toward(self, target: GridPos) -> Step {
        Step::new((target.x - self.x).signum(), (target.y - self.y).signum())
    }
}

impl Add<Step> for GridPos {
    type Output = GridPos;
    #[inline]
    fn add(self, step: Step) -> GridPos {
        GridPos::new(self.x + step.dx, self.y + step.dy)
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A unit displacement; each component is in `{-1, 0, 1}`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Step {
    pub dx: i32,
    pub dy: i32,
}

impl Step {
    pub const ZERO: Step = Step { dx: 0, dy: 0 };

    #[inline]
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self == Step::ZERO
    }

    /// The single-axis alternates tried when the direct step is unsafe, in
    /// fixed order: forward on x, forward on y, back on x, back on y.
    pub fn sidesteps(self) -> [Step; 4] {
        [
            Step::new(self.dx, 0),
            Step::new(0, self.dy),
            Step::new(-self.dx, 0),
            Step::new(0, -self.dy),
        ]
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{:+}, {:+}>", self.dx, self.dy)
    }
}
