//! Axis-aligned intervals and rectangles.
//!
//! These are the building blocks for rectangular domain decomposition.
//! An [`Interval`] is always non-degenerate (`lower < upper`) and finite,
//! so a [`Rect`] built from two intervals always has positive area.

use std::fmt;

use num_traits::Float;
use thiserror::Error;

/// A coordinate axis of the plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => f.write_str("x"),
            Axis::Y => f.write_str("y"),
        }
    }
}

/// An error returned when interval bounds are invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum GeometryError {
    #[error("interval bound is not a finite number")]
    NonFinite,
    #[error("interval lower bound must be strictly below its upper bound")]
    NotIncreasing,
}

/// A finite, non-degenerate closed interval `[lower, upper]`.
///
/// Whether the endpoints belong to the interval is decided by the caller
/// (see [`Interval::contains_with`]); the type only stores the bounds.
///
/// # Example
///
/// ```
/// use twine_cpinn::support::geometry::Interval;
///
/// let i = Interval::new(0.0, 2.0).unwrap();
/// assert_eq!(i.length(), 2.0);
/// assert!(Interval::new(1.0, 1.0).is_err());
/// assert!(Interval::new(0.0, f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval<T> {
    lower: T,
    upper: T,
}

impl<T: Float> Interval<T> {
    /// Constructs a validated interval.
    ///
    /// # Errors
    ///
    /// - [`GeometryError::NonFinite`] if either bound is NaN or infinite.
    /// - [`GeometryError::NotIncreasing`] if `lower >= upper`.
    pub fn new(lower: T, upper: T) -> Result<Self, GeometryError> {
        if !lower.is_finite() || !upper.is_finite() {
            return Err(GeometryError::NonFinite);
        }
        if lower >= upper {
            return Err(GeometryError::NotIncreasing);
        }
        Ok(Self { lower, upper })
    }

    #[must_use]
    pub fn lower(&self) -> T {
        self.lower
    }

    #[must_use]
    pub fn upper(&self) -> T {
        self.upper
    }

    #[must_use]
    pub fn length(&self) -> T {
        self.upper - self.lower
    }

    /// Returns the bounds as a `(lower, upper)` pair.
    #[must_use]
    pub fn bounds(&self) -> (T, T) {
        (self.lower, self.upper)
    }

    /// Membership test with explicit endpoint handling.
    ///
    /// The interior is always included. Each endpoint is included only when
    /// its flag is set.
    #[must_use]
    pub fn contains_with(&self, value: T, lower_closed: bool, upper_closed: bool) -> bool {
        let above = if lower_closed {
            value >= self.lower
        } else {
            value > self.lower
        };
        let below = if upper_closed {
            value <= self.upper
        } else {
            value < self.upper
        };
        above && below
    }

    /// Closed membership test, widened by `tol` on both ends.
    #[must_use]
    pub fn contains_closed(&self, value: T, tol: T) -> bool {
        value >= self.lower - tol && value <= self.upper + tol
    }

    /// Returns true if the two intervals share a segment of positive length.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.lower < other.upper && other.lower < self.upper
    }

    /// Returns true if `other` lies entirely within `self` (endpoints included).
    #[must_use]
    pub fn encloses(&self, other: &Self) -> bool {
        other.lower >= self.lower && other.upper <= self.upper
    }

    /// Smallest interval containing both.
    #[must_use]
    pub fn union_hull(&self, other: &Self) -> Self {
        Self {
            lower: self.lower.min(other.lower),
            upper: self.upper.max(other.upper),
        }
    }
}

impl<T: Float> TryFrom<(T, T)> for Interval<T> {
    type Error = GeometryError;

    fn try_from((lower, upper): (T, T)) -> Result<Self, Self::Error> {
        Self::new(lower, upper)
    }
}

/// An axis-aligned rectangle with positive area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect<T> {
    pub x: Interval<T>,
    pub y: Interval<T>,
}

impl<T: Float> Rect<T> {
    #[must_use]
    pub fn new(x: Interval<T>, y: Interval<T>) -> Self {
        Self { x, y }
    }

    /// Constructs a rectangle from raw bounds.
    ///
    /// # Errors
    ///
    /// Returns a [`GeometryError`] if either pair of bounds is invalid.
    pub fn from_bounds(x_lb: T, x_rb: T, y_lb: T, y_rb: T) -> Result<Self, GeometryError> {
        Ok(Self {
            x: Interval::new(x_lb, x_rb)?,
            y: Interval::new(y_lb, y_rb)?,
        })
    }

    #[must_use]
    pub fn area(&self) -> T {
        self.x.length() * self.y.length()
    }

    /// Returns true if the interiors of the two rectangles intersect.
    ///
    /// Rectangles that only share an edge or a corner do not overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.x.overlaps(&other.x) && self.y.overlaps(&other.y)
    }

    #[must_use]
    pub fn encloses(&self, other: &Self) -> bool {
        self.x.encloses(&other.x) && self.y.encloses(&other.y)
    }

    /// Closed membership test, widened by `tol`.
    #[must_use]
    pub fn contains_closed(&self, x: T, y: T, tol: T) -> bool {
        self.x.contains_closed(x, tol) && self.y.contains_closed(y, tol)
    }

    /// Smallest rectangle containing every rectangle in `rects`.
    ///
    /// Returns `None` if `rects` is empty.
    pub fn hull<'a>(rects: impl IntoIterator<Item = &'a Self>) -> Option<Self>
    where
        T: 'a,
    {
        rects.into_iter().fold(None, |acc: Option<Self>, r| {
            Some(match acc {
                None => *r,
                Some(h) => Self {
                    x: h.x.union_hull(&r.x),
                    y: h.y.union_hull(&r.y),
                },
            })
        })
    }
}
