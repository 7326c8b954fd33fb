//! Spatial indicators that assign each point to one subdomain.

use crate::support::geometry::{Interval, Rect};

/// Which side of a shared edge owns the points lying exactly on it.
///
/// Edges on the outer boundary of the decomposition are always closed, so
/// that points on the global boundary are owned as well.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TieBreak {
    /// Subdomains are `[lb, rb)` on each axis.
    ///
    /// A point on an interior interface belongs to the subdomain above it
    /// (or to its right).
    #[default]
    LowerClosed,

    /// Subdomains are `(lb, rb]` on each axis.
    ///
    /// A point on an interior interface belongs to the subdomain below it
    /// (or to its left).
    UpperClosed,
}

impl TieBreak {
    /// Returns true if `rect` owns `(x, y)` within a decomposition bounded by `hull`.
    #[must_use]
    pub fn owns(self, rect: &Rect<f64>, hull: &Rect<f64>, x: f64, y: f64) -> bool {
        self.owns_along(&rect.x, &hull.x, x) && self.owns_along(&rect.y, &hull.y, y)
    }

    fn owns_along(self, own: &Interval<f64>, outer: &Interval<f64>, value: f64) -> bool {
        match self {
            Self::LowerClosed => own.contains_with(value, true, own.upper() == outer.upper()),
            Self::UpperClosed => own.contains_with(value, own.lower() == outer.lower(), true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quadrants() -> [Rect<f64>; 4] {
        [
            Rect::from_bounds(0.0, 1.0, 0.0, 1.0).unwrap(),
            Rect::from_bounds(1.0, 2.0, 0.0, 1.0).unwrap(),
            Rect::from_bounds(0.0, 1.0, 1.0, 2.0).unwrap(),
            Rect::from_bounds(1.0, 2.0, 1.0, 2.0).unwrap(),
        ]
    }

    #[test]
    fn every_tiling_point_has_exactly_one_owner() {
        let rects = quadrants();
        let hull = Rect::hull(&rects).unwrap();
        let ticks: Vec<f64> = (0..=8u8).map(|k| f64::from(k) * 0.25).collect();

        for tie_break in [TieBreak::LowerClosed, TieBreak::UpperClosed] {
            for &x in &ticks {
                for &y in &ticks {
                    let owners = rects
                        .iter()
                        .filter(|r| tie_break.owns(r, &hull, x, y))
                        .count();
                    assert_eq!(owners, 1, "({x}, {y}) under {tie_break:?}");
                }
            }
        }
    }

    #[test]
    fn interface_points_have_one_owner() {
        let rects = quadrants();
        let hull = Rect::hull(&rects).unwrap();

        // Center point touches all four subdomains.
        assert!(TieBreak::LowerClosed.owns(&rects[3], &hull, 1.0, 1.0));
        assert!(TieBreak::UpperClosed.owns(&rects[0], &hull, 1.0, 1.0));

        // Interior interface between the two bottom subdomains.
        assert!(TieBreak::LowerClosed.owns(&rects[1], &hull, 1.0, 0.5));
        assert!(!TieBreak::LowerClosed.owns(&rects[0], &hull, 1.0, 0.5));
        assert!(TieBreak::UpperClosed.owns(&rects[0], &hull, 1.0, 0.5));
    }

    #[test]
    fn outer_boundary_is_closed() {
        let rects = quadrants();
        let hull = Rect::hull(&rects).unwrap();

        assert!(TieBreak::LowerClosed.owns(&rects[3], &hull, 2.0, 2.0));
        assert!(TieBreak::UpperClosed.owns(&rects[0], &hull, 0.0, 0.0));
        assert!(!TieBreak::LowerClosed.owns(&rects[1], &hull, 2.5, 0.5));
    }
}
