//! Pairwise adjacency rules.
//!
//! Adjacency is decided only from equality of the axis intervals, never from
//! actual geometric contact. Two subdomains with the same x-interval are
//! adjacent even when a gap separates them vertically.

use crate::support::geometry::Rect;

/// How a shared axis interval translates into adjacency.
///
/// The two rules differ only for identical rectangles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AdjacencyRule {
    /// `same_x || (same_y && !identical)`.
    ///
    /// A shared x-interval is sufficient on its own, so identical rectangles
    /// are adjacent.
    #[default]
    AxisAligned,

    /// `(same_x || same_y) && !identical`.
    ///
    /// Identical rectangles are never adjacent.
    Grouped,
}

impl AdjacencyRule {
    /// Applies the rule to two distinct subdomains.
    #[must_use]
    pub fn adjacent(self, a: &Rect<f64>, b: &Rect<f64>) -> bool {
        let same_x = a.x == b.x;
        let same_y = a.y == b.y;
        let identical = same_x && same_y;

        match self {
            Self::AxisAligned => same_x || (same_y && !identical),
            Self::Grouped => (same_x || same_y) && !identical,
        }
    }
}
