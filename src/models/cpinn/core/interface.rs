//! Interface segments between adjacent subdomains.

mod error;

pub use error::InterfaceError;

use super::{DomainPartitioner, SubdomainRecord};

/// Direction of an interface segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Runs along x, between two subdomains that share an x-interval.
    Horizontal,
    /// Runs along y, between two subdomains that share a y-interval.
    Vertical,
}

/// The shared edge between two adjacent subdomains.
///
/// Along the segment's direction the bounds are the shared interval. Across
/// it they are the two facing bounds, the lower (or left) subdomain's first.
/// For subdomains that actually touch the facing bounds are equal and the
/// segment is a line; for subdomains that are merely aligned they are not.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundarySegment {
    /// Ids of the two subdomains, smaller first.
    pub between: (usize, usize),
    pub orientation: Orientation,
    pub x_lb: f64,
    pub x_rb: f64,
    pub y_lb: f64,
    pub y_rb: f64,
}

impl BoundarySegment {
    /// Returns true if the facing bounds agree within `tol`.
    #[must_use]
    pub fn is_touching(&self, tol: f64) -> bool {
        let (near, far) = self.facing();
        (near - far).abs() <= tol
    }

    /// The two facing bounds across the segment.
    #[must_use]
    pub fn facing(&self) -> (f64, f64) {
        match self.orientation {
            Orientation::Horizontal => (self.y_lb, self.y_rb),
            Orientation::Vertical => (self.x_lb, self.x_rb),
        }
    }

    /// The shared interval along the segment.
    #[must_use]
    pub fn span(&self) -> (f64, f64) {
        match self.orientation {
            Orientation::Horizontal => (self.x_lb, self.x_rb),
            Orientation::Vertical => (self.y_lb, self.y_rb),
        }
    }

    /// Returns true if `(x, y)` lies on a touching segment, within `tol`.
    #[must_use]
    pub fn contains(&self, x: f64, y: f64, tol: f64) -> bool {
        let (along, across) = match self.orientation {
            Orientation::Horizontal => (x, y),
            Orientation::Vertical => (y, x),
        };
        let (lo, hi) = self.span();
        let (near, far) = self.facing();
        along >= lo - tol
            && along <= hi + tol
            && (across - near).abs() <= tol
            && (across - far).abs() <= tol
    }
}

/// Computes the interface segment between subdomains `a` and `b`.
///
/// A shared x-interval yields a [`Orientation::Horizontal`] segment; otherwise
/// the shared y-interval yields a [`Orientation::Vertical`] one. The result
/// does not depend on the order of `a` and `b`.
///
/// # Errors
///
/// - [`InterfaceError::UnknownSubdomain`] if either id is not in the partition.
/// - [`InterfaceError::NotAdjacent`] if `b` is not adjacent to `a`.
pub fn extract_boundary(
    partitioner: &DomainPartitioner,
    a: usize,
    b: usize,
) -> Result<BoundarySegment, InterfaceError> {
    let first = partitioner.record(a.min(b))?;
    let second = partitioner.record(a.max(b))?;

    if !first.is_adjacent_to(second.id()) {
        return Err(InterfaceError::NotAdjacent { a, b });
    }

    Ok(shared_edge(first, second))
}

fn shared_edge(first: &SubdomainRecord, second: &SubdomainRecord) -> BoundarySegment {
    let between = (first.id(), second.id());

    if first.rect().x == second.rect().x {
        let (lower, upper) = order_by(first, second, SubdomainRecord::y_lb);
        BoundarySegment {
            between,
            orientation: Orientation::Horizontal,
            x_lb: first.x_lb(),
            x_rb: first.x_rb(),
            y_lb: lower.y_rb(),
            y_rb: upper.y_lb(),
        }
    } else {
        let (left, right) = order_by(first, second, SubdomainRecord::x_lb);
        BoundarySegment {
            between,
            orientation: Orientation::Vertical,
            x_lb: left.x_rb(),
            x_rb: right.x_lb(),
            y_lb: first.y_lb(),
            y_rb: first.y_rb(),
        }
    }
}

/// Orders two records by a lower bound, keeping id order on ties.
fn order_by<'a>(
    first: &'a SubdomainRecord,
    second: &'a SubdomainRecord,
    key: fn(&SubdomainRecord) -> f64,
) -> (&'a SubdomainRecord, &'a SubdomainRecord) {
    if key(second) < key(first) {
        (second, first)
    } else {
        (first, second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::models::cpinn::core::{AdjacencyRule, PartitionError};

    fn build(x: &[(f64, f64)], y: &[(f64, f64)]) -> DomainPartitioner {
        DomainPartitioner::build(x.len(), x, y, AdjacencyRule::default()).unwrap()
    }

    #[test]
    fn stacked_pair_touches_at_shared_ordinate() {
        let p = build(&[(0.0, 1.0), (0.0, 1.0)], &[(0.0, 1.0), (1.0, 2.0)]);
        let seg = extract_boundary(&p, 0, 1).unwrap();

        assert_eq!(seg.orientation, Orientation::Horizontal);
        assert_eq!(seg.span(), (0.0, 1.0));
        assert_eq!(seg.facing(), (1.0, 1.0));
        assert!(seg.is_touching(0.0));
        assert_eq!(extract_boundary(&p, 1, 0).unwrap(), seg);
    }

    #[test]
    fn upper_subdomain_listed_first() {
        let p = build(&[(0.0, 1.0), (0.0, 1.0)], &[(1.0, 2.0), (0.0, 1.0)]);
        let seg = extract_boundary(&p, 0, 1).unwrap();

        assert_eq!(seg.between, (0, 1));
        assert_eq!((seg.y_lb, seg.y_rb), (1.0, 1.0));
    }

    #[test]
    fn side_by_side_pair_is_vertical() {
        let p = build(&[(1.0, 3.0), (0.0, 1.0)], &[(0.0, 2.0), (0.0, 2.0)]);
        let seg = extract_boundary(&p, 0, 1).unwrap();

        assert_eq!(seg.orientation, Orientation::Vertical);
        assert_eq!(seg.span(), (0.0, 2.0));
        assert_eq!((seg.x_lb, seg.x_rb), (1.0, 1.0));
        assert!(seg.contains(1.0, 0.5, 1e-12));
        assert!(!seg.contains(1.5, 0.5, 1e-12));
        assert!(!seg.contains(1.0, 2.5, 1e-12));
    }

    #[test]
    fn aligned_pair_with_gap_is_not_touching() {
        let p = build(&[(0.0, 1.0), (0.0, 1.0)], &[(0.0, 1.0), (3.0, 4.0)]);
        let seg = extract_boundary(&p, 0, 1).unwrap();

        assert_eq!(seg.facing(), (1.0, 3.0));
        assert!(!seg.is_touching(1e-9));
        assert!(!seg.contains(0.5, 1.0, 1e-9));
    }

    #[test]
    fn rejects_non_adjacent_pairs() {
        let p = build(&[(0.0, 1.0), (2.0, 3.0)], &[(0.0, 1.0), (2.0, 3.0)]);

        assert_eq!(
            extract_boundary(&p, 0, 1),
            Err(InterfaceError::NotAdjacent { a: 0, b: 1 })
        );
        assert_eq!(
            extract_boundary(&p, 0, 0),
            Err(InterfaceError::NotAdjacent { a: 0, b: 0 })
        );
        assert_eq!(
            extract_boundary(&p, 0, 5),
            Err(InterfaceError::UnknownSubdomain(
                PartitionError::UnknownSubdomain { id: 5 }
            ))
        );
    }

    #[test]
    fn defined_exactly_for_adjacent_pairs() {
        let p = build(
            &[(0.0, 1.0), (1.0, 2.0), (0.0, 1.0), (1.0, 2.0)],
            &[(0.0, 1.0), (0.0, 1.0), (1.0, 2.0), (1.0, 2.0)],
        );

        for a in 0..p.len() {
            for b in 0..p.len() {
                let adjacent = p.record(a).unwrap().is_adjacent_to(b);
                assert_eq!(extract_boundary(&p, a, b).is_ok(), adjacent);
            }
        }
        let segments = p.boundaries().unwrap();
        assert_eq!(segments.len(), 4);
        assert!(segments.iter().all(|seg| seg.is_touching(0.0)));
    }
}
