//! Partitioning of the global rectangle into subdomains.
//!
//! A [`DomainPartitioner`] is built in two passes. [`DomainPartitioner::partition`]
//! validates the caller's interval lists and creates one [`SubdomainRecord`] per
//! entry. [`DomainPartitioner::build_adjacency`] then compares every pair of
//! records, which requires all of them to exist.

mod adjacency;
mod error;

pub use adjacency::AdjacencyRule;
pub use error::{PartitionError, TilingError};

use std::collections::BTreeSet;

use tracing::debug;

use crate::support::geometry::{Axis, Interval, Rect};

use super::{BoundarySegment, InterfaceError, extract_boundary};

/// Relative tolerance for comparing covered and global areas.
const AREA_REL_TOL: f64 = 1e-12;

/// One rectangular subdomain and the ids of its neighbors.
#[derive(Debug, Clone, PartialEq)]
pub struct SubdomainRecord {
    id: usize,
    rect: Rect<f64>,
    adjacency: BTreeSet<usize>,
}

impl SubdomainRecord {
    #[must_use]
    pub fn id(&self) -> usize {
        self.id
    }

    #[must_use]
    pub fn rect(&self) -> &Rect<f64> {
        &self.rect
    }

    #[must_use]
    pub fn x_lb(&self) -> f64 {
        self.rect.x.lower()
    }

    #[must_use]
    pub fn x_rb(&self) -> f64 {
        self.rect.x.upper()
    }

    #[must_use]
    pub fn y_lb(&self) -> f64 {
        self.rect.y.lower()
    }

    #[must_use]
    pub fn y_rb(&self) -> f64 {
        self.rect.y.upper()
    }

    /// Ids of adjacent subdomains, in ascending order.
    #[must_use]
    pub fn adjacency(&self) -> &BTreeSet<usize> {
        &self.adjacency
    }

    #[must_use]
    pub fn is_adjacent_to(&self, id: usize) -> bool {
        self.adjacency.contains(&id)
    }
}

/// Owner of the subdomain records for one decomposition.
///
/// Records are only reachable through shared references, so callers cannot
/// break the symmetry of the adjacency sets. A different layout requires a
/// new partitioner.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainPartitioner {
    records: Vec<SubdomainRecord>,
    rule: AdjacencyRule,
    adjacency_built: bool,
}

impl DomainPartitioner {
    /// Creates `domain_count` subdomains with ids `0..domain_count`.
    ///
    /// Adjacency sets start empty; see [`DomainPartitioner::build_adjacency`].
    ///
    /// # Errors
    ///
    /// Returns a [`PartitionError`] if `domain_count` is zero, an interval list
    /// has the wrong length, or any interval is invalid. Nothing is created
    /// unless every input is valid.
    pub fn partition(
        domain_count: usize,
        x_intervals: &[(f64, f64)],
        y_intervals: &[(f64, f64)],
        rule: AdjacencyRule,
    ) -> Result<Self, PartitionError> {
        if domain_count == 0 {
            return Err(PartitionError::NoDomains);
        }
        for (axis, intervals) in [(Axis::X, x_intervals), (Axis::Y, y_intervals)] {
            if intervals.len() != domain_count {
                return Err(PartitionError::LengthMismatch {
                    axis,
                    expected: domain_count,
                    actual: intervals.len(),
                });
            }
        }

        let records = x_intervals
            .iter()
            .zip(y_intervals)
            .enumerate()
            .map(|(id, (&x, &y))| {
                let x = Interval::try_from(x).map_err(|source| PartitionError::InvalidInterval {
                    id,
                    axis: Axis::X,
                    source,
                })?;
                let y = Interval::try_from(y).map_err(|source| PartitionError::InvalidInterval {
                    id,
                    axis: Axis::Y,
                    source,
                })?;
                Ok(SubdomainRecord {
                    id,
                    rect: Rect::new(x, y),
                    adjacency: BTreeSet::new(),
                })
            })
            .collect::<Result<Vec<_>, PartitionError>>()?;

        debug!(domain_count, ?rule, "partitioned global domain");

        Ok(Self {
            records,
            rule,
            adjacency_built: false,
        })
    }

    /// Partitions and builds adjacency in one step.
    ///
    /// # Errors
    ///
    /// See [`DomainPartitioner::partition`].
    pub fn build(
        domain_count: usize,
        x_intervals: &[(f64, f64)],
        y_intervals: &[(f64, f64)],
        rule: AdjacencyRule,
    ) -> Result<Self, PartitionError> {
        let mut partitioner = Self::partition(domain_count, x_intervals, y_intervals, rule)?;
        partitioner.build_adjacency();
        Ok(partitioner)
    }

    /// Populates every record's adjacency set.
    ///
    /// Each adjacent pair is recorded in both directions. Only the first call
    /// does any work.
    pub fn build_adjacency(&mut self) {
        if self.adjacency_built {
            return;
        }

        let n = self.records.len();
        for i in 0..n {
            for j in (i + 1)..n {
                if self.rule.adjacent(&self.records[i].rect, &self.records[j].rect) {
                    self.records[i].adjacency.insert(j);
                    self.records[j].adjacency.insert(i);
                }
            }
        }
        self.adjacency_built = true;

        debug!(pairs = self.adjacent_pairs().count(), "built adjacency");
    }

    #[must_use]
    pub fn is_adjacency_built(&self) -> bool {
        self.adjacency_built
    }

    #[must_use]
    pub fn rule(&self) -> AdjacencyRule {
        self.rule
    }

    /// Number of subdomains.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false: a partition holds at least one subdomain.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn records(&self) -> &[SubdomainRecord] {
        &self.records
    }

    /// Looks up a subdomain by id.
    ///
    /// # Errors
    ///
    /// Returns [`PartitionError::UnknownSubdomain`] if no record has this id.
    pub fn record(&self, id: usize) -> Result<&SubdomainRecord, PartitionError> {
        self.records
            .get(id)
            .ok_or(PartitionError::UnknownSubdomain { id })
    }

    /// Iterates over adjacent pairs `(a, b)` with `a < b`.
    pub fn adjacent_pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.records.iter().flat_map(|record| {
            record
                .adjacency
                .iter()
                .filter(move |&&other| other > record.id)
                .map(move |&other| (record.id, other))
        })
    }

    /// Computes the interface segment of every adjacent pair.
    ///
    /// Segments are derived from the records on each call and never cached.
    ///
    /// # Errors
    ///
    /// Returns the first [`InterfaceError`] from [`extract_boundary`].
    pub fn boundaries(&self) -> Result<Vec<BoundarySegment>, InterfaceError> {
        let segments = self
            .adjacent_pairs()
            .map(|(a, b)| extract_boundary(self, a, b))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(count = segments.len(), "computed interface segments");
        Ok(segments)
    }

    /// Bounding rectangle of all subdomains.
    #[must_use]
    pub fn hull(&self) -> Rect<f64> {
        // A partition always holds at least one record.
        let first = self.records[0].rect;
        Rect::hull(self.records.iter().map(|r| &r.rect)).unwrap_or(first)
    }

    /// Checks that the subdomains exactly tile `global`.
    ///
    /// # Errors
    ///
    /// Returns a [`TilingError`] for the first subdomain outside `global`, the
    /// first overlapping pair, or a mismatch between covered and global area.
    pub fn verify_tiling(&self, global: &Rect<f64>) -> Result<(), TilingError> {
        self.check_contained(global)?;
        self.check_disjoint()?;

        let covered: f64 = self.records.iter().map(|r| r.rect.area()).sum();
        let expected = global.area();
        if (covered - expected).abs() > AREA_REL_TOL * expected {
            return Err(TilingError::Gap { covered, expected });
        }

        Ok(())
    }

    /// Checks that every subdomain lies inside `global`.
    ///
    /// # Errors
    ///
    /// Returns [`TilingError::OutsideGlobal`] for the first offending subdomain.
    pub fn check_contained(&self, global: &Rect<f64>) -> Result<(), TilingError> {
        match self.records.iter().find(|r| !global.encloses(&r.rect)) {
            Some(r) => Err(TilingError::OutsideGlobal { id: r.id }),
            None => Ok(()),
        }
    }

    /// Checks that no two subdomains share a region of positive area.
    ///
    /// # Errors
    ///
    /// Returns [`TilingError::Overlap`] for the first overlapping pair.
    pub fn check_disjoint(&self) -> Result<(), TilingError> {
        for (i, a) in self.records.iter().enumerate() {
            if let Some(b) = self.records[i + 1..].iter().find(|b| a.rect.overlaps(&b.rect)) {
                return Err(TilingError::Overlap { a: a.id, b: b.id });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::support::geometry::GeometryError;

    fn two_stacked() -> DomainPartitioner {
        DomainPartitioner::build(
            2,
            &[(0.0, 1.0), (0.0, 1.0)],
            &[(0.0, 1.0), (1.0, 2.0)],
            AdjacencyRule::default(),
        )
        .unwrap()
    }

    fn quadrants() -> DomainPartitioner {
        DomainPartitioner::build(
            4,
            &[(0.0, 1.0), (1.0, 2.0), (0.0, 1.0), (1.0, 2.0)],
            &[(0.0, 1.0), (0.0, 1.0), (1.0, 2.0), (1.0, 2.0)],
            AdjacencyRule::default(),
        )
        .unwrap()
    }

    fn assert_symmetric_irreflexive(p: &DomainPartitioner) {
        for record in p.records() {
            assert!(!record.is_adjacent_to(record.id()));
            for &other in record.adjacency() {
                assert!(p.record(other).unwrap().is_adjacent_to(record.id()));
            }
        }
    }

    #[test]
    fn stacked_pair_is_adjacent() {
        let p = two_stacked();

        assert_eq!(p.len(), 2);
        assert_eq!(p.record(0).unwrap().adjacency(), &BTreeSet::from([1]));
        assert_eq!(p.record(1).unwrap().adjacency(), &BTreeSet::from([0]));
        assert_eq!(p.adjacent_pairs().collect::<Vec<_>>(), [(0, 1)]);
        assert_symmetric_irreflexive(&p);
    }

    #[test]
    fn quadrants_have_no_diagonal_neighbors() {
        let p = quadrants();

        assert_eq!(p.record(0).unwrap().adjacency(), &BTreeSet::from([1, 2]));
        assert_eq!(p.record(3).unwrap().adjacency(), &BTreeSet::from([1, 2]));
        assert!(!p.record(0).unwrap().is_adjacent_to(3));
        assert!(!p.record(1).unwrap().is_adjacent_to(2));
        assert_eq!(
            p.adjacent_pairs().collect::<Vec<_>>(),
            [(0, 1), (0, 2), (1, 3), (2, 3)]
        );
        assert_symmetric_irreflexive(&p);
    }

    #[test]
    fn disjoint_pair_is_not_adjacent() {
        let p = DomainPartitioner::build(
            2,
            &[(0.0, 1.0), (2.0, 3.0)],
            &[(0.0, 1.0), (2.0, 3.0)],
            AdjacencyRule::default(),
        )
        .unwrap();

        assert!(p.records().iter().all(|r| r.adjacency().is_empty()));
        assert!(p.boundaries().unwrap().is_empty());
    }

    #[test]
    fn identical_rectangles_depend_on_rule() {
        let intervals = [(0.0, 1.0), (0.0, 1.0)];

        let aligned =
            DomainPartitioner::build(2, &intervals, &intervals, AdjacencyRule::AxisAligned)
                .unwrap();
        assert!(aligned.record(0).unwrap().is_adjacent_to(1));
        assert_symmetric_irreflexive(&aligned);

        let grouped =
            DomainPartitioner::build(2, &intervals, &intervals, AdjacencyRule::Grouped).unwrap();
        assert!(grouped.record(0).unwrap().adjacency().is_empty());
    }

    #[test]
    fn adjacency_is_a_second_pass() {
        let mut p = DomainPartitioner::partition(
            2,
            &[(0.0, 1.0), (0.0, 1.0)],
            &[(0.0, 1.0), (1.0, 2.0)],
            AdjacencyRule::default(),
        )
        .unwrap();
        assert!(!p.is_adjacency_built());
        assert!(p.records().iter().all(|r| r.adjacency().is_empty()));

        p.build_adjacency();
        let once = p.clone();
        p.build_adjacency();
        assert_eq!(p, once);
    }

    #[test]
    fn rejects_malformed_input() {
        let rule = AdjacencyRule::default();

        assert_eq!(
            DomainPartitioner::partition(0, &[], &[], rule),
            Err(PartitionError::NoDomains)
        );
        assert_eq!(
            DomainPartitioner::partition(2, &[(0.0, 1.0)], &[(0.0, 1.0), (1.0, 2.0)], rule),
            Err(PartitionError::LengthMismatch {
                axis: Axis::X,
                expected: 2,
                actual: 1
            })
        );
        assert_eq!(
            DomainPartitioner::partition(1, &[(0.0, 1.0)], &[(2.0, 1.0)], rule),
            Err(PartitionError::InvalidInterval {
                id: 0,
                axis: Axis::Y,
                source: GeometryError::NotIncreasing
            })
        );
        assert_eq!(
            DomainPartitioner::partition(1, &[(f64::NAN, 1.0)], &[(0.0, 1.0)], rule),
            Err(PartitionError::InvalidInterval {
                id: 0,
                axis: Axis::X,
                source: GeometryError::NonFinite
            })
        );
        assert_eq!(
            two_stacked().record(7),
            Err(PartitionError::UnknownSubdomain { id: 7 })
        );
    }

    #[test]
    fn tiling() {
        let global = Rect::from_bounds(0.0, 2.0, 0.0, 2.0).unwrap();

        assert!(quadrants().verify_tiling(&global).is_ok());
        assert_eq!(quadrants().hull(), global);

        assert!(matches!(
            two_stacked().verify_tiling(&global),
            Err(TilingError::Gap { .. })
        ));

        let small = Rect::from_bounds(0.0, 1.0, 0.0, 1.0).unwrap();
        assert_eq!(
            two_stacked().verify_tiling(&small),
            Err(TilingError::OutsideGlobal { id: 1 })
        );

        let overlapping = DomainPartitioner::build(
            2,
            &[(0.0, 2.0), (0.0, 2.0)],
            &[(0.0, 1.5), (0.5, 2.0)],
            AdjacencyRule::default(),
        )
        .unwrap();
        assert_eq!(
            overlapping.verify_tiling(&global),
            Err(TilingError::Overlap { a: 0, b: 1 })
        );
        assert_eq!(
            overlapping.check_disjoint(),
            Err(TilingError::Overlap { a: 0, b: 1 })
        );
        assert!(two_stacked().check_disjoint().is_ok());
    }
}
