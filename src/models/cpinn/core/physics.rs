//! Boundary-condition and PDE records consumed by loss assembly.
//!
//! These hold configuration values only. Sampling and loss computation happen
//! outside this crate; the checks here keep each record's region consistent
//! with the decomposition it will be paired with.

use thiserror::Error;

use super::DomainPartitioner;

/// A closed sampling region, possibly degenerate (a segment or a point).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub x_lb: f64,
    pub x_rb: f64,
    pub y_lb: f64,
    pub y_rb: f64,
}

impl Region {
    /// Constructs a validated region.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::InvalidRegion`] if a bound is not finite or a
    /// lower bound exceeds its upper bound.
    pub fn new(x_lb: f64, x_rb: f64, y_lb: f64, y_rb: f64) -> Result<Self, PhysicsError> {
        let region = Self {
            x_lb,
            x_rb,
            y_lb,
            y_rb,
        };
        let finite = [x_lb, x_rb, y_lb, y_rb].iter().all(|v| v.is_finite());
        if !finite || x_lb > x_rb || y_lb > y_rb {
            return Err(PhysicsError::InvalidRegion { region });
        }
        Ok(region)
    }

    fn within(&self, x: (f64, f64), y: (f64, f64)) -> bool {
        self.x_lb >= x.0 && self.x_rb <= x.1 && self.y_lb >= y.0 && self.y_rb <= y.1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum PhysicsError {
    #[error("invalid region {region:?}")]
    InvalidRegion { region: Region },

    #[error("region {region:?} lies outside the decomposition")]
    OutsideDomain { region: Region },

    #[error("region {region:?} is not contained in a single subdomain")]
    NoOwner { region: Region },
}

/// A prescribed condition on part of the boundary.
///
/// `deriv_x` and `deriv_y` give the derivative order the condition applies
/// to; zero on both means the values `u` and `v` are prescribed directly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryCondition {
    /// Number of sample points.
    pub size: usize,
    pub region: Region,
    pub u: f64,
    pub v: f64,
    pub deriv_x: u8,
    pub deriv_y: u8,
}

impl BoundaryCondition {
    /// Returns true if this condition prescribes a derivative.
    #[must_use]
    pub fn is_derivative(&self) -> bool {
        self.deriv_x > 0 || self.deriv_y > 0
    }

    /// Checks that the region lies within the decomposition.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::OutsideDomain`] otherwise.
    pub fn check(&self, partitioner: &DomainPartitioner) -> Result<(), PhysicsError> {
        let hull = partitioner.hull();
        if self.region.within(hull.x.bounds(), hull.y.bounds()) {
            Ok(())
        } else {
            Err(PhysicsError::OutsideDomain {
                region: self.region,
            })
        }
    }
}

/// PDE weights and forcing for one subdomain's residual loss.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PdeTerms {
    /// Number of collocation points.
    pub size: usize,
    pub region: Region,
    pub w1: f64,
    pub w2: f64,
    pub fx: f64,
    pub fy: f64,
}

impl PdeTerms {
    /// Id of the subdomain whose rectangle contains the whole region.
    ///
    /// When several qualify (identical rectangles) the lowest id is returned.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::NoOwner`] if no single subdomain contains it.
    pub fn owner(&self, partitioner: &DomainPartitioner) -> Result<usize, PhysicsError> {
        partitioner
            .records()
            .iter()
            .find(|r| {
                self.region
                    .within(r.rect().x.bounds(), r.rect().y.bounds())
            })
            .map(|r| r.id())
            .ok_or(PhysicsError::NoOwner {
                region: self.region,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::models::cpinn::core::AdjacencyRule;

    fn stacked() -> DomainPartitioner {
        DomainPartitioner::build(
            2,
            &[(0.0, 1.0), (0.0, 1.0)],
            &[(0.0, 1.0), (1.0, 2.0)],
            AdjacencyRule::default(),
        )
        .unwrap()
    }

    #[test]
    fn regions_may_be_degenerate() {
        assert!(Region::new(0.0, 1.0, 2.0, 2.0).is_ok());
        assert!(Region::new(1.0, 0.0, 0.0, 1.0).is_err());
        assert!(Region::new(0.0, 1.0, 0.0, f64::NAN).is_err());
    }

    #[test]
    fn boundary_condition_on_outer_edge() {
        let top = BoundaryCondition {
            size: 100,
            region: Region::new(0.0, 1.0, 2.0, 2.0).unwrap(),
            u: 0.0,
            v: -1.0,
            deriv_x: 0,
            deriv_y: 1,
        };
        assert!(top.is_derivative());
        assert!(top.check(&stacked()).is_ok());

        let outside = BoundaryCondition {
            region: Region::new(0.0, 1.0, 3.0, 3.0).unwrap(),
            ..top
        };
        assert!(matches!(
            outside.check(&stacked()),
            Err(PhysicsError::OutsideDomain { .. })
        ));
    }

    #[test]
    fn pde_terms_belong_to_one_subdomain() {
        let terms = PdeTerms {
            size: 500,
            region: Region::new(0.0, 1.0, 1.0, 2.0).unwrap(),
            w1: 1.0,
            w2: 0.3,
            fx: 0.0,
            fy: -9.81,
        };
        assert_eq!(terms.owner(&stacked()), Ok(1));

        let straddling = PdeTerms {
            region: Region::new(0.0, 1.0, 0.5, 1.5).unwrap(),
            ..terms
        };
        assert!(matches!(
            straddling.owner(&stacked()),
            Err(PhysicsError::NoOwner { .. })
        ));
    }
}
