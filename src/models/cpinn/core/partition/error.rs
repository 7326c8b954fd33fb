use thiserror::Error;

use crate::support::geometry::{Axis, GeometryError};

/// Errors that can occur while partitioning the global domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PartitionError {
    /// At least one subdomain is required.
    #[error("domain count must be at least one")]
    NoDomains,

    /// An interval list does not have one entry per subdomain.
    #[error("expected {expected} {axis}-intervals, got {actual}")]
    LengthMismatch {
        axis: Axis,
        expected: usize,
        actual: usize,
    },

    /// A subdomain interval is not finite or not increasing.
    #[error("invalid {axis}-interval for subdomain {id}")]
    InvalidInterval {
        id: usize,
        axis: Axis,
        #[source]
        source: GeometryError,
    },

    /// No subdomain carries the requested id.
    #[error("unknown subdomain {id}")]
    UnknownSubdomain { id: usize },
}

/// Reasons a partition fails to tile a global rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum TilingError {
    /// A subdomain extends past the global rectangle.
    #[error("subdomain {id} extends outside the global domain")]
    OutsideGlobal { id: usize },

    /// Two subdomains share interior points.
    #[error("subdomains {a} and {b} overlap")]
    Overlap { a: usize, b: usize },

    /// The subdomains leave part of the global rectangle uncovered.
    #[error("subdomains cover area {covered}, global domain has area {expected}")]
    Gap { covered: f64, expected: f64 },
}
