use thiserror::Error;

use crate::models::cpinn::core::PartitionError;

/// Errors that can occur while extracting an interface segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InterfaceError {
    /// An id does not name a subdomain of the partition.
    #[error("interface lookup failed")]
    UnknownSubdomain(#[from] PartitionError),

    /// The two subdomains do not share an interface.
    #[error("subdomains {a} and {b} are not adjacent")]
    NotAdjacent { a: usize, b: usize },
}
