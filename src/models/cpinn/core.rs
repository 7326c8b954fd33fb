//! Domain-decomposition bookkeeping for conservative PINNs.
//!
//! The global rectangle is split into axis-aligned subdomains, each solved by
//! its own model. This module finds which subdomains share an edge, extracts
//! those edges for interface losses, and stitches the per-subdomain models
//! back into one field.

mod batch;
mod convergence;
mod evaluate;
mod interface;
mod partition;
mod physics;
mod registry;
mod traits;

#[cfg(test)]
mod test_support;

pub use batch::{BatchError, CoordinateBatch, FieldBatch};
pub use convergence::{ConvergenceError, ConvergenceRecorder, LossRecord, LossSeries};
pub use evaluate::{CompositeEvaluator, EvaluateConfig, EvaluateError, InterfaceJump, TieBreak};
pub use interface::{BoundarySegment, InterfaceError, Orientation, extract_boundary};
pub use partition::{AdjacencyRule, DomainPartitioner, PartitionError, SubdomainRecord, TilingError};
pub use physics::{BoundaryCondition, PdeTerms, PhysicsError, Region};
pub use registry::{ModelHandle, ModelRegistry, RegistryError, SharedRegistry, model_key};
pub use traits::{FnModel, ModelError, SubdomainModel};
