//! Conservative PINN (cPINN) composite model.
//!
//! A [`Cpinn`] splits a rectangular domain into axis-aligned subdomains, keeps
//! one externally trained model per subdomain, and evaluates them together as
//! a single field. It implements [`twine_core::Model`] by delegating to
//! [`CompositeEvaluator`]; the bookkeeping lives in the internal `core` module.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use twine_cpinn::models::cpinn::{
//!     CoordinateBatch, Cpinn, CpinnConfig, FieldBatch, FnModel, ModelHandle, model_key,
//! };
//! use twine_cpinn::support::geometry::Rect;
//!
//! let global = Rect::from_bounds(0.0, 1.0, 0.0, 2.0).unwrap();
//! let config = CpinnConfig::new(
//!     2,
//!     global,
//!     vec![(0.0, 1.0), (0.0, 1.0)],
//!     vec![(0.0, 1.0), (1.0, 2.0)],
//! );
//! let cpinn = Cpinn::new(config).unwrap();
//!
//! // The two subdomains meet along y = 1.
//! let segment = cpinn.boundary(0, 1).unwrap();
//! assert_eq!((segment.y_lb, segment.y_rb), (1.0, 1.0));
//!
//! let lower: ModelHandle = Arc::new(FnModel::new(|b: &CoordinateBatch| -> FieldBatch {
//!     b.points().map(|_| [1.0, 0.0]).collect()
//! }));
//! let upper: ModelHandle = Arc::new(FnModel::new(|b: &CoordinateBatch| -> FieldBatch {
//!     b.points().map(|_| [2.0, 0.0]).collect()
//! }));
//! cpinn
//!     .register_models([(model_key(0), lower), (model_key(1), upper)])
//!     .unwrap();
//!
//! let points = CoordinateBatch::from_points([(0.5, 0.5), (0.5, 1.0), (0.5, 1.5)]);
//! let field = cpinn.evaluate(&points).unwrap();
//! assert_eq!(field.u().collect::<Vec<_>>(), [1.0, 2.0, 2.0]);
//! ```

mod core;

pub use core::{
    AdjacencyRule, BatchError, BoundaryCondition, BoundarySegment, CompositeEvaluator,
    ConvergenceError, ConvergenceRecorder, CoordinateBatch, DomainPartitioner, EvaluateConfig,
    EvaluateError, FieldBatch, FnModel, InterfaceError, InterfaceJump, LossRecord, LossSeries,
    ModelError, ModelHandle, ModelRegistry, Orientation, PartitionError, PdeTerms, PhysicsError,
    Region, RegistryError, SharedRegistry, SubdomainModel, SubdomainRecord, TieBreak,
    TilingError, extract_boundary, model_key,
};

use thiserror::Error;
use tracing::debug;
use twine_core::Model;

use crate::support::geometry::Rect;

/// Configuration for building a [`Cpinn`].
#[derive(Debug, Clone, PartialEq)]
pub struct CpinnConfig {
    /// Number of subdomains.
    pub domain_count: usize,

    /// The global solution domain.
    pub global: Rect<f64>,

    /// Per-subdomain x-intervals, indexed by subdomain id.
    pub x_intervals: Vec<(f64, f64)>,

    /// Per-subdomain y-intervals, indexed by subdomain id.
    pub y_intervals: Vec<(f64, f64)>,

    /// Rule used to decide which subdomains are adjacent.
    pub adjacency: AdjacencyRule,

    /// Composite evaluation settings.
    pub evaluation: EvaluateConfig,

    /// Require the subdomains to tile the global domain exactly.
    ///
    /// Containment in the global domain and pairwise disjointness are always
    /// required. Without tiling, evaluating a point in a gap fails with
    /// [`EvaluateError::Uncovered`].
    pub require_tiling: bool,
}

impl CpinnConfig {
    /// Creates a configuration with default adjacency and evaluation settings
    /// that requires an exact tiling.
    #[must_use]
    pub fn new(
        domain_count: usize,
        global: Rect<f64>,
        x_intervals: Vec<(f64, f64)>,
        y_intervals: Vec<(f64, f64)>,
    ) -> Self {
        Self {
            domain_count,
            global,
            x_intervals,
            y_intervals,
            adjacency: AdjacencyRule::default(),
            evaluation: EvaluateConfig::default(),
            require_tiling: true,
        }
    }
}

/// Errors that can occur while building a [`Cpinn`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CpinnError {
    #[error("invalid partition")]
    Partition(#[from] PartitionError),

    #[error("subdomains do not fit the global domain")]
    Tiling(#[from] TilingError),
}

/// Read-only geometry of a decomposition, as consumed by domain plots.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainLayout {
    pub global: Rect<f64>,
    /// Subdomain rectangles, indexed by id.
    pub domains: Vec<Rect<f64>>,
    pub boundaries: Vec<BoundarySegment>,
}

/// A decomposed field backed by one model per subdomain.
#[derive(Debug, Clone)]
pub struct Cpinn {
    global: Rect<f64>,
    partitioner: DomainPartitioner,
    registry: SharedRegistry,
    evaluation: EvaluateConfig,
    convergence: ConvergenceRecorder,
}

impl Cpinn {
    /// Partitions the domain and builds adjacency.
    ///
    /// # Errors
    ///
    /// Returns [`CpinnError::Partition`] for malformed intervals and
    /// [`CpinnError::Tiling`] if a subdomain leaves the global domain, two
    /// subdomains overlap or, when required, the subdomains leave a gap.
    pub fn new(config: CpinnConfig) -> Result<Self, CpinnError> {
        let partitioner = DomainPartitioner::build(
            config.domain_count,
            &config.x_intervals,
            &config.y_intervals,
            config.adjacency,
        )?;

        if config.require_tiling {
            partitioner.verify_tiling(&config.global)?;
        } else {
            partitioner.check_contained(&config.global)?;
            partitioner.check_disjoint()?;
        }

        debug!(
            domains = partitioner.len(),
            interfaces = partitioner.adjacent_pairs().count(),
            "built cPINN decomposition"
        );

        Ok(Self {
            global: config.global,
            convergence: ConvergenceRecorder::new(partitioner.len()),
            partitioner,
            registry: SharedRegistry::default(),
            evaluation: config.evaluation,
        })
    }

    #[must_use]
    pub fn domain_count(&self) -> usize {
        self.partitioner.len()
    }

    #[must_use]
    pub fn global(&self) -> &Rect<f64> {
        &self.global
    }

    #[must_use]
    pub fn partitioner(&self) -> &DomainPartitioner {
        &self.partitioner
    }

    /// Handle to the model registry, shareable with training code.
    #[must_use]
    pub fn registry(&self) -> &SharedRegistry {
        &self.registry
    }

    /// Merge-inserts subdomain models.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Poisoned`] if the registry lock is poisoned.
    pub fn register_models<K: Into<String>>(
        &self,
        models: impl IntoIterator<Item = (K, ModelHandle)>,
    ) -> Result<(), RegistryError> {
        self.registry.update(models)
    }

    /// The interface segment between subdomains `a` and `b`.
    ///
    /// # Errors
    ///
    /// Returns an [`InterfaceError`] if they are not adjacent.
    pub fn boundary(&self, a: usize, b: usize) -> Result<BoundarySegment, InterfaceError> {
        extract_boundary(&self.partitioner, a, b)
    }

    /// Geometry for plotting.
    ///
    /// # Errors
    ///
    /// Returns an [`InterfaceError`] if an interface segment cannot be built.
    pub fn layout(&self) -> Result<DomainLayout, InterfaceError> {
        Ok(DomainLayout {
            global: self.global,
            domains: self.partitioner.records().iter().map(|r| *r.rect()).collect(),
            boundaries: self.partitioner.boundaries()?,
        })
    }

    fn evaluator<'a>(&'a self, registry: &'a ModelRegistry) -> CompositeEvaluator<'a> {
        CompositeEvaluator::new(&self.partitioner, registry, self.evaluation).within(self.global)
    }

    /// Evaluates the composite field.
    ///
    /// # Errors
    ///
    /// See [`CompositeEvaluator::evaluate`]. A poisoned registry lock is
    /// reported as [`EvaluateError::Registry`].
    pub fn evaluate(&self, batch: &CoordinateBatch) -> Result<FieldBatch, EvaluateError> {
        let registry = self.registry.read()?;
        self.evaluator(&registry).evaluate(batch)
    }

    /// Evaluates the composite field at coordinate columns.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluateError::Batch`] if the columns differ in length, or any
    /// error of [`Cpinn::evaluate`].
    pub fn evaluate_xy(&self, x: Vec<f64>, y: Vec<f64>) -> Result<FieldBatch, EvaluateError> {
        self.evaluate(&CoordinateBatch::new(x, y)?)
    }

    /// Evaluates each registered model separately on the whole batch.
    ///
    /// # Errors
    ///
    /// See [`CompositeEvaluator::evaluate_each`].
    pub fn evaluate_each(
        &self,
        batch: &CoordinateBatch,
    ) -> Result<Vec<(String, FieldBatch)>, EvaluateError> {
        let registry = self.registry.read()?;
        self.evaluator(&registry).evaluate_each(batch)
    }

    /// Model mismatch on caller-sampled interface points.
    ///
    /// # Errors
    ///
    /// See [`CompositeEvaluator::interface_jump`].
    pub fn interface_jump(
        &self,
        a: usize,
        b: usize,
        batch: &CoordinateBatch,
    ) -> Result<InterfaceJump, EvaluateError> {
        let registry = self.registry.read()?;
        self.evaluator(&registry).interface_jump(a, b, batch)
    }

    /// Appends one epoch of losses for subdomain `id`.
    ///
    /// # Errors
    ///
    /// Returns [`ConvergenceError::UnknownSubdomain`] if `id` is out of range.
    pub fn record_losses(&mut self, id: usize, losses: LossRecord) -> Result<(), ConvergenceError> {
        self.convergence.record(id, losses)
    }

    #[must_use]
    pub fn convergence(&self) -> &ConvergenceRecorder {
        &self.convergence
    }
}

impl Model for Cpinn {
    type Input = CoordinateBatch;
    type Output = FieldBatch;
    type Error = EvaluateError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        self.evaluate(input)
    }
}
