//! Composite evaluation of a decomposed field.
//!
//! With a single subdomain the composite field is the sole model's output.
//! With several, each model contributes only where its subdomain's indicator
//! is one:
//!
//! ```text
//! u(x, y) = Σ_i model_i(x, y) · indicator_i(x, y)
//! ```
//!
//! Each point is assigned to the first subdomain owning it under the
//! configured [`TieBreak`], so the indicators sum to exactly one over the
//! covered domain even if rectangles overlap. Models are evaluated only on the
//! points assigned to them and the results are scattered into the output,
//! which is the same sum without ever multiplying an out-of-domain prediction
//! by zero.

mod config;
mod error;
mod indicator;

pub use config::EvaluateConfig;
pub use error::EvaluateError;
pub use indicator::TieBreak;

use rayon::prelude::*;
use tracing::trace;

use crate::support::geometry::Rect;

use super::{
    BoundarySegment, CoordinateBatch, DomainPartitioner, FieldBatch, ModelHandle, ModelRegistry,
    SubdomainRecord, extract_boundary, model_key,
};

/// Evaluates the models of a [`ModelRegistry`] over a [`DomainPartitioner`].
///
/// The evaluator borrows both and holds no state of its own, so it is cheap
/// to create one per evaluation.
#[derive(Debug, Clone, Copy)]
pub struct CompositeEvaluator<'a> {
    partitioner: &'a DomainPartitioner,
    registry: &'a ModelRegistry,
    config: EvaluateConfig,
    hull: Rect<f64>,
    domain: Rect<f64>,
}

/// Model mismatch along one interface.
#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceJump {
    pub segment: BoundarySegment,

    /// Per-point difference, lower-id model minus higher-id model.
    pub jump: FieldBatch,

    /// Mean of `du² + dv²` over the samples, zero for an empty batch.
    pub mean_squared: f64,
}

impl<'a> CompositeEvaluator<'a> {
    #[must_use]
    pub fn new(
        partitioner: &'a DomainPartitioner,
        registry: &'a ModelRegistry,
        config: EvaluateConfig,
    ) -> Self {
        let hull = partitioner.hull();
        Self {
            partitioner,
            registry,
            config,
            hull,
            domain: hull,
        }
    }

    /// Sets the rectangle every point inside of must be owned by a subdomain.
    ///
    /// Defaults to the hull of the decomposition.
    #[must_use]
    pub fn within(self, domain: Rect<f64>) -> Self {
        Self { domain, ..self }
    }

    /// The 0/1 indicator of a subdomain at `(x, y)`.
    ///
    /// One only for the subdomain [`owner`](Self::owner) returns.
    #[must_use]
    pub fn indicator(&self, record: &SubdomainRecord, x: f64, y: f64) -> f64 {
        if self.owner(x, y) == Some(record.id()) {
            1.0
        } else {
            0.0
        }
    }

    /// Id of the first subdomain owning `(x, y)`, if any.
    #[must_use]
    pub fn owner(&self, x: f64, y: f64) -> Option<usize> {
        self.partitioner
            .records()
            .iter()
            .find(|r| self.config.tie_break.owns(r.rect(), &self.hull, x, y))
            .map(SubdomainRecord::id)
    }

    /// Evaluates the composite field at every point of `batch`.
    ///
    /// Points outside the evaluator's domain evaluate to zero.
    ///
    /// # Errors
    ///
    /// - [`EvaluateError::EmptyRegistry`] if no model is registered.
    /// - [`EvaluateError::Uncovered`] for the first point inside the domain
    ///   that no subdomain owns.
    /// - [`EvaluateError::RegistryCount`] if a single-subdomain decomposition
    ///   does not have exactly one model.
    /// - [`EvaluateError::Registry`] if a subdomain has no model.
    /// - [`EvaluateError::Model`] or [`EvaluateError::OutputShape`] if a model
    ///   fails or returns the wrong number of values.
    pub fn evaluate(&self, batch: &CoordinateBatch) -> Result<FieldBatch, EvaluateError> {
        if self.registry.is_empty() {
            return Err(EvaluateError::EmptyRegistry);
        }

        trace!(
            points = batch.len(),
            domains = self.partitioner.len(),
            parallel = self.config.parallel,
            "evaluating composite field"
        );

        if self.partitioner.len() == 1 {
            return self.evaluate_sole(batch);
        }

        let records = self.partitioner.records();
        let selections = self.assign(batch)?;
        let n = batch.len();

        if self.config.parallel {
            records
                .par_iter()
                .zip(selections.par_iter())
                .try_fold(
                    || FieldBatch::zeros(n),
                    |mut partial, (record, selected)| -> Result<FieldBatch, EvaluateError> {
                        self.accumulate(record, selected, batch, &mut partial)?;
                        Ok(partial)
                    },
                )
                .try_reduce(
                    || FieldBatch::zeros(n),
                    |mut total, partial| {
                        total += &partial;
                        Ok(total)
                    },
                )
        } else {
            let mut total = FieldBatch::zeros(n);
            for (record, selected) in records.iter().zip(&selections) {
                self.accumulate(record, selected, batch, &mut total)?;
            }
            Ok(total)
        }
    }

    /// Evaluates every registered model on the whole batch, in registration order.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluateError::EmptyRegistry`] if no model is registered, or
    /// the first model failure.
    pub fn evaluate_each(
        &self,
        batch: &CoordinateBatch,
    ) -> Result<Vec<(String, FieldBatch)>, EvaluateError> {
        if self.registry.is_empty() {
            return Err(EvaluateError::EmptyRegistry);
        }

        self.registry
            .iter()
            .map(|(key, model)| Ok((key.to_owned(), call_model(key, model, batch)?)))
            .collect()
    }

    /// Compares the two models of an interface on caller-sampled points.
    ///
    /// # Errors
    ///
    /// - [`EvaluateError::Interface`] if `a` and `b` are not adjacent.
    /// - [`EvaluateError::NotTouching`] if they are aligned but separated.
    /// - [`EvaluateError::PointOffInterface`] for the first sample off the segment.
    /// - Any lookup or model failure of the two models.
    pub fn interface_jump(
        &self,
        a: usize,
        b: usize,
        batch: &CoordinateBatch,
    ) -> Result<InterfaceJump, EvaluateError> {
        let tol = self.config.interface_tol;
        let segment = extract_boundary(self.partitioner, a, b)?;

        if !segment.is_touching(tol) {
            return Err(EvaluateError::NotTouching { a, b });
        }
        if let Some(index) = batch
            .points()
            .position(|(x, y)| !segment.contains(x, y, tol))
        {
            return Err(EvaluateError::PointOffInterface { index });
        }

        let (first, second) = segment.between;
        let lhs = self.call_subdomain(first, batch)?;
        let rhs = self.call_subdomain(second, batch)?;

        let jump: FieldBatch = lhs
            .values()
            .iter()
            .zip(rhs.values())
            .map(|(l, r)| [l[0] - r[0], l[1] - r[1]])
            .collect();

        #[allow(clippy::cast_precision_loss)]
        let mean_squared = if jump.is_empty() {
            0.0
        } else {
            jump.values()
                .iter()
                .map(|d| d[0] * d[0] + d[1] * d[1])
                .sum::<f64>()
                / jump.len() as f64
        };

        Ok(InterfaceJump {
            segment,
            jump,
            mean_squared,
        })
    }

    fn evaluate_sole(&self, batch: &CoordinateBatch) -> Result<FieldBatch, EvaluateError> {
        match self.registry.iter().next() {
            Some((key, model)) if self.registry.len() == 1 => call_model(key, model, batch),
            _ => Err(EvaluateError::RegistryCount {
                actual: self.registry.len(),
            }),
        }
    }

    /// Point indices owned by each subdomain, indexed like the records.
    fn assign(&self, batch: &CoordinateBatch) -> Result<Vec<Vec<usize>>, EvaluateError> {
        let mut selections = vec![Vec::new(); self.partitioner.len()];
        for (index, (x, y)) in batch.points().enumerate() {
            match self.owner(x, y) {
                Some(id) => selections[id].push(index),
                None if self.domain.contains_closed(x, y, 0.0) => {
                    return Err(EvaluateError::Uncovered { index, x, y });
                }
                None => {}
            }
        }
        Ok(selections)
    }

    /// Adds one subdomain's contribution at the `selected` points into `out`.
    fn accumulate(
        &self,
        record: &SubdomainRecord,
        selected: &[usize],
        batch: &CoordinateBatch,
        out: &mut FieldBatch,
    ) -> Result<(), EvaluateError> {
        let key = model_key(record.id());
        let model = self.registry.get(&key)?;

        if selected.is_empty() {
            return Ok(());
        }

        let values = call_model(&key, model, &batch.select(selected))?;
        out.scatter_add(selected, &values);
        Ok(())
    }

    fn call_subdomain(
        &self,
        id: usize,
        batch: &CoordinateBatch,
    ) -> Result<FieldBatch, EvaluateError> {
        let key = model_key(id);
        call_model(&key, self.registry.get(&key)?, batch)
    }
}

fn call_model(
    key: &str,
    model: &ModelHandle,
    batch: &CoordinateBatch,
) -> Result<FieldBatch, EvaluateError> {
    let values = model
        .evaluate(batch)
        .map_err(|source| EvaluateError::Model {
            key: key.to_owned(),
            source,
        })?;

    if values.len() != batch.len() {
        return Err(EvaluateError::OutputShape {
            key: key.to_owned(),
            expected: batch.len(),
            actual: values.len(),
        });
    }

    Ok(values)
}
