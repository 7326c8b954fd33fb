//! Model contracts for subdomain function approximators.

use std::{convert::Infallible, error::Error as StdError, fmt};

use twine_core::Model;

use super::{CoordinateBatch, FieldBatch};

/// Boxed error returned by a failing subdomain model.
pub type ModelError = Box<dyn StdError + Send + Sync>;

/// Object-safe view of a subdomain model.
///
/// Any [`twine_core::Model`] mapping a [`CoordinateBatch`] to a [`FieldBatch`]
/// implements this trait automatically, so models of different concrete types
/// can share one registry.
pub trait SubdomainModel: Send + Sync {
    /// Evaluates the model on every point of `batch`.
    ///
    /// # Errors
    ///
    /// Returns the model's own error, boxed.
    fn evaluate(&self, batch: &CoordinateBatch) -> Result<FieldBatch, ModelError>;
}

impl<M> SubdomainModel for M
where
    M: Model<Input = CoordinateBatch, Output = FieldBatch> + Send + Sync,
    M::Error: StdError + Send + Sync + 'static,
{
    fn evaluate(&self, batch: &CoordinateBatch) -> Result<FieldBatch, ModelError> {
        self.call(batch).map_err(|err| Box::new(err) as ModelError)
    }
}

/// Adapts a plain closure into a [`Model`].
///
/// # Example
///
/// ```
/// use twine_cpinn::models::cpinn::{CoordinateBatch, FieldBatch, FnModel, SubdomainModel};
///
/// let model = FnModel::new(|batch: &CoordinateBatch| -> FieldBatch {
///     batch.points().map(|(x, y)| [x + y, x - y]).collect()
/// });
///
/// let out = model.evaluate(&CoordinateBatch::from_points([(1.0, 2.0)])).unwrap();
/// assert_eq!(out.values(), &[[3.0, -1.0]]);
/// ```
#[derive(Clone, Copy)]
pub struct FnModel<F> {
    f: F,
}

impl<F> FnModel<F>
where
    F: Fn(&CoordinateBatch) -> FieldBatch,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> fmt::Debug for FnModel<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnModel").finish_non_exhaustive()
    }
}

impl<F> Model for FnModel<F>
where
    F: Fn(&CoordinateBatch) -> FieldBatch,
{
    type Input = CoordinateBatch;
    type Output = FieldBatch;
    type Error = Infallible;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        Ok((self.f)(input))
    }
}
