use std::{
    fmt,
    sync::{Arc, Mutex},
};

use twine_core::Model;

use super::{CoordinateBatch, FieldBatch, FnModel, ModelHandle, SubdomainModel};

pub(crate) fn handle(model: impl SubdomainModel + 'static) -> ModelHandle {
    Arc::new(model)
}

/// Returns `[value, value]` everywhere.
pub(crate) fn constant(value: f64) -> impl SubdomainModel + Clone {
    FnModel::new(move |batch: &CoordinateBatch| -> FieldBatch {
        batch.points().map(|_| [value, value]).collect()
    })
}

/// `u = a·x + b·y + c`, `v = c·x - a·y`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Affine {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Model for Affine {
    type Input = CoordinateBatch;
    type Output = FieldBatch;
    type Error = std::convert::Infallible;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        Ok(input
            .points()
            .map(|(x, y)| [self.a * x + self.b * y + self.c, self.c * x - self.a * y])
            .collect())
    }
}

#[derive(Debug)]
pub(crate) struct Diverged;

impl fmt::Display for Diverged {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("network diverged")
    }
}

impl std::error::Error for Diverged {}

/// Always fails.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Failing;

impl Model for Failing {
    type Input = CoordinateBatch;
    type Output = FieldBatch;
    type Error = Diverged;

    fn call(&self, _input: &Self::Input) -> Result<Self::Output, Self::Error> {
        Err(Diverged)
    }
}

/// Returns one value fewer than requested.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Truncating;

impl Model for Truncating {
    type Input = CoordinateBatch;
    type Output = FieldBatch;
    type Error = std::convert::Infallible;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        Ok(FieldBatch::zeros(input.len().saturating_sub(1)))
    }
}

/// Records every batch it is called with.
#[derive(Debug, Clone, Default)]
pub(crate) struct Recording {
    pub calls: Arc<Mutex<Vec<CoordinateBatch>>>,
}

impl Model for Recording {
    type Input = CoordinateBatch;
    type Output = FieldBatch;
    type Error = std::convert::Infallible;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        self.calls.lock().unwrap().push(input.clone());
        Ok(FieldBatch::zeros(input.len()))
    }
}
