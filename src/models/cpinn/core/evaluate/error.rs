use thiserror::Error;

use crate::models::cpinn::core::{BatchError, InterfaceError, ModelError, RegistryError};

/// Errors that can occur while evaluating the composite field.
#[derive(Debug, Error)]
pub enum EvaluateError {
    /// No model has been registered yet.
    #[error("no models registered")]
    EmptyRegistry,

    /// A point inside the domain is owned by no subdomain.
    #[error("point {index} at ({x}, {y}) is not covered by any subdomain")]
    Uncovered { index: usize, x: f64, y: f64 },

    /// A single-subdomain decomposition needs exactly one registered model.
    #[error("single-subdomain evaluation needs exactly one model, found {actual}")]
    RegistryCount { actual: usize },

    /// A required model is missing.
    #[error("model lookup failed")]
    Registry(#[from] RegistryError),

    /// The coordinate columns could not form a batch.
    #[error("invalid coordinate batch")]
    Batch(#[from] BatchError),

    /// The requested pair has no interface.
    #[error("interface lookup failed")]
    Interface(#[from] InterfaceError),

    /// The subdomains are aligned but separated, so no point lies on both edges.
    #[error("subdomains {a} and {b} do not touch")]
    NotTouching { a: usize, b: usize },

    /// An interface sample does not lie on the segment.
    #[error("point {index} is not on the interface")]
    PointOffInterface { index: usize },

    /// A model returned the wrong number of values.
    #[error("model {key:?} returned {actual} values for {expected} points")]
    OutputShape {
        key: String,
        expected: usize,
        actual: usize,
    },

    /// A model failed to evaluate.
    #[error("model {key:?} failed")]
    Model {
        key: String,
        #[source]
        source: ModelError,
    },
}
