use thiserror::Error;

/// Errors that can occur while accessing the model registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// No model is registered under the key.
    #[error("no model registered as {key:?}")]
    NotFound { key: String },

    /// A writer panicked while holding the registry lock.
    #[error("model registry lock poisoned")]
    Poisoned,
}
