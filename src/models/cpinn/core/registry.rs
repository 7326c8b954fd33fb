//! Name-indexed storage for subdomain models.
//!
//! The registry never builds or trains models. Training code inserts and
//! replaces them; evaluation only looks them up.

mod error;
mod shared;

pub use error::RegistryError;
pub use shared::SharedRegistry;

use std::{collections::HashMap, fmt, sync::Arc};

use tracing::debug;

use super::SubdomainModel;

/// A reference-counted, type-erased subdomain model.
pub type ModelHandle = Arc<dyn SubdomainModel>;

/// Registry key of the model for subdomain `id`.
///
/// Keys are one-based: subdomain `0` is solved by `"Model1"`.
#[must_use]
pub fn model_key(id: usize) -> String {
    format!("Model{}", id + 1)
}

/// An insertion-ordered map from model name to model.
#[derive(Clone, Default)]
pub struct ModelRegistry {
    entries: Vec<(String, ModelHandle)>,
    index: HashMap<String, usize>,
}

impl ModelRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces one model.
    ///
    /// A replaced model keeps its original registration position.
    pub fn insert(&mut self, key: impl Into<String>, model: ModelHandle) {
        let key = key.into();
        match self.index.get(&key) {
            Some(&slot) => self.entries[slot].1 = model,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, model));
            }
        }
    }

    /// Merges `models` into the registry; the last write wins on key collisions.
    pub fn register<K: Into<String>>(&mut self, models: impl IntoIterator<Item = (K, ModelHandle)>) {
        let before = self.len();
        let mut written = 0usize;
        for (key, model) in models {
            self.insert(key, model);
            written += 1;
        }
        debug!(
            written,
            added = self.len() - before,
            total = self.len(),
            "registered models"
        );
    }

    /// Looks up a model by name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if no model has this name.
    pub fn get(&self, key: &str) -> Result<&ModelHandle, RegistryError> {
        self.index
            .get(key)
            .map(|&slot| &self.entries[slot].1)
            .ok_or_else(|| RegistryError::NotFound {
                key: key.to_owned(),
            })
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Registered names, in registration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Registered entries, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ModelHandle)> {
        self.entries.iter().map(|(key, model)| (key.as_str(), model))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelRegistry")
            .field("keys", &self.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<K: Into<String>> FromIterator<(K, ModelHandle)> for ModelRegistry {
    fn from_iter<I: IntoIterator<Item = (K, ModelHandle)>>(iter: I) -> Self {
        let mut registry = Self::new();
        registry.register(iter);
        registry
    }
}
