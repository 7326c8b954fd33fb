use std::sync::{Arc, RwLock, RwLockReadGuard};

use super::{ModelHandle, ModelRegistry, RegistryError};

/// A registry shared between training code and evaluators.
///
/// Any number of readers may hold the registry at once; an update waits for
/// them to finish and excludes everyone else while it runs.
#[derive(Debug, Clone, Default)]
pub struct SharedRegistry {
    inner: Arc<RwLock<ModelRegistry>>,
}

impl SharedRegistry {
    #[must_use]
    pub fn new(registry: ModelRegistry) -> Self {
        Self {
            inner: Arc::new(RwLock::new(registry)),
        }
    }

    /// Acquires shared read access.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Poisoned`] if a writer panicked.
    pub fn read(&self) -> Result<RwLockReadGuard<'_, ModelRegistry>, RegistryError> {
        self.inner.read().map_err(|_| RegistryError::Poisoned)
    }

    /// Merge-inserts `models` under exclusive access.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Poisoned`] if a writer panicked.
    pub fn update<K: Into<String>>(
        &self,
        models: impl IntoIterator<Item = (K, ModelHandle)>,
    ) -> Result<(), RegistryError> {
        let mut registry = self.inner.write().map_err(|_| RegistryError::Poisoned)?;
        registry.register(models);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::thread;

    use crate::models::cpinn::core::test_support::{constant, handle};

    #[test]
    fn clones_share_state() {
        let shared = SharedRegistry::default();
        let trainer = shared.clone();

        trainer.update([("Model1", handle(constant(1.0)))]).unwrap();

        assert_eq!(shared.read().unwrap().len(), 1);
    }

    #[test]
    fn concurrent_updates_are_all_applied() {
        let shared = SharedRegistry::default();

        thread::scope(|s| {
            for i in 0u8..8 {
                let shared = &shared;
                s.spawn(move || {
                    let key = format!("Model{}", i + 1);
                    shared.update([(key, handle(constant(f64::from(i))))]).unwrap();
                });
            }
        });

        let registry = shared.read().unwrap();
        assert_eq!(registry.len(), 8);
        assert!((1..=8).all(|i| registry.contains(&format!("Model{i}"))));
    }
}
