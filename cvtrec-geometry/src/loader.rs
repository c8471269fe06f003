//! One-time, thread-safe geometry initialization.
//!
//! The first [`GeometryLoader::load`] builds the geometry; every later call,
//! from any thread, returns the same shared snapshot and ignores its
//! configuration argument. Readers never observe a partially built model.

use crate::config::GeometryConfig;
use crate::model::Geometry;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

/// Guards a single geometry construction.
#[derive(Debug, Default)]
pub struct GeometryLoader {
    geometry: OnceLock<Arc<Geometry>>,
    builds: AtomicUsize,
}

impl GeometryLoader {
    /// Creates an empty loader.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            geometry: OnceLock::new(),
            builds: AtomicUsize::new(0),
        }
    }

    /// Builds the geometry on first use and returns the shared snapshot.
    pub fn load(&self, config: &GeometryConfig) -> Arc<Geometry> {
        Arc::clone(self.geometry.get_or_init(|| {
            self.builds.fetch_add(1, Ordering::Relaxed);
            Arc::new(Geometry::new(config))
        }))
    }

    /// Returns the geometry if it has been loaded.
    #[must_use]
    pub fn get(&self) -> Option<Arc<Geometry>> {
        self.geometry.get().cloned()
    }

    /// True once the geometry has been built.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.geometry.get().is_some()
    }

    /// Number of constructions performed by this loader.
    #[must_use]
    pub fn builds(&self) -> usize {
        self.builds.load(Ordering::Relaxed)
    }

    /// Drops the loaded geometry so the next `load` rebuilds it.
    ///
    /// Requires exclusive access; meant for tests that switch configurations.
    pub fn reset(&mut self) -> Option<Arc<Geometry>> {
        self.geometry.take()
    }
}

static GLOBAL: GeometryLoader = GeometryLoader::new();

/// Loads the process-wide geometry. Only the first call's configuration is used.
pub fn load(config: &GeometryConfig) -> Arc<Geometry> {
    GLOBAL.load(config)
}

/// Returns the process-wide geometry if [`load`] has run.
#[must_use]
pub fn loaded() -> Option<Arc<Geometry>> {
    GLOBAL.get()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_load_is_noop() {
        let loader = GeometryLoader::new();
        assert!(!loader.is_loaded());

        let first = loader.load(&GeometryConfig::new().with_simulation(true));
        let second = loader.load(&GeometryConfig::default());

        assert!(Arc::ptr_eq(&first, &second));
        assert!(second.config().simulation);
        assert_eq!(loader.builds(), 1);
        assert!(loader.is_loaded());
    }

    #[test]
    fn test_reset_allows_rebuild() {
        let mut loader = GeometryLoader::new();
        let simulated = loader.load(&GeometryConfig::new().with_simulation(true));

        let dropped = loader.reset().expect("geometry was loaded");
        assert!(Arc::ptr_eq(&simulated, &dropped));
        assert!(!loader.is_loaded());

        let hardware = loader.load(&GeometryConfig::default());
        assert!(!hardware.config().simulation);
        assert_eq!(loader.builds(), 2);
    }

    #[test]
    fn test_global_loader() {
        let geometry = load(&GeometryConfig::default());
        let again = loaded().expect("loaded above");
        assert!(Arc::ptr_eq(&geometry, &again));
    }
}
