//! Named protocol factories.
//!
//! Codec backends register a factory under a short name; callers create
//! instances by name without linking against the concrete type. A process
//! normally uses the global registry through the free functions; [`Registry`]
//! instances exist for tests and embedders that want isolation.

use std::collections::HashMap;
use std::sync::{Mutex, OnceLock, PoisonError};

use crate::error::{ProtocolError, ProtocolResult};
use crate::Protocol;

/// Constructs a fresh protocol instance.
pub type ProtocolFactory = Box<dyn Fn() -> ProtocolResult<Box<dyn Protocol>> + Send + Sync>;

/// A name-to-factory table.
#[derive(Default)]
pub struct Registry {
    factories: HashMap<&'static str, ProtocolFactory>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a factory under `name`.
    ///
    /// # Panics
    ///
    /// Panics if `name` is already registered. Registration happens once at
    /// startup; a duplicate is a wiring bug, not a runtime condition.
    pub fn register(&mut self, name: &'static str, factory: ProtocolFactory) {
        assert!(
            self.factories.insert(name, factory).is_none(),
            "protocol {name} registered twice"
        );
    }

    /// Creates a protocol instance by name.
    pub fn create(&self, name: &str) -> ProtocolResult<Box<dyn Protocol>> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| ProtocolError::UnknownProtocol {
                name: name.to_string(),
                available: self.names().iter().map(ToString::to_string).collect(),
            })?;
        factory()
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

fn global() -> &'static Mutex<Registry> {
    static GLOBAL: OnceLock<Mutex<Registry>> = OnceLock::new();
    GLOBAL.get_or_init(|| Mutex::new(Registry::new()))
}

fn lock_global() -> std::sync::MutexGuard<'static, Registry> {
    global().lock().unwrap_or_else(PoisonError::into_inner)
}

/// Registers a factory in the process-wide registry.
///
/// # Panics
///
/// Panics if `name` is already registered.
pub fn register(name: &'static str, factory: ProtocolFactory) {
    lock_global().register(name, factory);
}

/// Creates a protocol instance from the process-wide registry.
pub fn create(name: &str) -> ProtocolResult<Box<dyn Protocol>> {
    lock_global().create(name)
}

/// Names registered in the process-wide registry, sorted.
#[must_use]
pub fn names() -> Vec<&'static str> {
    lock_global().names()
}
