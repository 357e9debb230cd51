// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Secrets Engines Registry
//!
//! Ordered set of named secrets engines exposed through
//! [`crate::Client::secrets`]. Built-in engines always come first;
//! extensions append their own engines after them and can never replace,
//! reorder or shadow an existing one.
//!
//! # Architecture
//!
//! - **Layer:** Infrastructure
//! - **Purpose:** Engine registration and typed lookup

pub mod kv;
pub mod transit;

use std::any::Any;
use std::sync::Arc;

use crate::adapter::Adapter;
use crate::error::VaultError;

pub use kv::KvV2;
pub use transit::TransitApi;

/// A capability module mounted on the client.
pub trait SecretsEngine: Any + Send + Sync {
    /// Registry name, e.g. `kv`
    fn name(&self) -> &'static str;

    fn as_any(&self) -> &dyn Any;
}

/// Constructor for an engine bound to the client's adapter.
pub type EngineFactory = fn(Arc<dyn Adapter>) -> Arc<dyn SecretsEngine>;

pub struct SecretsEngines {
    engines: Vec<Arc<dyn SecretsEngine>>,
}

impl SecretsEngines {
    /// Engines every client carries, in registration order.
    pub const IMPLEMENTED: &'static [EngineFactory] = &[KvV2::factory];

    /// Registry with only the built-in engines
    pub fn new(adapter: Arc<dyn Adapter>) -> Self {
        let engines = Self::IMPLEMENTED
            .iter()
            .map(|factory| factory(adapter.clone()))
            .collect();
        Self { engines }
    }

    /// Registry with the built-in engines followed by `extra`, in order.
    ///
    /// Fails if any name would be registered twice.
    pub fn with_engines(
        adapter: Arc<dyn Adapter>,
        extra: &[EngineFactory],
    ) -> Result<Self, VaultError> {
        let mut registry = Self::new(adapter.clone());
        for factory in extra {
            registry.push(factory(adapter.clone()))?;
        }
        Ok(registry)
    }

    fn push(&mut self, engine: Arc<dyn SecretsEngine>) -> Result<(), VaultError> {
        if self.get(engine.name()).is_some() {
            return Err(VaultError::DuplicateEngine(engine.name().to_string()));
        }
        self.engines.push(engine);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn SecretsEngine>> {
        self.engines.iter().find(|engine| engine.name() == name)
    }

    /// Typed lookup of a registered engine
    pub fn engine<T: SecretsEngine>(&self) -> Result<&T, VaultError> {
        self.engines
            .iter()
            .find_map(|engine| engine.as_any().downcast_ref::<T>())
            .ok_or_else(|| VaultError::UnknownEngine(std::any::type_name::<T>().to_string()))
    }

    pub fn kv(&self) -> Result<&KvV2, VaultError> {
        self.engine::<KvV2>()
    }

    /// Engine names in registration order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.engines.iter().map(|engine| engine.name())
    }

    pub fn len(&self) -> usize {
        self.engines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.engines.is_empty()
    }
}

impl std::fmt::Debug for SecretsEngines {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::JsonAdapter;
    use crate::config::ClientConfig;

    struct Dummy;

    impl SecretsEngine for Dummy {
        fn name(&self) -> &'static str {
            "dummy"
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    fn dummy_factory(_adapter: Arc<dyn Adapter>) -> Arc<dyn SecretsEngine> {
        Arc::new(Dummy)
    }

    fn adapter() -> Arc<dyn Adapter> {
        Arc::new(JsonAdapter::from_config(&ClientConfig::default()).unwrap())
    }

    #[test]
    fn test_builtin_engines() {
        let registry = SecretsEngines::new(adapter());
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["kv"]);
        assert!(registry.kv().is_ok());
        assert!(registry.engine::<Dummy>().is_err());
    }

    #[test]
    fn test_extra_engines_are_appended() {
        let registry = SecretsEngines::with_engines(adapter(), &[dummy_factory]).unwrap();
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["kv", "dummy"]);
        assert_eq!(registry.len(), 2);
        assert!(registry.get("dummy").is_some());
        assert!(registry.engine::<Dummy>().is_ok());
        assert!(registry.kv().is_ok());
    }

    #[test]
    fn test_duplicate_engine_rejected() {
        let err = SecretsEngines::with_engines(adapter(), &[dummy_factory, dummy_factory])
            .unwrap_err();
        assert!(matches!(err, VaultError::DuplicateEngine(name) if name == "dummy"));

        let err = SecretsEngines::with_engines(adapter(), &[KvV2::factory]).unwrap_err();
        assert!(matches!(err, VaultError::DuplicateEngine(name) if name == "kv"));
    }
}
