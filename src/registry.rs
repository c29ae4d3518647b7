//! Named, shared parser instances.
//!
//! Callers that can own a [`Parser`] should; the registry exists for call
//! sites that only have a name to go by. Entries are created on first
//! request with default options and live as long as the registry.

use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use rustc_hash::FxHashMap;

use crate::{Options, Parser};

/// Name used by [`instance`] callers that do not care.
pub const DEFAULT_INSTANCE: &str = "default";

static GLOBAL: OnceLock<Registry> = OnceLock::new();

/// A map from name to shared parser, safe to use from many threads.
#[derive(Debug, Default)]
pub struct Registry {
    parsers: Mutex<FxHashMap<String, Arc<Parser>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry, created on first use.
    pub fn global() -> &'static Registry {
        GLOBAL.get_or_init(Registry::new)
    }

    /// The parser registered under `name`, created with default options on
    /// first request. Concurrent first requests get the same parser.
    pub fn get_or_create(&self, name: &str) -> Arc<Parser> {
        self.get_or_insert_with(name, Options::default)
    }

    /// Like [`Registry::get_or_create`], with the options a new entry gets.
    /// An existing entry keeps its options.
    pub fn get_or_insert_with<F>(&self, name: &str, options: F) -> Arc<Parser>
    where
        F: FnOnce() -> Options,
    {
        let mut parsers = self.parsers.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(parser) = parsers.get(name) {
            return Arc::clone(parser);
        }
        log::debug!("registering parser instance {name:?}");
        let parser = Arc::new(Parser::new(options()));
        parsers.insert(name.to_string(), Arc::clone(&parser));
        parser
    }

    pub fn get(&self, name: &str) -> Option<Arc<Parser>> {
        let parsers = self.parsers.lock().unwrap_or_else(PoisonError::into_inner);
        parsers.get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.parsers.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Shared parser `name` from the global registry.
///
/// ```
/// let a = blockdown::instance("docs");
/// let b = blockdown::instance("docs");
/// assert!(std::sync::Arc::ptr_eq(&a, &b));
/// ```
pub fn instance(name: &str) -> Arc<Parser> {
    Registry::global().get_or_create(name)
}
