//! Name to dialect-options registry.
//!
//! A [`DialectRegistry`] can be created and passed around explicitly. The
//! process-wide instance behind [`global`] is seeded from every
//! [`DialectRegistration`] submitted through `inventory`, which is how the
//! built-in dialects become available without any setup call.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use super::options::DialectOptions;

/// Startup registration of a named dialect.
///
/// ```ignore
/// inventory::submit! {
///     sqlforge::DialectRegistration { name: "cockroach", options: cockroach_options }
/// }
/// ```
pub struct DialectRegistration {
    pub name: &'static str,
    pub options: fn() -> DialectOptions,
}

inventory::collect!(DialectRegistration);

/// Read-mostly map of dialect names to their options.
#[derive(Debug, Default)]
pub struct DialectRegistry {
    dialects: RwLock<HashMap<String, Arc<DialectOptions>>>,
}

impl DialectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every `inventory`-submitted dialect.
    pub fn with_registered() -> Self {
        let registry = Self::new();
        for reg in inventory::iter::<DialectRegistration> {
            registry.register(reg.name, (reg.options)());
        }
        registry
    }

    /// Register or replace a dialect. Names are case-insensitive.
    pub fn register(&self, name: &str, options: DialectOptions) {
        let name = name.to_ascii_lowercase();
        #[cfg(feature = "tracing")]
        tracing::trace!(target: "sqlforge.dialect", dialect = %name, "register dialect");
        self.write().insert(name, Arc::new(options));
    }

    pub fn lookup(&self, name: &str) -> Option<Arc<DialectOptions>> {
        self.read().get(&name.to_ascii_lowercase()).cloned()
    }

    /// Remove a dialect, returning its options if it was registered.
    pub fn deregister(&self, name: &str) -> Option<Arc<DialectOptions>> {
        let name = name.to_ascii_lowercase();
        #[cfg(feature = "tracing")]
        tracing::trace!(target: "sqlforge.dialect", dialect = %name, "deregister dialect");
        self.write().remove(&name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.read().keys().cloned().collect();
        names.sort();
        names
    }

    // A panic while holding the lock cannot leave the map half-written.
    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, Arc<DialectOptions>>> {
        self.dialects.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, Arc<DialectOptions>>> {
        self.dialects.write().unwrap_or_else(PoisonError::into_inner)
    }
}

static GLOBAL: LazyLock<DialectRegistry> = LazyLock::new(DialectRegistry::with_registered);

/// The process-wide registry.
pub fn global() -> &'static DialectRegistry {
    &GLOBAL
}

pub fn register_dialect(name: &str, options: DialectOptions) {
    global().register(name, options);
}

pub fn lookup_dialect(name: &str) -> Option<Arc<DialectOptions>> {
    global().lookup(name)
}

pub fn deregister_dialect(name: &str) -> Option<Arc<DialectOptions>> {
    global().deregister(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_are_seeded() {
        let registry = DialectRegistry::with_registered();
        assert_eq!(
            registry.names(),
            vec!["default", "mysql", "mysql8", "postgres", "sqlite3"]
        );
    }

    #[test]
    fn register_lookup_deregister() {
        let registry = DialectRegistry::new();
        assert!(registry.lookup("custom").is_none());

        registry.register(
            "Custom",
            DialectOptions {
                quote_char: '[',
                ..DialectOptions::default()
            },
        );
        let found = registry.lookup("custom").unwrap();
        assert_eq!(found.quote_char, '[');

        assert!(registry.deregister("custom").is_some());
        assert!(registry.lookup("custom").is_none());
        assert!(registry.deregister("custom").is_none());
    }

    #[test]
    fn register_replaces_existing() {
        let registry = DialectRegistry::with_registered();
        registry.register(
            "postgres",
            DialectOptions {
                supports_returning: false,
                ..DialectOptions::default()
            },
        );
        assert!(!registry.lookup("postgres").unwrap().supports_returning);
    }
}
