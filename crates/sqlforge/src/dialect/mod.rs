//! Dialects: named bundles of rendering rules and capability flags.

mod builtin;
mod options;
mod registry;

use std::fmt;
use std::sync::Arc;

pub use builtin::{
    default_options, mysql_options, mysql8_options, postgres_options, sqlite3_options,
};
pub use options::{DialectOptions, SqlFragment, TimeFormat};
pub use registry::{
    DialectRegistration, DialectRegistry, deregister_dialect, global, lookup_dialect,
    register_dialect,
};

use crate::error::BuildError;

/// A resolved dialect: its name and a shared snapshot of its options.
#[derive(Clone)]
pub struct Dialect {
    name: Arc<str>,
    options: Arc<DialectOptions>,
}

impl Dialect {
    pub fn new(name: &str, options: DialectOptions) -> Self {
        Self {
            name: Arc::from(name),
            options: Arc::new(options),
        }
    }

    /// Resolve a registered dialect, falling back to `default` options when
    /// the name is unknown. The name is kept either way.
    pub fn named(name: &str) -> Self {
        let options = lookup_dialect(name)
            .or_else(|| lookup_dialect("default"))
            .unwrap_or_else(|| Arc::new(DialectOptions::default()));
        Self {
            name: Arc::from(name.to_ascii_lowercase()),
            options,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn options(&self) -> &DialectOptions {
        &self.options
    }

    pub(crate) fn unsupported(&self, feature: &'static str) -> BuildError {
        BuildError::unsupported(feature, self.name.as_ref())
    }
}

impl Default for Dialect {
    fn default() -> Self {
        Self::named("default")
    }
}

impl fmt::Debug for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dialect").field("name", &self.name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_names_fall_back_to_default_options() {
        let d = Dialect::named("nope");
        assert_eq!(d.name(), "nope");
        assert_eq!(d.options().quote_char, '"');
    }

    #[test]
    fn named_dialects_resolve() {
        assert_eq!(Dialect::named("mysql").options().quote_char, '`');
        assert_eq!(Dialect::default().name(), "default");
    }
}
