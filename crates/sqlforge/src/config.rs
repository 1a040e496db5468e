//! Process-wide builder settings.

use std::fmt;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use chrono::{FixedOffset, Offset, Utc};
use heck::{ToLowerCamelCase, ToSnakeCase};

/// Function applied to untagged field names to derive their column names.
#[derive(Clone)]
pub struct ColumnRename(Arc<dyn Fn(&str) -> String + Send + Sync>);

impl ColumnRename {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// ASCII lowercase (the default).
    pub fn lowercase() -> Self {
        Self::new(|name| name.to_ascii_lowercase())
    }

    pub fn snake_case() -> Self {
        Self::new(|name| name.to_snake_case())
    }

    pub fn camel_case() -> Self {
        Self::new(|name| name.to_lower_camel_case())
    }

    /// Leave field names untouched.
    pub fn identity() -> Self {
        Self::new(str::to_owned)
    }

    pub fn apply(&self, name: &str) -> String {
        (self.0)(name)
    }
}

impl Default for ColumnRename {
    fn default() -> Self {
        Self::lowercase()
    }
}

impl fmt::Debug for ColumnRename {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ColumnRename(..)")
    }
}

/// Settings shared by every dataset and render.
///
/// A render takes one snapshot at its start, so swapping the configuration
/// mid-render never mixes old and new settings.
#[derive(Debug, Clone)]
pub struct BuilderConfig {
    /// Timestamps are converted to this offset before being written.
    pub time_zone: FixedOffset,
    pub column_rename: ColumnRename,
    /// Skip fields that carry no column-name tag.
    pub ignore_untagged_fields: bool,
    /// Tag namespace holding column names.
    pub column_tag: String,
    /// Tag namespace holding `skipinsert`, `skipupdate`, `defaultifempty`.
    pub directive_tag: String,
    /// Initial prepared flag for new datasets.
    pub default_prepared: bool,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            time_zone: utc(),
            column_rename: ColumnRename::default(),
            ignore_untagged_fields: false,
            column_tag: "db".to_string(),
            directive_tag: "builder".to_string(),
            default_prepared: false,
        }
    }
}

impl BuilderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_time_zone(mut self, tz: FixedOffset) -> Self {
        self.time_zone = tz;
        self
    }

    pub fn with_column_rename(mut self, rename: ColumnRename) -> Self {
        self.column_rename = rename;
        self
    }

    pub fn with_ignore_untagged_fields(mut self, ignore: bool) -> Self {
        self.ignore_untagged_fields = ignore;
        self
    }

    pub fn with_column_tag(mut self, tag: impl Into<String>) -> Self {
        self.column_tag = tag.into();
        self
    }

    pub fn with_directive_tag(mut self, tag: impl Into<String>) -> Self {
        self.directive_tag = tag.into();
        self
    }

    pub fn with_default_prepared(mut self, prepared: bool) -> Self {
        self.default_prepared = prepared;
        self
    }
}

fn utc() -> FixedOffset {
    Utc.fix()
}

static CONFIG: LazyLock<RwLock<Arc<BuilderConfig>>> =
    LazyLock::new(|| RwLock::new(Arc::new(BuilderConfig::default())));

/// Snapshot of the current configuration.
pub fn config() -> Arc<BuilderConfig> {
    CONFIG
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Replace the configuration and drop every cached column map.
pub fn set_config(config: BuilderConfig) {
    *CONFIG.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(config);
    crate::column_map::clear_cache();
}

fn update(f: impl FnOnce(&mut BuilderConfig)) {
    let mut next = (*config()).clone();
    f(&mut next);
    set_config(next);
}

pub fn set_time_zone(tz: FixedOffset) {
    update(|c| c.time_zone = tz);
}

pub fn set_column_rename_function<F>(f: F)
where
    F: Fn(&str) -> String + Send + Sync + 'static,
{
    update(|c| c.column_rename = ColumnRename::new(f));
}

pub fn set_ignore_untagged_fields(ignore: bool) {
    update(|c| c.ignore_untagged_fields = ignore);
}

pub fn set_default_prepared(prepared: bool) {
    update(|c| c.default_prepared = prepared);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rename_helpers() {
        assert_eq!(ColumnRename::lowercase().apply("UserName"), "username");
        assert_eq!(ColumnRename::snake_case().apply("UserName"), "user_name");
        assert_eq!(ColumnRename::camel_case().apply("user_name"), "userName");
        assert_eq!(ColumnRename::identity().apply("UserName"), "UserName");
    }

    #[test]
    fn builder_methods() {
        let cfg = BuilderConfig::new()
            .with_column_tag("col")
            .with_ignore_untagged_fields(true)
            .with_default_prepared(true);
        assert_eq!(cfg.column_tag, "col");
        assert_eq!(cfg.directive_tag, "builder");
        assert!(cfg.ignore_untagged_fields);
        assert!(cfg.default_prepared);
        assert_eq!(cfg.time_zone.local_minus_utc(), 0);
    }
}
