use crate::clauses::{TruncateClauses, TruncateOptions};
use crate::config;
use crate::dialect::Dialect;
use crate::error::{BuildError, BuildResult};
use crate::expr::{ColumnList, IntoColumns};
use crate::render::Statement;
use crate::value::Value;

/// A TRUNCATE statement builder.
#[derive(Debug, Clone)]
pub struct TruncateDataset {
    dialect: Dialect,
    clauses: TruncateClauses,
    prepared: bool,
    error: Option<BuildError>,
}

impl TruncateDataset {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            clauses: TruncateClauses::new(),
            prepared: config::config().default_prepared,
            error: None,
        }
    }

    fn with_clauses(&self, clauses: TruncateClauses) -> Self {
        Self {
            dialect: self.dialect.clone(),
            clauses,
            prepared: self.prepared,
            error: self.error.clone(),
        }
    }

    fn with_options(&self, f: impl FnOnce(&mut TruncateOptions)) -> Self {
        let mut options = self.clauses.options().clone();
        f(&mut options);
        self.with_clauses(self.clauses.set_options(options))
    }

    // ==================== Dataset state ====================

    pub fn with_dialect(&self, name: &str) -> Self {
        self.set_dialect(Dialect::named(name))
    }

    pub fn set_dialect(&self, dialect: Dialect) -> Self {
        Self {
            dialect,
            ..self.clone()
        }
    }

    pub fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    /// TRUNCATE carries no values, so this never changes the output.
    pub fn prepared(&self, prepared: bool) -> Self {
        Self {
            prepared,
            ..self.clone()
        }
    }

    pub fn is_prepared(&self) -> bool {
        self.prepared
    }

    pub fn set_error(&self, err: BuildError) -> Self {
        Self {
            error: super::first_error(&self.error, err),
            ..self.clone()
        }
    }

    pub fn error(&self) -> Option<&BuildError> {
        self.error.as_ref()
    }

    pub fn clauses(&self) -> &TruncateClauses {
        &self.clauses
    }

    pub fn to_sql(&self) -> BuildResult<(String, Vec<Value>)> {
        super::to_sql(
            Statement::Truncate(&self.clauses),
            &self.dialect,
            self.prepared,
            self.error.as_ref(),
        )
    }

    // ==================== Clauses ====================

    pub fn table(&self, tables: impl IntoColumns) -> Self {
        self.with_clauses(self.clauses.set_tables(ColumnList::new(tables)))
    }

    pub fn options(&self, options: TruncateOptions) -> Self {
        self.with_clauses(self.clauses.set_options(options))
    }

    pub fn cascade(&self) -> Self {
        self.with_options(|o| o.cascade = true)
    }

    pub fn no_cascade(&self) -> Self {
        self.with_options(|o| o.cascade = false)
    }

    pub fn restrict(&self) -> Self {
        self.with_options(|o| o.restrict = true)
    }

    pub fn no_restrict(&self) -> Self {
        self.with_options(|o| o.restrict = false)
    }

    /// `RESTART` or `CONTINUE`; written upper-cased before `IDENTITY`.
    pub fn identity(&self, identity: &str) -> Self {
        self.with_options(|o| o.identity = identity.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ds() -> TruncateDataset {
        TruncateDataset::new(Dialect::default()).table(["items", "orders"])
    }

    #[test]
    fn truncate_options() {
        assert_eq!(ds().to_sql().unwrap().0, r#"TRUNCATE "items", "orders""#);
        assert_eq!(
            ds().identity("restart").cascade().to_sql().unwrap().0,
            r#"TRUNCATE "items", "orders" RESTART IDENTITY CASCADE"#
        );
        assert_eq!(
            ds().restrict().to_sql().unwrap().0,
            r#"TRUNCATE "items", "orders" RESTRICT"#
        );
        assert_eq!(
            ds().cascade().restrict().no_cascade().to_sql().unwrap().0,
            r#"TRUNCATE "items", "orders" RESTRICT"#
        );
    }

    #[test]
    fn no_tables_is_an_error() {
        let err = TruncateDataset::new(Dialect::default()).to_sql().unwrap_err();
        assert_eq!(
            err.to_string(),
            "builder: no source found when generating truncate sql"
        );
    }
}
