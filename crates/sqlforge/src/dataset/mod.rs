//! Datasets: the caller-facing statement builders.
//!
//! A dataset pairs a dialect with the clauses of one statement. Like the
//! clause containers underneath, every method takes `&self` and returns a
//! new dataset, so a base query can be shared and refined freely:
//!
//! ```ignore
//! use sqlforge::{col, from};
//!
//! let base = from("items").where_([col("active").is_true()]);
//! let cheap = base.where_([col("price").lt(10)]);
//! let (sql, _) = cheap.to_sql()?;
//! assert_eq!(sql, r#"SELECT * FROM "items" WHERE (("active" IS TRUE) AND ("price" < 10))"#);
//! ```
//!
//! Errors raised while building (a record that cannot be mapped, an
//! explicit [`SelectDataset::set_error`]) are held by the dataset and
//! returned from `to_sql`. Only the first one is kept.

mod delete;
mod insert;
mod select;
mod truncate;
mod update;

pub use delete::DeleteDataset;
pub use insert::InsertDataset;
pub use select::SelectDataset;
pub use truncate::TruncateDataset;
pub use update::UpdateDataset;

use crate::dialect::Dialect;
use crate::error::{BuildError, BuildResult};
use crate::expr::{IntoColumnExpr, IntoColumns};
use crate::render::{Statement, render};
use crate::value::Value;

/// Dataset constructors bound to one dialect.
///
/// ```ignore
/// let pg = sqlforge::dialect("postgres");
/// let (sql, args) = pg.from("items").prepared(true).where_([col("id").eq(1)]).to_sql()?;
/// assert_eq!(sql, r#"SELECT * FROM "items" WHERE ("id" = $1)"#);
/// ```
#[derive(Debug, Clone)]
pub struct DialectWrapper {
    dialect: Dialect,
}

impl DialectWrapper {
    pub fn new(name: &str) -> Self {
        Self {
            dialect: Dialect::named(name),
        }
    }

    pub fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    pub fn from(&self, tables: impl IntoColumns) -> SelectDataset {
        SelectDataset::new(self.dialect.clone()).from(tables)
    }

    pub fn select(&self, cols: impl IntoColumns) -> SelectDataset {
        SelectDataset::new(self.dialect.clone()).select(cols)
    }

    pub fn insert(&self, table: impl IntoColumnExpr) -> InsertDataset {
        InsertDataset::new(self.dialect.clone()).into_table(table)
    }

    pub fn update(&self, table: impl IntoColumnExpr) -> UpdateDataset {
        UpdateDataset::new(self.dialect.clone()).table(table)
    }

    pub fn delete(&self, table: impl IntoColumnExpr) -> DeleteDataset {
        DeleteDataset::new(self.dialect.clone()).from(table)
    }

    pub fn truncate(&self, tables: impl IntoColumns) -> TruncateDataset {
        TruncateDataset::new(self.dialect.clone()).table(tables)
    }
}

/// Constructors for the named dialect. Unknown names get the `default`
/// dialect's rules.
pub fn dialect(name: &str) -> DialectWrapper {
    DialectWrapper::new(name)
}

/// `SELECT * FROM tables` in the default dialect.
pub fn from(tables: impl IntoColumns) -> SelectDataset {
    SelectDataset::new(Dialect::default()).from(tables)
}

/// A SELECT without a FROM clause, e.g. `select(lit("NOW()"))`.
pub fn select(cols: impl IntoColumns) -> SelectDataset {
    SelectDataset::new(Dialect::default()).select(cols)
}

pub fn insert(table: impl IntoColumnExpr) -> InsertDataset {
    InsertDataset::new(Dialect::default()).into_table(table)
}

pub fn update(table: impl IntoColumnExpr) -> UpdateDataset {
    UpdateDataset::new(Dialect::default()).table(table)
}

pub fn delete(table: impl IntoColumnExpr) -> DeleteDataset {
    DeleteDataset::new(Dialect::default()).from(table)
}

pub fn truncate(tables: impl IntoColumns) -> TruncateDataset {
    TruncateDataset::new(Dialect::default()).table(tables)
}

/// Keep `current` if set, otherwise take `err`.
fn first_error(current: &Option<BuildError>, err: BuildError) -> Option<BuildError> {
    Some(current.clone().unwrap_or(err))
}

/// Render a dataset's statement, or return the error it already holds.
fn to_sql(
    statement: Statement<'_>,
    dialect: &Dialect,
    prepared: bool,
    error: Option<&BuildError>,
) -> BuildResult<(String, Vec<Value>)> {
    let result = match error {
        Some(err) => Err(err.clone()),
        None => render(statement, dialect, prepared),
    };
    #[cfg(feature = "tracing")]
    log_render(statement, dialect, prepared, &result);
    result
}

#[cfg(feature = "tracing")]
fn log_render(
    statement: Statement<'_>,
    dialect: &Dialect,
    prepared: bool,
    result: &BuildResult<(String, Vec<Value>)>,
) {
    match result {
        Ok((sql, args)) => tracing::debug!(
            target: "sqlforge.sql",
            statement = statement.kind(),
            dialect = dialect.name(),
            prepared,
            param_count = args.len(),
            sql = %sql,
            "rendered statement"
        ),
        Err(err) => tracing::debug!(
            target: "sqlforge.sql",
            statement = statement.kind(),
            dialect = dialect.name(),
            prepared,
            error = %err,
            "failed to render statement"
        ),
    }
}
