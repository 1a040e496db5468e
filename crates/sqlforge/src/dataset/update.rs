use crate::clauses::UpdateClauses;
use crate::config;
use crate::dialect::Dialect;
use crate::error::{BuildError, BuildResult};
use crate::expr::{ColumnList, CommonTable, Expr, IntoColumnExpr, IntoColumns, Query, lit};
use crate::render::Statement;
use crate::row::AsRow;
use crate::value::Value;

/// An UPDATE statement builder.
#[derive(Debug, Clone)]
pub struct UpdateDataset {
    dialect: Dialect,
    clauses: UpdateClauses,
    prepared: bool,
    error: Option<BuildError>,
}

impl UpdateDataset {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            clauses: UpdateClauses::new(),
            prepared: config::config().default_prepared,
            error: None,
        }
    }

    fn with_clauses(&self, clauses: UpdateClauses) -> Self {
        Self {
            dialect: self.dialect.clone(),
            clauses,
            prepared: self.prepared,
            error: self.error.clone(),
        }
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

    pub fn clauses(&self) -> &UpdateClauses {
        &self.clauses
    }

    pub fn set_clauses(&self, clauses: UpdateClauses) -> Self {
        self.with_clauses(clauses)
    }

    pub fn to_sql(&self) -> BuildResult<(String, Vec<Value>)> {
        super::to_sql(
            Statement::Update(&self.clauses),
            &self.dialect,
            self.prepared,
            self.error.as_ref(),
        )
    }

    // ==================== WITH ====================

    pub fn with(&self, name: &str, query: impl Into<Query>) -> Self {
        self.with_common_table(CommonTable::new(false, name, query))
    }

    pub fn with_recursive(&self, name: &str, query: impl Into<Query>) -> Self {
        self.with_common_table(CommonTable::new(true, name, query))
    }

    pub(crate) fn with_common_table(&self, cte: CommonTable) -> Self {
        self.with_clauses(self.clauses.common_tables_append(cte))
    }

    // ==================== Target / SET ====================

    pub fn table(&self, table: impl IntoColumnExpr) -> Self {
        self.with_clauses(self.clauses.set_table(table.into_column_expr()))
    }

    /// Alias the target table: `UPDATE "items" AS "i"`.
    pub fn as_(&self, alias: &str) -> Self {
        match self.clauses.table() {
            Some(table) => self.with_clauses(self.clauses.set_table(table.clone().as_(alias))),
            None => self.clone(),
        }
    }

    /// Replace the SET list with the update columns of a record or row.
    ///
    /// Assignments are written in column order. A record that fails to map
    /// sets the dataset error.
    pub fn set(&self, values: impl AsRow) -> Self {
        match values.update_row() {
            Ok(row) => self.with_clauses(self.clauses.set_set_values(row.to_assignments())),
            Err(err) => self.set_error(err),
        }
    }

    /// Extra tables: `UPDATE t SET .. FROM others`, or `UPDATE t,others SET ..`
    /// depending on the dialect.
    pub fn from(&self, tables: impl IntoColumns) -> Self {
        self.with_clauses(self.clauses.set_from(ColumnList::new(tables)))
    }

    // ==================== WHERE / ORDER / LIMIT ====================

    pub fn where_<I, E>(&self, conditions: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Expr>,
    {
        self.with_clauses(self.clauses.where_append(conditions))
    }

    pub fn clear_where(&self) -> Self {
        self.with_clauses(self.clauses.clear_where())
    }

    pub fn order(&self, order: impl IntoColumns) -> Self {
        self.with_clauses(self.clauses.set_order(ColumnList::new(order)))
    }

    pub fn order_append(&self, order: impl IntoColumns) -> Self {
        self.with_clauses(self.clauses.order_append(order))
    }

    pub fn order_prepend(&self, order: impl IntoColumns) -> Self {
        self.with_clauses(self.clauses.order_prepend(order))
    }

    pub fn clear_order(&self) -> Self {
        self.with_clauses(self.clauses.clear_order())
    }

    /// `LIMIT n`; zero clears the limit.
    pub fn limit(&self, limit: u64) -> Self {
        if limit == 0 {
            return self.clear_limit();
        }
        self.limit_expr(Expr::from(limit))
    }

    pub fn limit_all(&self) -> Self {
        self.limit_expr(Expr::from(lit("ALL")))
    }

    pub(crate) fn limit_expr(&self, limit: Expr) -> Self {
        self.with_clauses(self.clauses.set_limit(limit))
    }

    pub fn clear_limit(&self) -> Self {
        self.with_clauses(self.clauses.clear_limit())
    }

    pub fn returning(&self, cols: impl IntoColumns) -> Self {
        self.with_clauses(self.clauses.set_returning(ColumnList::new(cols)))
    }
}
