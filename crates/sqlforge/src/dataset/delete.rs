use crate::clauses::DeleteClauses;
use crate::config;
use crate::dialect::Dialect;
use crate::error::{BuildError, BuildResult};
use crate::expr::{ColumnList, CommonTable, Expr, IntoColumnExpr, IntoColumns, Query, lit};
use crate::render::Statement;
use crate::value::Value;

/// A DELETE statement builder.
#[derive(Debug, Clone)]
pub struct DeleteDataset {
    dialect: Dialect,
    clauses: DeleteClauses,
    prepared: bool,
    error: Option<BuildError>,
}

impl DeleteDataset {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            clauses: DeleteClauses::new(),
            prepared: config::config().default_prepared,
            error: None,
        }
    }

    fn with_clauses(&self, clauses: DeleteClauses) -> Self {
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

    pub fn clauses(&self) -> &DeleteClauses {
        &self.clauses
    }

    pub fn set_clauses(&self, clauses: DeleteClauses) -> Self {
        self.with_clauses(clauses)
    }

    pub fn to_sql(&self) -> BuildResult<(String, Vec<Value>)> {
        super::to_sql(
            Statement::Delete(&self.clauses),
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

    // ==================== Clauses ====================

    pub fn from(&self, table: impl IntoColumnExpr) -> Self {
        self.with_clauses(self.clauses.set_from(table.into_column_expr()))
    }

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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::col;

    #[test]
    fn delete_with_where_and_returning() {
        let (sql, args) = DeleteDataset::new(Dialect::named("postgres"))
            .from("items")
            .where_([col("id").gt(10)])
            .returning(col("id"))
            .prepared(true)
            .to_sql()
            .unwrap();
        assert_eq!(sql, r#"DELETE FROM "items" WHERE ("id" > $1) RETURNING "id""#);
        assert_eq!(args, vec![Value::Int(10)]);
    }

    #[test]
    fn limit_is_rejected_by_default() {
        let err = DeleteDataset::new(Dialect::default())
            .from("items")
            .limit(1)
            .to_sql()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "builder: dialect does not support LIMIT on DELETE [dialect=default]"
        );
    }

    #[test]
    fn missing_table_is_an_error() {
        let err = DeleteDataset::new(Dialect::default()).to_sql().unwrap_err();
        assert_eq!(
            err.to_string(),
            "builder: no source found when generating delete sql"
        );
    }
}
