use crate::clauses::InsertClauses;
use crate::config;
use crate::dialect::Dialect;
use crate::error::{BuildError, BuildResult};
use crate::expr::{ColumnList, CommonTable, Conflict, Expr, IntoColumnExpr, IntoColumns, Query};
use crate::ident::Ident;
use crate::render::Statement;
use crate::row::{AsRow, Row};
use crate::value::Value;

/// An INSERT statement builder.
///
/// Values come from exactly one source, checked in this order: rows,
/// explicit columns with values, a query, or nothing (`DEFAULT VALUES`).
#[derive(Debug, Clone)]
pub struct InsertDataset {
    dialect: Dialect,
    clauses: InsertClauses,
    prepared: bool,
    error: Option<BuildError>,
}

impl InsertDataset {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            clauses: InsertClauses::new(),
            prepared: config::config().default_prepared,
            error: None,
        }
    }

    fn with_clauses(&self, clauses: InsertClauses) -> Self {
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

    /// Record an error; an earlier one is kept.
    pub fn set_error(&self, err: BuildError) -> Self {
        Self {
            error: super::first_error(&self.error, err),
            ..self.clone()
        }
    }

    pub fn error(&self) -> Option<&BuildError> {
        self.error.as_ref()
    }

    pub fn clauses(&self) -> &InsertClauses {
        &self.clauses
    }

    pub fn set_clauses(&self, clauses: InsertClauses) -> Self {
        self.with_clauses(clauses)
    }

    pub fn to_sql(&self) -> BuildResult<(String, Vec<Value>)> {
        super::to_sql(
            Statement::Insert(&self.clauses),
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

    // ==================== Target ====================

    /// The table to insert into.
    pub fn into_table(&self, table: impl IntoColumnExpr) -> Self {
        self.with_clauses(self.clauses.set_into_table(table.into_column_expr()))
    }

    /// `INSERT INTO "table" AS "alias"`.
    pub fn as_(&self, alias: &str) -> Self {
        self.with_clauses(self.clauses.set_alias(Some(Ident::table_only(alias))))
    }

    // ==================== Values ====================

    /// Replace the column list used with [`vals`](Self::vals) or
    /// [`from_query`](Self::from_query).
    pub fn cols(&self, cols: impl IntoColumns) -> Self {
        self.with_clauses(self.clauses.set_cols(ColumnList::new(cols)))
    }

    pub fn cols_append(&self, cols: impl IntoColumns) -> Self {
        self.with_clauses(self.clauses.cols_append(cols))
    }

    pub fn clear_cols(&self) -> Self {
        self.with_clauses(self.clauses.clear_cols())
    }

    /// Append value rows, one per item of `rows`.
    ///
    /// ```ignore
    /// insert("items").cols(["name", "price"]).vals([[val("a"), val(1)], [val("b"), val(2)]]);
    /// ```
    pub fn vals<I, R, E>(&self, rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = E>,
        E: Into<Expr>,
    {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();
        self.with_clauses(self.clauses.vals_append(rows))
    }

    pub fn clear_vals(&self) -> Self {
        self.with_clauses(self.clauses.clear_vals())
    }

    /// Insert records or rows. Columns come from the first row, and every
    /// row must supply the same columns.
    ///
    /// A record that fails to map sets the dataset error.
    pub fn rows<I, R>(&self, rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: AsRow,
    {
        let rows: BuildResult<Vec<Row>> = rows.into_iter().map(|r| r.insert_row()).collect();
        match rows {
            Ok(rows) => self.with_clauses(self.clauses.set_rows(rows)),
            Err(err) => self.set_error(err),
        }
    }

    pub fn clear_rows(&self) -> Self {
        self.with_clauses(self.clauses.clear_rows())
    }

    /// `INSERT INTO t [(cols)] SELECT ...`.
    pub fn from_query(&self, query: impl Into<Query>) -> Self {
        self.with_clauses(self.clauses.set_from(Some(query.into())))
    }

    // ==================== Conflicts / RETURNING ====================

    pub fn on_conflict(&self, conflict: Conflict) -> Self {
        self.with_clauses(self.clauses.set_on_conflict(Some(conflict)))
    }

    pub fn clear_on_conflict(&self) -> Self {
        self.with_clauses(self.clauses.set_on_conflict(None))
    }

    pub fn returning(&self, cols: impl IntoColumns) -> Self {
        self.with_clauses(self.clauses.set_returning(ColumnList::new(cols)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{col, do_nothing, val};

    fn ds() -> InsertDataset {
        InsertDataset::new(Dialect::default()).into_table("items")
    }

    #[test]
    fn rows_render_sorted_columns() {
        let (sql, args) = ds()
            .rows([
                Row::from([("name", "Test1"), ("address", "111 Test Addr")]),
                Row::from([("name", "Test2"), ("address", "112 Test Addr")]),
            ])
            .to_sql()
            .unwrap();
        assert_eq!(
            sql,
            r#"INSERT INTO "items" ("address", "name") VALUES ('111 Test Addr', 'Test1'), ('112 Test Addr', 'Test2')"#
        );
        assert!(args.is_empty());
    }

    #[test]
    fn cols_and_vals() {
        let (sql, _) = ds()
            .cols(["name", "price"])
            .vals([[val("a"), val(1)]])
            .vals([[val("b"), val(2)]])
            .to_sql()
            .unwrap();
        assert_eq!(
            sql,
            r#"INSERT INTO "items" ("name", "price") VALUES ('a', 1), ('b', 2)"#
        );
    }

    #[test]
    fn no_values_means_default_values() {
        let (sql, _) = ds().to_sql().unwrap();
        assert_eq!(sql, r#"INSERT INTO "items" DEFAULT VALUES"#);
    }

    #[test]
    fn missing_table_is_an_error() {
        let err = InsertDataset::new(Dialect::default()).to_sql().unwrap_err();
        assert_eq!(
            err.to_string(),
            "builder: no source found when generating insert sql"
        );
    }

    #[test]
    fn conflict_and_returning() {
        let (sql, _) = ds()
            .rows([Row::new().set("name", "a")])
            .on_conflict(do_nothing())
            .returning(col("id"))
            .to_sql()
            .unwrap();
        assert_eq!(
            sql,
            r#"INSERT INTO "items" ("name") VALUES ('a') ON CONFLICT DO NOTHING RETURNING "id""#
        );
    }
}
