use super::{DeleteDataset, InsertDataset, TruncateDataset, UpdateDataset};
use crate::clauses::SelectClauses;
use crate::column_map::{ColumnMap, Record};
use crate::config;
use crate::dialect::Dialect;
use crate::error::{BuildError, BuildResult};
use crate::expr::{
    ColumnList, CommonTable, Compound, CompoundKind, Expr, IntoColumnExpr, IntoColumns, Join,
    JoinCondition, JoinKind, Lock, LockStrength, Query, WaitOption, Window, lit,
};
use crate::ident::Ident;
use crate::render::Statement;
use crate::value::Value;

/// A SELECT statement builder.
#[derive(Debug, Clone)]
pub struct SelectDataset {
    dialect: Dialect,
    clauses: SelectClauses,
    prepared: bool,
    error: Option<BuildError>,
}

impl SelectDataset {
    /// An empty SELECT (`SELECT *`) for `dialect`.
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            clauses: SelectClauses::new(),
            prepared: config::config().default_prepared,
            error: None,
        }
    }

    fn with_clauses(&self, clauses: SelectClauses) -> Self {
        Self {
            dialect: self.dialect.clone(),
            clauses,
            prepared: self.prepared,
            error: self.error.clone(),
        }
    }

    // ==================== Dataset state ====================

    /// Switch to a registered dialect by name.
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

    /// Render values as placeholders plus arguments.
    pub fn prepared(&self, prepared: bool) -> Self {
        Self {
            prepared,
            ..self.clone()
        }
    }

    pub fn is_prepared(&self) -> bool {
        self.prepared
    }

    /// Record an error to be returned by [`to_sql`](Self::to_sql). An
    /// earlier error is kept.
    pub fn set_error(&self, err: BuildError) -> Self {
        Self {
            error: super::first_error(&self.error, err),
            ..self.clone()
        }
    }

    pub fn error(&self) -> Option<&BuildError> {
        self.error.as_ref()
    }

    pub fn clauses(&self) -> &SelectClauses {
        &self.clauses
    }

    pub fn set_clauses(&self, clauses: SelectClauses) -> Self {
        self.with_clauses(clauses)
    }

    /// Render to SQL text and arguments.
    pub fn to_sql(&self) -> BuildResult<(String, Vec<Value>)> {
        super::to_sql(
            Statement::Select(&self.clauses),
            &self.dialect,
            self.prepared,
            self.error.as_ref(),
        )
    }

    // ==================== WITH ====================

    /// Add a common table expression. `name` is written as-is and may carry
    /// a column list, e.g. `"nums(x)"`.
    pub fn with(&self, name: &str, query: impl Into<Query>) -> Self {
        self.with_clauses(
            self.clauses
                .common_tables_append(CommonTable::new(false, name, query)),
        )
    }

    pub fn with_recursive(&self, name: &str, query: impl Into<Query>) -> Self {
        self.with_clauses(
            self.clauses
                .common_tables_append(CommonTable::new(true, name, query)),
        )
    }

    // ==================== SELECT ====================

    /// Replace the selected columns. An empty list means `*`.
    pub fn select(&self, cols: impl IntoColumns) -> Self {
        let cols = ColumnList::new(cols);
        if cols.is_empty() {
            return self.clear_select();
        }
        self.with_clauses(self.clauses.set_select(cols))
    }

    /// Select every mapped column of `T`.
    pub fn select_record<T: Record>(&self) -> Self {
        let map = ColumnMap::of::<T>();
        let cols: Vec<String> = map.cols().into_iter().map(str::to_owned).collect();
        self.select(cols)
    }

    pub fn select_append(&self, cols: impl IntoColumns) -> Self {
        self.with_clauses(self.clauses.select_append(cols))
    }

    /// Back to `SELECT *`, dropping any DISTINCT.
    pub fn clear_select(&self) -> Self {
        self.with_clauses(self.clauses.clear_select().set_distinct(None))
    }

    /// `SELECT DISTINCT`.
    pub fn distinct(&self) -> Self {
        self.with_clauses(self.clauses.set_distinct(Some(ColumnList::empty())))
    }

    /// `SELECT DISTINCT ON (cols)`.
    pub fn distinct_on(&self, cols: impl IntoColumns) -> Self {
        self.with_clauses(self.clauses.set_distinct(Some(ColumnList::new(cols))))
    }

    // ==================== FROM ====================

    /// Replace the FROM list.
    ///
    /// Unaliased sub-selects are aliased `t1`, `t2`, ... in order.
    pub fn from(&self, tables: impl IntoColumns) -> Self {
        let mut counter = 0;
        let items = tables
            .into_columns()
            .into_iter()
            .map(|item| match item {
                Expr::Query(query) => match *query {
                    Query::Select(ds) if ds.clauses.alias().is_none() => {
                        counter += 1;
                        Expr::from(ds.as_(&format!("t{counter}")))
                    }
                    other => Expr::Query(Box::new(other)),
                },
                other => other,
            })
            .collect();
        self.with_clauses(self.clauses.set_from(ColumnList::from_exprs(items)))
    }

    /// `SELECT * FROM (self) AS "t1"`.
    pub fn from_self(&self) -> Self {
        let outer = Self {
            dialect: self.dialect.clone(),
            clauses: SelectClauses::new(),
            prepared: self.prepared,
            error: None,
        };
        outer.from(self.clone())
    }

    /// [`from_self`](Self::from_self) when this query has an ORDER BY or a
    /// LIMIT, which a compound member cannot carry directly.
    pub fn compound_from_self(&self) -> Self {
        if self.clauses.has_order() || self.clauses.has_limit() {
            self.from_self()
        } else {
            self.clone()
        }
    }

    /// Alias this query for use as a sub-select.
    pub fn as_(&self, alias: &str) -> Self {
        self.with_clauses(self.clauses.set_alias(Some(Ident::table_only(alias))))
    }

    // ==================== JOIN ====================

    /// Add a join of any kind.
    pub fn join_with(
        &self,
        kind: JoinKind,
        table: impl IntoColumnExpr,
        condition: JoinCondition,
    ) -> Self {
        self.with_clauses(self.clauses.joins_append(Join::new(
            kind,
            table.into_column_expr(),
            condition,
        )))
    }

    /// `INNER JOIN`. Same as [`inner_join`](Self::inner_join).
    pub fn join(&self, table: impl IntoColumnExpr, condition: JoinCondition) -> Self {
        self.join_with(JoinKind::Inner, table, condition)
    }

    pub fn inner_join(&self, table: impl IntoColumnExpr, condition: JoinCondition) -> Self {
        self.join_with(JoinKind::Inner, table, condition)
    }

    pub fn left_join(&self, table: impl IntoColumnExpr, condition: JoinCondition) -> Self {
        self.join_with(JoinKind::Left, table, condition)
    }

    pub fn left_outer_join(&self, table: impl IntoColumnExpr, condition: JoinCondition) -> Self {
        self.join_with(JoinKind::LeftOuter, table, condition)
    }

    pub fn right_join(&self, table: impl IntoColumnExpr, condition: JoinCondition) -> Self {
        self.join_with(JoinKind::Right, table, condition)
    }

    pub fn right_outer_join(&self, table: impl IntoColumnExpr, condition: JoinCondition) -> Self {
        self.join_with(JoinKind::RightOuter, table, condition)
    }

    pub fn full_join(&self, table: impl IntoColumnExpr, condition: JoinCondition) -> Self {
        self.join_with(JoinKind::Full, table, condition)
    }

    pub fn full_outer_join(&self, table: impl IntoColumnExpr, condition: JoinCondition) -> Self {
        self.join_with(JoinKind::FullOuter, table, condition)
    }

    pub fn natural_join(&self, table: impl IntoColumnExpr) -> Self {
        self.join_with(JoinKind::Natural, table, JoinCondition::None)
    }

    pub fn natural_left_join(&self, table: impl IntoColumnExpr) -> Self {
        self.join_with(JoinKind::NaturalLeft, table, JoinCondition::None)
    }

    pub fn natural_right_join(&self, table: impl IntoColumnExpr) -> Self {
        self.join_with(JoinKind::NaturalRight, table, JoinCondition::None)
    }

    pub fn natural_full_join(&self, table: impl IntoColumnExpr) -> Self {
        self.join_with(JoinKind::NaturalFull, table, JoinCondition::None)
    }

    pub fn cross_join(&self, table: impl IntoColumnExpr) -> Self {
        self.join_with(JoinKind::Cross, table, JoinCondition::None)
    }

    // ==================== WHERE / GROUP BY / HAVING ====================

    /// AND the conditions onto the WHERE clause.
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

    pub fn group_by(&self, cols: impl IntoColumns) -> Self {
        self.with_clauses(self.clauses.set_group_by(ColumnList::new(cols)))
    }

    pub fn group_by_append(&self, cols: impl IntoColumns) -> Self {
        self.with_clauses(self.clauses.group_by_append(cols))
    }

    /// AND the conditions onto the HAVING clause.
    pub fn having<I, E>(&self, conditions: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Expr>,
    {
        self.with_clauses(self.clauses.having_append(conditions))
    }

    pub fn clear_having(&self) -> Self {
        self.with_clauses(self.clauses.clear_having())
    }

    // ==================== WINDOW ====================

    /// Replace the named windows.
    pub fn window(&self, windows: impl IntoIterator<Item = Window>) -> Self {
        self.with_clauses(self.clauses.set_windows(windows.into_iter().collect()))
    }

    pub fn window_append(&self, windows: impl IntoIterator<Item = Window>) -> Self {
        self.with_clauses(self.clauses.windows_append(windows.into_iter().collect()))
    }

    pub fn clear_window(&self) -> Self {
        self.with_clauses(self.clauses.clear_windows())
    }

    // ==================== Compounds ====================

    pub fn union(&self, other: &SelectDataset) -> Self {
        self.with_compound(CompoundKind::Union, other)
    }

    pub fn union_all(&self, other: &SelectDataset) -> Self {
        self.with_compound(CompoundKind::UnionAll, other)
    }

    pub fn intersect(&self, other: &SelectDataset) -> Self {
        self.with_compound(CompoundKind::Intersect, other)
    }

    pub fn intersect_all(&self, other: &SelectDataset) -> Self {
        self.with_compound(CompoundKind::IntersectAll, other)
    }

    fn with_compound(&self, kind: CompoundKind, other: &SelectDataset) -> Self {
        let base = self.compound_from_self();
        let rhs = other.compound_from_self();
        base.with_clauses(base.clauses.compounds_append(Compound::new(kind, rhs)))
    }

    // ==================== ORDER / LIMIT / OFFSET ====================

    /// Replace the ORDER BY list.
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
        self.with_clauses(self.clauses.set_limit(Expr::from(limit)))
    }

    /// `LIMIT ALL`.
    pub fn limit_all(&self) -> Self {
        self.with_clauses(self.clauses.set_limit(Expr::from(lit("ALL"))))
    }

    pub fn clear_limit(&self) -> Self {
        self.with_clauses(self.clauses.clear_limit())
    }

    /// `OFFSET n`; zero clears the offset.
    pub fn offset(&self, offset: u64) -> Self {
        self.with_clauses(self.clauses.set_offset(offset))
    }

    pub fn clear_offset(&self) -> Self {
        self.with_clauses(self.clauses.clear_offset())
    }

    // ==================== Locking ====================

    pub fn for_update(&self, wait: WaitOption) -> Self {
        self.lock(Lock::new(LockStrength::Update, wait))
    }

    pub fn for_no_key_update(&self, wait: WaitOption) -> Self {
        self.lock(Lock::new(LockStrength::NoKeyUpdate, wait))
    }

    pub fn for_share(&self, wait: WaitOption) -> Self {
        self.lock(Lock::new(LockStrength::Share, wait))
    }

    pub fn for_key_share(&self, wait: WaitOption) -> Self {
        self.lock(Lock::new(LockStrength::KeyShare, wait))
    }

    /// Set a row lock, e.g. one restricted with [`Lock::of`].
    pub fn lock(&self, lock: Lock) -> Self {
        self.with_clauses(self.clauses.set_lock(Some(lock)))
    }

    pub fn clear_lock(&self) -> Self {
        self.with_clauses(self.clauses.set_lock(None))
    }

    // ==================== Conversions ====================

    /// An INSERT into the first FROM table, keeping the common tables.
    pub fn insert(&self) -> InsertDataset {
        let mut ds = InsertDataset::new(self.dialect.clone()).prepared(self.prepared);
        if let Some(table) = self.clauses.from().items().first() {
            ds = ds.into_table(table.clone());
        }
        for cte in self.clauses.common_tables() {
            ds = ds.with_common_table(cte.clone());
        }
        self.carry_error(ds, InsertDataset::set_error)
    }

    /// An UPDATE of the first FROM table, keeping the common tables and the
    /// WHERE, ORDER BY and LIMIT clauses.
    pub fn update(&self) -> UpdateDataset {
        let mut ds = UpdateDataset::new(self.dialect.clone()).prepared(self.prepared);
        if let Some(table) = self.clauses.from().items().first() {
            ds = ds.table(table.clone());
        }
        for cte in self.clauses.common_tables() {
            ds = ds.with_common_table(cte.clone());
        }
        if let Some(where_) = self.clauses.where_() {
            ds = ds.where_([Expr::from(where_.clone())]);
        }
        ds = ds.order(self.clauses.order().clone());
        if let Some(limit) = self.clauses.limit() {
            ds = ds.limit_expr(limit.clone());
        }
        self.carry_error(ds, UpdateDataset::set_error)
    }

    /// A DELETE from the first FROM table, keeping the common tables and
    /// the WHERE, ORDER BY and LIMIT clauses.
    pub fn delete(&self) -> DeleteDataset {
        let mut ds = DeleteDataset::new(self.dialect.clone()).prepared(self.prepared);
        if let Some(table) = self.clauses.from().items().first() {
            ds = ds.from(table.clone());
        }
        for cte in self.clauses.common_tables() {
            ds = ds.with_common_table(cte.clone());
        }
        if let Some(where_) = self.clauses.where_() {
            ds = ds.where_([Expr::from(where_.clone())]);
        }
        ds = ds.order(self.clauses.order().clone());
        if let Some(limit) = self.clauses.limit() {
            ds = ds.limit_expr(limit.clone());
        }
        self.carry_error(ds, DeleteDataset::set_error)
    }

    /// A TRUNCATE of every FROM table.
    pub fn truncate(&self) -> TruncateDataset {
        let ds = TruncateDataset::new(self.dialect.clone()).table(self.clauses.from().clone());
        self.carry_error(ds, TruncateDataset::set_error)
    }

    fn carry_error<D>(&self, ds: D, set_error: fn(&D, BuildError) -> D) -> D {
        match &self.error {
            Some(err) => set_error(&ds, err.clone()),
            None => ds,
        }
    }
}

impl Default for SelectDataset {
    fn default() -> Self {
        Self::new(Dialect::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::col;

    fn sql(ds: &SelectDataset) -> String {
        ds.to_sql().unwrap().0
    }

    #[test]
    fn builders_leave_the_base_untouched() {
        let base = SelectDataset::default().from("test");
        let filtered = base.where_([col("a").eq(1)]);
        assert_eq!(sql(&base), r#"SELECT * FROM "test""#);
        assert_eq!(sql(&filtered), r#"SELECT * FROM "test" WHERE ("a" = 1)"#);
    }

    #[test]
    fn sub_selects_in_from_get_generated_aliases() {
        let inner = SelectDataset::default().from("test");
        let ds = SelectDataset::default().from(vec![inner.clone(), inner.as_("named"), inner]);
        assert_eq!(
            sql(&ds),
            r#"SELECT * FROM (SELECT * FROM "test") AS "t1", (SELECT * FROM "test") AS "named", (SELECT * FROM "test") AS "t2""#
        );
    }

    #[test]
    fn from_self_wraps_the_query() {
        let ds = SelectDataset::default().from("test").from_self();
        assert_eq!(sql(&ds), r#"SELECT * FROM (SELECT * FROM "test") AS "t1""#);
    }

    #[test]
    fn empty_select_means_star() {
        let ds = SelectDataset::default()
            .from("test")
            .select(["a"])
            .distinct()
            .select(());
        assert_eq!(sql(&ds), r#"SELECT * FROM "test""#);
    }

    #[test]
    fn zero_limit_and_offset_clear() {
        let ds = SelectDataset::default().from("test").limit(10).offset(5);
        assert_eq!(sql(&ds), r#"SELECT * FROM "test" LIMIT 10 OFFSET 5"#);
        assert_eq!(sql(&ds.limit(0).offset(0)), r#"SELECT * FROM "test""#);
    }

    #[test]
    fn first_error_wins() {
        let ds = SelectDataset::default()
            .from("test")
            .set_error(BuildError::message("first"))
            .set_error(BuildError::message("second"));
        assert_eq!(ds.to_sql().unwrap_err().to_string(), "builder: first");
    }

    #[test]
    fn conversions_keep_filters() {
        let ds = SelectDataset::default()
            .from("items")
            .where_([col("id").gt(10)]);
        let (delete, _) = ds.delete().to_sql().unwrap();
        assert_eq!(delete, r#"DELETE FROM "items" WHERE ("id" > 10)"#);
        let (truncate, _) = ds.truncate().to_sql().unwrap();
        assert_eq!(truncate, r#"TRUNCATE "items""#);
    }
}
