use crate::expr::{ColumnList, CommonTable, Conflict, Expr, IntoColumns, Query};
use crate::ident::Ident;
use crate::row::Row;

/// Contents of every clause of an INSERT.
#[derive(Debug, Clone, Default)]
pub struct InsertClauses {
    common_tables: Vec<CommonTable>,
    into: Option<Expr>,
    alias: Option<Ident>,
    cols: ColumnList,
    vals: Vec<Vec<Expr>>,
    rows: Vec<Row>,
    from: Option<Box<Query>>,
    on_conflict: Option<Conflict>,
    returning: ColumnList,
}

impl InsertClauses {
    pub fn new() -> Self {
        Self::default()
    }

    fn with(&self, f: impl FnOnce(&mut Self)) -> Self {
        let mut next = self.clone();
        f(&mut next);
        next
    }

    pub fn common_tables(&self) -> &[CommonTable] {
        &self.common_tables
    }

    pub fn common_tables_append(&self, cte: CommonTable) -> Self {
        self.with(|c| c.common_tables.push(cte))
    }

    pub fn into_table(&self) -> Option<&Expr> {
        self.into.as_ref()
    }

    pub fn set_into_table(&self, into: Expr) -> Self {
        self.with(|c| c.into = Some(into))
    }

    /// Written as `INTO table AS alias`; MySQL upserts refer to it.
    pub fn alias(&self) -> Option<&Ident> {
        self.alias.as_ref()
    }

    pub fn set_alias(&self, alias: Option<Ident>) -> Self {
        self.with(|c| c.alias = alias)
    }

    pub fn cols(&self) -> &ColumnList {
        &self.cols
    }

    pub fn has_cols(&self) -> bool {
        !self.cols.is_empty()
    }

    pub fn set_cols(&self, cols: ColumnList) -> Self {
        self.with(|c| c.cols = cols)
    }

    pub fn cols_append(&self, cols: impl IntoColumns) -> Self {
        self.with(|c| c.cols = std::mem::take(&mut c.cols).append(cols))
    }

    pub fn clear_cols(&self) -> Self {
        self.with(|c| c.cols = ColumnList::empty())
    }

    pub fn vals(&self) -> &[Vec<Expr>] {
        &self.vals
    }

    pub fn has_vals(&self) -> bool {
        !self.vals.is_empty()
    }

    pub fn set_vals(&self, vals: Vec<Vec<Expr>>) -> Self {
        self.with(|c| c.vals = vals)
    }

    pub fn vals_append(&self, vals: Vec<Vec<Expr>>) -> Self {
        self.with(|c| c.vals.extend(vals))
    }

    pub fn clear_vals(&self) -> Self {
        self.with(|c| c.vals.clear())
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn has_rows(&self) -> bool {
        !self.rows.is_empty()
    }

    pub fn set_rows(&self, rows: Vec<Row>) -> Self {
        self.with(|c| c.rows = rows)
    }

    pub fn clear_rows(&self) -> Self {
        self.with(|c| c.rows.clear())
    }

    pub fn from(&self) -> Option<&Query> {
        self.from.as_deref()
    }

    pub fn has_from(&self) -> bool {
        self.from.is_some()
    }

    pub fn set_from(&self, from: Option<Query>) -> Self {
        self.with(|c| c.from = from.map(Box::new))
    }

    pub fn on_conflict(&self) -> Option<&Conflict> {
        self.on_conflict.as_ref()
    }

    pub fn set_on_conflict(&self, conflict: Option<Conflict>) -> Self {
        self.with(|c| c.on_conflict = conflict)
    }

    pub fn returning(&self) -> &ColumnList {
        &self.returning
    }

    pub fn has_returning(&self) -> bool {
        !self.returning.is_empty()
    }

    pub fn set_returning(&self, cols: ColumnList) -> Self {
        self.with(|c| c.returning = cols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_copy_on_write() {
        let base = InsertClauses::new().set_into_table(crate::expr::table("items").into());
        let with_rows = base.set_rows(vec![Row::new().set("a", 1)]);
        assert!(!base.has_rows());
        assert!(with_rows.has_rows());
        assert!(with_rows.into_table().is_some());
    }

    #[test]
    fn vals_append() {
        let c = InsertClauses::new()
            .vals_append(vec![vec![Expr::from(1)]])
            .vals_append(vec![vec![Expr::from(2)]]);
        assert_eq!(c.vals().len(), 2);
        assert!(!c.clear_vals().has_vals());
    }
}
