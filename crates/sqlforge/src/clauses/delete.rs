use super::select::append_and;
use crate::expr::{ColumnList, CommonTable, Expr, ExpressionList, IntoColumns};

/// Contents of every clause of a DELETE.
#[derive(Debug, Clone, Default)]
pub struct DeleteClauses {
    common_tables: Vec<CommonTable>,
    from: Option<Expr>,
    where_: Option<ExpressionList>,
    order: ColumnList,
    limit: Option<Expr>,
    returning: ColumnList,
}

impl DeleteClauses {
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

    pub fn from(&self) -> Option<&Expr> {
        self.from.as_ref()
    }

    pub fn set_from(&self, from: Expr) -> Self {
        self.with(|c| c.from = Some(from))
    }

    pub fn where_(&self) -> Option<&ExpressionList> {
        self.where_.as_ref().filter(|w| !w.is_empty())
    }

    pub fn has_where(&self) -> bool {
        self.where_().is_some()
    }

    pub fn where_append<I, E>(&self, conditions: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Expr>,
    {
        self.with(|c| c.where_ = Some(append_and(c.where_.take(), conditions)))
    }

    pub fn clear_where(&self) -> Self {
        self.with(|c| c.where_ = None)
    }

    pub fn order(&self) -> &ColumnList {
        &self.order
    }

    pub fn has_order(&self) -> bool {
        !self.order.is_empty()
    }

    pub fn set_order(&self, order: ColumnList) -> Self {
        self.with(|c| c.order = order)
    }

    pub fn order_append(&self, order: impl IntoColumns) -> Self {
        self.with(|c| c.order = std::mem::take(&mut c.order).append(order))
    }

    pub fn order_prepend(&self, order: impl IntoColumns) -> Self {
        self.with(|c| c.order = std::mem::take(&mut c.order).prepend(order))
    }

    pub fn clear_order(&self) -> Self {
        self.with(|c| c.order = ColumnList::empty())
    }

    pub fn limit(&self) -> Option<&Expr> {
        self.limit.as_ref()
    }

    pub fn has_limit(&self) -> bool {
        self.limit.is_some()
    }

    pub fn set_limit(&self, limit: Expr) -> Self {
        self.with(|c| c.limit = Some(limit))
    }

    pub fn clear_limit(&self) -> Self {
        self.with(|c| c.limit = None)
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
