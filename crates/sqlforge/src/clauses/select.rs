use crate::expr::{
    ColumnList, CommonTable, Compound, Expr, ExpressionList, IntoColumns, Join, ListKind, Lock,
    Window,
};
use crate::ident::Ident;

/// Contents of every clause of a SELECT.
///
/// Every mutator returns a new container and leaves `self` untouched.
#[derive(Debug, Clone, Default)]
pub struct SelectClauses {
    common_tables: Vec<CommonTable>,
    select: ColumnList,
    distinct: Option<ColumnList>,
    from: ColumnList,
    joins: Vec<Join>,
    where_: Option<ExpressionList>,
    alias: Option<Ident>,
    group_by: ColumnList,
    having: Option<ExpressionList>,
    order: ColumnList,
    limit: Option<Expr>,
    offset: u64,
    compounds: Vec<Compound>,
    lock: Option<Lock>,
    windows: Vec<Window>,
}

impl SelectClauses {
    pub fn new() -> Self {
        Self::default()
    }

    fn with(&self, f: impl FnOnce(&mut Self)) -> Self {
        let mut next = self.clone();
        f(&mut next);
        next
    }

    // ==================== WITH ====================

    pub fn common_tables(&self) -> &[CommonTable] {
        &self.common_tables
    }

    pub fn common_tables_append(&self, cte: CommonTable) -> Self {
        self.with(|c| c.common_tables.push(cte))
    }

    pub fn clear_common_tables(&self) -> Self {
        self.with(|c| c.common_tables.clear())
    }

    // ==================== SELECT ====================

    pub fn select(&self) -> &ColumnList {
        &self.select
    }

    /// True when no columns were chosen, i.e. `SELECT *`.
    pub fn is_default_select(&self) -> bool {
        self.select.is_empty()
    }

    pub fn set_select(&self, cols: ColumnList) -> Self {
        self.with(|c| c.select = cols)
    }

    pub fn select_append(&self, cols: impl IntoColumns) -> Self {
        self.with(|c| c.select = std::mem::take(&mut c.select).append(cols))
    }

    pub fn clear_select(&self) -> Self {
        self.with(|c| c.select = ColumnList::empty())
    }

    pub fn distinct(&self) -> Option<&ColumnList> {
        self.distinct.as_ref()
    }

    /// `Some(empty)` is plain DISTINCT; non-empty is DISTINCT ON.
    pub fn set_distinct(&self, distinct: Option<ColumnList>) -> Self {
        self.with(|c| c.distinct = distinct)
    }

    // ==================== FROM ====================

    pub fn from(&self) -> &ColumnList {
        &self.from
    }

    pub fn set_from(&self, from: ColumnList) -> Self {
        self.with(|c| c.from = from)
    }

    pub fn has_sources(&self) -> bool {
        !self.from.is_empty()
    }

    pub fn alias(&self) -> Option<&Ident> {
        self.alias.as_ref()
    }

    pub fn set_alias(&self, alias: Option<Ident>) -> Self {
        self.with(|c| c.alias = alias)
    }

    // ==================== JOIN ====================

    pub fn joins(&self) -> &[Join] {
        &self.joins
    }

    pub fn joins_append(&self, join: Join) -> Self {
        self.with(|c| c.joins.push(join))
    }

    pub fn clear_joins(&self) -> Self {
        self.with(|c| c.joins.clear())
    }

    // ==================== WHERE / HAVING ====================

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

    pub fn having(&self) -> Option<&ExpressionList> {
        self.having.as_ref().filter(|h| !h.is_empty())
    }

    pub fn having_append<I, E>(&self, conditions: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Expr>,
    {
        self.with(|c| c.having = Some(append_and(c.having.take(), conditions)))
    }

    pub fn clear_having(&self) -> Self {
        self.with(|c| c.having = None)
    }

    // ==================== GROUP BY ====================

    pub fn group_by(&self) -> &ColumnList {
        &self.group_by
    }

    pub fn set_group_by(&self, cols: ColumnList) -> Self {
        self.with(|c| c.group_by = cols)
    }

    pub fn group_by_append(&self, cols: impl IntoColumns) -> Self {
        self.with(|c| c.group_by = std::mem::take(&mut c.group_by).append(cols))
    }

    // ==================== WINDOW ====================

    pub fn windows(&self) -> &[Window] {
        &self.windows
    }

    pub fn set_windows(&self, windows: Vec<Window>) -> Self {
        self.with(|c| c.windows = windows)
    }

    pub fn windows_append(&self, windows: Vec<Window>) -> Self {
        self.with(|c| c.windows.extend(windows))
    }

    pub fn clear_windows(&self) -> Self {
        self.with(|c| c.windows.clear())
    }

    // ==================== compounds ====================

    pub fn compounds(&self) -> &[Compound] {
        &self.compounds
    }

    pub fn compounds_append(&self, compound: Compound) -> Self {
        self.with(|c| c.compounds.push(compound))
    }

    pub fn has_compounds(&self) -> bool {
        !self.compounds.is_empty()
    }

    // ==================== ORDER BY ====================

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

    // ==================== LIMIT / OFFSET ====================

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

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn set_offset(&self, offset: u64) -> Self {
        self.with(|c| c.offset = offset)
    }

    pub fn clear_offset(&self) -> Self {
        self.with(|c| c.offset = 0)
    }

    // ==================== locking ====================

    pub fn lock(&self) -> Option<&Lock> {
        self.lock.as_ref()
    }

    pub fn set_lock(&self, lock: Option<Lock>) -> Self {
        self.with(|c| c.lock = lock)
    }
}

pub(crate) fn append_and<I, E>(current: Option<ExpressionList>, conditions: I) -> ExpressionList
where
    I: IntoIterator<Item = E>,
    E: Into<Expr>,
{
    match current {
        Some(list) => list.append(conditions),
        None => ExpressionList::new(ListKind::And, conditions),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{col, table};

    #[test]
    fn mutators_copy() {
        let base = SelectClauses::new().set_from(ColumnList::new("test"));
        let with_where = base.where_append([col("a").eq(1)]);
        assert!(!base.has_where());
        assert!(with_where.has_where());
        assert!(base.has_sources());
    }

    #[test]
    fn where_appends_into_one_list() {
        let c = SelectClauses::new()
            .where_append([col("a").eq(1)])
            .where_append([col("b").eq(2)]);
        assert_eq!(c.where_().unwrap().len(), 2);
        assert!(!c.clear_where().has_where());
    }

    #[test]
    fn empty_where_is_absent() {
        let c = SelectClauses::new().where_append(Vec::<Expr>::new());
        assert!(!c.has_where());
    }

    #[test]
    fn order_prepend_goes_first() {
        let c = SelectClauses::new()
            .order_append(col("a").asc())
            .order_prepend(col("b").desc());
        assert_eq!(c.order().len(), 2);
        assert!(matches!(&c.order().items()[0], Expr::Ordered(_)));
    }

    #[test]
    fn select_defaults_to_star() {
        let c = SelectClauses::new();
        assert!(c.is_default_select());
        let c = c.select_append(("a", table("t").col("b")));
        assert!(!c.is_default_select());
        assert_eq!(c.select().len(), 2);
        assert!(c.clear_select().is_default_select());
    }

    #[test]
    fn offset_zero_clears() {
        let c = SelectClauses::new().set_offset(10);
        assert_eq!(c.offset(), 10);
        assert_eq!(c.clear_offset().offset(), 0);
    }
}
