//! AND/OR lists and ordered column lists.

use super::{Expr, IntoColumns, ListKind};

/// Conditions joined by AND or OR.
///
/// Empty children (empty lists, empty `Ex`/`ExOr` maps) are dropped when
/// added. Nested lists are kept as-is, so the grouping a caller builds is the
/// grouping that gets rendered.
#[derive(Debug, Clone)]
pub struct ExpressionList {
    kind: ListKind,
    items: Vec<Expr>,
}

impl ExpressionList {
    pub fn new<I, E>(kind: ListKind, items: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Expr>,
    {
        Self {
            kind,
            items: Vec::new(),
        }
        .append(items)
    }

    pub fn kind(&self) -> ListKind {
        self.kind
    }

    pub fn items(&self) -> &[Expr] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// A new list with `items` added.
    pub fn append<I, E>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Expr>,
    {
        self.items.extend(
            items
                .into_iter()
                .map(Into::into)
                .filter(|e: &Expr| !e.is_empty_condition()),
        );
        self
    }
}

impl From<ExpressionList> for Expr {
    fn from(list: ExpressionList) -> Self {
        Expr::List(list)
    }
}

/// `(a AND b AND ...)`.
pub fn and<I, E>(items: I) -> ExpressionList
where
    I: IntoIterator<Item = E>,
    E: Into<Expr>,
{
    ExpressionList::new(ListKind::And, items)
}

/// `(a OR b OR ...)`.
pub fn or<I, E>(items: I) -> ExpressionList
where
    I: IntoIterator<Item = E>,
    E: Into<Expr>,
{
    ExpressionList::new(ListKind::Or, items)
}

/// Comma-separated expressions in insertion order.
#[derive(Debug, Clone, Default)]
pub struct ColumnList {
    items: Vec<Expr>,
}

impl ColumnList {
    pub fn new(cols: impl IntoColumns) -> Self {
        Self {
            items: cols.into_columns(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn from_exprs(items: Vec<Expr>) -> Self {
        Self { items }
    }

    pub(crate) fn into_items(self) -> Vec<Expr> {
        self.items
    }

    pub fn items(&self) -> &[Expr] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn append(mut self, cols: impl IntoColumns) -> Self {
        self.items.extend(cols.into_columns());
        self
    }

    pub(crate) fn prepend(self, cols: impl IntoColumns) -> Self {
        let mut items = cols.into_columns();
        items.extend(self.items);
        Self { items }
    }
}

impl From<ColumnList> for Expr {
    fn from(list: ColumnList) -> Self {
        Expr::ColumnList(list)
    }
}
