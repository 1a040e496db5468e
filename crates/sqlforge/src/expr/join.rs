use std::fmt;

use super::{ColumnList, Expr, ExpressionList, IntoColumns, ListKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinKind {
    Inner,
    FullOuter,
    RightOuter,
    LeftOuter,
    Full,
    Right,
    Left,
    Natural,
    NaturalLeft,
    NaturalRight,
    NaturalFull,
    Cross,
}

impl JoinKind {
    /// Whether this kind needs an ON or USING condition.
    pub fn is_conditioned(self) -> bool {
        !matches!(
            self,
            JoinKind::Natural
                | JoinKind::NaturalLeft
                | JoinKind::NaturalRight
                | JoinKind::NaturalFull
                | JoinKind::Cross
        )
    }
}

impl fmt::Display for JoinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            JoinKind::Inner => "INNER JOIN",
            JoinKind::FullOuter => "FULL OUTER JOIN",
            JoinKind::RightOuter => "RIGHT OUTER JOIN",
            JoinKind::LeftOuter => "LEFT OUTER JOIN",
            JoinKind::Full => "FULL JOIN",
            JoinKind::Right => "RIGHT JOIN",
            JoinKind::Left => "LEFT JOIN",
            JoinKind::Natural => "NATURAL JOIN",
            JoinKind::NaturalLeft => "NATURAL LEFT JOIN",
            JoinKind::NaturalRight => "NATURAL RIGHT JOIN",
            JoinKind::NaturalFull => "NATURAL FULL JOIN",
            JoinKind::Cross => "CROSS JOIN",
        })
    }
}

#[derive(Debug, Clone)]
pub enum JoinCondition {
    None,
    On(ExpressionList),
    Using(ColumnList),
}

impl JoinCondition {
    pub fn is_empty(&self) -> bool {
        match self {
            JoinCondition::None => true,
            JoinCondition::On(list) => list.is_empty(),
            JoinCondition::Using(cols) => cols.is_empty(),
        }
    }
}

/// One JOIN of a SELECT.
#[derive(Debug, Clone)]
pub struct Join {
    pub(crate) kind: JoinKind,
    pub(crate) table: Expr,
    pub(crate) condition: JoinCondition,
}

impl Join {
    pub fn new(kind: JoinKind, table: Expr, condition: JoinCondition) -> Self {
        Self {
            kind,
            table,
            condition,
        }
    }

    pub fn kind(&self) -> JoinKind {
        self.kind
    }
}

/// `ON (a AND b ...)`.
pub fn on<I, E>(conditions: I) -> JoinCondition
where
    I: IntoIterator<Item = E>,
    E: Into<Expr>,
{
    JoinCondition::On(ExpressionList::new(ListKind::And, conditions))
}

/// `USING ("a", "b")`.
pub fn using(cols: impl IntoColumns) -> JoinCondition {
    JoinCondition::Using(ColumnList::new(cols))
}
