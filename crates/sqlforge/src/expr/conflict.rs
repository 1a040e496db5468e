use super::{Expr, ExpressionList, ListKind};
use crate::row::Row;

/// What an INSERT does when it hits a conflicting row.
#[derive(Debug, Clone)]
pub enum Conflict {
    /// `ON CONFLICT DO NOTHING`, or `INSERT IGNORE` where supported.
    DoNothing,
    /// `ON CONFLICT (target) DO UPDATE SET ... [WHERE ...]`.
    DoUpdate {
        target: String,
        update: Row,
        where_: Option<ExpressionList>,
    },
}

impl Conflict {
    /// Restrict a `DoUpdate` with a WHERE clause. No effect on `DoNothing`.
    pub fn where_<I, E>(self, conditions: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Expr>,
    {
        match self {
            Conflict::DoUpdate {
                target,
                update,
                where_,
            } => {
                let where_ = match where_ {
                    Some(list) => list.append(conditions),
                    None => ExpressionList::new(ListKind::And, conditions),
                };
                Conflict::DoUpdate {
                    target,
                    update,
                    where_: Some(where_),
                }
            }
            other => other,
        }
    }

    pub fn is_do_nothing(&self) -> bool {
        matches!(self, Conflict::DoNothing)
    }
}

pub fn do_nothing() -> Conflict {
    Conflict::DoNothing
}

/// `target` is written as-is; `ON CONSTRAINT name` targets are not wrapped
/// in parentheses.
pub fn do_update(target: &str, update: impl Into<Row>) -> Conflict {
    Conflict::DoUpdate {
        target: target.to_owned(),
        update: update.into(),
        where_: None,
    }
}
