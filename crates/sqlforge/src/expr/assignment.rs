use super::Expr;
use crate::ident::{Ident, IntoIdent};

/// One `"col"=value` item of an UPDATE SET list or an upsert.
#[derive(Debug, Clone)]
pub struct Assignment {
    pub(crate) col: Ident,
    pub(crate) value: Expr,
}

impl Assignment {
    pub fn new(col: impl IntoIdent, value: impl Into<Expr>) -> Self {
        Self {
            col: col.into_ident(),
            value: value.into(),
        }
    }

    pub fn col(&self) -> &Ident {
        &self.col
    }

    pub fn value(&self) -> &Expr {
        &self.value
    }
}
