use super::Expr;

/// `CASE [value] WHEN .. THEN .. [ELSE ..] END`.
///
/// Rendering fails when no `WHEN` branch was added.
#[derive(Debug, Clone, Default)]
pub struct CaseExpr {
    pub(crate) value: Option<Expr>,
    pub(crate) whens: Vec<CaseWhen>,
    pub(crate) else_: Option<Expr>,
}

#[derive(Debug, Clone)]
pub struct CaseWhen {
    pub(crate) condition: Expr,
    pub(crate) result: Expr,
}

impl CaseExpr {
    /// The value compared against each `WHEN` (simple CASE form).
    pub fn value(mut self, value: impl Into<Expr>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn when(mut self, condition: impl Into<Expr>, result: impl Into<Expr>) -> Self {
        self.whens.push(CaseWhen {
            condition: condition.into(),
            result: result.into(),
        });
        self
    }

    pub fn else_(mut self, result: impl Into<Expr>) -> Self {
        self.else_ = Some(result.into());
        self
    }
}

pub fn case() -> CaseExpr {
    CaseExpr::default()
}
