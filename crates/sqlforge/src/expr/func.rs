//! SQL function calls and window functions.

use super::{Expr, IntoColumnExpr, Window};
use crate::ident::Ident;

/// `NAME(arg, ...)`.
#[derive(Debug, Clone)]
pub struct SqlFunction {
    pub(crate) name: String,
    pub(crate) args: Vec<Expr>,
}

impl SqlFunction {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn args(&self) -> &[Expr] {
        &self.args
    }

    /// `fn OVER (window)`.
    pub fn over(self, window: Window) -> Expr {
        Expr::WindowFunction(Box::new(WindowFunction {
            func: self,
            window: Some(window),
            window_name: None,
        }))
    }

    /// `fn OVER "name"`, referring to a window from the WINDOW clause.
    pub fn over_name(self, name: &str) -> Expr {
        Expr::WindowFunction(Box::new(WindowFunction {
            func: self,
            window: None,
            window_name: Some(Ident::column(name)),
        }))
    }

    /// `fn OVER ()`.
    pub fn over_all(self) -> Expr {
        Expr::WindowFunction(Box::new(WindowFunction {
            func: self,
            window: None,
            window_name: None,
        }))
    }
}

impl From<SqlFunction> for Expr {
    fn from(f: SqlFunction) -> Self {
        Expr::Function(f)
    }
}

#[derive(Debug, Clone)]
pub struct WindowFunction {
    pub(crate) func: SqlFunction,
    pub(crate) window: Option<Window>,
    pub(crate) window_name: Option<Ident>,
}

/// A function whose arguments are values: `func("f", ["a"])` is `f('a')`.
pub fn func<I, E>(name: &str, args: I) -> SqlFunction
where
    I: IntoIterator<Item = E>,
    E: Into<Expr>,
{
    SqlFunction {
        name: name.to_owned(),
        args: args.into_iter().map(Into::into).collect(),
    }
}

fn column_func(name: &str, col: impl IntoColumnExpr) -> SqlFunction {
    SqlFunction {
        name: name.to_owned(),
        args: vec![col.into_column_expr()],
    }
}

// Aggregates take a column; strings are identifiers, so `count("*")` is `COUNT(*)`.

pub fn count(col: impl IntoColumnExpr) -> SqlFunction {
    column_func("COUNT", col)
}

pub fn max(col: impl IntoColumnExpr) -> SqlFunction {
    column_func("MAX", col)
}

pub fn min(col: impl IntoColumnExpr) -> SqlFunction {
    column_func("MIN", col)
}

pub fn avg(col: impl IntoColumnExpr) -> SqlFunction {
    column_func("AVG", col)
}

pub fn sum(col: impl IntoColumnExpr) -> SqlFunction {
    column_func("SUM", col)
}

pub fn first(col: impl IntoColumnExpr) -> SqlFunction {
    column_func("FIRST", col)
}

pub fn last(col: impl IntoColumnExpr) -> SqlFunction {
    column_func("LAST", col)
}

pub fn distinct(col: impl IntoColumnExpr) -> SqlFunction {
    column_func("DISTINCT", col)
}

/// `COALESCE(a, b, ...)`; arguments are values.
pub fn coalesce<I, E>(args: I) -> SqlFunction
where
    I: IntoIterator<Item = E>,
    E: Into<Expr>,
{
    func("COALESCE", args)
}

// ==================== Window functions ====================

pub fn row_number() -> SqlFunction {
    func("ROW_NUMBER", Vec::<Expr>::new())
}

pub fn rank() -> SqlFunction {
    func("RANK", Vec::<Expr>::new())
}

pub fn dense_rank() -> SqlFunction {
    func("DENSE_RANK", Vec::<Expr>::new())
}

pub fn percent_rank() -> SqlFunction {
    func("PERCENT_RANK", Vec::<Expr>::new())
}

pub fn cume_dist() -> SqlFunction {
    func("CUME_DIST", Vec::<Expr>::new())
}

pub fn ntile(n: u32) -> SqlFunction {
    func("NTILE", [n])
}

pub fn first_value(col: impl IntoColumnExpr) -> SqlFunction {
    column_func("FIRST_VALUE", col)
}

pub fn last_value(col: impl IntoColumnExpr) -> SqlFunction {
    column_func("LAST_VALUE", col)
}

pub fn nth_value(col: impl IntoColumnExpr, n: u32) -> SqlFunction {
    SqlFunction {
        name: "NTH_VALUE".to_owned(),
        args: vec![col.into_column_expr(), Expr::from(n)],
    }
}
