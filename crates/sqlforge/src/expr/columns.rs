//! Conversions for arguments in column position (SELECT lists, FROM,
//! GROUP BY, ORDER BY, RETURNING, ...).
//!
//! In column position a string is an identifier, whereas in value position
//! (`eq`, `vals`, ...) it is a string literal.

use super::{CaseExpr, ColumnList, Expr, Literal, SqlFunction};
use crate::dataset::SelectDataset;
use crate::ident::Ident;

/// A single column-position argument.
pub trait IntoColumnExpr {
    fn into_column_expr(self) -> Expr;
}

/// One or more column-position arguments.
///
/// Implemented for single columns, arrays, vectors, tuples and
/// [`ColumnList`]. `()` is the empty list.
pub trait IntoColumns {
    fn into_columns(self) -> Vec<Expr>;
}

impl IntoColumnExpr for &str {
    fn into_column_expr(self) -> Expr {
        Expr::Ident(Ident::parse(self))
    }
}

impl IntoColumnExpr for String {
    fn into_column_expr(self) -> Expr {
        Expr::Ident(Ident::parse(&self))
    }
}

impl IntoColumnExpr for &String {
    fn into_column_expr(self) -> Expr {
        Expr::Ident(Ident::parse(self))
    }
}

macro_rules! expr_columns {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntoColumnExpr for $ty {
                fn into_column_expr(self) -> Expr {
                    Expr::from(self)
                }
            }
        )*
    };
}

expr_columns!(Expr, Ident, Literal, SqlFunction, CaseExpr, SelectDataset);

macro_rules! single_columns {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntoColumns for $ty {
                fn into_columns(self) -> Vec<Expr> {
                    vec![self.into_column_expr()]
                }
            }
        )*
    };
}

single_columns!(
    &str,
    String,
    &String,
    Expr,
    Ident,
    Literal,
    SqlFunction,
    CaseExpr,
    SelectDataset
);

impl<T: IntoColumnExpr, const N: usize> IntoColumns for [T; N] {
    fn into_columns(self) -> Vec<Expr> {
        self.into_iter().map(IntoColumnExpr::into_column_expr).collect()
    }
}

impl<T: IntoColumnExpr> IntoColumns for Vec<T> {
    fn into_columns(self) -> Vec<Expr> {
        self.into_iter().map(IntoColumnExpr::into_column_expr).collect()
    }
}

impl IntoColumns for ColumnList {
    fn into_columns(self) -> Vec<Expr> {
        self.into_items()
    }
}

impl IntoColumns for () {
    fn into_columns(self) -> Vec<Expr> {
        Vec::new()
    }
}

macro_rules! tuple_columns {
    ($(($($name:ident),+)),* $(,)?) => {
        $(
            impl<$($name: IntoColumnExpr),+> IntoColumns for ($($name,)+) {
                #[allow(non_snake_case)]
                fn into_columns(self) -> Vec<Expr> {
                    let ($($name,)+) = self;
                    vec![$($name.into_column_expr()),+]
                }
            }
        )*
    };
}

tuple_columns!(
    (A, B),
    (A, B, C),
    (A, B, C, D),
    (A, B, C, D, E),
    (A, B, C, D, E, F),
    (A, B, C, D, E, F, G),
    (A, B, C, D, E, F, G, H),
);
