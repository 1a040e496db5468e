//! Comparison, ordering, aliasing and bitwise producers shared by every
//! comparable node.

use super::{
    Aliased, BitwiseExpr, BitwiseOp, BooleanExpr, BooleanOp, CaseExpr, CastExpr, Expr, Literal,
    NullsOrder, OrderedExpr, RangeExpr, RangeOp, SortDirection, SqlFunction, func,
};
use crate::ident::{Ident, IdentCol};
use crate::value::Value;

/// Build `(lhs op rhs)`, rewriting the operator for the right-hand side:
///
/// - `eq`/`neq` against NULL or a bool become `IS`/`IS NOT`
/// - `eq`/`neq` against a list or a sub-query become `IN`/`NOT IN`
/// - `eq`/`neq`/`like` family against a regex become the regexp operators
pub(crate) fn compare(lhs: Expr, op: BooleanOp, rhs: Expr) -> Expr {
    use BooleanOp::*;

    let (op, rhs) = match rhs {
        Expr::Regex(re) => {
            let op = match op {
                Eq | Like => RegexpLike,
                Neq | NotLike => RegexpNotLike,
                ILike => RegexpILike,
                NotILike => RegexpNotILike,
                other => other,
            };
            (op, Expr::Value(Value::String(re.as_str().to_owned())))
        }
        rhs => {
            let op = match (op, &rhs) {
                (Eq, Expr::Value(Value::Null | Value::Bool(_))) => Is,
                (Neq, Expr::Value(Value::Null | Value::Bool(_))) => IsNot,
                (Eq, Expr::Value(Value::List(_)) | Expr::Query(_)) => In,
                (Neq, Expr::Value(Value::List(_)) | Expr::Query(_)) => NotIn,
                (op, _) => op,
            };
            (op, rhs)
        }
    };
    Expr::Boolean(Box::new(BooleanExpr { op, lhs, rhs }))
}

/// `IN` takes either one list or sub-query, or a scalar wrapped as a
/// one-element list.
fn membership(lhs: Expr, op: BooleanOp, rhs: Expr) -> Expr {
    let rhs = match rhs {
        Expr::Value(Value::List(items)) => Expr::Value(Value::List(items)),
        Expr::Value(v) => Expr::Value(Value::List(vec![v])),
        other => other,
    };
    Expr::Boolean(Box::new(BooleanExpr { op, lhs, rhs }))
}

fn identity(lhs: Expr, op: BooleanOp, rhs: Value) -> Expr {
    Expr::Boolean(Box::new(BooleanExpr {
        op,
        lhs,
        rhs: Expr::Value(rhs),
    }))
}

pub(crate) fn range(lhs: Expr, op: RangeOp, start: Expr, end: Expr) -> Expr {
    Expr::Range(Box::new(RangeExpr {
        op,
        lhs,
        start,
        end,
    }))
}

fn bitwise(lhs: Expr, op: BitwiseOp, rhs: Expr) -> Expr {
    Expr::Bitwise(Box::new(BitwiseExpr {
        op,
        lhs: Some(lhs),
        rhs,
    }))
}

fn ordered(expr: Expr, direction: SortDirection) -> Expr {
    Expr::Ordered(Box::new(OrderedExpr {
        expr,
        direction,
        nulls: NullsOrder::Unspecified,
    }))
}

pub(crate) fn aliased(expr: Expr, alias: Ident) -> Expr {
    Expr::Aliased(Box::new(Aliased { expr, alias }))
}

macro_rules! comparable {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $ty {
                pub fn eq(self, v: impl Into<Expr>) -> Expr {
                    compare(self.into(), BooleanOp::Eq, v.into())
                }

                pub fn neq(self, v: impl Into<Expr>) -> Expr {
                    compare(self.into(), BooleanOp::Neq, v.into())
                }

                pub fn gt(self, v: impl Into<Expr>) -> Expr {
                    compare(self.into(), BooleanOp::Gt, v.into())
                }

                pub fn gte(self, v: impl Into<Expr>) -> Expr {
                    compare(self.into(), BooleanOp::Gte, v.into())
                }

                pub fn lt(self, v: impl Into<Expr>) -> Expr {
                    compare(self.into(), BooleanOp::Lt, v.into())
                }

                pub fn lte(self, v: impl Into<Expr>) -> Expr {
                    compare(self.into(), BooleanOp::Lte, v.into())
                }

                pub fn like(self, v: impl Into<Expr>) -> Expr {
                    compare(self.into(), BooleanOp::Like, v.into())
                }

                pub fn not_like(self, v: impl Into<Expr>) -> Expr {
                    compare(self.into(), BooleanOp::NotLike, v.into())
                }

                pub fn ilike(self, v: impl Into<Expr>) -> Expr {
                    compare(self.into(), BooleanOp::ILike, v.into())
                }

                pub fn not_ilike(self, v: impl Into<Expr>) -> Expr {
                    compare(self.into(), BooleanOp::NotILike, v.into())
                }

                pub fn regexp_like(self, v: impl Into<Expr>) -> Expr {
                    compare(self.into(), BooleanOp::RegexpLike, v.into())
                }

                pub fn regexp_not_like(self, v: impl Into<Expr>) -> Expr {
                    compare(self.into(), BooleanOp::RegexpNotLike, v.into())
                }

                pub fn regexp_ilike(self, v: impl Into<Expr>) -> Expr {
                    compare(self.into(), BooleanOp::RegexpILike, v.into())
                }

                pub fn regexp_not_ilike(self, v: impl Into<Expr>) -> Expr {
                    compare(self.into(), BooleanOp::RegexpNotILike, v.into())
                }

                /// `IN` against a list, a sub-query, or a single value.
                pub fn in_(self, v: impl Into<Expr>) -> Expr {
                    membership(self.into(), BooleanOp::In, v.into())
                }

                pub fn not_in(self, v: impl Into<Expr>) -> Expr {
                    membership(self.into(), BooleanOp::NotIn, v.into())
                }

                pub fn is(self, v: impl Into<Value>) -> Expr {
                    identity(self.into(), BooleanOp::Is, v.into())
                }

                pub fn is_not(self, v: impl Into<Value>) -> Expr {
                    identity(self.into(), BooleanOp::IsNot, v.into())
                }

                pub fn is_null(self) -> Expr {
                    identity(self.into(), BooleanOp::Is, Value::Null)
                }

                pub fn is_not_null(self) -> Expr {
                    identity(self.into(), BooleanOp::IsNot, Value::Null)
                }

                pub fn is_true(self) -> Expr {
                    identity(self.into(), BooleanOp::Is, Value::Bool(true))
                }

                pub fn is_not_true(self) -> Expr {
                    identity(self.into(), BooleanOp::IsNot, Value::Bool(true))
                }

                pub fn is_false(self) -> Expr {
                    identity(self.into(), BooleanOp::Is, Value::Bool(false))
                }

                pub fn is_not_false(self) -> Expr {
                    identity(self.into(), BooleanOp::IsNot, Value::Bool(false))
                }

                pub fn between(self, start: impl Into<Expr>, end: impl Into<Expr>) -> Expr {
                    range(self.into(), RangeOp::Between, start.into(), end.into())
                }

                pub fn not_between(self, start: impl Into<Expr>, end: impl Into<Expr>) -> Expr {
                    range(self.into(), RangeOp::NotBetween, start.into(), end.into())
                }

                pub fn asc(self) -> Expr {
                    ordered(self.into(), SortDirection::Asc)
                }

                pub fn desc(self) -> Expr {
                    ordered(self.into(), SortDirection::Desc)
                }

                pub fn cast(self, ty: &str) -> Expr {
                    Expr::Cast(Box::new(CastExpr {
                        expr: self.into(),
                        ty: ty.to_owned(),
                    }))
                }

                /// `DISTINCT(expr)`.
                pub fn distinct(self) -> SqlFunction {
                    func("DISTINCT", [Expr::from(self)])
                }

                pub fn bit_or(self, v: impl Into<Expr>) -> Expr {
                    bitwise(self.into(), BitwiseOp::Or, v.into())
                }

                pub fn bit_and(self, v: impl Into<Expr>) -> Expr {
                    bitwise(self.into(), BitwiseOp::And, v.into())
                }

                pub fn bit_xor(self, v: impl Into<Expr>) -> Expr {
                    bitwise(self.into(), BitwiseOp::Xor, v.into())
                }

                pub fn bit_left_shift(self, v: impl Into<Expr>) -> Expr {
                    bitwise(self.into(), BitwiseOp::LeftShift, v.into())
                }

                pub fn bit_right_shift(self, v: impl Into<Expr>) -> Expr {
                    bitwise(self.into(), BitwiseOp::RightShift, v.into())
                }

                pub fn bitwise_inversion(self) -> Expr {
                    super::bitwise_inversion(self)
                }
            }
        )*
    };
}

comparable!(Ident, Literal, SqlFunction, CaseExpr, Expr);

macro_rules! aliasable {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $ty {
                /// `expr AS "alias"`. A dotted alias is parsed as an identifier.
                pub fn as_(self, alias: &str) -> Expr {
                    aliased(self.into(), Ident::parse(alias))
                }
            }
        )*
    };
}

aliasable!(Literal, SqlFunction, CaseExpr, Expr);

impl Ident {
    /// Alias this identifier.
    ///
    /// A column is aliased by the parsed alias. A bare table or schema is
    /// aliased by a table or schema of the alias's last segment, so
    /// `table("t").as_("x")` renders `"t" AS "x"`.
    pub fn as_(self, alias: &str) -> Expr {
        let parsed = Ident::parse(alias);
        if self.column_part().is_some() {
            return aliased(self.into(), parsed);
        }
        let last = match parsed.column_part() {
            Some(IdentCol::Name(name)) => name.clone(),
            Some(IdentCol::Star) => "*".to_string(),
            None => alias.to_owned(),
        };
        let alias = if self.table_name().is_some() {
            Ident::table_only(last)
        } else if self.schema_name().is_some() {
            Ident::schema_only(last)
        } else {
            parsed
        };
        aliased(self.into(), alias)
    }
}

impl From<CaseExpr> for Expr {
    fn from(case: CaseExpr) -> Self {
        Expr::Case(Box::new(case))
    }
}
