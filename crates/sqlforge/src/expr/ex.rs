//! Map-shaped conditions.
//!
//! [`Ex`] ANDs its keys together, [`ExOr`] ORs them. Keys are dotted
//! identifiers and are always visited in lexical order, so the rendered SQL
//! does not depend on insertion order.
//!
//! ```ignore
//! use sqlforge::{Ex, Op};
//!
//! // (("age" > 10) OR ("age" < 20)) AND ("name" = 'bob')
//! Ex::new()
//!     .with("name", "bob")
//!     .op("age", Op::new().gt(10).lt(20));
//! ```

use std::collections::BTreeMap;

use super::ops::{compare, range};
use super::{BooleanOp, Expr, ExpressionList, ListKind, RangeOp};
use crate::error::{BuildError, BuildResult};
use crate::ident::Ident;

/// Argument of one operator inside an [`Op`].
#[derive(Debug, Clone)]
pub enum OpValue {
    Expr(Expr),
    /// `between` / `notbetween` bounds.
    Range(Expr, Expr),
}

/// Operators applied to a single key. Comparisons from the same key are
/// always ORed together.
#[derive(Debug, Clone, Default)]
pub struct Op {
    ops: BTreeMap<String, OpValue>,
}

impl Op {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an operator by name. Names are matched case-insensitively when
    /// rendered; unknown names are a render error.
    pub fn with(mut self, name: &str, v: impl Into<Expr>) -> Self {
        self.ops.insert(name.to_owned(), OpValue::Expr(v.into()));
        self
    }

    pub fn eq(self, v: impl Into<Expr>) -> Self {
        self.with("eq", v)
    }

    pub fn neq(self, v: impl Into<Expr>) -> Self {
        self.with("neq", v)
    }

    pub fn is(self, v: impl Into<Expr>) -> Self {
        self.with("is", v)
    }

    pub fn is_not(self, v: impl Into<Expr>) -> Self {
        self.with("isnot", v)
    }

    pub fn gt(self, v: impl Into<Expr>) -> Self {
        self.with("gt", v)
    }

    pub fn gte(self, v: impl Into<Expr>) -> Self {
        self.with("gte", v)
    }

    pub fn lt(self, v: impl Into<Expr>) -> Self {
        self.with("lt", v)
    }

    pub fn lte(self, v: impl Into<Expr>) -> Self {
        self.with("lte", v)
    }

    pub fn in_(self, v: impl Into<Expr>) -> Self {
        self.with("in", v)
    }

    pub fn not_in(self, v: impl Into<Expr>) -> Self {
        self.with("notin", v)
    }

    pub fn like(self, v: impl Into<Expr>) -> Self {
        self.with("like", v)
    }

    pub fn not_like(self, v: impl Into<Expr>) -> Self {
        self.with("notlike", v)
    }

    pub fn ilike(self, v: impl Into<Expr>) -> Self {
        self.with("ilike", v)
    }

    pub fn not_ilike(self, v: impl Into<Expr>) -> Self {
        self.with("notilike", v)
    }

    pub fn regexp_like(self, v: impl Into<Expr>) -> Self {
        self.with("regexplike", v)
    }

    pub fn regexp_not_like(self, v: impl Into<Expr>) -> Self {
        self.with("regexpnotlike", v)
    }

    pub fn regexp_ilike(self, v: impl Into<Expr>) -> Self {
        self.with("regexpilike", v)
    }

    pub fn regexp_not_ilike(self, v: impl Into<Expr>) -> Self {
        self.with("regexpnotilike", v)
    }

    pub fn between(mut self, start: impl Into<Expr>, end: impl Into<Expr>) -> Self {
        self.ops
            .insert("between".to_owned(), OpValue::Range(start.into(), end.into()));
        self
    }

    pub fn not_between(mut self, start: impl Into<Expr>, end: impl Into<Expr>) -> Self {
        self.ops
            .insert("notbetween".to_owned(), OpValue::Range(start.into(), end.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// One comparison per operator, ORed.
    fn to_condition(&self, lhs: &Ident) -> BuildResult<ExpressionList> {
        let mut ors = Vec::with_capacity(self.ops.len());
        for (name, value) in &self.ops {
            let lhs = Expr::Ident(lhs.clone());
            let lowered = name.to_ascii_lowercase();
            let expr = match (lowered.as_str(), value) {
                ("between", OpValue::Range(start, end)) => {
                    range(lhs, RangeOp::Between, start.clone(), end.clone())
                }
                ("notbetween", OpValue::Range(start, end)) => {
                    range(lhs, RangeOp::NotBetween, start.clone(), end.clone())
                }
                (_, OpValue::Expr(rhs)) => match BooleanOp::from_name(&lowered) {
                    Some(op) => compare(lhs, op, rhs.clone()),
                    None => return Err(BuildError::UnsupportedExpression(name.clone())),
                },
                (_, OpValue::Range(..)) => {
                    return Err(BuildError::UnsupportedExpression(name.clone()));
                }
            };
            ors.push(expr);
        }
        Ok(ExpressionList::new(ListKind::Or, ors))
    }
}

/// Value stored under an `Ex`/`ExOr` key.
#[derive(Debug, Clone)]
pub enum ExValue {
    /// Compared with `eq` (which turns into IS/IN as appropriate).
    Expr(Expr),
    Op(Op),
}

macro_rules! ex_map {
    ($name:ident, $kind:expr) => {
        #[derive(Debug, Clone, Default)]
        pub struct $name {
            entries: BTreeMap<String, ExValue>,
        }

        impl $name {
            pub fn new() -> Self {
                Self::default()
            }

            /// Compare `key` to `v` with equality semantics.
            pub fn with(mut self, key: &str, v: impl Into<Expr>) -> Self {
                self.entries.insert(key.to_owned(), ExValue::Expr(v.into()));
                self
            }

            /// Apply per-key operators to `key`. An empty `Op` removes the key.
            pub fn op(mut self, key: &str, op: Op) -> Self {
                if op.is_empty() {
                    self.entries.remove(key);
                } else {
                    self.entries.insert(key.to_owned(), ExValue::Op(op));
                }
                self
            }

            pub fn is_empty(&self) -> bool {
                self.entries.is_empty()
            }

            pub fn len(&self) -> usize {
                self.entries.len()
            }

            /// Expand into the equivalent expression list.
            pub fn to_expression_list(&self) -> BuildResult<ExpressionList> {
                let mut items = Vec::with_capacity(self.entries.len());
                for (key, value) in &self.entries {
                    let lhs = Ident::parse(key);
                    let expr = match value {
                        ExValue::Expr(rhs) => {
                            compare(Expr::Ident(lhs), BooleanOp::Eq, rhs.clone())
                        }
                        ExValue::Op(op) => Expr::List(op.to_condition(&lhs)?),
                    };
                    items.push(expr);
                }
                Ok(ExpressionList::new($kind, items))
            }
        }

        impl From<$name> for Expr {
            fn from(ex: $name) -> Self {
                Expr::$name(ex)
            }
        }

        impl<K: AsRef<str>, V: Into<Expr>, const N: usize> From<[(K, V); N]> for $name {
            fn from(entries: [(K, V); N]) -> Self {
                entries
                    .into_iter()
                    .fold(Self::new(), |ex, (k, v)| ex.with(k.as_ref(), v))
            }
        }
    };
}

ex_map!(Ex, ListKind::And);
ex_map!(ExOr, ListKind::Or);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_sorted() {
        let ex = Ex::new().with("z", 1).with("a", 2);
        let list = ex.to_expression_list().unwrap();
        let names: Vec<_> = list
            .items()
            .iter()
            .map(|e| match e {
                Expr::Boolean(b) => match b.lhs() {
                    Expr::Ident(i) => i.clone(),
                    other => panic!("unexpected lhs {other:?}"),
                },
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(names, vec![Ident::parse("a"), Ident::parse("z")]);
    }

    #[test]
    fn bare_values_coerce() {
        let list = Ex::new()
            .with("a", Option::<i32>::None)
            .with("b", vec![1, 2])
            .with("c", true)
            .to_expression_list()
            .unwrap();
        let ops: Vec<_> = list
            .items()
            .iter()
            .map(|e| match e {
                Expr::Boolean(b) => b.op(),
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(ops, vec![BooleanOp::Is, BooleanOp::In, BooleanOp::Is]);
    }

    #[test]
    fn unknown_op_is_an_error() {
        let err = Ex::new()
            .op("a", Op::new().with("foo", 1))
            .to_expression_list()
            .unwrap_err();
        assert_eq!(err.to_string(), "builder: unsupported expression type foo");
    }

    #[test]
    fn op_names_are_case_insensitive() {
        let list = Ex::new()
            .op("a", Op::new().with("GT", 1).with("notIn", vec![1]))
            .to_expression_list()
            .unwrap();
        match &list.items()[0] {
            Expr::List(ors) => {
                assert_eq!(ors.kind(), ListKind::Or);
                assert_eq!(ors.len(), 2);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn empty_maps_are_dropped_from_lists() {
        let list = super::super::and([Expr::from(Ex::new()), Expr::from(ExOr::new())]);
        assert!(list.is_empty());
    }

    #[test]
    fn empty_op_removes_the_key() {
        assert!(Ex::new().op("a", Op::new()).is_empty());
        let ex = ExOr::new().op("a", Op::new().gt(1)).op("a", Op::new());
        assert!(ex.is_empty());
        let list = super::super::and([Expr::from(Ex::new().op("a", Op::new()))]);
        assert!(list.is_empty());
    }
}
