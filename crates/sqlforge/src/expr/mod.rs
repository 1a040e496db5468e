//! The expression model.
//!
//! Every query fragment is an immutable value. Builder methods consume their
//! receiver and return a new node, so a fragment can be cloned and branched
//! freely:
//!
//! ```ignore
//! use sqlforge::{col, Ex, Op};
//!
//! let adults = col("age").gte(18);
//! let named = Ex::new().with("name", "bob").op("age", Op::new().gt(10).lt(20));
//! ```
//!
//! [`Expr`] is the closed sum of all expression variants. Clause-only nodes
//! ([`Join`], [`Window`], [`CommonTable`], [`Conflict`], [`Lock`],
//! [`Compound`], [`Assignment`]) are typed structs held directly by the
//! clause containers.

mod assignment;
mod case;
mod columns;
mod compound;
mod conflict;
mod cte;
mod ex;
mod func;
mod join;
mod list;
mod lock;
mod operators;
mod ops;
mod window;

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use uuid::Uuid;

pub use assignment::Assignment;
pub use case::{CaseExpr, CaseWhen, case};
pub use columns::{IntoColumnExpr, IntoColumns};
pub use compound::{Compound, CompoundKind};
pub use conflict::{Conflict, do_nothing, do_update};
pub use cte::CommonTable;
pub use ex::{Ex, ExOr, ExValue, Op, OpValue};
pub use func::{
    SqlFunction, WindowFunction, avg, coalesce, count, cume_dist, dense_rank, distinct, first,
    first_value, func, last, last_value, max, min, nth_value, ntile, percent_rank, rank,
    row_number, sum,
};
pub use join::{Join, JoinCondition, JoinKind, on, using};
pub use list::{ColumnList, ExpressionList, and, or};
pub use lock::{Lock, LockStrength, WaitOption};
pub use operators::{BitwiseOp, BooleanOp, ListKind, RangeOp};
pub use window::{Window, window};

use crate::dataset::{DeleteDataset, InsertDataset, SelectDataset, UpdateDataset};
use crate::error::{BuildError, BuildResult};
use crate::ident::Ident;
use crate::value::Value;

/// A statement embedded in another one: a sub-select, a CTE body, or a
/// data-modifying statement with RETURNING.
#[derive(Debug, Clone)]
pub enum Query {
    Select(SelectDataset),
    Insert(InsertDataset),
    Update(UpdateDataset),
    Delete(DeleteDataset),
}

impl Query {
    pub(crate) fn error(&self) -> Option<&BuildError> {
        match self {
            Query::Select(ds) => ds.error(),
            Query::Insert(ds) => ds.error(),
            Query::Update(ds) => ds.error(),
            Query::Delete(ds) => ds.error(),
        }
    }
}

impl From<SelectDataset> for Query {
    fn from(ds: SelectDataset) -> Self {
        Query::Select(ds)
    }
}

impl From<InsertDataset> for Query {
    fn from(ds: InsertDataset) -> Self {
        Query::Insert(ds)
    }
}

impl From<UpdateDataset> for Query {
    fn from(ds: UpdateDataset) -> Self {
        Query::Update(ds)
    }
}

impl From<DeleteDataset> for Query {
    fn from(ds: DeleteDataset) -> Self {
        Query::Delete(ds)
    }
}

/// Any SQL expression.
#[derive(Debug, Clone)]
pub enum Expr {
    Ident(Ident),
    Literal(Literal),
    Value(Value),
    /// The `DEFAULT` keyword.
    Default,
    Aliased(Box<Aliased>),
    Boolean(Box<BooleanExpr>),
    Range(Box<RangeExpr>),
    Bitwise(Box<BitwiseExpr>),
    Function(SqlFunction),
    Cast(Box<CastExpr>),
    Case(Box<CaseExpr>),
    WindowFunction(Box<WindowFunction>),
    Ordered(Box<OrderedExpr>),
    ColumnList(ColumnList),
    List(ExpressionList),
    Ex(Ex),
    ExOr(ExOr),
    /// A regular expression; written as its pattern string.
    Regex(regex::Regex),
    Lateral(Box<Query>),
    Query(Box<Query>),
}

impl Expr {
    /// Whether this expression contributes nothing to an AND/OR list.
    pub(crate) fn is_empty_condition(&self) -> bool {
        match self {
            Expr::List(list) => list.is_empty(),
            Expr::Ex(ex) => ex.is_empty(),
            Expr::ExOr(ex) => ex.is_empty(),
            _ => false,
        }
    }

    /// Set the null ordering of an ordered expression. Anything else is first
    /// ordered ascending.
    pub fn nulls_first(self) -> Expr {
        self.with_nulls(NullsOrder::First)
    }

    pub fn nulls_last(self) -> Expr {
        self.with_nulls(NullsOrder::Last)
    }

    fn with_nulls(self, nulls: NullsOrder) -> Expr {
        match self {
            Expr::Ordered(mut ordered) => {
                ordered.nulls = nulls;
                Expr::Ordered(ordered)
            }
            other => Expr::Ordered(Box::new(OrderedExpr {
                expr: other,
                direction: SortDirection::Asc,
                nulls,
            })),
        }
    }
}

/// Raw SQL text, with `?` markers replaced by rendered arguments in order.
#[derive(Debug, Clone)]
pub struct Literal {
    pub(crate) sql: String,
    pub(crate) args: Vec<Expr>,
}

impl Literal {
    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn args(&self) -> &[Expr] {
        &self.args
    }
}

/// `expr AS alias`.
#[derive(Debug, Clone)]
pub struct Aliased {
    pub(crate) expr: Expr,
    pub(crate) alias: Ident,
}

/// `(lhs op rhs)`.
#[derive(Debug, Clone)]
pub struct BooleanExpr {
    pub(crate) op: BooleanOp,
    pub(crate) lhs: Expr,
    pub(crate) rhs: Expr,
}

impl BooleanExpr {
    pub fn op(&self) -> BooleanOp {
        self.op
    }

    pub fn lhs(&self) -> &Expr {
        &self.lhs
    }

    pub fn rhs(&self) -> &Expr {
        &self.rhs
    }
}

/// `(lhs BETWEEN start AND end)`.
#[derive(Debug, Clone)]
pub struct RangeExpr {
    pub(crate) op: RangeOp,
    pub(crate) lhs: Expr,
    pub(crate) start: Expr,
    pub(crate) end: Expr,
}

/// `(lhs op rhs)`, or `(~ rhs)` for inversion.
#[derive(Debug, Clone)]
pub struct BitwiseExpr {
    pub(crate) op: BitwiseOp,
    pub(crate) lhs: Option<Expr>,
    pub(crate) rhs: Expr,
}

/// `CAST(expr AS type)`.
#[derive(Debug, Clone)]
pub struct CastExpr {
    pub(crate) expr: Expr,
    pub(crate) ty: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NullsOrder {
    #[default]
    Unspecified,
    First,
    Last,
}

/// An ORDER BY item.
#[derive(Debug, Clone)]
pub struct OrderedExpr {
    pub(crate) expr: Expr,
    pub(crate) direction: SortDirection,
    pub(crate) nulls: NullsOrder,
}

// ==================== Conversions ====================

impl From<Ident> for Expr {
    fn from(ident: Ident) -> Self {
        Expr::Ident(ident)
    }
}

impl From<Literal> for Expr {
    fn from(lit: Literal) -> Self {
        Expr::Literal(lit)
    }
}

impl From<Value> for Expr {
    fn from(value: Value) -> Self {
        Expr::Value(value)
    }
}

impl From<regex::Regex> for Expr {
    fn from(re: regex::Regex) -> Self {
        Expr::Regex(re)
    }
}

impl From<Query> for Expr {
    fn from(query: Query) -> Self {
        Expr::Query(Box::new(query))
    }
}

macro_rules! query_exprs {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Expr {
                fn from(ds: $ty) -> Self {
                    Expr::Query(Box::new(ds.into()))
                }
            }
        )*
    };
}

query_exprs!(SelectDataset, InsertDataset, UpdateDataset, DeleteDataset);

macro_rules! value_exprs {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Expr {
                fn from(v: $ty) -> Self {
                    Expr::Value(Value::from(v))
                }
            }
        )*
    };
}

value_exprs!(
    i8,
    i16,
    i32,
    i64,
    isize,
    u8,
    u16,
    u32,
    u64,
    usize,
    f32,
    f64,
    bool,
    &str,
    String,
    &String,
    &[u8],
    Uuid,
    DateTime<Utc>,
    DateTime<FixedOffset>,
    NaiveDateTime,
    serde_json::Value,
);

impl<T: Into<Value>> From<Option<T>> for Expr {
    fn from(v: Option<T>) -> Self {
        Expr::Value(Value::from(v))
    }
}

impl<T: Into<Value>> From<Vec<T>> for Expr {
    fn from(v: Vec<T>) -> Self {
        Expr::Value(Value::from(v))
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Expr {
    fn from(v: [T; N]) -> Self {
        Expr::Value(Value::from(v))
    }
}

// ==================== Constructors ====================

/// A column identifier. Dots are kept as part of the name.
pub fn col(name: &str) -> Ident {
    Ident::column(name)
}

pub fn table(name: &str) -> Ident {
    Ident::table_only(name)
}

pub fn schema(name: &str) -> Ident {
    Ident::schema_only(name)
}

/// A dotted identifier: `col`, `table.col` or `schema.table.col`.
pub fn ident(dotted: &str) -> Ident {
    Ident::parse(dotted)
}

/// The unquoted `*`.
pub fn star() -> Literal {
    lit("*")
}

/// Raw SQL.
pub fn lit(sql: impl Into<String>) -> Literal {
    Literal {
        sql: sql.into(),
        args: Vec::new(),
    }
}

/// Raw SQL whose `?` markers are filled in from `args`.
///
/// ```ignore
/// lit_args("(? AND ?)", [col("a").eq(1), col("b").eq("b")]);
/// ```
pub fn lit_args<I, E>(sql: impl Into<String>, args: I) -> Literal
where
    I: IntoIterator<Item = E>,
    E: Into<Expr>,
{
    Literal {
        sql: sql.into(),
        args: args.into_iter().map(Into::into).collect(),
    }
}

/// A plain value.
pub fn val(v: impl Into<Value>) -> Expr {
    Expr::Value(v.into())
}

/// The `DEFAULT` keyword.
pub fn default_value() -> Expr {
    Expr::Default
}

pub fn cast(expr: impl Into<Expr>, ty: &str) -> Expr {
    Expr::Cast(Box::new(CastExpr {
        expr: expr.into(),
        ty: ty.to_owned(),
    }))
}

/// `LATERAL (subquery)`.
pub fn lateral(query: impl Into<Query>) -> Expr {
    Expr::Lateral(Box::new(query.into()))
}

/// `ANY (subquery)`.
pub fn any(expr: impl Into<Expr>) -> SqlFunction {
    func("ANY ", [expr.into()])
}

/// `ALL (subquery)`.
pub fn all(expr: impl Into<Expr>) -> SqlFunction {
    func("ALL ", [expr.into()])
}

/// Compile a regular expression for use with `eq`, `like` and friends.
pub fn regex(pattern: &str) -> BuildResult<Expr> {
    regex::Regex::new(pattern)
        .map(Expr::Regex)
        .map_err(|e| BuildError::InvalidPattern(e.to_string()))
}

/// `(~ expr)`.
pub fn bitwise_inversion(expr: impl Into<Expr>) -> Expr {
    Expr::Bitwise(Box::new(BitwiseExpr {
        op: BitwiseOp::Inversion,
        lhs: None,
        rhs: expr.into(),
    }))
}

#[cfg(test)]
mod tests;
