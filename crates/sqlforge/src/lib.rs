//! # sqlforge
//!
//! A dialect-agnostic SQL statement builder.
//!
//! ## Features
//!
//! - **Immutable builders**: every builder call returns a new value, so queries can be branched freely
//! - **Dialects**: `default`, `postgres`, `mysql`, `mysql8` and `sqlite3` built in, more can be registered at runtime
//! - **Interpolated or prepared**: render values inline or as placeholders plus arguments
//! - **Record mapping**: `#[derive(Record)]` maps struct fields to columns for inserts, updates and selects
//! - **Errors, not panics**: unsupported clauses and invalid input surface from `to_sql()`
//!
//! ## Usage
//!
//! ```ignore
//! use sqlforge::{col, dialect, from, insert, on, Ex, Op};
//!
//! // SELECT
//! let (sql, _) = from("test")
//!     .where_([Ex::new().with("a", 10).op("b", Op::new().lt(10))])
//!     .order(col("a").desc())
//!     .to_sql()?;
//! assert_eq!(sql, r#"SELECT * FROM "test" WHERE (("a" = 10) AND ("b" < 10)) ORDER BY "a" DESC"#);
//!
//! // Prepared, postgres placeholders
//! let (sql, args) = dialect("postgres")
//!     .from("test")
//!     .inner_join("test2", on([col("test.fkey").eq(col("test2.id"))]))
//!     .where_([col("test.name").eq("bob")])
//!     .prepared(true)
//!     .to_sql()?;
//!
//! // INSERT from records
//! let (sql, _) = insert("items").rows(&items).to_sql()?;
//! ```

extern crate self as sqlforge;

pub mod clauses;
pub mod column_map;
pub mod config;
pub mod dataset;
pub mod dialect;
pub mod error;
pub mod expr;
pub mod ident;
pub mod render;
pub mod row;
pub mod value;
pub mod writer;

pub use clauses::{
    DeleteClauses, InsertClauses, SelectClauses, TruncateClauses, TruncateOptions, UpdateClauses,
};
pub use column_map::{ColumnData, ColumnMap, FieldDescriptor, FieldKind, Record, TypeDescriptor};
pub use config::{BuilderConfig, ColumnRename};
pub use dataset::{
    DeleteDataset, DialectWrapper, InsertDataset, SelectDataset, TruncateDataset, UpdateDataset,
    delete, dialect, from, insert, select, truncate, update,
};
pub use dialect::{
    Dialect, DialectOptions, DialectRegistration, DialectRegistry, SqlFragment, TimeFormat,
    deregister_dialect, lookup_dialect, register_dialect,
};
pub use error::{BuildError, BuildResult};
pub use expr::{
    BitwiseOp, BooleanOp, CaseExpr, ColumnList, CommonTable, Conflict, Ex, ExOr, Expr,
    ExpressionList, IntoColumnExpr, IntoColumns, Join, JoinCondition, JoinKind, Literal, Lock,
    LockStrength, Op, Query, RangeOp, WaitOption, Window, all, and, any, avg, bitwise_inversion,
    case, cast, coalesce, col, count, cume_dist, default_value, dense_rank, distinct, do_nothing,
    do_update, first, first_value, func, ident, last, last_value, lateral, lit, lit_args, max, min,
    nth_value, ntile, on, or, percent_rank, rank, regex, row_number, schema, star, sum, table,
    using, val, window,
};
pub use ident::{Ident, IdentCol, IntoIdent};
pub use row::{AsRow, Row};
pub use value::{ToValue, Value};
pub use writer::{PlaceholderStyle, SqlWriter};

#[cfg(feature = "derive")]
pub use sqlforge_derive::Record;

// Re-export inventory for dialect registrations in downstream crates
pub use inventory;
