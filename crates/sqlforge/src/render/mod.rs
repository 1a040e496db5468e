//! Renderer: walks clause containers in a dialect's fragment order and writes
//! SQL text plus arguments into a [`SqlWriter`].
//!
//! # Example
//!
//! ```ignore
//! use sqlforge::render::{render, Statement};
//! use sqlforge::{Dialect, SelectClauses, ColumnList};
//!
//! let clauses = SelectClauses::new().set_from(ColumnList::new("test"));
//! let (sql, args) = render(Statement::Select(&clauses), &Dialect::default(), false)?;
//! assert_eq!(sql, r#"SELECT * FROM "test""#);
//! ```

mod delete;
mod expr;
mod insert;
mod literal;
mod select;
mod truncate;
mod update;

use std::sync::Arc;

pub use literal::like_pattern;

use crate::clauses::{DeleteClauses, InsertClauses, SelectClauses, TruncateClauses, UpdateClauses};
use crate::config::{self, BuilderConfig};
use crate::dialect::{Dialect, DialectOptions, SqlFragment};
use crate::error::{BuildError, BuildResult};
use crate::expr::{ColumnList, CommonTable, Query};
use crate::value::Value;
use crate::writer::SqlWriter;

/// A borrowed statement ready to be rendered.
#[derive(Debug, Clone, Copy)]
pub enum Statement<'a> {
    Select(&'a SelectClauses),
    Insert(&'a InsertClauses),
    Update(&'a UpdateClauses),
    Delete(&'a DeleteClauses),
    Truncate(&'a TruncateClauses),
}

impl Statement<'_> {
    /// Lowercase statement keyword, used in log events.
    pub fn kind(&self) -> &'static str {
        match self {
            Statement::Select(_) => "select",
            Statement::Insert(_) => "insert",
            Statement::Update(_) => "update",
            Statement::Delete(_) => "delete",
            Statement::Truncate(_) => "truncate",
        }
    }
}

/// Render `statement` for `dialect` using the current global configuration.
pub fn render(
    statement: Statement<'_>,
    dialect: &Dialect,
    prepared: bool,
) -> BuildResult<(String, Vec<Value>)> {
    let renderer = Renderer::new(dialect);
    let mut w = renderer.writer(prepared);
    renderer.render_statement(statement, &mut w);
    w.finish()
}

/// Statement and expression renderer bound to one dialect and one
/// configuration snapshot.
#[derive(Debug)]
pub struct Renderer<'a> {
    dialect: &'a Dialect,
    config: Arc<BuilderConfig>,
}

impl<'a> Renderer<'a> {
    /// Bind to `dialect` with a snapshot of the global configuration.
    pub fn new(dialect: &'a Dialect) -> Self {
        Self {
            dialect,
            config: config::config(),
        }
    }

    pub fn with_config(dialect: &'a Dialect, config: Arc<BuilderConfig>) -> Self {
        Self { dialect, config }
    }

    pub fn dialect(&self) -> &Dialect {
        self.dialect
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// A fresh writer using this dialect's placeholder style.
    pub fn writer(&self, prepared: bool) -> SqlWriter {
        SqlWriter::new(prepared, self.opts().placeholder.clone())
    }

    pub fn render_statement(&self, statement: Statement<'_>, w: &mut SqlWriter) {
        match statement {
            Statement::Select(c) => self.render_select(c, w),
            Statement::Insert(c) => self.render_insert(c, w),
            Statement::Update(c) => self.render_update(c, w),
            Statement::Delete(c) => self.render_delete(c, w),
            Statement::Truncate(c) => self.render_truncate(c, w),
        }
    }

    fn opts(&self) -> &DialectOptions {
        self.dialect.options()
    }

    // ==================== shared fragments ====================

    /// Statements nested in this one are written with this renderer, so they
    /// share the outer dialect and placeholder numbering.
    pub(crate) fn render_query(&self, query: &Query, w: &mut SqlWriter) {
        if let Some(err) = query.error() {
            w.set_error(err.clone());
            return;
        }
        match query {
            Query::Select(ds) => self.render_select(ds.clauses(), w),
            Query::Insert(ds) => self.render_insert(ds.clauses(), w),
            Query::Update(ds) => self.render_update(ds.clauses(), w),
            Query::Delete(ds) => self.render_delete(ds.clauses(), w),
        }
    }

    /// `(subquery)`, followed by `AS alias` for aliased selects.
    pub(crate) fn write_subquery(&self, query: &Query, w: &mut SqlWriter) {
        if let Some(err) = query.error() {
            w.set_error(err.clone());
            return;
        }
        w.push_char('(');
        self.render_query(query, w);
        w.push_char(')');
        if let Query::Select(ds) = query {
            if let Some(alias) = ds.clauses().alias() {
                w.push(" AS ");
                self.write_ident(alias, w);
            }
        }
    }

    fn write_common_tables(&self, ctes: &[CommonTable], w: &mut SqlWriter) {
        if ctes.is_empty() {
            return;
        }
        if !self.opts().supports_with_cte {
            w.set_error(self.dialect.unsupported("WITH clause"));
            return;
        }
        w.push("WITH ");
        if ctes.iter().any(CommonTable::is_recursive) {
            if !self.opts().supports_with_cte_recursive {
                w.set_error(self.dialect.unsupported("WITH RECURSIVE clause"));
                return;
            }
            w.push("RECURSIVE ");
        }
        for (i, cte) in ctes.iter().enumerate() {
            if i > 0 {
                w.push(", ");
            }
            w.push(&cte.name);
            w.push(" AS ");
            self.write_subquery(&cte.query, w);
        }
        w.push_char(' ');
    }

    fn write_returning(&self, returning: &ColumnList, w: &mut SqlWriter) {
        if returning.is_empty() {
            return;
        }
        if !self.opts().supports_returning {
            w.set_error(self.dialect.unsupported("RETURNING clause"));
            return;
        }
        w.push(" RETURNING ");
        self.write_column_list(returning, w);
    }

    fn unsupported_fragment(&self, statement: &str, fragment: SqlFragment, w: &mut SqlWriter) {
        w.set_error(BuildError::message(format!(
            "unsupported {statement} SQL fragment {fragment:?}"
        )));
    }
}
