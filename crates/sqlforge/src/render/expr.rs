//! Expression rendering.
//!
//! Parentheses follow node kinds: every boolean, range and bitwise node and
//! every list of two or more conditions wraps itself, nothing else does.

use super::Renderer;
use crate::error::BuildError;
use crate::expr::{
    BitwiseExpr, BooleanExpr, BooleanOp, CaseExpr, ColumnList, Expr, ExpressionList, ListKind,
    Literal, NullsOrder, OrderedExpr, RangeExpr, SortDirection, SqlFunction, Window,
    WindowFunction,
};
use crate::ident::Ident;
use crate::value::Value;
use crate::writer::SqlWriter;

impl Renderer<'_> {
    /// Write any expression. Does nothing once the writer holds an error.
    pub fn render_expr(&self, expr: &Expr, w: &mut SqlWriter) {
        if w.has_error() {
            return;
        }
        match expr {
            Expr::Ident(ident) => self.write_ident(ident, w),
            Expr::Literal(lit) => self.write_literal(lit, w),
            Expr::Value(value) => self.write_value(value, w),
            Expr::Default => w.push(&self.opts().default_literal),
            Expr::Aliased(aliased) => {
                self.render_expr(&aliased.expr, w);
                w.push(" AS ");
                self.write_ident(&aliased.alias, w);
            }
            Expr::Boolean(b) => self.write_boolean(b, w),
            Expr::Range(r) => self.write_range(r, w),
            Expr::Bitwise(b) => self.write_bitwise(b, w),
            Expr::Function(f) => self.write_function(f, w),
            Expr::Cast(cast) => {
                w.push("CAST(");
                self.render_expr(&cast.expr, w);
                w.push(" AS ");
                w.push(&cast.ty);
                w.push_char(')');
            }
            Expr::Case(case) => self.write_case(case, w),
            Expr::WindowFunction(wf) => self.write_window_function(wf, w),
            Expr::Ordered(ordered) => self.write_ordered(ordered, w),
            Expr::ColumnList(cols) => self.write_column_list(cols, w),
            Expr::List(list) => self.write_expression_list(list, w),
            Expr::Ex(ex) => match ex.to_expression_list() {
                Ok(list) => self.write_expression_list(&list, w),
                Err(err) => w.set_error(err),
            },
            Expr::ExOr(ex) => match ex.to_expression_list() {
                Ok(list) => self.write_expression_list(&list, w),
                Err(err) => w.set_error(err),
            },
            Expr::Regex(re) => self.write_value(&Value::String(re.as_str().to_owned()), w),
            Expr::Lateral(query) => {
                if !self.opts().supports_lateral {
                    w.set_error(self.dialect.unsupported("LATERAL"));
                    return;
                }
                w.push("LATERAL ");
                self.write_subquery(query, w);
            }
            Expr::Query(query) => self.write_subquery(query, w),
        }
    }

    pub(crate) fn write_ident(&self, ident: &Ident, w: &mut SqlWriter) {
        if ident.is_empty() {
            w.set_error(BuildError::EmptyIdentifier);
            return;
        }
        ident.write_sql(self.opts().quote_char, w.buf_mut());
    }

    fn write_literal(&self, lit: &Literal, w: &mut SqlWriter) {
        if lit.args.is_empty() {
            w.push(&lit.sql);
            return;
        }
        let mut args = lit.args.iter();
        for ch in lit.sql.chars() {
            if ch == '?' {
                if let Some(arg) = args.next() {
                    self.render_expr(arg, w);
                    continue;
                }
            }
            w.push_char(ch);
        }
    }

    fn write_boolean(&self, b: &BooleanExpr, w: &mut SqlWriter) {
        let (op, rhs) = self.resolve_boolean(b, w);
        let Some(token) = self.opts().boolean_operator(op) else {
            w.set_error(BuildError::UnsupportedOperator {
                kind: "boolean",
                op: op.to_string(),
            });
            return;
        };
        w.push_char('(');
        self.render_expr(&b.lhs, w);
        w.push_char(' ');
        w.push(token);
        w.push_char(' ');
        match &rhs {
            Expr::Value(Value::Bool(v)) if op.is_identity() && self.opts().use_literal_is_bools => {
                self.write_bool_literal(*v, w)
            }
            rhs => self.render_expr(rhs, w),
        }
        w.push_char(')');
    }

    /// Rewrite regexp operators the dialect lacks into LIKE operators with a
    /// translated pattern.
    fn resolve_boolean(&self, b: &BooleanExpr, w: &mut SqlWriter) -> (BooleanOp, Expr) {
        if !b.op.is_regexp() || self.opts().boolean_operator(b.op).is_some() {
            return (b.op, b.rhs.clone());
        }
        let op = match b.op {
            BooleanOp::RegexpLike => BooleanOp::Like,
            BooleanOp::RegexpNotLike => BooleanOp::NotLike,
            BooleanOp::RegexpILike => BooleanOp::ILike,
            _ => BooleanOp::NotILike,
        };
        let rhs = match &b.rhs {
            Expr::Value(Value::String(pattern)) => match super::like_pattern(pattern) {
                Ok(like) => Expr::Value(Value::String(like)),
                Err(err) => {
                    w.set_error(err);
                    b.rhs.clone()
                }
            },
            Expr::Regex(re) => match super::like_pattern(re.as_str()) {
                Ok(like) => Expr::Value(Value::String(like)),
                Err(err) => {
                    w.set_error(err);
                    b.rhs.clone()
                }
            },
            other => other.clone(),
        };
        (op, rhs)
    }

    fn write_range(&self, r: &RangeExpr, w: &mut SqlWriter) {
        let Some(token) = self.opts().range_operator(r.op) else {
            w.set_error(BuildError::UnsupportedOperator {
                kind: "range",
                op: r.op.to_string(),
            });
            return;
        };
        w.push_char('(');
        self.render_expr(&r.lhs, w);
        w.push_char(' ');
        w.push(token);
        w.push_char(' ');
        self.render_expr(&r.start, w);
        w.push(" AND ");
        self.render_expr(&r.end, w);
        w.push_char(')');
    }

    fn write_bitwise(&self, b: &BitwiseExpr, w: &mut SqlWriter) {
        let Some(token) = self.opts().bitwise_operator(b.op) else {
            w.set_error(BuildError::UnsupportedOperator {
                kind: "bitwise",
                op: b.op.to_string(),
            });
            return;
        };
        w.push_char('(');
        if let Some(lhs) = &b.lhs {
            self.render_expr(lhs, w);
            w.push_char(' ');
        }
        w.push(token);
        w.push_char(' ');
        self.render_expr(&b.rhs, w);
        w.push_char(')');
    }

    fn write_function(&self, f: &SqlFunction, w: &mut SqlWriter) {
        w.push(&f.name);
        w.push_char('(');
        self.write_comma_separated(&f.args, w);
        w.push_char(')');
    }

    fn write_case(&self, case: &CaseExpr, w: &mut SqlWriter) {
        if case.whens.is_empty() {
            w.set_error(BuildError::message(
                "when conditions not found for case statement",
            ));
            return;
        }
        w.push("CASE ");
        if let Some(value) = &case.value {
            self.render_expr(value, w);
        }
        for when in &case.whens {
            w.push(" WHEN ");
            self.render_expr(&when.condition, w);
            w.push(" THEN ");
            self.render_expr(&when.result, w);
        }
        if let Some(else_) = &case.else_ {
            w.push(" ELSE ");
            self.render_expr(else_, w);
        }
        w.push(" END");
    }

    fn write_window_function(&self, wf: &WindowFunction, w: &mut SqlWriter) {
        if !self.opts().supports_window_function {
            w.set_error(self.dialect.unsupported("window function clause"));
            return;
        }
        self.write_function(&wf.func, w);
        w.push(" OVER ");
        match (&wf.window_name, &wf.window) {
            (Some(name), _) => self.write_ident(name, w),
            (None, Some(window)) => self.write_window(window, w),
            (None, None) => w.push("()"),
        }
    }

    /// `"name" AS (parent PARTITION BY .. ORDER BY ..)`, the name only when
    /// the window has one.
    pub(crate) fn write_window(&self, window: &Window, w: &mut SqlWriter) {
        if let Some(name) = &window.name {
            self.write_ident(name, w);
            w.push(" AS ");
        }
        w.push_char('(');
        let has_partition = !window.partition_by.is_empty();
        let has_order = !window.order_by.is_empty();
        if let Some(parent) = &window.parent {
            self.write_ident(parent, w);
            if has_partition || has_order {
                w.push_char(' ');
            }
        }
        if has_partition {
            w.push("PARTITION BY ");
            self.write_column_list(&window.partition_by, w);
            if has_order {
                w.push_char(' ');
            }
        }
        if has_order {
            w.push("ORDER BY ");
            self.write_column_list(&window.order_by, w);
        }
        w.push_char(')');
    }

    fn write_ordered(&self, ordered: &OrderedExpr, w: &mut SqlWriter) {
        self.render_expr(&ordered.expr, w);
        w.push(match ordered.direction {
            SortDirection::Asc => " ASC",
            SortDirection::Desc => " DESC",
        });
        match ordered.nulls {
            NullsOrder::Unspecified => {}
            NullsOrder::First => w.push(" NULLS FIRST"),
            NullsOrder::Last => w.push(" NULLS LAST"),
        }
    }

    pub(crate) fn write_column_list(&self, cols: &ColumnList, w: &mut SqlWriter) {
        self.write_comma_separated(cols.items(), w);
    }

    fn write_comma_separated(&self, items: &[Expr], w: &mut SqlWriter) {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                w.push(", ");
            }
            self.render_expr(item, w);
        }
    }

    /// Nothing for an empty list, the item alone for one, `(a AND b)` for
    /// more.
    pub(crate) fn write_expression_list(&self, list: &ExpressionList, w: &mut SqlWriter) {
        match list.items() {
            [] => {}
            [only] => self.render_expr(only, w),
            items => {
                let sep = match list.kind() {
                    ListKind::And => " AND ",
                    ListKind::Or => " OR ",
                };
                w.push_char('(');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        w.push(sep);
                    }
                    self.render_expr(item, w);
                }
                w.push_char(')');
            }
        }
    }
}
