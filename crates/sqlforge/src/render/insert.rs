use super::Renderer;
use crate::clauses::InsertClauses;
use crate::dialect::SqlFragment;
use crate::error::BuildError;
use crate::expr::{Assignment, Conflict, Expr, ExpressionList};
use crate::ident::Ident;
use crate::row::Row;
use crate::writer::SqlWriter;

impl Renderer<'_> {
    /// Write an INSERT in the dialect's `insert_order`.
    pub fn render_insert(&self, c: &InsertClauses, w: &mut SqlWriter) {
        let Some(into) = c.into_table() else {
            w.set_error(BuildError::message(
                "no source found when generating insert sql",
            ));
            return;
        };
        for fragment in &self.opts().insert_order {
            if w.has_error() {
                return;
            }
            match fragment {
                SqlFragment::CommonTables => self.write_common_tables(c.common_tables(), w),
                SqlFragment::InsertBegin => {
                    let ignore = self.opts().supports_insert_ignore_syntax
                        && c.on_conflict().is_some_and(Conflict::is_do_nothing);
                    if ignore {
                        w.push(&self.opts().insert_ignore_clause);
                    } else {
                        w.push(&self.opts().insert_clause);
                    }
                }
                SqlFragment::Into => {
                    w.push_char(' ');
                    self.render_expr(into, w);
                    if let Some(alias) = c.alias() {
                        w.push(" AS ");
                        self.write_ident(alias, w);
                    }
                }
                SqlFragment::Insert => {
                    self.write_insert_body(c, w);
                    if let Some(conflict) = c.on_conflict() {
                        self.write_conflict(conflict, w);
                    }
                }
                SqlFragment::Returning => self.write_returning(c.returning(), w),
                other => self.unsupported_fragment("INSERT", *other, w),
            }
        }
    }

    fn write_insert_body(&self, c: &InsertClauses, w: &mut SqlWriter) {
        if c.has_rows() {
            self.write_rows(c.rows(), w);
        } else if c.has_vals() {
            let width = if c.has_cols() {
                self.write_insert_cols(c, w);
                c.cols().len()
            } else {
                c.vals()[0].len()
            };
            self.write_vals(c.vals(), width, w);
        } else if let Some(from) = c.from() {
            if c.has_cols() {
                self.write_insert_cols(c, w);
            }
            w.push_char(' ');
            self.render_query(from, w);
        } else {
            w.push(" DEFAULT VALUES");
        }
    }

    fn write_insert_cols(&self, c: &InsertClauses, w: &mut SqlWriter) {
        w.push(" (");
        self.write_column_list(c.cols(), w);
        w.push_char(')');
    }

    /// Columns come from the first row; every other row must have the same
    /// columns.
    fn write_rows(&self, rows: &[Row], w: &mut SqlWriter) {
        let Some(first) = rows.first() else {
            return;
        };
        let columns = first.columns();
        for row in &rows[1..] {
            if row.len() != columns.len() {
                w.set_error(BuildError::row_shape(format!(
                    "rows with different value length expected {} got {}",
                    columns.len(),
                    row.len()
                )));
                return;
            }
            let keys = row.columns();
            if keys != columns {
                w.set_error(BuildError::row_shape(format!(
                    "rows with different keys expected {columns:?} got {keys:?}"
                )));
                return;
            }
        }

        w.push(" (");
        for (i, col) in columns.iter().enumerate() {
            if i > 0 {
                w.push(", ");
            }
            self.write_ident(&Ident::parse(col), w);
        }
        w.push(") VALUES ");
        for (i, row) in rows.iter().enumerate() {
            if i > 0 {
                w.push(", ");
            }
            w.push_char('(');
            for (j, (_, value)) in row.iter().enumerate() {
                if j > 0 {
                    w.push(", ");
                }
                self.render_expr(value, w);
            }
            w.push_char(')');
        }
    }

    /// Every row must hold exactly `width` values.
    fn write_vals(&self, vals: &[Vec<Expr>], width: usize, w: &mut SqlWriter) {
        if let Some(row) = vals.iter().find(|row| row.len() != width) {
            w.set_error(BuildError::row_shape(format!(
                "rows with different value length expected {width} got {}",
                row.len()
            )));
            return;
        }
        w.push(" VALUES ");
        for (i, row) in vals.iter().enumerate() {
            if i > 0 {
                w.push(", ");
            }
            w.push_char('(');
            for (j, value) in row.iter().enumerate() {
                if j > 0 {
                    w.push(", ");
                }
                self.render_expr(value, w);
            }
            w.push_char(')');
        }
    }

    fn write_conflict(&self, conflict: &Conflict, w: &mut SqlWriter) {
        w.push(&self.opts().conflict_fragment);
        match conflict {
            Conflict::DoNothing => w.push(&self.opts().conflict_do_nothing_fragment),
            Conflict::DoUpdate {
                target,
                update,
                where_,
            } => {
                if self.opts().supports_conflict_target && !target.is_empty() {
                    let wrap = !target.to_ascii_lowercase().starts_with("on constraint");
                    w.push_char(' ');
                    if wrap {
                        w.push_char('(');
                    }
                    w.push(target);
                    if wrap {
                        w.push_char(')');
                    }
                }
                w.push(&self.opts().conflict_do_update_fragment);
                self.write_assignments(&update.to_assignments(), w);
                self.write_conflict_where(where_.as_ref(), w);
            }
        }
    }

    fn write_conflict_where(&self, where_: Option<&ExpressionList>, w: &mut SqlWriter) {
        let Some(where_) = where_.filter(|list| !list.is_empty()) else {
            return;
        };
        if w.has_error() {
            return;
        }
        if !self.opts().supports_conflict_update_where {
            w.set_error(self.dialect.unsupported("upsert with where clause"));
            return;
        }
        w.push(" WHERE ");
        self.write_expression_list(where_, w);
    }

    /// `"a"=1,"b"=2`.
    pub(crate) fn write_assignments(&self, assignments: &[Assignment], w: &mut SqlWriter) {
        if assignments.is_empty() {
            w.set_error(BuildError::message("no update values provided"));
            return;
        }
        for (i, assignment) in assignments.iter().enumerate() {
            if i > 0 {
                w.push_char(',');
            }
            self.write_ident(&assignment.col, w);
            w.push_char('=');
            self.render_expr(&assignment.value, w);
        }
    }
}
