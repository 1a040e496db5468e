use super::Renderer;
use crate::clauses::UpdateClauses;
use crate::dialect::SqlFragment;
use crate::error::BuildError;
use crate::writer::SqlWriter;

impl Renderer<'_> {
    /// Write an UPDATE in the dialect's `update_order`.
    pub fn render_update(&self, c: &UpdateClauses, w: &mut SqlWriter) {
        let Some(table) = c.table() else {
            w.set_error(BuildError::message(
                "no source found when generating update sql",
            ));
            return;
        };
        let opts = self.opts();
        for fragment in &opts.update_order {
            if w.has_error() {
                return;
            }
            match fragment {
                SqlFragment::CommonTables => self.write_common_tables(c.common_tables(), w),
                SqlFragment::UpdateBegin => w.push("UPDATE"),
                SqlFragment::Sources => {
                    w.push_char(' ');
                    self.render_expr(table, w);
                    if c.has_from() && !opts.use_from_clause_for_multiple_update_tables {
                        if !opts.supports_multiple_update_tables {
                            w.set_error(self.dialect.unsupported("multiple tables in UPDATE"));
                            return;
                        }
                        w.push_char(',');
                        self.write_column_list(c.from(), w);
                    }
                }
                SqlFragment::Set => {
                    w.push(" SET ");
                    self.write_assignments(c.set_values(), w);
                }
                SqlFragment::UpdateFrom => {
                    if c.has_from() && opts.use_from_clause_for_multiple_update_tables {
                        if !opts.supports_multiple_update_tables {
                            w.set_error(self.dialect.unsupported("multiple tables in UPDATE FROM"));
                            return;
                        }
                        w.push(" FROM ");
                        self.write_column_list(c.from(), w);
                    }
                }
                SqlFragment::Where => {
                    if let Some(where_) = c.where_() {
                        w.push(" WHERE ");
                        self.write_expression_list(where_, w);
                    }
                }
                SqlFragment::Order => {
                    if c.has_order() {
                        if !opts.supports_order_by_on_update {
                            w.set_error(self.dialect.unsupported("ORDER BY on UPDATE"));
                            return;
                        }
                        w.push(" ORDER BY ");
                        self.write_column_list(c.order(), w);
                    }
                }
                SqlFragment::Limit => {
                    if let Some(limit) = c.limit() {
                        if !opts.supports_limit_on_update {
                            w.set_error(self.dialect.unsupported("LIMIT on UPDATE"));
                            return;
                        }
                        w.push(" LIMIT ");
                        self.render_expr(limit, w);
                    }
                }
                SqlFragment::Returning => self.write_returning(c.returning(), w),
                other => self.unsupported_fragment("UPDATE", *other, w),
            }
        }
    }
}
