use super::Renderer;
use crate::clauses::DeleteClauses;
use crate::dialect::SqlFragment;
use crate::error::BuildError;
use crate::writer::SqlWriter;

impl Renderer<'_> {
    /// Write a DELETE in the dialect's `delete_order`.
    pub fn render_delete(&self, c: &DeleteClauses, w: &mut SqlWriter) {
        let Some(from) = c.from() else {
            w.set_error(BuildError::message(
                "no source found when generating delete sql",
            ));
            return;
        };
        let opts = self.opts();
        for fragment in &opts.delete_order {
            if w.has_error() {
                return;
            }
            match fragment {
                SqlFragment::CommonTables => self.write_common_tables(c.common_tables(), w),
                SqlFragment::DeleteBegin => w.push("DELETE"),
                SqlFragment::From => {
                    w.push(" FROM ");
                    self.render_expr(from, w);
                }
                SqlFragment::Where => {
                    if let Some(where_) = c.where_() {
                        w.push(" WHERE ");
                        self.write_expression_list(where_, w);
                    }
                }
                SqlFragment::Order => {
                    if c.has_order() {
                        if !opts.supports_order_by_on_delete {
                            w.set_error(self.dialect.unsupported("ORDER BY on DELETE"));
                            return;
                        }
                        w.push(" ORDER BY ");
                        self.write_column_list(c.order(), w);
                    }
                }
                SqlFragment::Limit => {
                    if let Some(limit) = c.limit() {
                        if !opts.supports_limit_on_delete {
                            w.set_error(self.dialect.unsupported("LIMIT on DELETE"));
                            return;
                        }
                        w.push(" LIMIT ");
                        self.render_expr(limit, w);
                    }
                }
                SqlFragment::Returning => self.write_returning(c.returning(), w),
                other => self.unsupported_fragment("DELETE", *other, w),
            }
        }
    }
}
