use super::Renderer;
use crate::clauses::SelectClauses;
use crate::dialect::SqlFragment;
use crate::error::BuildError;
use crate::expr::{Compound, Join, JoinCondition, Lock, LockStrength, WaitOption};
use crate::value::Value;
use crate::writer::SqlWriter;

impl Renderer<'_> {
    /// Write a SELECT in the dialect's `select_order`.
    pub fn render_select(&self, c: &SelectClauses, w: &mut SqlWriter) {
        for fragment in &self.opts().select_order {
            if w.has_error() {
                return;
            }
            match fragment {
                SqlFragment::CommonTables => self.write_common_tables(c.common_tables(), w),
                SqlFragment::Select => self.write_select_cols(c, w),
                SqlFragment::From => {
                    if c.has_sources() {
                        w.push(" FROM ");
                        self.write_column_list(c.from(), w);
                    }
                }
                SqlFragment::Join => {
                    for join in c.joins() {
                        self.write_join(join, w);
                    }
                }
                SqlFragment::Where => {
                    if let Some(where_) = c.where_() {
                        w.push(" WHERE ");
                        self.write_expression_list(where_, w);
                    }
                }
                SqlFragment::GroupBy => {
                    if !c.group_by().is_empty() {
                        w.push(" GROUP BY ");
                        self.write_column_list(c.group_by(), w);
                    }
                }
                SqlFragment::Having => {
                    if let Some(having) = c.having() {
                        w.push(" HAVING ");
                        self.write_expression_list(having, w);
                    }
                }
                SqlFragment::Window => self.write_windows(c, w),
                SqlFragment::Compounds => {
                    for compound in c.compounds() {
                        self.write_compound(compound, w);
                    }
                }
                SqlFragment::Order => {
                    if c.has_order() {
                        w.push(" ORDER BY ");
                        self.write_column_list(c.order(), w);
                    }
                }
                SqlFragment::Limit => {
                    if let Some(limit) = c.limit() {
                        w.push(" LIMIT ");
                        self.render_expr(limit, w);
                    }
                }
                SqlFragment::Offset => {
                    if c.offset() > 0 {
                        w.push(" OFFSET ");
                        self.write_value(&Value::from(c.offset()), w);
                    }
                }
                SqlFragment::Lock => {
                    if let Some(lock) = c.lock() {
                        self.write_lock(lock, w);
                    }
                }
                other => self.unsupported_fragment("SELECT", *other, w),
            }
        }
    }

    fn write_select_cols(&self, c: &SelectClauses, w: &mut SqlWriter) {
        w.push("SELECT");
        if let Some(distinct) = c.distinct() {
            w.push(" DISTINCT");
            if !distinct.is_empty() {
                if !self.opts().supports_distinct_on {
                    w.set_error(self.dialect.unsupported("DISTINCT ON clause"));
                    return;
                }
                w.push(" ON (");
                self.write_column_list(distinct, w);
                w.push_char(')');
            }
        }
        w.push_char(' ');
        if c.is_default_select() {
            w.push_char('*');
        } else {
            self.write_column_list(c.select(), w);
        }
    }

    fn write_join(&self, join: &Join, w: &mut SqlWriter) {
        let Some(token) = self.opts().join_type(join.kind) else {
            w.set_error(BuildError::UnsupportedOperator {
                kind: "join",
                op: join.kind.to_string(),
            });
            return;
        };
        if join.kind.is_conditioned() && join.condition.is_empty() {
            w.set_error(BuildError::JoinConditionRequired(join.kind.to_string()));
            return;
        }
        w.push(token);
        self.render_expr(&join.table, w);
        match &join.condition {
            JoinCondition::None => {}
            JoinCondition::On(on) if on.is_empty() => {}
            JoinCondition::On(on) => {
                w.push(" ON ");
                self.write_expression_list(on, w);
            }
            JoinCondition::Using(cols) if cols.is_empty() => {}
            JoinCondition::Using(cols) => {
                w.push(" USING (");
                self.write_column_list(cols, w);
                w.push_char(')');
            }
        }
    }

    fn write_windows(&self, c: &SelectClauses, w: &mut SqlWriter) {
        if c.windows().is_empty() {
            return;
        }
        if !self.opts().supports_window_function {
            w.set_error(self.dialect.unsupported("WINDOW clause"));
            return;
        }
        w.push(" WINDOW ");
        for (i, window) in c.windows().iter().enumerate() {
            if i > 0 {
                w.push(", ");
            }
            self.write_window(window, w);
        }
    }

    fn write_compound(&self, compound: &Compound, w: &mut SqlWriter) {
        if let Some(err) = compound.rhs.error() {
            w.set_error(err.clone());
            return;
        }
        w.push(compound.kind.fragment());
        let wrap = self.opts().wrap_compounds_in_parens;
        if wrap {
            w.push_char('(');
        }
        self.render_select(compound.rhs.clauses(), w);
        if wrap {
            w.push_char(')');
        }
    }

    fn write_lock(&self, lock: &Lock, w: &mut SqlWriter) {
        if !self.opts().supports_lock {
            w.set_error(self.dialect.unsupported("FOR UPDATE/SHARE locking"));
            return;
        }
        w.push(match lock.strength {
            LockStrength::Update => " FOR UPDATE ",
            LockStrength::NoKeyUpdate => " FOR NO KEY UPDATE ",
            LockStrength::Share => " FOR SHARE ",
            LockStrength::KeyShare => " FOR KEY SHARE ",
        });
        if !lock.of.is_empty() {
            w.push("OF ");
            for (i, table) in lock.of.iter().enumerate() {
                if i > 0 {
                    w.push(", ");
                }
                self.write_ident(table, w);
            }
            w.push_char(' ');
        }
        match lock.wait {
            WaitOption::Wait => {}
            WaitOption::NoWait => w.push("NOWAIT"),
            WaitOption::SkipLocked => w.push("SKIP LOCKED"),
        }
    }
}
