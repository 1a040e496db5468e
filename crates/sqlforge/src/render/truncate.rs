use super::Renderer;
use crate::clauses::TruncateClauses;
use crate::dialect::SqlFragment;
use crate::error::BuildError;
use crate::writer::SqlWriter;

impl Renderer<'_> {
    /// `TRUNCATE "a", "b" [RESTART|CONTINUE IDENTITY] [CASCADE|RESTRICT]`.
    pub fn render_truncate(&self, c: &TruncateClauses, w: &mut SqlWriter) {
        if c.tables().is_empty() {
            w.set_error(BuildError::message(
                "no source found when generating truncate sql",
            ));
            return;
        }
        for fragment in &self.opts().truncate_order {
            if w.has_error() {
                return;
            }
            match fragment {
                SqlFragment::Truncate => {
                    w.push("TRUNCATE ");
                    self.write_column_list(c.tables(), w);
                    let options = c.options();
                    if !options.identity.is_empty() {
                        w.push_char(' ');
                        w.push(&options.identity.to_uppercase());
                        w.push(" IDENTITY");
                    }
                    if options.cascade {
                        w.push(" CASCADE");
                    } else if options.restrict {
                        w.push(" RESTRICT");
                    }
                }
                other => self.unsupported_fragment("TRUNCATE", *other, w),
            }
        }
    }
}
