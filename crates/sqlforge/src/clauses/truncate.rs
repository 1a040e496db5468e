use crate::expr::ColumnList;

/// Options trailing the table list of a TRUNCATE.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TruncateOptions {
    pub cascade: bool,
    pub restrict: bool,
    /// `RESTART` or `CONTINUE`; empty for neither.
    pub identity: String,
}

#[derive(Debug, Clone, Default)]
pub struct TruncateClauses {
    tables: ColumnList,
    options: TruncateOptions,
}

impl TruncateClauses {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tables(&self) -> &ColumnList {
        &self.tables
    }

    pub fn set_tables(&self, tables: ColumnList) -> Self {
        Self {
            tables,
            options: self.options.clone(),
        }
    }

    pub fn options(&self) -> &TruncateOptions {
        &self.options
    }

    pub fn set_options(&self, options: TruncateOptions) -> Self {
        Self {
            tables: self.tables.clone(),
            options,
        }
    }
}
