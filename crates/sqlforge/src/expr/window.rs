use super::{ColumnList, IntoColumns};
use crate::ident::Ident;

/// A window definition: `"name" AS ("parent" PARTITION BY .. ORDER BY ..)`.
#[derive(Debug, Clone, Default)]
pub struct Window {
    pub(crate) name: Option<Ident>,
    pub(crate) parent: Option<Ident>,
    pub(crate) partition_by: ColumnList,
    pub(crate) order_by: ColumnList,
}

impl Window {
    /// An anonymous window, for use with `over`.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> Option<&Ident> {
        self.name.as_ref()
    }

    /// Inherit from a named window.
    pub fn inherit(mut self, parent: &str) -> Self {
        self.parent = Some(Ident::column(parent));
        self
    }

    pub fn partition_by(mut self, cols: impl IntoColumns) -> Self {
        self.partition_by = ColumnList::new(cols);
        self
    }

    pub fn order_by(mut self, cols: impl IntoColumns) -> Self {
        self.order_by = ColumnList::new(cols);
        self
    }
}

/// A named window for the WINDOW clause.
pub fn window(name: &str) -> Window {
    Window {
        name: Some(Ident::column(name)),
        ..Window::default()
    }
}
