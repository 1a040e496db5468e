use super::Query;

/// `name AS (subquery)` in a WITH clause.
///
/// The name is written raw, so it may carry a column list such as
/// `"nums(n)"`.
#[derive(Debug, Clone)]
pub struct CommonTable {
    pub(crate) recursive: bool,
    pub(crate) name: String,
    pub(crate) query: Query,
}

impl CommonTable {
    pub fn new(recursive: bool, name: &str, query: impl Into<Query>) -> Self {
        Self {
            recursive,
            name: name.to_owned(),
            query: query.into(),
        }
    }

    pub fn is_recursive(&self) -> bool {
        self.recursive
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
