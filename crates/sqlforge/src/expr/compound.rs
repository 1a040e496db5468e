use crate::dataset::SelectDataset;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompoundKind {
    Union,
    UnionAll,
    Intersect,
    IntersectAll,
}

impl CompoundKind {
    pub(crate) fn fragment(self) -> &'static str {
        match self {
            CompoundKind::Union => " UNION ",
            CompoundKind::UnionAll => " UNION ALL ",
            CompoundKind::Intersect => " INTERSECT ",
            CompoundKind::IntersectAll => " INTERSECT ALL ",
        }
    }
}

/// A SELECT combined with the enclosing one.
#[derive(Debug, Clone)]
pub struct Compound {
    pub(crate) kind: CompoundKind,
    pub(crate) rhs: SelectDataset,
}

impl Compound {
    pub fn new(kind: CompoundKind, rhs: SelectDataset) -> Self {
        Self { kind, rhs }
    }

    pub fn kind(&self) -> CompoundKind {
        self.kind
    }
}
