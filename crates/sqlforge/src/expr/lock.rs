use crate::ident::Ident;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockStrength {
    Update,
    NoKeyUpdate,
    Share,
    KeyShare,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WaitOption {
    #[default]
    Wait,
    NoWait,
    SkipLocked,
}

/// `FOR UPDATE [OF t1, t2] [NOWAIT | SKIP LOCKED]` and friends.
#[derive(Debug, Clone)]
pub struct Lock {
    pub(crate) strength: LockStrength,
    pub(crate) wait: WaitOption,
    pub(crate) of: Vec<Ident>,
}

impl Lock {
    pub fn new(strength: LockStrength, wait: WaitOption) -> Self {
        Self {
            strength,
            wait,
            of: Vec::new(),
        }
    }

    /// Lock only rows from these tables.
    pub fn of<I, S>(mut self, tables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.of = tables
            .into_iter()
            .map(|t| Ident::table_only(t.as_ref()))
            .collect();
        self
    }

    pub fn strength(&self) -> LockStrength {
        self.strength
    }
}
