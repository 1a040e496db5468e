//! Column to value rows used for INSERT values and UPDATE assignments.

use std::collections::{BTreeMap, HashMap};

use crate::column_map::{ColumnMap, Record};
use crate::error::BuildResult;
use crate::expr::{Assignment, Expr};

/// An ordered column to expression map.
///
/// Iteration is always in lexical column order, whatever order the columns
/// were added in.
#[derive(Debug, Clone, Default)]
pub struct Row {
    entries: BTreeMap<String, Expr>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// A new row with `column` set to `value`.
    pub fn set(mut self, column: &str, value: impl Into<Expr>) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: &str, value: impl Into<Expr>) {
        self.entries.insert(column.to_owned(), value.into());
    }

    pub fn get(&self, column: &str) -> Option<&Expr> {
        self.entries.get(column)
    }

    /// Column names, sorted.
    pub fn columns(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Expr)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `"col"=value` items in column order. Column names are parsed as
    /// dotted identifiers.
    pub fn to_assignments(&self) -> Vec<Assignment> {
        self.entries
            .iter()
            .map(|(col, value)| Assignment::new(col.as_str(), value.clone()))
            .collect()
    }
}

impl<K: AsRef<str>, V: Into<Expr>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (k, v) in iter {
            row.insert(k.as_ref(), v);
        }
        row
    }
}

impl<K: AsRef<str>, V: Into<Expr>, const N: usize> From<[(K, V); N]> for Row {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

/// Anything that can supply an INSERT row or UPDATE assignments.
///
/// Implemented for [`Row`], string-keyed maps, and every type deriving
/// `Record`.
pub trait AsRow {
    /// Columns for an INSERT: skips `skipinsert` fields.
    fn insert_row(&self) -> BuildResult<Row>;

    /// Columns for an UPDATE: skips `skipupdate` fields.
    fn update_row(&self) -> BuildResult<Row>;
}

impl AsRow for Row {
    fn insert_row(&self) -> BuildResult<Row> {
        Ok(self.clone())
    }

    fn update_row(&self) -> BuildResult<Row> {
        Ok(self.clone())
    }
}

impl<T: AsRow + ?Sized> AsRow for &T {
    fn insert_row(&self) -> BuildResult<Row> {
        (**self).insert_row()
    }

    fn update_row(&self) -> BuildResult<Row> {
        (**self).update_row()
    }
}

impl<K: AsRef<str>, V: Into<Expr> + Clone, S> AsRow for HashMap<K, V, S> {
    fn insert_row(&self) -> BuildResult<Row> {
        Ok(self
            .iter()
            .map(|(k, v)| (k.as_ref(), v.clone()))
            .collect())
    }

    fn update_row(&self) -> BuildResult<Row> {
        self.insert_row()
    }
}

impl<K: AsRef<str>, V: Into<Expr> + Clone> AsRow for BTreeMap<K, V> {
    fn insert_row(&self) -> BuildResult<Row> {
        Ok(self
            .iter()
            .map(|(k, v)| (k.as_ref(), v.clone()))
            .collect())
    }

    fn update_row(&self) -> BuildResult<Row> {
        self.insert_row()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Purpose {
    Insert,
    Update,
}

/// INSERT row of a record. Used by derived [`AsRow`] impls.
pub fn record_insert_row<T: Record>(record: &T) -> BuildResult<Row> {
    record_row(record, Purpose::Insert)
}

/// UPDATE assignments of a record. Used by derived [`AsRow`] impls.
pub fn record_update_row<T: Record>(record: &T) -> BuildResult<Row> {
    record_row(record, Purpose::Update)
}

fn record_row<T: Record>(record: &T, purpose: Purpose) -> BuildResult<Row> {
    let map = ColumnMap::of::<T>();
    let mut row = Row::new();
    for col in map.iter() {
        let skip = match purpose {
            Purpose::Insert => !col.should_insert,
            Purpose::Update => !col.should_update,
        };
        if skip {
            continue;
        }
        // None: the column lives under an absent optional embedding.
        let Some(value) = record.field_value(&col.field_path)? else {
            continue;
        };
        if col.default_if_empty && value.is_empty_value() {
            row.insert(&col.column_name, Expr::Default);
        } else {
            row.insert(&col.column_name, value);
        }
    }
    Ok(row)
}
