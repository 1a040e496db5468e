//! Record type to column mapping.
//!
//! A record type describes its shape once through a [`TypeDescriptor`]
//! (normally generated by `#[derive(Record)]`). [`ColumnMap`] walks that
//! descriptor and yields the column name of every reachable leaf field:
//!
//! - a field's column name is its column tag (`db` by default) or, when
//!   untagged, the configured rename of its field name
//! - a column tag of `-` excludes the field, as does a missing tag when
//!   untagged fields are ignored
//! - embedded (flattened) records contribute their columns, prefixed by the
//!   embedded field's column tag values when present
//! - nested records contribute `parent.child` columns
//! - when a record's own field and a promoted field share a column name,
//!   the record's own field wins
//!
//! Maps are cached per record type and dropped whenever the global
//! configuration changes.

use std::any::TypeId;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use crate::config::{self, BuilderConfig};
use crate::error::BuildResult;
use crate::value::Value;

/// Directive that excludes a field from INSERT rows.
pub const SKIP_INSERT: &str = "skipinsert";
/// Directive that excludes a field from UPDATE assignments.
pub const SKIP_UPDATE: &str = "skipupdate";
/// Directive that writes `DEFAULT` instead of an empty value.
pub const DEFAULT_IF_EMPTY: &str = "defaultifempty";

/// How a field participates in the mapping.
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    /// A single column.
    Leaf,
    /// An embedded record whose columns are promoted into the parent.
    /// `optional` marks an `Option<_>` embedding, which contributes no
    /// values when `None`.
    Embedded {
        optional: bool,
        descriptor: fn() -> TypeDescriptor,
    },
    /// A record-typed field whose columns are named `field.column`.
    Nested {
        optional: bool,
        descriptor: fn() -> TypeDescriptor,
    },
}

/// One field of a record type.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub type_name: &'static str,
    /// `(namespace, value)` pairs, e.g. `("db", "user_id")`.
    pub tags: &'static [(&'static str, &'static str)],
    pub kind: FieldKind,
}

impl FieldDescriptor {
    /// Comma-separated values of the tag in `namespace`. Empty when the tag
    /// is missing or blank.
    pub fn tag_values(&self, namespace: &str) -> Vec<&'static str> {
        self.tags
            .iter()
            .find(|(ns, _)| *ns == namespace)
            .map(|(_, value)| *value)
            .filter(|value| !value.is_empty())
            .map(|value| value.split(',').map(str::trim).collect())
            .unwrap_or_default()
    }
}

/// The shape of a record type.
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    pub type_name: &'static str,
    pub fields: Vec<FieldDescriptor>,
}

/// A type that can be mapped to columns.
///
/// Usually derived:
///
/// ```ignore
/// #[derive(sqlforge::Record)]
/// struct Item {
///     #[record(db = "id", builder = "skipinsert")]
///     id: i64,
///     name: String,
/// }
/// ```
pub trait Record: 'static {
    fn descriptor() -> TypeDescriptor;

    /// Value of the leaf at `path` (indices into nested descriptors).
    ///
    /// `Ok(None)` means the path runs through an absent optional embedding.
    fn field_value(&self, path: &[usize]) -> BuildResult<Option<Value>>;
}

/// Mapping data for one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnData {
    pub column_name: String,
    pub field_path: Vec<usize>,
    pub should_insert: bool,
    pub should_update: bool,
    pub default_if_empty: bool,
    pub type_name: &'static str,
}

/// Column name to field mapping of a record type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    columns: BTreeMap<String, ColumnData>,
}

impl ColumnMap {
    /// The (cached) map of `T` under the current configuration.
    pub fn of<T: Record>() -> Arc<ColumnMap> {
        let key = TypeId::of::<T>();
        loop {
            if let Some(found) = CACHE
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .get(&key)
            {
                return Arc::clone(found);
            }

            let snapshot = config::config();
            let map = Arc::new(Self::for_descriptor(&T::descriptor(), &snapshot));
            let mut cache = CACHE.write().unwrap_or_else(PoisonError::into_inner);
            // A config swap since the snapshot makes `map` stale; `set_config`
            // clears the cache only after swapping, so checking under the
            // cache lock is enough.
            if Arc::ptr_eq(&snapshot, &config::config()) {
                return cache.entry(key).or_insert(map).clone();
            }
        }
    }

    /// Compute a map without touching the cache.
    pub fn for_descriptor(descriptor: &TypeDescriptor, config: &BuilderConfig) -> Self {
        let mut visiting = Vec::new();
        Self {
            columns: build(descriptor, &[], &[], &mut visiting, config),
        }
    }

    pub fn get(&self, column: &str) -> Option<&ColumnData> {
        self.columns.get(column)
    }

    /// Column names, sorted.
    pub fn cols(&self) -> Vec<&str> {
        self.columns.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ColumnData> {
        self.columns.values()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

static CACHE: LazyLock<RwLock<HashMap<TypeId, Arc<ColumnMap>>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

/// Drop every cached map.
pub fn clear_cache() {
    CACHE
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .clear();
}

fn build(
    descriptor: &TypeDescriptor,
    field_path: &[usize],
    prefixes: &[String],
    visiting: &mut Vec<&'static str>,
    config: &BuilderConfig,
) -> BTreeMap<String, ColumnData> {
    // A type already on the current path would recurse forever.
    if visiting.contains(&descriptor.type_name) {
        return BTreeMap::new();
    }
    visiting.push(descriptor.type_name);

    let mut own = BTreeMap::new();
    let mut promoted = Vec::new();

    for (idx, field) in descriptor.fields.iter().enumerate() {
        let mut path = field_path.to_vec();
        path.push(idx);
        let column_tag = field.tag_values(&config.column_tag);

        match field.kind {
            FieldKind::Embedded { descriptor, .. } => {
                if column_tag.contains(&"-") {
                    continue;
                }
                let mut sub_prefixes = prefixes.to_vec();
                sub_prefixes.extend(column_tag.iter().map(|s| s.to_string()));
                promoted.push(build(&descriptor(), &path, &sub_prefixes, visiting, config));
            }
            FieldKind::Nested { descriptor, .. } => {
                if should_ignore(&column_tag, config) {
                    continue;
                }
                let name = column_name(field, &column_tag, config);
                let mut sub_prefixes = prefixes.to_vec();
                sub_prefixes.push(name);
                let sub = build(&descriptor(), &path, &sub_prefixes, visiting, config);
                if !sub.is_empty() {
                    promoted.push(sub);
                }
            }
            FieldKind::Leaf => {
                if should_ignore(&column_tag, config) {
                    continue;
                }
                let mut name = prefixes.join(".");
                if !name.is_empty() {
                    name.push('.');
                }
                name.push_str(&column_name(field, &column_tag, config));

                let directives = field.tag_values(&config.directive_tag);
                own.insert(
                    name.clone(),
                    ColumnData {
                        column_name: name,
                        field_path: path,
                        should_insert: !directives.contains(&SKIP_INSERT),
                        should_update: !directives.contains(&SKIP_UPDATE),
                        default_if_empty: directives.contains(&DEFAULT_IF_EMPTY),
                        type_name: field.type_name,
                    },
                );
            }
        }
    }

    visiting.pop();

    for sub in promoted {
        for (name, data) in sub {
            own.entry(name).or_insert(data);
        }
    }
    own
}

fn column_name(field: &FieldDescriptor, column_tag: &[&str], config: &BuilderConfig) -> String {
    match column_tag.first() {
        Some(name) => (*name).to_owned(),
        None => config.column_rename.apply(field.name),
    }
}

fn should_ignore(column_tag: &[&str], config: &BuilderConfig) -> bool {
    column_tag == ["-"] || (column_tag.is_empty() && config.ignore_untagged_fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ColumnRename;

    fn leaf(name: &'static str, tags: &'static [(&'static str, &'static str)]) -> FieldDescriptor {
        FieldDescriptor {
            name,
            type_name: "String",
            tags,
            kind: FieldKind::Leaf,
        }
    }

    fn base() -> TypeDescriptor {
        TypeDescriptor {
            type_name: "Base",
            fields: vec![
                leaf("ID", &[("db", "id"), ("builder", "skipinsert,skipupdate")]),
                leaf("Created", &[("builder", "defaultifempty")]),
                leaf("Name", &[]),
            ],
        }
    }

    fn item() -> TypeDescriptor {
        TypeDescriptor {
            type_name: "Item",
            fields: vec![
                FieldDescriptor {
                    name: "Base",
                    type_name: "Base",
                    tags: &[],
                    kind: FieldKind::Embedded {
                        optional: true,
                        descriptor: base,
                    },
                },
                leaf("Name", &[("db", "name")]),
                leaf("Secret", &[("db", "-")]),
                FieldDescriptor {
                    name: "Owner",
                    type_name: "Owner",
                    tags: &[("db", "owner")],
                    kind: FieldKind::Nested {
                        optional: false,
                        descriptor: owner,
                    },
                },
            ],
        }
    }

    fn owner() -> TypeDescriptor {
        TypeDescriptor {
            type_name: "Owner",
            fields: vec![leaf("Email", &[])],
        }
    }

    fn cyclic() -> TypeDescriptor {
        TypeDescriptor {
            type_name: "Node",
            fields: vec![
                leaf("Value", &[]),
                FieldDescriptor {
                    name: "Next",
                    type_name: "Node",
                    tags: &[],
                    kind: FieldKind::Nested {
                        optional: true,
                        descriptor: cyclic,
                    },
                },
            ],
        }
    }

    #[test]
    fn test_columns_are_sorted_and_prefixed() {
        let map = ColumnMap::for_descriptor(&item(), &BuilderConfig::default());
        assert_eq!(map.cols(), vec!["created", "id", "name", "owner.email"]);
    }

    #[test]
    fn test_direct_field_wins() {
        let map = ColumnMap::for_descriptor(&item(), &BuilderConfig::default());
        assert_eq!(map.get("name").unwrap().field_path, vec![1]);
        assert_eq!(map.get("id").unwrap().field_path, vec![0, 0]);
        assert_eq!(map.get("owner.email").unwrap().field_path, vec![3, 0]);
    }

    #[test]
    fn test_directives() {
        let map = ColumnMap::for_descriptor(&item(), &BuilderConfig::default());
        let id = map.get("id").unwrap();
        assert!(!id.should_insert);
        assert!(!id.should_update);
        assert!(map.get("created").unwrap().default_if_empty);
        assert!(map.get("name").unwrap().should_insert);
    }

    #[test]
    fn test_ignore_untagged() {
        let cfg = BuilderConfig::default().with_ignore_untagged_fields(true);
        let map = ColumnMap::for_descriptor(&item(), &cfg);
        assert_eq!(map.cols(), vec!["id", "name"]);
    }

    #[test]
    fn test_rename_function() {
        let cfg = BuilderConfig::default().with_column_rename(ColumnRename::identity());
        let map = ColumnMap::for_descriptor(&base(), &cfg);
        assert_eq!(map.cols(), vec!["Created", "Name", "id"]);
    }

    #[test]
    fn test_cycles_terminate() {
        let map = ColumnMap::for_descriptor(&cyclic(), &BuilderConfig::default());
        assert_eq!(map.cols(), vec!["value"]);
    }

    #[test]
    fn test_embedded_prefix_from_tag() {
        fn outer() -> TypeDescriptor {
            TypeDescriptor {
                type_name: "Outer",
                fields: vec![FieldDescriptor {
                    name: "Base",
                    type_name: "Base",
                    tags: &[("db", "b")],
                    kind: FieldKind::Embedded {
                        optional: false,
                        descriptor: base,
                    },
                }],
            }
        }
        let map = ColumnMap::for_descriptor(&outer(), &BuilderConfig::default());
        assert_eq!(map.cols(), vec!["b.created", "b.id", "b.name"]);
    }

    #[test]
    fn test_computation_is_repeatable() {
        let cfg = BuilderConfig::default();
        assert_eq!(
            ColumnMap::for_descriptor(&item(), &cfg),
            ColumnMap::for_descriptor(&item(), &cfg)
        );
    }
}
