//! Derive macros for sqlforge
//!
//! Provides `#[derive(Record)]`.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod attrs;
mod common;
mod record;

/// Derive `Record` and `AsRow` for a struct with named fields.
///
/// # Example
///
/// ```ignore
/// use sqlforge::Record;
///
/// #[derive(Record)]
/// struct Item {
///     #[record(db = "id", builder = "skipinsert,skipupdate")]
///     id: i64,
///     #[record(flatten)]
///     audit: Option<Audit>,
///     #[record(db = "owner", nested)]
///     owner: Owner,
///     #[record(json)]
///     tags: Vec<String>,
///     name: String,
/// }
/// ```
///
/// # Attributes
///
/// - `#[record(<namespace> = "value")]` - A tag read by the column mapper. `db`
///   names the column (`-` excludes the field) and `builder` holds directives
///   (`skipinsert`, `skipupdate`, `defaultifempty`); other namespaces are kept
///   for custom tag configurations
/// - `#[record(flatten)]` - Promote the columns of an embedded record
/// - `#[record(nested)]` - Map a record-typed field to `field.column` columns
/// - `#[record(json)]` - Encode the field as JSON with `serde`
///
/// Leaf fields must implement `sqlforge::ToValue`.
#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    record::expand(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
