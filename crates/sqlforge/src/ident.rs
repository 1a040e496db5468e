//! SQL identifier handling.
//!
//! This module provides [`Ident`], a `schema.table.column` triple where every
//! part is optional. Each present part is quoted on its own when rendered,
//! except the reserved `*` column which is never quoted.
//!
//! # Example
//! ```ignore
//! use sqlforge::Ident;
//!
//! let c = Ident::parse("public.users.id");
//! assert_eq!(c.schema_name(), Some("public"));
//! ```

/// The column part of an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IdentCol {
    Name(String),
    /// The `*` column.
    Star,
}

/// A SQL identifier (schema, table, column, or any dotted combination).
///
/// Equality is structural over the triple.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Ident {
    schema: Option<String>,
    table: Option<String>,
    col: Option<IdentCol>,
}

impl Ident {
    /// Build an identifier from its parts. Empty strings count as absent.
    pub fn new(schema: &str, table: &str, col: &str) -> Self {
        Self {
            schema: non_empty(schema),
            table: non_empty(table),
            col: col_part(col),
        }
    }

    /// A bare column identifier. Dots are kept as part of the name.
    pub fn column(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            schema: None,
            table: None,
            col: col_part(&name),
        }
    }

    /// A bare table identifier.
    pub fn table_only(name: impl Into<String>) -> Self {
        Self {
            schema: None,
            table: non_empty(&name.into()),
            col: None,
        }
    }

    /// A bare schema identifier.
    pub fn schema_only(name: impl Into<String>) -> Self {
        Self {
            schema: non_empty(&name.into()),
            table: None,
            col: None,
        }
    }

    /// Parse a dotted identifier.
    ///
    /// - `col` -> column
    /// - `table.col` -> table and column
    /// - `schema.table.col` -> all three parts
    ///
    /// Anything with more than three parts is kept whole as a column name.
    pub fn parse(s: &str) -> Self {
        let parts: Vec<&str> = s.split('.').collect();
        match parts.as_slice() {
            [table, col] => Self::new("", table, col),
            [schema, table, col] => Self::new(schema, table, col),
            _ => Self::column(s),
        }
    }

    /// Replace the schema part.
    pub fn schema(mut self, schema: &str) -> Self {
        self.schema = non_empty(schema);
        self
    }

    /// Replace the table part.
    ///
    /// When called on a schema-only identifier this yields `schema.table`.
    pub fn table(mut self, table: &str) -> Self {
        self.table = non_empty(table);
        self
    }

    /// Replace the column part.
    pub fn col(mut self, col: &str) -> Self {
        self.col = col_part(col);
        self
    }

    /// Qualify every column of this table: `"table".*`.
    pub fn all(mut self) -> Self {
        self.col = Some(IdentCol::Star);
        self
    }

    pub fn schema_name(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    pub fn table_name(&self) -> Option<&str> {
        self.table.as_deref()
    }

    pub fn column_part(&self) -> Option<&IdentCol> {
        self.col.as_ref()
    }

    /// True when no part is present.
    pub fn is_empty(&self) -> bool {
        self.schema.is_none() && self.table.is_none() && self.col.is_none()
    }

    /// Render the identifier with the given quote character.
    ///
    /// Callers are expected to reject empty identifiers first.
    pub(crate) fn write_sql(&self, quote: char, out: &mut String) {
        let mut wrote = false;
        if let Some(schema) = &self.schema {
            write_quoted(out, schema, quote);
            wrote = true;
        }
        if let Some(table) = &self.table {
            if wrote {
                out.push('.');
            }
            write_quoted(out, table, quote);
            wrote = true;
        }
        if let Some(col) = &self.col {
            if wrote {
                out.push('.');
            }
            match col {
                IdentCol::Star => out.push('*'),
                IdentCol::Name(name) => write_quoted(out, name, quote),
            }
        }
    }
}

/// Write `name` wrapped in `quote`, doubling embedded quote characters.
fn write_quoted(out: &mut String, name: &str, quote: char) {
    out.push(quote);
    for ch in name.chars() {
        if ch == quote {
            out.push(quote);
        }
        out.push(ch);
    }
    out.push(quote);
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_owned())
}

fn col_part(s: &str) -> Option<IdentCol> {
    match s {
        "" => None,
        "*" => Some(IdentCol::Star),
        name => Some(IdentCol::Name(name.to_owned())),
    }
}

/// Convert an input into an [`Ident`].
///
/// Strings are parsed as dotted identifiers.
pub trait IntoIdent {
    fn into_ident(self) -> Ident;
}

impl IntoIdent for Ident {
    fn into_ident(self) -> Ident {
        self
    }
}

impl IntoIdent for &str {
    fn into_ident(self) -> Ident {
        Ident::parse(self)
    }
}

impl IntoIdent for String {
    fn into_ident(self) -> Ident {
        Ident::parse(&self)
    }
}

impl IntoIdent for &String {
    fn into_ident(self) -> Ident {
        Ident::parse(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(ident: &Ident) -> String {
        let mut out = String::new();
        ident.write_sql('"', &mut out);
        out
    }

    #[test]
    fn ident_parse_three_parts() {
        let ident = Ident::parse("schema.table.col");
        assert_eq!(ident.schema_name(), Some("schema"));
        assert_eq!(ident.table_name(), Some("table"));
        assert_eq!(render(&ident), r#""schema"."table"."col""#);
    }

    #[test]
    fn ident_parse_two_parts() {
        assert_eq!(render(&Ident::parse("table.col")), r#""table"."col""#);
    }

    #[test]
    fn ident_parse_one_part() {
        assert_eq!(render(&Ident::parse("col")), r#""col""#);
    }

    #[test]
    fn ident_star_is_not_quoted() {
        assert_eq!(render(&Ident::parse("test.*")), r#""test".*"#);
        assert_eq!(render(&Ident::table_only("test").all()), r#""test".*"#);
        assert_eq!(render(&Ident::column("*")), "*");
    }

    #[test]
    fn ident_column_keeps_dots() {
        assert_eq!(render(&Ident::column("a.b")), r#""a.b""#);
    }

    #[test]
    fn ident_escapes_quote_char() {
        assert_eq!(render(&Ident::column(r#"we"ird"#)), r#""we""ird""#);
    }

    #[test]
    fn ident_builders() {
        let ident = Ident::schema_only("public").table("users").col("id");
        assert_eq!(render(&ident), r#""public"."users"."id""#);
        assert!(Ident::column("").is_empty());
        assert_eq!(Ident::parse("a.b"), Ident::new("", "a", "b"));
    }
}
