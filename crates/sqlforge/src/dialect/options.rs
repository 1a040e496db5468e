//! Rendering rules and capability flags for one database family.

use std::collections::{BTreeMap, HashMap};

use crate::expr::{BitwiseOp, BooleanOp, JoinKind, RangeOp};
use crate::writer::PlaceholderStyle;

/// A section of a statement, in the order the renderer emits it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SqlFragment {
    CommonTables,
    Select,
    From,
    Join,
    Where,
    GroupBy,
    Having,
    Window,
    Compounds,
    Order,
    Limit,
    Offset,
    Lock,
    InsertBegin,
    Into,
    Insert,
    UpdateBegin,
    Sources,
    Set,
    UpdateFrom,
    DeleteBegin,
    Truncate,
    Returning,
}

/// How timestamps are written as literals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeFormat {
    /// RFC 3339 with trailing zero nanoseconds trimmed and `Z` for UTC.
    Rfc3339,
    /// A chrono `strftime` layout, written without an offset.
    Layout(String),
}

/// Everything a dialect needs to know to render statements.
///
/// Start from [`DialectOptions::default`] and override fields, the same way
/// the built-in dialects are assembled.
#[derive(Debug, Clone)]
pub struct DialectOptions {
    pub supports_returning: bool,
    pub supports_order_by_on_update: bool,
    pub supports_limit_on_update: bool,
    pub supports_order_by_on_delete: bool,
    pub supports_limit_on_delete: bool,
    pub supports_conflict_target: bool,
    pub supports_conflict_update_where: bool,
    pub supports_insert_ignore_syntax: bool,
    pub supports_with_cte: bool,
    pub supports_with_cte_recursive: bool,
    pub supports_distinct_on: bool,
    pub supports_window_function: bool,
    pub supports_lateral: bool,
    pub supports_lock: bool,
    pub supports_multiple_update_tables: bool,
    /// `UPDATE t SET .. FROM other` rather than `UPDATE t,other SET ..`.
    pub use_from_clause_for_multiple_update_tables: bool,
    /// Write TRUE/FALSE tokens for `IS` comparisons even in prepared mode.
    pub use_literal_is_bools: bool,
    pub wrap_compounds_in_parens: bool,

    pub quote_char: char,
    pub placeholder: PlaceholderStyle,
    pub true_literal: String,
    pub false_literal: String,
    pub null_literal: String,
    pub default_literal: String,
    pub string_quote: char,
    /// Characters replaced inside string literals.
    pub escaped_chars: BTreeMap<char, String>,
    pub time_format: TimeFormat,

    /// Missing regexp operators make the renderer fall back to LIKE patterns.
    pub boolean_operators: HashMap<BooleanOp, String>,
    pub range_operators: HashMap<RangeOp, String>,
    pub bitwise_operators: HashMap<BitwiseOp, String>,
    /// Join tokens, including their surrounding spaces.
    pub join_types: HashMap<JoinKind, String>,

    pub insert_clause: String,
    pub insert_ignore_clause: String,
    pub conflict_fragment: String,
    pub conflict_do_nothing_fragment: String,
    pub conflict_do_update_fragment: String,

    pub select_order: Vec<SqlFragment>,
    pub insert_order: Vec<SqlFragment>,
    pub update_order: Vec<SqlFragment>,
    pub delete_order: Vec<SqlFragment>,
    pub truncate_order: Vec<SqlFragment>,
}

impl Default for DialectOptions {
    fn default() -> Self {
        use SqlFragment::*;

        Self {
            supports_returning: true,
            supports_order_by_on_update: false,
            supports_limit_on_update: false,
            supports_order_by_on_delete: false,
            supports_limit_on_delete: false,
            supports_conflict_target: true,
            supports_conflict_update_where: true,
            supports_insert_ignore_syntax: false,
            supports_with_cte: true,
            supports_with_cte_recursive: true,
            supports_distinct_on: true,
            supports_window_function: true,
            supports_lateral: true,
            supports_lock: true,
            supports_multiple_update_tables: true,
            use_from_clause_for_multiple_update_tables: true,
            use_literal_is_bools: true,
            wrap_compounds_in_parens: true,

            quote_char: '"',
            placeholder: PlaceholderStyle::question(),
            true_literal: "TRUE".to_string(),
            false_literal: "FALSE".to_string(),
            null_literal: "NULL".to_string(),
            default_literal: "DEFAULT".to_string(),
            string_quote: '\'',
            escaped_chars: BTreeMap::from([('\'', "''".to_string())]),
            time_format: TimeFormat::Rfc3339,

            boolean_operators: default_boolean_operators(),
            range_operators: HashMap::from([
                (RangeOp::Between, "BETWEEN".to_string()),
                (RangeOp::NotBetween, "NOT BETWEEN".to_string()),
            ]),
            bitwise_operators: HashMap::from([
                (BitwiseOp::Inversion, "~".to_string()),
                (BitwiseOp::Or, "|".to_string()),
                (BitwiseOp::And, "&".to_string()),
                (BitwiseOp::Xor, "#".to_string()),
                (BitwiseOp::LeftShift, "<<".to_string()),
                (BitwiseOp::RightShift, ">>".to_string()),
            ]),
            join_types: default_join_types(),

            insert_clause: "INSERT INTO".to_string(),
            insert_ignore_clause: "INSERT IGNORE INTO".to_string(),
            conflict_fragment: " ON CONFLICT".to_string(),
            conflict_do_nothing_fragment: " DO NOTHING".to_string(),
            conflict_do_update_fragment: " DO UPDATE SET ".to_string(),

            select_order: vec![
                CommonTables,
                Select,
                From,
                Join,
                Where,
                GroupBy,
                Having,
                Window,
                Compounds,
                Order,
                Limit,
                Offset,
                Lock,
            ],
            insert_order: vec![CommonTables, InsertBegin, Into, Insert, Returning],
            update_order: vec![
                CommonTables,
                UpdateBegin,
                Sources,
                Set,
                UpdateFrom,
                Where,
                Order,
                Limit,
                Returning,
            ],
            delete_order: vec![CommonTables, DeleteBegin, From, Where, Order, Limit, Returning],
            truncate_order: vec![Truncate],
        }
    }
}

impl DialectOptions {
    /// Token for a boolean operator, if the dialect has one.
    pub fn boolean_operator(&self, op: BooleanOp) -> Option<&str> {
        self.boolean_operators.get(&op).map(String::as_str)
    }

    pub fn range_operator(&self, op: RangeOp) -> Option<&str> {
        self.range_operators.get(&op).map(String::as_str)
    }

    pub fn bitwise_operator(&self, op: BitwiseOp) -> Option<&str> {
        self.bitwise_operators.get(&op).map(String::as_str)
    }

    pub fn join_type(&self, kind: JoinKind) -> Option<&str> {
        self.join_types.get(&kind).map(String::as_str)
    }

    /// Whether regexp matches can be written directly.
    pub fn supports_regexp(&self) -> bool {
        self.boolean_operators.contains_key(&BooleanOp::RegexpLike)
    }
}

pub(crate) fn default_boolean_operators() -> HashMap<BooleanOp, String> {
    [
        (BooleanOp::Eq, "="),
        (BooleanOp::Neq, "!="),
        (BooleanOp::Gt, ">"),
        (BooleanOp::Gte, ">="),
        (BooleanOp::Lt, "<"),
        (BooleanOp::Lte, "<="),
        (BooleanOp::In, "IN"),
        (BooleanOp::NotIn, "NOT IN"),
        (BooleanOp::Is, "IS"),
        (BooleanOp::IsNot, "IS NOT"),
        (BooleanOp::Like, "LIKE"),
        (BooleanOp::NotLike, "NOT LIKE"),
        (BooleanOp::ILike, "ILIKE"),
        (BooleanOp::NotILike, "NOT ILIKE"),
        (BooleanOp::RegexpLike, "~"),
        (BooleanOp::RegexpNotLike, "!~"),
        (BooleanOp::RegexpILike, "~*"),
        (BooleanOp::RegexpNotILike, "!~*"),
    ]
    .into_iter()
    .map(|(op, token)| (op, token.to_string()))
    .collect()
}

fn default_join_types() -> HashMap<JoinKind, String> {
    [
        (JoinKind::Inner, " INNER JOIN "),
        (JoinKind::FullOuter, " FULL OUTER JOIN "),
        (JoinKind::RightOuter, " RIGHT OUTER JOIN "),
        (JoinKind::LeftOuter, " LEFT OUTER JOIN "),
        (JoinKind::Full, " FULL JOIN "),
        (JoinKind::Right, " RIGHT JOIN "),
        (JoinKind::Left, " LEFT JOIN "),
        (JoinKind::Natural, " NATURAL JOIN "),
        (JoinKind::NaturalLeft, " NATURAL LEFT JOIN "),
        (JoinKind::NaturalRight, " NATURAL RIGHT JOIN "),
        (JoinKind::NaturalFull, " NATURAL FULL JOIN "),
        (JoinKind::Cross, " CROSS JOIN "),
    ]
    .into_iter()
    .map(|(kind, token)| (kind, token.to_string()))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_cover_every_operator() {
        let opts = DialectOptions::default();
        for op in [BooleanOp::Eq, BooleanOp::NotIn, BooleanOp::RegexpNotILike] {
            assert!(opts.boolean_operator(op).is_some());
        }
        assert_eq!(opts.join_type(JoinKind::Cross), Some(" CROSS JOIN "));
        assert!(opts.supports_regexp());
    }

    #[test]
    fn default_options_reject_update_and_delete_limits() {
        let opts = DialectOptions::default();
        assert!(!opts.supports_limit_on_delete);
        assert!(!opts.supports_order_by_on_update);
        assert!(opts.supports_returning);
    }
}
