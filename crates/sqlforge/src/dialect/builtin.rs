//! Built-in dialects, registered at startup through `inventory`.

use std::collections::{BTreeMap, HashMap};

use super::options::{DialectOptions, TimeFormat};
use super::registry::DialectRegistration;
use crate::expr::{BitwiseOp, BooleanOp};
use crate::writer::PlaceholderStyle;

pub fn default_options() -> DialectOptions {
    DialectOptions::default()
}

/// `$N` placeholders, otherwise the default rules.
pub fn postgres_options() -> DialectOptions {
    DialectOptions {
        placeholder: PlaceholderStyle::dollar(),
        ..DialectOptions::default()
    }
}

pub fn mysql_options() -> DialectOptions {
    let mut opts = DialectOptions {
        supports_returning: false,
        supports_order_by_on_update: true,
        supports_limit_on_update: true,
        supports_order_by_on_delete: true,
        supports_limit_on_delete: true,
        supports_conflict_target: false,
        supports_conflict_update_where: false,
        supports_insert_ignore_syntax: true,
        supports_with_cte: false,
        supports_with_cte_recursive: false,
        supports_distinct_on: false,
        supports_window_function: false,
        supports_lateral: false,
        use_from_clause_for_multiple_update_tables: false,
        quote_char: '`',
        escaped_chars: BTreeMap::from([
            ('\'', "\\'".to_string()),
            ('"', "\\\"".to_string()),
            ('\\', "\\\\".to_string()),
            ('\n', "\\n".to_string()),
            ('\r', "\\r".to_string()),
            ('\0', "\\x00".to_string()),
            ('\x1a', "\\x1a".to_string()),
        ]),
        time_format: TimeFormat::Layout("%Y-%m-%d %H:%M:%S%.6f".to_string()),
        conflict_fragment: String::new(),
        conflict_do_nothing_fragment: String::new(),
        conflict_do_update_fragment: " ON DUPLICATE KEY UPDATE ".to_string(),
        ..DialectOptions::default()
    };

    let overrides = [
        (BooleanOp::Like, "LIKE BINARY"),
        (BooleanOp::NotLike, "NOT LIKE BINARY"),
        (BooleanOp::ILike, "LIKE"),
        (BooleanOp::NotILike, "NOT LIKE"),
        (BooleanOp::RegexpLike, "REGEXP BINARY"),
        (BooleanOp::RegexpNotLike, "NOT REGEXP BINARY"),
        (BooleanOp::RegexpILike, "REGEXP"),
        (BooleanOp::RegexpNotILike, "NOT REGEXP"),
    ];
    for (op, token) in overrides {
        opts.boolean_operators.insert(op, token.to_string());
    }
    opts.bitwise_operators.insert(BitwiseOp::Xor, "^".to_string());
    opts
}

/// MySQL 8 adds window functions, CTEs and LATERAL.
pub fn mysql8_options() -> DialectOptions {
    DialectOptions {
        supports_window_function: true,
        supports_with_cte: true,
        supports_with_cte_recursive: true,
        supports_lateral: true,
        ..mysql_options()
    }
}

pub fn sqlite3_options() -> DialectOptions {
    let mut boolean_operators: HashMap<BooleanOp, String> =
        super::options::default_boolean_operators()
            .into_iter()
            .filter(|(op, _)| !op.is_regexp())
            .collect();
    boolean_operators.insert(BooleanOp::ILike, "LIKE".to_string());
    boolean_operators.insert(BooleanOp::NotILike, "NOT LIKE".to_string());

    let mut opts = DialectOptions {
        supports_distinct_on: false,
        supports_lateral: false,
        supports_lock: false,
        supports_insert_ignore_syntax: false,
        wrap_compounds_in_parens: false,
        true_literal: "1".to_string(),
        false_literal: "0".to_string(),
        boolean_operators,
        ..DialectOptions::default()
    };
    opts.bitwise_operators.remove(&BitwiseOp::Xor);
    opts
}

inventory::submit! {
    DialectRegistration { name: "default", options: default_options }
}

inventory::submit! {
    DialectRegistration { name: "postgres", options: postgres_options }
}

inventory::submit! {
    DialectRegistration { name: "mysql", options: mysql_options }
}

inventory::submit! {
    DialectRegistration { name: "mysql8", options: mysql8_options }
}

inventory::submit! {
    DialectRegistration { name: "sqlite3", options: sqlite3_options }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mysql_rejects_returning_but_limits_deletes() {
        let opts = mysql_options();
        assert!(!opts.supports_returning);
        assert!(opts.supports_limit_on_delete);
        assert_eq!(opts.quote_char, '`');
        assert_eq!(opts.boolean_operator(BooleanOp::Like), Some("LIKE BINARY"));
    }

    #[test]
    fn mysql8_inherits_mysql() {
        let opts = mysql8_options();
        assert!(opts.supports_window_function);
        assert!(!opts.supports_returning);
        assert_eq!(opts.quote_char, '`');
    }

    #[test]
    fn sqlite3_has_no_regexp_operators() {
        let opts = sqlite3_options();
        assert!(!opts.supports_regexp());
        assert_eq!(opts.true_literal, "1");
        assert!(!opts.wrap_compounds_in_parens);
    }

    #[test]
    fn postgres_numbers_placeholders() {
        assert_eq!(postgres_options().placeholder, PlaceholderStyle::dollar());
    }
}
