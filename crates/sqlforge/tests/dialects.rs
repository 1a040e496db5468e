use sqlforge::dialect::postgres_options;
use sqlforge::{
    Dialect, DialectOptions, DialectRegistration, PlaceholderStyle, Row, Value, col,
    deregister_dialect, dialect, from, insert, lookup_dialect, register_dialect,
};

fn colon_options() -> DialectOptions {
    DialectOptions {
        placeholder: PlaceholderStyle::Numbered(":".to_string()),
        supports_returning: false,
        ..DialectOptions::default()
    }
}

sqlforge::inventory::submit! {
    DialectRegistration { name: "colon", options: colon_options }
}

#[test]
fn inventory_registrations_are_visible() {
    assert!(lookup_dialect("colon").is_some());
    let (sql, args) = dialect("colon")
        .from("test")
        .where_([col("a").eq(1), col("b").eq(2)])
        .prepared(true)
        .to_sql()
        .unwrap();
    assert_eq!(sql, r#"SELECT * FROM "test" WHERE (("a" = :1) AND ("b" = :2))"#);
    assert_eq!(args.len(), 2);
}

#[test]
fn runtime_registration_round_trip() {
    register_dialect(
        "Bracketed",
        DialectOptions {
            quote_char: '`',
            ..postgres_options()
        },
    );
    let (sql, _) = dialect("bracketed")
        .from("test")
        .where_([col("a").eq(1)])
        .prepared(true)
        .to_sql()
        .unwrap();
    assert_eq!(sql, "SELECT * FROM `test` WHERE (`a` = $1)");

    assert!(deregister_dialect("bracketed").is_some());
    assert!(lookup_dialect("bracketed").is_none());
}

#[test]
fn unknown_names_fall_back_to_default_rules() {
    let ds = dialect("no-such-dialect").from("test").limit(1);
    assert_eq!(ds.dialect().name(), "no-such-dialect");
    assert_eq!(ds.to_sql().unwrap().0, r#"SELECT * FROM "test" LIMIT 1"#);
}

#[test]
fn datasets_capture_options_when_created() {
    register_dialect("snapshot", DialectOptions::default());
    let ds = dialect("snapshot").from("test");
    register_dialect(
        "snapshot",
        DialectOptions {
            quote_char: '`',
            ..DialectOptions::default()
        },
    );
    assert_eq!(ds.to_sql().unwrap().0, r#"SELECT * FROM "test""#);
    assert_eq!(
        dialect("snapshot").from("test").to_sql().unwrap().0,
        "SELECT * FROM `test`"
    );
    deregister_dialect("snapshot");
}

#[test]
fn switching_dialects_keeps_clauses() {
    let ds = insert("items").rows([Row::new().set("name", "it's")]);
    assert_eq!(
        ds.to_sql().unwrap().0,
        r#"INSERT INTO "items" ("name") VALUES ('it''s')"#
    );
    assert_eq!(
        ds.with_dialect("mysql").to_sql().unwrap().0,
        r#"INSERT INTO `items` (`name`) VALUES ('it\'s')"#
    );
    assert_eq!(
        ds.set_dialect(Dialect::named("postgres"))
            .prepared(true)
            .to_sql()
            .unwrap(),
        (
            r#"INSERT INTO "items" ("name") VALUES ($1)"#.to_string(),
            vec![Value::from("it's")]
        )
    );
}

#[test]
fn every_builtin_renders_a_basic_select() {
    for (name, expected) in [
        ("default", r#"SELECT "a" FROM "t" WHERE ("a" = ?)"#),
        ("postgres", r#"SELECT "a" FROM "t" WHERE ("a" = $1)"#),
        ("mysql", "SELECT `a` FROM `t` WHERE (`a` = ?)"),
        ("mysql8", "SELECT `a` FROM `t` WHERE (`a` = ?)"),
        ("sqlite3", r#"SELECT "a" FROM "t" WHERE ("a" = ?)"#),
    ] {
        let (sql, args) = from("t")
            .with_dialect(name)
            .select("a")
            .where_([col("a").eq(1)])
            .prepared(true)
            .to_sql()
            .unwrap();
        assert_eq!(sql, expected, "dialect {name}");
        assert_eq!(args.len(), 1);
    }
}
