use std::collections::HashMap;

use sqlforge::{
    Row, Value, col, default_value, dialect, do_nothing, do_update, from, ident, insert, val,
};

#[test]
fn rows_from_a_map() {
    let mut row = HashMap::new();
    row.insert("name", "Test1");
    row.insert("address", "111 Test Addr");

    let (sql, args) = insert("items").rows([row]).to_sql().unwrap();
    assert_eq!(
        sql,
        r#"INSERT INTO "items" ("address", "name") VALUES ('111 Test Addr', 'Test1')"#
    );
    assert!(args.is_empty());
}

#[test]
fn column_order_ignores_map_iteration_order() {
    let forwards: HashMap<&str, i64> = (0..20).map(|i| (COLS[i], i as i64)).collect();
    let backwards: HashMap<&str, i64> = (0..20).rev().map(|i| (COLS[i], i as i64)).collect();

    let a = insert("t").rows([forwards]).to_sql().unwrap();
    let b = insert("t").rows([backwards]).to_sql().unwrap();
    assert_eq!(a, b);
    assert!(a.0.starts_with(r#"INSERT INTO "t" ("a", "b", "c", "d", "e", "#));
}

const COLS: [&str; 20] = [
    "t", "s", "r", "q", "p", "o", "n", "m", "l", "k", "j", "i", "h", "g", "f", "e", "d", "c",
    "b", "a",
];

#[test]
fn prepared_multi_row_insert() {
    let (sql, args) = dialect("postgres")
        .insert("items")
        .rows([
            Row::new().set("name", "a").set("price", 1),
            Row::new().set("name", "b").set("price", 2),
        ])
        .prepared(true)
        .to_sql()
        .unwrap();
    assert_eq!(
        sql,
        r#"INSERT INTO "items" ("name", "price") VALUES ($1, $2), ($3, $4)"#
    );
    assert_eq!(
        args,
        vec![
            Value::from("a"),
            Value::Int(1),
            Value::from("b"),
            Value::Int(2),
        ]
    );
}

#[test]
fn rows_with_different_keys_are_an_error() {
    let err = insert("items")
        .rows([Row::new().set("a", 1).set("b", 2), Row::new().set("a", 1).set("c", 2)])
        .to_sql()
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        r#"builder: rows with different keys expected ["a", "b"] got ["a", "c"]"#
    );
}

#[test]
fn rows_with_different_lengths_are_an_error() {
    let err = insert("items")
        .rows([Row::new().set("a", 1).set("b", 2), Row::new().set("a", 1)])
        .to_sql()
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "builder: rows with different value length expected 2 got 1"
    );
}

#[test]
fn vals_shorter_than_cols_are_an_error() {
    let err = insert("items")
        .cols(["a", "b"])
        .vals([vec![val(1)], vec![val(2), val(3)]])
        .to_sql()
        .unwrap_err();
    assert!(err.is_row_shape());
    assert_eq!(
        err.to_string(),
        "builder: rows with different value length expected 2 got 1"
    );
}

#[test]
fn vals_rows_must_agree_without_cols() {
    let (sql, _) = insert("items")
        .vals([[val(1), val(2)]])
        .to_sql()
        .unwrap();
    assert_eq!(sql, r#"INSERT INTO "items" VALUES (1, 2)"#);

    let err = insert("items")
        .vals([vec![val(1), val(2)], vec![val(3)]])
        .to_sql()
        .unwrap_err();
    assert!(err.is_row_shape());
}

#[test]
fn every_entry_point_sets_the_target() {
    let expected = r#"INSERT INTO "items" ("a") VALUES (1)"#;
    let row = || Row::new().set("a", 1);
    assert_eq!(insert("items").rows([row()]).to_sql().unwrap().0, expected);
    assert_eq!(
        dialect("default").insert("items").rows([row()]).to_sql().unwrap().0,
        expected
    );
    assert_eq!(
        from("items").insert().rows([row()]).to_sql().unwrap().0,
        expected
    );
    assert_eq!(
        insert("other")
            .into_table("items")
            .rows([row()])
            .to_sql()
            .unwrap()
            .0,
        expected
    );
}

#[test]
fn default_keyword_in_values() {
    let (sql, _) = insert("items")
        .cols(("id", "name"))
        .vals([[default_value(), val("x")]])
        .to_sql()
        .unwrap();
    assert_eq!(sql, r#"INSERT INTO "items" ("id", "name") VALUES (DEFAULT, 'x')"#);
}

#[test]
fn insert_from_select() {
    let (sql, _) = insert("archive")
        .cols(("id", "name"))
        .from_query(from("items").select(("id", "name")).where_([col("old").is_true()]))
        .to_sql()
        .unwrap();
    assert_eq!(
        sql,
        r#"INSERT INTO "archive" ("id", "name") SELECT "id", "name" FROM "items" WHERE ("old" IS TRUE)"#
    );
}

#[test]
fn insert_with_cte_and_alias() {
    let (sql, _) = insert("items")
        .with("src", from("staging"))
        .as_("i")
        .from_query(from("src"))
        .to_sql()
        .unwrap();
    assert_eq!(
        sql,
        r#"WITH src AS (SELECT * FROM "staging") INSERT INTO "items" AS "i" SELECT * FROM "src""#
    );
}

#[test]
fn upsert_variants() {
    let base = insert("items").rows([Row::new().set("id", 1).set("name", "a")]);
    assert_eq!(
        base.on_conflict(do_nothing()).to_sql().unwrap().0,
        r#"INSERT INTO "items" ("id", "name") VALUES (1, 'a') ON CONFLICT DO NOTHING"#
    );
    assert_eq!(
        base.on_conflict(do_update("id", Row::new().set("name", ident("excluded.name"))))
            .to_sql()
            .unwrap()
            .0,
        r#"INSERT INTO "items" ("id", "name") VALUES (1, 'a') ON CONFLICT (id) DO UPDATE SET "name"="excluded"."name""#
    );
    assert_eq!(
        base.on_conflict(do_nothing())
            .clear_on_conflict()
            .to_sql()
            .unwrap()
            .0,
        r#"INSERT INTO "items" ("id", "name") VALUES (1, 'a')"#
    );
}

#[test]
fn insert_returning_on_sqlite() {
    let (sql, _) = dialect("sqlite3")
        .insert("items")
        .rows([Row::new().set("name", "a")])
        .returning(("id", "name"))
        .to_sql()
        .unwrap();
    assert_eq!(
        sql,
        r#"INSERT INTO "items" ("name") VALUES ('a') RETURNING "id", "name""#
    );
}
