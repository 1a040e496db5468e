use sqlforge::{BuildError, Ex, Op, Value, col, delete, dialect, from, truncate};

#[test]
fn limit_without_dialect_support() {
    let err = delete("test").limit(10).to_sql().unwrap_err();
    assert!(err.is_unsupported_feature());
    assert!(matches!(
        err,
        BuildError::UnsupportedFeature { ref feature, ref dialect }
            if feature == "LIMIT on DELETE" && dialect == "default"
    ));
}

#[test]
fn order_and_limit_on_mysql() {
    let (sql, _) = dialect("mysql")
        .delete("test")
        .where_([col("a").lt(5)])
        .order(col("a").asc())
        .limit(10)
        .to_sql()
        .unwrap();
    assert_eq!(
        sql,
        "DELETE FROM `test` WHERE (`a` < 5) ORDER BY `a` ASC LIMIT 10"
    );
}

#[test]
fn prepared_delete() {
    let (sql, args) = dialect("postgres")
        .delete("test")
        .where_([Ex::new().op("a", Op::new().between(1, 5)).with("b", "x")])
        .returning("id")
        .prepared(true)
        .to_sql()
        .unwrap();
    assert_eq!(
        sql,
        r#"DELETE FROM "test" WHERE (("a" BETWEEN $1 AND $2) AND ("b" = $3)) RETURNING "id""#
    );
    assert_eq!(args, vec![Value::Int(1), Value::Int(5), Value::from("x")]);
}

#[test]
fn delete_from_select_keeps_filters() {
    let (sql, _) = from("test")
        .where_([col("a").is_null()])
        .delete()
        .to_sql()
        .unwrap();
    assert_eq!(sql, r#"DELETE FROM "test" WHERE ("a" IS NULL)"#);
}

#[test]
fn clear_where_deletes_everything() {
    let ds = delete("test").where_([col("a").eq(1)]);
    assert_eq!(ds.clear_where().to_sql().unwrap().0, r#"DELETE FROM "test""#);
    assert_eq!(
        ds.to_sql().unwrap().0,
        r#"DELETE FROM "test" WHERE ("a" = 1)"#
    );
}

#[test]
fn returning_on_mysql_is_an_error() {
    let err = dialect("mysql")
        .delete("test")
        .returning("id")
        .to_sql()
        .unwrap_err();
    assert!(err.is_unsupported_feature());
}

#[test]
fn truncate_options() {
    assert_eq!(
        truncate(("a", "b")).to_sql().unwrap().0,
        r#"TRUNCATE "a", "b""#
    );
    assert_eq!(
        truncate("a").identity("restart").cascade().to_sql().unwrap().0,
        r#"TRUNCATE "a" RESTART IDENTITY CASCADE"#
    );
    assert_eq!(
        dialect("mysql").truncate("a").restrict().to_sql().unwrap().0,
        "TRUNCATE `a` RESTRICT"
    );
}
