//! Global configuration changes. Everything lives in one test so the
//! changes never race with each other.

#![allow(dead_code)]

use chrono::{FixedOffset, TimeZone, Utc};
use sqlforge::config::{self, BuilderConfig, ColumnRename};
use sqlforge::{ColumnMap, Record, col, from, insert};

#[derive(Record)]
struct Account {
    #[record(db = "id")]
    id: i64,
    display_name: String,
    #[record(col = "mail")]
    email: String,
}

fn account() -> Account {
    Account {
        id: 1,
        display_name: "Bob".to_string(),
        email: "bob@example.com".to_string(),
    }
}

#[test]
fn global_configuration() {
    // Defaults: lowercase field names, `db` tags.
    assert_eq!(
        ColumnMap::of::<Account>().cols(),
        vec!["display_name", "email", "id"]
    );

    config::set_column_rename_function(|name| name.to_uppercase());
    assert_eq!(
        ColumnMap::of::<Account>().cols(),
        vec!["DISPLAY_NAME", "EMAIL", "id"]
    );

    config::set_ignore_untagged_fields(true);
    let (sql, _) = insert("accounts").rows([account()]).to_sql().unwrap();
    assert_eq!(sql, r#"INSERT INTO "accounts" ("id") VALUES (1)"#);

    config::set_config(
        BuilderConfig::default()
            .with_column_tag("col")
            .with_column_rename(ColumnRename::camel_case()),
    );
    assert_eq!(
        ColumnMap::of::<Account>().cols(),
        vec!["displayName", "id", "mail"]
    );

    config::set_default_prepared(true);
    let (sql, args) = from("accounts")
        .where_([col("id").eq(1)])
        .to_sql()
        .unwrap();
    assert_eq!(sql, r#"SELECT * FROM "accounts" WHERE ("id" = ?)"#);
    assert_eq!(args.len(), 1);
    assert!(!from("accounts").prepared(false).is_prepared());

    config::set_config(BuilderConfig::default());
    let ts = Utc.with_ymd_and_hms(2019, 10, 1, 15, 1, 0).unwrap();
    config::set_time_zone(FixedOffset::east_opt(8 * 3600).unwrap());
    let (sql, _) = from("events")
        .where_([col("at").gt(ts)])
        .to_sql()
        .unwrap();
    assert_eq!(
        sql,
        r#"SELECT * FROM "events" WHERE ("at" > '2019-10-01T23:01:00+08:00')"#
    );

    config::set_config(BuilderConfig::default());
    assert!(!from("accounts").is_prepared());

    // Maps computed while the config changes never outlive the change.
    let reader = std::thread::spawn(|| {
        for _ in 0..2_000 {
            ColumnMap::of::<Account>();
        }
    });
    for i in 0..200 {
        if i % 2 == 0 {
            config::set_column_rename_function(|name| name.to_uppercase());
        } else {
            config::set_config(BuilderConfig::default());
        }
    }
    reader.join().unwrap();
    let map = ColumnMap::of::<Account>();
    assert_eq!(map.cols(), vec!["display_name", "email", "id"]);
    assert!(std::sync::Arc::ptr_eq(&map, &ColumnMap::of::<Account>()));
}
