use std::sync::Arc;

use super::*;
use crate::config::BuilderConfig;
use crate::dataset::from;
use crate::dialect::Dialect;
use crate::render::Renderer;

fn render_with(dialect: &Dialect, expr: impl Into<Expr>, prepared: bool) -> BuildResult<(String, Vec<Value>)> {
    let renderer = Renderer::with_config(dialect, Arc::new(BuilderConfig::default()));
    let mut w = renderer.writer(prepared);
    renderer.render_expr(&expr.into(), &mut w);
    w.finish()
}

fn sql(expr: impl Into<Expr>) -> String {
    render_with(&Dialect::default(), expr, false).unwrap().0
}

// ==================== Equality coercion ====================

#[test]
fn eq_null_and_bools_become_is() {
    assert_eq!(sql(col("a").eq(Value::Null)), r#"("a" IS NULL)"#);
    assert_eq!(sql(col("a").eq(true)), r#"("a" IS TRUE)"#);
    assert_eq!(sql(col("a").neq(false)), r#"("a" IS NOT FALSE)"#);
    assert_eq!(sql(col("a").eq(Option::<i64>::None)), r#"("a" IS NULL)"#);
}

#[test]
fn eq_lists_become_in() {
    assert_eq!(sql(col("a").eq(vec![1, 2, 3])), r#"("a" IN (1, 2, 3))"#);
    assert_eq!(sql(col("a").neq(["a", "b"])), r#"("a" NOT IN ('a', 'b'))"#);
    assert_eq!(sql(col("a").in_(1)), r#"("a" IN (1))"#);
}

#[test]
fn eq_sub_select_becomes_in() {
    let sub = from("other").select("id");
    assert_eq!(
        sql(col("id").eq(sub)),
        r#"("id" IN (SELECT "id" FROM "other"))"#
    );
}

#[test]
fn eq_regex_becomes_regexp() {
    let re = regex("^[ab]").unwrap();
    assert_eq!(sql(col("name").eq(re.clone())), r#"("name" ~ '^[ab]')"#);
    assert_eq!(sql(col("name").neq(re.clone())), r#"("name" !~ '^[ab]')"#);
    assert_eq!(sql(col("name").ilike(re)), r#"("name" ~* '^[ab]')"#);
}

#[test]
fn identity_comparisons() {
    assert_eq!(sql(col("a").is_null()), r#"("a" IS NULL)"#);
    assert_eq!(sql(col("a").is_not_null()), r#"("a" IS NOT NULL)"#);
    assert_eq!(sql(col("a").is_not_true()), r#"("a" IS NOT TRUE)"#);
    assert_eq!(sql(col("a").is_false()), r#"("a" IS FALSE)"#);
}

#[test]
fn prepared_is_keeps_boolean_literals() {
    let (sql, args) = render_with(&Dialect::default(), col("col3").is_true(), true).unwrap();
    assert_eq!(sql, r#"("col3" IS TRUE)"#);
    assert!(args.is_empty());
}

#[test]
fn ranges() {
    assert_eq!(sql(col("a").between(1, 10)), r#"("a" BETWEEN 1 AND 10)"#);
    assert_eq!(
        sql(col("a").not_between("a", "z")),
        r#"("a" NOT BETWEEN 'a' AND 'z')"#
    );
}

// ==================== Lists ====================

#[test]
fn nested_lists_parenthesize() {
    let expr = or([
        Expr::from(col("a").gt(10)),
        Expr::from(and([col("b").lt(10), col("c").is_null()])),
    ]);
    assert_eq!(
        sql(expr),
        r#"(("a" > 10) OR (("b" < 10) AND ("c" IS NULL)))"#
    );
}

#[test]
fn single_item_list_is_bare() {
    assert_eq!(sql(and([col("a").eq(1)])), r#"("a" = 1)"#);
}

#[test]
fn empty_children_are_dropped() {
    let list = and([Expr::from(Ex::new()), col("a").eq(1), Expr::from(or(Vec::<Expr>::new()))]);
    assert_eq!(list.len(), 1);
    assert_eq!(sql(list), r#"("a" = 1)"#);
}

// ==================== Ex / ExOr / Op ====================

#[test]
fn ex_expands_sorted_and_coerced() {
    let ex = Ex::new()
        .with("d", vec!["a", "b", "c"])
        .with("c", Value::Null)
        .op("a", Op::new().gt(10))
        .op("b", Op::new().lt(10));
    assert_eq!(
        sql(ex),
        r#"(("a" > 10) AND ("b" < 10) AND ("c" IS NULL) AND ("d" IN ('a', 'b', 'c')))"#
    );
}

#[test]
fn ex_or_joins_with_or() {
    let ex = ExOr::new().with("a", 1).with("b", "x");
    assert_eq!(sql(ex), r#"(("a" = 1) OR ("b" = 'x'))"#);
}

#[test]
fn op_ors_its_operators() {
    let ex = Ex::new().op("a", Op::new().gt(10).lt(0));
    assert_eq!(sql(ex), r#"(("a" > 10) OR ("a" < 0))"#);
}

#[test]
fn op_names_are_case_insensitive() {
    let ex = Ex::new().op("a", Op::new().with("NotIn", vec![1, 2]));
    assert_eq!(sql(ex), r#"("a" NOT IN (1, 2))"#);
}

#[test]
fn op_between() {
    let ex = Ex::new().op("a", Op::new().between(1, 10));
    assert_eq!(sql(ex), r#"("a" BETWEEN 1 AND 10)"#);
}

#[test]
fn unknown_op_is_a_render_error() {
    let ex = Ex::new().op("a", Op::new().with("foo", 1));
    let err = render_with(&Dialect::default(), ex, false).unwrap_err();
    assert_eq!(err.to_string(), "builder: unsupported expression type foo");
}

// ==================== Aliases / ordering / casts ====================

#[test]
fn aliases() {
    assert_eq!(sql(col("a").as_("b")), r#""a" AS "b""#);
    assert_eq!(sql(table("t").as_("x")), r#""t" AS "x""#);
    assert_eq!(sql(count("*").as_("total")), r#"COUNT(*) AS "total""#);
}

#[test]
fn ordering() {
    assert_eq!(sql(col("a").desc().nulls_last()), r#""a" DESC NULLS LAST"#);
    assert_eq!(sql(Expr::from(col("a")).nulls_first()), r#""a" ASC NULLS FIRST"#);
}

#[test]
fn casts() {
    assert_eq!(sql(col("a").cast("DATE")), r#"CAST("a" AS DATE)"#);
    assert_eq!(sql(cast(val("1"), "INT")), r#"CAST('1' AS INT)"#);
}

// ==================== Functions / CASE / windows ====================

#[test]
fn functions() {
    assert_eq!(sql(count("*")), "COUNT(*)");
    assert_eq!(
        sql(coalesce([Expr::from(col("a")), val("empty")])),
        r#"COALESCE("a", 'empty')"#
    );
    assert_eq!(
        sql(func("str_agg", [Expr::from(col("col")), Expr::from(lit("|"))])),
        r#"str_agg("col", |)"#
    );
    assert_eq!(sql(avg("test3.age").gt(10)), r#"(AVG("test3"."age") > 10)"#);
}

#[test]
fn any_wraps_sub_select() {
    let sub = from("other").select("test_id");
    assert_eq!(
        sql(col("id").eq(any(sub))),
        r#"("id" = ANY ((SELECT "test_id" FROM "other")))"#
    );
}

#[test]
fn case_expressions() {
    let searched = case().when(col("num").gt(10), 0).else_(1);
    assert_eq!(
        sql(searched.asc()),
        r#"CASE  WHEN ("num" > 10) THEN 0 ELSE 1 END ASC"#
    );

    let simple = case().value(col("a")).when("x", 1).when("y", 2);
    assert_eq!(
        sql(simple),
        r#"CASE "a" WHEN 'x' THEN 1 WHEN 'y' THEN 2 END"#
    );
}

#[test]
fn case_without_whens_is_an_error() {
    let err = render_with(&Dialect::default(), case().else_(1), false).unwrap_err();
    assert_eq!(
        err.to_string(),
        "builder: when conditions not found for case statement"
    );
}

#[test]
fn window_functions() {
    let w = Window::new()
        .partition_by("a")
        .order_by(col("b").asc());
    assert_eq!(
        sql(row_number().over(w)),
        r#"ROW_NUMBER() OVER (PARTITION BY "a" ORDER BY "b" ASC)"#
    );
    assert_eq!(sql(row_number().over_name("w")), r#"ROW_NUMBER() OVER "w""#);
    assert_eq!(
        sql(row_number().over(Window::new().inherit("w").order_by("b"))),
        r#"ROW_NUMBER() OVER ("w" ORDER BY "b")"#
    );
    assert_eq!(sql(rank().over_all()), "RANK() OVER ()");
}

#[test]
fn window_functions_need_support() {
    let err = render_with(&Dialect::named("mysql"), row_number().over_all(), false).unwrap_err();
    assert!(err.is_unsupported_feature());
}

// ==================== Literals / bitwise ====================

#[test]
fn literal_placeholders_take_expressions() {
    let expr = lit_args("(? AND ?)", [col("a").eq(1), col("b").eq("b")]);
    assert_eq!(sql(expr), r#"(("a" = 1) AND ("b" = 'b'))"#);
    assert_eq!(sql(star()), "*");
    assert_eq!(sql(default_value()), "DEFAULT");
}

#[test]
fn bitwise() {
    assert_eq!(sql(col("a").bit_or(1)), r#"("a" | 1)"#);
    assert_eq!(sql(col("a").bit_left_shift(2)), r#"("a" << 2)"#);
    assert_eq!(sql(bitwise_inversion(col("a"))), r#"(~ "a")"#);
}

#[test]
fn bitwise_xor_unsupported_on_sqlite() {
    let err = render_with(&Dialect::named("sqlite3"), col("a").bit_xor(1), false).unwrap_err();
    assert!(matches!(
        err,
        BuildError::UnsupportedOperator { kind: "bitwise", .. }
    ));
}

#[test]
fn empty_identifier_is_an_error() {
    let err = render_with(&Dialect::default(), col(""), false).unwrap_err();
    assert!(err.is_empty_identifier());
}

#[test]
fn quotes_in_identifiers_are_doubled() {
    assert_eq!(sql(col(r#"we"ird"#)), r#""we""ird""#);
}
