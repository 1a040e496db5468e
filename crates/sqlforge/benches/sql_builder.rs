use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use sqlforge::{Ex, Row, SelectDataset, col, dialect, insert};

/// SELECT col0, col1, ... FROM t WHERE (("col0" = 0) AND ("col1" = 1) ...)
fn build_select(n: usize) -> SelectDataset {
    let cols: Vec<String> = (0..n).map(|i| format!("col{i}")).collect();
    let filter = (0..n).fold(Ex::new(), |ex, i| ex.with(&format!("col{i}"), i as i64));
    dialect("postgres")
        .from("t")
        .select(cols)
        .where_([filter])
        .order(col("col0").asc())
}

fn bench_to_sql(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_builder/to_sql");

    for n in [1, 5, 10, 50, 100] {
        let ds = build_select(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &ds, |b, ds| {
            b.iter(|| black_box(ds.to_sql()));
        });
    }

    group.finish();
}

fn bench_prepared(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_builder/prepared");

    for n in [1, 5, 10, 50, 100] {
        let ds = build_select(n).prepared(true);
        group.bench_with_input(BenchmarkId::from_parameter(n), &ds, |b, ds| {
            b.iter(|| black_box(ds.to_sql()));
        });
    }

    group.finish();
}

fn bench_build_and_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_builder/build_and_render");

    for n in [1, 5, 10, 50, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| black_box(build_select(n).to_sql()));
        });
    }

    group.finish();
}

fn bench_insert_rows(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_builder/insert_rows");

    for n in [5, 20, 100, 500] {
        let rows: Vec<Row> = (0..n)
            .map(|i| {
                Row::new()
                    .set("id", i as i64)
                    .set("name", format!("name{i}"))
                    .set("active", i % 2 == 0)
            })
            .collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &rows, |b, rows| {
            b.iter(|| black_box(insert("items").rows(rows.iter()).to_sql()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_to_sql,
    bench_prepared,
    bench_build_and_render,
    bench_insert_rows
);
criterion_main!(benches);
