use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use sqlcraft::{Select, SqlBuilder, SqlParser, select};

/// Build a Select with `n` columns and `n` bound conditions:
/// SELECT col0, col1, ... FROM t WHERE col0 = ? AND col1 = ? ...
fn build_select(n: usize) -> Select {
    let mut q = select().from("t");
    for i in 0..n {
        q = q
            .select(&format!("col{i}"))
            .and_where_with(&format!("col{i} = ?"), [i as i64]);
    }
    q
}

fn bench_to_sql(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_builder/to_sql");

    for n in [1, 5, 10, 50, 100] {
        let q = build_select(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &q, |b, q| {
            b.iter(|| black_box(q.to_sql()));
        });
    }

    group.finish();
}

fn bench_build_and_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_builder/build_and_render");

    for n in [1, 5, 10, 50, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| black_box(build_select(n).build()));
        });
    }

    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_builder/parse");

    for n in [1, 10, 100] {
        let sql = build_select(n).to_sql().unwrap_or_default();
        group.bench_with_input(BenchmarkId::from_parameter(n), &sql, |b, sql| {
            b.iter(|| black_box(SqlParser::new(sql).to_select()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_to_sql, bench_build_and_render, bench_parse);
criterion_main!(benches);
