//! Criterion benchmarks for sweepgen_core
//!
//! Run with: cargo bench -p sweepgen_core

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use sweepgen_core::{
    Combination, ParameterCatalog, QualifiedName, SimReport, SweepPlan, SweepRange, enumerate,
    render_config,
};

fn create_base_config(sections: usize, params_per_section: usize) -> String {
    let mut text = String::new();
    for s in 0..sections {
        text.push_str(&format!("[perf_model/unit_{s}]\n"));
        for p in 0..params_per_section {
            text.push_str(&format!("param_{p} = {}\n", p * 100));
            text.push_str(&format!("label_{p} = unit{s}\n"));
        }
        text.push('\n');
    }
    text
}

fn create_plan(dimensions: usize, values_per_dimension: usize) -> SweepPlan {
    let mut plan = SweepPlan::new();
    for d in 0..dimensions {
        plan.add(
            QualifiedName::new(format!("perf_model/unit_{d}"), "param_0"),
            SweepRange::new(1.0, values_per_dimension as f64, 1.0).unwrap(),
        )
        .unwrap();
    }
    plan
}

fn create_report(rows: usize) -> String {
    let mut text = String::from("                | Core 0 | Core 1 | Core 2 | Core 3\n");
    for r in 0..rows {
        if r % 10 == 0 {
            text.push_str(&format!("Category number {r}\n"));
        }
        text.push_str(&format!(
            "  metric {r} | {},{:03} | {}.5 | 4.{r}% | n/a\n",
            r + 1,
            r % 1000,
            r
        ));
    }
    text
}

fn bench_catalog_parse(c: &mut Criterion) {
    let text = create_base_config(50, 20);
    c.bench_function("catalog_parse_50x20", |b| {
        b.iter(|| ParameterCatalog::parse(black_box(&text)))
    });
}

fn bench_enumerate(c: &mut Criterion) {
    let mut group = c.benchmark_group("enumerate");

    for dimensions in [1, 2, 3, 4].iter() {
        let plan = create_plan(*dimensions, 10);
        group.bench_with_input(
            BenchmarkId::new("dimensions", dimensions),
            dimensions,
            |b, _| b.iter(|| enumerate(black_box(&plan))),
        );
    }

    group.finish();
}

fn bench_render_config(c: &mut Criterion) {
    let text = create_base_config(50, 20);
    let plan = create_plan(4, 3);
    let sections = plan.by_section();
    let combinations: Vec<Combination> = enumerate(&plan).unwrap();

    c.bench_function("render_config", |b| {
        b.iter(|| {
            for combination in &combinations {
                black_box(render_config(&text, combination, &sections));
            }
        })
    });
}

fn bench_report_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("report_parse");

    for rows in [100, 1000].iter() {
        let text = create_report(*rows);
        group.bench_with_input(BenchmarkId::new("rows", rows), rows, |b, _| {
            b.iter(|| SimReport::parse(black_box(&text)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_catalog_parse,
    bench_enumerate,
    bench_render_config,
    bench_report_parse,
);
criterion_main!(benches);
