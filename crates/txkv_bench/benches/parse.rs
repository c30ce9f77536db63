//! Protocol parsing benchmarks.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use txkv_bench::utils::random_lines;
use txkv_core::protocol::handle_line;
use txkv_core::{Command, Database};

/// Benchmark parsing protocol lines.
fn bench_parse(c: &mut Criterion) {
    let lines = random_lines(1000, 128);
    let mut group = c.benchmark_group("parse");
    group.throughput(Throughput::Elements(lines.len() as u64));

    group.bench_function("lines", |b| {
        b.iter(|| {
            for line in &lines {
                black_box(Command::parse(black_box(line)).unwrap());
            }
        });
    });
    group.finish();
}

/// Benchmark parsing and executing protocol lines end to end.
fn bench_handle_line(c: &mut Criterion) {
    let lines = random_lines(1000, 128);
    let mut group = c.benchmark_group("handle_line");
    group.throughput(Throughput::Elements(lines.len() as u64));

    group.bench_function("mixed", |b| {
        let mut db = Database::new();
        b.iter(|| {
            for line in &lines {
                black_box(handle_line(&mut db, line));
            }
        });
    });
    group.finish();
}

criterion_group!(benches, bench_parse, bench_handle_line);
criterion_main!(benches);
