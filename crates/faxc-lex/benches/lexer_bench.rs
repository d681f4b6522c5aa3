//! Scanner benchmarks.
//!
//! Run with: `cargo bench --package faxc-lex`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use faxc_lex::builder::SimpleBuilder;
use faxc_lex::Scanner;
use faxc_util::arena::Zone;
use faxc_util::source::Location;

fn token_count(source: &str) -> usize {
    let zone = Zone::new();
    let mut builder = SimpleBuilder::new(&zone);
    let tokens = Scanner::new(source.as_bytes(), Location::from_raw(0), &mut builder).scan();
    black_box(tokens.len())
}

fn bench_keywords_and_identifiers(c: &mut Criterion) {
    let mut group = c.benchmark_group("scanner_identifiers");
    let source = "let x = 42; fn main() { let y = x + 1; return y; }";
    group.throughput(Throughput::Bytes(source.len() as u64));

    group.bench_function("simple_let", |b| b.iter(|| token_count(black_box("let x = 42;"))));
    group.bench_function("function_with_body", |b| b.iter(|| token_count(black_box(source))));
    group.finish();
}

fn bench_generics(c: &mut Criterion) {
    let mut group = c.benchmark_group("scanner_brackets");
    let source = "Map<String, Vec<Pair<i32, i32>>> value;";
    group.throughput(Throughput::Bytes(source.len() as u64));

    group.bench_function("nested_generics", |b| b.iter(|| token_count(black_box(source))));
    group.bench_function("shr_split", |b| b.iter(|| token_count(black_box("a<b<c>>d"))));
    group.finish();
}

fn bench_strings(c: &mut Criterion) {
    let mut group = c.benchmark_group("scanner_strings");

    group.bench_function("short_string", |b| b.iter(|| token_count(black_box("let s = \"hello\";"))));
    group.bench_function("escaped_string", |b| b.iter(|| token_count(black_box(r#"let s = "a\nb\tc";"#))));
    group.bench_function("interpolated_string", |b| b.iter(|| token_count(black_box(r#"let s = "hi ${name}, x=${x+1}";"#))));
    group.finish();
}

fn bench_numbers(c: &mut Criterion) {
    let mut group = c.benchmark_group("scanner_numbers");

    group.bench_function("integer", |b| b.iter(|| token_count(black_box("let x = 123456;"))));
    group.bench_function("double", |b| b.iter(|| token_count(black_box("let x = 3.14159e10;"))));
    group.bench_function("hex", |b| b.iter(|| token_count(black_box("let x = 0xDEADBEEF;"))));
    group.finish();
}

fn bench_complex_source(c: &mut Criterion) {
    let mut group = c.benchmark_group("scanner_complex");
    let source = r#"
        fn fibonacci(n: i32) -> i32 {
            if n <= 1 {
                return n;
            }
            return fibonacci(n - 1) + fibonacci(n - 2);
        }

        struct Point {
            x: i32,
            y: i32,
        }

        impl Point {
            fn label(self) -> String {
                return "point(${self.x}, ${self.y})";
            }
        }
    "#;
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("complex_source", |b| b.iter(|| token_count(black_box(source))));
    group.finish();
}

criterion_group!(benches, bench_keywords_and_identifiers, bench_generics, bench_strings, bench_numbers, bench_complex_source);
criterion_main!(benches);
