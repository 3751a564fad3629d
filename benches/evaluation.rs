use calcspan_rs::{tokenize, Environment, Evaluator};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use evalexpr::{build_operator_tree, DefaultNumericTypes};

/// Benchmark simple arithmetic expressions
fn benchmark_simple_arithmetic(c: &mut Criterion) {
    let mut group = c.benchmark_group("Simple arithmetic Expression Evaluation");

    let environment = Environment::with_builtins();
    let evaluator = Evaluator::new(environment.variables(), environment.functions());

    let expr = "2 + 3 * 4";
    let tokens = tokenize(expr).unwrap();
    let precompiled_evalexpr = build_operator_tree::<DefaultNumericTypes>(expr).unwrap();

    group.bench_function("tokenize_and_evaluate", |b| {
        b.iter(|| environment.evaluate(black_box(expr)))
    });

    group.bench_function("pretokenized_evaluate", |b| {
        b.iter(|| evaluator.evaluate(black_box(tokens.clone())))
    });

    group.bench_function("native_rust_arithmetic", |b| {
        b.iter(|| black_box(2.0) + black_box(3.0) * black_box(4.0))
    });

    group.bench_function("meval_arithmetic", |b| {
        b.iter(|| meval::eval_str(black_box(expr)).unwrap())
    });

    group.bench_function("evalexpr_arithmetic", |b| {
        b.iter(|| evalexpr::eval(black_box(expr)).unwrap())
    });

    group.bench_function("precompiled_evalexpr_arithmetic", |b| {
        b.iter(|| precompiled_evalexpr.eval().unwrap())
    });
}

/// Benchmark nested groups and right-associative powers
fn benchmark_complex_arithmetic(c: &mut Criterion) {
    let mut group = c.benchmark_group("Complex arithmetic Expression Evaluation");

    let environment = Environment::with_builtins();
    let evaluator = Evaluator::new(environment.variables(), environment.functions());

    let expr = "(10 + 20) * 3 / (4 - 1) + 2 ^ 3 ^ 2 - ((5))";
    let tokens = tokenize(expr).unwrap();

    group.bench_function("tokenize_and_evaluate", |b| {
        b.iter(|| environment.evaluate(black_box(expr)))
    });

    group.bench_function("pretokenized_evaluate", |b| {
        b.iter(|| evaluator.evaluate(black_box(tokens.clone())))
    });

    group.bench_function("meval_arithmetic", |b| {
        b.iter(|| meval::eval_str(black_box(expr)).unwrap())
    });
}

/// Benchmark function calls, constants and implicit multiplication
fn benchmark_functions(c: &mut Criterion) {
    let mut group = c.benchmark_group("Function Call Evaluation");

    let environment = Environment::with_builtins();

    let expr = "2pi * sqrt(16) + pow(2, 10) - mod(17, 5) + sin(pi / 2)";
    let meval_expr = "2 * pi * sqrt(16) + 2 ^ 10 - 17 % 5 + sin(pi / 2)";

    group.bench_function("tokenize_and_evaluate", |b| {
        b.iter(|| environment.evaluate(black_box(expr)))
    });

    group.bench_function("tokenize_only", |b| b.iter(|| tokenize(black_box(expr))));

    group.bench_function("meval_functions", |b| {
        b.iter(|| meval::eval_str(black_box(meval_expr)).unwrap())
    });
}

/// Benchmark many independent expressions, sequential vs. rayon
fn benchmark_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("Batch Evaluation");

    let environment = Environment::with_builtins();
    let expressions: Vec<String> = (0..1000)
        .map(|i| format!("({i} + 1) * 2 ^ 3 - sqrt({i})"))
        .collect();
    let borrowed: Vec<&str> = expressions.iter().map(String::as_str).collect();

    group.bench_function("sequential", |b| {
        b.iter(|| {
            borrowed
                .iter()
                .map(|expr| environment.evaluate(expr))
                .collect::<Vec<_>>()
        })
    });

    group.bench_function("parallel", |b| {
        b.iter(|| environment.evaluate_batch(black_box(&borrowed)))
    });
}

criterion_group!(
    benches,
    benchmark_simple_arithmetic,
    benchmark_complex_arithmetic,
    benchmark_functions,
    benchmark_batch
);
criterion_main!(benches);
