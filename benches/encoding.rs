use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tabular_labels::{convert_labels, convert_ranged_labels, LoadOptions, Loader, Range};

fn synthetic_csv(rows: usize) -> String {
    let classes = ["setosa", "versicolor", "virginica"];
    (0..rows)
        .map(|i| {
            format!(
                "{:.2},{:.2},{:.2},{}\n",
                i as f64 * 0.1,
                (i % 17) as f64 * 0.3,
                (i % 5) as f64 + 0.25,
                classes[i % classes.len()]
            )
        })
        .collect()
}

fn bench_load(c: &mut Criterion) {
    for size in [100, 1000, 10000].iter() {
        c.bench_with_input(BenchmarkId::new("load_reader", size), size, |b, &n| {
            let input = synthetic_csv(n);
            let loader = Loader::new(LoadOptions::default());

            b.iter(|| {
                let loaded = loader.load_reader(black_box(input.as_bytes())).unwrap();
                black_box(loaded);
            });
        });
    }
}

fn bench_convert_labels(c: &mut Criterion) {
    for size in [100, 1000, 10000].iter() {
        c.bench_with_input(BenchmarkId::new("convert_labels", size), size, |b, &n| {
            let input = synthetic_csv(n);
            let (table, labels) = Loader::default().load_reader(input.as_bytes()).unwrap();

            b.iter(|| {
                let encoded = convert_labels(black_box(&table), black_box(&labels), -1).unwrap();
                black_box(encoded);
            });
        });
    }
}

fn bench_convert_ranged_labels(c: &mut Criterion) {
    let ranges = [
        Range::new(0.0, 1.0).unwrap(),
        Range::new(1.0, 3.0).unwrap(),
        Range::new(3.0, 5.0).unwrap(),
    ];

    for size in [100, 1000, 10000].iter() {
        c.bench_with_input(BenchmarkId::new("convert_ranged_labels", size), size, |b, &n| {
            let input = synthetic_csv(n);
            let loader = Loader::new(LoadOptions::default().with_label_position(2));
            let (table, _) = loader.load_reader(input.as_bytes()).unwrap();

            b.iter(|| {
                let encoding =
                    convert_ranged_labels(black_box(&table), black_box(&ranges), 2).unwrap();
                black_box(encoding);
            });
        });
    }
}

criterion_group!(
    benches,
    bench_load,
    bench_convert_labels,
    bench_convert_ranged_labels
);
criterion_main!(benches);
