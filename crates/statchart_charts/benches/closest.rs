//! Benchmarks for closest-value lookup and chart frame rendering.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use statchart_charts::prelude::*;

fn timestamps(count: usize) -> Vec<f64> {
    (0..count).map(|i| i as f64 * 3600.0).collect()
}

fn linear_closest(array: &[f64], needle: f64) -> usize {
    let mut best = 0;
    for (i, v) in array.iter().enumerate() {
        if (v - needle).abs() < (array[best] - needle).abs() {
            best = i;
        }
    }
    best
}

fn bench_closest(c: &mut Criterion) {
    let mut group = c.benchmark_group("closest_index");

    for size in [100, 1_000, 10_000, 100_000].iter() {
        let xs = timestamps(*size);
        let mut reversed = xs.clone();
        reversed.reverse();
        let needle = xs[*size / 3] + 1234.5;

        group.throughput(Throughput::Elements(*size as u64));

        group.bench_with_input(BenchmarkId::new("binary_sorted", size), &xs, |b, xs| {
            b.iter(|| find_closest_index(black_box(xs), black_box(needle), true))
        });

        group.bench_with_input(BenchmarkId::new("unsorted", size), &reversed, |b, xs| {
            b.iter(|| find_closest_index(black_box(xs), black_box(needle), false))
        });

        group.bench_with_input(BenchmarkId::new("linear_scan", size), &xs, |b, xs| {
            b.iter(|| linear_closest(black_box(xs), black_box(needle)))
        });
    }

    group.finish();
}

fn bench_pointer_frames(c: &mut Criterion) {
    let mut group = c.benchmark_group("time_series_pointer_frame");

    let xs = timestamps(20_000);
    let ys: Vec<f64> = xs.iter().map(|x| (x / 86_400.0).sin()).collect();
    let series = Series::new(xs, ys).expect("valid series");

    for strategy in RenderStrategy::ALL {
        let mut chart = TimeSeriesChartModel::new(series.clone(), Size::new(550.0, 400.0))
            .expect("valid chart")
            .with_strategy(strategy);
        let mut x = 60.0;
        group.bench_function(BenchmarkId::from_parameter(strategy), |b| {
            b.iter(|| {
                x = if x > 600.0 { 60.0 } else { x + 7.0 };
                let e = ChartEvent::PointerMove(PointerEvent::new(x, 100.0));
                chart.handle_event(&e).expect("pointer move");
                black_box(chart.render_frame().expect("frame"))
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_closest, bench_pointer_frames);
criterion_main!(benches);
