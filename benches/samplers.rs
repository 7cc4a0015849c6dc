use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use samo_cobra::SamplingStrategy;
use samo_cobra::bounds::NormalizedBox;
use samo_cobra::sampler::initial_design;
use samo_cobra::tracker::hypervolume_progress;

fn bench_initial_design(c: &mut Criterion) {
    let bounds = NormalizedBox::new(-1.0, 1.0, 10).unwrap();

    for strategy in [
        SamplingStrategy::Random,
        SamplingStrategy::LatinHypercube,
        SamplingStrategy::Halton,
        SamplingStrategy::BoundarySubset,
    ] {
        let mut group = c.benchmark_group(format!("design_{}", strategy.tag().to_lowercase()));
        for n in [11, 50, 200] {
            group.bench_with_input(BenchmarkId::new("points", n), &n, |b, &n| {
                let mut rng = fastrand::Rng::with_seed(42);
                b.iter(|| initial_design(strategy, n, &bounds, &mut rng).unwrap());
            });
        }
        group.finish();
    }
}

fn bench_hypervolume_progress(c: &mut Criterion) {
    let mut group = c.benchmark_group("hypervolume_progress");
    let mut rng = fastrand::Rng::with_seed(7);

    for n in [10, 40, 100] {
        // Points near the simplex keep most of them on the front.
        let objectives: Vec<Vec<f64>> = (0..n)
            .map(|_| {
                let t = rng.f64();
                vec![t + 0.05 * rng.f64(), 1.0 - t + 0.05 * rng.f64()]
            })
            .collect();
        let constraints = vec![Vec::new(); n];
        group.bench_with_input(BenchmarkId::new("rows", n), &objectives, |b, objectives| {
            b.iter(|| hypervolume_progress(objectives, &constraints, &[2.0, 2.0]));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_initial_design, bench_hypervolume_progress);
criterion_main!(benches);
