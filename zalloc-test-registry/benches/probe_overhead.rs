use criterion::{
    black_box,
    criterion_group,
    criterion_main,
    BenchmarkId,
    Criterion,
};
use zalloc_probe::{
    CountingAllocator,
    MeasurementContext,
    Probe,
    ProbeConfig,
    Strategy,
};
use zalloc_test_registry::{
    Catalog,
    RunOptions,
    Runner,
};

#[global_allocator]
static GLOBAL: CountingAllocator = CountingAllocator;

/// Cost of one probe over an empty operation, per strategy
fn benchmark_probe_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("probe_strategies");
    let context = MeasurementContext::init().unwrap();

    for strategy in [Strategy::SingleShot, Strategy::Differential] {
        let probe = Probe::new(&context, ProbeConfig::default().with_repetitions(100)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(strategy), &strategy, |b, &strategy| {
            b.iter(|| {
                let observation = probe.measure_with(strategy, &mut || {
                    black_box(1u64);
                });
                black_box(observation.unwrap())
            });
        });
    }

    group.finish();
}

/// Cost of a whole catalog group under the runner
fn benchmark_runner_group(c: &mut Criterion) {
    let mut group = c.benchmark_group("runner_group");
    group.sample_size(10);
    let context = MeasurementContext::init().unwrap();
    let catalog = Catalog::global().unwrap();
    let runner = Runner::new(catalog, Probe::new(&context, ProbeConfig::default()).unwrap());

    for scenario_group in [
        zalloc_test_registry::ScenarioGroup::Insertion,
        zalloc_test_registry::ScenarioGroup::Iteration,
    ] {
        let options = RunOptions::all().with_group(scenario_group);
        group.bench_function(scenario_group.as_str(), |b| {
            b.iter(|| black_box(runner.run(&options).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_probe_strategies, benchmark_runner_group);
criterion_main!(benches);
