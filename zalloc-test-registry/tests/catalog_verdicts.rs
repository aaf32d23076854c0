//! The standard catalog against the real counting allocator.

use std::hint::black_box;

use zalloc_probe::{CountingAllocator, MeasurementContext, Probe, ProbeConfig, Strategy, Verdict};
use zalloc_test_registry::catalog::hashing::{hash_borrowed, hash_owned, GREETING};
use zalloc_test_registry::{variadic, Catalog, Outcome, RunOptions, RunReport, Runner};

#[global_allocator]
static GLOBAL: CountingAllocator = CountingAllocator;

fn config(repetitions: u32) -> ProbeConfig {
    ProbeConfig::default().with_repetitions(repetitions)
}

fn run(config: ProbeConfig, options: &RunOptions) -> RunReport {
    let context = MeasurementContext::init().unwrap();
    let runner = Runner::new(Catalog::global().unwrap(), Probe::new(&context, config).unwrap());
    runner.run(options).unwrap()
}

fn assert_all_passed(report: &RunReport) {
    let problems: Vec<String> = report
        .problems()
        .map(|result| format!("{}: {:?}", result.name, result.detail))
        .collect();
    assert!(problems.is_empty(), "scenarios did not pass: {problems:#?}");
}

#[test]
fn test_catalog_passes_single_shot() {
    let report = run(config(5), &RunOptions::all().with_strategy(Strategy::SingleShot));
    assert_eq!(report.results.len(), Catalog::global().unwrap().len());
    assert_all_passed(&report);
    assert!(report.is_success());
}

#[test]
fn test_catalog_passes_differential() {
    let report = run(config(5), &RunOptions::all().with_strategy(Strategy::Differential));
    assert_all_passed(&report);
}

#[test]
fn test_catalog_passes_with_own_strategies() {
    let report = run(config(3), &RunOptions::all());
    assert_all_passed(&report);
    let literal = report.result("BAD_hash_text_literal").unwrap();
    assert_eq!(literal.strategy, Strategy::SingleShot);
    let lazy = report.result("OK_lazy_table_lookup").unwrap();
    assert_eq!(lazy.strategy, Strategy::Differential);
}

#[test]
fn test_clean_scenarios_stay_at_zero_for_any_repetition_count() {
    for repetitions in [1, 7, 40] {
        let options = RunOptions::all()
            .with_name_filter("OK_")
            .with_strategy(Strategy::Differential);
        let report = run(config(repetitions), &options);
        for result in &report.results {
            let observation = result.observation.unwrap();
            assert_eq!(observation.bytes_delta, 0, "{} x{repetitions}", result.name);
            assert_eq!(observation.allocations, 0, "{} x{repetitions}", result.name);
        }
    }
}

#[test]
fn test_dirty_scenarios_have_positive_single_shot_delta() {
    let options = RunOptions::all()
        .with_name_filter("BAD_")
        .with_strategy(Strategy::SingleShot);
    let report = run(config(1), &options);
    assert!(!report.results.is_empty());
    for result in &report.results {
        let observation = result.observation.unwrap();
        assert!(observation.bytes_delta > 0, "{}", result.name);
        assert!(observation.allocations > 0, "{}", result.name);
    }
}

#[test]
fn test_repeated_runs_agree() {
    let first = run(config(3), &RunOptions::all());
    let second = run(config(3), &RunOptions::all());
    for (a, b) in first.results.iter().zip(&second.results) {
        assert_eq!(a.name, b.name);
        assert_eq!(
            a.observation.map(|o| o.verdict),
            b.observation.map(|o| o.verdict),
            "{}",
            a.name
        );
    }
}

#[test]
fn test_lazy_init_needs_warmup() {
    let cold = config(10).with_warmup_rounds(0);
    let report = run(cold, &RunOptions::all().with_name_filter("OK_lazy_"));
    assert_eq!(report.results.len(), 2);
    for result in &report.results {
        assert_eq!(result.outcome, Outcome::Mismatch, "{}", result.name);
        assert_eq!(result.observation.unwrap().verdict, Verdict::Allocated);
    }

    let warm = run(config(10), &RunOptions::all().with_name_filter("OK_lazy_"));
    assert!(warm.is_success());
}

#[test]
fn test_composite_key_needs_equivalence() {
    let report = run(
        config(2),
        &RunOptions::all()
            .with_name_filter("composite_key")
            .with_strategy(Strategy::SingleShot),
    );
    let owned = report.result("BAD_owned_composite_key_lookup").unwrap();
    let observation = owned.observation.unwrap();
    assert_eq!(observation.verdict, Verdict::Allocated);
    assert!(observation.allocations >= 1000);

    let equivalent = report.result("OK_equivalent_composite_key_lookup").unwrap();
    assert_eq!(equivalent.observation.unwrap().verdict, Verdict::DidNotAllocate);
}

#[test]
fn test_literal_text_allocates_on_every_hash() {
    let context = MeasurementContext::init().unwrap();
    let probe = Probe::new(&context, config(1)).unwrap();
    let state = std::collections::hash_map::RandomState::new();

    for _ in 0..2 {
        let observation = probe
            .measure_with(Strategy::SingleShot, &mut || {
                black_box(hash_owned(&state, "helloworld"));
            })
            .unwrap();
        assert_eq!(observation.verdict, Verdict::Allocated);
        assert_eq!(observation.allocations, 1);
    }

    let text = GREETING.to_owned();
    let observation = probe
        .measure_with(Strategy::SingleShot, &mut || {
            black_box(hash_borrowed(&state, &text));
            black_box(hash_borrowed(&state, &text));
        })
        .unwrap();
    assert_eq!(observation.verdict, Verdict::DidNotAllocate);
}

#[test]
fn test_literal_is_free_through_borrowing_entry_point() {
    let context = MeasurementContext::init().unwrap();
    let probe = Probe::new(&context, config(1)).unwrap();
    let state = std::collections::hash_map::RandomState::new();

    let borrowed = probe
        .measure_with(Strategy::SingleShot, &mut || {
            black_box(hash_borrowed(&state, "helloworld"));
        })
        .unwrap();
    assert_eq!(borrowed.verdict, Verdict::DidNotAllocate);

    let owned = probe
        .measure_with(Strategy::SingleShot, &mut || {
            black_box(hash_owned(&state, "helloworld"));
        })
        .unwrap();
    assert_eq!(owned.verdict, Verdict::Allocated);
    assert_eq!(
        hash_borrowed(&state, "helloworld"),
        hash_owned(&state, "helloworld")
    );
}

#[test]
fn test_vec_tail_allocates() {
    let context = MeasurementContext::init().unwrap();
    let probe = Probe::new(&context, config(1)).unwrap();
    let observation = probe
        .measure(&mut || {
            black_box(variadic!(black_box(10); 1, 2, 3));
        })
        .unwrap();
    assert_eq!(observation.verdict, Verdict::Allocated);
    assert!(observation.bytes_delta >= 12);
}

#[test]
fn test_front_splice_needs_exact_length() {
    for strategy in [Strategy::SingleShot, Strategy::Differential] {
        let options = RunOptions::all()
            .with_name_filter("_vec_splice_front_")
            .with_strategy(strategy);
        let report = run(config(10), &options);
        assert_eq!(report.results.len(), 2);
        assert_all_passed(&report);

        let exact = report.result("OK_vec_splice_front_exact").unwrap();
        assert_eq!(exact.observation.unwrap().verdict, Verdict::DidNotAllocate);
        let filtered = report.result("BAD_vec_splice_front_filtered").unwrap();
        assert_eq!(filtered.observation.unwrap().verdict, Verdict::Allocated);
    }
}

proptest::proptest! {
    #![proptest_config(proptest::prelude::ProptestConfig::with_cases(24))]

    #[test]
    fn prop_any_clean_scenario_stays_clean(index in 0usize..64, repetitions in 1u32..64) {
        let catalog = Catalog::global().unwrap();
        let clean: Vec<_> = catalog
            .iter()
            .filter(|scenario| scenario.expected() == Verdict::DidNotAllocate)
            .collect();
        let scenario = clean[index % clean.len()];

        let context = MeasurementContext::init().unwrap();
        let runner = Runner::new(catalog, Probe::new(&context, config(repetitions)).unwrap());
        let result = runner
            .run_scenario(scenario, &RunOptions::all().with_strategy(Strategy::Differential))
            .unwrap();
        proptest::prop_assert_eq!(result.outcome, Outcome::Passed, "{}", result.name);
        proptest::prop_assert_eq!(result.observation.unwrap().bytes_delta, 0);
    }
}
