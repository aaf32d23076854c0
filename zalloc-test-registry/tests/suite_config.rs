//! Suite configuration files and their effect on a run.

use tempfile::TempDir;
use zalloc_probe::{CountingAllocator, MeasurementContext, Probe, Strategy};
use zalloc_test_registry::{Catalog, Outcome, Runner, SuiteConfig};

#[global_allocator]
static GLOBAL: CountingAllocator = CountingAllocator;

const CONFIG: &str = r#"
[probe]
default_strategy = "differential"
repetitions = 50
warmup_rounds = 2

[scenarios.OK_vec_refill]
repetitions = 5

[scenarios.BAD_hash_text_literal]
strategy = "differential"
"#;

#[test]
fn test_load_saved_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("zalloc.toml");

    let config = SuiteConfig::example_config();
    config.save_to_file(&path).unwrap();
    let loaded = SuiteConfig::load_from_file(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_missing_file_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let error = SuiteConfig::load_from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(error.is_configuration_error());
    assert_eq!(SuiteConfig::load_or_default(dir.path().join("absent.toml")), SuiteConfig::default());
}

#[test]
fn test_invalid_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("zalloc.toml");
    std::fs::write(&path, "[probe]\nrepetitions = 0\n").unwrap();
    assert!(SuiteConfig::load_from_file(&path).unwrap_err().is_configuration_error());
}

#[test]
fn test_overrides_reach_the_runner() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("zalloc.toml");
    std::fs::write(&path, CONFIG).unwrap();

    let config = SuiteConfig::load_from_file(&path).unwrap();
    let catalog = Catalog::global().unwrap();
    config.check_against(catalog).unwrap();

    let context = MeasurementContext::init().unwrap();
    let runner = Runner::new(catalog, Probe::new(&context, config.probe).unwrap());
    let options = config.run_options();

    let refill = runner.run_scenario(catalog.find("OK_vec_refill").unwrap(), &options).unwrap();
    assert_eq!(refill.outcome, Outcome::Passed);
    assert_eq!(refill.strategy, Strategy::Differential);
    assert_eq!(refill.observation.unwrap().repetitions, 5);

    let literal = runner
        .run_scenario(catalog.find("BAD_hash_text_literal").unwrap(), &options)
        .unwrap();
    assert_eq!(literal.strategy, Strategy::Differential);
    assert_eq!(literal.outcome, Outcome::Passed);
    assert_eq!(literal.observation.unwrap().repetitions, 50);
}
