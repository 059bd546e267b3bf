//! End-to-end runs of the E91 pipeline.

use qcrypto_e91::analysis::{
    ChshBases, ChshThresholds, ChshVerdict, analyze, chsh_value, correlate, sift,
};
use qcrypto_e91::errors::ProtocolError;
use qcrypto_e91::protocols::bell_test::run_chsh_experiment;
use qcrypto_e91::protocols::{BasisLabel, E91Protocol, PairOrigin, Trial, run_protocol};
use qcrypto_e91::{E91Config, Sampler};

fn run(config: E91Config) -> Vec<Trial> {
    E91Protocol::new(config).unwrap().run().unwrap()
}

#[test]
fn identical_parameters_reproduce_identical_trials() {
    let config = E91Config::default()
        .with_trials(500)
        .with_intercept_probability(0.3);

    let first = run(config.clone());
    let second = run(config);
    assert_eq!(first, second);
}

#[test]
fn different_measurement_seed_changes_outcomes_not_bases() {
    let base = E91Config::default().with_trials(500);
    let a = run(base.clone());
    let b = run(base.with_seeds(2024, 12_345));

    assert!(a.iter().zip(&b).all(|(x, y)| x.bases() == y.bases()));
    assert_ne!(
        a.iter().map(|t| t.outcome).collect::<Vec<_>>(),
        b.iter().map(|t| t.outcome).collect::<Vec<_>>()
    );
}

#[test]
fn clean_channel_violates_chsh_robustly() {
    let config = E91Config::default().with_trials(6000);
    let trials = run(config.clone());
    let report = analyze(&trials, &config).unwrap();

    assert!(report.chsh.value > 2.5, "S = {}", report.chsh.value);
    assert_eq!(report.chsh.verdict, ChshVerdict::RobustViolation);
    assert_eq!(report.qber, 0.0);
    assert_eq!(report.alice_key, report.bob_key);
}

#[test]
fn full_intercept_resend_is_detected() {
    let config = E91Config::default()
        .with_trials(6000)
        .with_intercept_probability(1.0);
    let trials = run(config.clone());
    assert!(trials.iter().all(|t| t.origin == PairOrigin::Intercepted));

    let report = analyze(&trials, &config).unwrap();
    assert!(report.chsh.value <= 2.0, "S = {}", report.chsh.value);
    assert_eq!(report.chsh.verdict, ChshVerdict::Classical);
    assert!(!report.chsh.verdict.is_secure());
}

#[test]
fn partial_attack_lowers_s() {
    let clean = E91Config::default().with_trials(6000);
    let attacked = clean
        .clone()
        .with_intercept_probability(E91Config::DEFAULT_ATTACK_PROBABILITY);

    let s_clean = analyze(&run(clean.clone()), &clean).unwrap().chsh.value;
    let s_attacked = analyze(&run(attacked.clone()), &attacked).unwrap().chsh.value;
    assert!(s_attacked < s_clean - 0.4, "{s_attacked} vs {s_clean}");
}

#[test]
fn run_protocol_matches_free_function_contract() {
    let alice = [BasisLabel::Deg0, BasisLabel::Deg45, BasisLabel::Deg90];
    let bob = [BasisLabel::Deg45, BasisLabel::Deg90, BasisLabel::Deg135];
    let trials = run_protocol(3000, &alice, &bob, 0.0).unwrap();
    assert_eq!(trials.len(), 3000);

    let chsh = ChshBases::default();
    let sifted = sift(&trials, &chsh);
    assert_eq!(sifted.total(), trials.len());

    let table = correlate(&sifted.chsh_results);
    let s = chsh_value(&table, chsh.alice, chsh.bob).unwrap();
    assert!(s > 2.0);
}

#[test]
fn run_without_chsh_bases_cannot_be_analyzed() {
    // Bob never measures at 135, so two CHSH pairs stay empty.
    let config = E91Config::default()
        .with_trials(200)
        .with_bases(
            vec![BasisLabel::Deg0, BasisLabel::Deg90],
            vec![BasisLabel::Deg45, BasisLabel::Deg90],
        );
    let trials = run(config.clone());
    let err = analyze(&trials, &config).unwrap_err();
    assert!(matches!(
        err,
        ProtocolError::IncompleteCorrelationTable {
            bob: BasisLabel::Deg135,
            ..
        }
    ));
}

#[test]
fn invalid_probability_is_rejected_before_any_trial() {
    let config = E91Config::default().with_intercept_probability(-0.5);
    assert!(matches!(
        E91Protocol::new(config),
        Err(ProtocolError::InvalidProbability(_))
    ));
}

#[test]
fn standalone_bell_test_near_tsirelson_bound() {
    let result = run_chsh_experiment(
        &Sampler::new(),
        &ChshBases::default(),
        5000,
        &ChshThresholds::default(),
    )
    .unwrap();
    let s = result.statistic.value;
    assert!((s - 2.0 * 2.0_f64.sqrt()).abs() < 0.15, "S = {s}");
}

#[test]
fn config_loads_from_partial_json() {
    let config: E91Config = serde_json::from_str(
        r#"{
            "trials": 100,
            "alice_bases": ["0", "45", "90"],
            "intercept_probability": 0.7,
            "thresholds": { "classical_bound": 2.0, "robust_threshold": 2.6 }
        }"#,
    )
    .unwrap();

    assert_eq!(config.trials, 100);
    assert_eq!(config.intercept_probability, 0.7);
    assert_eq!(config.bob_bases, E91Config::default().bob_bases);
    assert_eq!(config.thresholds.robust_threshold, 2.6);
    assert!(config.validate().is_ok());
}

#[test]
fn config_with_unknown_basis_fails_to_load() {
    let res = serde_json::from_str::<E91Config>(r#"{ "alice_bases": ["0", "30"] }"#);
    assert!(res.is_err());
}
