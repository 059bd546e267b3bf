//! E91 with and without an intercept-resend eavesdropper.
//!
//! ```sh
//! RUST_LOG=info cargo run --example e91_eavesdropping
//! ```

use qcrypto_e91::analysis::analyze;
use qcrypto_e91::protocols::E91Protocol;
use qcrypto_e91::protocols::bell_test::run_chsh_experiment;
use qcrypto_e91::{E91Config, Sampler};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let base = E91Config::default();

    let bell = run_chsh_experiment(&Sampler::new(), &base.chsh, 2000, &base.thresholds)?;
    println!("Bell test:");
    for (pair, e) in bell.table.correlations() {
        println!("  E{pair:?} = {e:.4}");
    }
    println!(
        "  S = {:.4} ({:?})\n",
        bell.statistic.value, bell.statistic.verdict
    );

    for p in [0.0, E91Config::DEFAULT_ATTACK_PROBABILITY, 1.0] {
        let config = base.clone().with_intercept_probability(p);
        let trials = E91Protocol::new(config.clone())?.run()?;
        let report = analyze(&trials, &config)?;

        println!("Intercept probability {p:.1}:");
        println!(
            "  key bits {} | bell-test rounds {} | discarded {}",
            report.sifted.key_results.len(),
            report.sifted.chsh_results.len(),
            report.sifted.discarded
        );
        println!("  S = {:.4} ({:?})", report.chsh.value, report.chsh.verdict);
        println!("  QBER = {:.2}%", report.qber * 100.0);
        println!(
            "  channel {}\n",
            if report.chsh.verdict.is_secure() {
                "accepted"
            } else {
                "rejected"
            }
        );
    }

    Ok(())
}
