//! Post-processing of E91 trials: sifting, correlations and the CHSH test.
//!
//! Everything here is pure data transformation; none of it touches a
//! quantum state.

mod chsh;
mod correlation;
mod sifting;

pub use chsh::{ChshBases, ChshStatistic, ChshThresholds, ChshVerdict, chsh_value};
pub use correlation::{CorrelationTable, Tally, correlate};
pub use sifting::{SiftedData, sift};

use crate::E91Config;
use crate::errors::Result;
use crate::protocols::Trial;
use tracing::{debug, info, warn};

/// Everything derived from one run.
#[derive(Clone, Debug, PartialEq)]
pub struct E91Report {
    pub sifted: SiftedData,
    pub table: CorrelationTable,
    pub chsh: ChshStatistic,
    pub alice_key: Vec<bool>,
    pub bob_key: Vec<bool>,
    pub qber: f64,
}

/// Sifts `trials`, builds the Bell-test table and evaluates S.
///
/// # Errors
///
/// `IncompleteCorrelationTable` if some CHSH pair was never measured.
pub fn analyze(trials: &[Trial], config: &E91Config) -> Result<E91Report> {
    let sifted = sift(trials, &config.chsh);
    debug!(
        key = sifted.key_results.len(),
        chsh = sifted.chsh_results.len(),
        discarded = sifted.discarded,
        "trials sifted"
    );

    let table = correlate(&sifted.chsh_results);
    for (&(alice, bob), tally) in table.iter() {
        debug!(%alice, %bob, total = tally.total(), e = tally.correlation(), "correlation");
    }

    let chsh = ChshStatistic::evaluate(&table, &config.chsh, &config.thresholds)?;
    match chsh.verdict {
        ChshVerdict::Ambiguous => warn!(s = chsh.value, "CHSH violation is inconclusive"),
        verdict => info!(s = chsh.value, ?verdict, "CHSH test evaluated"),
    }

    let (alice_key, bob_key) = sifted.key_bits();
    let qber = sifted.qber();

    Ok(E91Report {
        sifted,
        table,
        chsh,
        alice_key,
        bob_key,
        qber,
    })
}
