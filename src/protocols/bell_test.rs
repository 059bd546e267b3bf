//! CHSH Bell test on singlet pairs.
//!
//! Each of the four CHSH basis combinations is measured `shots` times on a
//! fresh singlet, in one sampling call per combination. An ideal singlet
//! reaches $S = 2\sqrt{2}$, above the classical bound of 2.

use crate::Sampler;
use crate::analysis::{ChshBases, ChshStatistic, ChshThresholds, CorrelationTable};
use crate::errors::Result;
use crate::protocols::ParticlePair;
use tracing::debug;

/// Result of a standalone Bell test.
#[derive(Clone, Debug, PartialEq)]
pub struct BellTestResult {
    pub table: CorrelationTable,
    pub statistic: ChshStatistic,
}

/// Measures every CHSH basis pair `shots` times and evaluates S.
///
/// # Errors
///
/// `IncompleteCorrelationTable` when `shots` is zero, since no pair then has
/// observations.
pub fn run_chsh_experiment(
    sampler: &Sampler,
    bases: &ChshBases,
    shots: usize,
    thresholds: &ChshThresholds,
) -> Result<BellTestResult> {
    let mut table = CorrelationTable::default();

    for pair in bases.pairs() {
        let (alice, bob) = pair;
        let counts = ParticlePair::singlet()?
            .in_bases(alice, bob)?
            .measure_shots(sampler, shots);
        debug!(%alice, %bob, ?counts, "bell pair sampled");

        let tally = table.entry(pair);
        for (outcome, n) in counts {
            tally.add(outcome, n);
        }
    }

    let statistic = ChshStatistic::evaluate(&table, bases, thresholds)?;
    Ok(BellTestResult { table, statistic })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::ChshVerdict;
    use crate::errors::ProtocolError;

    #[test]
    fn ideal_singlet_violates_chsh() {
        let sampler = Sampler::new();
        let result = run_chsh_experiment(
            &sampler,
            &ChshBases::default(),
            4000,
            &ChshThresholds::default(),
        )
        .unwrap();

        let s = result.statistic.value;
        assert!(s > 2.6 && s < 3.0, "S = {s}");
        assert_eq!(result.statistic.verdict, ChshVerdict::RobustViolation);
        assert_eq!(result.table.len(), 4);
    }

    #[test]
    fn zero_shots_leaves_table_incomplete() {
        let sampler = Sampler::new();
        let err = run_chsh_experiment(&sampler, &ChshBases::default(), 0, &ChshThresholds::default())
            .unwrap_err();
        assert!(matches!(err, ProtocolError::IncompleteCorrelationTable { .. }));
    }
}
