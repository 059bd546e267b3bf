use crate::analysis::ChshBases;
use crate::protocols::{BasisPair, Outcome, Trial};

/// Trials split into key material and Bell-test data.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SiftedData {
    /// Outcomes of rounds where Alice and Bob chose the same basis.
    pub key_results: Vec<Outcome>,
    /// Outcomes of rounds on a CHSH basis pair, with that pair.
    pub chsh_results: Vec<(BasisPair, Outcome)>,
    /// Rounds that fit neither category.
    pub discarded: usize,
}

impl SiftedData {
    /// Number of trials that went into the partition.
    pub fn total(&self) -> usize {
        self.key_results.len() + self.chsh_results.len() + self.discarded
    }

    /// Alice's and Bob's raw keys.
    ///
    /// The singlet is anti-correlated in any shared basis, so Bob inverts his
    /// bit; with no disturbance both keys are identical.
    pub fn key_bits(&self) -> (Vec<bool>, Vec<bool>) {
        self.key_results
            .iter()
            .map(|o| (o.alice, !o.bob))
            .unzip()
    }

    /// Fraction of key positions where the two raw keys disagree.
    pub fn qber(&self) -> f64 {
        if self.key_results.is_empty() {
            return 0.0;
        }
        let errors = self.key_results.iter().filter(|o| o.agrees()).count();
        errors as f64 / self.key_results.len() as f64
    }
}

/// Partitions `trials` in order.
///
/// - Same basis on both sides: key material.
/// - Basis pair in the CHSH set: Bell-test data.
/// - Anything else: discarded.
pub fn sift(trials: &[Trial], chsh: &ChshBases) -> SiftedData {
    let mut sifted = SiftedData::default();

    for trial in trials {
        let pair = trial.bases();
        if trial.alice_basis == trial.bob_basis {
            sifted.key_results.push(trial.outcome);
        } else if chsh.contains(pair) {
            sifted.chsh_results.push((pair, trial.outcome));
        } else {
            sifted.discarded += 1;
        }
    }

    sifted
}
