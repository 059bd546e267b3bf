use crate::analysis::{ChshBases, ChshThresholds};
use crate::errors::{ProtocolError, Result};
use crate::protocols::{BasisLabel, Participant};
use crate::sampler::DEFAULT_SEED;
use serde::{Deserialize, Serialize};

/// Parameters of an E91 run.
///
/// Every field has a default, so a partial JSON document is enough to
/// describe a run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct E91Config {
    /// Number of entangled pairs distributed.
    pub trials: usize,
    /// Bases Alice picks from, uniformly.
    pub alice_bases: Vec<BasisLabel>,
    /// Bases Bob picks from, uniformly.
    pub bob_bases: Vec<BasisLabel>,
    /// Basis subsets whose cross product forms the Bell test.
    pub chsh: ChshBases,
    /// Probability that Eve intercepts any given pair.
    pub intercept_probability: f64,
    /// Seed of the generator drawing bases and interception decisions.
    pub basis_seed: u64,
    /// First measurement seed handed to the sampler.
    pub measurement_seed: u64,
    pub thresholds: ChshThresholds,
}

impl Default for E91Config {
    fn default() -> Self {
        Self {
            trials: 2000,
            alice_bases: vec![BasisLabel::Deg0, BasisLabel::Deg45, BasisLabel::Deg90],
            bob_bases: vec![BasisLabel::Deg45, BasisLabel::Deg90, BasisLabel::Deg135],
            chsh: ChshBases::default(),
            intercept_probability: 0.0,
            basis_seed: 2024,
            measurement_seed: DEFAULT_SEED,
            thresholds: ChshThresholds::default(),
        }
    }
}

impl E91Config {
    /// Interception rate of the reference attack scenario.
    pub const DEFAULT_ATTACK_PROBABILITY: f64 = 0.7;

    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    pub fn with_bases(mut self, alice: Vec<BasisLabel>, bob: Vec<BasisLabel>) -> Self {
        self.alice_bases = alice;
        self.bob_bases = bob;
        self
    }

    pub fn with_intercept_probability(mut self, p: f64) -> Self {
        self.intercept_probability = p;
        self
    }

    pub fn with_seeds(mut self, basis_seed: u64, measurement_seed: u64) -> Self {
        self.basis_seed = basis_seed;
        self.measurement_seed = measurement_seed;
        self
    }

    pub fn with_thresholds(mut self, thresholds: ChshThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Rejects configurations that cannot drive a run.
    pub fn validate(&self) -> Result<()> {
        validate_prob(self.intercept_probability)?;

        if self.alice_bases.is_empty() {
            return Err(ProtocolError::EmptyBasisOptions(Participant::Alice));
        }
        if self.bob_bases.is_empty() {
            return Err(ProtocolError::EmptyBasisOptions(Participant::Bob));
        }

        self.thresholds.validate()
    }
}

/// Validate probability parameter
fn validate_prob(p: f64) -> Result<()> {
    // NaN fails the range check as well.
    if !(0.0..=1.0).contains(&p) {
        return Err(ProtocolError::InvalidProbability(p));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(E91Config::default().validate().is_ok());
    }

    #[test]
    fn rejects_probability_out_of_range() {
        for p in [-0.1, 1.01, f64::NAN] {
            let config = E91Config::default().with_intercept_probability(p);
            assert!(matches!(
                config.validate(),
                Err(ProtocolError::InvalidProbability(_))
            ));
        }
        for p in [0.0, 0.5, 1.0] {
            let config = E91Config::default().with_intercept_probability(p);
            assert!(config.validate().is_ok());
        }
    }

    #[test]
    fn rejects_empty_basis_options() {
        let config = E91Config::default().with_bases(vec![], vec![BasisLabel::Deg0]);
        assert!(matches!(
            config.validate(),
            Err(ProtocolError::EmptyBasisOptions(Participant::Alice))
        ));

        let config = E91Config::default().with_bases(vec![BasisLabel::Deg0], vec![]);
        assert!(matches!(
            config.validate(),
            Err(ProtocolError::EmptyBasisOptions(Participant::Bob))
        ));
    }

    #[test]
    fn rejects_inverted_thresholds() {
        let config = E91Config::default().with_thresholds(ChshThresholds {
            classical_bound: 2.6,
            robust_threshold: 2.5,
        });
        assert!(matches!(
            config.validate(),
            Err(ProtocolError::InvalidThresholds { .. })
        ));
    }
}
