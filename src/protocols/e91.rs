//! E91 Quantum Key Distribution Protocol.
//!
//! E91 was proposed by Artur Ekert in 1991. A source distributes singlet
//! pairs; Alice and Bob each measure in a randomly chosen basis. Rounds with
//! matching bases yield anti-correlated key bits, while rounds on the CHSH
//! basis pairs feed a Bell test that exposes an eavesdropper.

use crate::errors::Result;
use crate::protocols::{BasisLabel, BasisPair, Outcome, PairOrigin, ParticlePair, eavesdropper};
use crate::{E91Config, Sampler};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// One distributed pair: who produced it, how it was measured, what was read.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trial {
    pub origin: PairOrigin,
    pub alice_basis: BasisLabel,
    pub bob_basis: BasisLabel,
    pub outcome: Outcome,
}

impl Trial {
    pub fn bases(&self) -> BasisPair {
        (self.alice_basis, self.bob_basis)
    }
}

/// Drives E91 trials.
///
/// Basis choices and interception decisions come from a generator seeded by
/// `basis_seed`; measurement outcomes come from the sampler's own seed
/// counter. The two streams never share a seed.
#[derive(Debug)]
pub struct E91Protocol {
    config: E91Config,
    sampler: Sampler,
    rng: StdRng,
}

impl E91Protocol {
    /// Validates `config` and prepares a fresh run.
    ///
    /// # Errors
    ///
    /// - `InvalidProbability` if the intercept probability is outside [0, 1].
    /// - `EmptyBasisOptions` if either participant has no bases.
    /// - `InvalidThresholds` if the classical bound exceeds the robust threshold.
    pub fn new(config: E91Config) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            sampler: Sampler::with_seed(config.measurement_seed),
            rng: StdRng::seed_from_u64(config.basis_seed),
            config,
        })
    }

    pub fn config(&self) -> &E91Config {
        &self.config
    }

    /// Runs `config.trials` trials.
    pub fn run(&mut self) -> Result<Vec<Trial>> {
        self.run_trials(self.config.trials)
    }

    /// Runs `num_trials` trials in index order.
    ///
    /// The first failing trial aborts the whole run.
    pub fn run_trials(&mut self, num_trials: usize) -> Result<Vec<Trial>> {
        info!(
            trials = num_trials,
            intercept_probability = self.config.intercept_probability,
            "starting E91 run"
        );

        let trials = (0..num_trials)
            .map(|index| self.run_trial(index))
            .collect::<Result<Vec<_>>>()?;

        let intercepted = trials
            .iter()
            .filter(|t| t.origin == PairOrigin::Intercepted)
            .count();
        info!(trials = trials.len(), intercepted, "E91 run complete");

        Ok(trials)
    }

    fn run_trial(&mut self, index: usize) -> Result<Trial> {
        let alice_basis = choose(&mut self.rng, &self.config.alice_bases);
        let bob_basis = choose(&mut self.rng, &self.config.bob_bases);

        let mut pair = ParticlePair::singlet()?;

        // Drawn every round so the basis stream does not depend on the attack rate.
        let roll: f64 = self.rng.random();
        if roll < self.config.intercept_probability {
            pair = eavesdropper::intercept(pair, &self.sampler)?;
            debug!(index, "pair intercepted");
        }

        let origin = pair.origin();
        let outcome = pair
            .in_bases(alice_basis, bob_basis)?
            .measure(&self.sampler);

        Ok(Trial {
            origin,
            alice_basis,
            bob_basis,
            outcome,
        })
    }
}

/// Runs E91 with default seeds and CHSH settings.
///
/// # Arguments
///
/// * `num_trials` - Number of pairs to distribute.
/// * `alice_bases` - Alice's basis options.
/// * `bob_bases` - Bob's basis options.
/// * `intercept_probability` - Chance that Eve intercepts each pair.
pub fn run_protocol(
    num_trials: usize,
    alice_bases: &[BasisLabel],
    bob_bases: &[BasisLabel],
    intercept_probability: f64,
) -> Result<Vec<Trial>> {
    let config = E91Config::default()
        .with_trials(num_trials)
        .with_bases(alice_bases.to_vec(), bob_bases.to_vec())
        .with_intercept_probability(intercept_probability);

    E91Protocol::new(config)?.run()
}

/// Uniform pick from a non-empty slice.
fn choose(rng: &mut StdRng, options: &[BasisLabel]) -> BasisLabel {
    options[rng.random_range(0..options.len())]
}

/// Parses textual basis options, failing on the first unknown label.
pub fn parse_bases<S: AsRef<str>>(labels: &[S]) -> Result<Vec<BasisLabel>> {
    labels
        .iter()
        .map(|l| l.as_ref().parse::<BasisLabel>())
        .collect()
}
