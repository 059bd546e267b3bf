use crate::QuantumState;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// First seed handed out by a default [`Sampler`].
pub const DEFAULT_SEED: u64 = 91;

/// Monotonic source of measurement seeds.
///
/// Each call to [`SeedSequence::advance`] returns the current value and bumps
/// the counter by one. The atomic increment keeps seeds unique even if the
/// owning sampler is shared.
#[derive(Debug)]
struct SeedSequence {
    next: AtomicU64,
}

impl SeedSequence {
    fn starting_at(seed: u64) -> Self {
        Self {
            next: AtomicU64::new(seed),
        }
    }

    fn advance(&self) -> u64 {
        self.next.fetch_add(1, Ordering::SeqCst)
    }
}

/// Draws computational-basis outcomes from a `QuantumState`.
///
/// Every sampling call, whatever its shot count, consumes exactly one seed
/// from the sampler's own counter, so two samplers built with the same
/// starting seed replay identical outcome streams.
#[derive(Debug)]
pub struct Sampler {
    seeds: SeedSequence,
}

impl Default for Sampler {
    fn default() -> Self {
        Self::new()
    }
}

impl Sampler {
    /// Creates a sampler whose counter starts at [`DEFAULT_SEED`].
    pub fn new() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }

    /// Creates a sampler whose counter starts at `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seeds: SeedSequence::starting_at(seed),
        }
    }

    /// Samples `state` `num_shots` times in the computational basis.
    ///
    /// # Returns
    ///
    /// A `HashMap` from basis index (qubit `q` is bit `q`) to the number of
    /// shots that landed on it. Indices never observed are absent.
    pub fn sample(&self, state: &QuantumState, num_shots: usize) -> HashMap<usize, usize> {
        let mut rng = StdRng::seed_from_u64(self.seeds.advance());
        let cdf = cumulative(&state.probabilities());

        let mut counts = HashMap::new();
        for _ in 0..num_shots {
            *counts.entry(pick(&cdf, &mut rng)).or_insert(0) += 1;
        }
        counts
    }

    /// Samples a single outcome, consuming one seed.
    pub fn sample_once(&self, state: &QuantumState) -> usize {
        let mut rng = StdRng::seed_from_u64(self.seeds.advance());
        pick(&cumulative(&state.probabilities()), &mut rng)
    }
}

/// Cumulative distribution function of `probs`.
fn cumulative(probs: &[f64]) -> Vec<f64> {
    probs
        .iter()
        .scan(0.0, |acc, &p| {
            *acc += p;
            Some(*acc)
        })
        .collect()
}

/// Inverts the CDF at a uniform draw in [0, 1).
fn pick(cdf: &[f64], rng: &mut StdRng) -> usize {
    let r: f64 = rng.random();
    cdf.iter()
        .position(|&c| r < c)
        // Rounding can leave the last entry a hair under 1.0.
        .unwrap_or(cdf.len().saturating_sub(1))
}
