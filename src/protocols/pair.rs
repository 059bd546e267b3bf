//! Two-particle states shared between Alice and Bob.

use crate::protocols::{BasisLabel, Participant};
use crate::{Gate, QuantumState, Sampler, errors::StateError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Where the pair measured in a trial came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PairOrigin {
    /// Fresh singlet from the source.
    Entangled,
    /// Product state re-sent by the eavesdropper.
    Intercepted,
}

/// One joint readout: a bit per participant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Outcome {
    pub alice: bool,
    pub bob: bool,
}

impl Outcome {
    pub const ALL: [Outcome; 4] = [
        Outcome::new(false, false),
        Outcome::new(true, false),
        Outcome::new(false, true),
        Outcome::new(true, true),
    ];

    pub const fn new(alice: bool, bob: bool) -> Self {
        Self { alice, bob }
    }

    /// Decodes a two-qubit basis index (particle `q` is bit `q`).
    pub fn from_index(index: usize) -> Self {
        Self {
            alice: index & 1 == 1,
            bob: (index >> 1) & 1 == 1,
        }
    }

    /// Readout digits in register order: `[particle 1, particle 0]`.
    pub fn digits(self) -> [bool; 2] {
        [self.bob, self.alice]
    }

    /// Whether both participants read the same bit.
    pub fn agrees(self) -> bool {
        self.alice == self.bob
    }
}

impl fmt::Display for Outcome {
    /// Two-character label, particle 1 first (`"01"` is Alice 1, Bob 0).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [d0, d1] = self.digits();
        write!(f, "{}{}", u8::from(d0), u8::from(d1))
    }
}

/// A two-particle state, consumed by measurement.
///
/// Transformations take the pair by value and hand back the new snapshot, so
/// a pair can be measured at most once.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticlePair {
    state: QuantumState,
    origin: PairOrigin,
}

impl ParticlePair {
    /// Prepares the singlet $|\Psi^-\rangle = (|01\rangle - |10\rangle)/\sqrt{2}$.
    pub fn singlet() -> Result<Self, StateError> {
        let mut state = QuantumState::new(2);
        state.apply(&Gate::h(), &[0])?;
        state.apply(&Gate::cnot(), &[0, 1])?;
        state.apply(&Gate::x(), &[1])?;
        state.apply(&Gate::z(), &[1])?;

        Ok(Self {
            state,
            origin: PairOrigin::Entangled,
        })
    }

    /// Prepares the unentangled state with the given computational bits.
    pub fn product(outcome: Outcome, origin: PairOrigin) -> Result<Self, StateError> {
        let mut state = QuantumState::new(2);
        if outcome.alice {
            state.apply(&Gate::x(), &[Participant::Alice.particle()])?;
        }
        if outcome.bob {
            state.apply(&Gate::x(), &[Participant::Bob.particle()])?;
        }
        Ok(Self { state, origin })
    }

    pub fn origin(&self) -> PairOrigin {
        self.origin
    }

    pub fn state(&self) -> &QuantumState {
        &self.state
    }

    /// Rotates `participant`'s particle into `basis`.
    pub fn rotate(
        mut self,
        participant: Participant,
        basis: BasisLabel,
    ) -> Result<Self, StateError> {
        self.state.apply(&basis.rotation(), &[participant.particle()])?;
        Ok(self)
    }

    /// Rotates both particles into their bases.
    pub fn in_bases(self, alice: BasisLabel, bob: BasisLabel) -> Result<Self, StateError> {
        self.rotate(Participant::Alice, alice)?.rotate(Participant::Bob, bob)
    }

    /// Reads both particles out in the computational basis, consuming the pair.
    pub fn measure(self, sampler: &Sampler) -> Outcome {
        Outcome::from_index(sampler.sample_once(&self.state))
    }

    /// Repeats the readout `shots` times in one sampling call.
    pub fn measure_shots(self, sampler: &Sampler, shots: usize) -> HashMap<Outcome, usize> {
        sampler
            .sample(&self.state, shots)
            .into_iter()
            .map(|(index, count)| (Outcome::from_index(index), count))
            .collect()
    }
}
