//! CHSH statistic and its classification.
//!
//! $S = |E(a_1,b_1) - E(a_1,b_2) + E(a_2,b_1) + E(a_2,b_2)|$
//!
//! Local hidden-variable models satisfy $S \le 2$; the singlet reaches
//! $2\sqrt{2} \approx 2.828$ at the default settings.

use crate::analysis::{CorrelationTable, Tally};
use crate::errors::{ProtocolError, Result};
use crate::protocols::{BasisLabel, BasisPair};
use serde::{Deserialize, Serialize};

/// The two Alice bases and two Bob bases of the Bell test.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChshBases {
    pub alice: [BasisLabel; 2],
    pub bob: [BasisLabel; 2],
}

impl Default for ChshBases {
    fn default() -> Self {
        Self {
            alice: [BasisLabel::Deg0, BasisLabel::Deg90],
            bob: [BasisLabel::Deg45, BasisLabel::Deg135],
        }
    }
}

impl ChshBases {
    /// The four pairs, Alice-major: (a1,b1), (a1,b2), (a2,b1), (a2,b2).
    pub fn pairs(&self) -> [BasisPair; 4] {
        let [a1, a2] = self.alice;
        let [b1, b2] = self.bob;
        [(a1, b1), (a1, b2), (a2, b1), (a2, b2)]
    }

    pub fn contains(&self, pair: BasisPair) -> bool {
        self.alice.contains(&pair.0) && self.bob.contains(&pair.1)
    }
}

/// Cut-offs separating the verdicts.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChshThresholds {
    /// Below this, the correlations are explainable classically.
    pub classical_bound: f64,
    /// Above this, the violation is taken as robust.
    pub robust_threshold: f64,
}

impl Default for ChshThresholds {
    fn default() -> Self {
        Self {
            classical_bound: 2.0,
            robust_threshold: 2.5,
        }
    }
}

impl ChshThresholds {
    pub fn validate(&self) -> Result<()> {
        // Written so NaN is rejected too.
        if !(self.classical_bound <= self.robust_threshold) {
            return Err(ProtocolError::InvalidThresholds {
                classical_bound: self.classical_bound,
                robust_threshold: self.robust_threshold,
            });
        }
        Ok(())
    }

    pub fn classify(&self, s: f64) -> ChshVerdict {
        if s < self.classical_bound {
            ChshVerdict::Classical
        } else if s <= self.robust_threshold {
            ChshVerdict::Ambiguous
        } else {
            ChshVerdict::RobustViolation
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChshVerdict {
    /// No violation.
    Classical,
    /// Violation too small to rule out noise; not proof of a secure channel.
    Ambiguous,
    /// Clearly quantum; the channel is accepted.
    RobustViolation,
}

impl ChshVerdict {
    pub fn is_secure(self) -> bool {
        self == ChshVerdict::RobustViolation
    }
}

/// S together with its verdict.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChshStatistic {
    pub value: f64,
    pub verdict: ChshVerdict,
}

impl ChshStatistic {
    pub fn evaluate(
        table: &CorrelationTable,
        bases: &ChshBases,
        thresholds: &ChshThresholds,
    ) -> Result<Self> {
        let value = chsh_value(table, bases.alice, bases.bob)?;
        Ok(Self {
            value,
            verdict: thresholds.classify(value),
        })
    }
}

/// Computes S from the four CHSH correlations in `table`.
///
/// # Errors
///
/// `IncompleteCorrelationTable` if any of the four pairs is missing or has
/// no observations.
pub fn chsh_value(
    table: &CorrelationTable,
    alice_bases: [BasisLabel; 2],
    bob_bases: [BasisLabel; 2],
) -> Result<f64> {
    let bases = ChshBases {
        alice: alice_bases,
        bob: bob_bases,
    };

    let mut e = [0.0; 4];
    for (slot, (alice, bob)) in e.iter_mut().zip(bases.pairs()) {
        *slot = table
            .get((alice, bob))
            .filter(|tally| tally.total() > 0)
            .map(Tally::correlation)
            .ok_or(ProtocolError::IncompleteCorrelationTable { alice, bob })?;
    }

    let [e11, e12, e21, e22] = e;
    Ok((e11 - e12 + e21 + e22).abs())
}
