//! Measurement bases and the rotations that realise them.
//!
//! Measuring along an angle is done by rotating the particle first and then
//! reading it out in the computational basis.

use crate::Gate;
use crate::errors::ProtocolError;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

/// Measurement angle, in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BasisLabel {
    /// Reference (computational) basis.
    #[serde(rename = "0")]
    Deg0,
    #[serde(rename = "45")]
    Deg45,
    /// Orthogonal (Hadamard) basis.
    #[serde(rename = "90")]
    Deg90,
    #[serde(rename = "135")]
    Deg135,
}

/// `(alice, bob)` basis combination.
pub type BasisPair = (BasisLabel, BasisLabel);

impl BasisLabel {
    pub const ALL: [BasisLabel; 4] = [
        BasisLabel::Deg0,
        BasisLabel::Deg45,
        BasisLabel::Deg90,
        BasisLabel::Deg135,
    ];

    /// Angle in degrees.
    pub fn degrees(self) -> u16 {
        match self {
            BasisLabel::Deg0 => 0,
            BasisLabel::Deg45 => 45,
            BasisLabel::Deg90 => 90,
            BasisLabel::Deg135 => 135,
        }
    }

    /// Single-particle rotation applied before a computational-basis readout.
    pub fn rotation(self) -> Gate {
        match self {
            BasisLabel::Deg0 => Gate::i(),
            BasisLabel::Deg45 => Gate::ry(-PI / 4.0),
            BasisLabel::Deg90 => Gate::h(),
            BasisLabel::Deg135 => Gate::ry(-3.0 * PI / 4.0),
        }
    }
}

impl fmt::Display for BasisLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.degrees())
    }
}

impl FromStr for BasisLabel {
    type Err = ProtocolError;

    /// Parses `"0"`, `"45"`, `"90"` or `"135"`, with an optional `°` suffix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let angle = trimmed.strip_suffix('°').unwrap_or(trimmed);
        BasisLabel::ALL
            .into_iter()
            .find(|b| b.degrees().to_string() == angle)
            .ok_or_else(|| ProtocolError::UnknownBasisLabel(s.to_string()))
    }
}

/// Protocol participant. Alice holds particle 0, Bob particle 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Participant {
    Alice,
    Bob,
}

impl Participant {
    /// Index of the particle this participant measures.
    pub fn particle(self) -> usize {
        match self {
            Participant::Alice => 0,
            Participant::Bob => 1,
        }
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Participant::Alice => f.write_str("Alice"),
            Participant::Bob => f.write_str("Bob"),
        }
    }
}
