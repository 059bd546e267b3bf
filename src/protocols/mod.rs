//! Entanglement-based protocols.
//!
//! This module contains the building blocks shared by the CHSH Bell test and
//! the E91 key distribution protocol: measurement bases, singlet pairs, the
//! intercept-resend eavesdropper, and the protocol drivers themselves.

mod basis;
pub mod bell_test;
pub mod e91;
pub mod eavesdropper;
mod pair;

pub use basis::{BasisLabel, BasisPair, Participant};
pub use e91::{E91Protocol, Trial, run_protocol};
pub use pair::{Outcome, PairOrigin, ParticlePair};
