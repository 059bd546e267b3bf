pub mod analysis;
mod config;
mod core;
pub mod protocols;
mod sampler;

pub use crate::config::E91Config;
pub use crate::core::{Gate, QuantumState, errors, utils};
pub use crate::sampler::{DEFAULT_SEED, Sampler};
