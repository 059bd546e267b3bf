pub mod errors;
mod gates;
mod state;
pub mod utils;

pub use gates::Gate;
pub use state::QuantumState;
