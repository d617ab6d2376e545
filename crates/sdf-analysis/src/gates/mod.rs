//! Parity gates: pass/fail policy over a parity result.

pub mod parity_gate;
pub mod reporter;
pub mod types;

pub use parity_gate::ParityGate;
pub use reporter::{failure_message, hook_summary};
pub use types::{GateConfig, GateKind, GateResult};
