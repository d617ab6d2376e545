//! # sdf-core
//!
//! Foundation crate for the SDF-CVF toolchain.
//! Errors, layered configuration, tracing setup, and shared constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod types;

pub use config::SdfConfig;
pub use errors::SdfErrorCode;
