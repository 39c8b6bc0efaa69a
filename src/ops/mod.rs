//! High-level operations.
//!
//! This module contains the implementation of Drydock commands.

pub mod doctor;
pub mod drydock_matrix;
pub mod drydock_provision;

pub use doctor::{doctor, format_report, CheckResult, DoctorReport};
pub use drydock_matrix::{generate, generate_matrix, resolve_rules, MatrixOptions};
pub use drydock_provision::{
    ensure_installed, ensure_with_backend, provision_packages, Outcome, ProvisionError,
};
