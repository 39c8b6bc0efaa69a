//! Drydock - CI build-matrix generation and host provisioning for native libraries
//!
//! This crate provides the core library functionality for Drydock,
//! including build-matrix filtering and system package provisioning.

pub mod core;
pub mod ops;
pub mod util;

/// Test utilities and mocks for Drydock unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides a mock command runner so provisioning
/// logic can be exercised without touching the host.
#[cfg(test)]
pub mod test_support;

pub use crate::core::{
    backend::PackageBackend,
    config::{Architecture, BuildConfiguration, BuildType, CompilerFamily, CxxStdlib, MsvcRuntime},
    host::HostOs,
    rules::{ExclusionRule, RuleSet},
};

pub use crate::ops::drydock_matrix::generate;
pub use crate::ops::drydock_provision::{ensure_installed, Outcome, ProvisionError};
pub use crate::util::process::{CommandRunner, ProcessBuilder, SystemRunner};
