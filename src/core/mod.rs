//! Core data structures for Drydock.
//!
//! This module contains the foundational types used throughout Drydock:
//! - Build configurations and their component enums
//! - Host OS detection and default matrix tables
//! - Exclusion rules
//! - Package-manager backends

pub mod backend;
pub mod config;
pub mod host;
pub mod rules;

pub use backend::PackageBackend;
pub use config::{
    Architecture, BuildConfiguration, BuildType, CompilerFamily, CxxStdlib, MsvcRuntime,
};
pub use host::{default_configurations, HostOs};
pub use rules::{ExclusionRule, RulePredicate, RuleSet};
